use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use pb_api::app::{self, AppState};
use pb_api::middleware::create_cors;
use pb_api::telemetry::init_tracing;
use pb_core::services::auth::{AuthService, AuthServiceConfig};
use pb_core::services::bridge::{BridgeConfig, CredentialBridge};
use pb_core::services::rate_limit::SlidingWindowRateLimiter;
use pb_core::services::verification::{OtpService, OtpServiceConfig};
use pb_infra::commerce::{build_http_client, ShopifyAdminClient, ShopifyStorefrontClient};
use pb_infra::database::{DatabasePool, MySqlCustomerIdentityRepository, MySqlOtpChallengeRepository};
use pb_infra::sms::{create_sms_service, SmsServiceAdapter};

type ProductionState = AppState<
    MySqlOtpChallengeRepository,
    SmsServiceAdapter,
    MySqlCustomerIdentityRepository,
    ShopifyAdminClient,
    ShopifyStorefrontClient,
>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = pb_infra::load_config();

    init_tracing(&config.logging);

    let problems = pb_infra::check_config(&config).context("Invalid configuration")?;
    for problem in &problems {
        tracing::warn!(event = "config_incomplete", problem = %problem, "Configuration problem");
    }

    tracing::info!(
        environment = %config.environment,
        store = %config.commerce.store_domain,
        sms_provider = %config.sms.provider,
        "Starting PhoneBridge API Server"
    );

    // Record store
    let pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to the database")?;
    pool.bootstrap_schema()
        .await
        .context("Failed to bootstrap the database schema")?;

    let challenges = Arc::new(MySqlOtpChallengeRepository::new(pool.get_pool().clone()));
    let identities = Arc::new(MySqlCustomerIdentityRepository::new(pool.get_pool().clone()));

    // SMS transport
    let sms = Arc::new(SmsServiceAdapter::new(create_sms_service(&config.sms)));
    tracing::info!(provider = sms.provider_name(), "SMS transport ready");

    // Commerce platform
    let http = build_http_client(&config.commerce).context("Failed to build HTTP client")?;
    let admin = Arc::new(ShopifyAdminClient::with_client(http.clone(), config.commerce.clone()));
    let storefront = Arc::new(ShopifyStorefrontClient::with_client(http, config.commerce.clone()));

    // Services
    let otp_service = Arc::new(OtpService::new(
        challenges,
        sms,
        OtpServiceConfig::from(&config.otp),
    ));
    let bridge = Arc::new(CredentialBridge::new(
        identities,
        admin,
        storefront,
        BridgeConfig::from(&config.commerce),
    ));
    let issue_limiter = Arc::new(
        SlidingWindowRateLimiter::new(config.rate_limit.issue).enabled(config.rate_limit.enabled),
    );
    let verify_limiter = Arc::new(
        SlidingWindowRateLimiter::new(config.rate_limit.verify).enabled(config.rate_limit.enabled),
    );
    let auth_service = Arc::new(AuthService::new(
        otp_service,
        bridge,
        issue_limiter,
        verify_limiter,
        AuthServiceConfig::from_otp_config(&config.otp, config.environment),
    ));

    let state: web::Data<ProductionState> = web::Data::new(AppState {
        auth_service,
        commerce_configured: config.commerce.is_configured(),
    });

    let bind_address = config.server.bind_address();
    let environment = config.environment;
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(create_cors(environment))
            .wrap(TracingLogger::default())
            .configure(
                app::configure::<
                    MySqlOtpChallengeRepository,
                    SmsServiceAdapter,
                    MySqlCustomerIdentityRepository,
                    ShopifyAdminClient,
                    ShopifyStorefrontClient,
                >,
            )
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    tracing::info!("PhoneBridge API Server stopped");
    Ok(())
}
