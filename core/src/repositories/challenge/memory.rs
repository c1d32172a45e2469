//! In-memory OTP challenge store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::OtpChallenge;
use crate::errors::DomainError;

use super::trait_::OtpChallengeRepository;

/// Challenge store keyed by session id, for tests and single-process runs
#[derive(Clone, Default)]
pub struct InMemoryOtpChallengeRepository {
    challenges: Arc<RwLock<HashMap<String, OtpChallenge>>>,
}

impl InMemoryOtpChallengeRepository {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored challenges
    pub async fn len(&self) -> usize {
        self.challenges.read().await.len()
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.challenges.read().await.is_empty()
    }

    /// Snapshot of a stored challenge by session id
    pub async fn get(&self, session_id: &str) -> Option<OtpChallenge> {
        self.challenges.read().await.get(session_id).cloned()
    }
}

#[async_trait]
impl OtpChallengeRepository for InMemoryOtpChallengeRepository {
    async fn create(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError> {
        let mut challenges = self.challenges.write().await;

        if challenges.contains_key(&challenge.session_id) {
            return Err(DomainError::Conflict {
                message: "Session id already exists".to_string(),
            });
        }

        challenges.insert(challenge.session_id.clone(), challenge.clone());
        Ok(challenge)
    }

    async fn find_by_phone_and_session(
        &self,
        phone: &str,
        session_id: &str,
    ) -> Result<Option<OtpChallenge>, DomainError> {
        let challenges = self.challenges.read().await;
        Ok(challenges
            .get(session_id)
            .filter(|c| c.phone == phone)
            .cloned())
    }

    async fn invalidate_pending(&self, phone: &str) -> Result<u64, DomainError> {
        let mut challenges = self.challenges.write().await;
        let mut count = 0;
        for challenge in challenges.values_mut().filter(|c| c.phone == phone && !c.verified) {
            challenge.invalidate();
            count += 1;
        }
        Ok(count)
    }

    async fn update(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError> {
        let mut challenges = self.challenges.write().await;

        let stored = challenges
            .get_mut(&challenge.session_id)
            .ok_or_else(|| DomainError::NotFound {
                resource: "OtpChallenge".to_string(),
            })?;

        stored.verified |= challenge.verified;
        stored.attempts = stored.attempts.max(challenge.attempts);
        stored.verified_at = stored.verified_at.or(challenge.verified_at);
        Ok(stored.clone())
    }
}
