//! Tests for the customer identity store

#[cfg(test)]
mod memory_tests;
