//! Durable key-value store abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// A durable string-to-string slot store that survives restarts.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`. `Ok(None)` means never written.
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
