//! Persistent configuration store contract.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::error::Result;

// ============================================================================
// SettingsStore
// ============================================================================

/// Asynchronous key-value store holding user settings.
///
/// The engine only ever reads from the store; mutation happens through the
/// host's own settings surface. Values are untyped JSON — the config
/// resolver coerces them and substitutes built-in defaults for anything
/// missing, mistyped, or failed.
///
/// Implementations should return the subset of `keys` they actually have;
/// absent keys are simply left out of the returned map. A store-level
/// failure may be reported as `Err`, but the resolver swallows it — no
/// store problem ever reaches the user.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Reads the requested keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unavailable. Callers
    /// inside this crate treat that as "all keys absent".
    async fn get(&self, keys: &[&str]) -> Result<FxHashMap<String, Value>>;
}
