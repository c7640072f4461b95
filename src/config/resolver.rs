//! Store-backed configuration resolution.
//!
//! [`ConfigResolver::resolve`] reads the requested keys from the settings
//! store and merges them over the built-in defaults. Every failure mode —
//! store unavailable, key absent, value mistyped — resolves to the default
//! for that key. Nothing propagates; a `warn` log is the only trace.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::host::SettingsStore;

use super::{Config, ConfigKey, ConflictAction};

// ============================================================================
// ConfigResolver
// ============================================================================

/// Merges externally persisted settings with built-in defaults.
///
/// Read-only: the resolver never writes to the store.
#[derive(Clone)]
pub struct ConfigResolver {
    /// The external settings store.
    store: Arc<dyn SettingsStore>,
}

impl ConfigResolver {
    /// Creates a resolver over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Resolves the requested keys; everything else keeps its default.
    ///
    /// Never fails: store errors and unusable values fall back to defaults.
    pub async fn resolve(&self, keys: &[ConfigKey]) -> Config {
        let names: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();

        let values = match self.store.get(&names).await {
            Ok(values) => values,
            Err(e) => {
                warn!(error = %e, "Settings store unavailable, using defaults");
                FxHashMap::default()
            }
        };

        let mut config = Config::default();
        for key in keys {
            Self::apply(&mut config, *key, values.get(key.as_str()));
        }

        debug!(keys = keys.len(), "Configuration resolved");
        config
    }

    /// Resolves all keys.
    pub async fn resolve_all(&self) -> Config {
        self.resolve(&ConfigKey::ALL).await
    }
}

// ============================================================================
// Value Coercion
// ============================================================================

impl ConfigResolver {
    /// Applies a stored value to one config field, keeping the default when
    /// the value is absent or unusable.
    fn apply(config: &mut Config, key: ConfigKey, value: Option<&Value>) {
        let Some(value) = value else {
            return;
        };

        match key {
            ConfigKey::CloseAfterSave => match coerce_bool(value) {
                Some(b) => config.close_after_save = b,
                None => warn!(%key, %value, "Unusable stored value, keeping default"),
            },
            ConfigKey::SaveAs => match coerce_bool(value) {
                Some(b) => config.save_as = b,
                None => warn!(%key, %value, "Unusable stored value, keeping default"),
            },
            ConfigKey::ConflictAction => {
                match serde_json::from_value::<ConflictAction>(value.clone()) {
                    Ok(action) => config.conflict_action = action,
                    Err(e) => {
                        warn!(%key, %value, error = %e, "Unusable stored value, keeping default");
                    }
                }
            }
            ConfigKey::FileTypes => match serde_json::from_value::<Vec<String>>(value.clone()) {
                Ok(types) => config.file_types = types,
                Err(e) => {
                    warn!(%key, error = %e, "Unusable stored value, keeping default");
                }
            },
        }
    }
}

/// Coerces a stored flag to a bool.
///
/// Older settings surfaces persisted flags as the strings `"true"` and
/// `"false"`, so both representations are accepted.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::error::{Error, Result};

    /// Store fake returning a fixed value map, or failing outright.
    struct FixedStore {
        values: FxHashMap<String, Value>,
        fail: bool,
    }

    impl FixedStore {
        fn with(pairs: &[(&str, Value)]) -> Arc<Self> {
            let mut values = FxHashMap::default();
            for (k, v) in pairs {
                values.insert((*k).to_string(), v.clone());
            }
            Arc::new(Self {
                values,
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                values: FxHashMap::default(),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl SettingsStore for FixedStore {
        async fn get(&self, keys: &[&str]) -> Result<FxHashMap<String, Value>> {
            if self.fail {
                return Err(Error::store("store offline"));
            }
            Ok(keys
                .iter()
                .filter_map(|k| self.values.get(*k).map(|v| ((*k).to_string(), v.clone())))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_store_values_override_defaults() {
        let store = FixedStore::with(&[
            ("closeAfterSave", json!(false)),
            ("conflictAction", json!("overwrite")),
            ("fileTypes", json!(["png"])),
            ("saveAs", json!(true)),
        ]);
        let config = ConfigResolver::new(store).resolve_all().await;

        assert!(!config.close_after_save);
        assert_eq!(config.conflict_action, ConflictAction::Overwrite);
        assert_eq!(config.file_types, vec!["png".to_string()]);
        assert!(config.save_as);
    }

    #[tokio::test]
    async fn test_store_failure_yields_defaults() {
        let config = ConfigResolver::new(FixedStore::failing()).resolve_all().await;
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_missing_keys_yield_defaults() {
        let store = FixedStore::with(&[("saveAs", json!(true))]);
        let config = ConfigResolver::new(store).resolve_all().await;

        assert!(config.save_as);
        assert!(config.close_after_save);
        assert_eq!(config.conflict_action, ConflictAction::Uniquify);
    }

    #[tokio::test]
    async fn test_mistyped_values_yield_defaults() {
        let store = FixedStore::with(&[
            ("closeAfterSave", json!(42)),
            ("conflictAction", json!("rename")),
            ("fileTypes", json!("png")),
        ]);
        let config = ConfigResolver::new(store).resolve_all().await;
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_string_typed_flags_are_coerced() {
        let store = FixedStore::with(&[
            ("closeAfterSave", json!("false")),
            ("saveAs", json!("true")),
        ]);
        let config = ConfigResolver::new(store).resolve_all().await;
        assert!(!config.close_after_save);
        assert!(config.save_as);
    }

    #[tokio::test]
    async fn test_legacy_uniq_is_normalized() {
        let store = FixedStore::with(&[("conflictAction", json!("uniq"))]);
        let config = ConfigResolver::new(store)
            .resolve(&[ConfigKey::ConflictAction])
            .await;
        assert_eq!(config.conflict_action, ConflictAction::Uniquify);
    }

    #[tokio::test]
    async fn test_unrequested_keys_keep_defaults() {
        let store = FixedStore::with(&[("saveAs", json!(true))]);
        let config = ConfigResolver::new(store)
            .resolve(&[ConfigKey::CloseAfterSave])
            .await;
        // saveAs was in the store but not requested.
        assert!(!config.save_as);
    }
}
