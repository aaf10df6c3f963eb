//! Entity manager configuration.

use crate::error::{EntityError, EntityResult};

/// Default pre-allocation size for entity collections and component stores.
pub const DEFAULT_SIZE_HINT: usize = 1024;

/// The environment variable used to override [`ManagerConfig::size_hint`].
pub const SIZE_HINT_ENV: &str = "LIFY_SIZE_HINT";

/// The environment variable used to override
/// [`ManagerConfig::strict_capabilities`].
pub const STRICT_CAPABILITIES_ENV: &str = "LIFY_STRICT_CAPABILITIES";

/// Configuration for an [`EntityManager`](crate::EntityManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Expected entity count. Collections and stores are pre-sized to this,
    /// and grow past it freely.
    pub size_hint: usize,
    /// Reject creation masks with bits outside
    /// [`Capability::DEFINED`](crate::Capability::DEFINED).
    pub strict_capabilities: bool,
}

impl ManagerConfig {
    /// Create a strict config with the given size hint.
    #[must_use]
    pub fn new(size_hint: usize) -> Self {
        Self {
            size_hint,
            strict_capabilities: true,
        }
    }

    /// Toggle capability validation.
    #[must_use]
    pub fn with_strict_capabilities(mut self, strict: bool) -> Self {
        self.strict_capabilities = strict;
        self
    }

    /// Build a config from `LIFY_SIZE_HINT` and `LIFY_STRICT_CAPABILITIES`,
    /// falling back to the defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidConfig`] if a variable is set but cannot
    /// be parsed.
    pub fn from_env() -> EntityResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> EntityResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(SIZE_HINT_ENV) {
            config.size_hint = raw.trim().parse().map_err(|_| EntityError::InvalidConfig {
                key: SIZE_HINT_ENV,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(STRICT_CAPABILITIES_ENV) {
            config.strict_capabilities = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(EntityError::InvalidConfig {
                        key: STRICT_CAPABILITIES_ENV,
                        value: raw,
                    });
                }
            };
        }

        Ok(config)
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE_HINT)
    }
}
