//! Entity-layer error types.

/// Errors raised by the entity manager.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// A creation mask carried bits with no backing component store.
    #[error("invalid capability bits {bits:#06x}")]
    InvalidCapability {
        /// The offending bits, with defined bits masked out.
        bits: u16,
    },

    /// An entity's mask claims a component the store does not hold.
    ///
    /// The manager initialises every claimed store at creation, so this
    /// indicates a broken invariant rather than a recoverable condition.
    #[error("entity {entity} is missing its {component} component")]
    MissingComponent {
        /// The entity identity.
        entity: u64,
        /// The component name.
        component: &'static str,
    },

    /// A configuration value could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig {
        /// The configuration key (environment variable name).
        key: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

/// Result alias for entity-layer operations.
pub type EntityResult<T> = Result<T, EntityError>;
