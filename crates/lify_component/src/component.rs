//! Core [`Component`] trait.
//!
//! Every piece of data kept in a [`ComponentStore`](crate::ComponentStore)
//! must implement [`Component`]. The trait requires `Send + Sync + 'static`
//! so stores can be shared between game systems running on different
//! threads, and `Default` so a slot can be initialised the moment an entity
//! is created, before the caller writes real data into it.

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use lify_component::Component;
///
/// #[derive(Debug, Default)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Default + Send + Sync + 'static {
    /// A human-readable name for this component type.
    ///
    /// Used in log fields and error messages.
    fn type_name() -> &'static str;
}
