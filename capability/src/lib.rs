//! Capability Resolution for Collectives
//!
//! Answers whether a named capability (events, expenses, PayPal payouts,
//! admin panel, ...) is enabled for a collective. View code calls into this
//! crate to decide whether to render an affordance.
//!
//! # Resolution order
//!
//! ```text
//!   entity?  ──no──▶ disabled
//!     │
//!   legacy settings flag? ──yes──▶ truthiness of settings value
//!     │
//!   RECEIVE_EXPENSES? ──yes──▶ entity type allow-list
//!     │
//!   features[capability] ──ACTIVE/AVAILABLE──▶ enabled
//!     │                  ──DISABLED/UNSUPPORTED──▶ disabled
//!     ▼
//!   enabled
//! ```
//!
//! # Key Components
//!
//! - [`CapabilityResolver`]: the resolver over immutable lookup tables
//! - [`ResolverConfig`]: the tables, loadable from YAML
//! - [`Entity`]: the collective payload as delivered by the API
//!
//! # Example
//!
//! ```
//! use capability::{has_capability, Capability, Entity, EntityType};
//!
//! let event = Entity::new(EntityType::Event);
//! assert!(has_capability(Some(&event), Capability::ReceiveExpenses));
//! assert!(!has_capability(None, Capability::About));
//! ```

pub mod config;
pub mod entity;
pub mod flags;
pub mod resolver;
pub mod settings;
pub mod types;

use std::sync::LazyLock;

// Re-export main types
pub use config::{ConfigError, ResolverConfig};
pub use entity::{Entity, EntityError, FeatureMap};
pub use flags::FlagTable;
pub use resolver::{CapabilityResolver, DecisionSource, Resolution};
pub use types::*;

static DEFAULT_RESOLVER: LazyLock<CapabilityResolver> = LazyLock::new(CapabilityResolver::builtin);

/// Resolver over the built-in tables, shared process-wide.
pub fn default_resolver() -> &'static CapabilityResolver {
    &DEFAULT_RESOLVER
}

/// [`CapabilityResolver::has_capability`] with the built-in tables.
pub fn has_capability(entity: Option<&Entity>, capability: Capability) -> bool {
    DEFAULT_RESOLVER.has_capability(entity, capability)
}

/// [`CapabilityResolver::is_capability_allowed_for_type`] with the built-in tables.
pub fn is_capability_allowed_for_type(entity_type: EntityType, capability: Capability) -> bool {
    DEFAULT_RESOLVER.is_capability_allowed_for_type(entity_type, capability)
}

/// [`CapabilityResolver::is_capability_allowed_for_entity`] with the built-in tables.
pub fn is_capability_allowed_for_entity(entity: &Entity, capability: Capability) -> bool {
    DEFAULT_RESOLVER.is_capability_allowed_for_entity(entity, capability)
}
