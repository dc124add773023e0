//! Capability resolution.
//!
//! Decides whether a capability is enabled for a collective by consulting,
//! in order:
//!
//! 1. the legacy settings flag, when the capability has one
//! 2. the entity type, for RECEIVE_EXPENSES only
//! 3. the structured `features` status
//! 4. a default of enabled
//!
//! The first step with a verdict wins. Resolution never fails.

use serde::Serialize;
use std::fmt;
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, ResolverConfig};
use crate::entity::Entity;
use crate::flags::{FlagTable, BUILTIN_RECEIVE_EXPENSES_TYPES};
use crate::settings;
use crate::types::{Capability, CapabilityStatus, EntityType};

/// The rule that produced a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DecisionSource {
    /// No entity was given
    MissingEntity,
    /// Legacy flag in settings
    SettingsFlag { path: String },
    /// Entity type allow-list (RECEIVE_EXPENSES)
    EntityTypeRule { entity_type: EntityType },
    /// Status from the `features` map
    FeatureStatus { status: CapabilityStatus },
    /// Nothing decisive was found
    Default,
}

impl fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEntity => write!(f, "no entity"),
            Self::SettingsFlag { path } => write!(f, "settings flag {}", path),
            Self::EntityTypeRule { entity_type } => write!(f, "entity type {}", entity_type),
            Self::FeatureStatus { status } => write!(f, "feature status {}", status),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A verdict and the rule behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub capability: Capability,
    pub allowed: bool,
    pub source: DecisionSource,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.capability,
            if self.allowed { "enabled" } else { "disabled" },
            self.source
        )
    }
}

/// Resolves capabilities against immutable lookup tables.
#[derive(Debug, Clone)]
pub struct CapabilityResolver {
    flags: FlagTable,
    receive_expenses_types: Vec<EntityType>,
}

impl CapabilityResolver {
    /// Resolver over the built-in tables.
    pub fn builtin() -> Self {
        Self {
            flags: FlagTable::builtin(),
            receive_expenses_types: BUILTIN_RECEIVE_EXPENSES_TYPES.to_vec(),
        }
    }

    /// Resolver over a validated config.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            flags = config.flag_paths.len(),
            receive_expenses_types = ?config.receive_expenses_types,
            "Built capability resolver"
        );
        Ok(Self {
            flags: config.flag_table(),
            receive_expenses_types: config.receive_expenses_types.clone(),
        })
    }

    pub fn flags(&self) -> &FlagTable {
        &self.flags
    }

    /// Whether `entity_type` may use `capability` on type alone.
    ///
    /// Only RECEIVE_EXPENSES has a type rule: the upstream `features` data
    /// does not include it, so it is decided here from an allow-list. Every
    /// other capability has no type restriction.
    pub fn is_capability_allowed_for_type(
        &self,
        entity_type: EntityType,
        capability: Capability,
    ) -> bool {
        match capability {
            Capability::ReceiveExpenses => self.receive_expenses_types.contains(&entity_type),
            _ => true,
        }
    }

    /// Whether `capability` is enabled for `entity`.
    ///
    /// An absent entity has no capabilities. Unknown or unset statuses are
    /// treated as enabled.
    pub fn has_capability(&self, entity: Option<&Entity>, capability: Capability) -> bool {
        self.resolve(entity, capability).allowed
    }

    /// Like [`has_capability`](Self::has_capability), also reporting which
    /// rule decided.
    pub fn resolve(&self, entity: Option<&Entity>, capability: Capability) -> Resolution {
        let (allowed, source) = match entity {
            None => (false, DecisionSource::MissingEntity),
            Some(entity) => self.resolve_for(entity, capability),
        };

        trace!(
            capability = %capability,
            slug = ?entity.and_then(|e| e.slug.as_deref()),
            allowed,
            source = %source,
            "Resolved capability"
        );

        Resolution {
            capability,
            allowed,
            source,
        }
    }

    fn resolve_for(&self, entity: &Entity, capability: Capability) -> (bool, DecisionSource) {
        if let Some(path) = self.flags.path(capability) {
            return (
                settings::flag_enabled(entity, path),
                DecisionSource::SettingsFlag {
                    path: path.to_string(),
                },
            );
        }

        if capability == Capability::ReceiveExpenses {
            return (
                self.is_capability_allowed_for_type(entity.entity_type, capability),
                DecisionSource::EntityTypeRule {
                    entity_type: entity.entity_type,
                },
            );
        }

        if let Some(status) = entity.feature_status(capability) {
            match status.verdict() {
                Some(allowed) => {
                    return (
                        allowed,
                        DecisionSource::FeatureStatus {
                            status: status.clone(),
                        },
                    )
                }
                None => warn!(
                    capability = %capability,
                    slug = ?entity.slug,
                    status = %status,
                    "Unrecognized capability status, falling back to default"
                ),
            }
        }

        (true, DecisionSource::Default)
    }

    /// Whether `capability` is allowed for `entity` according to its
    /// `features` map.
    ///
    /// Unlike [`has_capability`](Self::has_capability), only UNSUPPORTED
    /// denies; any other status, or no status at all, allows. Legacy
    /// settings flags are not consulted.
    pub fn is_capability_allowed_for_entity(&self, entity: &Entity, capability: Capability) -> bool {
        if capability == Capability::ReceiveExpenses {
            return self.is_capability_allowed_for_type(entity.entity_type, capability);
        }

        entity.feature_status(capability) != Some(&CapabilityStatus::Unsupported)
    }

    /// Every capability enabled for `entity`, in declaration order.
    pub fn enabled_capabilities(&self, entity: Option<&Entity>) -> Vec<Capability> {
        Capability::all()
            .into_iter()
            .filter(|c| self.has_capability(entity, *c))
            .collect()
    }

    /// One-line explanation of a resolution, for audit output.
    pub fn explain(&self, entity: Option<&Entity>, capability: Capability) -> String {
        self.resolve(entity, capability).to_string()
    }
}

impl Default for CapabilityResolver {
    fn default() -> Self {
        Self::builtin()
    }
}
