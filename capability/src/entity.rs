//! The collective record capabilities are resolved against.
//!
//! Entities arrive already materialized from the data layer. Only the fields
//! that matter for resolution are modelled; anything else in the payload is
//! ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::types::{Capability, CapabilityStatus, EntityType};

/// Errors raised while ingesting an entity payload.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// Payload is not a valid entity document
    #[error("Invalid entity payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// A collective (organization, project, event, fund, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Collective category
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Slug, only used for log context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Legacy settings tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    /// Structured per-capability status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureMap>,
}

impl Entity {
    /// Create an entity with no settings and no features.
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            slug: None,
            settings: None,
            features: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_features(mut self, features: FeatureMap) -> Self {
        self.features = Some(features);
        self
    }

    /// Parse an entity from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, EntityError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, EntityError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Status reported for `capability`, if any.
    pub fn feature_status(&self, capability: Capability) -> Option<&CapabilityStatus> {
        self.features.as_ref().and_then(|f| f.get(capability))
    }
}

/// Capability name to status, keyed by raw wire name.
///
/// Keys this build does not know about are kept; `null` and non-string
/// values are dropped on ingest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureMap(BTreeMap<String, CapabilityStatus>);

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, capability: Capability) -> Option<&CapabilityStatus> {
        self.0.get(capability.as_str())
    }

    pub fn insert(&mut self, capability: Capability, status: CapabilityStatus) {
        self.0.insert(capability.as_str().to_string(), status);
    }

    /// Builder-style insert.
    pub fn with(mut self, capability: Capability, status: CapabilityStatus) -> Self {
        self.insert(capability, status);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Capability, CapabilityStatus)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (Capability, CapabilityStatus)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (capability, status) in iter {
            map.insert(capability, status);
        }
        map
    }
}

impl<'de> Deserialize<'de> for FeatureMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let statuses = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, CapabilityStatus::from(s))),
                _ => None,
            })
            .collect();
        Ok(Self(statuses))
    }
}
