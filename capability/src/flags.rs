//! Legacy opt-in flags stored in collective settings.
//!
//! These capabilities were switched on through `settings` before the
//! structured `features` map existed. While a capability is listed here its
//! settings flag wins over whatever `features` says.

use std::collections::BTreeMap;

use crate::types::{Capability, EntityType};

/// Built-in capability to settings path mapping.
pub const BUILTIN_FLAGS: &[(Capability, &str)] = &[
    (Capability::PaypalPayouts, "settings.features.paypalPayouts"),
    (Capability::PaypalDonations, "settings.features.paypalDonations"),
    (Capability::CollectiveGoals, "settings.collectivePage.showGoals"),
    (Capability::SubmitExpenseOnBehalf, "settings.features.submitExpenseOnBehalf"),
    (Capability::PrivacyVcc, "settings.features.privacyVcc"),
    (Capability::TransferwiseOtt, "settings.transferwise.ott"),
    (Capability::AdminPanel, "settings.features.adminPanel"),
];

/// Entity types allowed to receive expenses.
///
/// The `features` data computed upstream omits RECEIVE_EXPENSES, so the
/// answer comes from the entity type until that is fixed.
pub const BUILTIN_RECEIVE_EXPENSES_TYPES: &[EntityType] = &[
    EntityType::Collective,
    EntityType::Event,
    EntityType::Fund,
    EntityType::Project,
];

/// Read-only mapping from capability to its legacy settings path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagTable {
    paths: BTreeMap<Capability, String>,
}

impl FlagTable {
    pub fn new(paths: BTreeMap<Capability, String>) -> Self {
        Self { paths }
    }

    /// The table shipped with this build.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_FLAGS
                .iter()
                .map(|(capability, path)| (*capability, path.to_string()))
                .collect(),
        )
    }

    /// Settings path gating `capability`, if it is a legacy flag.
    pub fn path(&self, capability: Capability) -> Option<&str> {
        self.paths.get(&capability).map(String::as_str)
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.paths.contains_key(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Capability, &str)> {
        self.paths.iter().map(|(c, p)| (*c, p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for FlagTable {
    fn default() -> Self {
        Self::builtin()
    }
}
