//! Capability, entity type and status definitions.
//!
//! These enumerations are the contract shared with the API's `features`
//! endpoint. With the `typescript` feature enabled, [`Capability`] and
//! [`EntityType`] are exported through ts-rs so the frontend uses the same
//! closed sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// A named capability that may be enabled or disabled per collective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Capability {
    // ========== Collective Page ==========
    /// About section
    About,
    /// Accept financial contributions
    ReceiveFinancialContributions,
    /// Accept recurring contributions
    RecurringContributions,
    /// Host events
    Events,
    /// Host projects
    Projects,
    /// Submit expenses to other collectives
    UseExpenses,
    /// Receive expenses from contributors
    ReceiveExpenses,
    /// Show collective goals
    CollectiveGoals,
    /// Show top financial contributors
    TopFinancialContributors,
    /// Conversations
    Conversations,
    /// Updates
    Updates,
    /// Team section
    Team,
    /// Admin panel
    AdminPanel,

    // ========== Payment Processors & Other ==========
    /// TransferWise payouts
    Transferwise,
    /// TransferWise one-time-token flow
    TransferwiseOtt,
    /// Transactions list
    Transactions,
    /// PayPal donations
    PaypalDonations,
    /// PayPal payouts
    PaypalPayouts,
    /// Privacy.com virtual credit cards
    PrivacyVcc,

    // ========== Not yet reported by the features endpoint ==========
    /// Submit an expense on behalf of someone else
    SubmitExpenseOnBehalf,
    /// Contact form
    ContactForm,
    /// Connected accounts
    ConnectedAccounts,
}

impl Capability {
    /// Wire name, as used in the `features` map.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::About => "ABOUT",
            Self::ReceiveFinancialContributions => "RECEIVE_FINANCIAL_CONTRIBUTIONS",
            Self::RecurringContributions => "RECURRING_CONTRIBUTIONS",
            Self::Events => "EVENTS",
            Self::Projects => "PROJECTS",
            Self::UseExpenses => "USE_EXPENSES",
            Self::ReceiveExpenses => "RECEIVE_EXPENSES",
            Self::CollectiveGoals => "COLLECTIVE_GOALS",
            Self::TopFinancialContributors => "TOP_FINANCIAL_CONTRIBUTORS",
            Self::Conversations => "CONVERSATIONS",
            Self::Updates => "UPDATES",
            Self::Team => "TEAM",
            Self::AdminPanel => "ADMIN_PANEL",
            Self::Transferwise => "TRANSFERWISE",
            Self::TransferwiseOtt => "TRANSFERWISE_OTT",
            Self::Transactions => "TRANSACTIONS",
            Self::PaypalDonations => "PAYPAL_DONATIONS",
            Self::PaypalPayouts => "PAYPAL_PAYOUTS",
            Self::PrivacyVcc => "PRIVACY_VCC",
            Self::SubmitExpenseOnBehalf => "SUBMIT_EXPENSE_ON_BEHALF",
            Self::ContactForm => "CONTACT_FORM",
            Self::ConnectedAccounts => "CONNECTED_ACCOUNTS",
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::About => "Show the about section on the collective page",
            Self::ReceiveFinancialContributions => "Accept one-time financial contributions",
            Self::RecurringContributions => "Accept monthly or yearly contributions",
            Self::Events => "Create and list events",
            Self::Projects => "Create and list projects",
            Self::UseExpenses => "Submit expenses to other collectives",
            Self::ReceiveExpenses => "Receive expenses from contributors",
            Self::CollectiveGoals => "Show fundraising goals",
            Self::TopFinancialContributors => "Show the top financial contributors",
            Self::Conversations => "Host public conversations",
            Self::Updates => "Publish updates",
            Self::Team => "Show the team section",
            Self::AdminPanel => "Use the new admin panel",
            Self::Transferwise => "Pay expenses through TransferWise",
            Self::TransferwiseOtt => "Use the TransferWise one-time-token flow",
            Self::Transactions => "Show the transactions list",
            Self::PaypalDonations => "Accept donations through PayPal",
            Self::PaypalPayouts => "Pay expenses through PayPal",
            Self::PrivacyVcc => "Issue Privacy.com virtual cards",
            Self::SubmitExpenseOnBehalf => "Submit an expense on behalf of another payee",
            Self::ContactForm => "Receive messages through the contact form",
            Self::ConnectedAccounts => "Manage connected accounts",
        }
    }

    /// All capabilities, in declaration order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::About,
            Self::ReceiveFinancialContributions,
            Self::RecurringContributions,
            Self::Events,
            Self::Projects,
            Self::UseExpenses,
            Self::ReceiveExpenses,
            Self::CollectiveGoals,
            Self::TopFinancialContributors,
            Self::Conversations,
            Self::Updates,
            Self::Team,
            Self::AdminPanel,
            Self::Transferwise,
            Self::TransferwiseOtt,
            Self::Transactions,
            Self::PaypalDonations,
            Self::PaypalPayouts,
            Self::PrivacyVcc,
            Self::SubmitExpenseOnBehalf,
            Self::ContactForm,
            Self::ConnectedAccounts,
        ]
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown capability: {0}")]
pub struct ParseCapabilityError(pub String);

impl FromStr for Capability {
    type Err = ParseCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCapabilityError(s.to_string()))
    }
}

/// Collective category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    User,
    Organization,
    Collective,
    Event,
    Fund,
    Project,
    Vendor,
}

impl EntityType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Organization => "ORGANIZATION",
            Self::Collective => "COLLECTIVE",
            Self::Event => "EVENT",
            Self::Fund => "FUND",
            Self::Project => "PROJECT",
            Self::Vendor => "VENDOR",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::User,
            Self::Organization,
            Self::Collective,
            Self::Event,
            Self::Fund,
            Self::Project,
            Self::Vendor,
        ]
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known entity type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entity type: {0}")]
pub struct ParseEntityTypeError(pub String);

impl FromStr for EntityType {
    type Err = ParseEntityTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEntityTypeError(s.to_string()))
    }
}

/// Status of a capability as reported by the `features` endpoint.
///
/// Strings outside the known set are kept verbatim in `Unrecognized` so they
/// can be logged; they carry no verdict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CapabilityStatus {
    Active,
    Available,
    Disabled,
    Unsupported,
    Unrecognized(String),
}

impl CapabilityStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Available => "AVAILABLE",
            Self::Disabled => "DISABLED",
            Self::Unsupported => "UNSUPPORTED",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// `Some(true)` for ACTIVE/AVAILABLE, `Some(false)` for
    /// DISABLED/UNSUPPORTED, `None` otherwise.
    pub fn verdict(&self) -> Option<bool> {
        match self {
            Self::Active | Self::Available => Some(true),
            Self::Disabled | Self::Unsupported => Some(false),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<String> for CapabilityStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ACTIVE" => Self::Active,
            "AVAILABLE" => Self::Available,
            "DISABLED" => Self::Disabled,
            "UNSUPPORTED" => Self::Unsupported,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for CapabilityStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<CapabilityStatus> for String {
    fn from(status: CapabilityStatus) -> Self {
        match status {
            CapabilityStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_serialization() {
        let cap = Capability::ReceiveFinancialContributions;
        let json = serde_json::to_string(&cap).unwrap();
        assert_eq!(json, "\"RECEIVE_FINANCIAL_CONTRIBUTIONS\"");

        let parsed: Capability = serde_json::from_str("\"TRANSFERWISE_OTT\"").unwrap();
        assert_eq!(parsed, Capability::TransferwiseOtt);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for cap in Capability::all() {
            let json = serde_json::to_string(&cap).unwrap();
            assert_eq!(json, format!("\"{}\"", cap.as_str()));
            assert_eq!(cap.as_str().parse::<Capability>().unwrap(), cap);
        }
        for entity_type in EntityType::all() {
            let json = serde_json::to_string(&entity_type).unwrap();
            assert_eq!(json, format!("\"{}\"", entity_type.as_str()));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "NOT_A_FEATURE".parse::<Capability>(),
            Err(ParseCapabilityError("NOT_A_FEATURE".to_string()))
        );
        assert!("HOST".parse::<EntityType>().is_err());
        assert_eq!("EVENT".parse::<EntityType>(), Ok(EntityType::Event));
    }

    #[test]
    fn test_status_parsing() {
        let status: CapabilityStatus = serde_json::from_str("\"AVAILABLE\"").unwrap();
        assert_eq!(status, CapabilityStatus::Available);
        assert_eq!(status.verdict(), Some(true));

        let status: CapabilityStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(status, CapabilityStatus::Unrecognized("PENDING".to_string()));
        assert_eq!(status.verdict(), None);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"PENDING\"");

        assert_eq!(CapabilityStatus::from("UNSUPPORTED").verdict(), Some(false));
        assert_eq!(CapabilityStatus::from("DISABLED").verdict(), Some(false));
        assert_eq!(CapabilityStatus::from("ACTIVE").verdict(), Some(true));
    }
}
