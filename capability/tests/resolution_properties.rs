//! Resolution properties across the public API.

use capability::{
    default_resolver, has_capability, is_capability_allowed_for_entity,
    is_capability_allowed_for_type, Capability, CapabilityStatus, Entity, EntityType, FeatureMap,
};
use serde_json::json;

/// Capabilities decided by the `features` map alone.
fn structured_capabilities() -> Vec<Capability> {
    let flags = default_resolver().flags();
    Capability::all()
        .into_iter()
        .filter(|c| !flags.contains(*c) && *c != Capability::ReceiveExpenses)
        .collect()
}

fn with_status(capability: Capability, status: CapabilityStatus) -> Entity {
    Entity::new(EntityType::Collective)
        .with_features(FeatureMap::new().with(capability, status))
}

#[test]
fn test_active_and_available_enable() {
    for capability in structured_capabilities() {
        for status in [CapabilityStatus::Active, CapabilityStatus::Available] {
            let entity = with_status(capability, status.clone());
            assert!(has_capability(Some(&entity), capability), "{capability} {status}");
        }
    }
}

#[test]
fn test_disabled_and_unsupported_disable() {
    for capability in structured_capabilities() {
        for status in [CapabilityStatus::Disabled, CapabilityStatus::Unsupported] {
            let entity = with_status(capability, status.clone());
            assert!(!has_capability(Some(&entity), capability), "{capability} {status}");
        }
    }
}

#[test]
fn test_no_entity_never_has_capability() {
    for capability in Capability::all() {
        assert!(!has_capability(None, capability));
    }
    assert!(default_resolver().enabled_capabilities(None).is_empty());
}

#[test]
fn test_legacy_flag_takes_precedence() {
    let enabled = Entity::new(EntityType::Collective)
        .with_settings(json!({ "features": { "paypalPayouts": true } }))
        .with_features(
            FeatureMap::new().with(Capability::PaypalPayouts, CapabilityStatus::Disabled),
        );
    assert!(has_capability(Some(&enabled), Capability::PaypalPayouts));

    for status in [
        CapabilityStatus::Active,
        CapabilityStatus::Available,
        CapabilityStatus::Disabled,
        CapabilityStatus::Unsupported,
    ] {
        let entity = with_status(Capability::PaypalPayouts, status)
            .with_settings(json!({ "features": {} }));
        assert!(!has_capability(Some(&entity), Capability::PaypalPayouts));
    }
}

#[test]
fn test_receive_expenses_allow_list() {
    assert!(is_capability_allowed_for_type(EntityType::Event, Capability::ReceiveExpenses));
    assert!(!is_capability_allowed_for_type(
        EntityType::Organization,
        Capability::ReceiveExpenses
    ));

    for entity_type in EntityType::all() {
        let expected = is_capability_allowed_for_type(entity_type, Capability::ReceiveExpenses);
        for status in [CapabilityStatus::Active, CapabilityStatus::Unsupported] {
            let entity = Entity::new(entity_type).with_features(
                FeatureMap::new().with(Capability::ReceiveExpenses, status),
            );
            assert_eq!(
                is_capability_allowed_for_entity(&entity, Capability::ReceiveExpenses),
                expected
            );
            assert_eq!(has_capability(Some(&entity), Capability::ReceiveExpenses), expected);
        }
    }
}

#[test]
fn test_empty_features_fail_open() {
    let entity = Entity::new(EntityType::Project).with_features(FeatureMap::new());
    for capability in structured_capabilities() {
        assert!(has_capability(Some(&entity), capability));
    }
}

#[test]
fn test_resolution_is_repeatable() {
    let entity = Entity::from_json(
        r#"{
            "type": "FUND",
            "settings": { "collectivePage": { "showGoals": 1 } },
            "features": { "EVENTS": "DISABLED", "TEAM": "SOMETHING_ELSE" }
        }"#,
    )
    .unwrap();

    let resolver = default_resolver();
    for capability in Capability::all() {
        let first = resolver.resolve(Some(&entity), capability);
        let second = resolver.resolve(Some(&entity), capability);
        assert_eq!(first, second);
        assert_eq!(first.allowed, has_capability(Some(&entity), capability));
    }

    let enabled = resolver.enabled_capabilities(Some(&entity));
    assert!(enabled.contains(&Capability::CollectiveGoals));
    assert!(enabled.contains(&Capability::Team));
    assert!(enabled.contains(&Capability::ReceiveExpenses));
    assert!(!enabled.contains(&Capability::Events));
    assert!(!enabled.contains(&Capability::AdminPanel));
}
