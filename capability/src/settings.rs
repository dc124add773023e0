//! Safe navigation into an entity's legacy settings tree.

use serde_json::Value;

use crate::entity::Entity;

/// Root segment every flag path must start with.
pub const SETTINGS_ROOT: &str = "settings";

/// Resolve a dotted path such as `settings.features.paypalPayouts` against
/// an entity.
///
/// Returns `None` when the path is not rooted at `settings`, when the entity
/// has no settings, or when any intermediate key is missing.
pub fn lookup<'a>(entity: &'a Entity, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    if segments.next() != Some(SETTINGS_ROOT) {
        return None;
    }

    let mut current = entity.settings.as_ref()?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Truthiness as the settings were written by the web client: `null`,
/// `false`, zero and the empty string are false, everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `true` iff the value at `path` exists and is truthy.
pub fn flag_enabled(entity: &Entity, path: &str) -> bool {
    lookup(entity, path).map(is_truthy).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityType;
    use serde_json::json;

    fn entity_with(settings: Value) -> Entity {
        Entity::new(EntityType::Collective).with_settings(settings)
    }

    #[test]
    fn test_lookup_nested() {
        let entity = entity_with(json!({
            "collectivePage": { "showGoals": true },
            "transferwise": { "ott": "yes" },
            "tiers": [{ "name": "backer" }]
        }));

        assert_eq!(
            lookup(&entity, "settings.collectivePage.showGoals"),
            Some(&json!(true))
        );
        assert_eq!(lookup(&entity, "settings.transferwise.ott"), Some(&json!("yes")));
        assert_eq!(lookup(&entity, "settings.tiers.0.name"), Some(&json!("backer")));
        assert_eq!(lookup(&entity, "settings"), entity.settings.as_ref());
    }

    #[test]
    fn test_lookup_missing() {
        let entity = entity_with(json!({ "features": { "paypalPayouts": true } }));

        assert!(lookup(&entity, "settings.collectivePage.showGoals").is_none());
        assert!(lookup(&entity, "settings.features.paypalPayouts.deeper").is_none());
        assert!(lookup(&entity, "features.paypalPayouts").is_none());
        assert!(lookup(&Entity::new(EntityType::Fund), "settings.features.paypalPayouts").is_none());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(-2.5)));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_flag_enabled() {
        let entity = entity_with(json!({ "features": { "adminPanel": 1, "privacyVcc": 0 } }));
        assert!(flag_enabled(&entity, "settings.features.adminPanel"));
        assert!(!flag_enabled(&entity, "settings.features.privacyVcc"));
        assert!(!flag_enabled(&entity, "settings.features.missing"));
    }
}
