//! Parameter bag and typed extraction
//!
//! Inbound requests carry a multi-valued, string-keyed parameter bag. The
//! functions here pull typed values out of it under the required/optional
//! and shape rules the operation registry declares. Required-parameter
//! failures name both the operation and the parameter so the transport
//! layer can produce a precise bad-request message.

use crate::command::{OrgEntity, ParamValue};
use crate::errors::{GateError, Result};
use std::collections::{BTreeMap, HashMap};

/// Prefix that marks a request parameter as one entry of a value map
/// (`map_greeting=hi` becomes the map entry `greeting -> "hi"`)
pub const MAP_PARAM_PREFIX: &str = "map_";

/// Read-only multi-valued parameter map for a single request
///
/// The transport layer builds one of these from query/form parameters.
/// Repeated parameter names accumulate values in arrival order.
#[derive(Debug, Clone, Default)]
pub struct ParamBag {
    params: HashMap<String, Vec<String>>,
}

impl ParamBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from (name, value) pairs, accumulating repeats
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut bag = Self::new();
        for (name, value) in pairs {
            bag.push(name, value);
        }
        bag
    }

    /// Append one value under a parameter name
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.entry(name.into()).or_default().push(value.into());
    }

    /// First value for a name, if any
    pub fn first(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for a name (empty slice when absent)
    pub fn all(&self, name: &str) -> &[String] {
        self.params.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over (name, values) entries
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

/// Extract a required scalar string parameter
///
/// Where a scalar is declared but the caller supplied multiple values, the
/// first value wins and the extras are ignored.
///
/// # Errors
///
/// Returns `MissingParameter` when the parameter is absent or has no values.
pub fn required_string(bag: &ParamBag, operation: &str, name: &str) -> Result<String> {
    optional_string(bag, name).ok_or_else(|| GateError::MissingParameter {
        operation: operation.to_string(),
        param: name.to_string(),
    })
}

/// Extract an optional scalar string parameter; `None` means absent
pub fn optional_string(bag: &ParamBag, name: &str) -> Option<String> {
    bag.first(name).map(str::to_string)
}

/// Extract a required integer parameter
///
/// # Errors
///
/// Returns `MissingParameter` when absent, `InvalidParameter` when the
/// first value does not parse as an integer.
pub fn required_i64(bag: &ParamBag, operation: &str, name: &str) -> Result<i64> {
    optional_i64(bag, operation, name)?.ok_or_else(|| GateError::MissingParameter {
        operation: operation.to_string(),
        param: name.to_string(),
    })
}

/// Extract an optional integer parameter; `Ok(None)` means absent
///
/// # Errors
///
/// Returns `InvalidParameter` when a value is present but unparseable.
pub fn optional_i64(bag: &ParamBag, operation: &str, name: &str) -> Result<Option<i64>> {
    match bag.first(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| GateError::InvalidParameter {
                operation: operation.to_string(),
                param: name.to_string(),
                reason: format!("'{raw}' is not an integer"),
            }),
    }
}

/// Assemble a value map from `map_`-prefixed parameters
///
/// `map_greeting=hi` contributes `greeting -> Str("hi")`; values are decoded
/// via [`ParamValue::decode`]. Malformed entries (an empty key after the
/// prefix, or a name with no values) are skipped rather than failing the
/// request. That leniency is a wire-compatibility shim with existing
/// callers; each skip is logged at debug so it stays auditable.
pub fn data_map(bag: &ParamBag, operation: &str) -> BTreeMap<String, ParamValue> {
    let mut data = BTreeMap::new();
    for (name, values) in bag.entries() {
        let Some(key) = name.strip_prefix(MAP_PARAM_PREFIX) else {
            continue;
        };
        if key.is_empty() {
            tracing::debug!(operation, param = name, "skipping map parameter with empty key");
            continue;
        }
        let Some(raw) = values.first() else {
            tracing::debug!(operation, param = name, "skipping map parameter with no value");
            continue;
        };
        data.insert(key.to_string(), ParamValue::decode(raw));
    }
    data
}

/// Assemble an organizational-entity list from the multi-valued `user` and
/// `group` parameters
///
/// # Errors
///
/// When `required` is set and neither parameter carries a value, returns
/// `MissingParameter` naming `user|group`.
pub fn org_entity_list(bag: &ParamBag, operation: &str, required: bool) -> Result<Vec<OrgEntity>> {
    let mut entities: Vec<OrgEntity> = bag
        .all("user")
        .iter()
        .map(|id| OrgEntity::User(id.clone()))
        .collect();
    entities.extend(bag.all("group").iter().map(|id| OrgEntity::Group(id.clone())));

    if required && entities.is_empty() {
        return Err(GateError::MissingParameter {
            operation: operation.to_string(),
            param: "user|group".to_string(),
        });
    }
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_string_present() {
        let bag = ParamBag::from_pairs([("targetEntityId", "bob")]);
        let value = required_string(&bag, "delegate", "targetEntityId").unwrap();
        assert_eq!(value, "bob");
    }

    #[test]
    fn test_required_string_missing_names_param() {
        let bag = ParamBag::new();
        let result = required_string(&bag, "delegate", "targetEntityId");
        match result {
            Err(GateError::MissingParameter { operation, param }) => {
                assert_eq!(operation, "delegate");
                assert_eq!(param, "targetEntityId");
            }
            other => panic!("Expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_takes_first_of_multiple_values() {
        let mut bag = ParamBag::new();
        bag.push("targetEntityId", "bob");
        bag.push("targetEntityId", "carol");
        let value = required_string(&bag, "forward", "targetEntityId").unwrap();
        assert_eq!(value, "bob");
    }

    #[test]
    fn test_optional_string_absent_is_none() {
        let bag = ParamBag::new();
        assert_eq!(optional_string(&bag, "language"), None);
    }

    #[test]
    fn test_required_i64_parses() {
        let bag = ParamBag::from_pairs([("processInstanceId", "42")]);
        assert_eq!(required_i64(&bag, "claim", "processInstanceId").unwrap(), 42);
    }

    #[test]
    fn test_required_i64_rejects_garbage() {
        let bag = ParamBag::from_pairs([("processInstanceId", "forty-two")]);
        let result = required_i64(&bag, "claim", "processInstanceId");
        assert!(matches!(result, Err(GateError::InvalidParameter { .. })));
    }

    #[test]
    fn test_optional_i64_absent_is_ok_none() {
        let bag = ParamBag::new();
        assert_eq!(optional_i64(&bag, "claim", "processInstanceId").unwrap(), None);
    }

    #[test]
    fn test_data_map_decodes_typed_values() {
        let bag = ParamBag::from_pairs([
            ("map_greeting", "hi"),
            ("map_attempts", "3"),
            ("map_score", "0.75"),
            ("map_approved", "true"),
            ("unrelated", "ignored"),
        ]);
        let data = data_map(&bag, "complete");
        assert_eq!(data.len(), 4);
        assert_eq!(data["greeting"], ParamValue::Str("hi".to_string()));
        assert_eq!(data["attempts"], ParamValue::Int(3));
        assert_eq!(data["score"], ParamValue::Float(0.75));
        assert_eq!(data["approved"], ParamValue::Bool(true));
    }

    #[test]
    fn test_data_map_skips_malformed_entries() {
        // A bare "map_" has an empty key; it must be skipped, not fail
        let bag = ParamBag::from_pairs([("map_", "orphan"), ("map_ok", "1")]);
        let data = data_map(&bag, "fail");
        assert_eq!(data.len(), 1);
        assert_eq!(data["ok"], ParamValue::Int(1));
    }

    #[test]
    fn test_org_entity_list_collects_users_and_groups() {
        let mut bag = ParamBag::new();
        bag.push("user", "bob");
        bag.push("user", "carol");
        bag.push("group", "reviewers");
        let entities = org_entity_list(&bag, "nominate", true).unwrap();
        assert_eq!(
            entities,
            vec![
                OrgEntity::User("bob".to_string()),
                OrgEntity::User("carol".to_string()),
                OrgEntity::Group("reviewers".to_string()),
            ]
        );
    }

    #[test]
    fn test_org_entity_list_required_but_empty() {
        let bag = ParamBag::new();
        let result = org_entity_list(&bag, "nominate", true);
        match result {
            Err(GateError::MissingParameter { param, .. }) => assert_eq!(param, "user|group"),
            other => panic!("Expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_org_entity_list_optional_empty_is_ok() {
        let bag = ParamBag::new();
        assert!(org_entity_list(&bag, "nominate", false).unwrap().is_empty());
    }
}
