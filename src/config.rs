//! Process-level knobs for the validation layer.
use serde::Deserialize;

/// Behavior switches shared by every check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Lets a boolean satisfy an integer type check and count as 0/1 in
    /// numeric checks. Off by default: `num_classes=True` is rejected.
    pub bool_as_integer: bool,
}

impl GuardConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        assert_eq!(GuardConfig::from_json("{}").unwrap(), GuardConfig::default());
        let cfg = GuardConfig::from_json(r#"{"bool_as_integer": true}"#).unwrap();
        assert!(cfg.bool_as_integer);
        assert!(GuardConfig::from_json(r#"{"bool_as_int": true}"#).is_err());
    }
}
