//! Parser for javalint.toml configuration files.
//!
//! javalint.toml is an optional overlay that disables rules and points to
//! the checkstyle.xml and suppression files. Example:
//!
//! ```toml
//! [rules]
//! LeftCurly = "check"
//! MethodParamPad = "disabled"
//!
//! [checkstyle]
//! config = "config/checkstyle/checkstyle.xml"
//! suppressions = "config/checkstyle/suppressions-xpath.xml"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JavalintConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Whether a rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleMode {
    /// Check and report violations (default).
    #[default]
    Check,
    /// Skip the rule entirely.
    Disabled,
}

impl<'de> Deserialize<'de> for RuleMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "check" => Ok(RuleMode::Check),
            "disabled" | "disable" | "off" => Ok(RuleMode::Disabled),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid rule mode: {}. Expected check or disabled",
                s
            ))),
        }
    }
}

/// Checkstyle-related configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CheckstyleReference {
    /// Path to checkstyle.xml config file.
    pub config: Option<String>,
    /// Path to an xpath suppressions file.
    pub suppressions: Option<String>,
}

/// Root javalint.toml configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JavalintConfig {
    /// Per-rule mode overrides.
    #[serde(default)]
    pub rules: HashMap<String, RuleMode>,

    /// References to checkstyle files.
    #[serde(default)]
    pub checkstyle: CheckstyleReference,
}

impl JavalintConfig {
    /// Parse a javalint.toml file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, JavalintConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse javalint.toml content.
    pub fn parse(content: &str) -> Result<Self, JavalintConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Get the mode for a specific rule.
    /// Returns the configured mode or the default (Check).
    pub fn rule_mode(&self, rule_name: &str) -> RuleMode {
        self.rules.get(rule_name).copied().unwrap_or(RuleMode::Check)
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rule_mode(rule_name) != RuleMode::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = JavalintConfig::parse("").unwrap();
        assert!(config.rules.is_empty());
        assert!(config.checkstyle.config.is_none());
        assert!(config.checkstyle.suppressions.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[rules]
LeftCurly = "check"
MethodParamPad = "disabled"

[checkstyle]
config = "config/checkstyle/checkstyle.xml"
suppressions = "config/checkstyle/suppressions-xpath.xml"
"#;

        let config = JavalintConfig::parse(toml).unwrap();

        assert_eq!(config.rule_mode("LeftCurly"), RuleMode::Check);
        assert_eq!(config.rule_mode("MethodParamPad"), RuleMode::Disabled);
        assert_eq!(config.rule_mode("UnknownRule"), RuleMode::Check); // Default

        assert!(config.is_rule_enabled("LeftCurly"));
        assert!(!config.is_rule_enabled("MethodParamPad"));

        assert_eq!(
            config.checkstyle.config,
            Some("config/checkstyle/checkstyle.xml".to_string())
        );
        assert_eq!(
            config.checkstyle.suppressions,
            Some("config/checkstyle/suppressions-xpath.xml".to_string())
        );
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
[checkstyle]
config = "checkstyle.xml"
"#;

        let config = JavalintConfig::parse(toml).unwrap();
        assert!(config.rules.is_empty());
        assert_eq!(config.checkstyle.config, Some("checkstyle.xml".to_string()));
        assert!(config.checkstyle.suppressions.is_none());
    }

    #[test]
    fn test_rule_mode_case_insensitive() {
        let toml = r#"
[rules]
Rule1 = "CHECK"
Rule2 = "DISABLED"
Rule3 = "off"
"#;

        let config = JavalintConfig::parse(toml).unwrap();
        assert_eq!(config.rule_mode("Rule1"), RuleMode::Check);
        assert_eq!(config.rule_mode("Rule2"), RuleMode::Disabled);
        assert_eq!(config.rule_mode("Rule3"), RuleMode::Disabled);
    }

    #[test]
    fn test_invalid_rule_mode() {
        let toml = r#"
[rules]
Rule1 = "maybe"
"#;
        assert!(JavalintConfig::parse(toml).is_err());
    }
}
