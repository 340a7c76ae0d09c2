//! Merged configuration from checkstyle.xml and javalint.toml.
//!
//! checkstyle.xml defines *what* rules run and their parameters.
//! javalint.toml disables rules and locates the checkstyle files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{
    CheckstyleConfig, CheckstyleError, JavalintConfig, JavalintConfigError, RuleMode,
};

/// TreeWalker children that configure filters rather than checks.
const FILTER_MODULES: &[&str] = &["SuppressionXpathFilter", "SuppressionCommentFilter"];

/// Error during config loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Error reading/parsing checkstyle.xml.
    Checkstyle(CheckstyleError),
    /// Error reading/parsing javalint.toml.
    Javalint(JavalintConfigError),
    /// No configuration found.
    NoConfig,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Checkstyle(e) => write!(f, "Checkstyle config error: {}", e),
            ConfigError::Javalint(e) => write!(f, "Javalint config error: {}", e),
            ConfigError::NoConfig => write!(f, "No configuration found"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<CheckstyleError> for ConfigError {
    fn from(e: CheckstyleError) -> Self {
        ConfigError::Checkstyle(e)
    }
}

impl From<JavalintConfigError> for ConfigError {
    fn from(e: JavalintConfigError) -> Self {
        ConfigError::Javalint(e)
    }
}

/// A configured rule with its properties and mode.
#[derive(Debug, Clone)]
pub struct ConfiguredRule {
    /// The rule name (checkstyle module name).
    pub name: String,
    /// Properties from checkstyle.xml.
    pub properties: HashMap<String, String>,
    /// Whether the rule runs (from javalint.toml).
    pub mode: RuleMode,
}

impl ConfiguredRule {
    /// Get a property value by name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Get properties as a reference map (for FromConfig).
    pub fn properties_ref(&self) -> HashMap<&str, &str> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Check if this rule is enabled.
    pub fn is_enabled(&self) -> bool {
        self.mode != RuleMode::Disabled
    }
}

/// Merged configuration combining checkstyle.xml and javalint.toml.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// All configured rules.
    pub rules: Vec<ConfiguredRule>,
    /// Xpath suppression files, from SuppressionXpathFilter modules and the
    /// javalint.toml overlay.
    pub xpath_suppression_files: Vec<PathBuf>,
}

impl MergedConfig {
    /// Create a merged config from checkstyle.xml and optional javalint.toml.
    pub fn new(checkstyle: &CheckstyleConfig, javalint: Option<&JavalintConfig>) -> Self {
        let javalint = javalint.cloned().unwrap_or_default();

        let rules = checkstyle
            .rules()
            .iter()
            .filter(|module| !FILTER_MODULES.contains(&module.name.as_str()))
            .map(|module| ConfiguredRule {
                name: module.name.clone(),
                properties: module
                    .properties_map()
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                mode: javalint.rule_mode(&module.name),
            })
            .collect();

        let mut xpath_suppression_files: Vec<PathBuf> = checkstyle
            .rules()
            .iter()
            .filter(|module| module.name == "SuppressionXpathFilter")
            .filter_map(|module| module.property("file"))
            .map(PathBuf::from)
            .collect();
        if let Some(path) = &javalint.checkstyle.suppressions {
            xpath_suppression_files.push(PathBuf::from(path));
        }

        Self {
            rules,
            xpath_suppression_files,
        }
    }

    /// Get enabled rules (not disabled).
    pub fn enabled_rules(&self) -> impl Iterator<Item = &ConfiguredRule> {
        self.rules.iter().filter(|r| r.is_enabled())
    }

    /// Get a specific rule by name.
    pub fn get_rule(&self, name: &str) -> Option<&ConfiguredRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, name: &str) -> bool {
        self.get_rule(name).map(|r| r.is_enabled()).unwrap_or(false)
    }
}

/// Builder for loading configuration from files.
pub struct ConfigLoader {
    checkstyle_path: Option<PathBuf>,
    javalint_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new() -> Self {
        Self {
            checkstyle_path: None,
            javalint_path: None,
        }
    }

    /// Set the checkstyle.xml path.
    pub fn checkstyle(mut self, path: impl AsRef<Path>) -> Self {
        self.checkstyle_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the javalint.toml path.
    pub fn javalint(mut self, path: impl AsRef<Path>) -> Self {
        self.javalint_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Try to find javalint.toml in common locations.
    pub fn find_javalint(mut self) -> Self {
        let candidates = ["javalint.toml", ".javalint.toml", "config/javalint.toml"];
        for candidate in candidates {
            if Path::new(candidate).exists() {
                self.javalint_path = Some(PathBuf::from(candidate));
                break;
            }
        }
        self
    }

    /// Try to find checkstyle.xml from javalint.toml or common locations.
    pub fn find_checkstyle(mut self, javalint: Option<&JavalintConfig>) -> Self {
        // First check if javalint.toml specifies the path
        if let Some(javalint) = javalint
            && let Some(path) = &javalint.checkstyle.config
            && Path::new(path).exists()
        {
            self.checkstyle_path = Some(PathBuf::from(path));
            return self;
        }

        // Try common locations
        let candidates = [
            "checkstyle.xml",
            "config/checkstyle/checkstyle.xml",
            "config/checkstyle.xml",
            ".checkstyle.xml",
        ];
        for candidate in candidates {
            if Path::new(candidate).exists() {
                self.checkstyle_path = Some(PathBuf::from(candidate));
                break;
            }
        }
        self
    }

    /// Load and merge the configuration.
    pub fn load(self) -> Result<MergedConfig, ConfigError> {
        // Load javalint.toml if specified
        let javalint = match &self.javalint_path {
            Some(path) if path.exists() => Some(JavalintConfig::from_file(path)?),
            _ => None,
        };

        // Try to find checkstyle.xml from the overlay config
        let checkstyle_path = self.checkstyle_path.or_else(|| {
            javalint
                .as_ref()
                .and_then(|j| j.checkstyle.config.as_ref().map(PathBuf::from))
        });

        // Load checkstyle.xml
        let checkstyle = match checkstyle_path {
            Some(path) if path.exists() => CheckstyleConfig::from_file(&path)?,
            Some(path) => {
                return Err(ConfigError::Checkstyle(CheckstyleError::Io(
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("Checkstyle config not found: {}", path.display()),
                    ),
                )));
            }
            None => return Err(ConfigError::NoConfig),
        };

        Ok(MergedConfig::new(&checkstyle, javalint.as_ref()))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
