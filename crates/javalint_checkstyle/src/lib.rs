//! Parsers for checkstyle.xml configuration files, xpath suppression files,
//! and the optional javalint.toml overlay.

use quick_xml::de::from_str;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

mod javalint_config;
mod merged_config;
mod suppressions;

pub use crate::javalint_config::{
    CheckstyleReference, JavalintConfig, JavalintConfigError, RuleMode,
};
pub use crate::merged_config::{ConfigError, ConfigLoader, ConfiguredRule, MergedConfig};
pub use crate::suppressions::{
    SuppressXpath, SuppressionEntry, Suppressions, XPATH_QUERY_DELIMITER,
    render_xpath_suppressions,
};

#[derive(Error, Debug)]
pub enum CheckstyleError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse XML: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("suppress-xpath element missing checks, id, or message attribute")]
    InvalidSuppression,
}

/// A property in a checkstyle module.
#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@value")]
    pub value: String,
}

/// A checkstyle module (rule, filter, or container).
#[derive(Debug, Clone, Deserialize)]
pub struct Module {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(default, rename = "property")]
    pub properties: Vec<Property>,
    #[serde(default, rename = "module")]
    pub modules: Vec<Module>,
}

impl Module {
    /// Get a property value by name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Get properties as a map.
    pub fn properties_map(&self) -> HashMap<&str, &str> {
        self.properties
            .iter()
            .map(|p| (p.name.as_str(), p.value.as_str()))
            .collect()
    }
}

/// Root checkstyle configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "module")]
pub struct CheckstyleConfig {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(default, rename = "property")]
    pub properties: Vec<Property>,
    #[serde(default, rename = "module")]
    pub modules: Vec<Module>,
}

impl CheckstyleConfig {
    /// Parse a checkstyle.xml file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CheckstyleError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse checkstyle XML content.
    pub fn parse(content: &str) -> Result<Self, CheckstyleError> {
        Ok(from_str(content)?)
    }

    /// Find the TreeWalker module.
    pub fn tree_walker(&self) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == "TreeWalker")
    }

    /// Get all modules configured under TreeWalker.
    pub fn rules(&self) -> Vec<&Module> {
        self.tree_walker()
            .map(|tw| tw.modules.iter().collect())
            .unwrap_or_default()
    }

    /// Get file-level modules (not in TreeWalker).
    pub fn file_modules(&self) -> Vec<&Module> {
        self.modules
            .iter()
            .filter(|m| m.name != "TreeWalker")
            .collect()
    }
}
