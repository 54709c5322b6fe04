//! User-configurable category rules.
//!
//! ```toml
//! replace_defaults = false
//!
//! [[rules]]
//! category = "Pets"
//! keywords = ["petco", "vet clinic"]
//!
//! [[rules]]
//! category = "Food & Dining"
//! keywords = ["chai point"]
//! ```
//!
//! User rules are checked before the canonical table. With
//! `replace_defaults = true` only the user rules apply.

use anyhow::{Context, Result};
use financeflow_core::{Categorizer, Category, CategoryRule, CategoryRules};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryRulesConfig {
    #[serde(default)]
    pub replace_defaults: bool,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleConfig {
    /// Built-in label ("Shopping") or any custom label
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryRulesConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parse category rules")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&s).with_context(|| format!("in {}", path.display()))
    }

    /// User rules in file order
    pub fn user_rules(&self) -> CategoryRules {
        CategoryRules::new(
            self.rules
                .iter()
                .map(|r| CategoryRule::new(Category::from_label(&r.category), &r.keywords))
                .collect(),
        )
    }

    pub fn build_rules(&self) -> CategoryRules {
        if self.replace_defaults {
            self.user_rules()
        } else {
            CategoryRules::canonical().prepend(self.user_rules())
        }
    }

    pub fn categorizer(&self) -> Categorizer {
        Categorizer::new(self.build_rules())
    }

    /// Labels introduced by the config that are not built in
    pub fn custom_categories(&self) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::new();
        for rule in &self.rules {
            let category = Category::from_label(&rule.category);
            if category.is_custom() && !out.contains(&category) {
                out.push(category);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[rules]]
category = "Pets"
keywords = ["petco", "Vet Clinic"]

[[rules]]
category = "shopping"
keywords = ["zomato merch"]
"#;

    #[test]
    fn test_user_rules_take_precedence() {
        let config = CategoryRulesConfig::from_toml_str(SAMPLE).unwrap();
        let categorizer = config.categorizer();
        assert_eq!(categorizer.categorize("City vet clinic"), Category::Custom("Pets".into()));
        // user rule for "zomato merch" outranks the canonical "zomato" keyword
        assert_eq!(categorizer.categorize("ZOMATO MERCH STORE"), Category::Shopping);
        assert_eq!(categorizer.categorize("Zomato order"), Category::FoodAndDining);
        assert_eq!(categorizer.rules().len(), 2 + CategoryRules::canonical().len());
    }

    #[test]
    fn test_replace_defaults() {
        let config = CategoryRulesConfig::from_toml_str(&format!("replace_defaults = true\n{SAMPLE}")).unwrap();
        let categorizer = config.categorizer();
        assert_eq!(categorizer.categorize("Zomato order"), Category::Other);
        assert_eq!(categorizer.rules().len(), 2);
    }

    #[test]
    fn test_empty_config_is_canonical() {
        let config = CategoryRulesConfig::from_toml_str("").unwrap();
        assert_eq!(config.categorizer(), Categorizer::default());
    }

    #[test]
    fn test_custom_categories() {
        let config = CategoryRulesConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.custom_categories(), vec![Category::Custom("Pets".into())]);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(CategoryRulesConfig::from_toml_str("rules = 3").is_err());
    }
}
