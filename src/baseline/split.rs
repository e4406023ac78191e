//! Category splitting
//!
//! Rules are compiled with `fancy_regex` because the category tables rely on
//! negative lookahead to keep overlapping id families apart.

use super::{setting_definition_id, BaselineDocument};
use crate::error::{Result, SplitError};
use crate::templates::CategoryRule;
use fancy_regex::Regex;
use serde_json::Value;

#[derive(Debug)]
pub struct CompiledRule {
    pub name: String,
    regex: Regex,
}

impl CompiledRule {
    /// Case-insensitive, unanchored match
    pub fn is_match(&self, setting_definition_id: &str) -> Result<bool> {
        self.regex
            .is_match(setting_definition_id)
            .map_err(|e| SplitError::Pattern {
                category: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

/// Category rules compiled once per run, kept in table order
#[derive(Debug)]
pub struct CompiledRules {
    rules: Vec<CompiledRule>,
}

impl CompiledRules {
    pub fn compile(rules: &[CategoryRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                let regex = Regex::new(&format!("(?i){}", rule.pattern)).map_err(|e| {
                    SplitError::Pattern {
                        category: rule.name.clone(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(CompiledRule {
                    name: rule.name.clone(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of every category whose pattern matches the id, in table order
    #[cfg(test)]
    pub fn matching_categories(&self, setting_definition_id: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for rule in &self.rules {
            if rule.is_match(setting_definition_id)? {
                names.push(rule.name.clone());
            }
        }
        Ok(names)
    }
}

/// One category's filtered copy of the baseline
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDocument {
    pub category: String,
    pub document: Value,
    pub matched: usize,
}

#[derive(Debug, Clone)]
pub struct Split {
    pub documents: Vec<CategoryDocument>,
    pub unmatched: usize,
}

/// Build one document per rule from the untouched baseline
///
/// Records without a string `settingDefinitionId` are left out of every
/// category. A record may land in several categories.
pub fn split(baseline: &BaselineDocument, rules: &CompiledRules) -> Result<Split> {
    let settings = baseline.settings();
    let mut hit = vec![false; settings.len()];
    let mut documents = Vec::with_capacity(rules.rule_count());

    for rule in rules.iter() {
        let mut selected = Vec::new();

        for (index, setting) in settings.iter().enumerate() {
            let Some(id) = setting_definition_id(setting) else {
                continue;
            };
            if rule.is_match(id)? {
                selected.push(setting.clone());
                hit[index] = true;
            }
        }

        tracing::debug!("{}: {} settings matched", rule.name, selected.len());

        documents.push(CategoryDocument {
            category: rule.name.clone(),
            matched: selected.len(),
            document: baseline.with_settings(selected),
        });
    }

    Ok(Split {
        documents,
        unmatched: hit.iter().filter(|h| !**h).count(),
    })
}
