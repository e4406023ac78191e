//! Compiled-in baseline profiles
//!
//! Each profile names where a vendor baseline template is published, how the
//! downloaded copy and the per-category outputs are named, and the ordered
//! category rules used to split its `settings` array.

pub mod edge;
pub mod m365_apps;

use crate::error::{Result, SplitError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Subdirectory of the output directory holding downloaded templates
pub const TEMPLATE_DIR: &str = "Template";

/// A named regular expression tested against `settingDefinitionId`
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub name: String,
    pub pattern: String,
}

impl CategoryRule {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// One baseline variant: source, output naming, fixup flag and category table
#[derive(Debug, Clone)]
pub struct BaselineProfile {
    /// Short key used on the command line (e.g. "m365")
    pub key: String,
    pub display_name: String,
    pub source_url: String,
    pub template_file_name: String,
    /// Prepended to every category file name
    pub output_prefix: String,
    /// Patch known serialization artifacts after the JSON text is produced
    pub apply_known_defect_fixups: bool,
    pub rules: Vec<CategoryRule>,
}

impl BaselineProfile {
    /// Build a profile from a static `(name, pattern)` table
    pub fn from_table(
        key: &str,
        display_name: &str,
        source_url: &str,
        template_file_name: &str,
        output_prefix: &str,
        apply_known_defect_fixups: bool,
        table: &[(&str, &str)],
    ) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            source_url: source_url.to_string(),
            template_file_name: template_file_name.to_string(),
            output_prefix: output_prefix.to_string(),
            apply_known_defect_fixups,
            rules: table
                .iter()
                .map(|(name, pattern)| CategoryRule::new(*name, *pattern))
                .collect(),
        }
    }

    /// Check that every category maps to a distinct, filesystem-safe file name
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(SplitError::InvalidProfile(format!(
                "'{}' has no category rules",
                self.key
            )));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.name.is_empty() || !rule.name.chars().all(is_file_name_char) {
                return Err(SplitError::InvalidProfile(format!(
                    "category name '{}' must only contain letters, digits, '_', '-' or '.'",
                    rule.name
                )));
            }

            // Output files may land on case-insensitive filesystems
            if !seen.insert(rule.name.to_lowercase()) {
                return Err(SplitError::InvalidProfile(format!(
                    "duplicate category '{}' in '{}'",
                    rule.name, self.key
                )));
            }
        }

        Ok(())
    }

    /// Where the downloaded template is cached
    pub fn template_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(TEMPLATE_DIR).join(&self.template_file_name)
    }

    pub fn output_file_name(&self, category: &str) -> String {
        format!("{}{}.json", self.output_prefix, category)
    }
}

fn is_file_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// All compiled-in profiles, in display order
pub fn all_profiles() -> Vec<BaselineProfile> {
    vec![m365_apps::profile(), edge::profile()]
}

/// Look up a profile by key (case-insensitive)
pub fn find_profile(key: &str) -> Result<BaselineProfile> {
    all_profiles()
        .into_iter()
        .find(|p| p.key.eq_ignore_ascii_case(key))
        .ok_or_else(|| SplitError::UnknownBaseline(key.to_string()))
}

/// Resolve a command-line selection: a profile key or "all"
pub fn select_profiles(selection: &str) -> Result<Vec<BaselineProfile>> {
    if selection.eq_ignore_ascii_case("all") {
        Ok(all_profiles())
    } else {
        Ok(vec![find_profile(selection)?])
    }
}
