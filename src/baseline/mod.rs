//! Baseline template model and the split pipeline
//!
//! A baseline template is a Settings Catalog policy export: a handful of
//! top-level policy fields plus an ordered `settings` array. Splitting copies
//! every top-level field into each category document and replaces `settings`
//! with the records whose `settingDefinitionId` matches that category.

pub mod fixup;
pub mod split;
pub mod writer;

use crate::error::{Result, SplitError};
use crate::fetch::Fetcher;
use crate::templates::BaselineProfile;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed baseline template, read-only once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineDocument {
    root: Map<String, Value>,
}

impl BaselineDocument {
    /// Read and parse a template saved on disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| SplitError::parse(path, e))?;
        Self::from_json_str(&text, path)
    }

    /// Parse template text; `origin` is only used in error messages
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self> {
        // Vendor exports are frequently saved with a UTF-8 BOM
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let value: Value = serde_json::from_str(text).map_err(|e| SplitError::parse(origin, e))?;
        let Value::Object(root) = value else {
            return Err(SplitError::parse(origin, "root is not a JSON object"));
        };

        match root.get("settings") {
            Some(Value::Array(_)) => Ok(Self { root }),
            Some(_) => Err(SplitError::parse(origin, "'settings' is not an array")),
            None => Err(SplitError::parse(origin, "missing 'settings' array")),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    pub fn settings(&self) -> &[Value] {
        self.root
            .get("settings")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Top-level field lookup
    #[cfg(test)]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Copy of the document with `settings` replaced, field order preserved
    pub fn with_settings(&self, settings: Vec<Value>) -> Value {
        let mut settings = Some(Value::Array(settings));
        let mut root = Map::with_capacity(self.root.len());

        for (key, value) in &self.root {
            if key == "settings" {
                root.insert(key.clone(), settings.take().unwrap_or_default());
            } else {
                root.insert(key.clone(), value.clone());
            }
        }

        Value::Object(root)
    }
}

/// The filter key of a setting record, if it has a usable one
pub fn setting_definition_id(setting: &Value) -> Option<&str> {
    setting
        .get("settingInstance")?
        .get("settingDefinitionId")?
        .as_str()
}

#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Run everything except writing the category files
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub category: String,
    pub path: PathBuf,
    pub matched: usize,
}

#[derive(Debug, Clone)]
pub struct SplitReport {
    pub baseline: String,
    pub template_path: PathBuf,
    pub total_settings: usize,
    /// Settings no category rule picked up
    pub unmatched: usize,
    pub categories: Vec<CategoryReport>,
}

/// Download the profile's template into `<output_dir>/Template/`
pub async fn fetch_template(
    fetcher: &Fetcher,
    profile: &BaselineProfile,
    output_dir: &Path,
) -> Result<PathBuf> {
    let template_path = profile.template_path(output_dir);
    fetcher
        .download(&profile.source_url, &template_path)
        .await?;
    Ok(template_path)
}

/// Load a saved template, split it by the profile's rules and write one file per category
///
/// The first write failure aborts the run; files already written stay on disk.
pub fn split_template(
    profile: &BaselineProfile,
    template_path: &Path,
    output_dir: &Path,
    options: &SplitOptions,
) -> Result<SplitReport> {
    profile.validate()?;
    let rules = split::CompiledRules::compile(&profile.rules)?;

    let baseline = BaselineDocument::load(template_path)?;
    tracing::debug!(
        "Loaded {} ({} settings) from {}",
        baseline.name().unwrap_or("unnamed baseline"),
        baseline.settings().len(),
        template_path.display()
    );

    let split = split::split(&baseline, &rules)?;

    let mut categories = Vec::with_capacity(split.documents.len());
    for doc in &split.documents {
        let text = fixup::serialize(&doc.document, profile.apply_known_defect_fixups)?;
        let path = output_dir.join(profile.output_file_name(&doc.category));

        if options.dry_run {
            tracing::debug!("Dry run, skipping write of {}", path.display());
        } else {
            writer::write_category(&path, &text)?;
        }

        categories.push(CategoryReport {
            category: doc.category.clone(),
            path,
            matched: doc.matched,
        });
    }

    Ok(SplitReport {
        baseline: profile.display_name.clone(),
        template_path: template_path.to_path_buf(),
        total_settings: baseline.settings().len(),
        unmatched: split.unmatched,
        categories,
    })
}
