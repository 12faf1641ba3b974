//! Inspector commands
//!
//! Each command takes an already-built catalog and returns what the binary
//! prints, so the command logic can be tested without spawning a process.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use slidefx_catalog::{CatalogError, EffectCatalog, EffectDescriptor, Violation, validate};
use slidefx_effects::sample_default;

/// Name of the descriptor index written by `export`
pub const CATALOG_INDEX_FILE: &str = "catalog.json";

/// One line per effect: key, attribute and uniform counts
pub fn list_effects(catalog: &EffectCatalog) -> String {
    let mut out = String::new();
    for (key, desc) in catalog.iter() {
        out.push_str(&format!(
            "{:<24} {} attributes, {} uniforms\n",
            key,
            desc.attribute_names().len(),
            desc.uniform_names().len()
        ));
    }
    out
}

/// Binding names and both program texts of one effect
pub fn show_effect(catalog: &EffectCatalog, key: &str) -> Result<String, CatalogError> {
    let desc = catalog.lookup(key)?;
    Ok(format!(
        "{key}\n\
         attributes: {}\n\
         uniforms:   {}\n\
         \n\
         // ---- vertex ----\n\
         {}\n\
         // ---- fragment ----\n\
         {}",
        desc.attribute_names().join(", "),
        desc.uniform_names().join(", "),
        desc.vertex_program().trim_end(),
        desc.fragment_program().trim_end(),
    ))
}

/// Result of re-checking every descriptor in a catalog
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub checked: usize,
    pub failures: Vec<(String, Vec<Violation>)>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, violations) in &self.failures {
            writeln!(f, "{key}:")?;
            for v in violations {
                writeln!(f, "  - {v}")?;
            }
        }
        write!(
            f,
            "{} effects checked, {} invalid",
            self.checked,
            self.failures.len()
        )
    }
}

pub fn validate_catalog(catalog: &EffectCatalog) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (key, desc) in catalog.iter() {
        report.checked += 1;
        if let Err(violations) = validate(desc) {
            log::warn!("Effect '{}' has {} violations", key, violations.len());
            report.failures.push((key.to_string(), violations));
        }
    }
    report
}

#[derive(Serialize)]
struct CatalogIndex<'a> {
    version: &'static str,
    effects: BTreeMap<&'a str, &'a EffectDescriptor>,
}

/// Write `<key>.vert`, `<key>.frag` for every effect plus `catalog.json`
///
/// Returns the written paths, index last.
pub fn export_catalog(catalog: &EffectCatalog, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;

    let mut written = Vec::with_capacity(catalog.len() * 2 + 1);
    for (key, desc) in catalog.iter() {
        for (ext, source) in [("vert", desc.vertex_program()), ("frag", desc.fragment_program())] {
            let path = dir.join(format!("{key}.{ext}"));
            fs::write(&path, source).with_context(|| format!("Failed to write {:?}", path))?;
            written.push(path);
        }
    }

    let index = CatalogIndex {
        version: env!("CARGO_PKG_VERSION"),
        effects: catalog.iter().collect(),
    };
    let json = serde_json::to_string_pretty(&index).context("Failed to serialize catalog index")?;
    let path = dir.join(CATALOG_INDEX_FILE);
    fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
    written.push(path);

    log::info!("Exported {} effects to {:?}", catalog.len(), dir);
    Ok(written)
}

/// Reference-model output of `key` at `percent` as pretty JSON
pub fn sample_effect(key: &str, percent: f32, bloom_amount: f32) -> Result<String> {
    if !percent.is_finite() {
        bail!("percent must be a finite number, got {percent}");
    }
    let sample = sample_default(key, percent, bloom_amount)?;
    Ok(serde_json::to_string_pretty(&sample)?)
}
