//! Effect catalog - the validated key -> descriptor table
//!
//! Built once, read-only afterwards. `EffectCatalog::shared()` hands out a
//! process-wide instance that any thread may read without locking.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use thiserror::Error;

use crate::bundled::ALL_EFFECTS;
use crate::descriptor::EffectDescriptor;
use crate::precision::PrecisionPolicy;
use crate::validate::{Violation, validate};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    #[error("effect '{0}' is already registered")]
    DuplicateKey(String),

    #[error("effect '{key}' is invalid ({} violation(s)): {}", .violations.len(), summarize(.violations))]
    InvalidDescriptor {
        key: String,
        violations: Vec<Violation>,
    },
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects and validates descriptors, then freezes them into a catalog
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    effects: HashMap<String, EffectDescriptor>,
    excluded: HashSet<String>,
    precision: PrecisionPolicy,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip these keys when adding the bundled effects
    pub fn exclude<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Precision preamble policy applied to every program at build time
    pub fn precision(mut self, policy: PrecisionPolicy) -> Self {
        self.precision = policy;
        self
    }

    /// Validate and insert one descriptor
    pub fn register(
        &mut self,
        key: impl Into<String>,
        descriptor: EffectDescriptor,
    ) -> Result<&mut Self, CatalogError> {
        let key = key.into();
        if self.effects.contains_key(&key) {
            return Err(CatalogError::DuplicateKey(key));
        }
        if let Err(violations) = validate(&descriptor) {
            return Err(CatalogError::InvalidDescriptor { key, violations });
        }

        log::debug!("Registered effect: {}", key);
        self.effects.insert(key, descriptor);
        Ok(self)
    }

    /// Register every bundled effect not excluded
    pub fn with_bundled(mut self) -> Result<Self, CatalogError> {
        for key in &self.excluded {
            if !ALL_EFFECTS.iter().any(|e| e.key == key.as_str()) {
                log::warn!("Excluded effect '{}' is not a bundled effect", key);
            }
        }

        for effect in ALL_EFFECTS {
            if self.excluded.contains(effect.key) {
                log::debug!("Skipping excluded effect: {}", effect.key);
                continue;
            }
            let descriptor = EffectDescriptor::new(
                effect.attributes.iter().copied(),
                effect.uniforms.iter().copied(),
                effect.vertex,
                effect.fragment,
            );
            self.register(effect.key, descriptor)?;
        }
        Ok(self)
    }

    pub fn build(self) -> EffectCatalog {
        let precision = self.precision;
        let effects: HashMap<_, _> = self
            .effects
            .into_iter()
            .map(|(key, d)| (key, d.with_precision(precision)))
            .collect();

        log::info!(
            "Effect catalog built with {} effects (precision: {})",
            effects.len(),
            precision.name()
        );
        EffectCatalog { effects }
    }
}

/// Read-only table of effect descriptors
#[derive(Debug, Clone)]
pub struct EffectCatalog {
    effects: HashMap<String, EffectDescriptor>,
}

impl EffectCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Catalog of every bundled effect, programs as authored
    pub fn bundled() -> Result<Self, CatalogError> {
        Ok(CatalogBuilder::new().with_bundled()?.build())
    }

    /// Process-wide bundled catalog, built on first use
    pub fn shared() -> Result<&'static Self, &'static CatalogError> {
        static SHARED: OnceLock<Result<EffectCatalog, CatalogError>> = OnceLock::new();
        SHARED.get_or_init(Self::bundled).as_ref()
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, key: &str) -> Result<&EffectDescriptor, CatalogError> {
        self.effects
            .get(key)
            .ok_or_else(|| CatalogError::UnknownEffect(key.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&EffectDescriptor> {
        self.effects.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.effects.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Keys, sorted alphabetically
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.effects.keys().map(|s| s.as_str()).collect();
        keys.sort();
        keys
    }

    /// `(key, descriptor)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EffectDescriptor)> {
        self.keys().into_iter().map(move |k| (k, &self.effects[k]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::keys;
    use crate::scanner::{Storage, scan};

    #[test]
    fn test_bundled_catalog_has_every_effect() {
        let catalog = EffectCatalog::bundled().unwrap();
        assert_eq!(catalog.len(), ALL_EFFECTS.len());
        for effect in ALL_EFFECTS {
            assert!(catalog.contains(effect.key), "{}", effect.key);
        }
    }

    #[test]
    fn test_lookup_iris_uniforms() {
        let catalog = EffectCatalog::bundled().unwrap();
        let iris = catalog.lookup(keys::IRIS).unwrap();
        let mut got: Vec<_> = iris.uniform_names().iter().map(String::as_str).collect();
        got.sort_unstable();
        let mut want = vec!["PercentForAlpha", "Scale", "Mix", "Texture", "MVPMatrix", "Opacity"];
        want.sort_unstable();
        assert_eq!(got, want);
        assert_eq!(iris.attribute_names(), ["Position", "TexCoord"]);
    }

    #[test]
    fn test_lookup_unknown() {
        let catalog = EffectCatalog::bundled().unwrap();
        let err = catalog.lookup("doesNotExist").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownEffect(ref k) if k == "doesNotExist"));
        assert!(catalog.lookup("IRIS").is_err());
    }

    #[test]
    fn test_bundled_names_disjoint_and_unique() {
        let catalog = EffectCatalog::bundled().unwrap();
        for (key, d) in catalog.iter() {
            let attrs: HashSet<_> = d.attribute_names().iter().collect();
            let uniforms: HashSet<_> = d.uniform_names().iter().collect();
            assert_eq!(attrs.len(), d.attribute_names().len(), "{key}");
            assert_eq!(uniforms.len(), d.uniform_names().len(), "{key}");
            assert!(attrs.is_disjoint(&uniforms), "{key}");
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut builder = CatalogBuilder::new().with_bundled().unwrap();
        let flame = builder.effects[keys::FLAME].clone();
        let err = builder.register(keys::FLAME, flame).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateKey(ref k) if k == "flame"));
    }

    #[test]
    fn test_invalid_descriptor_rejected() {
        let mut builder = CatalogBuilder::new();
        let d = EffectDescriptor::new(
            ["Position"],
            ["MVPMatrix"],
            "uniform mat4 MVPMatrix;\nattribute vec4 Position;\nuniform float Percent;\nvoid main() {}",
            "void main() {}",
        );
        let err = builder.register("broken", d).unwrap_err();
        match err {
            CatalogError::InvalidDescriptor { key, violations } => {
                assert_eq!(key, "broken");
                assert_eq!(violations.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_register_custom_effect() {
        let mut builder = CatalogBuilder::new();
        let d = EffectDescriptor::new(
            ["Position"],
            ["MVPMatrix"],
            "uniform mat4 MVPMatrix;\nattribute vec4 Position;\nvoid main() { gl_Position = MVPMatrix * Position; }",
            "void main() { gl_FragColor = vec4(1.0); }",
        );
        builder.register("solid", d).unwrap();
        let catalog = builder.build();
        assert_eq!(catalog.keys(), vec!["solid"]);
    }

    #[test]
    fn test_exclude_skips_bundled() {
        let catalog = CatalogBuilder::new()
            .exclude(["fireworks", "notAnEffect"])
            .with_bundled()
            .unwrap()
            .build();
        assert!(!catalog.contains(keys::FIREWORKS));
        assert!(catalog.contains(keys::FIREWORKS_TRAILS));
        assert_eq!(catalog.len(), ALL_EFFECTS.len() - 1);
    }

    #[test]
    fn test_keys_sorted() {
        let catalog = EffectCatalog::bundled().unwrap();
        let keys = catalog.keys();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(catalog.iter().count(), keys.len());
    }

    #[test]
    fn test_precision_applied_at_build() {
        let catalog = CatalogBuilder::new()
            .with_bundled()
            .unwrap()
            .precision(PrecisionPolicy::Stripped)
            .build();
        for (key, d) in catalog.iter() {
            assert!(!d.vertex_program().contains("precision "), "{key}");
            assert!(!d.fragment_program().contains("precision "), "{key}");
        }
    }

    #[test]
    fn test_guarded_confetti_still_validates() {
        let catalog = CatalogBuilder::new()
            .precision(PrecisionPolicy::Guarded)
            .with_bundled()
            .unwrap()
            .build();
        let confetti = catalog.lookup(keys::CONFETTI).unwrap();
        assert!(confetti.fragment_program().starts_with("#ifdef GL_ES\nprecision"));
        assert!(validate(confetti).is_ok());
        let uniforms = scan(confetti.fragment_program())
            .into_iter()
            .filter(|d| d.storage == Storage::Uniform)
            .count();
        assert_eq!(uniforms, 1);
    }

    #[test]
    fn test_shared_is_same_instance() {
        let a = EffectCatalog::shared().unwrap();
        let b = EffectCatalog::shared().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(a.contains(keys::SPARKLE));
    }
}
