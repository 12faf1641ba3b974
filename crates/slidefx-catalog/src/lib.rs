//! slidefx catalog - the effect programs and their binding contract
//!
//! This crate provides:
//! - `EffectDescriptor`: attribute names, uniform names and the program pair
//! - A declaration scanner and validator for descriptor invariants
//! - The bundled GLSL ES programs for every transition, particle and
//!   post-process effect
//! - `EffectCatalog`: the validated, read-only key -> descriptor table
//!
//! The attribute and uniform names are the exact binding names a host
//! uses when it lays out vertex buffers and uploads uniforms. They are
//! case-sensitive and stable.

pub mod bundled;
pub mod catalog;
pub mod descriptor;
pub mod precision;
pub mod scanner;
pub mod validate;

pub use bundled::{ALL_EFFECTS, BundledEffect, bundled_effect_keys, get_bundled_effect, keys};
pub use catalog::{CatalogBuilder, CatalogError, EffectCatalog};
pub use descriptor::EffectDescriptor;
pub use precision::PrecisionPolicy;
pub use scanner::{Declaration, Storage, scan};
pub use validate::{Stage, Violation, validate};
