//! slidefx - slide-transition and particle effect programs
//!
//! This is the root crate holding the `slidefx` inspector commands.
//! The actual implementation lives in:
//! - `slidefx-math` - GLSL built-ins, fast trig, particle lifetimes
//! - `slidefx-catalog` - bundled GLSL programs and the validated catalog
//! - `slidefx-effects` - CPU reference models of every program
//! - `slidefx-config` - `~/.slidefx/config.toml`
//!
//! Inspect the catalog:
//! ```sh
//! cargo run -- list
//! cargo run -- show iris --precision guarded
//! cargo run -- sample sparkle --percent 0.3
//! ```

pub mod commands;
pub use commands::{
    CATALOG_INDEX_FILE, ValidationReport, export_catalog, list_effects, sample_effect,
    show_effect, validate_catalog,
};
