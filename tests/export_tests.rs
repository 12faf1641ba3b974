//! Export and inspector command tests
//!
//! Runs the command functions against catalogs built from temporary
//! configs and checks the files they leave behind.

mod common;

use common::TestEnvironment;
use slidefx::{CATALOG_INDEX_FILE, export_catalog, sample_effect, show_effect};
use slidefx_catalog::ALL_EFFECTS;

#[test]
fn test_export_writes_every_program() {
    let env = TestEnvironment::new();
    let catalog = env.catalog();

    let written = export_catalog(&catalog, &env.export_dir()).unwrap();
    assert_eq!(written.len(), catalog.len() * 2 + 1);
    assert!(written.last().unwrap().ends_with(CATALOG_INDEX_FILE));

    for effect in ALL_EFFECTS {
        assert_eq!(env.read_export(&format!("{}.vert", effect.key)), effect.vertex);
        assert_eq!(env.read_export(&format!("{}.frag", effect.key)), effect.fragment);
    }
}

#[test]
fn test_export_index_is_camel_case_json() {
    let env = TestEnvironment::new();
    export_catalog(&env.catalog(), &env.export_dir()).unwrap();

    let index: serde_json::Value =
        serde_json::from_str(&env.read_export(CATALOG_INDEX_FILE)).unwrap();
    assert_eq!(index["version"], env!("CARGO_PKG_VERSION"));

    let iris = &index["effects"]["iris"];
    assert_eq!(iris["attributeNames"], serde_json::json!(["Position", "TexCoord"]));
    assert!(iris["uniformNames"].as_array().unwrap().contains(&"Mix".into()));
    assert!(iris["fragmentProgram"].as_str().unwrap().contains("gl_FragColor"));
    assert_eq!(index["effects"].as_object().unwrap().len(), ALL_EFFECTS.len());
}

#[test]
fn test_export_honours_config() {
    let env = TestEnvironment::new();
    env.write_config(
        r#"
        [catalog]
        exclude = ["bloom"]
        precision = "stripped"
        "#,
    );
    export_catalog(&env.catalog(), &env.export_dir()).unwrap();

    assert!(!env.export_dir().join("bloom.frag").exists());
    assert!(!env.read_export("iris.frag").contains("precision "));
}

#[test]
fn test_show_with_guarded_precision() {
    let env = TestEnvironment::new();
    env.write_config("[catalog]\nprecision = \"guarded\"\n");

    let out = show_effect(&env.catalog(), "flame").unwrap();
    if out.contains("precision ") {
        assert!(out.contains("#ifdef GL_ES"));
    }
    assert!(out.contains("Percent"));
}

#[test]
fn test_sample_output_is_json() {
    let json = sample_effect("sparkle", 0.5, 0.0).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "vertices");
    assert_eq!(value["key"], "sparkle");
    assert_eq!(value["vertices"].as_array().unwrap().len(), 4);
}
