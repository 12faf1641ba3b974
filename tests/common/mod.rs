//! Common test utilities and harness
//!
//! Provides reusable utilities for functional testing including:
//! - Test environment setup (temp directories, configs)
//! - Catalog construction from a test config
//! - Float assertion helpers

#![allow(dead_code)]

use std::path::PathBuf;

use slidefx_catalog::EffectCatalog;
use slidefx_config::Config;
use tempfile::TempDir;

/// Test environment with isolated config directory
pub struct TestEnvironment {
    /// Temporary directory for test config
    pub temp_dir: TempDir,
    /// Path to the config directory
    pub config_dir: PathBuf,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_dir = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            config_dir,
        }
    }

    /// Path of the test config file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Write a test config file
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write test config");
    }

    /// Load the test config, creating the default file if missing
    pub fn load_config(&self) -> Config {
        Config::load_or_create(&self.config_path()).expect("Failed to load test config")
    }

    /// Catalog built from the test config
    pub fn catalog(&self) -> EffectCatalog {
        self.load_config()
            .build_catalog()
            .expect("Failed to build catalog")
    }

    /// Fresh directory for export output
    pub fn export_dir(&self) -> PathBuf {
        self.config_dir.join("export")
    }

    /// Read a file relative to the export directory
    pub fn read_export(&self, name: &str) -> String {
        let path = self.export_dir().join(name);
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert two floats are within `eps`
pub fn assert_close(actual: f32, expected: f32, eps: f32) {
    assert!(
        (actual - expected).abs() < eps,
        "expected {expected} (±{eps}), got {actual}"
    );
}
