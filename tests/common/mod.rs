//! Common test utilities
//!
//! Shared fixtures for the integration tests: deterministic settings built
//! from explicit layers (no files, no process environment) and a harness wired
//! to the mock session factory.

use std::collections::HashMap;
use std::sync::Arc;

use webharness::config::{EnvironmentRecord, Environments, Settings, SettingsLayer};
use webharness::session::MockFactory;
use webharness::Harness;

/// Environment records matching the shipped `resources/environments.json`
pub fn test_environments() -> Environments {
    let mut map = HashMap::new();
    map.insert(
        "GURU".to_string(),
        EnvironmentRecord {
            base_url: "https://demo.guru99.com".to_string(),
        },
    );
    map.insert(
        "APPLITOOLS".to_string(),
        EnvironmentRecord {
            base_url: "https://demo.applitools.com".to_string(),
        },
    );
    map.insert(
        "AUTOMATION".to_string(),
        EnvironmentRecord {
            base_url: "https://demo.automationtesting.in".to_string(),
        },
    );
    Environments(map)
}

/// Settings resolved purely from defaults
pub fn test_settings() -> Settings {
    settings_with(SettingsLayer::default())
}

/// Settings with an explicit override layer on top of the defaults
pub fn settings_with(overrides: SettingsLayer) -> Settings {
    Settings::resolve(overrides, SettingsLayer::default(), &test_environments())
        .expect("test settings should resolve")
}

/// Harness driving mock sessions, plus the factory for state inspection
pub fn mock_harness() -> (Harness, Arc<MockFactory>) {
    mock_harness_with(test_settings())
}

/// Mock harness over specific settings
pub fn mock_harness_with(settings: Settings) -> (Harness, Arc<MockFactory>) {
    let factory = Arc::new(MockFactory::new());
    let harness = Harness::with_factory(Arc::new(settings), factory.clone());
    (harness, factory)
}
