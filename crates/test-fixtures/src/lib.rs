//! Test fixture loader for golden datasets, plus seeded synthetic data.
//!
//! Provides typed deserialization of the golden JSON files and helper
//! functions for loading them in tests and benches across crates.

pub mod synthetic;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON fixture files.
pub fn list_fixtures() -> Vec<PathBuf> {
    let dir = fixtures_root();
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// A golden scoring scenario: a training set and queries with known results.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScoring {
    pub description: String,
    pub train: GoldenTrainSet,
    pub queries: Vec<GoldenQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenTrainSet {
    pub embeddings: Vec<Vec<f32>>,
    pub labels: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenQuery {
    pub name: String,
    pub embedding: Vec<f32>,
    pub predicted: usize,
    pub k: usize,
    pub expected: GoldenExpected,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenExpected {
    pub trust_score: f64,
    pub predicted_distance: f64,
    pub closest_other_distance: f64,
    pub closest_other_label: Option<usize>,
    pub predicted_neighbor_index: Option<usize>,
    pub closest_other_neighbor_index: Option<usize>,
}
