//! Shared test utilities for ugxrust integration tests.
//!
//! Path resolution, read helpers and roundtrip helpers that all test crates
//! import via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use std::path::PathBuf;
use ugxrust::{decode, encode, MeshDocument};

// ===========================================================================
// Paths
// ===========================================================================

/// Resolve path into the `test_output/` directory, creating it if needed.
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}

// ===========================================================================
// Read / write helpers
// ===========================================================================

/// Decode UGX text, panicking with the error on failure.
pub fn read_ugx(text: &str) -> MeshDocument {
    decode(text).unwrap_or_else(|e| panic!("Failed to decode UGX: {e}"))
}

/// Encode a document, panicking with the error on failure.
pub fn write_ugx(doc: &MeshDocument) -> String {
    encode(doc).unwrap_or_else(|e| panic!("Failed to encode UGX: {e}"))
}

/// Roundtrip: encode then decode.
pub fn roundtrip(doc: &MeshDocument) -> MeshDocument {
    read_ugx(&write_ugx(doc))
}

// ===========================================================================
// Comparison
// ===========================================================================

/// Assert that two documents hold the same grid: geometry, subsets and
/// membership. Notifications and retained handler blocks are not compared.
pub fn assert_same_grid(expected: &MeshDocument, actual: &MeshDocument) {
    assert_eq!(expected.name, actual.name, "grid name");
    assert_eq!(expected.vertices, actual.vertices, "vertices");
    assert_eq!(expected.edges, actual.edges, "edges");
    assert_eq!(expected.faces, actual.faces, "faces");
    assert_eq!(expected.subsets, actual.subsets, "subsets");
    assert_eq!(expected.vertex_subsets, actual.vertex_subsets, "vertex subsets");
    assert_eq!(expected.edge_subsets, actual.edge_subsets, "edge subsets");
    assert_eq!(expected.face_subsets, actual.face_subsets, "face subsets");
}
