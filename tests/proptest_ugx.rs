//! Property-based tests for the UGX codec.
//!
//! Random grids are encoded and decoded again; geometry, subsets and
//! membership must survive unchanged.
//!
//! Run with: cargo test --test proptest_ugx

mod common;

use common::assert_same_grid;
use proptest::prelude::*;
use ugxrust::types::{Color, Vector3};
use ugxrust::{decode, encode, format_number, Edge, MeshDocument, MeshParts, Subset};

// =============================================================================
// Strategies
// =============================================================================

fn arb_coordinate() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1000i32..1000).prop_map(f64::from),
        -1.0e6..1.0e6f64,
    ]
}

fn arb_vertex() -> impl Strategy<Value = Vector3> {
    prop::array::uniform3(arb_coordinate()).prop_map(Vector3::from)
}

fn arb_subset() -> impl Strategy<Value = Subset> {
    ("[a-zA-Z][a-zA-Z0-9 _]{0,11}", prop::array::uniform4(0.0..=1.0f64))
        .prop_map(|(name, [r, g, b, a])| Subset::new(name, Color::new(r, g, b, a)))
}

/// A valid grid: every index in range, every membership entry a real subset.
fn arb_parts() -> impl Strategy<Value = MeshParts> {
    (1usize..40, 1usize..5).prop_flat_map(|(vertex_count, subset_count)| {
        let v = 0..vertex_count;
        let s = 0..subset_count;
        (
            prop::collection::vec(arb_vertex(), vertex_count),
            prop::collection::vec((v.clone(), v.clone()).prop_map(|(a, b)| Edge::new(a, b)), 0..30),
            prop::collection::vec(prop::array::uniform3(v.clone()), 0..20),
            prop::collection::vec(prop::array::uniform4(v), 0..20),
            prop::collection::vec(arb_subset(), subset_count),
            Just(s),
        )
            .prop_flat_map(|(vertices, edges, triangles, quads, subsets, s)| {
                let vertex_subsets = prop::collection::vec(s.clone(), vertices.len());
                let edge_subsets = prop::collection::vec(s.clone(), edges.len());
                let face_subsets = prop::collection::vec(s, triangles.len() + quads.len());
                (vertex_subsets, edge_subsets, face_subsets).prop_map(
                    move |(vertex_subsets, edge_subsets, face_subsets)| MeshParts {
                        vertices: vertices.clone(),
                        edges: edges.clone(),
                        triangles: triangles.clone(),
                        quads: quads.clone(),
                        subsets: subsets.clone(),
                        vertex_subsets,
                        edge_subsets,
                        face_subsets,
                    },
                )
            })
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn roundtrip_preserves_grid(parts in arb_parts()) {
        let doc = MeshDocument::build(parts).unwrap();
        let text = encode(&doc).unwrap();
        let back = decode(&text).unwrap();
        assert_same_grid(&doc, &back);
        prop_assert!(back.notifications.is_empty());
    }

    #[test]
    fn materialize_inverts_build(parts in arb_parts()) {
        let doc = MeshDocument::build(parts.clone()).unwrap();
        prop_assert_eq!(doc.materialize().unwrap(), parts);
    }

    #[test]
    fn formatted_numbers_read_back_exactly(value in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
        let text = format_number(value);
        prop_assert_eq!(text.parse::<f64>().unwrap(), value);
        if value.fract() == 0.0 && value.abs() < 1e15 {
            prop_assert!(!text.contains('.'));
        }
    }

    #[test]
    fn combined_index_splits_and_joins(triangles in 0usize..50, quads in 0usize..50, k in 0usize..100) {
        let mut doc = MeshDocument::new();
        for _ in 0..4 {
            doc.add_vertex(Vector3::ZERO);
        }
        for _ in 0..triangles {
            doc.add_face(vec![0, 1, 2]).unwrap();
        }
        for _ in 0..quads {
            doc.add_face(vec![0, 1, 2, 3]).unwrap();
        }

        match doc.split_face_index(k) {
            Some(index) => prop_assert_eq!(doc.combined_face_index(index), k),
            None => prop_assert!(k >= triangles + quads),
        }
    }
}
