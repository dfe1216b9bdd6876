//! Test document builders.
//!
//! `create_sample_grid()` is the canonical mixed grid used by roundtrip and
//! writer tests: a 3x2 strip of quads with a triangle fan on one end, split
//! into three subsets.

#![allow(dead_code)]

use ugxrust::types::{Color, Vector3};
use ugxrust::{Edge, MeshDocument, MeshParts, Subset};

/// Two triangles and three quads, in that order.
///
/// Combined face indices 0-1 are the triangles, 2-4 the quads.
pub fn create_two_triangles_three_quads() -> MeshDocument {
    let vertices = (0..8)
        .map(|i| Vector3::new((i % 4) as f64, (i / 4) as f64, 0.0))
        .collect();
    MeshDocument::build(MeshParts {
        vertices,
        triangles: vec![[0, 1, 4], [1, 5, 4]],
        quads: vec![[1, 2, 6, 5], [2, 3, 7, 6], [0, 1, 5, 4]],
        subsets: vec![Subset::default_subset()],
        ..Default::default()
    })
    .unwrap_or_else(|e| panic!("Failed to build grid: {e}"))
}

/// A mixed grid with three subsets and membership in every element kind.
pub fn create_sample_grid() -> MeshDocument {
    let mut doc = MeshDocument::new();
    doc.name = "sample".to_string();

    let inner = doc.add_subset("inner", Color::new(0.8, 0.2, 0.2, 1.0));
    let boundary = doc.add_subset("boundary", Color::new(0.1, 0.3, 0.9, 1.0));
    let corner = doc.add_subset("corner", Color::new(0.5, 0.5, 0.5, 0.5));

    // 4 x 3 vertex lattice with fractional spacing
    for j in 0..3 {
        for i in 0..4 {
            doc.add_vertex(Vector3::new(i as f64 * 0.5, j as f64 * 1.25, -0.125 * i as f64));
        }
    }
    let at = |i: usize, j: usize| j * 4 + i;

    // boundary loop
    let ring = [
        at(0, 0), at(1, 0), at(2, 0), at(3, 0),
        at(3, 1), at(3, 2), at(2, 2), at(1, 2),
        at(0, 2), at(0, 1),
    ];
    let mut boundary_edges = Vec::new();
    for k in 0..ring.len() {
        let e = doc
            .add_edge(ring[k], ring[(k + 1) % ring.len()])
            .unwrap_or_else(|e| panic!("edge: {e}"));
        boundary_edges.push(e);
    }

    // quads everywhere except the last cell, which is split into triangles
    let mut quads = Vec::new();
    for j in 0..2 {
        for i in 0..3 {
            if (i, j) == (2, 1) {
                continue;
            }
            let f = doc
                .add_face(vec![at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)])
                .unwrap_or_else(|e| panic!("quad: {e}"));
            quads.push(f);
        }
    }
    let t0 = doc
        .add_face(vec![at(2, 1), at(3, 1), at(3, 2)])
        .unwrap_or_else(|e| panic!("triangle: {e}"));
    let t1 = doc
        .add_face(vec![at(2, 1), at(3, 2), at(2, 2)])
        .unwrap_or_else(|e| panic!("triangle: {e}"));

    let ring_vertices: Vec<usize> = ring.to_vec();
    doc.assign_vertices(&ring_vertices, boundary).unwrap_or_else(|e| panic!("{e}"));
    doc.assign_vertices(&[at(3, 2)], corner).unwrap_or_else(|e| panic!("{e}"));
    doc.assign_edges(&boundary_edges, boundary).unwrap_or_else(|e| panic!("{e}"));
    doc.assign_faces(&quads, inner).unwrap_or_else(|e| panic!("{e}"));
    doc.assign_faces(&[t0, t1], corner).unwrap_or_else(|e| panic!("{e}"));

    doc
}

/// Same as [`create_sample_grid`], with faces reordered triangles first so
/// face positions equal combined face indices.
pub fn create_sample_grid_triangles_first() -> MeshDocument {
    let doc = create_sample_grid();
    let parts = doc
        .materialize()
        .unwrap_or_else(|e| panic!("Failed to materialize: {e}"));
    let mut rebuilt = MeshDocument::build(parts).unwrap_or_else(|e| panic!("Failed to rebuild: {e}"));
    rebuilt.name = doc.name;
    rebuilt
}

/// A single edge between two vertices, in subset 0.
pub fn create_single_edge() -> MeshDocument {
    MeshDocument::build(MeshParts {
        vertices: vec![Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0)],
        edges: vec![Edge::new(0, 1)],
        subsets: vec![Subset::default_subset()],
        ..Default::default()
    })
    .unwrap_or_else(|e| panic!("Failed to build grid: {e}"))
}
