//! # ugxrust
//!
//! A pure Rust library for reading and writing UG4 grids in UGX format.
//!
//! A UGX file is an XML document holding a surface grid (vertices, edges,
//! triangles and quads) together with its subset partition: every element
//! belongs to exactly one named, colored subset.
//!
//! ## Features
//!
//! - Encode a [`MeshDocument`] to UGX text and decode it back
//! - Combined face numbering (triangles first, then quads) for subset and
//!   selector face lists
//! - Subset table editing with automatic membership renumbering
//! - Pass-through of the mark subset handler and the projection handler
//! - Read diagnostics collected as [`notification`]s
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ugxrust::{MeshDocument, UgxReader, UgxWriter};
//!
//! // Read a UGX file
//! let doc = UgxReader::from_file("sample.ugx")?.read()?;
//!
//! for (id, subset) in doc.subsets.iter().enumerate() {
//!     println!("{}: {}", id, subset.name);
//! }
//!
//! // Write it back
//! UgxWriter::new(&doc).write_to_file("output.ugx")?;
//! # Ok::<(), ugxrust::error::UgxError>(())
//! ```
//!
//! ## Host data
//!
//! Hosts that keep geometry as flat arrays go through [`MeshDocument::build`]
//! and [`MeshDocument::materialize`], which exchange a [`MeshParts`] value.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod error;
pub mod geometry;
pub mod io;
pub mod notification;
pub mod selector;
pub mod subset;
pub mod summary;
pub mod types;

// Re-export commonly used types
pub use error::{Result, Section, UgxError};
pub use types::{BoundingBox3D, Color, Vector3};

pub use geometry::{Edge, Face, FaceIndex, FaceKind};
pub use selector::Selector;
pub use subset::{Subset, SubsetMembers};
pub use summary::{GridSummary, SubsetSummary};

// Re-export document
pub use document::{MeshDocument, MeshParts};

// Re-export I/O types
pub use io::ugx::{decode, encode, format_number, Element, UgxReader, UgxWriter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
