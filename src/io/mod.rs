//! I/O module for reading and writing UG4 grid files

pub mod ugx;

pub use ugx::{UgxReader, UgxWriter};
