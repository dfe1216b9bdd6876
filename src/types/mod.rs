//! Core value types shared by the grid model

mod bounds;
mod color;
mod vector;

pub use bounds::BoundingBox3D;
pub use color::Color;
pub use vector::Vector3;
