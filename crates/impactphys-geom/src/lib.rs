pub mod aabb;
pub mod shape;

pub use aabb::{Aabb, aabb_of, swept_aabb};
pub use shape::{Shape, ShapeKind};
