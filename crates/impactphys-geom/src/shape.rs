use impactphys_core::types::{Mat3, Vec3};
use impactphys_core::Scalar;

/// Type tag for dispatching narrowphase tests on shape pairs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ShapeKind {
    Sphere,
}

/// Collision geometry owned by exactly one body.
///
/// Only spheres exist today. The enum is non-exhaustive so code outside this
/// crate has to handle pairs it does not know about; that fallback arm is where
/// new primitives plug into the narrowphase.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Shape {
    Sphere { radius: Scalar },
}

impl Shape {
    #[inline] pub fn sphere(radius: Scalar) -> Self { Shape::Sphere { radius } }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere { .. } => ShapeKind::Sphere,
        }
    }

    /// Local-space inertia tensor per unit mass. Scale by mass (or divide by
    /// `inv_mass`) before use.
    pub fn inertia_tensor(&self) -> Mat3 {
        match *self {
            Shape::Sphere { radius } => {
                let ii = 0.4 * radius * radius;
                Mat3::from_diagonal(glam::Vec3::splat(ii))
            }
        }
    }

    /// Local-space center of mass relative to the body reference point.
    #[inline]
    pub fn center_of_mass(&self) -> Vec3 {
        match self {
            Shape::Sphere { .. } => Vec3::ZERO,
        }
    }

    /// Radius of a sphere around the center of mass enclosing the shape.
    #[inline]
    pub fn bounding_radius(&self) -> Scalar {
        match *self {
            Shape::Sphere { radius } => radius,
        }
    }

    #[inline]
    pub fn as_sphere(&self) -> Option<Scalar> {
        match *self {
            Shape::Sphere { radius } => Some(radius),
        }
    }
}
