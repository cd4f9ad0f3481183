use impactphys_core::types::{Isometry, Vec3};
use crate::shape::Shape;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Aabb { pub min: Vec3, pub max: Vec3 }

impl Aabb {
    #[inline] pub fn new(min: Vec3, max: Vec3) -> Self { Self { min, max } }
    #[inline] pub fn from_center_half_extents(c: Vec3, he: Vec3) -> Self {
        Self { min: c - he, max: c + he }
    }
    #[inline] pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x || self.min.x > other.max.x ||
            self.max.y < other.min.y || self.min.y > other.max.y ||
            self.max.z < other.min.z || self.min.z > other.max.z)
    }
    #[inline] pub fn expand_by(&mut self, r: f32) {
        let e = Vec3::splat(r);
        self.min -= e; self.max += e;
    }
    #[inline] pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
    #[inline] pub fn is_finite(&self) -> bool { self.min.is_finite() && self.max.is_finite() }
}

/// Bounds of `shape` at `xf`: a cube around the bounding sphere at the world center of mass.
#[inline]
pub fn aabb_of(shape: &Shape, xf: &Isometry) -> Aabb {
    let com = xf.transform_point(shape.center_of_mass());
    Aabb::from_center_half_extents(com, Vec3::splat(shape.bounding_radius()))
}

/// Bounds covering `shape` over a straight-line move of `displacement` from `xf`.
#[inline]
pub fn swept_aabb(shape: &Shape, xf: &Isometry, displacement: Vec3) -> Aabb {
    let start = aabb_of(shape, xf);
    let end = Aabb { min: start.min + displacement, max: start.max + displacement };
    start.union(&end)
}
