pub mod broadphase;
pub mod intersect;
pub mod contact;

pub use broadphase::{Broadphase, SweepAndPrune, AllPairs, pairs_sap};
pub use intersect::{intersect, intersect_overlap, intersect_dynamic, ray_sphere, sphere_sphere_dynamic, SweptHit};
pub use contact::{Contact, resolve_contact};
