use impactphys_core::types::Vec3;
use impactphys_core::{BodyId, Scalar};
use impactphys_dynamics::Body;
use impactphys_geom::ShapeKind;
use crate::contact::Contact;

/// Relative sweeps shorter than this are treated as stationary.
const STATIONARY_EPS: f32 = 1.0e-3;
/// Ray directions with `dir·dir` below this never hit.
const RAY_DIR_EPS: f32 = 1.0e-12;

#[inline]
fn sphere_radii(a: &Body, b: &Body) -> Option<(Scalar, Scalar)> {
    match (a.shape.kind(), b.shape.kind()) {
        (ShapeKind::Sphere, ShapeKind::Sphere) => Some((a.shape.as_sphere()?, b.shape.as_sphere()?)),
        // other primitives need their own narrowphase
        _ => None,
    }
}

#[inline]
fn normal_between(from: Vec3, to: Vec3) -> Vec3 {
    let d = to - from;
    let len = d.length();
    if len > 1.0e-6 { d / len } else { Vec3::X }
}

/* ---------- static overlap ---------- */
/// Sphere-sphere overlap at the current poses, boundary inclusive.
pub fn intersect(a: &Body, b: &Body) -> bool {
    let Some((ra, rb)) = sphere_radii(a, b) else { return false };
    let ab = b.position - a.position;
    let rsum = ra + rb;
    ab.length_squared() <= rsum * rsum
}

/// Contact for two spheres overlapping right now (TOI 0).
pub fn intersect_overlap(id_a: BodyId, a: &Body, id_b: BodyId, b: &Body) -> Option<Contact> {
    let (ra, rb) = sphere_radii(a, b)?;
    if !intersect(a, b) { return None; }

    let normal = normal_between(a.position, b.position);
    let world_point_a = a.position + normal * ra;
    let world_point_b = b.position - normal * rb;

    Some(Contact {
        body_a: id_a,
        body_b: id_b,
        world_point_a,
        world_point_b,
        local_point_a: a.world_to_local(world_point_a),
        local_point_b: b.world_to_local(world_point_b),
        normal,
        separation: (b.position - a.position).length() - (ra + rb),
        toi: 0.0,
    })
}

/* ---------- ray vs sphere ---------- */
/// Roots `(t1, t2)`, `t1 <= t2`, of `start + t*dir` against the sphere, in units of `dir`.
pub fn ray_sphere(start: Vec3, dir: Vec3, center: Vec3, radius: Scalar) -> Option<(Scalar, Scalar)> {
    let m = center - start;
    let a = dir.dot(dir);
    if a < RAY_DIR_EPS { return None; }
    let b = m.dot(dir);
    let c = m.dot(m) - radius * radius;

    let delta = b * b - a * c;
    if delta < 0.0 { return None; }

    let sqrt_delta = delta.sqrt();
    let inv_a = 1.0 / a;
    Some(((b - sqrt_delta) * inv_a, (b + sqrt_delta) * inv_a))
}

/* ---------- swept sphere vs sphere ---------- */
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweptHit {
    /// Contact point on A's surface at `toi`.
    pub point_a: Vec3,
    /// Contact point on B's surface at `toi`.
    pub point_b: Vec3,
    /// Seconds from step start, in `[0, dt]`.
    pub toi: Scalar,
}

/// Earliest time in `[0, dt]` at which two linearly moving spheres touch.
pub fn sphere_sphere_dynamic(
    radius_a: Scalar, radius_b: Scalar,
    pos_a: Vec3, pos_b: Vec3,
    vel_a: Vec3, vel_b: Vec3,
    dt: Scalar,
) -> Option<SweptHit> {
    // A moves relative to a stationary B
    let rel_vel = vel_a - vel_b;
    let ray_dir = rel_vel * dt;
    let rsum = radius_a + radius_b;

    let (mut t0, mut t1) = (0.0, 0.0);
    if ray_dir.length_squared() < STATIONARY_EPS * STATIONARY_EPS {
        let r = rsum + STATIONARY_EPS;
        if (pos_b - pos_a).length_squared() > r * r { return None; }
    } else {
        (t0, t1) = ray_sphere(pos_a, ray_dir, pos_b, rsum)?;
    }

    // [0, 1] of the sweep -> [0, dt] seconds
    t0 *= dt;
    t1 *= dt;

    // whole overlap interval already behind us
    if t1 < 0.0 { return None; }

    let toi = t0.max(0.0);
    if toi > dt { return None; }

    let new_a = pos_a + vel_a * toi;
    let new_b = pos_b + vel_b * toi;
    let n = normal_between(new_a, new_b);

    Some(SweptHit {
        point_a: new_a + n * radius_a,
        point_b: new_b - n * radius_b,
        toi,
    })
}

/* ---------- full narrowphase ---------- */
/// Continuous test over `dt`. On a hit both bodies are briefly advanced to the
/// TOI to freeze the contact points in body space, then rewound; the returned
/// contact therefore refers to the pre-step state.
pub fn intersect_dynamic(
    id_a: BodyId, a: &mut Body,
    id_b: BodyId, b: &mut Body,
    dt: Scalar,
) -> Option<Contact> {
    let (ra, rb) = sphere_radii(a, b)?;

    let separation = (b.position - a.position).length() - (ra + rb);
    let hit = sphere_sphere_dynamic(
        ra, rb,
        a.position, b.position,
        a.effective_linear_velocity(), b.effective_linear_velocity(),
        dt,
    )?;

    a.update(hit.toi);
    b.update(hit.toi);

    let local_point_a = a.world_to_local(hit.point_a);
    let local_point_b = b.world_to_local(hit.point_b);
    let normal = normal_between(a.position, b.position);

    a.update(-hit.toi);
    b.update(-hit.toi);

    Some(Contact {
        body_a: id_a,
        body_b: id_b,
        world_point_a: hit.point_a,
        world_point_b: hit.point_b,
        local_point_a,
        local_point_b,
        normal,
        separation,
        toi: hit.toi,
    })
}
