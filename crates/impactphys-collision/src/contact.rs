use impactphys_core::types::{Mat3, Vec3};
use impactphys_core::{BodyId, Scalar};
use impactphys_dynamics::Body;
use tracing::trace;

/// Tangential speeds below this produce no friction impulse.
const MIN_TANGENT_SPEED: f32 = 1.0e-6;

/// One narrowphase result; lives for a single tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub world_point_a: Vec3,
    pub world_point_b: Vec3,
    /// `world_point_a` in A's body frame at the time of impact.
    pub local_point_a: Vec3,
    pub local_point_b: Vec3,
    /// Unit, from A towards B.
    pub normal: Vec3,
    /// Center distance minus summed radii before the step; negative when penetrating.
    pub separation: Scalar,
    /// Seconds from step start.
    pub toi: Scalar,
}

impl Contact {
    /// Key used to order contacts that share a TOI.
    #[inline] pub fn pair_key(&self) -> (BodyId, BodyId) { (self.body_a, self.body_b) }
}

#[inline]
fn angular_factor(inv_i_a: Mat3, ra: Vec3, inv_i_b: Mat3, rb: Vec3, dir: Vec3) -> Scalar {
    let ja = (inv_i_a * ra.cross(dir)).cross(ra);
    let jb = (inv_i_b * rb.cross(dir)).cross(rb);
    (ja + jb).dot(dir)
}

/// Normal + friction impulses followed by a full positional projection.
///
/// Bodies must already sit at the contact's TOI. At least one of them needs
/// finite mass; the scene filters out immovable pairs before getting here.
pub fn resolve_contact(a: &mut Body, b: &mut Body, contact: &Contact) {
    debug_assert!(!a.has_infinite_mass() || !b.has_infinite_mass());

    let point_a = a.local_to_world(contact.local_point_a);
    let point_b = b.local_to_world(contact.local_point_b);
    let n = contact.normal;

    let elasticity = a.elasticity * b.elasticity;
    let friction = a.friction * b.friction;
    let total_inv_mass = a.inv_mass + b.inv_mass;

    let inv_i_a = a.inv_inertia_world();
    let inv_i_b = b.inv_inertia_world();
    let ra = point_a - a.center_of_mass_world();
    let rb = point_b - b.center_of_mass_world();

    // velocity of each contact point, linear + rotational
    let vel_a = a.effective_linear_velocity() + a.effective_angular_velocity().cross(ra);
    let vel_b = b.effective_linear_velocity() + b.effective_angular_velocity().cross(rb);
    let vab = vel_a - vel_b;

    /* ---------- normal ---------- */
    let jn = -(1.0 + elasticity) * vab.dot(n)
        / (total_inv_mass + angular_factor(inv_i_a, ra, inv_i_b, rb, n));
    let impulse_n = n * jn;
    a.apply_impulse(point_a, impulse_n);
    b.apply_impulse(point_b, -impulse_n);

    /* ---------- friction ---------- */
    // unclamped kinetic friction proportional to slip; no Coulomb cone
    let vel_tan = vab - n * n.dot(vab);
    let speed_tan = vel_tan.length();
    if speed_tan > MIN_TANGENT_SPEED {
        let t = vel_tan / speed_tan;
        let reduced_mass = 1.0 / (total_inv_mass + angular_factor(inv_i_a, ra, inv_i_b, rb, t));
        let impulse_t = vel_tan * (reduced_mass * friction);
        a.apply_impulse(point_a, -impulse_t);
        b.apply_impulse(point_b, impulse_t);
    }

    /* ---------- projection ---------- */
    let ds = point_b - point_a;
    let t_a = a.inv_mass / total_inv_mass;
    let t_b = b.inv_mass / total_inv_mass;
    a.position += ds * t_a;
    b.position -= ds * t_b;

    trace!(a = contact.body_a.0, b = contact.body_b.0, toi = contact.toi, jn, "contact resolved");
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use impactphys_core::vec3;
    use impactphys_geom::Shape;
    use crate::intersect::intersect_overlap;

    fn ball(pos: Vec3, r: f32, inv_mass: f32) -> Body {
        Body::new(pos, Shape::sphere(r)).with_inv_mass(inv_mass)
    }

    fn resolve_overlap(a: &mut Body, b: &mut Body) -> Contact {
        let c = intersect_overlap(BodyId(0), a, BodyId(1), b).unwrap();
        resolve_contact(a, b, &c);
        c
    }

    #[test]
    fn equal_mass_elastic_head_on_swaps_velocities() {
        let mut a = ball(vec3(-0.5, 0.0, 0.0), 0.5, 1.0).with_elasticity(1.0).with_linear_velocity(vec3(3.0, 0.0, 0.0));
        let mut b = ball(vec3(0.5, 0.0, 0.0), 0.5, 1.0).with_elasticity(1.0).with_linear_velocity(vec3(-1.0, 0.0, 0.0));
        resolve_overlap(&mut a, &mut b);
        assert_relative_eq!(a.linear_velocity.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(b.linear_velocity.x, 3.0, epsilon = 1e-5);
        assert_eq!(a.angular_velocity, Vec3::ZERO);
        assert_eq!(b.angular_velocity, Vec3::ZERO);
        assert_relative_eq!(a.position.x, -0.5, epsilon = 1e-6);
        assert_relative_eq!(b.position.x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn elastic_bounce_off_immovable_body_reverses_velocity() {
        let mut a = ball(vec3(0.0, 0.0, 1.0), 0.5, 1.0).with_elasticity(1.0).with_linear_velocity(vec3(0.0, 0.0, -4.0));
        let mut ground = ball(vec3(0.0, 0.0, 0.0), 0.5, 0.0).with_elasticity(1.0);
        resolve_overlap(&mut a, &mut ground);
        assert_relative_eq!(a.linear_velocity.z, 4.0, epsilon = 1e-5);
        assert_eq!(ground.linear_velocity, Vec3::ZERO);
    }

    #[test]
    fn inelastic_contact_kills_normal_velocity_and_keeps_momentum() {
        let mut a = ball(vec3(-0.5, 0.0, 0.0), 0.5, 1.0).with_linear_velocity(vec3(2.0, 0.0, 0.0));
        let mut b = ball(vec3(0.5, 0.0, 0.0), 0.5, 0.5);
        let p0 = a.linear_momentum() + b.linear_momentum();
        resolve_overlap(&mut a, &mut b);
        assert_relative_eq!(a.linear_velocity.x, b.linear_velocity.x, epsilon = 1e-5);
        let p1 = a.linear_momentum() + b.linear_momentum();
        assert_relative_eq!((p1 - p0).length(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_slip_skips_friction() {
        let mut a = ball(vec3(-0.5, 0.0, 0.0), 0.5, 1.0).with_friction(1.0).with_linear_velocity(vec3(1.0, 0.0, 0.0));
        let mut b = ball(vec3(0.5, 0.0, 0.0), 0.5, 0.0).with_friction(1.0);
        resolve_overlap(&mut a, &mut b);
        assert!(a.linear_velocity.is_finite());
        assert_eq!(a.angular_velocity, Vec3::ZERO);
        assert_relative_eq!(a.linear_velocity.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn full_friction_turns_slip_into_rolling() {
        let mut a = ball(vec3(0.0, 0.0, 1.0), 0.5, 1.0).with_friction(1.0).with_linear_velocity(vec3(1.0, 0.0, -1.0));
        let mut b = ball(vec3(0.0, 0.0, 0.0), 0.5, 0.0).with_friction(1.0);
        let c = resolve_overlap(&mut a, &mut b);

        assert_relative_eq!(a.linear_velocity.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(a.linear_velocity.x, 5.0 / 7.0, epsilon = 1e-5);
        assert_relative_eq!(a.angular_velocity.y, 10.0 / 7.0, epsilon = 1e-4);

        let r = c.world_point_a - a.center_of_mass_world();
        let slip = a.linear_velocity + a.angular_velocity.cross(r);
        assert_relative_eq!(slip.length(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn projection_splits_by_inverse_mass() {
        let mut a = ball(vec3(0.0, 0.0, 0.0), 1.0, 1.0);
        let mut b = ball(vec3(1.5, 0.0, 0.0), 1.0, 1.0);
        resolve_overlap(&mut a, &mut b);
        assert_relative_eq!(a.position.x, -0.25, epsilon = 1e-5);
        assert_relative_eq!(b.position.x, 1.75, epsilon = 1e-5);

        let mut c = ball(vec3(0.0, 0.0, 0.0), 1.0, 1.0);
        let mut wall = ball(vec3(1.5, 0.0, 0.0), 1.0, 0.0);
        resolve_overlap(&mut c, &mut wall);
        assert_relative_eq!(c.position.x, -0.5, epsilon = 1e-5);
        assert_eq!(wall.position.x, 1.5);
    }

    #[test]
    fn velocity_of_an_immovable_body_imparts_nothing() {
        let mut a = ball(vec3(0.0, 0.0, 0.0), 0.5, 1.0);
        let mut b = ball(vec3(1.0, 0.0, 0.0), 0.5, 0.0)
            .with_linear_velocity(vec3(-100.0, 0.0, 0.0))
            .with_angular_velocity(vec3(0.0, 0.0, 20.0));
        resolve_overlap(&mut a, &mut b);
        assert_eq!(a.linear_velocity, Vec3::ZERO);
        assert_eq!(a.angular_velocity, Vec3::ZERO);
    }
}
