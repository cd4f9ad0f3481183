use impactphys_core::types::{Isometry, Mat3, Vec3};
use impactphys_core::{Quat, Scalar};
use impactphys_geom::Shape;

/// Upper bound on angular speed after any angular impulse, in rad/s.
pub const MAX_ANGULAR_SPEED: Scalar = 30.0;

/// One rigid object. `inv_mass == 0` marks an immovable body.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// World-space reference point; the center of mass sits at `shape.center_of_mass()` from here.
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub inv_mass: Scalar,
    pub elasticity: Scalar,
    pub friction: Scalar,
    pub shape: Shape,
}

impl Body {
    /// Immovable body at `position` with identity orientation.
    pub fn new(position: Vec3, shape: Shape) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            inv_mass: 0.0,
            elasticity: 0.0,
            friction: 0.0,
            shape,
        }
    }

    pub fn with_inv_mass(mut self, inv_mass: Scalar) -> Self { self.inv_mass = inv_mass.max(0.0); self }
    pub fn with_orientation(mut self, q: Quat) -> Self { self.orientation = q.normalize(); self }
    pub fn with_linear_velocity(mut self, v: Vec3) -> Self { self.linear_velocity = v; self }
    pub fn with_angular_velocity(mut self, w: Vec3) -> Self { self.angular_velocity = w; self }
    pub fn with_elasticity(mut self, e: Scalar) -> Self { self.elasticity = e; self }
    pub fn with_friction(mut self, f: Scalar) -> Self { self.friction = f; self }

    #[inline] pub fn has_infinite_mass(&self) -> bool { self.inv_mass == 0.0 }

    /// Mass in kg; infinite for immovable bodies.
    #[inline]
    pub fn mass(&self) -> Scalar {
        if self.has_infinite_mass() { Scalar::INFINITY } else { 1.0 / self.inv_mass }
    }

    #[inline] pub fn pose(&self) -> Isometry { Isometry { pos: self.position, rot: self.orientation } }

    /// Velocity `update` actually integrates; immovable bodies never move.
    #[inline]
    pub fn effective_linear_velocity(&self) -> Vec3 {
        if self.has_infinite_mass() { Vec3::ZERO } else { self.linear_velocity }
    }

    #[inline]
    pub fn effective_angular_velocity(&self) -> Vec3 {
        if self.has_infinite_mass() { Vec3::ZERO } else { self.angular_velocity }
    }

    /* ---------- Mass properties ---------- */
    #[inline] pub fn center_of_mass_local(&self) -> Vec3 { self.shape.center_of_mass() }

    #[inline]
    pub fn center_of_mass_world(&self) -> Vec3 {
        self.position + self.orientation * self.center_of_mass_local()
    }

    /// Local-space inverse inertia: I^-1_local * inv_mass.
    pub fn inv_inertia_local(&self) -> Mat3 {
        if self.has_infinite_mass() { return Mat3::ZERO; }
        self.shape.inertia_tensor().inverse() * self.inv_mass
    }

    /// World-space inverse inertia: R * I^-1_local * R^T. Recomputed on every call.
    pub fn inv_inertia_world(&self) -> Mat3 {
        let r = Mat3::from_quat(self.orientation);
        r * self.inv_inertia_local() * r.transpose()
    }

    /* ---------- Frames ---------- */
    #[inline]
    pub fn world_to_local(&self, world_pt: Vec3) -> Vec3 {
        self.orientation.inverse() * (world_pt - self.center_of_mass_world())
    }

    #[inline]
    pub fn local_to_world(&self, local_pt: Vec3) -> Vec3 {
        self.center_of_mass_world() + self.orientation * local_pt
    }

    /* ---------- Impulses ---------- */
    #[inline]
    pub fn apply_impulse_linear(&mut self, impulse: Vec3) {
        if self.has_infinite_mass() { return; }
        self.linear_velocity += impulse * self.inv_mass;
    }

    /// Δω = I^-1_world * impulse, then clamp to `MAX_ANGULAR_SPEED`.
    pub fn apply_impulse_angular(&mut self, impulse: Vec3) {
        if self.has_infinite_mass() { return; }
        self.angular_velocity += self.inv_inertia_world() * impulse;

        if self.angular_velocity.length_squared() > MAX_ANGULAR_SPEED * MAX_ANGULAR_SPEED {
            self.angular_velocity = self.angular_velocity.normalize() * MAX_ANGULAR_SPEED;
        }
    }

    /// Impulse at a world-space point; the arm is taken from the center of mass.
    pub fn apply_impulse(&mut self, point: Vec3, impulse: Vec3) {
        if self.has_infinite_mass() { return; }
        self.apply_impulse_linear(impulse);

        let r = point - self.center_of_mass_world();
        self.apply_impulse_angular(r.cross(impulse));
    }

    /* ---------- Integration ---------- */
    /// Advance by `dt` seconds (negative `dt` rewinds). Immovable bodies do not move.
    pub fn update(&mut self, dt: Scalar) {
        if self.has_infinite_mass() { return; }

        self.position += self.linear_velocity * dt;

        // position was moved with the old center of mass; rotation pivots about it
        let com = self.center_of_mass_world();
        let com_to_pos = self.position - com;

        // torque-free precession
        let rot = Mat3::from_quat(self.orientation);
        let inertia = rot * self.shape.inertia_tensor() * rot.transpose();
        let alpha = inertia.inverse() * self.angular_velocity.cross(inertia * self.angular_velocity);
        self.angular_velocity += alpha * dt;

        let d_angle = self.angular_velocity * dt;
        let dq = Quat::from_scaled_axis(d_angle.into());
        self.orientation = (dq * self.orientation).normalize();

        self.position = com + dq * com_to_pos;
    }

    /* ---------- Diagnostics ---------- */
    #[inline]
    pub fn linear_momentum(&self) -> Vec3 {
        if self.has_infinite_mass() { return Vec3::ZERO; }
        self.linear_velocity * self.mass()
    }

    pub fn kinetic_energy(&self) -> Scalar {
        if self.has_infinite_mass() { return 0.0; }
        let m = self.mass();
        let rot = Mat3::from_quat(self.orientation);
        let inertia = rot * (self.shape.inertia_tensor() * m) * rot.transpose();
        0.5 * m * self.linear_velocity.length_squared()
            + 0.5 * self.angular_velocity.dot(inertia * self.angular_velocity)
    }
}
