mod scenario;

pub use scenario::{ScenarioDesc, BodyDesc, ShapeDesc, load_scenario, build_scene};

use impactphys_core::{
    BodyId, Scalar, Vec3, SceneConfig, TieBreak, BroadphaseKind, StepStats, StepStage,
    ScheduleRecorder, StepHasher, hash_vec3, hash_quat, hash_f32,
};
use impactphys_dynamics::{Bodies, Body};
use impactphys_collision::{Broadphase, SweepAndPrune, AllPairs, Contact, intersect_dynamic, resolve_contact};
use tracing::{debug, debug_span, trace, warn};

/* ---------------- Builder ---------------- */
pub struct SceneBuilder {
    pub bodies: usize,
    pub config: SceneConfig,
    broadphase: Option<Box<dyn Broadphase>>,
}

impl SceneBuilder {
    pub fn new() -> Self { Self { bodies: 128, config: SceneConfig::default(), broadphase: None } }

    pub fn with_capacity(mut self, bodies: usize) -> Self {
        self.bodies = bodies;
        self
    }

    pub fn with_config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the broadphase picked from `config.broadphase`.
    pub fn with_broadphase(mut self, bp: impl Broadphase + 'static) -> Self {
        self.broadphase = Some(Box::new(bp));
        self
    }

    pub fn build(self) -> Scene {
        let mut scene = Scene::with_capacity(self.bodies, self.config);
        if let Some(bp) = self.broadphase { scene.broadphase = bp; }
        scene
    }
}

impl Default for SceneBuilder {
    fn default() -> Self { Self::new() }
}

fn make_broadphase(kind: BroadphaseKind) -> Box<dyn Broadphase> {
    match kind {
        BroadphaseKind::SweepAndPrune => Box::new(SweepAndPrune),
        BroadphaseKind::AllPairs => Box::new(AllPairs),
    }
}

/// Ascending TOI; ties resolved per `tie_break`.
fn sort_contacts(contacts: &mut [Contact], tie_break: TieBreak) {
    match tie_break {
        TieBreak::BodyPair => contacts.sort_by(|x, y| {
            x.toi.total_cmp(&y.toi).then_with(|| x.pair_key().cmp(&y.pair_key()))
        }),
        TieBreak::None => contacts.sort_unstable_by(|x, y| x.toi.total_cmp(&y.toi)),
    }
}

/* ---------------- Scene ---------------- */
/// Owns every body and advances them together, one shared clock per tick.
pub struct Scene {
    config: SceneConfig,
    bodies: Bodies,
    broadphase: Box<dyn Broadphase>,
    // per-tick scratch, empty between ticks
    contacts: Vec<Contact>,
    schedule: ScheduleRecorder,
    tick: u64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self { Self::with_capacity(0, config) }

    pub fn with_capacity(bodies: usize, config: SceneConfig) -> Self {
        Self {
            config,
            bodies: Bodies::with_capacity(bodies),
            broadphase: make_broadphase(config.broadphase),
            contacts: Vec::with_capacity(bodies),
            schedule: ScheduleRecorder::new(),
            tick: 0,
        }
    }

    /* ---------- Composition / access ---------- */
    pub fn add_body(&mut self, body: Body) -> BodyId { self.bodies.add(body) }

    #[inline] pub fn num_bodies(&self) -> usize { self.bodies.len() }
    #[inline] pub fn bodies(&self) -> &[Body] { self.bodies.as_slice() }
    #[inline] pub fn body(&self, id: BodyId) -> Option<&Body> { self.bodies.get(id) }
    #[inline] pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> { self.bodies.get_mut(id) }
    #[inline] pub fn tick_index(&self) -> u64 { self.tick }
    #[inline] pub fn config(&self) -> &SceneConfig { &self.config }

    /// Replaces the config and rebuilds the broadphase it names.
    pub fn set_config(&mut self, config: SceneConfig) {
        self.config = config;
        self.broadphase = make_broadphase(config.broadphase);
    }

    /// Drops every body and rewinds the tick counter.
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.contacts.clear();
        self.schedule.clear();
        self.tick = 0;
    }

    /// Sum of linear momenta of all movable bodies.
    pub fn linear_momentum(&self) -> Vec3 {
        self.bodies.iter().map(Body::linear_momentum).sum()
    }

    pub fn kinetic_energy(&self) -> Scalar {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /* ---------- Step ---------- */
    /// Advance the whole scene by `dt` seconds.
    pub fn step(&mut self, dt: Scalar) -> StepStats {
        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "skipping step with non-positive or non-finite dt");
            return StepStats::default();
        }
        self.schedule.clear();
        self.tick = self.tick.wrapping_add(1);
        let _span = debug_span!("step", tick = self.tick, dt).entered();

        // Gravity as an impulse, before any TOI is computed
        self.schedule.push(StepStage::Gravity);
        let g = self.config.gravity_vec();
        for body in self.bodies.iter_mut() {
            if body.has_infinite_mass() { continue; }
            body.apply_impulse_linear(g * body.mass() * dt);
        }

        self.schedule.push(StepStage::Broadphase);
        let pairs = self.broadphase.find_pairs(self.bodies.as_slice(), dt);

        // Narrowphase
        self.schedule.push(StepStage::Narrowphase);
        let mut contacts = std::mem::take(&mut self.contacts);
        contacts.clear();
        contacts.reserve(pairs.len());
        let mut pairs_tested = 0u32;
        for (i, j) in pairs {
            let (ia, ib) = (BodyId(i as u32), BodyId(j as u32));
            let Some((a, b)) = self.bodies.pair_mut(ia, ib) else { continue };
            if a.has_infinite_mass() && b.has_infinite_mass() { continue; }
            pairs_tested += 1;
            if let Some(c) = intersect_dynamic(ia, a, ib, b, dt) {
                contacts.push(c);
            }
        }

        self.schedule.push(StepStage::SortContacts);
        sort_contacts(&mut contacts, self.config.tie_break);

        // March every body from contact to contact
        self.schedule.push(StepStage::March);
        let mut accumulated = 0.0;
        for c in &contacts {
            self.bodies.update_all(c.toi - accumulated);
            if let Some((a, b)) = self.bodies.pair_mut(c.body_a, c.body_b) {
                resolve_contact(a, b, c);
            }
            debug!(a = c.body_a.0, b = c.body_b.0, toi = c.toi, separation = c.separation, "contact");
            accumulated = c.toi;
        }

        self.schedule.push(StepStage::Remainder);
        self.bodies.update_all(dt - accumulated);

        let stats = StepStats { pairs_tested, contacts: contacts.len() as u32 };
        contacts.clear();
        self.contacts = contacts;
        trace!(pairs = stats.pairs_tested, contacts = stats.contacts, "step done");
        stats
    }

    pub fn step_hash(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        h.update_bytes(&self.tick.to_le_bytes());
        h.update_bytes(&self.schedule.digest());
        for id in self.bodies.ids() {
            let Some(b) = self.bodies.get(id) else { continue };
            h.update_bytes(&id.0.to_le_bytes());
            hash_vec3(&mut h, &b.position);
            hash_quat(&mut h, &b.orientation);
            hash_vec3(&mut h, &b.linear_velocity);
            hash_vec3(&mut h, &b.angular_velocity);
            hash_f32(&mut h, b.inv_mass);
        }
        h.finalize()
    }
}

impl Default for Scene {
    fn default() -> Self { Self::new(SceneConfig::default()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impactphys_core::vec3;

    fn contact(a: u32, b: u32, toi: f32) -> Contact {
        Contact {
            body_a: BodyId(a),
            body_b: BodyId(b),
            world_point_a: Vec3::ZERO,
            world_point_b: Vec3::ZERO,
            local_point_a: Vec3::ZERO,
            local_point_b: Vec3::ZERO,
            normal: Vec3::X,
            separation: 0.0,
            toi,
        }
    }

    #[test]
    fn contacts_sort_by_toi_then_body_pair() {
        let mut cs = vec![contact(3, 4, 0.5), contact(1, 2, 0.1), contact(0, 5, 0.5), contact(0, 2, 0.5)];
        sort_contacts(&mut cs, TieBreak::BodyPair);
        let keys: Vec<_> = cs.iter().map(|c| (c.body_a.0, c.body_b.0)).collect();
        assert_eq!(keys, vec![(1, 2), (0, 2), (0, 5), (3, 4)]);
    }

    #[test]
    fn unordered_tie_break_still_sorts_by_toi() {
        let mut cs = vec![contact(3, 4, 0.5), contact(1, 2, 0.1), contact(0, 5, 0.3)];
        sort_contacts(&mut cs, TieBreak::None);
        assert!(cs.windows(2).all(|w| w[0].toi <= w[1].toi));
    }

    #[test]
    fn builder_applies_capacity_config_and_broadphase() {
        let cfg = SceneConfig::default().zero_gravity();
        let mut scene = SceneBuilder::new().with_capacity(4).with_config(cfg).with_broadphase(AllPairs).build();
        assert_eq!(scene.config().gravity, [0.0; 3]);
        let a = scene.add_body(Body::new(vec3(0.0, 0.0, 0.0), impactphys_geom::Shape::sphere(1.0)));
        assert_eq!(a, BodyId(0));
        assert_eq!(scene.num_bodies(), 1);
    }

    #[test]
    fn scratch_buffer_is_empty_between_ticks() {
        let mut scene = Scene::new(SceneConfig::default().zero_gravity());
        scene.add_body(Body::new(vec3(-3.0, 0.0, 0.0), impactphys_geom::Shape::sphere(0.5))
            .with_inv_mass(1.0)
            .with_linear_velocity(vec3(1000.0, 0.0, 0.0)));
        scene.add_body(Body::new(vec3(0.0, 0.0, 0.0), impactphys_geom::Shape::sphere(0.5)));
        let stats = scene.step(1.0 / 60.0);
        assert_eq!(stats.contacts, 1);
        assert!(scene.contacts.is_empty());
        assert!(scene.contacts.capacity() >= 1);
    }

    #[test]
    fn schedule_records_every_stage_in_order() {
        let mut scene = Scene::default();
        scene.step(0.01);
        assert_eq!(scene.schedule.stages(), &[
            StepStage::Gravity,
            StepStage::Broadphase,
            StepStage::Narrowphase,
            StepStage::SortContacts,
            StepStage::March,
            StepStage::Remainder,
        ]);
    }
}
