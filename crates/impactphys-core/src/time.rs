/// Per-tick counters returned by `Scene::step`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Broadphase pairs that survived the infinite-mass filter.
    pub pairs_tested: u32,
    /// Contacts produced by the narrowphase and resolved this tick.
    pub contacts: u32,
}
