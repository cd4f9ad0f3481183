use impactphys_core::Scalar;
use impactphys_dynamics::Body;
use impactphys_geom::{Aabb, swept_aabb};

/// Slack added to every swept box so touching spheres are never pruned.
const SWEEP_MARGIN: f32 = 1.0e-3;

/// Candidate pair source for the narrowphase.
///
/// Must report every pair whose swept volumes can meet within `[0, dt]`;
/// extra pairs are fine. Pairs come back as `(i, j)` with `i < j`, sorted and unique.
pub trait Broadphase {
    fn find_pairs(&self, bodies: &[Body], dt: Scalar) -> Vec<(usize, usize)>;
}

/// Swept AABBs pruned with a 1D sort-and-sweep along X.
#[derive(Copy, Clone, Debug, Default)]
pub struct SweepAndPrune;

impl Broadphase for SweepAndPrune {
    fn find_pairs(&self, bodies: &[Body], dt: Scalar) -> Vec<(usize, usize)> {
        let aabbs: Vec<Aabb> = bodies.iter().map(|b| {
            let mut bb = swept_aabb(&b.shape, &b.pose(), b.effective_linear_velocity() * dt);
            bb.expand_by(SWEEP_MARGIN);
            bb
        }).collect();
        pairs_sap(&aabbs)
    }
}

/// Every `i < j` pair; no pruning at all.
#[derive(Copy, Clone, Debug, Default)]
pub struct AllPairs;

impl Broadphase for AllPairs {
    fn find_pairs(&self, bodies: &[Body], _dt: Scalar) -> Vec<(usize, usize)> {
        let n = bodies.len();
        let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                out.push((i, j));
            }
        }
        out
    }
}

/// Deterministic 1D SAP along X with full AABB overlap, NaN-safe and stable.
pub fn pairs_sap(aabbs: &[Aabb]) -> Vec<(usize, usize)> {
    #[derive(Copy, Clone)]
    struct Elem { min: f32, max: f32, idx: usize }

    // non-finite boxes never pair
    let mut elems: Vec<Elem> = Vec::with_capacity(aabbs.len());
    for (i, a) in aabbs.iter().enumerate() {
        if !a.is_finite() { continue; }
        let (mut mn, mut mx) = (a.min.x, a.max.x);
        if mn > mx { core::mem::swap(&mut mn, &mut mx); }
        elems.push(Elem { min: mn, max: mx, idx: i });
    }

    elems.sort_by(|a, b| a.min.total_cmp(&b.min).then(a.idx.cmp(&b.idx)));

    let mut active: Vec<Elem> = Vec::new();
    let mut out: Vec<(usize, usize)> = Vec::new();

    for e in elems {
        active.retain(|o| o.max >= e.min);
        for o in &active {
            let (i, k) = if o.idx < e.idx { (o.idx, e.idx) } else { (e.idx, o.idx) };
            if aabbs[i].overlaps(&aabbs[k]) { out.push((i, k)); }
        }
        active.push(e);
    }

    out.sort_unstable();
    out
}
