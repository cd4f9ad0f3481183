use crate::StepHasher;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepStage {
    Gravity = 1,
    Broadphase = 2,
    Narrowphase = 3,
    SortContacts = 4,
    March = 5,
    Remainder = 6,
}

pub fn schedule_digest(stages: &[StepStage]) -> [u8; 32] {
    let mut h = StepHasher::new();
    for s in stages { h.update_bytes(&[*s as u8]); }
    h.finalize()
}

/// Records the stages a tick actually ran, in order.
#[derive(Default, Debug)]
pub struct ScheduleRecorder { stages: Vec<StepStage> }

impl ScheduleRecorder {
    pub fn new() -> Self { Self { stages: Vec::new() } }
    pub fn push(&mut self, s: StepStage) { self.stages.push(s); }
    pub fn clear(&mut self) { self.stages.clear(); }
    pub fn stages(&self) -> &[StepStage] { &self.stages }
    pub fn digest(&self) -> [u8; 32] { schedule_digest(&self.stages) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_depends_on_stage_order() {
        let a = schedule_digest(&[StepStage::Gravity, StepStage::Broadphase]);
        let b = schedule_digest(&[StepStage::Broadphase, StepStage::Gravity]);
        assert_ne!(a, b);
        assert_eq!(a, schedule_digest(&[StepStage::Gravity, StepStage::Broadphase]));
    }

    #[test]
    fn recorder_clears() {
        let mut r = ScheduleRecorder::new();
        r.push(StepStage::March);
        assert_eq!(r.stages(), &[StepStage::March]);
        r.clear();
        assert!(r.stages().is_empty());
        assert_eq!(r.digest(), schedule_digest(&[]));
    }
}
