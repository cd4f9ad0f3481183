use serde::{Deserialize, Serialize};
use crate::types::Vec3;

/// How contacts with equal time of impact are ordered before marching.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Stable sort, equal TOIs ordered by `(body_a, body_b)`.
    #[default]
    BodyPair,
    /// Unstable sort on TOI only; simultaneous contacts come out in any order.
    None,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadphaseKind {
    #[default]
    SweepAndPrune,
    AllPairs,
}

/// Scene-wide tunables. Defaults match the z-up demo scene.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// World gravity in m/s^2.
    pub gravity: [f32; 3],
    pub tie_break: TieBreak,
    pub broadphase: BroadphaseKind,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, -10.0],
            tie_break: TieBreak::BodyPair,
            broadphase: BroadphaseKind::SweepAndPrune,
        }
    }
}

impl SceneConfig {
    #[inline] pub fn gravity_vec(&self) -> Vec3 { Vec3::from_array(self.gravity) }

    pub fn zero_gravity(mut self) -> Self {
        self.gravity = [0.0; 3];
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: SceneConfig = serde_json::from_str(r#"{ "tie_break": "none" }"#).unwrap();
        assert_eq!(cfg.tie_break, TieBreak::None);
        assert_eq!(cfg.gravity, [0.0, 0.0, -10.0]);
        assert_eq!(cfg.broadphase, BroadphaseKind::SweepAndPrune);
    }

    #[test]
    fn zero_gravity_keeps_other_fields() {
        let cfg = SceneConfig { broadphase: BroadphaseKind::AllPairs, ..SceneConfig::default() }.zero_gravity();
        assert_eq!(cfg.gravity_vec(), Vec3::ZERO);
        assert_eq!(cfg.broadphase, BroadphaseKind::AllPairs);
    }
}
