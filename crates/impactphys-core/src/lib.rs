pub mod scalar;
pub mod ids;
pub mod types;
pub mod hash;
pub mod time;
pub mod schedule;
pub mod config;

pub use scalar::Scalar;
pub use ids::BodyId;
pub use types::{Vec3, Mat3, Isometry, vec3, iso, quat_identity};
pub use hash::{StepHasher, hash_f32, hash_vec3, hash_quat, hex32};
pub use time::StepStats;
pub use schedule::{StepStage, ScheduleRecorder, schedule_digest};
pub use config::{SceneConfig, TieBreak, BroadphaseKind};
pub use glam::Quat;
