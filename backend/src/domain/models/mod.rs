pub mod judge_decision;
pub mod profile;
pub mod stamp;

pub use judge_decision::JudgeDecision;
pub use profile::{Profile, DEFAULT_PROFILE_NAME, DEFAULT_TARGET_STAMPS};
pub use stamp::Stamp;
