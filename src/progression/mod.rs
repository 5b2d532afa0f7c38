//! Progression: statistics over reflections, the stage ladder, and
//! stage-change detection.

pub mod engine;
pub mod stage;
pub mod stats;

pub use engine::{Evaluation, ProgressionEngine};
pub use stage::{
    determine_stage, ProgressionLadder, ProgressionStage, StageCriteria, StageGap, StageRewards,
    VisualRewards,
};
pub use stats::{compute_stats, compute_stats_in, Stats, DEEP_WRITE_THRESHOLD};
