//! The progression ladder and stage classification.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LadderError;

use super::stats::Stats;

/// Embedded ladder shipped with the crate.
const EMBEDDED_STAGES_JSON: &str = include_str!("../data/stages.json");

/// Minimum statistics required to reach a stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCriteria {
    pub min_reflections: u32,
    pub min_moods: u32,
    pub min_streak_days: u32,
    pub min_deep_writes: u32,
}

impl StageCriteria {
    /// All four thresholds met, boundaries inclusive.
    pub fn is_satisfied_by(&self, stats: &Stats) -> bool {
        stats.total_reflections >= self.min_reflections
            && stats.unique_moods >= self.min_moods
            && stats.longest_streak >= self.min_streak_days
            && stats.deep_writes >= self.min_deep_writes
    }

    /// How far `stats` still is from each threshold.
    pub fn remaining(&self, stats: &Stats) -> StageGap {
        StageGap {
            reflections: self.min_reflections.saturating_sub(stats.total_reflections),
            moods: self.min_moods.saturating_sub(stats.unique_moods),
            streak_days: self.min_streak_days.saturating_sub(stats.longest_streak),
            deep_writes: self.min_deep_writes.saturating_sub(stats.deep_writes),
        }
    }
}

/// Per-dimension shortfall towards a stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageGap {
    pub reflections: u32,
    pub moods: u32,
    pub streak_days: u32,
    pub deep_writes: u32,
}

impl StageGap {
    /// Nothing left to do.
    pub fn is_met(&self) -> bool {
        *self == Self::default()
    }
}

/// Decorative intensity values for a stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualRewards {
    pub fireflies: u32,
    pub glow_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRewards {
    pub badge: String,
    pub message: String,
    pub visual: VisualRewards,
}

/// One tier of the progression ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionStage {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub meaning: String,
    pub criteria: StageCriteria,
    pub rewards: StageRewards,
}

/// A threshold that drops compared to the stage before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonotonicityViolation {
    pub stage_id: String,
    pub previous_stage_id: String,
    pub dimension: &'static str,
    pub threshold: u32,
    pub previous_threshold: u32,
}

impl std::fmt::Display for MonotonicityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "stage '{}' requires {} {} but '{}' before it requires {}",
            self.stage_id, self.threshold, self.dimension, self.previous_stage_id, self.previous_threshold
        )
    }
}

/// Ordered, non-empty sequence of stages from lowest to highest.
#[derive(Debug, Clone)]
pub struct ProgressionLadder {
    stages: Vec<ProgressionStage>,
}

impl ProgressionLadder {
    /// Build a ladder from ordered stages.
    ///
    /// Thresholds that decrease from one stage to the next are logged but
    /// kept as given; see [`monotonicity_violations`](Self::monotonicity_violations).
    pub fn new(stages: Vec<ProgressionStage>) -> Result<Self, LadderError> {
        if stages.is_empty() {
            return Err(LadderError::Empty);
        }
        let ladder = Self { stages };
        for violation in ladder.monotonicity_violations() {
            log::warn!("Non-monotonic progression ladder: {}", violation);
        }
        Ok(ladder)
    }

    /// The embedded seven-stage ladder.
    pub fn builtin() -> Result<Self, LadderError> {
        Self::from_json(EMBEDDED_STAGES_JSON)
    }

    /// Load a ladder from a JSON file holding an array of stages.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LadderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LadderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a ladder from a JSON array of stages.
    pub fn from_json(json: &str) -> Result<Self, LadderError> {
        let stages: Vec<ProgressionStage> = serde_json::from_str(json)?;
        Self::new(stages)
    }

    pub fn stages(&self) -> &[ProgressionStage] {
        &self.stages
    }

    /// The first stage, used as the fallback.
    pub fn lowest(&self) -> &ProgressionStage {
        &self.stages[0]
    }

    pub fn highest(&self) -> &ProgressionStage {
        &self.stages[self.stages.len() - 1]
    }

    pub fn get(&self, id: &str) -> Option<&ProgressionStage> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// The stage after `id`, if any.
    pub fn next_stage(&self, id: &str) -> Option<&ProgressionStage> {
        let index = self.stages.iter().position(|s| s.id == id)?;
        self.stages.get(index + 1)
    }

    /// Highest stage whose criteria `stats` satisfies.
    pub fn determine_stage(&self, stats: &Stats) -> &ProgressionStage {
        determine_stage(stats, self)
    }

    /// What `stats` still lacks to reach `stage`, per dimension.
    ///
    /// Pair with [`next_stage`](Self::next_stage) to show what comes next.
    pub fn progress_towards(&self, stats: &Stats, stage: &ProgressionStage) -> StageGap {
        stage.criteria.remaining(stats)
    }

    /// Every dimension in which a stage asks for less than its predecessor.
    pub fn monotonicity_violations(&self) -> Vec<MonotonicityViolation> {
        let mut violations = Vec::new();
        for pair in self.stages.windows(2) {
            let (prev, stage) = (&pair[0], &pair[1]);
            let dimensions = [
                ("reflections", stage.criteria.min_reflections, prev.criteria.min_reflections),
                ("moods", stage.criteria.min_moods, prev.criteria.min_moods),
                ("streak days", stage.criteria.min_streak_days, prev.criteria.min_streak_days),
                ("deep writes", stage.criteria.min_deep_writes, prev.criteria.min_deep_writes),
            ];
            for (dimension, threshold, previous_threshold) in dimensions {
                if threshold < previous_threshold {
                    violations.push(MonotonicityViolation {
                        stage_id: stage.id.clone(),
                        previous_stage_id: prev.id.clone(),
                        dimension,
                        threshold,
                        previous_threshold,
                    });
                }
            }
        }
        violations
    }
}

/// Scan `ladder` from the top and return the first stage whose criteria
/// are all met, falling back to the lowest stage.
///
/// This is a best-qualifying scan: several stages can be skipped at once.
/// A [`ProgressionLadder`] is never empty, so there is always an answer.
pub fn determine_stage<'a>(stats: &Stats, ladder: &'a ProgressionLadder) -> &'a ProgressionStage {
    ladder
        .stages()
        .iter()
        .rev()
        .find(|stage| stage.criteria.is_satisfied_by(stats))
        .unwrap_or_else(|| ladder.lowest())
}
