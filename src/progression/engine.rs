//! Stage-change detection over a reflection history.

use std::sync::Arc;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::reflections::ReflectionRecord;

use super::stage::{ProgressionLadder, ProgressionStage};
use super::stats::{compute_stats_in, Stats};

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub stage: ProgressionStage,
    pub stats: Stats,
    /// The stage differs from the one observed by the previous evaluation.
    pub changed: bool,
}

/// Recomputes the user's stage and remembers the last one observed.
///
/// The previously observed stage id is the only mutable state of the
/// progression core and is owned here. What to do with a change (a toast,
/// an animation) is up to the caller.
#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    ladder: Arc<ProgressionLadder>,
    previous_stage_id: String,
}

impl ProgressionEngine {
    /// Start at the lowest stage of `ladder`.
    pub fn new(ladder: Arc<ProgressionLadder>) -> Self {
        let previous_stage_id = ladder.lowest().id.clone();
        Self {
            ladder,
            previous_stage_id,
        }
    }

    pub fn ladder(&self) -> &ProgressionLadder {
        &self.ladder
    }

    /// The stage recorded by the last evaluation.
    pub fn current_stage(&self) -> &ProgressionStage {
        self.ladder
            .get(&self.previous_stage_id)
            .unwrap_or_else(|| self.ladder.lowest())
    }

    /// Evaluate `history` using local calendar days for streaks.
    pub fn evaluate(&mut self, history: &[ReflectionRecord]) -> Evaluation {
        self.evaluate_in(history, &Local)
    }

    /// Evaluate `history`, bucketing streak days in `tz`.
    pub fn evaluate_in<Tz: TimeZone>(&mut self, history: &[ReflectionRecord], tz: &Tz) -> Evaluation {
        let stats = compute_stats_in(history, tz);
        let stage = self.ladder.determine_stage(&stats).clone();

        let changed = stage.id != self.previous_stage_id;
        if changed {
            log::debug!(
                "Progression stage changed: {} -> {}",
                self.previous_stage_id,
                stage.id
            );
            self.previous_stage_id = stage.id.clone();
        } else if stats.total_reflections == 0 {
            self.previous_stage_id = self.ladder.lowest().id.clone();
        }

        Evaluation {
            stage,
            stats,
            changed,
        }
    }

    /// Forget the observed stage, e.g. when the signed-in user changes.
    pub fn reset(&mut self) {
        self.previous_stage_id = self.ladder.lowest().id.clone();
    }
}
