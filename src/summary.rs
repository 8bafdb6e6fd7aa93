// Totals for a single workout
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Workout;

/// Summary of one workout, as reported when a session ends.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub exercises: usize,
    pub total_sets: usize,
    pub completed_sets: usize,
    pub total_reps: u32,
    pub total_volume: f64,
    pub duration: Option<u64>,
}

/// Count sets, reps and volume of `workout`.
///
/// Reps and volume only include completed sets. Volume is weight times reps
/// in kilograms.
pub fn summarize(workout: &Workout) -> WorkoutSummary {
    let mut summary = WorkoutSummary {
        exercises: workout.exercises.len(),
        duration: workout.duration,
        ..WorkoutSummary::default()
    };
    for set in workout.exercises.iter().flat_map(|e| e.sets.iter()) {
        summary.total_sets += 1;
        if set.is_completed {
            summary.completed_sets += 1;
            summary.total_reps += set.reps.unwrap_or(0);
            summary.total_volume += set.volume();
        }
    }
    summary
}

/// `m:ss`, or `h:mm:ss` from one hour.
pub fn format_duration(seconds: u64) -> String {
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

impl fmt::Display for WorkoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} exercises, {}/{} sets, {} reps, {:.1} kg",
            self.exercises, self.completed_sets, self.total_sets, self.total_reps, self.total_volume
        )?;
        if let Some(d) = self.duration {
            write!(f, " in {}", format_duration(d))?;
        }
        Ok(())
    }
}
