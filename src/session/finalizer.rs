//! Recording a finished session.
//!
//! Value edits (weights, reps, completion marks) are what a session is for,
//! so they are committed without asking. Adding or removing exercises or
//! changing a set count is structural and asks the caller what to do.

use std::collections::HashSet;

use uuid::Uuid;

use crate::model::{Workout, WorkoutSet};
use crate::persistence::Persistence;
use crate::store::SessionStore;
use crate::summary::summarize;

/// Structural differences between a finished session and the workout it
/// is reconciled against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// `current` exercise count minus `original` exercise count.
    pub exercise_delta: isize,
    /// The ordered list of catalog exercises differs.
    pub exercises_changed: bool,
    /// Some exercise at the same position has a different number of sets.
    pub set_counts_changed: bool,
    /// Names of exercises present only in `current`.
    pub added_exercises: Vec<String>,
    /// Names of exercises present only in `original`.
    pub removed_exercises: Vec<String>,
}

impl ChangeSet {
    /// Exercises are identified by their catalog entry, which every copy of
    /// a workout keeps.
    pub fn between(current: &Workout, original: &Workout) -> Self {
        let current_ids: Vec<Uuid> = current.exercises.iter().map(|e| e.exercise.id).collect();
        let original_ids: Vec<Uuid> = original.exercises.iter().map(|e| e.exercise.id).collect();

        let set_counts_changed = current
            .exercises
            .iter()
            .zip(&original.exercises)
            .any(|(c, o)| c.sets.len() != o.sets.len());

        let in_current: HashSet<Uuid> = current_ids.iter().copied().collect();
        let in_original: HashSet<Uuid> = original_ids.iter().copied().collect();

        Self {
            exercise_delta: current.exercises.len() as isize - original.exercises.len() as isize,
            exercises_changed: current_ids != original_ids,
            set_counts_changed,
            added_exercises: current
                .exercises
                .iter()
                .filter(|e| !in_original.contains(&e.exercise.id))
                .map(|e| e.exercise.name.clone())
                .collect(),
            removed_exercises: original
                .exercises
                .iter()
                .filter(|e| !in_current.contains(&e.exercise.id))
                .map(|e| e.exercise.name.clone())
                .collect(),
        }
    }

    pub fn is_structural(&self) -> bool {
        self.exercise_delta != 0 || self.exercises_changed || self.set_counts_changed
    }
}

/// How a commit reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// The original entry was overwritten in place.
    Updated,
    /// The session was added as a new entry.
    Appended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    Committed(CommitKind),
    /// Nothing was written; the caller must pick a [`FinalizeDecision`].
    NeedsDecision(ChangeSet),
}

/// Answer to a structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeDecision {
    /// Record the session as edited and carry its layout into routines.
    UpdateRoutine,
    /// Record the original layout under the session's name.
    KeepOriginal,
    /// Record nothing and return to editing.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Committed(CommitKind),
    KeptOriginal(CommitKind),
    Cancelled,
}

/// Commit `current` when it only differs from `original` by values,
/// otherwise report the change set and leave the store untouched.
pub fn finalize<P: Persistence>(
    current: &Workout,
    original: &Workout,
    store: &mut SessionStore<P>,
) -> FinalizeOutcome {
    let changes = ChangeSet::between(current, original);
    if changes.is_structural() {
        log::info!(
            "{} changed structure (delta {}, added {:?}, removed {:?})",
            current.name,
            changes.exercise_delta,
            changes.added_exercises,
            changes.removed_exercises
        );
        return FinalizeOutcome::NeedsDecision(changes);
    }
    FinalizeOutcome::Committed(commit(current, original, store))
}

/// Apply the caller's answer to a structural change.
pub fn resolve<P: Persistence>(
    decision: FinalizeDecision,
    current: &Workout,
    original: &Workout,
    store: &mut SessionStore<P>,
) -> Resolution {
    match decision {
        FinalizeDecision::UpdateRoutine => {
            let kind = commit(current, original, store);
            // Routine days hold their own copy of the template, so beyond the
            // original's id they are matched by workout name. A same-named
            // day in another routine is rewritten as well.
            store.update_routine_workouts(
                |day| day.id == original.id || day.name == original.name,
                |day| routine_layout(current, day),
            );
            Resolution::Committed(kind)
        }
        FinalizeDecision::KeepOriginal => {
            let kept = Workout {
                name: current.name.clone(),
                ..original.clone()
            };
            log::info!("Keeping the original layout of {}", kept.name);
            Resolution::KeptOriginal(commit(&kept, original, store))
        }
        FinalizeDecision::Cancel => {
            log::info!("Finalizing {} cancelled", current.name);
            Resolution::Cancelled
        }
    }
}

fn commit<P: Persistence>(
    workout: &Workout,
    original: &Workout,
    store: &mut SessionStore<P>,
) -> CommitKind {
    let kind = if store.update_workout_fields(original.id, workout) {
        CommitKind::Updated
    } else {
        store.save_workout(workout.clone());
        CommitKind::Appended
    };
    store.clear_current();
    log::info!("Recorded {} ({:?}): {}", workout.name, kind, summarize(workout));
    kind
}

/// The exercises of `session` laid out as a plan inside the routine day's
/// existing workout: same sets, no logged values.
fn routine_layout(session: &Workout, day: &Workout) -> Workout {
    let mut exercises = session.exercises.clone();
    for exercise in &mut exercises {
        for set in &mut exercise.sets {
            *set = WorkoutSet::new(set.order);
        }
    }
    Workout {
        exercises,
        ..day.clone()
    }
}
