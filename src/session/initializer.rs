//! Building the working copy for a new session.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{Workout, WorkoutExercise, WorkoutSet};
use crate::session::edits::DEFAULT_REPS;

/// Start a session from `source`, using `history` to pre-fill numbers.
///
/// * A `source` that already carries progress is resumed: values and
///   completion marks are kept.
/// * Otherwise the most recent logged workout with the same name that has
///   progress supplies reps and weights, with every set left uncompleted.
/// * Without such a workout the session is built from `source` itself, with
///   reps defaulting to 10 and no weight.
///
/// The result always has fresh identities and the current date.
pub fn begin_session(source: &Workout, history: &[Workout]) -> Workout {
    begin_session_at(source, history, Utc::now(), DEFAULT_REPS)
}

pub fn begin_session_at(
    source: &Workout,
    history: &[Workout],
    now: DateTime<Utc>,
    default_reps: u32,
) -> Workout {
    if source.has_progress() {
        log::info!("Resuming {} from its logged state", source.name);
        return copy_workout(source, now, |set| set.clone());
    }

    if let Some(recent) = most_recent_with_progress(source, history) {
        log::info!(
            "Starting {} with numbers from session of {}",
            source.name,
            recent.date.format("%Y-%m-%d")
        );
        return copy_workout(recent, now, |set| WorkoutSet {
            reps: set.reps.or(Some(default_reps)),
            is_completed: false,
            ..set.clone()
        });
    }

    log::info!("Starting {} from its template", source.name);
    copy_workout(source, now, |set| WorkoutSet {
        reps: set.reps.filter(|r| *r > 0).or(Some(default_reps)),
        weight: None,
        is_completed: false,
        ..set.clone()
    })
}

/// Latest logged (non-template) workout named like `source` that shows
/// progress.
pub fn most_recent_with_progress<'a>(source: &Workout, history: &'a [Workout]) -> Option<&'a Workout> {
    history
        .iter()
        .filter(|w| !w.is_template && w.id != source.id && w.name == source.name)
        .filter(|w| w.has_progress())
        .max_by_key(|w| w.date)
}

/// Copy the structure of `workout` with new identities throughout, mapping
/// each set through `map_set`.
fn copy_workout<F>(workout: &Workout, now: DateTime<Utc>, map_set: F) -> Workout
where
    F: Fn(&WorkoutSet) -> WorkoutSet,
{
    let exercises = workout
        .exercises
        .iter()
        .map(|exercise| WorkoutExercise {
            id: Uuid::new_v4(),
            sets: exercise
                .sets
                .iter()
                .map(|set| WorkoutSet {
                    id: Uuid::new_v4(),
                    ..map_set(set)
                })
                .collect(),
            ..exercise.clone()
        })
        .collect();
    Workout {
        id: Uuid::new_v4(),
        name: workout.name.clone(),
        exercises,
        date: now,
        duration: None,
        notes: workout.notes.clone(),
        is_template: false,
    }
}
