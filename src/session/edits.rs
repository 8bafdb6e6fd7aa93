//! Edits applied to the working copy of a workout.
//!
//! Every function takes the current workout and returns the next one; the
//! input is never modified. An unknown exercise id, an index out of range
//! or an edit that would break an invariant yields an unchanged copy.

use uuid::Uuid;

use crate::model::{Exercise, Workout, WorkoutExercise, WorkoutSet};

/// Reps pre-filled on sets created during a session.
pub const DEFAULT_REPS: u32 = 10;

/// Copy `workout`, replacing the exercise `exercise_id` with the result of
/// `f`. `f` returning `None` means "no change".
fn map_exercise<F>(workout: &Workout, exercise_id: Uuid, f: F) -> Workout
where
    F: FnOnce(&WorkoutExercise) -> Option<WorkoutExercise>,
{
    let Some(index) = workout.exercise_index(exercise_id) else {
        return workout.clone();
    };
    let Some(updated) = f(&workout.exercises[index]) else {
        return workout.clone();
    };
    let mut next = workout.clone();
    next.exercises[index] = updated;
    next
}

/// Copy `workout`, replacing one set of `exercise_id` with the result of `f`.
fn map_set<F>(workout: &Workout, exercise_id: Uuid, set_index: usize, f: F) -> Workout
where
    F: FnOnce(&WorkoutSet) -> Option<WorkoutSet>,
{
    map_exercise(workout, exercise_id, |exercise| {
        let set = exercise.sets.get(set_index)?;
        let updated = f(set)?;
        let mut sets = exercise.sets.clone();
        sets[set_index] = updated;
        Some(WorkoutExercise {
            sets,
            ..exercise.clone()
        })
    })
}

fn renumber_sets(sets: &mut [WorkoutSet]) {
    for (i, set) in sets.iter_mut().enumerate() {
        set.order = i + 1;
    }
}

fn renumber_exercises(exercises: &mut [WorkoutExercise]) {
    for (i, exercise) in exercises.iter_mut().enumerate() {
        exercise.order = i;
    }
}

fn valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}

/// Mark the set at `set_index` completed.
pub fn complete_set(workout: &Workout, exercise_id: Uuid, set_index: usize) -> Workout {
    map_set(workout, exercise_id, set_index, |set| {
        Some(WorkoutSet {
            is_completed: true,
            ..set.clone()
        })
    })
}

/// Store weight and reps for a set. Entering numbers counts as doing the
/// set, so the set is marked completed as well.
pub fn edit_set(
    workout: &Workout,
    exercise_id: Uuid,
    set_index: usize,
    weight: f64,
    reps: u32,
) -> Workout {
    if !valid_weight(weight) {
        return workout.clone();
    }
    map_set(workout, exercise_id, set_index, |set| {
        Some(WorkoutSet {
            weight: Some(weight),
            reps: Some(reps),
            is_completed: true,
            ..set.clone()
        })
    })
}

/// Store weight and reps, then derive completion from the values: the set
/// is completed only when both are positive.
pub fn edit_set_values(
    workout: &Workout,
    exercise_id: Uuid,
    set_index: usize,
    weight: f64,
    reps: u32,
) -> Workout {
    if !valid_weight(weight) {
        return workout.clone();
    }
    map_set(workout, exercise_id, set_index, |set| {
        let mut next = WorkoutSet {
            weight: Some(weight),
            reps: Some(reps),
            ..set.clone()
        };
        next.is_completed = next.is_filled();
        Some(next)
    })
}

/// Flip the completion mark. Used by the guided one-set-at-a-time flow.
pub fn toggle_set_completion(workout: &Workout, exercise_id: Uuid, set_index: usize) -> Workout {
    map_set(workout, exercise_id, set_index, |set| {
        Some(WorkoutSet {
            is_completed: !set.is_completed,
            ..set.clone()
        })
    })
}

/// Re-derive the completion mark from the entered values
/// (`weight > 0 && reps > 0`). Used by the table flow, where tapping the
/// checkmark of an empty set must not mark it done.
pub fn recompute_set_completion(workout: &Workout, exercise_id: Uuid, set_index: usize) -> Workout {
    map_set(workout, exercise_id, set_index, |set| {
        Some(WorkoutSet {
            is_completed: set.is_filled(),
            ..set.clone()
        })
    })
}

/// Append a set with default reps and no weight.
pub fn add_set(workout: &Workout, exercise_id: Uuid) -> Workout {
    add_set_with_reps(workout, exercise_id, DEFAULT_REPS)
}

pub fn add_set_with_reps(workout: &Workout, exercise_id: Uuid, reps: u32) -> Workout {
    map_exercise(workout, exercise_id, |exercise| {
        let mut sets = exercise.sets.clone();
        sets.push(WorkoutSet::planned(sets.len() + 1, reps));
        Some(WorkoutExercise {
            sets,
            ..exercise.clone()
        })
    })
}

/// Remove a set and renumber the rest. The last remaining set of an
/// exercise is never removed.
pub fn delete_set(workout: &Workout, exercise_id: Uuid, set_index: usize) -> Workout {
    map_exercise(workout, exercise_id, |exercise| {
        if exercise.sets.len() <= 1 || set_index >= exercise.sets.len() {
            return None;
        }
        let mut sets = exercise.sets.clone();
        sets.remove(set_index);
        renumber_sets(&mut sets);
        Some(WorkoutExercise {
            sets,
            ..exercise.clone()
        })
    })
}

/// Append one exercise per entry, each with a single default set.
pub fn add_exercises(workout: &Workout, exercises: &[Exercise]) -> Workout {
    add_exercises_with_reps(workout, exercises, DEFAULT_REPS)
}

pub fn add_exercises_with_reps(workout: &Workout, exercises: &[Exercise], reps: u32) -> Workout {
    let mut next = workout.clone();
    let start = next.exercises.len();
    next.exercises.extend(exercises.iter().enumerate().map(|(i, exercise)| {
        WorkoutExercise::new(exercise.clone(), vec![WorkoutSet::planned(1, reps)], start + i)
    }));
    next
}

pub fn delete_exercise(workout: &Workout, index: usize) -> Workout {
    let mut next = workout.clone();
    if index < next.exercises.len() {
        next.exercises.remove(index);
    }
    next
}

/// Swap the exercise at `index` with the following one. No-op for the last
/// exercise.
pub fn reorder_exercises(workout: &Workout, index: usize) -> Workout {
    let mut next = workout.clone();
    if index < next.exercises.len().saturating_sub(1) {
        next.exercises.swap(index, index + 1);
    }
    next
}

/// Move an exercise one place up and renumber every exercise's `order`.
pub fn move_exercise_up(workout: &Workout, index: usize) -> Workout {
    if index == 0 || index >= workout.exercises.len() {
        return workout.clone();
    }
    let mut next = workout.clone();
    next.exercises.swap(index - 1, index);
    renumber_exercises(&mut next.exercises);
    next
}

/// Move an exercise one place down and renumber every exercise's `order`.
pub fn move_exercise_down(workout: &Workout, index: usize) -> Workout {
    if index >= workout.exercises.len().saturating_sub(1) {
        return workout.clone();
    }
    let mut next = workout.clone();
    next.exercises.swap(index, index + 1);
    renumber_exercises(&mut next.exercises);
    next
}

/// Swap the catalog entry of the exercise at `index`, keeping its sets.
pub fn replace_exercise(workout: &Workout, index: usize, exercise: &Exercise) -> Workout {
    let mut next = workout.clone();
    if let Some(slot) = next.exercises.get_mut(index) {
        slot.exercise = exercise.clone();
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExerciseCatalog;

    fn orders(workout: &Workout, exercise: usize) -> Vec<usize> {
        workout.exercises[exercise].sets.iter().map(|s| s.order).collect()
    }

    fn push_day() -> Workout {
        let catalog = ExerciseCatalog::seeded();
        let bench = catalog.find_by_name("Bench Press").unwrap().clone();
        let fly = catalog.find_by_name("Chest Fly").unwrap().clone();
        Workout::new(
            "Push Day",
            vec![
                WorkoutExercise::new(
                    bench,
                    (1..=3).map(|o| WorkoutSet::planned(o, 10)).collect(),
                    0,
                ),
                WorkoutExercise::new(fly, vec![WorkoutSet::planned(1, 12)], 1),
            ],
        )
    }

    #[test]
    fn edit_set_marks_completed() {
        let w = push_day();
        let id = w.exercises[0].id;
        let next = edit_set(&w, id, 1, 60.0, 10);
        let set = &next.exercises[0].sets[1];
        assert_eq!(set.weight, Some(60.0));
        assert_eq!(set.reps, Some(10));
        assert!(set.is_completed);
        // input untouched
        assert!(!w.exercises[0].sets[1].is_completed);

        // already completed stays completed
        let again = edit_set(&next, id, 1, 62.5, 8);
        assert!(again.exercises[0].sets[1].is_completed);
        assert_eq!(again.exercises[0].sets[1].weight, Some(62.5));
    }

    #[test]
    fn edit_set_values_derives_completion() {
        let w = push_day();
        let id = w.exercises[0].id;
        let filled = edit_set_values(&w, id, 0, 50.0, 5);
        assert!(filled.exercises[0].sets[0].is_completed);
        let cleared = edit_set_values(&filled, id, 0, 0.0, 5);
        assert!(!cleared.exercises[0].sets[0].is_completed);
    }

    #[test]
    fn invalid_weight_is_ignored() {
        let w = push_day();
        let id = w.exercises[0].id;
        assert_eq!(edit_set(&w, id, 0, -5.0, 10), w);
        assert_eq!(edit_set(&w, id, 0, f64::NAN, 10), w);
        assert_eq!(edit_set_values(&w, id, 0, f64::INFINITY, 10), w);
    }

    #[test]
    fn toggle_and_recompute_differ_on_empty_set() {
        let w = push_day();
        let id = w.exercises[0].id;

        let toggled = toggle_set_completion(&w, id, 0);
        assert!(toggled.exercises[0].sets[0].is_completed);
        let toggled_back = toggle_set_completion(&toggled, id, 0);
        assert!(!toggled_back.exercises[0].sets[0].is_completed);

        // reps are pre-filled but no weight: not done
        let recomputed = recompute_set_completion(&w, id, 0);
        assert!(!recomputed.exercises[0].sets[0].is_completed);
        // a wrongly completed empty set is un-marked
        let recomputed = recompute_set_completion(&toggled, id, 0);
        assert!(!recomputed.exercises[0].sets[0].is_completed);

        let filled = edit_set(&w, id, 0, 40.0, 10);
        let recomputed = recompute_set_completion(&filled, id, 0);
        assert!(recomputed.exercises[0].sets[0].is_completed);
    }

    #[test]
    fn add_set_appends_default_set() {
        let w = push_day();
        let id = w.exercises[0].id;
        let next = add_set(&w, id);
        let added = next.exercises[0].sets.last().unwrap();
        assert_eq!(added.order, 4);
        assert_eq!(added.reps, Some(DEFAULT_REPS));
        assert_eq!(added.weight, None);
        assert!(!added.is_completed);
    }

    #[test]
    fn delete_set_renumbers() {
        let w = push_day();
        let id = w.exercises[0].id;
        let next = delete_set(&w, id, 0);
        assert_eq!(orders(&next, 0), vec![1, 2]);
        assert_eq!(next.exercises[0].sets[0].id, w.exercises[0].sets[1].id);
    }

    #[test]
    fn last_set_is_never_deleted() {
        let w = push_day();
        let id = w.exercises[1].id;
        let next = delete_set(&w, id, 0);
        assert_eq!(next.exercises[1].sets.len(), 1);
        assert_eq!(next, w);
    }

    #[test]
    fn set_orders_stay_contiguous_under_mixed_edits() {
        let mut w = push_day();
        let id = w.exercises[0].id;
        // deterministic mix of adds and deletes at varying positions
        let ops: [(bool, usize); 12] = [
            (true, 0),
            (false, 0),
            (false, 2),
            (true, 0),
            (true, 0),
            (false, 1),
            (false, 9),
            (false, 0),
            (false, 0),
            (false, 0),
            (false, 0),
            (true, 0),
        ];
        for (add, index) in ops {
            w = if add { add_set(&w, id) } else { delete_set(&w, id, index) };
            let count = w.exercises[0].sets.len();
            assert!(count >= 1);
            assert_eq!(orders(&w, 0), (1..=count).collect::<Vec<_>>());
        }
    }

    #[test]
    fn add_exercises_continues_order() {
        let w = push_day();
        let catalog = ExerciseCatalog::seeded();
        let picks: Vec<Exercise> = ["Squat", "Plank"]
            .iter()
            .map(|n| catalog.find_by_name(n).unwrap().clone())
            .collect();
        let next = add_exercises(&w, &picks);
        assert_eq!(next.exercises.len(), 4);
        assert_eq!(next.exercises[2].order, 2);
        assert_eq!(next.exercises[3].order, 3);
        assert_eq!(next.exercises[3].exercise.name, "Plank");
        assert_eq!(next.exercises[3].sets.len(), 1);
        assert_eq!(next.exercises[3].sets[0].reps, Some(10));
        assert_eq!(next.exercises[3].sets[0].weight, None);
    }

    #[test]
    fn reorder_swaps_adjacent() {
        let w = push_day();
        let next = reorder_exercises(&w, 0);
        assert_eq!(next.exercises[0].id, w.exercises[1].id);
        assert_eq!(next.exercises[1].id, w.exercises[0].id);
        assert_eq!(reorder_exercises(&w, 1), w);
    }

    #[test]
    fn move_up_and_down_renumber() {
        let w = push_day();
        let down = move_exercise_down(&w, 0);
        assert_eq!(down.exercises[0].exercise.name, "Chest Fly");
        assert_eq!(
            down.exercises.iter().map(|e| e.order).collect::<Vec<_>>(),
            vec![0, 1]
        );
        let up = move_exercise_up(&down, 1);
        assert_eq!(up.exercises[0].exercise.name, "Bench Press");
        assert_eq!(up.exercises[1].exercise.name, "Chest Fly");
        assert_eq!(
            up.exercises.iter().map(|e| e.order).collect::<Vec<_>>(),
            vec![0, 1]
        );
        assert_eq!(move_exercise_up(&w, 0), w);
        assert_eq!(move_exercise_down(&w, 1), w);
    }

    #[test]
    fn replace_keeps_sets() {
        let w = push_day();
        let catalog = ExerciseCatalog::seeded();
        let incline = catalog.find_by_name("Incline Bench Press").unwrap();
        let next = replace_exercise(&w, 0, incline);
        assert_eq!(next.exercises[0].exercise.name, "Incline Bench Press");
        assert_eq!(next.exercises[0].sets, w.exercises[0].sets);
    }

    #[test]
    fn out_of_range_and_unknown_ids_are_no_ops() {
        let w = push_day();
        let known = w.exercises[0].id;
        let unknown = Uuid::new_v4();
        let catalog = ExerciseCatalog::seeded();
        let squat = catalog.find_by_name("Squat").unwrap();

        assert_eq!(edit_set(&w, unknown, 0, 50.0, 5), w);
        assert_eq!(edit_set(&w, known, 3, 50.0, 5), w);
        assert_eq!(edit_set_values(&w, known, 99, 50.0, 5), w);
        assert_eq!(complete_set(&w, known, 3), w);
        assert_eq!(toggle_set_completion(&w, unknown, 0), w);
        assert_eq!(recompute_set_completion(&w, known, 7), w);
        assert_eq!(add_set(&w, unknown), w);
        assert_eq!(delete_set(&w, unknown, 0), w);
        assert_eq!(delete_set(&w, known, 3), w);
        assert_eq!(add_exercises(&w, &[]), w);
        assert_eq!(delete_exercise(&w, 2), w);
        assert_eq!(reorder_exercises(&w, 5), w);
        assert_eq!(reorder_exercises(&w, usize::MAX), w);
        assert_eq!(move_exercise_down(&w, usize::MAX), w);
        assert_eq!(move_exercise_up(&w, usize::MAX), w);
        assert_eq!(replace_exercise(&w, 2, squat), w);
    }
}
