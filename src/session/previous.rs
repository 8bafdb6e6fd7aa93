//! Looking up what the user did last time for a given set.
//!
//! Exercises are matched across sessions by name. Every workout embeds its
//! own copy of the catalog entry, so identities differ between sessions.
//! Two differently named exercises never match, and two entries sharing a
//! name match even if their equipment differs.

use std::fmt;

use uuid::Uuid;

use crate::model::{Exercise, WeightUnit, Workout};

/// Weight and reps of a previously logged set. Bodyweight sets report a
/// weight of 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviousPerformance {
    pub weight: f64,
    pub reps: u32,
}

impl fmt::Display for PreviousPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", format_weight(self.weight), self.reps)
    }
}

/// Most recent value for the set at `set_order` (1-based) of `exercise`,
/// ignoring templates and the workout `exclude_workout_id`.
///
/// Candidates are visited newest first; one whose matching set has no reps
/// is skipped in favour of the next.
pub fn previous_performance(
    exercise: &Exercise,
    set_order: usize,
    history: &[Workout],
    exclude_workout_id: Uuid,
) -> Option<PreviousPerformance> {
    let mut candidates: Vec<&Workout> = history
        .iter()
        .filter(|w| !w.is_template && w.id != exclude_workout_id)
        .filter(|w| w.exercises.iter().any(|e| e.exercise.name == exercise.name))
        .collect();
    candidates.sort_by(|a, b| b.date.cmp(&a.date));

    candidates.into_iter().find_map(|workout| {
        workout
            .exercises
            .iter()
            .filter(|e| e.exercise.name == exercise.name)
            .flat_map(|e| e.sets.iter())
            .find(|s| s.order == set_order && s.reps.unwrap_or(0) > 0)
            .map(|s| PreviousPerformance {
                weight: s.weight.unwrap_or(0.0),
                reps: s.reps.unwrap_or(0),
            })
    })
}

fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{weight:.0}")
    } else {
        format!("{weight:.1}")
    }
}

/// Text for the "previous" column: `"60 kg × 10"`, or `"-"` without data.
pub fn format_previous(previous: Option<PreviousPerformance>, unit: WeightUnit) -> String {
    match previous {
        Some(p) => format!(
            "{} {} × {}",
            format_weight(p.weight * unit.factor()),
            unit.label(),
            p.reps
        ),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExerciseCatalog;
    use crate::model::{WorkoutExercise, WorkoutSet};
    use chrono::{Duration, Utc};

    fn session(exercise: &Exercise, days_ago: i64, sets: Vec<WorkoutSet>) -> Workout {
        // each session embeds its own copy with a distinct identity
        let mut snapshot = exercise.clone();
        snapshot.id = Uuid::new_v4();
        Workout::new("Push Day", vec![WorkoutExercise::new(snapshot, sets, 0)])
            .with_date(Utc::now() - Duration::days(days_ago))
    }

    fn bench() -> Exercise {
        ExerciseCatalog::seeded().find_by_name("Bench Press").unwrap().clone()
    }

    #[test]
    fn newest_matching_set_wins() {
        let bench = bench();
        let history = vec![
            session(&bench, 10, vec![WorkoutSet::new(1).with_weight(50.0).with_reps(10)]),
            session(&bench, 3, vec![WorkoutSet::new(1).with_weight(60.0).with_reps(8)]),
        ];
        let prev = previous_performance(&bench, 1, &history, Uuid::new_v4()).unwrap();
        assert_eq!(prev, PreviousPerformance { weight: 60.0, reps: 8 });
    }

    #[test]
    fn excluded_workout_is_never_used() {
        let bench = bench();
        let newest = session(&bench, 0, vec![WorkoutSet::new(1).with_weight(99.0).with_reps(1)]);
        let older = session(&bench, 5, vec![WorkoutSet::new(1).with_weight(55.0).with_reps(12)]);
        let exclude = newest.id;
        let history = vec![newest, older];
        let prev = previous_performance(&bench, 1, &history, exclude).unwrap();
        assert_eq!(prev.weight, 55.0);

        let only = vec![history[0].clone()];
        assert_eq!(previous_performance(&bench, 1, &only, exclude), None);
    }

    #[test]
    fn falls_through_when_set_order_has_no_reps() {
        let bench = bench();
        let history = vec![
            session(&bench, 1, vec![WorkoutSet::new(1).with_weight(60.0).with_reps(10)]),
            session(
                &bench,
                4,
                vec![
                    WorkoutSet::new(1).with_weight(50.0).with_reps(10),
                    WorkoutSet::new(2).with_weight(52.5).with_reps(9),
                ],
            ),
        ];
        let prev = previous_performance(&bench, 2, &history, Uuid::new_v4()).unwrap();
        assert_eq!(prev, PreviousPerformance { weight: 52.5, reps: 9 });

        let zero_reps = vec![session(&bench, 1, vec![WorkoutSet::new(1).with_weight(60.0).with_reps(0)])];
        assert_eq!(previous_performance(&bench, 1, &zero_reps, Uuid::new_v4()), None);
    }

    #[test]
    fn bodyweight_reports_zero_weight() {
        let catalog = ExerciseCatalog::seeded();
        let pullups = catalog.find_by_name("Pull-ups").unwrap().clone();
        let history = vec![session(&pullups, 1, vec![WorkoutSet::new(1).with_reps(12)])];
        let prev = previous_performance(&pullups, 1, &history, Uuid::new_v4()).unwrap();
        assert_eq!(prev, PreviousPerformance { weight: 0.0, reps: 12 });
    }

    #[test]
    fn templates_and_other_names_are_ignored() {
        let bench = bench();
        let mut template = session(&bench, 0, vec![WorkoutSet::new(1).with_weight(70.0).with_reps(5)]);
        template.is_template = true;
        let mut renamed = bench.clone();
        renamed.name = "Bench Press (Paused)".into();
        let other = session(&renamed, 0, vec![WorkoutSet::new(1).with_weight(65.0).with_reps(5)]);
        assert_eq!(
            previous_performance(&bench, 1, &[template, other], Uuid::new_v4()),
            None
        );
    }

    #[test]
    fn formats_previous_column() {
        let prev = PreviousPerformance { weight: 60.0, reps: 10 };
        assert_eq!(format_previous(Some(prev), WeightUnit::Kg), "60 kg × 10");
        assert_eq!(format_previous(Some(prev), WeightUnit::Lbs), "132.3 lbs × 10");
        assert_eq!(format_previous(None, WeightUnit::Kg), "-");
        assert_eq!(PreviousPerformance { weight: 62.5, reps: 8 }.to_string(), "62.5 × 8");
    }
}
