//! The in-memory collection of workouts, routines and the user profile,
//! plus the single in-progress workout.
//!
//! The store is constructed once and passed by reference to whatever needs
//! it. Every mutation that changes a persisted collection writes it back
//! immediately; write failures are logged and otherwise ignored.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::catalog::ExerciseCatalog;
use crate::model::{FitnessGoal, Routine, User, Workout, WorkoutExercise, WorkoutSet};
use crate::persistence::Persistence;
use crate::settings::Settings;

pub struct SessionStore<P: Persistence> {
    persistence: P,
    workouts: Vec<Workout>,
    routines: Vec<Routine>,
    user: Option<User>,
    current: Option<Workout>,
}

impl<P: Persistence> SessionStore<P> {
    /// Load every collection from `persistence`.
    pub fn open(persistence: P) -> Self {
        let workouts = persistence.load_workouts();
        let routines = persistence.load_routines();
        let user = persistence.load_user();
        log::info!(
            "Loaded {} workouts and {} routines",
            workouts.len(),
            routines.len()
        );
        Self {
            persistence,
            workouts,
            routines,
            user,
            current: None,
        }
    }

    /// Load and, when `settings.seed_sample_data` is set, fill an empty
    /// store with the sample history and profile.
    pub fn open_with(persistence: P, settings: &Settings, catalog: &ExerciseCatalog) -> Self {
        let mut store = Self::open(persistence);
        if settings.seed_sample_data {
            store.seed_samples(catalog);
        }
        store
    }

    /// Insert the "Push Day" sample when no workouts exist and a sample
    /// profile when no user exists.
    pub fn seed_samples(&mut self, catalog: &ExerciseCatalog) {
        if self.workouts.is_empty() {
            if let Some(sample) = sample_push_day(catalog, Utc::now() - Duration::days(1)) {
                log::info!("Seeding sample workout {}", sample.name);
                // Not persisted: a later load without saves seeds again.
                self.workouts.push(sample);
            }
        }
        if self.user.is_none() {
            let mut user = User::new("Sample Athlete", "athlete@example.com");
            user.weight = Some(75.0);
            user.height = Some(175.0);
            user.fitness_goals = vec![FitnessGoal::Strength, FitnessGoal::MuscleGain];
            self.set_user(user);
        }
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Logged sessions, excluding templates.
    pub fn history(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter().filter(|w| !w.is_template)
    }

    pub fn templates(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter().filter(|w| w.is_template)
    }

    pub fn find_workout(&self, id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Clear the in-progress workout once it has been recorded.
    pub(crate) fn clear_current(&mut self) {
        self.current = None;
    }

    pub fn start_workout(&mut self, workout: Workout) {
        log::info!("Starting workout {} ({})", workout.name, workout.id);
        self.current = Some(workout);
    }

    /// Replace the in-progress workout with a newer snapshot of it.
    pub fn update_current(&mut self, workout: Workout) {
        self.current = Some(workout);
    }

    pub fn current_workout(&self) -> Option<&Workout> {
        self.current.as_ref()
    }

    /// Drop the in-progress workout without recording it.
    pub fn discard_current(&mut self) -> Option<Workout> {
        let discarded = self.current.take();
        if let Some(w) = &discarded {
            log::info!("Discarded workout {}", w.name);
        }
        discarded
    }

    /// Stamp the in-progress workout with its duration and record it.
    pub fn end_workout(&mut self) -> Option<Workout> {
        self.end_workout_at(Utc::now())
    }

    pub fn end_workout_at(&mut self, now: DateTime<Utc>) -> Option<Workout> {
        let mut workout = self.current.take()?;
        workout.duration = Some((now - workout.date).num_seconds().max(0) as u64);
        self.save_workout(workout.clone());
        Some(workout)
    }

    /// Insert or replace by id, then persist.
    pub fn save_workout(&mut self, workout: Workout) {
        match self.workouts.iter().position(|w| w.id == workout.id) {
            Some(index) => self.workouts[index] = workout,
            None => self.workouts.push(workout),
        }
        self.persist_workouts();
    }

    pub fn delete_workout(&mut self, id: Uuid) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        let removed = self.workouts.len() != before;
        if removed {
            self.persist_workouts();
        }
        removed
    }

    /// Overwrite the mutable fields of the stored workout `id` with those of
    /// `source`, keeping the stored identity and date. Returns `false` when
    /// `id` is unknown.
    pub fn update_workout_fields(&mut self, id: Uuid, source: &Workout) -> bool {
        let Some(index) = self.workouts.iter().position(|w| w.id == id) else {
            return false;
        };
        let stored = &self.workouts[index];
        let updated = Workout {
            id: stored.id,
            date: stored.date,
            name: source.name.clone(),
            exercises: source.exercises.clone(),
            duration: source.duration,
            notes: source.notes.clone(),
            is_template: source.is_template,
        };
        self.workouts[index] = updated;
        self.persist_workouts();
        true
    }

    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    pub fn save_routine(&mut self, routine: Routine) {
        match self.routines.iter().position(|r| r.id == routine.id) {
            Some(index) => self.routines[index] = routine,
            None => self.routines.push(routine),
        }
        self.persist_routines();
    }

    pub fn delete_routine(&mut self, id: Uuid) -> bool {
        let before = self.routines.len();
        self.routines.retain(|r| r.id != id);
        let removed = self.routines.len() != before;
        if removed {
            self.persist_routines();
        }
        removed
    }

    /// Rebuild the workout embedded in every routine day for which `matches`
    /// holds. Returns the number of days updated.
    pub fn update_routine_workouts<M, F>(&mut self, matches: M, rebuild: F) -> usize
    where
        M: Fn(&Workout) -> bool,
        F: Fn(&Workout) -> Workout,
    {
        let mut updated = 0;
        for routine in &mut self.routines {
            for day in &mut routine.days {
                if let Some(embedded) = day.workout.as_mut() {
                    if matches(embedded) {
                        *embedded = rebuild(embedded);
                        updated += 1;
                    }
                }
            }
        }
        if updated > 0 {
            log::info!("Updated {updated} routine day(s)");
            self.persist_routines();
        }
        updated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: User) {
        if let Err(e) = self.persistence.save_user(&user) {
            log::error!("Failed to save user: {e}");
        }
        self.user = Some(user);
    }

    fn persist_workouts(&self) {
        if let Err(e) = self.persistence.save_workouts(&self.workouts) {
            log::error!("Failed to save workouts: {e}");
        }
    }

    fn persist_routines(&self) {
        if let Err(e) = self.persistence.save_routines(&self.routines) {
            log::error!("Failed to save routines: {e}");
        }
    }
}

/// The built-in "Push Day" history entry. `None` when the catalog lacks
/// its exercises.
pub fn sample_push_day(catalog: &ExerciseCatalog, date: DateTime<Utc>) -> Option<Workout> {
    let bench = catalog.find_by_name("Bench Press")?.clone();
    let press = catalog.find_by_name("Dumbbell Press")?.clone();
    let sets = |values: [(u32, f64); 3]| {
        values
            .iter()
            .enumerate()
            .map(|(i, (reps, weight))| WorkoutSet::planned(i + 1, *reps).with_weight(*weight))
            .collect::<Vec<_>>()
    };
    Some(
        Workout::new(
            "Push Day",
            vec![
                WorkoutExercise::new(bench, sets([(10, 60.0), (8, 70.0), (6, 80.0)]), 1),
                WorkoutExercise::new(press, sets([(12, 25.0), (10, 30.0), (8, 35.0)]), 2),
            ],
        )
        .with_date(date),
    )
}
