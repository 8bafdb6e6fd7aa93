use chrono::{DateTime, Utc};
use std::time::Instant;
use uuid::Uuid;

use crate::model::{Exercise, Workout, WorkoutExercise, WorkoutPreferences, WorkoutSet};
use crate::persistence::Persistence;
use crate::session::edits::{self, DEFAULT_REPS};
use crate::session::initializer::{begin_session, begin_session_at};
use crate::session::previous::{PreviousPerformance, previous_performance};
use crate::session::rest_timer::{DEFAULT_REST_SECONDS, RestTimer, Tick};
use crate::settings::Settings;
use crate::store::SessionStore;

/// Position of the set the guided flow is waiting on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetCursor {
    pub exercise_index: usize,
    pub set_index: usize,
}

/// Result of finishing a session, ready for
/// [`crate::session::finalizer::finalize`].
#[derive(Debug, Clone)]
pub struct FinishedSession {
    pub current: Workout,
    pub original: Workout,
}

/// An in-progress workout.
///
/// Holds a detached working copy; nothing reaches the store until the
/// session is finalized. Dropping the session cancels its rest timer.
#[derive(Debug)]
pub struct ActiveSession {
    workout: Workout,
    original: Workout,
    cursor: SetCursor,
    rest: Option<RestTimer>,
    rest_seconds: u32,
    auto_start_rest: bool,
    default_reps: u32,
}

impl ActiveSession {
    /// Wrap an already prepared working copy. `original` is what the
    /// session is reconciled against when it finishes.
    pub fn new(workout: Workout, original: Workout) -> Self {
        Self {
            workout,
            original,
            cursor: SetCursor::default(),
            rest: None,
            rest_seconds: DEFAULT_REST_SECONDS,
            auto_start_rest: true,
            default_reps: DEFAULT_REPS,
        }
    }

    /// Start a session from a stored workout or template.
    ///
    /// Resuming a workout that already has progress reconciles against that
    /// stored workout, so finishing updates it rather than adding a second
    /// copy. A fresh start reconciles against the session as first built.
    pub fn begin(source: &Workout, history: &[Workout]) -> Self {
        Self::reconciling(source, begin_session(source, history))
    }

    /// Start a session from `source` using the store's history, and register
    /// the working copy as the store's in-progress workout.
    pub fn begin_from<P: Persistence>(store: &mut SessionStore<P>, source: &Workout) -> Self {
        let history: Vec<Workout> = store.history().cloned().collect();
        let session = Self::begin(source, &history);
        store.start_workout(session.workout.clone());
        session
    }

    /// Pick up the store's in-progress workout, if any.
    pub fn resume_from<P: Persistence>(store: &mut SessionStore<P>) -> Option<Self> {
        let current = store.current_workout()?.clone();
        Some(Self::begin_from(store, &current))
    }

    /// Copy the working state into the store so the session survives the
    /// user navigating away.
    pub fn save_progress<P: Persistence>(&self, store: &mut SessionStore<P>) {
        store.update_current(self.workout.clone());
    }

    /// [`ActiveSession::begin`] with reps and rest length from `settings`.
    pub fn begin_with(source: &Workout, history: &[Workout], settings: &Settings) -> Self {
        let workout = begin_session_at(source, history, Utc::now(), settings.default_reps);
        let mut session = Self::reconciling(source, workout);
        session.rest_seconds = settings.default_rest_seconds;
        session.default_reps = settings.default_reps;
        session
    }

    fn reconciling(source: &Workout, workout: Workout) -> Self {
        let original = if source.has_progress() && !source.is_template {
            source.clone()
        } else {
            workout.clone()
        };
        Self::new(workout, original)
    }

    /// Rest length and auto-start from the user's preferences.
    pub fn with_preferences(mut self, prefs: &WorkoutPreferences) -> Self {
        self.rest_seconds = prefs.default_rest_seconds;
        self.auto_start_rest = prefs.auto_start_rest_timer;
        self
    }

    pub fn with_default_reps(mut self, reps: u32) -> Self {
        self.default_reps = reps;
        self
    }

    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    pub fn original(&self) -> &Workout {
        &self.original
    }

    pub fn cursor(&self) -> SetCursor {
        self.cursor
    }

    pub fn current_exercise(&self) -> Option<&WorkoutExercise> {
        self.workout.exercises.get(self.cursor.exercise_index)
    }

    pub fn current_set(&self) -> Option<&WorkoutSet> {
        self.current_exercise()?.sets.get(self.cursor.set_index)
    }

    /// What was logged last time for this set. The workout being resumed is
    /// never its own history.
    pub fn previous_for(
        &self,
        exercise_index: usize,
        set_index: usize,
        history: &[Workout],
    ) -> Option<PreviousPerformance> {
        let exercise = self.workout.exercises.get(exercise_index)?;
        let set = exercise.sets.get(set_index)?;
        previous_performance(&exercise.exercise, set.order, history, self.original.id)
    }

    pub fn rest_remaining(&self) -> Option<u32> {
        self.rest
            .as_ref()
            .filter(|t| t.is_running())
            .map(RestTimer::remaining)
    }

    // guided flow

    /// Complete the set under the cursor, start the rest countdown and move
    /// to the next set, or to the first set of the next exercise. The cursor
    /// stays put on the last set of the last exercise.
    pub fn complete_current_set(&mut self) {
        let Some(exercise) = self.current_exercise() else {
            return;
        };
        if self.cursor.set_index >= exercise.sets.len() {
            return;
        }
        let id = exercise.id;
        self.workout = edits::complete_set(&self.workout, id, self.cursor.set_index);
        self.start_rest();
        self.advance_cursor();
    }

    fn advance_cursor(&mut self) {
        let set_count = self.current_exercise().map_or(0, |e| e.sets.len());
        if self.cursor.set_index + 1 < set_count {
            self.cursor.set_index += 1;
        } else if self.cursor.exercise_index + 1 < self.workout.exercises.len() {
            self.cursor.exercise_index += 1;
            self.cursor.set_index = 0;
        }
    }

    /// Point the guided flow at the first set of exercise `index`.
    pub fn select_exercise(&mut self, index: usize) {
        if index < self.workout.exercises.len() {
            self.cursor = SetCursor {
                exercise_index: index,
                set_index: 0,
            };
        }
    }

    /// Pure toggle of the completion mark (guided flow).
    pub fn toggle_set_completion(&mut self, exercise_id: Uuid, set_index: usize) {
        self.workout = edits::toggle_set_completion(&self.workout, exercise_id, set_index);
    }

    // table flow

    /// Completion follows the entered values (table flow).
    pub fn recompute_set_completion(&mut self, exercise_id: Uuid, set_index: usize) {
        self.workout = edits::recompute_set_completion(&self.workout, exercise_id, set_index);
    }

    pub fn edit_set_values(&mut self, exercise_id: Uuid, set_index: usize, weight: f64, reps: u32) {
        self.workout = edits::edit_set_values(&self.workout, exercise_id, set_index, weight, reps);
    }

    // shared edits

    pub fn edit_set(&mut self, exercise_id: Uuid, set_index: usize, weight: f64, reps: u32) {
        self.workout = edits::edit_set(&self.workout, exercise_id, set_index, weight, reps);
    }

    pub fn add_set(&mut self, exercise_id: Uuid) {
        self.workout = edits::add_set_with_reps(&self.workout, exercise_id, self.default_reps);
    }

    pub fn delete_set(&mut self, exercise_id: Uuid, set_index: usize) {
        self.workout = edits::delete_set(&self.workout, exercise_id, set_index);
        let set_count = self.current_exercise().map_or(0, |e| e.sets.len());
        if self.cursor.set_index >= set_count {
            self.cursor.set_index = set_count.saturating_sub(1);
        }
    }

    pub fn add_exercises(&mut self, exercises: &[Exercise]) {
        self.workout =
            edits::add_exercises_with_reps(&self.workout, exercises, self.default_reps);
    }

    /// Remove exercise `index`. A cursor at or after it moves back by one
    /// (never below zero) and returns to the first set.
    pub fn delete_exercise(&mut self, index: usize) {
        if index >= self.workout.exercises.len() {
            return;
        }
        self.workout = edits::delete_exercise(&self.workout, index);
        if self.cursor.exercise_index >= index {
            self.cursor.exercise_index = self.cursor.exercise_index.saturating_sub(1);
        }
        self.cursor.set_index = 0;
    }

    pub fn reorder_exercises(&mut self, index: usize) {
        self.workout = edits::reorder_exercises(&self.workout, index);
    }

    pub fn move_exercise_up(&mut self, index: usize) {
        self.workout = edits::move_exercise_up(&self.workout, index);
    }

    pub fn move_exercise_down(&mut self, index: usize) {
        self.workout = edits::move_exercise_down(&self.workout, index);
    }

    pub fn replace_exercise(&mut self, index: usize, exercise: &Exercise) {
        self.workout = edits::replace_exercise(&self.workout, index, exercise);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.workout.name = name.into();
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.workout.notes = notes.filter(|n| !n.trim().is_empty());
    }

    // rest timer

    fn start_rest(&mut self) {
        self.cancel_rest();
        if self.auto_start_rest {
            self.rest = Some(RestTimer::start(self.rest_seconds));
        }
    }

    fn cancel_rest(&mut self) {
        if let Some(mut timer) = self.rest.take() {
            timer.cancel();
        }
    }

    pub fn skip_rest(&mut self) {
        self.cancel_rest();
    }

    /// Advance the rest countdown by one second.
    pub fn tick_rest(&mut self) -> Tick {
        let tick = self.rest.as_mut().map_or(Tick::Stopped, RestTimer::tick);
        if tick == Tick::Finished {
            self.rest = None;
        }
        tick
    }

    /// Advance the rest countdown by the time elapsed since the last poll.
    pub fn poll_rest(&mut self, now: Instant) -> Tick {
        let tick = self
            .rest
            .as_mut()
            .map_or(Tick::Stopped, |timer| timer.poll(now));
        if tick == Tick::Finished {
            self.rest = None;
        }
        tick
    }

    // lifecycle

    /// End the session: cancel the rest timer and stamp the duration.
    pub fn finish(self) -> FinishedSession {
        self.finish_at(Utc::now())
    }

    pub fn finish_at(mut self, now: DateTime<Utc>) -> FinishedSession {
        self.cancel_rest();
        let mut current = self.workout;
        current.duration = Some((now - current.date).num_seconds().max(0) as u64);
        log::info!(
            "Finished {}: {}/{} sets completed",
            current.name,
            current.completed_sets(),
            current.total_sets()
        );
        FinishedSession {
            current,
            original: self.original,
        }
    }

    /// Drop the working copy without recording anything.
    pub fn discard(mut self) {
        self.cancel_rest();
        log::info!("Discarded session {}", self.workout.name);
    }
}
