//! Core data types shared by the catalog, the store and the session logic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad classification of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Sports,
    Other,
}

pub const ALL_CATEGORIES: [ExerciseCategory; 5] = [
    ExerciseCategory::Strength,
    ExerciseCategory::Cardio,
    ExerciseCategory::Flexibility,
    ExerciseCategory::Sports,
    ExerciseCategory::Other,
];

impl ExerciseCategory {
    pub fn label(self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "Strength",
            ExerciseCategory::Cardio => "Cardio",
            ExerciseCategory::Flexibility => "Flexibility",
            ExerciseCategory::Sports => "Sports",
            ExerciseCategory::Other => "Other",
        }
    }
}

/// Muscle groups an exercise can target. The first entry of
/// [`Exercise::muscle_groups`] is treated as the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Forearms,
    Abs,
    Obliques,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    FullBody,
}

pub const ALL_MUSCLE_GROUPS: [MuscleGroup; 13] = [
    MuscleGroup::Chest,
    MuscleGroup::Back,
    MuscleGroup::Shoulders,
    MuscleGroup::Biceps,
    MuscleGroup::Triceps,
    MuscleGroup::Forearms,
    MuscleGroup::Abs,
    MuscleGroup::Obliques,
    MuscleGroup::Quads,
    MuscleGroup::Hamstrings,
    MuscleGroup::Glutes,
    MuscleGroup::Calves,
    MuscleGroup::FullBody,
];

impl MuscleGroup {
    pub fn label(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Forearms => "Forearms",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Obliques => "Obliques",
            MuscleGroup::Quads => "Quads",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::FullBody => "Full Body",
        }
    }
}

/// Typical equipment used for an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Kettlebell,
    Bodyweight,
    Machine,
    Cable,
    ResistanceBand,
    NoEquipment,
}

pub const ALL_EQUIPMENT: [Equipment; 8] = [
    Equipment::Barbell,
    Equipment::Dumbbell,
    Equipment::Kettlebell,
    Equipment::Bodyweight,
    Equipment::Machine,
    Equipment::Cable,
    Equipment::ResistanceBand,
    Equipment::NoEquipment,
];

impl Equipment {
    pub fn label(self) -> &'static str {
        match self {
            Equipment::Barbell => "Barbell",
            Equipment::Dumbbell => "Dumbbell",
            Equipment::Kettlebell => "Kettlebell",
            Equipment::Bodyweight => "Bodyweight",
            Equipment::Machine => "Machine",
            Equipment::Cable => "Cable",
            Equipment::ResistanceBand => "Resistance Band",
            Equipment::NoEquipment => "No Equipment",
        }
    }
}

/// A catalog entry. Workouts embed a copy of it, so later catalog edits
/// never reach back into logged sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle_groups: Vec<MuscleGroup>,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
}

impl Exercise {
    pub fn new(
        name: impl Into<String>,
        category: ExerciseCategory,
        muscle_groups: Vec<MuscleGroup>,
        equipment: Option<Equipment>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            muscle_groups,
            equipment,
            instructions: None,
            is_custom: false,
        }
    }

    pub fn primary_muscle(&self) -> Option<MuscleGroup> {
        self.muscle_groups.first().copied()
    }
}

/// One performed or planned set. `order` is 1-based within its exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: Uuid,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
    /// Seconds, for time-based exercises.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub rest_time: Option<u32>,
    #[serde(default)]
    pub is_completed: bool,
    pub order: usize,
}

impl WorkoutSet {
    pub fn new(order: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            reps: None,
            weight: None,
            duration: None,
            distance: None,
            rest_time: None,
            is_completed: false,
            order,
        }
    }

    /// A planned set with target reps and no weight yet.
    pub fn planned(order: usize, reps: u32) -> Self {
        Self {
            reps: Some(reps),
            ..Self::new(order)
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_reps(mut self, reps: u32) -> Self {
        self.reps = Some(reps);
        self
    }

    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    /// Both a positive weight and positive reps were entered.
    pub fn is_filled(&self) -> bool {
        self.weight.unwrap_or(0.0) > 0.0 && self.reps.unwrap_or(0) > 0
    }

    /// Any value the user could have logged is present.
    pub fn has_progress(&self) -> bool {
        self.weight.unwrap_or(0.0) > 0.0 || self.reps.unwrap_or(0) > 0 || self.is_completed
    }

    pub fn volume(&self) -> f64 {
        self.weight.unwrap_or(0.0) * f64::from(self.reps.unwrap_or(0))
    }
}

/// One exercise instance inside a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: Uuid,
    pub exercise: Exercise,
    pub sets: Vec<WorkoutSet>,
    #[serde(default)]
    pub notes: Option<String>,
    pub order: usize,
}

impl WorkoutExercise {
    pub fn new(exercise: Exercise, sets: Vec<WorkoutSet>, order: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise,
            sets,
            notes: None,
            order,
        }
    }

    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.is_completed).count()
    }
}

/// A single workout session, or a template when `is_template` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<WorkoutExercise>,
    pub date: DateTime<Utc>,
    /// Seconds, stamped when the session ends.
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_template: bool,
}

impl Workout {
    pub fn new(name: impl Into<String>, exercises: Vec<WorkoutExercise>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            exercises,
            date: Utc::now(),
            duration: None,
            notes: None,
            is_template: false,
        }
    }

    pub fn template(name: impl Into<String>, exercises: Vec<WorkoutExercise>) -> Self {
        Self {
            is_template: true,
            ..Self::new(name, exercises)
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// True when any set carries a weight, reps or a completion mark.
    pub fn has_progress(&self) -> bool {
        self.exercises
            .iter()
            .any(|e| e.sets.iter().any(WorkoutSet::has_progress))
    }

    pub fn exercise_index(&self, exercise_id: Uuid) -> Option<usize> {
        self.exercises.iter().position(|e| e.id == exercise_id)
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn completed_sets(&self) -> usize {
        self.exercises.iter().map(WorkoutExercise::completed_sets).sum()
    }
}

/// One day of a [`Routine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineDay {
    pub id: Uuid,
    pub day_number: u32,
    pub day_name: String,
    #[serde(default)]
    pub workout: Option<Workout>,
    #[serde(default)]
    pub is_rest_day: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RoutineDay {
    /// Build a day; a missing name falls back to `"Day N"`.
    pub fn new(
        day_number: u32,
        day_name: Option<String>,
        workout: Option<Workout>,
        is_rest_day: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            day_number,
            day_name: day_name.unwrap_or_else(|| format!("Day {day_number}")),
            workout,
            is_rest_day,
            notes: None,
        }
    }
}

/// A named plan of training days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: Uuid,
    pub name: String,
    pub days: Vec<RoutineDay>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
}

impl Routine {
    pub fn new(name: impl Into<String>, days: Vec<RoutineDay>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            days,
            is_active: true,
            notes: None,
            created_date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Multiplier from stored kilograms to this unit.
    pub fn factor(self) -> f64 {
        match self {
            WeightUnit::Kg => 1.0,
            WeightUnit::Lbs => 2.204_62,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Km,
    Miles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Strength,
    Endurance,
    GeneralFitness,
    Competition,
}

fn default_rest_seconds() -> u32 {
    90
}

fn default_true() -> bool {
    true
}

/// Per-user workout preferences.
///
/// Every field defaults individually so profiles written by older versions
/// still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPreferences {
    #[serde(default = "default_rest_seconds")]
    pub default_rest_seconds: u32,
    #[serde(default = "default_weight_unit")]
    pub weight_unit: WeightUnit,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: DistanceUnit,
    #[serde(default = "default_true")]
    pub auto_start_rest_timer: bool,
    #[serde(default = "default_true")]
    pub show_previous_workout_data: bool,
}

fn default_weight_unit() -> WeightUnit {
    WeightUnit::Kg
}

fn default_distance_unit() -> DistanceUnit {
    DistanceUnit::Km
}

impl Default for WorkoutPreferences {
    fn default() -> Self {
        Self {
            default_rest_seconds: default_rest_seconds(),
            weight_unit: default_weight_unit(),
            distance_unit: default_distance_unit(),
            auto_start_rest_timer: true,
            show_previous_workout_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Centimetres.
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub fitness_goals: Vec<FitnessGoal>,
    #[serde(default)]
    pub preferences: WorkoutPreferences,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            weight: None,
            height: None,
            date_of_birth: None,
            fitness_goals: Vec::new(),
            preferences: WorkoutPreferences::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routine_day_default_name() {
        let day = RoutineDay::new(3, None, None, false);
        assert_eq!(day.day_name, "Day 3");
        let named = RoutineDay::new(1, Some("Legs".into()), None, true);
        assert_eq!(named.day_name, "Legs");
        assert!(named.is_rest_day);
    }

    #[test]
    fn set_progress_and_fill_rules() {
        let empty = WorkoutSet::new(1);
        assert!(!empty.has_progress());
        assert!(!empty.is_filled());

        let reps_only = WorkoutSet::planned(1, 10);
        assert!(reps_only.has_progress());
        assert!(!reps_only.is_filled());

        let done = WorkoutSet::new(1).completed();
        assert!(done.has_progress());
        assert!(!done.is_filled());

        let filled = WorkoutSet::new(1).with_weight(60.0).with_reps(10);
        assert!(filled.is_filled());
        assert!((filled.volume() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn preferences_default_when_fields_missing() {
        let prefs: WorkoutPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, WorkoutPreferences::default());
        assert_eq!(prefs.default_rest_seconds, 90);
        assert!(prefs.auto_start_rest_timer);
    }

    #[test]
    fn workout_counts_sets() {
        let bench = Exercise::new(
            "Bench Press",
            ExerciseCategory::Strength,
            vec![MuscleGroup::Chest, MuscleGroup::Triceps],
            Some(Equipment::Barbell),
        );
        assert_eq!(bench.primary_muscle(), Some(MuscleGroup::Chest));
        let workout = Workout::new(
            "Push Day",
            vec![WorkoutExercise::new(
                bench,
                vec![WorkoutSet::planned(1, 10).completed(), WorkoutSet::planned(2, 8)],
                0,
            )],
        );
        assert_eq!(workout.total_sets(), 2);
        assert_eq!(workout.completed_sets(), 1);
        assert!(workout.has_progress());
        assert!(!workout.is_template);
    }

    #[test]
    fn unit_factor_converts_from_kg() {
        assert_eq!(WeightUnit::Kg.factor(), 1.0);
        assert!((100.0 * WeightUnit::Lbs.factor() - 220.462).abs() < 1e-6);
        assert_eq!(Equipment::ResistanceBand.label(), "Resistance Band");
        assert_eq!(MuscleGroup::FullBody.label(), "Full Body");
    }
}
