//! Exercise library used when building or extending workouts.

use once_cell::sync::Lazy;
use phf::phf_map;

use crate::error::{Result, StoreError};
use crate::model::{Equipment, Exercise, ExerciseCategory, MuscleGroup};
use ExerciseCategory::{Cardio, Strength};
use MuscleGroup::*;

/// Static description of a built-in exercise.
#[derive(Debug, Clone, Copy)]
pub struct SeedInfo {
    pub category: ExerciseCategory,
    pub muscles: &'static [MuscleGroup],
    pub equipment: Option<Equipment>,
}

pub static SEED_EXERCISES: phf::Map<&'static str, SeedInfo> = phf_map! {
    // Chest
    "Bench Press" => SeedInfo { category: Strength, muscles: &[Chest, Triceps, Shoulders], equipment: Some(Equipment::Barbell) },
    "Push-ups" => SeedInfo { category: Strength, muscles: &[Chest, Triceps, Shoulders], equipment: Some(Equipment::Bodyweight) },
    "Dumbbell Press" => SeedInfo { category: Strength, muscles: &[Chest, Triceps, Shoulders], equipment: Some(Equipment::Dumbbell) },
    "Incline Bench Press" => SeedInfo { category: Strength, muscles: &[Chest, Triceps, Shoulders], equipment: Some(Equipment::Barbell) },
    "Chest Fly" => SeedInfo { category: Strength, muscles: &[Chest], equipment: Some(Equipment::Dumbbell) },
    // Back
    "Deadlift" => SeedInfo { category: Strength, muscles: &[Back, Glutes, Hamstrings], equipment: Some(Equipment::Barbell) },
    "Pull-ups" => SeedInfo { category: Strength, muscles: &[Back, Biceps], equipment: Some(Equipment::Bodyweight) },
    "Bent-over Row" => SeedInfo { category: Strength, muscles: &[Back, Biceps], equipment: Some(Equipment::Barbell) },
    "Lat Pulldown" => SeedInfo { category: Strength, muscles: &[Back, Biceps], equipment: Some(Equipment::Machine) },
    "T-Bar Row" => SeedInfo { category: Strength, muscles: &[Back, Biceps], equipment: Some(Equipment::Barbell) },
    // Legs
    "Squat" => SeedInfo { category: Strength, muscles: &[Quads, Glutes, Hamstrings], equipment: Some(Equipment::Barbell) },
    "Lunges" => SeedInfo { category: Strength, muscles: &[Quads, Glutes, Hamstrings], equipment: Some(Equipment::Bodyweight) },
    "Leg Press" => SeedInfo { category: Strength, muscles: &[Quads, Glutes], equipment: Some(Equipment::Machine) },
    "Romanian Deadlift" => SeedInfo { category: Strength, muscles: &[Hamstrings, Glutes], equipment: Some(Equipment::Barbell) },
    "Calf Raises" => SeedInfo { category: Strength, muscles: &[Calves], equipment: Some(Equipment::Bodyweight) },
    // Shoulders
    "Overhead Press" => SeedInfo { category: Strength, muscles: &[Shoulders, Triceps], equipment: Some(Equipment::Barbell) },
    "Lateral Raises" => SeedInfo { category: Strength, muscles: &[Shoulders], equipment: Some(Equipment::Dumbbell) },
    "Front Raises" => SeedInfo { category: Strength, muscles: &[Shoulders], equipment: Some(Equipment::Dumbbell) },
    "Face Pulls" => SeedInfo { category: Strength, muscles: &[Shoulders, Back], equipment: Some(Equipment::Cable) },
    // Arms
    "Bicep Curls" => SeedInfo { category: Strength, muscles: &[Biceps], equipment: Some(Equipment::Dumbbell) },
    "Tricep Dips" => SeedInfo { category: Strength, muscles: &[Triceps, Chest], equipment: Some(Equipment::Bodyweight) },
    "Hammer Curls" => SeedInfo { category: Strength, muscles: &[Biceps, Forearms], equipment: Some(Equipment::Dumbbell) },
    "Close-grip Bench Press" => SeedInfo { category: Strength, muscles: &[Triceps, Chest], equipment: Some(Equipment::Barbell) },
    // Core
    "Plank" => SeedInfo { category: Strength, muscles: &[Abs, Obliques], equipment: Some(Equipment::Bodyweight) },
    "Crunches" => SeedInfo { category: Strength, muscles: &[Abs], equipment: Some(Equipment::Bodyweight) },
    "Russian Twists" => SeedInfo { category: Strength, muscles: &[Abs, Obliques], equipment: Some(Equipment::Bodyweight) },
    "Mountain Climbers" => SeedInfo { category: Cardio, muscles: &[Abs, FullBody], equipment: Some(Equipment::Bodyweight) },
    // Cardio
    "Running" => SeedInfo { category: Cardio, muscles: &[FullBody], equipment: Some(Equipment::NoEquipment) },
    "Cycling" => SeedInfo { category: Cardio, muscles: &[Quads, Calves], equipment: Some(Equipment::NoEquipment) },
    "Rowing" => SeedInfo { category: Cardio, muscles: &[FullBody], equipment: Some(Equipment::Machine) },
    "Burpees" => SeedInfo { category: Cardio, muscles: &[FullBody], equipment: Some(Equipment::Bodyweight) },
};

// phf iteration order is arbitrary; the library is presented alphabetically.
static SEED_NAMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut names: Vec<&'static str> = SEED_EXERCISES.keys().copied().collect();
    names.sort_unstable();
    names
});

/// Lookup the static description of a built-in exercise.
pub fn seed_info(name: &str) -> Option<&'static SeedInfo> {
    SEED_EXERCISES.get(name)
}

/// The exercise library. Read-only during a session; custom exercises can
/// be appended between sessions.
#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// Build the catalog from the built-in library. Every call assigns new
    /// identities.
    pub fn seeded() -> Self {
        let exercises = SEED_NAMES
            .iter()
            .filter_map(|name| {
                seed_info(name).map(|info| {
                    Exercise::new(*name, info.category, info.muscles.to_vec(), info.equipment)
                })
            })
            .collect();
        Self { exercises }
    }

    pub fn all(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Case-insensitive substring match on the name or any muscle group
    /// label. An empty query returns the whole library.
    pub fn search(&self, query: &str) -> Vec<Exercise> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.exercises.clone();
        }
        self.exercises
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&needle)
                    || e
                        .muscle_groups
                        .iter()
                        .any(|m| m.label().to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    pub fn by_category(&self, category: ExerciseCategory) -> Vec<Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.name == name)
    }

    /// Add a user-defined exercise. Blank names and names already present
    /// (ignoring case) are rejected.
    pub fn add_custom(&mut self, mut exercise: Exercise) -> Result<&Exercise> {
        let name = exercise.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::Validation("exercise name is empty".into()));
        }
        let lowered = name.to_lowercase();
        if self
            .exercises
            .iter()
            .any(|e| e.name.to_lowercase() == lowered)
        {
            return Err(StoreError::Validation(format!(
                "exercise '{name}' already exists"
            )));
        }
        exercise.name = name;
        exercise.is_custom = true;
        log::info!("Added custom exercise {}", exercise.name);
        self.exercises.push(exercise);
        Ok(&self.exercises[self.exercises.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_is_sorted_and_complete() {
        let catalog = ExerciseCatalog::seeded();
        assert_eq!(catalog.len(), 31);
        let names: Vec<&str> = catalog.all().iter().map(|e| e.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        let bench = catalog.find_by_name("Bench Press").unwrap();
        assert_eq!(bench.primary_muscle(), Some(MuscleGroup::Chest));
        assert_eq!(bench.equipment, Some(Equipment::Barbell));
    }

    #[test]
    fn empty_query_returns_everything() {
        let catalog = ExerciseCatalog::seeded();
        assert_eq!(catalog.search("").len(), catalog.len());
        assert_eq!(catalog.search("   ").len(), catalog.len());
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let catalog = ExerciseCatalog::seeded();
        let hits = catalog.search("bench");
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bench Press", "Close-grip Bench Press", "Incline Bench Press"]
        );
    }

    #[test]
    fn search_matches_muscle_group_labels() {
        let catalog = ExerciseCatalog::seeded();
        let hits = catalog.search("CALVES");
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Calf Raises", "Cycling"]);

        // "Full Body" is matched through its display label
        assert!(catalog.search("full body").iter().any(|e| e.name == "Burpees"));
    }

    #[test]
    fn filter_by_category() {
        let catalog = ExerciseCatalog::seeded();
        let cardio = catalog.by_category(ExerciseCategory::Cardio);
        assert_eq!(cardio.len(), 5);
        assert!(cardio.iter().all(|e| e.category == ExerciseCategory::Cardio));
    }

    #[test]
    fn add_custom_validates_name() {
        let mut catalog = ExerciseCatalog::seeded();
        let dup = Exercise::new("squat", ExerciseCategory::Strength, vec![Quads], None);
        assert!(matches!(
            catalog.add_custom(dup),
            Err(StoreError::Validation(_))
        ));
        let blank = Exercise::new("  ", ExerciseCategory::Other, vec![], None);
        assert!(catalog.add_custom(blank).is_err());

        let sled = Exercise::new(" Sled Push ", ExerciseCategory::Strength, vec![Quads], None);
        let added = catalog.add_custom(sled).unwrap();
        assert_eq!(added.name, "Sled Push");
        assert!(added.is_custom);
        assert_eq!(catalog.len(), 32);
    }
}
