//! Workout logging core: an exercise catalog, a store of logged workouts
//! and routines, and the session flow that turns a template into a logged
//! workout.

pub mod catalog;
pub mod error;
pub mod model;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod store;
pub mod summary;

pub use catalog::ExerciseCatalog;
pub use error::{Result, StoreError};
pub use model::{
    Equipment, Exercise, ExerciseCategory, MuscleGroup, Routine, RoutineDay, User, WeightUnit,
    Workout, WorkoutExercise, WorkoutPreferences, WorkoutSet,
};
pub use persistence::{JsonFileStore, MemoryStore, Persistence};
pub use settings::Settings;
pub use store::SessionStore;
