//! A workout session from start to record: building the working copy,
//! editing it, looking up earlier numbers and committing the result.

pub mod active;
pub mod edits;
pub mod finalizer;
pub mod initializer;
pub mod previous;
pub mod rest_timer;

pub use active::{ActiveSession, FinishedSession, SetCursor};
pub use finalizer::{
    ChangeSet, CommitKind, FinalizeDecision, FinalizeOutcome, Resolution, finalize, resolve,
};
pub use initializer::begin_session;
pub use previous::{PreviousPerformance, format_previous, previous_performance};
pub use rest_timer::{RestTimer, Tick};
