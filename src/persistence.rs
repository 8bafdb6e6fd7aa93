//! Local storage for the persisted collections.
//!
//! Loading never fails towards the caller: a missing file means "no data
//! yet" and a corrupt one is logged and treated the same way. Saving
//! reports errors so the store can log them.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use dirs_next as dirs;

use crate::error::{Result, StoreError};
use crate::model::{Routine, User, Workout};

/// Storage backend used by [`crate::store::SessionStore`].
pub trait Persistence {
    fn load_workouts(&self) -> Vec<Workout>;
    fn save_workouts(&self, workouts: &[Workout]) -> Result<()>;
    fn load_routines(&self) -> Vec<Routine>;
    fn save_routines(&self, routines: &[Routine]) -> Result<()>;
    fn load_user(&self) -> Option<User>;
    fn save_user(&self, user: &User) -> Result<()>;
}

const WORKOUTS_FILE: &str = "workouts.json";
const ROUTINES_FILE: &str = "routines.json";
const USER_FILE: &str = "user.json";

/// Default directory for the collections, under the platform data dir.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("strongme"))
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let data = serde_json::to_string_pretty(value)?;
    std::fs::write(path, data).map_err(|e| StoreError::io(path, e))
}

/// Read JSON from `path`. `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    Ok(Some(serde_json::from_str(&data)?))
}

fn load_or_default<T: DeserializeOwned>(path: &Path) -> Option<T> {
    match read_json(path) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring unreadable data in {}: {e}", path.display());
            None
        }
    }
}

/// One pretty-printed JSON file per collection inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at [`default_data_dir`].
    pub fn in_default_location() -> Result<Self> {
        default_data_dir().map(Self::new).ok_or(StoreError::NoDataDir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

impl Persistence for JsonFileStore {
    fn load_workouts(&self) -> Vec<Workout> {
        load_or_default(&self.path(WORKOUTS_FILE)).unwrap_or_default()
    }

    fn save_workouts(&self, workouts: &[Workout]) -> Result<()> {
        write_json(workouts, &self.path(WORKOUTS_FILE))
    }

    fn load_routines(&self) -> Vec<Routine> {
        load_or_default(&self.path(ROUTINES_FILE)).unwrap_or_default()
    }

    fn save_routines(&self, routines: &[Routine]) -> Result<()> {
        write_json(routines, &self.path(ROUTINES_FILE))
    }

    fn load_user(&self) -> Option<User> {
        load_or_default(&self.path(USER_FILE))
    }

    fn save_user(&self, user: &User) -> Result<()> {
        write_json(user, &self.path(USER_FILE))
    }
}

/// In-process backend holding serialized snapshots, so reads go through
/// the same encode/decode path as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    workouts: RefCell<Option<String>>,
    routines: RefCell<Option<String>>,
    user: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collections written so far.
    pub fn saved_collections(&self) -> usize {
        [&self.workouts, &self.routines, &self.user]
            .iter()
            .filter(|slot| slot.borrow().is_some())
            .count()
    }

    fn put<T: Serialize + ?Sized>(slot: &RefCell<Option<String>>, value: &T) -> Result<()> {
        *slot.borrow_mut() = Some(serde_json::to_string(value)?);
        Ok(())
    }

    fn get<T: DeserializeOwned>(slot: &RefCell<Option<String>>) -> Option<T> {
        let data = slot.borrow();
        let data = data.as_deref()?;
        match serde_json::from_str(data) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unreadable in-memory data: {e}");
                None
            }
        }
    }
}

impl Persistence for MemoryStore {
    fn load_workouts(&self) -> Vec<Workout> {
        Self::get(&self.workouts).unwrap_or_default()
    }

    fn save_workouts(&self, workouts: &[Workout]) -> Result<()> {
        Self::put(&self.workouts, workouts)
    }

    fn load_routines(&self) -> Vec<Routine> {
        Self::get(&self.routines).unwrap_or_default()
    }

    fn save_routines(&self, routines: &[Routine]) -> Result<()> {
        Self::put(&self.routines, routines)
    }

    fn load_user(&self) -> Option<User> {
        Self::get(&self.user)
    }

    fn save_user(&self, user: &User) -> Result<()> {
        Self::put(&self.user, user)
    }
}

impl<P: Persistence + ?Sized> Persistence for &P {
    fn load_workouts(&self) -> Vec<Workout> {
        (**self).load_workouts()
    }

    fn save_workouts(&self, workouts: &[Workout]) -> Result<()> {
        (**self).save_workouts(workouts)
    }

    fn load_routines(&self) -> Vec<Routine> {
        (**self).load_routines()
    }

    fn save_routines(&self, routines: &[Routine]) -> Result<()> {
        (**self).save_routines(routines)
    }

    fn load_user(&self) -> Option<User> {
        (**self).load_user()
    }

    fn save_user(&self, user: &User) -> Result<()> {
        (**self).save_user(user)
    }
}
