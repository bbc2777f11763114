//! Schedule persistence.
//!
//! `schedule.json` lives next to a `schedule.json.lock` file. Readers hold a
//! shared `fs2` lock on the lock file and writers an exclusive one. The data
//! file is always replaced by rename, so it is never the file that is locked.
//! [`WorkoutSchedule::update_file`] keeps the exclusive lock across its whole
//! load-modify-save, so concurrent updates of different days all land.

use crate::{Error, Result, WorkoutSchedule};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Path of the lock file guarding a schedule file
pub fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("schedule"));
    name.push(".lock");
    path.with_file_name(name)
}

/// Held lock on a schedule's lock file; released on drop
struct ScheduleLock {
    file: File,
}

impl ScheduleLock {
    fn open(path: &Path) -> Result<File> {
        let lock = lock_path(path);
        if let Some(parent) = lock.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(lock)?)
    }

    fn shared(path: &Path) -> Result<Self> {
        let file = Self::open(path)?;
        file.lock_shared()?;
        Ok(Self { file })
    }

    fn exclusive(path: &Path) -> Result<Self> {
        let file = Self::open(path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for ScheduleLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release schedule lock: {}", e);
        }
    }
}

impl WorkoutSchedule {
    /// Load the schedule from `path`
    ///
    /// A missing file yields the default week. A file that exists but does not
    /// parse is reported as [`Error::CorruptSchedule`] and left untouched.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No schedule file at {:?}, using default schedule", path);
            return Ok(Self::default());
        }

        let _lock = ScheduleLock::shared(path)?;
        read_schedule(path)
    }

    /// Save the schedule, replacing the file atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let _lock = ScheduleLock::exclusive(path)?;
        write_schedule(self, path)
    }

    /// Load the schedule, modify it, and save it back under one exclusive lock
    ///
    /// Nothing is written if the file is corrupt or `f` fails.
    pub fn update_file<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut WorkoutSchedule) -> Result<()>,
    {
        let _lock = ScheduleLock::exclusive(path)?;
        let mut schedule = read_schedule(path)?;
        f(&mut schedule)?;
        write_schedule(&schedule, path)?;
        Ok(schedule)
    }
}

/// Read and parse the schedule; the caller holds the lock
fn read_schedule(path: &Path) -> Result<WorkoutSchedule> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("No schedule file at {:?}, using default schedule", path);
            return Ok(WorkoutSchedule::default());
        }
        Err(e) => return Err(e.into()),
    };

    let schedule: WorkoutSchedule =
        serde_json::from_str(&contents).map_err(|e| Error::CorruptSchedule {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!("Loaded {} scheduled days from {:?}", schedule.len(), path);
    Ok(schedule)
}

/// Write through a temp file in the same directory, then rename; the caller
/// holds the exclusive lock
fn write_schedule(schedule: &WorkoutSchedule, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let json = serde_json::to_string_pretty(schedule)?;
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(json.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Saved {} scheduled days to {:?}", schedule.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Weekday, WorkoutDay, WorkoutPatch, WorkoutType};
    use chrono::NaiveDate;

    fn week() -> WorkoutSchedule {
        WorkoutSchedule::default_week(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schedule.json");

        let mut schedule = week();
        schedule
            .update(
                Weekday::Sunday,
                WorkoutPatch {
                    workout_type: Some(WorkoutType::Sports),
                    notes: Some("pickup soccer".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        schedule.save(&path).unwrap();
        let loaded = WorkoutSchedule::load(&path).unwrap();

        assert_eq!(loaded, schedule);
        assert_eq!(
            loaded.get(Weekday::Sunday).unwrap().notes.as_deref(),
            Some("pickup soccer")
        );
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let schedule = WorkoutSchedule::load(&path).unwrap();
        assert_eq!(schedule.len(), 7);
        assert!(!lock_path(&path).exists());
    }

    #[test]
    fn test_lock_path_is_sibling() {
        let path = Path::new("/data/nucleus/schedule.json");
        assert_eq!(
            lock_path(path),
            PathBuf::from("/data/nucleus/schedule.json.lock")
        );
    }

    #[test]
    fn test_corrupted_schedule_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schedule.json");

        std::fs::write(&path, "{ invalid json }").unwrap();

        match WorkoutSchedule::load(&path) {
            Err(Error::CorruptSchedule { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected corrupt schedule error, got {:?}", other),
        }
    }

    #[test]
    fn test_update_file_leaves_corrupt_file_alone() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schedule.json");
        std::fs::write(&path, r#"[{"day":"Monday","calories_burned":null}]"#).unwrap();

        let result = WorkoutSchedule::update_file(&path, |s| {
            s.update(
                Weekday::Monday,
                WorkoutPatch {
                    duration: Some(10),
                    ..Default::default()
                },
            )?;
            Ok(())
        });

        assert!(matches!(result, Err(Error::CorruptSchedule { .. })));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"[{"day":"Monday","calories_burned":null}]"#
        );
    }

    #[test]
    fn test_update_file_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schedule.json");
        week().save(&path).unwrap();

        WorkoutSchedule::update_file(&path, |schedule| {
            schedule.update(
                Weekday::Tuesday,
                WorkoutPatch {
                    duration: Some(50),
                    ..Default::default()
                },
            )?;
            Ok(())
        })
        .unwrap();

        let loaded = WorkoutSchedule::load(&path).unwrap();
        assert_eq!(loaded.get(Weekday::Tuesday).unwrap().duration, 50);
    }

    #[test]
    fn test_update_file_error_leaves_file_untouched() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schedule.json");
        let schedule = WorkoutSchedule::from_days(vec![WorkoutDay::rest(Weekday::Monday)]).unwrap();
        schedule.save(&path).unwrap();

        let result = WorkoutSchedule::update_file(&path, |s| {
            s.update(Weekday::Friday, WorkoutPatch::default())?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::DayNotFound(Weekday::Friday))));
        assert_eq!(WorkoutSchedule::load(&path).unwrap(), schedule);
    }

    #[test]
    fn test_concurrent_updates_all_land() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schedule.json");

        for round in 0..10u32 {
            week().save(&path).unwrap();
            let duration = 900 + round;

            let handles: Vec<_> = Weekday::ALL
                .into_iter()
                .map(|day| {
                    let path = path.clone();
                    std::thread::spawn(move || {
                        WorkoutSchedule::update_file(&path, |s| {
                            s.update(
                                day,
                                WorkoutPatch {
                                    duration: Some(duration),
                                    ..Default::default()
                                },
                            )?;
                            Ok(())
                        })
                        .unwrap();
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            let loaded = WorkoutSchedule::load(&path).unwrap();
            let updated = loaded.iter().filter(|d| d.duration == duration).count();
            assert_eq!(updated, 7, "round {} lost updates", round);
        }
    }

    #[test]
    fn test_atomic_save_leaves_only_data_and_lock() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schedule.json");

        week().save(&path).unwrap();

        let mut names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        names.sort();
        assert_eq!(names, vec!["schedule.json", "schedule.json.lock"]);
    }
}
