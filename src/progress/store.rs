use std::{
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::entities::{CheckInOutcome, DayLookup, DaySlot, LocalProgress};

/// Schema changes get a new file name instead of a migration.
pub const PROGRESS_FILE_NAME: &str = "progress_v6.json";

/// Interface for abstracting where the progress record lives.
pub trait ProgressStorage {
    /// Reads the stored record. `Ok(None)` means nothing was saved yet.
    fn read(&self) -> Result<Option<LocalProgress>>;

    /// Replaces the stored record with `progress`.
    fn write(&self, progress: &LocalProgress) -> Result<()>;
}

impl<T: Deref> ProgressStorage for T
where
    T::Target: ProgressStorage,
{
    fn read(&self) -> Result<Option<LocalProgress>> {
        self.deref().read()
    }

    fn write(&self, progress: &LocalProgress) -> Result<()> {
        self.deref().write(progress)
    }
}

/// The main realization of [ProgressStorage]. The whole record is kept as a single JSON document.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PROGRESS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<LocalProgress>> {
        debug!("Reading progress from {:?}", self.path);
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Can't read {:?}", self.path)),
        };
        let progress = serde_json::from_str(&content)
            .with_context(|| format!("Illegal progress json in {:?}", self.path))?;
        Ok(Some(progress))
    }

    fn write(&self, progress: &LocalProgress) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Can't create directory {dir:?}"))?;
        }
        let buffer = serde_json::to_vec(progress)?;
        std::fs::write(&self.path, buffer)
            .with_context(|| format!("Can't write {:?}", self.path))?;
        debug!("Saved progress to {:?}", self.path);
        Ok(())
    }
}

/// Owns persistence of [LocalProgress]. None of the operations fail: unreadable state falls back
/// to a fresh record and failed writes are logged and skipped, leaving the in-memory record as the
/// source of truth for the rest of the session.
pub struct ProgressStore<S: ProgressStorage> {
    storage: S,
}

impl<S: ProgressStorage> ProgressStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn load(&self, today: NaiveDate) -> LocalProgress {
        let mut progress = match self.storage.read() {
            Ok(Some(progress)) => progress,
            Ok(None) => {
                info!("No saved progress, starting fresh");
                LocalProgress::new(today)
            }
            Err(e) => {
                warn!("Saved progress is unusable, starting fresh: {e:?}");
                LocalProgress::new(today)
            }
        };

        if progress.dedupe_history() {
            warn!("Saved check-in history had repeated days, kept the first of each");
        }
        if progress.roll_over(today) {
            debug!("New day {today}, check-in slots were reset");
        }
        progress.recompute_level();
        progress
    }

    /// Returns whether the record reached the disk.
    pub fn save(&self, progress: &LocalProgress) -> bool {
        match self.storage.write(progress) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save progress, keeping it in memory only: {e:?}");
                false
            }
        }
    }

    pub fn recompute_level(&self, progress: &mut LocalProgress) {
        progress.recompute_level();
    }

    pub fn record_check_in(
        &self,
        progress: &mut LocalProgress,
        today: NaiveDate,
        slot: DaySlot,
        multiplier: f64,
    ) -> CheckInOutcome {
        let outcome = progress.check_in(today, slot, multiplier);
        if outcome.accepted {
            info!(
                "Checked in for the {slot} of {today}, +{} points",
                outcome.points_awarded
            );
            self.save(progress);
        } else {
            debug!("Check-in for the {slot} of {today} was already done");
        }
        outcome
    }

    /// Returns whether the note was stored. Blank notes are rejected.
    pub fn record_thought(&self, progress: &mut LocalProgress, date: NaiveDate, text: &str) -> bool {
        if !progress.write_thought(date, text) {
            return false;
        }
        info!("Stored thought for {date}");
        self.save(progress);
        true
    }

    pub fn lookup_day(&self, progress: &LocalProgress, date: NaiveDate) -> DayLookup {
        progress.lookup_day(date)
    }
}
