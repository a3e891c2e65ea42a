//! duely-storage-json
//!
//! Filesystem-backed JSON persistence for the bill book: atomic saves,
//! one dated backup per calendar day, retention pruning, and quarantine
//! of files that no longer decode.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, warn};

use duely_core::{
    storage::{BackupInfo, BillStorage},
    CoreError,
};
use duely_domain::BillBook;

const DATA_FILE: &str = "bills.json";
const LEGACY_FILE: &str = "bills.legacy.json";
const BACKUP_PREFIX: &str = "bills.";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_DATE_FORMAT: &str = "%Y-%m-%d";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// Filesystem-backed JSON persistence for the bill book and its backups.
#[derive(Debug, Clone)]
pub struct JsonBillStorage {
    data_dir: PathBuf,
    retention_days: u32,
}

impl JsonBillStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(data_dir, DEFAULT_RETENTION_DAYS)
    }

    /// Retention of 0 disables backup pruning.
    pub fn with_retention(data_dir: PathBuf, retention_days: u32) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            retention_days,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }

    pub fn legacy_path(&self) -> PathBuf {
        self.data_dir.join(LEGACY_FILE)
    }

    fn backup_path_for(&self, date: NaiveDate) -> PathBuf {
        self.data_dir.join(format!(
            "{}{}.{}",
            BACKUP_PREFIX,
            date.format(BACKUP_DATE_FORMAT),
            BACKUP_EXTENSION
        ))
    }

    /// Copies the current data file to `bills.YYYY-MM-DD.json` unless a
    /// backup for `today` already exists.
    fn create_daily_backup(&self, today: NaiveDate) -> Result<(), CoreError> {
        let data_path = self.data_path();
        if !data_path.exists() {
            return Ok(());
        }
        let backup_path = self.backup_path_for(today);
        if backup_path.exists() {
            return Ok(());
        }
        fs::copy(&data_path, &backup_path)?;
        debug!(backup = %backup_path.display(), "daily backup created");
        Ok(())
    }

    fn prune_backups(&self, today: NaiveDate) -> Result<(), CoreError> {
        if self.retention_days == 0 {
            return Ok(());
        }
        let cutoff = today - Duration::days(i64::from(self.retention_days));
        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(date) = backup_date(name) else {
                continue;
            };
            if date < cutoff {
                if let Err(err) = fs::remove_file(&path) {
                    warn!(backup = %path.display(), %err, "failed to prune old backup");
                } else {
                    debug!(backup = %path.display(), "pruned old backup");
                }
            }
        }
        Ok(())
    }
}

impl BillStorage for JsonBillStorage {
    fn save(&self, book: &BillBook) -> Result<(), CoreError> {
        let today = Local::now().date_naive();
        self.create_daily_backup(today)?;
        self.prune_backups(today)?;

        let json = serde_json::to_string_pretty(book)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let path = self.data_path();
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        debug!(
            templates = book.templates.len(),
            statuses = book.statuses.len(),
            "bill book saved"
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<BillBook>, CoreError> {
        let path = self.data_path();
        if !path.exists() {
            debug!(path = %path.display(), "no data file, starting empty");
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        match serde_json::from_str::<BillBook>(&data) {
            Ok(book) => {
                debug!(templates = book.templates.len(), "bill book loaded");
                Ok(Some(book))
            }
            Err(err) => {
                // Keep the unreadable file around for manual recovery.
                let legacy = self.legacy_path();
                if let Err(copy_err) = fs::copy(&path, &legacy) {
                    warn!(%copy_err, "failed to quarantine unreadable data file");
                } else {
                    warn!(quarantine = %legacy.display(), "unreadable data file quarantined");
                }
                Err(CoreError::Storage(format!(
                    "could not decode {}: {} (copy kept at {})",
                    path.display(),
                    err,
                    legacy.display()
                )))
            }
        }
    }

    fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }
        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(date) = backup_date(name) else {
                continue;
            };
            let size_bytes = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
            backups.push(BackupInfo {
                date,
                path,
                size_bytes,
            });
        }
        backups.sort_by_key(|backup| Reverse(backup.date));
        Ok(backups)
    }
}

/// Parses the date out of a `bills.YYYY-MM-DD.json` file name. The live data
/// file and the quarantine file do not match.
fn backup_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    NaiveDate::parse_from_str(stem, BACKUP_DATE_FORMAT).ok()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
