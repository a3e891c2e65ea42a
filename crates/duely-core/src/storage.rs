use std::{collections::HashSet, path::PathBuf};

use chrono::NaiveDate;

use duely_domain::BillBook;

use crate::CoreError;

/// Describes a persisted dated backup of the bill book.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub date: NaiveDate,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Abstraction over persistence backends capable of storing the bill book
/// and its backups.
pub trait BillStorage: Send + Sync {
    fn save(&self, book: &BillBook) -> Result<(), CoreError>;
    /// `Ok(None)` means no data file exists yet.
    fn load(&self) -> Result<Option<BillBook>, CoreError>;
    fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError>;
}

/// Detects dangling references and duplicate records within a book snapshot.
pub fn book_warnings(book: &BillBook) -> Vec<String> {
    let template_ids: HashSet<_> = book.templates.iter().map(|t| t.id).collect();
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for status in &book.statuses {
        if !template_ids.contains(&status.template_id) {
            warnings.push(format!(
                "status {} references unknown template {}",
                status.id, status.template_id
            ));
        }
        if !seen.insert((status.template_id, status.month)) {
            warnings.push(format!(
                "duplicate status for template {} in {}",
                status.template_id, status.month
            ));
        }
    }
    warnings
}
