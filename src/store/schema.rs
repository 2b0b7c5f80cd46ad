use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ProblemId;

pub const EXPORT_VERSION: u32 = 1;

/// Portable progress snapshot written by `--export` and read by `--import`.
/// The completed-id list is the whole persisted state, so an export is a
/// full backup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub dsatrack_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub completed: Vec<ProblemId>,
}
