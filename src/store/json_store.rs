use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::catalog::ProblemId;
use crate::store::schema::{EXPORT_VERSION, ExportData};

const PROGRESS_FILE: &str = "progress.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Fail-open read: an absent or unparsable file yields the default.
    /// Progress corruption is never surfaced to the user.
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    /// Atomic save: write to a sibling .tmp, fsync, rename over the target.
    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// The persisted value is a bare JSON array of completed problem ids.
    pub fn load_progress(&self) -> BTreeSet<ProblemId> {
        let ids: Vec<ProblemId> = self.load(PROGRESS_FILE);
        ids.into_iter().collect()
    }

    pub fn save_progress(&self, progress: &BTreeSet<ProblemId>) -> Result<()> {
        let ids: Vec<ProblemId> = progress.iter().copied().collect();
        self.save(PROGRESS_FILE, &ids)
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        let data = ExportData {
            dsatrack_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            completed: self.load_progress().into_iter().collect(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Replace stored progress with the export's id list. Returns the number
    /// of imported ids.
    pub fn import(&self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path)?;
        let data: ExportData = serde_json::from_str(&content)?;
        if data.dsatrack_export_version != EXPORT_VERSION {
            bail!(
                "Unsupported export version: {} (expected {})",
                data.dsatrack_export_version,
                EXPORT_VERSION
            );
        }
        let progress: BTreeSet<ProblemId> = data.completed.into_iter().collect();
        self.save_progress(&progress)?;
        Ok(progress.len())
    }
}
