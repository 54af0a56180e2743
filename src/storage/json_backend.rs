use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use crate::utils::{app_data_dir, ensure_dir};

use super::{Result, StorageBackend};

const LEDGER_DIR: &str = "ledgers";
const LEDGER_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const STATE_FILE: &str = "state.json";

/// JSON file backend: one pretty-printed file per ledger name under the
/// managed data directory, written atomically via a sibling tmp file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    ledgers_dir: PathBuf,
    state_file: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_ledger: Option<String>,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        let ledgers_dir = root.join(LEDGER_DIR);
        ensure_dir(&ledgers_dir)?;
        let state_file = root.join(STATE_FILE);
        Ok(Self {
            ledgers_dir,
            state_file,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(app_data_dir())
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION))
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        write_atomic(&self.ledger_path(name), &json)
    }

    fn load(&self, name: &str) -> Result<Ledger> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(LedgerError::LedgerNotFound(name.to_string()));
        }
        let data = fs::read_to_string(&path)?;
        let ledger: Ledger = serde_json::from_str(&data)?;
        if ledger.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::UnsupportedSchema {
                found: ledger.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(ledger)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.ledgers_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(LedgerError::LedgerNotFound(name.to_string()));
        }
        fs::remove_file(&path)?;
        let state = self.read_state()?;
        if state.last_ledger.as_deref() == Some(canonical_name(name).as_str()) {
            self.record_last_ledger(None)?;
        }
        Ok(())
    }

    fn last_ledger(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.last_ledger)
    }

    fn record_last_ledger(&self, name: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_ledger = name.map(canonical_name);
        let data = serde_json::to_string_pretty(&state)?;
        write_atomic(&self.state_file, &data)
    }
}

fn canonical_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = path.with_extension(TMP_SUFFIX);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
