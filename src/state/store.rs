// src/state/store.rs

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::errors::StateCorruptError;
use crate::state::signature::Signature;

/// Persisted mapping of input name to its last-seen signature.
///
/// Serialized as a plain JSON object. There is no schema version; the file is
/// rewritten in full after every pass.
pub type StateRecord = BTreeMap<String, Signature>;

/// Read the state file.
///
/// A missing file is a normal first run and yields an empty record. An
/// existing but unparsable file is surfaced as [`StateCorruptError`]; the
/// orchestrator recovers by treating it as empty.
pub fn load_state(path: &Path) -> Result<StateRecord, StateCorruptError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = ?path, "no state file yet; starting from empty state");
            return Ok(StateRecord::new());
        }
        Err(e) => {
            // Unreadable is indistinguishable from corrupt for our purposes:
            // nothing is known about previous signatures.
            return Err(StateCorruptError {
                path: path.to_path_buf(),
                source: serde_json::Error::io(e),
            });
        }
    };

    let record: StateRecord =
        serde_json::from_str(&contents).map_err(|source| StateCorruptError {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = ?path, entries = record.len(), "loaded state file");
    Ok(record)
}

/// Overwrite the state file with the given record.
pub fn persist_state(path: &Path, record: &StateRecord) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json)?;

    debug!(path = ?path, entries = record.len(), "persisted state file");
    Ok(())
}
