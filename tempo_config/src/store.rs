//! File helpers for the persisted speed record.

use std::{fs, io::Write, path::Path};

use crate::SpeedState;

/// Write `bytes` to `path` via a sibling temp file and rename, so a crash never
/// leaves a half-written record behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("new");
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    fs::rename(tmp, path)
}

/// Read the record at `path`. A missing file is `Ok(None)` so callers fall back
/// to defaults; unreadable or unparsable files are errors.
pub fn load_state_file(path: &Path) -> eyre::Result<Option<SpeedState>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => eyre::bail!("read speed record {:?}: {}", path, e),
    };
    let state = crate::load_toml(&text)
        .map_err(|e| eyre::eyre!("parse speed record {:?}: {}", path, e))?;
    Ok(Some(state))
}

/// Persist the whole record to `path`.
pub fn save_state_file(path: &Path, state: &SpeedState) -> eyre::Result<()> {
    let text = crate::to_toml(state).map_err(|e| eyre::eyre!("encode speed record: {}", e))?;
    write_atomic(path, text.as_bytes())
        .map_err(|e| eyre::eyre!("write speed record {:?}: {}", path, e))
}
