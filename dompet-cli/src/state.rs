use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$DOMPET_HOME`, or `~/.dompet`
pub fn dompet_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("DOMPET_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".dompet"))
}

pub fn ensure_dompet_home() -> Result<PathBuf> {
    let dir = dompet_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_ledger_path() -> Result<PathBuf> {
    Ok(ensure_dompet_home()?.join("ledger.json"))
}
