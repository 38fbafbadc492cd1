use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_dompet_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub user: UserSection,
    #[serde(default)]
    pub ledger: LedgerSection,
    #[serde(default)]
    pub log: LogSection,
    #[serde(default)]
    pub chat: ChatSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSection {
    /// Ledger key for this terminal user
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LedgerSection {
    /// "json" or "memory"
    pub backend: String,
    /// Defaults to ~/.dompet/ledger.json
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSection {
    /// tracing filter used when RUST_LOG is unset
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatSection {
    /// Append each turn to ~/.dompet/chat/YYYY-MM-DD.md
    pub transcript: bool,
}

impl Default for UserSection {
    fn default() -> Self {
        Self {
            id: "local".to_string(),
            name: "kamu".to_string(),
        }
    }
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            backend: "json".to_string(),
            path: None,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for ChatSection {
    fn default() -> Self {
        Self { transcript: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Json,
    Memory,
}

impl LedgerSection {
    pub fn backend(&self) -> Result<Backend> {
        match self.backend.trim().to_lowercase().as_str() {
            "json" | "" => Ok(Backend::Json),
            "memory" => Ok(Backend::Memory),
            other => bail!("unknown ledger backend '{other}' (expected json or memory)"),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_dompet_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Write the default config unless one exists. Returns whether a file was written.
pub fn init_config_at(p: &Path) -> Result<bool> {
    if p.exists() {
        return Ok(false);
    }
    save_config_to(p, &Config::default())?;
    Ok(true)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if init_config_at(&p)? {
        println!("Wrote {}", p.display());
    } else {
        println!("Config already exists: {}", p.display());
    }
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    println!("# {}", p.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.user.id, "local");
        assert_eq!(cfg.log.level, "warn");
        assert!(cfg.chat.transcript);
        assert_eq!(cfg.ledger.backend().unwrap(), Backend::Json);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[user]\nname = \"Budi\"\n\n[ledger]\nbackend = \"memory\"\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.user.name, "Budi");
        assert_eq!(cfg.user.id, "local");
        assert_eq!(cfg.ledger.backend().unwrap(), Backend::Memory);
        assert_eq!(cfg.log, LogSection::default());
    }

    #[test]
    fn test_init_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        assert!(init_config_at(&p).unwrap());
        assert!(!init_config_at(&p).unwrap());
        assert_eq!(load_config_from(&p).unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let section = LedgerSection {
            backend: "sqlite".to_string(),
            path: None,
        };
        assert!(section.backend().is_err());
    }
}
