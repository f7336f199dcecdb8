use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::performance::WEAK_THRESHOLD;
use crate::planner::generator::DEFAULT_STUDY_TIME;

fn default_name() -> String {
    "Student".to_string()
}
fn default_study_time() -> String {
    DEFAULT_STUDY_TIME.to_string()
}
fn default_weak_threshold() -> u32 {
    WEAK_THRESHOLD
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub usn: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub semester: u8,
}

impl Default for StudentConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            usn: String::new(),
            department: String::new(),
            semester: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Time of day given to generated sessions, `HH:MM`.
    #[serde(default = "default_study_time")]
    pub study_time: String,
    /// Percentage below which a subject counts as weak.
    #[serde(default = "default_weak_threshold")]
    pub weak_threshold: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            study_time: default_study_time(),
            weak_threshold: default_weak_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub student: StudentConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub journal: JournalConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "vidyamitra")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("vidyamitra.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        log::info!("saved config to {:?}", path);
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.planner.study_time, "19:00");
        assert_eq!(config.planner.weak_threshold, 70);
        assert!(config.journal.enabled);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[student]\nname = \"Asha\"\n\n[planner]\nweak_threshold = 60\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.student.name, "Asha");
        assert_eq!(config.planner.weak_threshold, 60);
        assert_eq!(config.planner.study_time, "19:00");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.student.usn = "1XX22CS001".into();
        config.planner.study_time = "06:00".into();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.student.usn, "1XX22CS001");
        assert_eq!(loaded.planner.study_time, "06:00");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[planner\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
