//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    EngineSettings, GenerationDefaults, InstitutionConfig, SeedData, TimetableConfig,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── institution.yaml  # Institution name
/// ├── generation.yaml   # Default period layout
/// ├── engine.yaml       # Server and persistence settings
/// └── seed.yaml         # Optional initial records for the in-memory store
/// ```
///
/// # Example
///
/// ```no_run
/// use timetable_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Lessons per shift: {}", loader.generation().lesson_count);
/// # Ok::<(), timetable_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TimetableConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a required file is missing or any file contains
    /// invalid YAML. `seed.yaml` is optional.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let institution = Self::load_yaml::<InstitutionConfig>(&path.join("institution.yaml"))?;
        let generation = Self::load_yaml::<GenerationDefaults>(&path.join("generation.yaml"))?;
        let engine = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;

        let seed_path = path.join("seed.yaml");
        let seed = if seed_path.exists() {
            Some(Self::load_yaml::<SeedData>(&seed_path)?)
        } else {
            None
        };

        Ok(Self {
            config: TimetableConfig::new(institution, generation, engine, seed),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the institution metadata.
    pub fn institution(&self) -> &InstitutionConfig {
        self.config.institution()
    }

    /// Returns the default period layout.
    pub fn generation(&self) -> &GenerationDefaults {
        self.config.generation()
    }

    /// Returns the runtime settings.
    pub fn engine(&self) -> &EngineSettings {
        self.config.engine()
    }

    /// Returns the seed data, if any.
    pub fn seed(&self) -> Option<&SeedData> {
        self.config.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftId, TeacherId};

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.institution().name, "Escola Estadual Modelo");
    }

    #[test]
    fn test_generation_defaults_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.generation(), &GenerationDefaults::default());
    }

    #[test]
    fn test_engine_settings_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.engine().server.bind_address, "127.0.0.1:8080");
        assert!(!loader.engine().persistence.reject_double_booking);
    }

    #[test]
    fn test_seed_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let seed = loader.seed().expect("seed.yaml should be present");

        assert_eq!(seed.shifts.len(), 2);
        assert_eq!(seed.shifts[0].id, ShiftId(1));
        assert!(seed.teachers.iter().any(|t| t.id == TeacherId(1)));
        assert!(!seed.teacher_subject_links.is_empty());
        assert!(!seed.class_subject_links.is_empty());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("institution.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
