//! Configuration loading and management for the Timetable Construction Engine.
//!
//! This module loads the institution metadata, the default period layout,
//! runtime settings and optional seed records from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timetable_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded institution: {}", config.institution().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineSettings, GenerationDefaults, InstitutionConfig, PersistenceSettings, SeedData,
    ServerSettings, TimetableConfig,
};
