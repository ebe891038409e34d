//! Configuration types for the timetable engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::models::{ClassGroup, ClassSubjectLink, Shift, Subject, Teacher, TeacherSubjectLink};

/// Metadata about the institution, from `institution.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionConfig {
    /// The institution's display name.
    pub name: String,
}

/// Default period layout used when a generation request leaves a parameter
/// out, from `generation.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationDefaults {
    /// Number of lessons per shift.
    pub lesson_count: u32,
    /// Lesson length in minutes.
    pub lesson_minutes: u32,
    /// Break length in minutes.
    pub break_minutes: u32,
    /// The lesson after which the break is inserted.
    pub break_after_lesson: u32,
    /// Label given to the break.
    pub break_label: String,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            lesson_count: 5,
            lesson_minutes: 50,
            break_minutes: 20,
            break_after_lesson: 3,
            break_label: "Intervalo".to_string(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Address the server listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersistenceSettings {
    /// Reject entries that overlap an existing entry of the same teacher or
    /// class group on the same day. Off by default.
    #[serde(default)]
    pub reject_double_booking: bool,
}

/// Runtime settings, from `engine.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Persistence settings.
    #[serde(default)]
    pub persistence: PersistenceSettings,
}

/// Initial records for the in-memory store, from the optional `seed.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Shifts.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Teachers.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Subjects.
    #[serde(default)]
    pub subjects: Vec<Subject>,
    /// Class groups.
    #[serde(default)]
    pub class_groups: Vec<ClassGroup>,
    /// Teacher↔subject links.
    #[serde(default)]
    pub teacher_subject_links: Vec<TeacherSubjectLink>,
    /// Class-group↔subject links.
    #[serde(default)]
    pub class_subject_links: Vec<ClassSubjectLink>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct TimetableConfig {
    institution: InstitutionConfig,
    generation: GenerationDefaults,
    engine: EngineSettings,
    seed: Option<SeedData>,
}

impl TimetableConfig {
    /// Creates a new TimetableConfig from its component parts.
    pub fn new(
        institution: InstitutionConfig,
        generation: GenerationDefaults,
        engine: EngineSettings,
        seed: Option<SeedData>,
    ) -> Self {
        Self {
            institution,
            generation,
            engine,
            seed,
        }
    }

    /// Returns the institution metadata.
    pub fn institution(&self) -> &InstitutionConfig {
        &self.institution
    }

    /// Returns the default period layout.
    pub fn generation(&self) -> &GenerationDefaults {
        &self.generation
    }

    /// Returns the runtime settings.
    pub fn engine(&self) -> &EngineSettings {
        &self.engine
    }

    /// Returns the seed data, if a seed file was present.
    pub fn seed(&self) -> Option<&SeedData> {
        self.seed.as_ref()
    }
}
