//! The fixed set of specialist personas a query can be routed to.

use std::collections::HashSet;

use crate::errors::RegistryError;
use crate::providers::configs::GenerationConfig;

pub const MANAGER: &str = "Manager";
pub const DEFAULT_SPECIALIST: &str = "Motivation";

/// Marker the manager may answer with when a query spans several topics
const MULTI_TOPIC: &str = "Multi";

const STANDARD_SPECIALISTS: [(&str, &str); 6] = [
    ("Web", "Summarize latest factual information clearly."),
    ("Motivation", "Give uplifting motivational advice."),
    ("Finance", "Provide budgeting & saving tips."),
    (
        "Health",
        "Give general wellness and lifestyle advice (no medical diagnosis).",
    ),
    ("Business", "Give strategy and growth ideas."),
    (
        "Marketing",
        "Provide creative marketing and campaign strategies.",
    ),
];

/// A named persona with its own system instruction and generation settings
#[derive(Debug, Clone, PartialEq)]
pub struct Specialist {
    pub name: String,
    pub instruction: String,
    pub config: GenerationConfig,
}

impl Specialist {
    pub fn new<N: Into<String>, I: Into<String>>(
        name: N,
        instruction: I,
        config: GenerationConfig,
    ) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            config,
        }
    }
}

/// Read-only mapping from topic name to specialist, plus the manager used
/// for classification. Iteration order is the order specialists were given
/// in and is significant for routing.
#[derive(Debug, Clone)]
pub struct SpecialistRegistry {
    specialists: Vec<Specialist>,
    manager: Specialist,
    default_name: String,
}

impl SpecialistRegistry {
    pub fn new(
        specialists: Vec<Specialist>,
        manager: Specialist,
        default_name: &str,
    ) -> Result<Self, RegistryError> {
        if specialists.is_empty() {
            return Err(RegistryError::NoSpecialists);
        }

        let mut seen = HashSet::new();
        for specialist in &specialists {
            if !seen.insert(specialist.name.to_lowercase()) {
                return Err(RegistryError::DuplicateName(specialist.name.clone()));
            }
        }
        if seen.contains(&manager.name.to_lowercase()) {
            return Err(RegistryError::ManagerCollision(manager.name));
        }

        let registry = Self {
            specialists,
            manager,
            default_name: String::new(),
        };
        registry.with_default(default_name)
    }

    /// The observed topic set, all sharing one generation config
    pub fn standard(config: GenerationConfig) -> Self {
        let specialists: Vec<Specialist> = STANDARD_SPECIALISTS
            .iter()
            .map(|(name, instruction)| Specialist::new(*name, *instruction, config.clone()))
            .collect();
        let manager = Specialist::new(MANAGER, classification_instruction(&specialists), config);

        Self {
            specialists,
            manager,
            default_name: DEFAULT_SPECIALIST.to_string(),
        }
    }

    /// Replace the fallback used when classification matches no topic
    pub fn with_default(mut self, name: &str) -> Result<Self, RegistryError> {
        let resolved = self
            .get(name)
            .map(|s| s.name.clone())
            .ok_or_else(|| RegistryError::UnknownDefault(name.to_string()))?;
        self.default_name = resolved;
        Ok(self)
    }

    /// Look up a topic specialist by exact name. The manager is not returned.
    pub fn get(&self, name: &str) -> Option<&Specialist> {
        self.specialists.iter().find(|s| s.name == name)
    }

    pub fn manager(&self) -> &Specialist {
        &self.manager
    }

    pub fn default_specialist(&self) -> &Specialist {
        // default_name is validated on construction
        self.get(&self.default_name).unwrap_or(&self.specialists[0])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Specialist> {
        self.specialists.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.specialists.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Manager instruction listing every topic name followed by the multi-topic marker
pub fn classification_instruction(specialists: &[Specialist]) -> String {
    let names: Vec<&str> = specialists.iter().map(|s| s.name.as_str()).collect();
    format!(
        "Classify query into: {}, or {}.",
        names.join(", "),
        MULTI_TOPIC
    )
}
