use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A simulated AI assistant whose answer is sampled during a visibility run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    /// Instruction describing how this assistant tends to answer.
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct PersonasFile {
    pub personas: Vec<Persona>,
}

/// Built-in personas used when no personas file is present.
#[must_use]
pub fn default_personas() -> Vec<Persona> {
    let persona = |id: &str, name: &str, description: &str| Persona {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    };
    vec![
        persona(
            "chatgpt",
            "ChatGPT",
            "A general-purpose assistant that gives balanced, well-structured product recommendations.",
        ),
        persona(
            "gemini",
            "Gemini",
            "A search-grounded assistant that favours brands with strong web presence and recent coverage.",
        ),
        persona(
            "claude",
            "Claude",
            "A careful assistant that weighs trade-offs and mentions caveats alongside recommendations.",
        ),
        persona(
            "perplexity",
            "Perplexity",
            "An answer engine that cites sources and ranks options by review consensus.",
        ),
    ]
}

/// Load and validate personas from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_personas(path: &Path) -> Result<PersonasFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PersonasFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: PersonasFile =
        serde_yaml::from_str(&content).map_err(ConfigError::PersonasFileParse)?;

    validate_personas(&file)?;

    Ok(file)
}

fn validate_personas(file: &PersonasFile) -> Result<(), ConfigError> {
    if file.personas.is_empty() {
        return Err(ConfigError::Validation(
            "at least one persona is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for persona in &file.personas {
        if persona.id.trim().is_empty() || persona.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "persona id and name must be non-empty".to_string(),
            ));
        }
        if !seen.insert(persona.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate persona id: '{}'",
                persona.id
            )));
        }
    }

    Ok(())
}
