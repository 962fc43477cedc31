use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::EngineError;

/// Loads prompts from a YAML or JSON file. Accepted shapes are a
/// `prompts:` document, a bare list, or a single string. Blank entries
/// are dropped.
pub fn load_prompts(path: impl AsRef<Path>) -> Result<Vec<String>, EngineError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EngineError::MissingPromptsFile(path.display().to_string()));
    }

    let raw = fs::read_to_string(path).map_err(|err| EngineError::from_io(path, err))?;
    parse_prompts(&raw, path)
}

fn parse_prompts(raw: &str, path: &Path) -> Result<Vec<String>, EngineError> {
    let mut attempts = Vec::new();

    if let Ok(doc) = serde_yaml::from_str::<PromptDocument>(raw) {
        return Ok(clean(doc.prompts));
    }

    attempts.push("prompts document".to_string());

    if let Ok(list) = serde_yaml::from_str::<Vec<String>>(raw) {
        return Ok(clean(list));
    }

    attempts.push("list".to_string());

    if let Ok(prompt) = serde_yaml::from_str::<String>(raw) {
        return Ok(clean(vec![prompt]));
    }

    attempts.push("single".to_string());

    let message = format!("unable to parse prompts file using {:?} formats", attempts);
    Err(EngineError::prompts_error(path.to_path_buf(), message))
}

/// Trims prompts and drops the blank ones.
pub fn clean(prompts: impl IntoIterator<Item = String>) -> Vec<String> {
    prompts
        .into_iter()
        .map(|prompt| prompt.trim().to_string())
        .filter(|prompt| !prompt.is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
struct PromptDocument {
    prompts: Vec<String>,
}
