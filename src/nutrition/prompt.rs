// ABOUTME: Assembles the nutritionist prompt from system prompt, meal plan
// ABOUTME: context, and the user's request.

use std::path::Path;

use crate::error::PromptError;

/// Combine the nutritionist system prompt, meal plan context, and user
/// request into the flat prompt the providers accept.
pub fn build_prompt(system_prompt: &str, meal_plan_context: &str, user_message: &str) -> String {
    format!("{system_prompt}\n\n{meal_plan_context}\n\nUser request: {user_message}")
}

/// Load a system prompt verbatim from a text file, trimming surrounding
/// whitespace. The prompt file is deployed alongside the application.
pub fn load_system_prompt(path: impl AsRef<Path>) -> Result<String, PromptError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| PromptError::NotFound {
        path: path.display().to_string(),
        source,
    })?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod prompt_test {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_build_prompt_exact_format() {
        let prompt = build_prompt(
            "You are a nutritionist.",
            "Current plan: oats",
            "Swap the oats for eggs",
        );
        assert_eq!(
            prompt,
            "You are a nutritionist.\n\nCurrent plan: oats\n\nUser request: Swap the oats for eggs"
        );
    }

    #[test]
    fn test_build_prompt_empty_context() {
        let prompt = build_prompt("System.", "", "Hi");
        assert_eq!(prompt, "System.\n\n\n\nUser request: Hi");
    }

    #[test]
    fn test_load_system_prompt_trims() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\n  You are a nutritionist.  \n\n").unwrap();

        let prompt = load_system_prompt(file.path()).unwrap();
        assert_eq!(prompt, "You are a nutritionist.");
    }

    #[test]
    fn test_load_system_prompt_missing_file() {
        let result = load_system_prompt("/nonexistent/nutritionist_system_prompt.txt");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("nutritionist_system_prompt.txt"));
    }
}
