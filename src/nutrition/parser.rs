// ABOUTME: Extracts <chat> and <meal-plan> sections from nutritionist completions.
// ABOUTME: Missing tags produce a sentinel payload instead of an error.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

/// Placeholder chat text used when the completion lacks the required tags.
pub const PARSING_ERROR_MESSAGE: &str = "PARSING ERROR";

/// Sections extracted from a nutritionist completion.
///
/// Derived at the web boundary, never persisted. `raw` always holds the
/// original completion so callers can log or recover it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedResponse {
    pub chat: String,
    pub meal_plan: String,
    pub raw: String,
    pub parsing_error: bool,
}

fn chat_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<chat>\s*(.*?)\s*</chat>").unwrap())
}

fn meal_plan_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<meal-plan>\s*(.*?)\s*</meal-plan>").unwrap())
}

/// Parse a nutritionist completion into its chat and meal-plan sections.
///
/// The model is instructed to wrap its reply in `<chat>` and `<meal-plan>`
/// tags. Both must be present; the first occurrence of each wins, nested or
/// duplicate tags get no special handling. When either is missing the result
/// carries the sentinel chat text, an empty meal plan, and `parsing_error`.
pub fn parse_nutritionist_response(response_text: &str) -> ParsedResponse {
    let chat = chat_pattern()
        .captures(response_text)
        .map(|captures| captures[1].trim().to_string());
    let meal_plan = meal_plan_pattern()
        .captures(response_text)
        .map(|captures| captures[1].trim().to_string());

    match (chat, meal_plan) {
        (Some(chat), Some(meal_plan)) => ParsedResponse {
            chat,
            meal_plan,
            raw: response_text.to_string(),
            parsing_error: false,
        },
        _ => {
            warn!("nutritionist response missing <chat> or <meal-plan> tags");
            ParsedResponse {
                chat: PARSING_ERROR_MESSAGE.to_string(),
                meal_plan: String::new(),
                raw: response_text.to_string(),
                parsing_error: true,
            }
        }
    }
}
