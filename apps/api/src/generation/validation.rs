use crate::generation::schema::TITLE_COUNT;
use crate::models::content::{GeneratedResult, ValidationOutcome};

pub const MAX_TITLE_CHARS: usize = 80;

/// Word floor actually enforced. The style guide asks for 8 to 12 words; the
/// check is relaxed to absorb natural-language variance.
pub const MIN_TITLE_WORDS: usize = 6;

/// Hashtags, the pipe and emoji that belong in the footer, never in a title.
const FORBIDDEN_SYMBOLS: &[char] = &['#', '|', '⚽', '✅', '🚀', '📍', '🧭'];

/// Checks the titles of a generated result against the style rules.
///
/// Rules, in evaluation order:
/// - exactly `TITLE_COUNT` titles (if not, no per-title rule runs)
/// - per title: at most `MAX_TITLE_CHARS` characters
/// - per title: at least `MIN_TITLE_WORDS` whitespace-separated words
/// - per title: none of `FORBIDDEN_SYMBOLS`
///
/// The caption is not checked. Error messages use 1-based title indices.
pub fn validate(result: &GeneratedResult) -> ValidationOutcome {
    let mut errors = Vec::new();

    if result.titles.len() != TITLE_COUNT {
        errors.push(format!(
            "Esperava-se {} títulos, recebeu {}.",
            TITLE_COUNT,
            result.titles.len()
        ));
    } else {
        for (idx, title) in result.titles.iter().enumerate() {
            let position = idx + 1;

            let char_count = title.chars().count();
            if char_count > MAX_TITLE_CHARS {
                errors.push(format!(
                    "Título {} excede {} caracteres ({}).",
                    position, MAX_TITLE_CHARS, char_count
                ));
            }

            let word_count = title.split_whitespace().count();
            if word_count < MIN_TITLE_WORDS {
                errors.push(format!(
                    "Título {} é muito curto ({} palavras).",
                    position, word_count
                ));
            }

            if title.contains(FORBIDDEN_SYMBOLS) {
                errors.push(format!(
                    "Título {} contém emojis ou hashtags proibidos.",
                    position
                ));
            }
        }
    }

    ValidationOutcome {
        is_valid: errors.is_empty(),
        errors,
    }
}
