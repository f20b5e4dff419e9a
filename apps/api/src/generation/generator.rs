//! Content Generation — orchestrates the generate → validate → correct pipeline.
//!
//! Flow: build prompt → remote call → lenient parse → validate →
//!       (at most one corrective call) → return result.
//!
//! Validation is advisory. A result that still fails after the corrective call
//! is returned as-is; the corrective result is never re-validated.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::generation::prompts::{
    CORRECTION_TEMPLATE, DEFAULT_PROTAGONIST, FIXED_FOOTER, NEW_TITLES_CONTENT_TEMPLATE,
    SYSTEM_PROMPT, TITLE_SEPARATOR, UNSPECIFIED, USER_PROMPT_TEMPLATE,
};
use crate::generation::schema::response_schema;
use crate::generation::validation::validate;
use crate::llm_client::{GenerationBackend, LlmError, StructuredRequest};
use crate::models::content::{Caption, GeneratedResult, RequestInput};

/// Corrective calls allowed after a result fails validation.
const MAX_CORRECTIVE_RETRIES: u32 = 1;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Por favor, insira o texto da matéria.")]
    EmptyContent,

    /// Any failure of the remote call itself. The cause is kept for logging
    /// only; users see the fixed message.
    #[error("Falha ao gerar conteúdo. Verifique sua conexão ou tente novamente.")]
    Transport(#[source] LlmError),
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient parsing of model output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct RawGeneratedResult {
    #[serde(default)]
    titles: Option<Vec<String>>,
    #[serde(default)]
    caption: Option<RawCaption>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCaption {
    #[serde(default)]
    paragraph1: Option<String>,
    #[serde(default)]
    paragraph2: Option<String>,
    #[serde(default)]
    paragraph3: Option<String>,
    #[serde(default)]
    footer: Option<String>,
}

impl From<RawGeneratedResult> for GeneratedResult {
    fn from(raw: RawGeneratedResult) -> Self {
        let caption = raw.caption.unwrap_or_default();
        GeneratedResult {
            titles: raw.titles.unwrap_or_default(),
            caption: Caption {
                paragraph1: caption.paragraph1.unwrap_or_default(),
                paragraph2: caption.paragraph2.unwrap_or_default(),
                paragraph3: caption.paragraph3.unwrap_or_default(),
                footer: caption.footer.unwrap_or_default(),
            },
        }
    }
}

/// Parses model output into a `GeneratedResult`, never failing.
///
/// Missing text, malformed JSON or a wrong shape yield the empty result, which
/// then fails validation and can trigger the corrective call. Missing fields
/// are filled with empty values.
pub fn parse_generated(text: Option<&str>) -> GeneratedResult {
    let text = strip_json_fences(text.unwrap_or_default());
    if text.is_empty() {
        warn!("Generation returned no text — using empty result");
        return GeneratedResult::default();
    }

    match serde_json::from_str::<RawGeneratedResult>(text) {
        Ok(raw) => raw.into(),
        Err(e) => {
            warn!("Generation output is not the expected JSON ({e}) — using empty result");
            GeneratedResult::default()
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(stripped)
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt construction
// ────────────────────────────────────────────────────────────────────────────

/// Renders the per-request user section, substituting fallbacks for absent metadata.
pub fn build_user_prompt(input: &RequestInput) -> String {
    render_template(
        USER_PROMPT_TEMPLATE,
        &[
            ("content", input.content.as_str()),
            ("protagonist", input.protagonist().unwrap_or(DEFAULT_PROTAGONIST)),
            ("city", input.city().unwrap_or(UNSPECIFIED)),
            ("date", input.date().unwrap_or(UNSPECIFIED)),
            ("footer", FIXED_FOOTER),
        ],
    )
}

/// Fills `{name}` placeholders in one pass over `template`.
///
/// Substituted values are copied as-is and never scanned again. Braces that do
/// not name a known placeholder are kept literally.
fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match value {
            Some((value, close)) => {
                rendered.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                rendered.push('{');
                rest = after;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// First prompt plus the list of rules the previous attempt broke.
pub fn build_correction_prompt(prompt: &str, errors: &[String]) -> String {
    let mut corrected = prompt.to_string();
    corrected.push_str(&CORRECTION_TEMPLATE.replace("{errors}", &errors.join("\n")));
    corrected
}

/// Source text replacement asking for titles from a different angle.
pub fn build_new_titles_content(previous_titles: &[String]) -> String {
    NEW_TITLES_CONTENT_TEMPLATE.replace("{previous_titles}", &previous_titles.join(TITLE_SEPARATOR))
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

/// Runs the generation pipeline against an injected backend.
///
/// Holds no per-call state: every `generate` is independent and may run
/// concurrently with others.
pub struct Generator {
    backend: Arc<dyn GenerationBackend>,
    schema: Value,
}

impl Generator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            schema: response_schema(),
        }
    }

    /// Generates 5 titles and a caption for the given source text.
    ///
    /// Steps:
    /// 1. reject blank content before any remote call
    /// 2. build prompt → remote call → parse
    /// 3. validate; if invalid, one corrective call whose result is returned unchecked
    pub async fn generate(&self, input: &RequestInput) -> Result<GeneratedResult, GenerationError> {
        if !input.has_content() {
            return Err(GenerationError::EmptyContent);
        }

        let prompt = build_user_prompt(input);
        info!(
            "Requesting content ({} chars of source text)",
            input.content.chars().count()
        );
        let mut result = self.request(&prompt).await?;

        for attempt in 0..MAX_CORRECTIVE_RETRIES {
            let outcome = validate(&result);
            if outcome.is_valid {
                break;
            }

            warn!(
                "Validation failed (corrective attempt {}/{}): {:?}",
                attempt + 1,
                MAX_CORRECTIVE_RETRIES,
                outcome.errors
            );
            let correction = build_correction_prompt(&prompt, &outcome.errors);
            result = self.request(&correction).await?;
        }

        info!("Content generated with {} titles", result.titles.len());
        Ok(result)
    }

    /// Asks for 5 new titles, keeping the caption of `previous`.
    ///
    /// Runs the full pipeline with the source text replaced by a hint listing
    /// the previous titles; the metadata fields are kept.
    pub async fn generate_new_titles(
        &self,
        input: &RequestInput,
        previous: &GeneratedResult,
    ) -> Result<GeneratedResult, GenerationError> {
        if !input.has_content() {
            return Err(GenerationError::EmptyContent);
        }

        let modified = RequestInput {
            content: build_new_titles_content(&previous.titles),
            ..input.clone()
        };
        let fresh = self.generate(&modified).await?;

        Ok(GeneratedResult {
            titles: fresh.titles,
            caption: previous.caption.clone(),
        })
    }

    /// One remote call plus lenient parsing.
    async fn request(&self, prompt: &str) -> Result<GeneratedResult, GenerationError> {
        let text = self
            .backend
            .generate_structured(StructuredRequest {
                prompt,
                system_instruction: SYSTEM_PROMPT,
                response_schema: &self.schema,
            })
            .await
            .map_err(|e| {
                error!("Gemini API error: {e}");
                GenerationError::Transport(e)
            })?;

        Ok(parse_generated(text.as_deref()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
