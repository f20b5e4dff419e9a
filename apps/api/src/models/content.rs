use serde::{Deserialize, Serialize};

/// Source text and metadata captured by the form.
///
/// Optional fields that are missing or blank are replaced by literal fallbacks
/// when the prompt is rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestInput {
    pub content: String,
    #[serde(default)]
    pub protagonist: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl RequestInput {
    #[cfg(test)]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    pub fn protagonist(&self) -> Option<&str> {
        present(self.protagonist.as_deref())
    }

    pub fn city(&self) -> Option<&str> {
        present(self.city.as_deref())
    }

    pub fn date(&self) -> Option<&str> {
        present(self.date.as_deref())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Three-paragraph Instagram caption plus the fixed footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Caption {
    pub paragraph1: String,
    pub paragraph2: String,
    pub paragraph3: String,
    pub footer: String,
}

impl Caption {
    /// Caption as it is pasted into the post: blocks separated by a blank line.
    pub fn full_text(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            self.paragraph1, self.paragraph2, self.paragraph3, self.footer
        )
    }
}

/// Structured content returned by the generation call.
///
/// The target shape is exactly 5 titles and the fixed footer, but neither is
/// guaranteed: the remote model may return anything and the result is passed
/// through even when it fails validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedResult {
    pub titles: Vec<String>,
    pub caption: Caption,
}

impl GeneratedResult {
    /// Numbered titles followed by the caption, used for "copy everything".
    pub fn plain_text(&self) -> String {
        let titles = self
            .titles
            .iter()
            .enumerate()
            .map(|(idx, title)| format!("{}. {}", idx + 1, title))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "TÍTULOS SUGERIDOS:\n{}\n\nLEGENDA:\n{}",
            titles,
            self.caption.full_text()
        )
    }
}

/// Verdict of the style rules over a [`GeneratedResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}
