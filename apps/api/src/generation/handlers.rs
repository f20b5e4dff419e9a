//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::GenerationError;
use crate::models::content::{Caption, GeneratedResult, RequestInput};
use crate::state::AppState;

/// Shown when a new-titles request fails at the remote call.
const NEW_TITLES_FAILED: &str = "Erro ao gerar novos títulos.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewTitlesRequest {
    pub input: RequestInput,
    pub previous: GeneratedResult,
}

/// Generated content plus the ready-to-paste renderings the form copies.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub titles: Vec<String>,
    pub caption: Caption,
    pub caption_text: String,
    pub plain_text: String,
}

impl From<GeneratedResult> for GenerateResponse {
    fn from(result: GeneratedResult) -> Self {
        let caption_text = result.caption.full_text();
        let plain_text = result.plain_text();
        Self {
            titles: result.titles,
            caption: result.caption,
            caption_text,
            plain_text,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Generates 5 titles and a caption from the source text and metadata.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(input): Json<RequestInput>,
) -> Result<Json<GenerateResponse>, AppError> {
    let result = state.generator.generate(&input).await?;
    Ok(Json(result.into()))
}

/// POST /api/v1/generate/titles
///
/// Generates 5 new titles from a different angle, keeping the previous caption.
pub async fn handle_generate_titles(
    State(state): State<AppState>,
    Json(request): Json<NewTitlesRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let result = state
        .generator
        .generate_new_titles(&request.input, &request.previous)
        .await
        .map_err(|e| match e {
            GenerationError::Transport(_) => AppError::Generation(NEW_TITLES_FAILED.to_string()),
            other => other.into(),
        })?;

    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::generation::generator::Generator;
    use crate::generation::prompts::FIXED_FOOTER;
    use crate::llm_client::fake::ScriptedBackend;
    use crate::llm_client::LlmError;
    use crate::routes::build_router;
    use crate::state::AppState;

    const GOOD_TITLE: &str = "Prefeitura anuncia nova obra de drenagem no centro";

    fn router(backend: &Arc<ScriptedBackend>) -> Router {
        build_router(AppState {
            generator: Arc::new(Generator::new(backend.clone())),
        })
    }

    fn valid_json() -> String {
        let titles = vec![GOOD_TITLE; 5];
        json!({
            "titles": titles,
            "caption": {
                "paragraph1": "P1",
                "paragraph2": "P2",
                "paragraph3": "P3",
                "footer": FIXED_FOOTER
            }
        })
        .to_string()
    }

    async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_generate_returns_content_and_renderings() {
        let backend = Arc::new(ScriptedBackend::with_texts(&[valid_json()]));
        let (status, body) = post(
            router(&backend),
            "/api/v1/generate",
            json!({"content": "Prefeitura anuncia obra", "city": "Ilhabela"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["titles"].as_array().unwrap().len(), 5);
        assert_eq!(body["caption"]["footer"], FIXED_FOOTER);
        assert_eq!(
            body["caption_text"],
            format!("P1\n\nP2\n\nP3\n\n{FIXED_FOOTER}")
        );
        assert!(body["plain_text"]
            .as_str()
            .unwrap()
            .starts_with(&format!("TÍTULOS SUGERIDOS:\n1. {GOOD_TITLE}")));
        assert!(backend.prompts()[0].contains("CIDADE: Ilhabela"));
    }

    #[tokio::test]
    async fn test_generate_blank_content_is_bad_request() {
        let backend = Arc::new(ScriptedBackend::default());
        let (status, body) = post(
            router(&backend),
            "/api/v1/generate",
            json!({"content": "   "}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Por favor, insira o texto da matéria."
        );
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_transport_failure_is_bad_gateway() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(LlmError::MissingApiKey)]));
        let (status, body) = post(
            router(&backend),
            "/api/v1/generate",
            json!({"content": "Prefeitura anuncia obra"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GENERATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Falha ao gerar conteúdo. Verifique sua conexão ou tente novamente."
        );
    }

    #[tokio::test]
    async fn test_new_titles_keep_caption() {
        let backend = Arc::new(ScriptedBackend::with_texts(&[valid_json()]));
        let previous = json!({
            "titles": ["A", "B", "C", "D", "E"],
            "caption": {
                "paragraph1": "antigo 1",
                "paragraph2": "antigo 2",
                "paragraph3": "antigo 3",
                "footer": FIXED_FOOTER
            }
        });
        let (status, body) = post(
            router(&backend),
            "/api/v1/generate/titles",
            json!({
                "input": {"content": "Prefeitura anuncia obra"},
                "previous": previous
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["caption"], previous["caption"]);
        assert_eq!(body["titles"][0], GOOD_TITLE);
        assert!(backend.prompts()[0].contains("A | B | C | D | E"));
    }

    #[tokio::test]
    async fn test_new_titles_failure_has_own_message() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(LlmError::MissingApiKey)]));
        let (status, body) = post(
            router(&backend),
            "/api/v1/generate/titles",
            json!({
                "input": {"content": "Prefeitura anuncia obra"},
                "previous": {"titles": ["A"], "caption": {
                    "paragraph1": "", "paragraph2": "", "paragraph3": "", "footer": ""
                }}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "Erro ao gerar novos títulos.");
    }

    #[tokio::test]
    async fn test_health() {
        let backend = Arc::new(ScriptedBackend::default());
        let response = router(&backend)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
