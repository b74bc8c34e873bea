//! Diagnostic Client: runs a composed request and always returns something
//! renderable.
//!
//! `try_analyze` keeps the failure visible for callers and tests that want
//! it. `analyze` is the public contract: every error collapses into the
//! single fallback solution built from the business contact details.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::diagnostics::composer::compose_request;
use crate::diagnostics::models::{ContactInfo, DiagnosticRequest, DiagnosticSolution, Difficulty};
use crate::diagnostics::prompts::{FALLBACK_DESCRIPTION, FALLBACK_TITLE};
use crate::llm_client::{strip_json_fences, GenerationBackend, LlmError};

#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("generation call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("response does not match the solution schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("model returned no solutions")]
    NoSolutions,
}

#[derive(Clone)]
pub struct DiagnosticClient {
    backend: Arc<dyn GenerationBackend>,
    model: String,
    contact: ContactInfo,
}

impl DiagnosticClient {
    pub fn new(backend: Arc<dyn GenerationBackend>, model: impl Into<String>, contact: ContactInfo) -> Self {
        Self {
            backend,
            model: model.into(),
            contact,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One full round trip. No caching, no retry.
    pub async fn try_analyze(
        &self,
        request: &DiagnosticRequest,
    ) -> Result<Vec<DiagnosticSolution>, DiagnosticError> {
        let generation = compose_request(request, &self.model);
        debug!(
            "Composed diagnostic request with {} inline parts",
            generation.inline_part_count()
        );
        let text = self.backend.generate(&generation).await?;
        parse_solutions(&text)
    }

    /// Never fails and never returns an empty list.
    pub async fn analyze(&self, request: &DiagnosticRequest) -> Vec<DiagnosticSolution> {
        match self.try_analyze(request).await {
            Ok(solutions) => {
                info!(
                    "Diagnosed {} with {} solutions (media: {})",
                    request.device,
                    solutions.len(),
                    request.media.is_some()
                );
                solutions
            }
            Err(e) => {
                error!("Diagnostic analysis failed for {}: {e}", request.device);
                fallback_solutions(&self.contact)
            }
        }
    }
}

/// Parses the model text as the declared array of solutions, unmodified and
/// in order. An empty array counts as a failure.
pub fn parse_solutions(text: &str) -> Result<Vec<DiagnosticSolution>, DiagnosticError> {
    let solutions: Vec<DiagnosticSolution> = serde_json::from_str(strip_json_fences(text))?;
    if solutions.is_empty() {
        return Err(DiagnosticError::NoSolutions);
    }
    Ok(solutions)
}

/// The fixed answer substituted for any failed analysis.
pub fn fallback_solutions(contact: &ContactInfo) -> Vec<DiagnosticSolution> {
    vec![DiagnosticSolution {
        title: FALLBACK_TITLE.to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
        difficulty: Difficulty::Hard,
        steps: vec![
            format!("Pozovite naš servis na {}", contact.phone),
            format!("Pišite nam na {}", contact.email),
        ],
    }]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::diagnostics::models::DeviceCategory;
    use crate::llm_client::types::GenerationRequest;

    /// Backend that replays a canned outcome and records what it was sent.
    pub(crate) struct FakeBackend {
        outcome: Box<dyn Fn() -> Result<String, LlmError> + Send + Sync>,
        pub calls: AtomicUsize,
        pub last_request: Mutex<Option<GenerationRequest>>,
    }

    impl FakeBackend {
        pub(crate) fn replying(text: &str) -> Arc<Self> {
            let text = text.to_string();
            Arc::new(Self::new(move || Ok(text.clone())))
        }

        pub(crate) fn failing_with(status: u16) -> Arc<Self> {
            Arc::new(Self::new(move || {
                Err(LlmError::Api {
                    status,
                    message: "backend unavailable".to_string(),
                })
            }))
        }

        fn new(outcome: impl Fn() -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
            Self {
                outcome: Box::new(outcome),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl GenerationBackend for FakeBackend {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            (self.outcome)()
        }
    }

    pub(crate) fn contact() -> ContactInfo {
        ContactInfo {
            phone: "0677627904".to_string(),
            email: "elsintdm@gmail.com".to_string(),
        }
    }

    pub(crate) const THREE_SOLUTIONS: &str = r#"[
        {"title": "Proverite kabl", "description": "Labav HDMI kabl izaziva treperenje.", "difficulty": "Lako", "steps": ["Isključite TV", "Ponovo utaknite HDMI kabl"]},
        {"title": "Osvežavanje slike", "description": "Pogrešna frekvencija osvežavanja.", "difficulty": "Srednje", "steps": ["Otvorite meni", "Podesite 60Hz"]},
        {"title": "Pozadinsko osvetljenje", "description": "Neispravne LED trake.", "difficulty": "Teško", "steps": ["Donesite TV u servis"]}
    ]"#;

    fn tv_request() -> DiagnosticRequest {
        DiagnosticRequest {
            device: DeviceCategory::Tv,
            description: "Slika treperi".to_string(),
            media: None,
        }
    }

    fn client(backend: Arc<FakeBackend>) -> DiagnosticClient {
        DiagnosticClient::new(backend, "gemini-test", contact())
    }

    fn assert_is_fallback(solutions: &[DiagnosticSolution]) {
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].title, "Sistemska Greška");
        assert_eq!(solutions[0].difficulty, Difficulty::Hard);
        assert!(solutions[0]
            .steps
            .iter()
            .any(|s| s.contains("0677627904") || s.contains("elsintdm@gmail.com")));
    }

    #[tokio::test]
    async fn test_success_returns_all_solutions_in_order() {
        let backend = FakeBackend::replying(THREE_SOLUTIONS);
        let solutions = client(backend.clone()).analyze(&tv_request()).await;

        assert_eq!(solutions.len(), 3);
        assert_eq!(solutions[0].title, "Proverite kabl");
        assert_eq!(solutions[1].difficulty, Difficulty::Medium);
        assert_eq!(solutions[2].steps, vec!["Donesite TV u servis".to_string()]);
        for s in &solutions {
            assert!(!s.title.is_empty() && !s.description.is_empty() && !s.steps.is_empty());
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_receives_composed_request() {
        let backend = FakeBackend::replying(THREE_SOLUTIONS);
        client(backend.clone()).analyze(&tv_request()).await;

        let sent = backend.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.model, "gemini-test");
        assert_eq!(sent.inline_part_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_yields_fallback() {
        let backend = FakeBackend::failing_with(503);
        let solutions = client(backend).analyze(&tv_request()).await;
        assert_is_fallback(&solutions);
    }

    #[tokio::test]
    async fn test_malformed_json_yields_fallback() {
        let c = client(FakeBackend::replying("Izvinite, ne mogu da pomognem {"));
        assert!(matches!(
            c.try_analyze(&tv_request()).await,
            Err(DiagnosticError::Schema(_))
        ));
        assert_is_fallback(&c.analyze(&tv_request()).await);
    }

    #[tokio::test]
    async fn test_wrong_shape_yields_fallback() {
        let c = client(FakeBackend::replying(r#"{"title": "not an array"}"#));
        assert!(matches!(
            c.try_analyze(&tv_request()).await,
            Err(DiagnosticError::Schema(_))
        ));
        assert_is_fallback(&c.analyze(&tv_request()).await);
    }

    #[tokio::test]
    async fn test_empty_array_is_not_returned_silently() {
        let c = client(FakeBackend::replying("[]"));
        assert!(matches!(
            c.try_analyze(&tv_request()).await,
            Err(DiagnosticError::NoSolutions)
        ));
        assert_is_fallback(&c.analyze(&tv_request()).await);
    }

    #[tokio::test]
    async fn test_empty_content_error_is_kept_internally() {
        let backend = Arc::new(FakeBackend::new(|| Err(LlmError::EmptyContent)));
        let c = client(backend);
        assert!(matches!(
            c.try_analyze(&tv_request()).await,
            Err(DiagnosticError::Llm(LlmError::EmptyContent))
        ));
    }

    #[tokio::test]
    async fn test_fenced_json_is_accepted() {
        let fenced = format!("```json\n{THREE_SOLUTIONS}\n```");
        let solutions = client(FakeBackend::replying(&fenced)).analyze(&tv_request()).await;
        assert_eq!(solutions.len(), 3);
    }

    #[tokio::test]
    async fn test_failures_repeat_the_call_and_give_identical_fallbacks() {
        let backend = FakeBackend::failing_with(500);
        let c = client(backend.clone());
        let first = c.analyze(&tv_request()).await;
        let second = c.analyze(&tv_request()).await;

        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_fallback_uses_configured_contact() {
        let solutions = fallback_solutions(&ContactInfo {
            phone: "011 000 000".to_string(),
            email: "servis@example.rs".to_string(),
        });
        assert_eq!(
            solutions[0].steps,
            vec![
                "Pozovite naš servis na 011 000 000".to_string(),
                "Pišite nam na servis@example.rs".to_string()
            ]
        );
    }
}
