//! Request-level pipeline around the assembler.
//!
//! Flow: reject blank text → resolve credential → connect client →
//!       assemble → length stats.
//!
//! Credential resolution and client construction both happen before any
//! network traffic, so their failures never cost a remote call.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::credential::resolve_api_key;
use crate::errors::AppError;
use crate::llm_client::CompletionConnector;
use crate::models::generation::GenerationConfig;
use crate::models::session::{ConversationIdSource, SessionProfile};
use crate::models::use_case::UseCaseSpec;
use crate::prompts::assembler::PromptAssembler;

/// Everything the input surface collects for one generation.
/// Only `raw_text` is required; the rest fall back to defaults.
#[derive(Clone, Deserialize)]
pub struct PromptRequest {
    pub raw_text: String,
    /// Overrides the environment credential for this request.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(flatten)]
    pub use_case: UseCaseSpec,
    #[serde(flatten)]
    pub generation: GenerationConfig,
    #[serde(flatten)]
    pub session: SessionProfile,
}

/// Character counts comparing input and output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PromptStats {
    pub original_length: usize,
    pub prompt_length: usize,
    /// `prompt_length / original_length`, one decimal.
    pub improvement_ratio: f64,
}

impl PromptStats {
    pub fn measure(raw_text: &str, prompt: &str) -> Self {
        let original_length = raw_text.chars().count();
        let prompt_length = prompt.chars().count();
        let improvement_ratio = if original_length == 0 {
            0.0
        } else {
            (prompt_length as f64 / original_length as f64 * 10.0).round() / 10.0
        };
        Self {
            original_length,
            prompt_length,
            improvement_ratio,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPrompt {
    pub prompt: String,
    pub stats: PromptStats,
}

pub async fn generate_prompt(
    connector: &dyn CompletionConnector,
    ids: &dyn ConversationIdSource,
    environment_key: Option<&str>,
    request: PromptRequest,
) -> Result<GeneratedPrompt, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::EmptyInput);
    }

    let api_key = resolve_api_key(request.api_key.as_deref(), environment_key)?;
    let api = connector
        .connect(api_key)
        .map_err(|e| AppError::ClientInit(e.to_string()))?;

    let use_case = request.use_case.normalized();
    let prompt = PromptAssembler::new(api.as_ref(), ids)
        .assemble(
            &request.raw_text,
            &use_case,
            &request.generation,
            &request.session,
        )
        .await?;

    let stats = PromptStats::measure(&request.raw_text, &prompt);
    info!(
        "Generated prompt: {} → {} chars ({:.1}x)",
        stats.original_length, stats.prompt_length, stats.improvement_ratio
    );

    Ok(GeneratedPrompt { prompt, stats })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::credential::ApiKey;
    use crate::llm_client::{ChatCompletionApi, LlmError};
    use crate::models::session::FixedConversationId;
    use crate::models::use_case::{ExpertiseLevel, Framework, TargetUseCase};
    use crate::prompts::assembler::tests::ScriptedApi;

    /// Hands out one shared `ScriptedApi` and remembers the keys it was given.
    pub(crate) struct ScriptedConnector {
        pub(crate) api: Arc<ScriptedApi>,
        pub(crate) connects: AtomicUsize,
        pub(crate) keys: Mutex<Vec<String>>,
        fail: bool,
    }

    impl ScriptedConnector {
        pub(crate) fn new(api: ScriptedApi) -> Self {
            Self {
                api: Arc::new(api),
                connects: AtomicUsize::new(0),
                keys: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        pub(crate) fn broken() -> Self {
            Self {
                fail: true,
                ..Self::new(ScriptedApi::replying("unused"))
            }
        }
    }

    impl CompletionConnector for ScriptedConnector {
        fn connect(&self, api_key: ApiKey) -> Result<Arc<dyn ChatCompletionApi>, LlmError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            self.keys.lock().unwrap().push(api_key.expose().to_string());
            if self.fail {
                return Err(LlmError::ClientBuild("tls backend unavailable".to_string()));
            }
            Ok(self.api.clone())
        }
    }

    fn request(raw_text: &str) -> PromptRequest {
        PromptRequest {
            raw_text: raw_text.to_string(),
            api_key: None,
            use_case: UseCaseSpec::default(),
            generation: GenerationConfig::default(),
            session: SessionProfile::default(),
        }
    }

    fn ids() -> FixedConversationId {
        FixedConversationId("feedbeef".to_string())
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_call() {
        let connector = ScriptedConnector::new(ScriptedApi::replying("done"));
        let err = generate_prompt(&connector, &ids(), None, request("Build a login page"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CredentialMissing), "got {err:?}");
        assert_eq!(connector.connects.load(Ordering::SeqCst), 0);
        assert_eq!(connector.api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_override_key_reaches_connector() {
        let connector = ScriptedConnector::new(ScriptedApi::replying("done"));
        let mut req = request("Build a login page");
        req.api_key = Some("sk-override".to_string());

        generate_prompt(&connector, &ids(), Some("sk-env"), req)
            .await
            .unwrap();

        assert_eq!(*connector.keys.lock().unwrap(), vec!["sk-override".to_string()]);
    }

    #[tokio::test]
    async fn test_environment_key_used_without_override() {
        let connector = ScriptedConnector::new(ScriptedApi::replying("done"));
        generate_prompt(&connector, &ids(), Some("sk-env"), request("Build a login page"))
            .await
            .unwrap();
        assert_eq!(*connector.keys.lock().unwrap(), vec!["sk-env".to_string()]);
        assert_eq!(connector.api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_client_init_failure_is_wrapped() {
        let connector = ScriptedConnector::broken();
        let err = generate_prompt(&connector, &ids(), Some("sk-env"), request("text"))
            .await
            .unwrap_err();

        match err {
            AppError::ClientInit(message) => assert!(message.contains("tls backend unavailable")),
            other => panic!("expected ClientInit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_credentials() {
        let connector = ScriptedConnector::new(ScriptedApi::replying("done"));
        let err = generate_prompt(&connector, &ids(), None, request("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyInput));
        assert_eq!(connector.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generated_prompt_carries_stats() {
        let connector = ScriptedConnector::new(ScriptedApi::replying("done"));
        let generated = generate_prompt(&connector, &ids(), Some("sk-env"), request("Build a login page"))
            .await
            .unwrap();

        assert_eq!(generated.stats.original_length, 18);
        assert_eq!(generated.stats.prompt_length, generated.prompt.chars().count());
        assert!(generated.stats.improvement_ratio > 1.0);
    }

    #[tokio::test]
    async fn test_coding_fields_dropped_for_non_coding_use_case() {
        let connector = ScriptedConnector::new(ScriptedApi::replying("done"));
        let mut req = request("Write a short story about a lighthouse");
        req.use_case = UseCaseSpec {
            target_use_case: TargetUseCase::CreativeWriting,
            programming_language: Some("Rust".to_string()),
            framework: Framework::Named("Axum".to_string()),
            expertise_level: Some(ExpertiseLevel::Expert),
        };

        let generated = generate_prompt(&connector, &ids(), Some("sk-env"), req)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_str(&generated.prompt).unwrap();

        assert_eq!(envelope["context"]["user_profile"]["expertise_level"], "intermediate");
        assert!(envelope["context"].get("coding_context").is_none());
        let requests = connector.api.requests.lock().unwrap();
        assert!(requests[0].messages[0]
            .content
            .starts_with("You are a helpful AI assistant specialized in creative writing."));
    }

    #[test]
    fn test_stats_ratio_rounds_to_one_decimal() {
        let stats = PromptStats::measure("abc", "abcdefg");
        assert_eq!(stats.improvement_ratio, 2.3);
        assert_eq!(PromptStats::measure("", "abc").improvement_ratio, 0.0);
    }

    #[test]
    fn test_flat_request_body_deserializes() {
        let body = serde_json::json!({
            "raw_text": "Build a REST API",
            "target_use_case": "coding/programming",
            "programming_language": "Rust",
            "framework": "None",
            "expertise_level": "Expert",
            "max_tokens": 2000,
            "temperature": 1,
            "app_name": "api-builder",
            "timezone": "Asia/Tokyo"
        });
        let request: PromptRequest = serde_json::from_value(body).unwrap();

        assert_eq!(request.use_case.target_use_case, TargetUseCase::CodingProgramming);
        assert_eq!(request.use_case.framework, Framework::None);
        assert_eq!(request.use_case.expertise_level, Some(ExpertiseLevel::Expert));
        assert_eq!(request.generation.max_tokens, 2000);
        assert_eq!(request.generation.temperature, 1.0);
        assert_eq!(request.generation.top_p, 0.9);
        assert_eq!(request.session.app_name, "api-builder");
        assert_eq!(request.session.timezone, "Asia/Tokyo");
        assert_eq!(request.session.user_id, "user-001");
        assert!(request.api_key.is_none());
    }
}
