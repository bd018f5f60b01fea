//! The envelope: a chat-completion request document for downstream consumers.
//!
//! Key order and nesting are part of the output contract. Every block is a
//! struct so serde emits fields in declaration order; do not route the
//! envelope through `serde_json::Value`, whose maps sort keys.

use serde::Serialize;

use crate::llm_client::ChatMessage;
use crate::models::generation::GenerationConfig;
use crate::models::session::SessionContext;
use crate::models::use_case::{ExpertiseLevel, Framework, UseCaseSpec};

#[derive(Debug, Clone, Serialize)]
pub struct PromptEnvelope {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub context: EnvelopeContext,
    pub generation_config: GenerationConfig,
    pub response_format: ResponseFormat,
    pub processing_instructions: ProcessingInstructions,
    pub safety: SafetyPolicy,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeContext {
    pub conversation_id: String,
    pub session_metadata: SessionMetadata,
    pub user_profile: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding_context: Option<CodingContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionMetadata {
    pub app: String,
    pub platform: String,
    pub language: String,
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub role: String,
    pub expertise_level: String,
}

/// Expertise here echoes the configured value as-is (`"Advanced"`), unlike
/// the lowercased copy in `UserProfile`.
#[derive(Debug, Clone, Serialize)]
pub struct CodingContext {
    pub programming_language: String,
    pub framework: Framework,
    pub expertise_level: Option<ExpertiseLevel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
    pub markdown: bool,
    pub structured_output: StructuredOutput,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructuredOutput {
    pub enabled: bool,
    pub schema: OutputSchema,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputSchema {
    pub summary: &'static str,
    pub requirements: [&'static str; 1],
    pub implementation_steps: [&'static str; 1],
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessingInstructions {
    pub remove_markdown: bool,
    pub clean_formatting: bool,
    pub concise_output: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetyPolicy {
    pub allow_sensitive: bool,
    pub block_disallowed: bool,
    pub moderation_level: &'static str,
}

impl Default for ResponseFormat {
    fn default() -> Self {
        Self {
            format_type: "text",
            markdown: false,
            structured_output: StructuredOutput {
                enabled: true,
                schema: OutputSchema {
                    summary: "string",
                    requirements: ["string"],
                    implementation_steps: ["string"],
                },
            },
        }
    }
}

impl Default for ProcessingInstructions {
    fn default() -> Self {
        Self {
            remove_markdown: true,
            clean_formatting: true,
            concise_output: true,
        }
    }
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        Self {
            allow_sensitive: false,
            block_disallowed: true,
            moderation_level: "standard",
        }
    }
}

impl EnvelopeContext {
    pub fn new(session: &SessionContext, use_case: &UseCaseSpec) -> Self {
        let profile = &session.profile;
        Self {
            conversation_id: session.conversation_id.clone(),
            session_metadata: SessionMetadata {
                app: profile.app_name.clone(),
                platform: profile.platform.clone(),
                language: profile.language.clone(),
                timezone: profile.timezone.clone(),
            },
            user_profile: UserProfile {
                id: profile.user_id.clone(),
                role: profile.user_role.clone(),
                expertise_level: use_case.profile_expertise().to_string(),
            },
            coding_context: use_case.coding().map(|coding| CodingContext {
                programming_language: coding.language.to_string(),
                framework: coding.framework.clone(),
                expertise_level: coding.expertise_level,
            }),
        }
    }
}

impl PromptEnvelope {
    /// Two-space indented JSON text.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::MODEL;
    use crate::models::session::SessionProfile;
    use crate::models::use_case::TargetUseCase;

    fn session() -> SessionContext {
        SessionContext {
            conversation_id: "abcd1234".to_string(),
            profile: SessionProfile::default(),
        }
    }

    fn envelope(use_case: &UseCaseSpec) -> PromptEnvelope {
        PromptEnvelope {
            model: MODEL.to_string(),
            messages: vec![ChatMessage::system("persona"), ChatMessage::user("content")],
            context: EnvelopeContext::new(&session(), use_case),
            generation_config: GenerationConfig::default(),
            response_format: ResponseFormat::default(),
            processing_instructions: ProcessingInstructions::default(),
            safety: SafetyPolicy::default(),
        }
    }

    #[test]
    fn test_top_level_key_order() {
        let json = envelope(&UseCaseSpec::default()).to_pretty_json().unwrap();
        let positions: Vec<usize> = [
            "\"model\"",
            "\"messages\"",
            "\"context\"",
            "\"generation_config\"",
            "\"response_format\"",
            "\"processing_instructions\"",
            "\"safety\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap_or_else(|| panic!("missing {key}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_static_blocks_serialize_exactly() {
        let json = serde_json::to_string(&ResponseFormat::default()).unwrap();
        assert_eq!(
            json,
            r#"{"type":"text","markdown":false,"structured_output":{"enabled":true,"schema":{"summary":"string","requirements":["string"],"implementation_steps":["string"]}}}"#
        );
        assert_eq!(
            serde_json::to_string(&ProcessingInstructions::default()).unwrap(),
            r#"{"remove_markdown":true,"clean_formatting":true,"concise_output":true}"#
        );
        assert_eq!(
            serde_json::to_string(&SafetyPolicy::default()).unwrap(),
            r#"{"allow_sensitive":false,"block_disallowed":true,"moderation_level":"standard"}"#
        );
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let json = envelope(&UseCaseSpec::default()).to_pretty_json().unwrap();
        assert!(json.starts_with("{\n  \"model\": \"deepseek-chat\",\n  \"messages\": ["));
    }

    #[test]
    fn test_general_context_has_no_coding_block() {
        let context = EnvelopeContext::new(&session(), &UseCaseSpec::general(TargetUseCase::Research));
        let json = serde_json::to_string(&context).unwrap();
        assert!(!json.contains("coding_context"));
        assert_eq!(
            json,
            r#"{"conversation_id":"abcd1234","session_metadata":{"app":"my-web-app","platform":"web","language":"en","timezone":"UTC"},"user_profile":{"id":"user-001","role":"developer","expertise_level":"intermediate"}}"#
        );
    }

    #[test]
    fn test_coding_context_key_order_and_null_framework() {
        let use_case = UseCaseSpec {
            target_use_case: TargetUseCase::CodingProgramming,
            programming_language: Some("Rust".to_string()),
            framework: Framework::None,
            expertise_level: Some(ExpertiseLevel::Expert),
        };
        let context = EnvelopeContext::new(&session(), &use_case);
        let json = serde_json::to_string(&context.coding_context).unwrap();
        assert_eq!(
            json,
            r#"{"programming_language":"Rust","framework":null,"expertise_level":"Expert"}"#
        );
        assert_eq!(context.user_profile.expertise_level, "expert");
    }
}
