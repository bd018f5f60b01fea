//! Prompt assembly — raw text in, envelope JSON out.
//!
//! Flow: processing instruction → completion call → persona instruction →
//!       flatten processed content → build envelope → pretty JSON.
//!
//! Exactly one remote call per assembly. The persona instruction is written
//! into the envelope for a downstream consumer and is never sent.

use tracing::{debug, info};

use crate::errors::{AppError, STAGE_PROCESSING};
use crate::llm_client::prompts::processing_user_message;
use crate::llm_client::{ChatCompletionApi, ChatMessage, ChatRequest, MODEL};
use crate::models::generation::GenerationConfig;
use crate::models::session::{ConversationIdSource, SessionContext, SessionProfile};
use crate::models::use_case::UseCaseSpec;
use crate::prompts::envelope::{
    EnvelopeContext, ProcessingInstructions, PromptEnvelope, ResponseFormat, SafetyPolicy,
};
use crate::prompts::instructions::{persona_instruction, processing_instruction};
use crate::prompts::normalize::flatten_content;

pub struct PromptAssembler<'a> {
    api: &'a dyn ChatCompletionApi,
    ids: &'a dyn ConversationIdSource,
}

impl<'a> PromptAssembler<'a> {
    pub fn new(api: &'a dyn ChatCompletionApi, ids: &'a dyn ConversationIdSource) -> Self {
        Self { api, ids }
    }

    /// Runs the pipeline and returns the serialized envelope.
    ///
    /// All-or-nothing: any failure returns an error and no envelope.
    /// `generation` is forwarded verbatim; out-of-range values are for the
    /// remote API to reject.
    pub async fn assemble(
        &self,
        raw_text: &str,
        use_case: &UseCaseSpec,
        generation: &GenerationConfig,
        profile: &SessionProfile,
    ) -> Result<String, AppError> {
        let envelope = self
            .build_envelope(raw_text, use_case, generation, profile)
            .await?;
        envelope
            .to_pretty_json()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize envelope: {e}")))
    }

    pub async fn build_envelope(
        &self,
        raw_text: &str,
        use_case: &UseCaseSpec,
        generation: &GenerationConfig,
        profile: &SessionProfile,
    ) -> Result<PromptEnvelope, AppError> {
        if raw_text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let session = SessionContext {
            conversation_id: self.ids.next_id(),
            profile: profile.clone(),
        };
        info!(
            "Assembling prompt {} for use case {}",
            session.conversation_id, use_case.target_use_case
        );

        // Step 1: processing call
        let request = ChatRequest::new(
            vec![
                ChatMessage::system(processing_instruction(use_case)),
                ChatMessage::user(processing_user_message(raw_text)),
            ],
            generation,
        );
        let completion = self
            .api
            .complete(&request)
            .await
            .map_err(|e| AppError::remote(STAGE_PROCESSING, e))?;
        debug!(
            "Processed content: {} chars",
            completion.content.chars().count()
        );

        // Step 2: envelope, with the persona instruction as system message
        Ok(PromptEnvelope {
            model: MODEL.to_string(),
            messages: vec![
                ChatMessage::system(persona_instruction(use_case)),
                ChatMessage::user(flatten_content(&completion.content)),
            ],
            context: EnvelopeContext::new(&session, use_case),
            generation_config: *generation,
            response_format: ResponseFormat::default(),
            processing_instructions: ProcessingInstructions::default(),
            safety: SafetyPolicy::default(),
        })
    }
}
