//! System-role instruction text.
//!
//! Two instructions come out of one `UseCaseSpec`: the processing instruction
//! drives the single remote call, the persona instruction only lands in the
//! envelope.

use crate::models::use_case::{CodingSpec, UseCaseSpec};

/// `"You are an expert {language} developer[ specialized in {framework}]"`.
fn expert_developer_prefix(coding: &CodingSpec<'_>) -> String {
    let mut prefix = format!("You are an expert {} developer", coding.language);
    if let Some(framework) = coding.framework.name() {
        prefix.push_str(&format!(" specialized in {framework}"));
    }
    prefix
}

/// Instruction for the processing call that summarizes raw text.
pub fn processing_instruction(use_case: &UseCaseSpec) -> String {
    match use_case.coding() {
        Some(coding) => format!(
            "{}. Analyze and summarize the following raw text into a clear, structured developer prompt. \
             Focus on technical requirements, coding standards, and provide {}-level guidance.",
            expert_developer_prefix(&coding),
            coding.expertise_lowercase()
        ),
        None => format!(
            "You are a helpful AI assistant specialized in {}. Analyze and summarize the following raw text \
             into a clear, structured prompt that captures the key requirements and objectives.",
            use_case.target_use_case
        ),
    }
}

/// Instruction describing ongoing assistant behavior, embedded as the
/// envelope's system message. Never sent to the completion API.
pub fn persona_instruction(use_case: &UseCaseSpec) -> String {
    match use_case.coding() {
        Some(coding) => format!(
            "{}. You provide {}-level guidance, follow coding best practices, \
             and give structured responses with clear explanations.",
            expert_developer_prefix(&coding),
            coding.expertise_lowercase()
        ),
        None => format!(
            "You are a helpful AI assistant specialized in {}. Follow user instructions carefully, \
             ask clarifying questions if needed, and provide concise and structured responses.",
            use_case.target_use_case
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::use_case::{ExpertiseLevel, Framework, TargetUseCase};

    fn coding(language: &str, framework: Framework, level: Option<ExpertiseLevel>) -> UseCaseSpec {
        UseCaseSpec {
            target_use_case: TargetUseCase::CodingProgramming,
            programming_language: Some(language.to_string()),
            framework,
            expertise_level: level,
        }
    }

    #[test]
    fn test_general_processing_instruction() {
        let spec = UseCaseSpec::general(TargetUseCase::General);
        assert_eq!(
            processing_instruction(&spec),
            "You are a helpful AI assistant specialized in general. Analyze and summarize the following raw text into a clear, structured prompt that captures the key requirements and objectives."
        );
    }

    #[test]
    fn test_general_persona_instruction() {
        let spec = UseCaseSpec::general(TargetUseCase::DataAnalysis);
        assert_eq!(
            persona_instruction(&spec),
            "You are a helpful AI assistant specialized in data analysis. Follow user instructions carefully, ask clarifying questions if needed, and provide concise and structured responses."
        );
    }

    #[test]
    fn test_coding_processing_instruction_with_framework() {
        let spec = coding(
            "Python",
            Framework::Named("Flask".to_string()),
            Some(ExpertiseLevel::Advanced),
        );
        assert_eq!(
            processing_instruction(&spec),
            "You are an expert Python developer specialized in Flask. Analyze and summarize the following raw text into a clear, structured developer prompt. Focus on technical requirements, coding standards, and provide advanced-level guidance."
        );
    }

    #[test]
    fn test_coding_persona_instruction_with_framework() {
        let spec = coding(
            "Python",
            Framework::Named("Flask".to_string()),
            Some(ExpertiseLevel::Advanced),
        );
        let persona = persona_instruction(&spec);
        assert!(persona.contains("expert Python developer specialized in Flask"));
        assert!(persona.contains("advanced-level guidance"));
        assert_eq!(
            persona,
            "You are an expert Python developer specialized in Flask. You provide advanced-level guidance, follow coding best practices, and give structured responses with clear explanations."
        );
    }

    #[test]
    fn test_no_framework_drops_specialized_clause() {
        let spec = coding("Go", Framework::None, Some(ExpertiseLevel::Expert));
        assert!(!processing_instruction(&spec).contains("specialized in"));
        assert!(!persona_instruction(&spec).contains("specialized in"));
        assert!(processing_instruction(&spec).starts_with("You are an expert Go developer. Analyze"));
    }

    #[test]
    fn test_coding_without_expertise_uses_intermediate() {
        let spec = coding("Rust", Framework::None, None);
        assert!(processing_instruction(&spec).contains("provide intermediate-level guidance"));
    }

    #[test]
    fn test_coding_without_language_falls_back_to_general_wording() {
        let spec = UseCaseSpec {
            target_use_case: TargetUseCase::CodingProgramming,
            programming_language: None,
            framework: Framework::Named("Django".to_string()),
            expertise_level: Some(ExpertiseLevel::Beginner),
        };
        assert_eq!(
            processing_instruction(&spec),
            "You are a helpful AI assistant specialized in coding/programming. Analyze and summarize the following raw text into a clear, structured prompt that captures the key requirements and objectives."
        );
    }
}
