//! Use case selection: what the prompt is for and, for coding work, which
//! language / framework / expertise level it targets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The primary use case a prompt is organized for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetUseCase {
    #[default]
    #[serde(rename = "general")]
    General,
    #[serde(rename = "coding/programming")]
    CodingProgramming,
    #[serde(rename = "creative writing")]
    CreativeWriting,
    #[serde(rename = "data analysis")]
    DataAnalysis,
    #[serde(rename = "research")]
    Research,
    #[serde(rename = "business/professional")]
    BusinessProfessional,
    #[serde(rename = "educational")]
    Educational,
    #[serde(rename = "technical documentation")]
    TechnicalDocumentation,
}

impl TargetUseCase {
    pub const ALL: [TargetUseCase; 8] = [
        TargetUseCase::General,
        TargetUseCase::CodingProgramming,
        TargetUseCase::CreativeWriting,
        TargetUseCase::DataAnalysis,
        TargetUseCase::Research,
        TargetUseCase::BusinessProfessional,
        TargetUseCase::Educational,
        TargetUseCase::TechnicalDocumentation,
    ];

    /// Wire name, also used verbatim inside instruction text.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetUseCase::General => "general",
            TargetUseCase::CodingProgramming => "coding/programming",
            TargetUseCase::CreativeWriting => "creative writing",
            TargetUseCase::DataAnalysis => "data analysis",
            TargetUseCase::Research => "research",
            TargetUseCase::BusinessProfessional => "business/professional",
            TargetUseCase::Educational => "educational",
            TargetUseCase::TechnicalDocumentation => "technical documentation",
        }
    }
}

impl fmt::Display for TargetUseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Framework or library for a coding prompt.
///
/// On the wire this is a nullable string. `null`, an absent field, an empty
/// string and the literal `"None"` all mean "no framework".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Framework {
    #[default]
    None,
    Named(String),
}

impl Framework {
    pub fn name(&self) -> Option<&str> {
        match self {
            Framework::None => None,
            Framework::Named(name) => Some(name),
        }
    }
}

impl From<Option<String>> for Framework {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.trim().is_empty() && name != "None" => Framework::Named(name),
            _ => Framework::None,
        }
    }
}

impl From<Framework> for Option<String> {
    fn from(value: Framework) -> Self {
        match value {
            Framework::None => None,
            Framework::Named(name) => Some(name),
        }
    }
}

/// Self-reported experience level with the target technology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpertiseLevel {
    #[serde(alias = "beginner")]
    Beginner,
    #[default]
    #[serde(alias = "intermediate")]
    Intermediate,
    #[serde(alias = "advanced")]
    Advanced,
    #[serde(alias = "expert")]
    Expert,
}

impl ExpertiseLevel {
    pub const ALL: [ExpertiseLevel; 4] = [
        ExpertiseLevel::Beginner,
        ExpertiseLevel::Intermediate,
        ExpertiseLevel::Advanced,
        ExpertiseLevel::Expert,
    ];

    pub fn lowercase(&self) -> &'static str {
        match self {
            ExpertiseLevel::Beginner => "beginner",
            ExpertiseLevel::Intermediate => "intermediate",
            ExpertiseLevel::Advanced => "advanced",
            ExpertiseLevel::Expert => "expert",
        }
    }
}

/// Everything the caller says about what the prompt is for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UseCaseSpec {
    #[serde(default)]
    pub target_use_case: TargetUseCase,
    #[serde(default)]
    pub programming_language: Option<String>,
    #[serde(default)]
    pub framework: Framework,
    #[serde(default)]
    pub expertise_level: Option<ExpertiseLevel>,
}

/// Coding parameters, only available for a coding use case with a language.
#[derive(Debug, Clone, Copy)]
pub struct CodingSpec<'a> {
    pub language: &'a str,
    pub framework: &'a Framework,
    pub expertise_level: Option<ExpertiseLevel>,
}

impl CodingSpec<'_> {
    /// Lowercased expertise, `intermediate` when unset.
    pub fn expertise_lowercase(&self) -> &'static str {
        self.expertise_level.unwrap_or_default().lowercase()
    }
}

impl UseCaseSpec {
    #[cfg(test)]
    pub fn general(target_use_case: TargetUseCase) -> Self {
        Self {
            target_use_case,
            ..Self::default()
        }
    }

    /// Language, framework and expertise are ignored outside the coding use
    /// case, and the coding branch needs a language to apply.
    pub fn coding(&self) -> Option<CodingSpec<'_>> {
        if self.target_use_case != TargetUseCase::CodingProgramming {
            return None;
        }
        let language = self
            .programming_language
            .as_deref()
            .filter(|l| !l.trim().is_empty())?;
        Some(CodingSpec {
            language,
            framework: &self.framework,
            expertise_level: self.expertise_level,
        })
    }

    /// Clears language, framework and expertise outside the coding use case.
    pub fn normalized(self) -> Self {
        if self.target_use_case == TargetUseCase::CodingProgramming {
            self
        } else {
            Self {
                target_use_case: self.target_use_case,
                ..Self::default()
            }
        }
    }

    /// Expertise level for the user profile block: lowercased, defaulting to
    /// `intermediate`. Outside the coding use case it is always `intermediate`.
    pub fn profile_expertise(&self) -> &'static str {
        if self.target_use_case != TargetUseCase::CodingProgramming {
            return ExpertiseLevel::default().lowercase();
        }
        self.expertise_level.unwrap_or_default().lowercase()
    }
}
