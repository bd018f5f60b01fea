//! Choice tables for the input surface: the values a client can offer for
//! each configuration field, plus generation defaults and ranges.

use serde::Serialize;

use crate::models::generation::{
    GenerationConfig, MAX_TOKENS_RANGE, PENALTY_RANGE, TEMPERATURE_RANGE, TOP_P_RANGE,
};
use crate::models::session::SessionProfile;
use crate::models::use_case::{ExpertiseLevel, TargetUseCase};

/// Sentinel offered first in every framework list; maps to `Framework::None`.
pub const NO_FRAMEWORK: &str = "None";

pub const PROGRAMMING_LANGUAGES: &[&str] = &[
    "Python", "JavaScript", "TypeScript", "Java", "C++", "C#", "Go", "Rust", "Swift", "Kotlin",
    "PHP", "Ruby", "C", "Scala", "R", "MATLAB", "SQL", "HTML/CSS", "Dart", "Other",
];

/// Languages without an entry here get no framework choice.
pub const FRAMEWORKS: &[(&str, &[&str])] = &[
    (
        "Python",
        &[
            "Django", "Flask", "FastAPI", "Streamlit", "PyTorch", "TensorFlow", "Pandas", "NumPy",
            "Jupyter", "Kivy (Mobile)", "Other",
        ],
    ),
    (
        "JavaScript",
        &[
            "React", "Vue.js", "Angular", "Node.js", "Express.js", "Next.js", "Nuxt.js", "Svelte",
            "jQuery", "React Native", "Ionic", "Other",
        ],
    ),
    (
        "TypeScript",
        &[
            "React", "Angular", "Vue.js", "Node.js", "Express.js", "Next.js", "NestJS", "Deno",
            "React Native", "Ionic", "Other",
        ],
    ),
    (
        "Java",
        &[
            "Spring Boot", "Spring Framework", "Hibernate", "Apache Struts", "JSF", "Maven",
            "Gradle", "Android SDK", "Other",
        ],
    ),
    (
        "C++",
        &["Qt", "Boost", "FLTK", "wxWidgets", "OpenCV", "Unreal Engine", "Other"],
    ),
    (
        "C#",
        &[
            ".NET Core", ".NET Framework", "ASP.NET", "Entity Framework", "Xamarin", "Unity",
            "WPF", ".NET MAUI", "Other",
        ],
    ),
    (
        "Go",
        &["Gin", "Echo", "Fiber", "Buffalo", "Beego", "Revel", "Other"],
    ),
    (
        "Rust",
        &["Actix-web", "Rocket", "Warp", "Axum", "Tokio", "Serde", "Other"],
    ),
    (
        "Swift",
        &["SwiftUI", "UIKit", "Vapor", "Perfect", "Kitura", "Other"],
    ),
    (
        "Kotlin",
        &["Spring Boot", "Ktor", "Android SDK", "Compose", "Jetpack Compose", "Other"],
    ),
    (
        "PHP",
        &["Laravel", "Symfony", "CodeIgniter", "Zend", "CakePHP", "WordPress", "Other"],
    ),
    (
        "Ruby",
        &["Ruby on Rails", "Sinatra", "Hanami", "Padrino", "Other"],
    ),
    (
        "R",
        &["Shiny", "ggplot2", "dplyr", "tidyverse", "caret", "Other"],
    ),
    (
        "SQL",
        &["MySQL", "PostgreSQL", "SQLite", "SQL Server", "Oracle", "MongoDB", "Other"],
    ),
    (
        "HTML/CSS",
        &["Bootstrap", "Tailwind CSS", "Bulma", "Foundation", "Materialize", "Other"],
    ),
    (
        "Dart",
        &["Flutter", "Flutter Web", "Flutter Desktop", "AngularDart", "Other"],
    ),
];

pub const PLATFORMS: &[&str] = &["web", "mobile", "desktop", "api", "cli"];
pub const INTERFACE_LANGUAGES: &[&str] = &["en", "es", "fr", "de", "it", "pt", "ru", "ja", "ko", "zh"];
pub const TIMEZONES: &[&str] = &[
    "UTC",
    "Asia/Kolkata",
    "America/New_York",
    "Europe/London",
    "Asia/Tokyo",
    "Australia/Sydney",
];
pub const USER_ROLES: &[&str] = &[
    "developer", "designer", "manager", "analyst", "student", "researcher", "other",
];

/// Upload extensions accepted as raw text.
pub const UPLOAD_EXTENSIONS: &[&str] = &["txt", "md", "doc"];

/// Framework choices for a language, `"None"` first.
pub fn frameworks_for(language: &str) -> Option<Vec<&'static str>> {
    FRAMEWORKS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, frameworks)| {
            std::iter::once(NO_FRAMEWORK)
                .chain(frameworks.iter().copied())
                .collect()
        })
}

#[derive(Debug, Clone, Serialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationRanges {
    pub max_tokens: Range<u32>,
    pub temperature: Range<f64>,
    pub top_p: Range<f64>,
    pub frequency_penalty: Range<f64>,
    pub presence_penalty: Range<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameworkChoices {
    pub programming_language: &'static str,
    pub frameworks: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionsCatalog {
    pub use_cases: Vec<TargetUseCase>,
    pub programming_languages: &'static [&'static str],
    pub frameworks: Vec<FrameworkChoices>,
    pub expertise_levels: Vec<ExpertiseLevel>,
    pub default_expertise_level: ExpertiseLevel,
    pub platforms: &'static [&'static str],
    pub languages: &'static [&'static str],
    pub timezones: &'static [&'static str],
    pub user_roles: &'static [&'static str],
    pub upload_extensions: &'static [&'static str],
    pub generation_defaults: GenerationConfig,
    pub generation_ranges: GenerationRanges,
    pub session_defaults: SessionProfile,
}

fn range(bounds: (f64, f64)) -> Range<f64> {
    Range {
        min: bounds.0,
        max: bounds.1,
    }
}

pub fn catalog() -> OptionsCatalog {
    OptionsCatalog {
        use_cases: TargetUseCase::ALL.to_vec(),
        programming_languages: PROGRAMMING_LANGUAGES,
        frameworks: FRAMEWORKS
            .iter()
            .filter_map(|&(language, _)| {
                frameworks_for(language).map(|frameworks| FrameworkChoices {
                    programming_language: language,
                    frameworks,
                })
            })
            .collect(),
        expertise_levels: ExpertiseLevel::ALL.to_vec(),
        default_expertise_level: ExpertiseLevel::default(),
        platforms: PLATFORMS,
        languages: INTERFACE_LANGUAGES,
        timezones: TIMEZONES,
        user_roles: USER_ROLES,
        upload_extensions: UPLOAD_EXTENSIONS,
        generation_defaults: GenerationConfig::default(),
        generation_ranges: GenerationRanges {
            max_tokens: Range {
                min: MAX_TOKENS_RANGE.0,
                max: MAX_TOKENS_RANGE.1,
            },
            temperature: range(TEMPERATURE_RANGE),
            top_p: range(TOP_P_RANGE),
            frequency_penalty: range(PENALTY_RANGE),
            presence_penalty: range(PENALTY_RANGE),
        },
        session_defaults: SessionProfile::default(),
    }
}
