use serde::{Deserialize, Serialize};

use crate::modules::catalog::models::CareService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Need {
    Baby,
    Elderly,
    Adult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    Daytime,
    Overnight,
    Respite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specificity {
    General,
    Newborn,
    Special,
    Recovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Quiet,
    Active,
    Social,
}

impl Need {
    pub fn as_str(&self) -> &'static str {
        match self {
            Need::Baby => "baby",
            Need::Elderly => "elderly",
            Need::Adult => "adult",
        }
    }
}

impl Timing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timing::Daytime => "daytime",
            Timing::Overnight => "overnight",
            Timing::Respite => "respite",
        }
    }
}

impl Specificity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specificity::General => "general",
            Specificity::Newborn => "newborn",
            Specificity::Special => "special",
            Specificity::Recovery => "recovery",
        }
    }
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Quiet => "quiet",
            Style::Active => "active",
            Style::Social => "social",
        }
    }
}

/// Answers from the four-step match wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    pub need: Need,
    pub timing: Timing,
    pub specificity: Specificity,
    pub style: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub service: CareService,
    pub source: RecommendationSource,
}
