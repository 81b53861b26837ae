//! Resume tailoring — builds prompts, calls the generation backend, and
//! degrades to the original content on any failure.
//!
//! Flow: build prompt → generate → strip fences, or fall back.
//! No public operation here returns an error: a failed tailoring call yields
//! the unmodified template and a failed ATS call yields the unmodified
//! input. Callers who need to distinguish the two paths inspect the
//! `TailorOutcome` variant.

pub mod inventory;
pub mod prompts;

use std::sync::Arc;

use tracing::{error, info};

use crate::gemini::{GenerationConfig, TextGenerator, ATS_CONFIG, TAILOR_CONFIG};
use crate::models::{CompanyInfo, ResumeVersion};

/// The base resume template. Embedded at compile time; never mutated.
pub(crate) const BASE_RESUME: &str = include_str!("../../assets/base_resume.tex");

/// Per-version sampling stances for multi-version generation, cycled when
/// `count` exceeds the list.
const VERSION_APPROACHES: &[(&str, f32)] = &[
    ("balanced", 0.7),
    ("conservative", 0.5),
    ("exploratory", 0.9),
];

/// Result of a tailoring operation. `Fallback` carries text the caller can
/// still use, plus the reason the generation path failed. `into_text()`
/// collapses both variants for callers that only want usable output.
#[derive(Debug, Clone, PartialEq)]
pub enum TailorOutcome {
    Generated(String),
    Fallback { text: String, reason: String },
}

impl TailorOutcome {
    pub fn text(&self) -> &str {
        match self {
            TailorOutcome::Generated(text) => text,
            TailorOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            TailorOutcome::Generated(text) => text,
            TailorOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TailorOutcome::Fallback { .. })
    }
}

/// Stateless tailoring client: an immutable template plus a generation
/// backend. Every operation is one prompt build and one suspending call;
/// there is no shared mutable state between calls.
#[derive(Clone)]
pub struct ResumeTailor {
    template: String,
    generator: Arc<dyn TextGenerator>,
}

impl ResumeTailor {
    /// Builds a tailor around the embedded base template.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_template(BASE_RESUME.to_string(), generator)
    }

    /// Builds a tailor around a caller-supplied template.
    pub fn with_template(template: String, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            template,
            generator,
        }
    }

    /// Tailors the base template to a job description.
    ///
    /// On success the model output is fence-stripped and returned as
    /// `Generated`. Any failure (transport, non-200 status, unparseable
    /// body, empty candidate) is logged and the unmodified template comes
    /// back as `Fallback`.
    pub async fn tailor_for_job(
        &self,
        job_description: &str,
        company_info: Option<&CompanyInfo>,
    ) -> TailorOutcome {
        self.tailor_with_config(job_description, company_info, TAILOR_CONFIG)
            .await
    }

    /// Optimizes caller-supplied resume text for applicant tracking systems.
    /// On any failure the input text is returned unchanged.
    pub async fn optimize_for_ats(&self, resume_text: &str) -> TailorOutcome {
        let prompt = prompts::build_ats_prompt(resume_text);

        match self.generator.generate(&prompt, ATS_CONFIG).await {
            Ok(text) => {
                let cleaned = strip_latex_fences(&text).to_string();
                info!(chars = cleaned.chars().count(), "ATS optimization complete");
                TailorOutcome::Generated(cleaned)
            }
            Err(e) => {
                error!("ATS optimization failed: {e}");
                TailorOutcome::Fallback {
                    text: resume_text.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Generates `count` tailored versions, one call after another with no
    /// fan-out. Each version perturbs the sampling temperature and records
    /// its stance label.
    pub async fn generate_multiple_versions(
        &self,
        job_description: &str,
        company_info: Option<&CompanyInfo>,
        count: u32,
    ) -> Vec<ResumeVersion> {
        let mut versions = Vec::with_capacity(count as usize);

        for i in 0..count {
            let (approach, temperature) =
                VERSION_APPROACHES[(i as usize) % VERSION_APPROACHES.len()];
            let config = GenerationConfig {
                temperature,
                ..TAILOR_CONFIG
            };

            let outcome = self
                .tailor_with_config(job_description, company_info, config)
                .await;

            versions.push(ResumeVersion {
                version: i + 1,
                content: outcome.into_text(),
                approach: approach.to_string(),
            });
        }

        versions
    }

    async fn tailor_with_config(
        &self,
        job_description: &str,
        company_info: Option<&CompanyInfo>,
        config: GenerationConfig,
    ) -> TailorOutcome {
        let prompt = prompts::build_tailor_prompt(&self.template, job_description, company_info);

        match self.generator.generate(&prompt, config).await {
            Ok(text) => {
                let cleaned = strip_latex_fences(&text).to_string();
                info!(chars = cleaned.chars().count(), "tailored resume generated");
                TailorOutcome::Generated(cleaned)
            }
            Err(e) => {
                error!("resume tailoring failed: {e}");
                TailorOutcome::Fallback {
                    text: self.template.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Strips the ```latex ... ``` or ``` ... ``` fences the model sometimes
/// wraps around its output. The ```latex prefix is checked first.
/// Already-clean input passes through unchanged, so stripping is idempotent.
fn strip_latex_fences(text: &str) -> &str {
    let text = text.trim();

    let body = if let Some(stripped) = text.strip_prefix("```latex") {
        stripped
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
    } else {
        return text;
    };

    let body = body.trim_start();
    body.strip_suffix("```").map(str::trim_end).unwrap_or(body)
}
