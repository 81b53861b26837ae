use serde::{Deserialize, Serialize};

/// Company research used to enrich the tailoring prompt. Every field is
/// optional and none is validated; missing values render as the generic
/// defaults in the prompt block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// One record from a multi-version generation run. `version` is 1-based and
/// follows call order; `approach` names the sampling stance used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeVersion {
    pub version: u32,
    pub content: String,
    pub approach: String,
}
