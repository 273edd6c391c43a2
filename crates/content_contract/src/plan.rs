//! Editorial content-plan records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Lifecycle state of a planned topic.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Idea,
    Drafting,
    Review,
    Ready,
    Published,
}

impl PlanStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanStatus::Idea => "idea",
            PlanStatus::Drafting => "drafting",
            PlanStatus::Review => "review",
            PlanStatus::Ready => "ready",
            PlanStatus::Published => "published",
        }
    }
}

impl Display for PlanStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One topic entry in the content-plan file.
///
/// The plan file is owned by editorial tooling; keys this model does not know
/// about are preserved through `extra` so a status sync never strips them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanTopic {
    pub slug: String,
    pub status: PlanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
