use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::PaperId;

/// A per-paper summary carved out of a batch AI response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PaperSummary {
    pub paper_id: PaperId,
    pub title: String,
    pub summary: String,
}
