/// Document, chunk and match records
///
/// Plain value types that a host serializes in and out as JSON. A chunk is a
/// `Document` owned by another document's `chunks` list, so chunks can nest.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::RankerError;

/// Free-form metadata carried through ranking untouched.
pub type Tags = serde_json::Map<String, serde_json::Value>;

/// A unit in the batch: the query side of a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chunks: Vec<Chunk>,
    /// Candidates before ranking, the ranked list after
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub tags: Tags,
}

/// A sub-unit of a document carrying its own match candidates.
pub type Chunk = Document;

/// A scored candidate result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    /// The corpus document this match belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub scores: BTreeMap<String, NamedScore>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub tags: Tags,
}

/// A score value plus the aggregation that produced it, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedScore {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_name: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            ..Document::default()
        }
    }

    pub fn with_chunk(mut self, chunk: Chunk) -> Self {
        self.chunks.push(chunk);
        self
    }

    pub fn with_match(mut self, m: Match) -> Self {
        self.matches.push(m);
        self
    }
}

impl Match {
    pub fn new(id: impl Into<String>) -> Self {
        Match {
            id: id.into(),
            ..Match::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_score(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.scores.insert(metric.into(), NamedScore { value, op_name: None });
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Parent document this match aggregates under.
    ///
    /// Falls back to the match's own id when there is no (or an empty) parent,
    /// i.e. the match already is a document-level hit.
    pub fn group_key(&self) -> &str {
        match self.parent_id.as_deref() {
            Some(parent) if !parent.is_empty() => parent,
            _ => &self.id,
        }
    }

    /// Value of the named score, or `MissingScore` if the match lacks it.
    pub fn score(&self, metric: &str) -> Result<f64, RankerError> {
        self.scores
            .get(metric)
            .map(|s| s.value)
            .ok_or_else(|| RankerError::missing_score(&self.id, metric))
    }

    pub fn set_score(&mut self, metric: &str, value: f64, op_name: &str) {
        self.scores.insert(
            metric.to_string(),
            NamedScore {
                value,
                op_name: Some(op_name.to_string()),
            },
        );
    }
}
