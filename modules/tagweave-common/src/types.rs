use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TagWeaveError;

// --- Input ---

/// One scored social-media post, as supplied by the fetching/scoring
/// collaborator. The aggregator never fetches or scores anything itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostRecord {
    /// Primary hashtag of the post. An empty string means the post carries
    /// no tag: it is excluded from node and edge derivation (and from the
    /// tag table) but still counts toward the location table and the
    /// sentiment histogram.
    pub tag: String,
    /// Co-occurring hashtags found in the same post, in source order.
    #[serde(default)]
    pub associated_tags: Vec<String>,
    /// Sentiment score in [-1.0, 1.0].
    pub sentiment: f64,
    /// Free-text location. Empty means unknown.
    #[serde(default)]
    pub place: String,
    /// Raw post text, when the collaborator carries it through. Only used
    /// for word-frequency derivation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Reject a batch containing a semantically invalid record.
///
/// The typed shape already guarantees fields are present; what can still go
/// wrong is the sentiment score: non-finite, or outside [-1.0, 1.0]. The
/// error names the offending record index and field. No coercion, no
/// partial output. An empty batch is valid.
pub fn validate(posts: &[PostRecord]) -> Result<(), TagWeaveError> {
    for (index, post) in posts.iter().enumerate() {
        if !post.sentiment.is_finite() {
            return Err(TagWeaveError::Validation {
                index,
                field: "sentiment",
                reason: "must be a finite number".to_string(),
            });
        }
        if !(-1.0..=1.0).contains(&post.sentiment) {
            return Err(TagWeaveError::Validation {
                index,
                field: "sentiment",
                reason: format!("value {} outside [-1, 1]", post.sentiment),
            });
        }
    }
    Ok(())
}

// --- Derived graph entities ---

/// One node per distinct non-empty tag observed in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TagNode {
    /// The tag string. Identity key and display label.
    pub id: String,
    /// Number of posts carrying this tag.
    pub count: u64,
    /// Mean sentiment across the tag's posts, scaled for display
    /// (roughly [-100, 100] at the default scale).
    pub weight: f64,
    /// Display size, `count * size_factor`.
    pub size: u64,
}

/// One edge per distinct ordered (source, target) co-occurrence pair.
///
/// Invariant: the edge set never contains two entries with the same
/// (source, target); repeated pairs merge by summing `count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TagEdge {
    pub source: String,
    pub target: String,
    /// Number of posts in which this exact pair co-occurred.
    pub count: u64,
}

/// One row of a top-N summary list (a location or a hashtag with its
/// post count).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RankedEntry {
    pub label: String,
    pub count: u64,
}
