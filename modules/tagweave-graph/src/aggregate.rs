//! Batch aggregation: posts in, co-occurrence graph and summary tables out.
//!
//! Everything here is a single synchronous pass over the input slice with
//! explicit keyed accumulators. Each accumulator carries a first-seen
//! ordinal so output order (and top-N tie-breaking) is deterministic by
//! encounter order, independent of hash iteration order.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use tagweave_common::{
    validate, AggregateOptions, PostRecord, RankedEntry, TagEdge, TagNode, TagWeaveError,
};

use crate::stats::{self, Histogram};

/// Everything derived from one batch. Recomputed from scratch per call;
/// nothing is persisted or updated incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AggregateResult {
    pub nodes: Vec<TagNode>,
    pub edges: Vec<TagEdge>,
    pub location_table: Vec<RankedEntry>,
    pub tag_table: Vec<RankedEntry>,
    pub sentiment_histogram: Histogram,
    pub word_frequencies: Vec<RankedEntry>,
}

/// Aggregate a batch of scored posts into graph entities and summary tables.
///
/// Pure over its input: no shared state, safe to call from multiple threads.
/// An invalid record aborts the whole call; an empty batch yields empty,
/// well-formed outputs.
pub fn aggregate(
    posts: &[PostRecord],
    opts: &AggregateOptions,
) -> Result<AggregateResult, TagWeaveError> {
    validate(posts)?;

    let nodes = build_nodes(posts, opts);
    let edges = build_edges(posts);
    let location_table = top_locations(posts, opts.top_n);
    let tag_table = top_tags(posts, opts.top_n);
    let sentiment_histogram = stats::sentiment_histogram(posts, opts.histogram_bins);
    let word_frequencies = stats::word_frequencies(posts, opts.max_words);

    info!(
        posts = posts.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        "aggregated post batch"
    );

    Ok(AggregateResult {
        nodes,
        edges,
        location_table,
        tag_table,
        sentiment_histogram,
        word_frequencies,
    })
}

struct NodeAcc {
    count: u64,
    sentiment_sum: f64,
    first_seen: usize,
}

/// One node per distinct non-empty tag: post count, mean sentiment scaled
/// for display, and display size `count * size_factor`.
pub fn build_nodes(posts: &[PostRecord], opts: &AggregateOptions) -> Vec<TagNode> {
    let mut groups: HashMap<&str, NodeAcc> = HashMap::new();

    for post in posts {
        if post.tag.is_empty() {
            continue;
        }
        let ordinal = groups.len();
        let acc = groups.entry(post.tag.as_str()).or_insert(NodeAcc {
            count: 0,
            sentiment_sum: 0.0,
            first_seen: ordinal,
        });
        acc.count += 1;
        acc.sentiment_sum += post.sentiment;
    }

    let mut nodes: Vec<(usize, TagNode)> = groups
        .into_iter()
        .map(|(tag, acc)| {
            (
                acc.first_seen,
                TagNode {
                    id: tag.to_string(),
                    count: acc.count,
                    weight: acc.sentiment_sum / acc.count as f64 * opts.weight_scale,
                    size: acc.count * opts.size_factor,
                },
            )
        })
        .collect();
    nodes.sort_by_key(|(ordinal, _)| *ordinal);
    nodes.into_iter().map(|(_, node)| node).collect()
}

struct EdgeAcc {
    count: u64,
    first_seen: usize,
}

/// One edge per distinct ordered (tag, associated_tag) pair, merged by
/// summing counts. Dedup is keyed on the pair itself, never on whole-object
/// comparison. Self-loops are kept; empty associated entries name no
/// hashtag and are skipped, as are posts with an empty primary tag.
pub fn build_edges(posts: &[PostRecord]) -> Vec<TagEdge> {
    let mut groups: HashMap<(&str, &str), EdgeAcc> = HashMap::new();

    for post in posts {
        if post.tag.is_empty() {
            continue;
        }
        for associated in &post.associated_tags {
            if associated.is_empty() {
                continue;
            }
            let ordinal = groups.len();
            let acc = groups
                .entry((post.tag.as_str(), associated.as_str()))
                .or_insert(EdgeAcc {
                    count: 0,
                    first_seen: ordinal,
                });
            acc.count += 1;
        }
    }

    let mut edges: Vec<(usize, TagEdge)> = groups
        .into_iter()
        .map(|((source, target), acc)| {
            (
                acc.first_seen,
                TagEdge {
                    source: source.to_string(),
                    target: target.to_string(),
                    count: acc.count,
                },
            )
        })
        .collect();
    edges.sort_by_key(|(ordinal, _)| *ordinal);
    edges.into_iter().map(|(_, edge)| edge).collect()
}

/// Top-N locations by post count. Posts with an empty `place` are excluded.
pub fn top_locations(posts: &[PostRecord], top_n: usize) -> Vec<RankedEntry> {
    top_by_count(
        posts
            .iter()
            .filter(|p| !p.place.is_empty())
            .map(|p| p.place.as_str()),
        top_n,
    )
}

/// Top-N tags by post count, regardless of place. Empty tags are excluded.
pub fn top_tags(posts: &[PostRecord], top_n: usize) -> Vec<RankedEntry> {
    top_by_count(
        posts
            .iter()
            .filter(|p| !p.tag.is_empty())
            .map(|p| p.tag.as_str()),
        top_n,
    )
}

/// Count keys, sort by count descending with first-seen order breaking
/// ties, and truncate to `top_n`.
fn top_by_count<'a>(keys: impl Iterator<Item = &'a str>, top_n: usize) -> Vec<RankedEntry> {
    let mut groups: HashMap<&str, (u64, usize)> = HashMap::new();

    for key in keys {
        let ordinal = groups.len();
        let (count, _) = groups.entry(key).or_insert((0, ordinal));
        *count += 1;
    }

    let mut ranked: Vec<(u64, usize, &str)> = groups
        .into_iter()
        .map(|(key, (count, first_seen))| (count, first_seen, key))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(count, _, label)| RankedEntry {
            label: label.to_string(),
            count,
        })
        .collect()
}

/// The location and tag top-N lists zipped by rank position, as the tabular
/// rendering surface expects: a mapping from column name to equal-length
/// value columns.
///
/// Rank 1 location sits next to rank 1 hashtag purely by position — this is
/// a deliberate presentation quirk, not a join on shared identity. The
/// shorter list pads with empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankZipTable {
    #[serde(rename = "Location")]
    pub locations: Vec<String>,
    #[serde(rename = "Posts")]
    pub location_counts: Vec<String>,
    #[serde(rename = "Hashtag")]
    pub tags: Vec<String>,
    #[serde(rename = "Count")]
    pub tag_counts: Vec<String>,
}

/// Pair two independently sorted top-N lists by rank position, padding the
/// shorter with empty cells rather than failing on unequal lengths.
pub fn zip_by_rank(locations: &[RankedEntry], tags: &[RankedEntry]) -> RankZipTable {
    let rows = locations.len().max(tags.len());
    let mut table = RankZipTable {
        locations: Vec::with_capacity(rows),
        location_counts: Vec::with_capacity(rows),
        tags: Vec::with_capacity(rows),
        tag_counts: Vec::with_capacity(rows),
    };

    for rank in 0..rows {
        match locations.get(rank) {
            Some(entry) => {
                table.locations.push(entry.label.clone());
                table.location_counts.push(entry.count.to_string());
            }
            None => {
                table.locations.push(String::new());
                table.location_counts.push(String::new());
            }
        }
        match tags.get(rank) {
            Some(entry) => {
                table.tags.push(entry.label.clone());
                table.tag_counts.push(entry.count.to_string());
            }
            None => {
                table.tags.push(String::new());
                table.tag_counts.push(String::new());
            }
        }
    }

    table
}
