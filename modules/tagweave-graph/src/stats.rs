//! Descriptive statistics for the dashboard's Statistics tab: a sentiment
//! histogram and the word-frequency table behind the word cloud.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use tagweave_common::{PostRecord, RankedEntry};

/// Fixed-width sentiment histogram over [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: u64,
}

/// Bin every post's sentiment into `bins` fixed-width buckets over
/// [-1.0, 1.0]. All posts count, tagged or not — the histogram summarizes
/// the whole batch. A sentiment of exactly 1.0 lands in the last bin.
/// Assumes scores already validated into range; zero bins yields an empty
/// histogram.
pub fn sentiment_histogram(posts: &[PostRecord], bins: usize) -> Histogram {
    if bins == 0 {
        return Histogram { bins: Vec::new() };
    }

    let width = 2.0 / bins as f64;
    let mut counts = vec![0u64; bins];
    for post in posts {
        let index = (((post.sentiment + 1.0) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    Histogram {
        bins: counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lo: -1.0 + i as f64 * width,
                hi: -1.0 + (i + 1) as f64 * width,
                count,
            })
            .collect(),
    }
}

/// Tokens shorter than this never make the word cloud.
const MIN_WORD_LEN: usize = 3;

/// Filler words and URL fragments that would otherwise dominate any batch.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "that", "this", "with", "from", "you", "your", "are",
    "was", "were", "has", "have", "had", "not", "but", "all", "our", "out",
    "they", "them", "their", "what", "when", "who", "will", "would", "can",
    "could", "there", "here", "about", "into", "just", "like", "been", "over",
    "than", "then", "its", "his", "her", "she", "him", "how", "why", "amp",
    "http", "https", "www",
];

/// Word-frequency table over each post's raw text: lowercase, split on
/// non-alphanumeric characters, drop short tokens and stopwords, count,
/// rank count-descending with first-seen order breaking ties, truncate to
/// `max_words`. Posts without text contribute nothing.
pub fn word_frequencies(posts: &[PostRecord], max_words: usize) -> Vec<RankedEntry> {
    let mut groups: HashMap<String, (u64, usize)> = HashMap::new();

    for post in posts {
        let Some(text) = &post.text else { continue };
        for token in text.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
            if token.chars().count() < MIN_WORD_LEN || STOPWORDS.contains(&token) {
                continue;
            }
            let ordinal = groups.len();
            let (count, _) = groups.entry(token.to_string()).or_insert((0, ordinal));
            *count += 1;
        }
    }

    let mut ranked: Vec<(u64, usize, String)> = groups
        .into_iter()
        .map(|(word, (count, first_seen))| (count, first_seen, word))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    ranked.truncate(max_words);

    ranked
        .into_iter()
        .map(|(count, _, label)| RankedEntry { label, count })
        .collect()
}
