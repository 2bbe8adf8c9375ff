//! Text aggregation for word clouds.
//!
//! Filtered posts are joined into one body of text, and that text is
//! reduced to word counts. Rendering the cloud is left to the consumer.

use crate::model::GraphModel;
use std::collections::{HashMap, HashSet};

/// Common English words that carry no signal in a word cloud.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "i",
    "in", "is", "it", "its", "my", "not", "of", "on", "or", "so", "that", "the", "this", "to",
    "was", "we", "were", "with", "you",
];

/// Joins the text of `posts` with single spaces.
pub fn aggregate_text<G: GraphModel>(graph: &G, posts: &[G::Post]) -> String {
    posts
        .iter()
        .map(|&post| graph.text_of(post))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Counts lowercase words in `text`.
///
/// Words are maximal runs of alphanumeric characters (apostrophes inside a
/// word are kept). Words shorter than `min_len` characters or contained in
/// `stopwords` are dropped. The result is sorted by count, highest first,
/// then alphabetically.
pub fn word_frequencies<S: AsRef<str>>(
    text: &str,
    min_len: usize,
    stopwords: &[S],
) -> Vec<(String, usize)> {
    let stopwords: HashSet<String> = stopwords
        .iter()
        .map(|w| w.as_ref().to_lowercase())
        .collect();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in text
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| !w.is_empty() && w.chars().count() >= min_len && !stopwords.contains(w))
    {
        *counts.entry(word).or_default() += 1;
    }

    let mut words: Vec<(String, usize)> = counts.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words
}
