//! Post filtering by content keywords and author attributes.
//!
//! A post is kept when it passes both stages:
//!
//! 1. **Keywords**: by default every keyword must occur in the post text
//!    (case-insensitive substring match). An empty keyword list accepts all.
//! 2. **Author**: the author must carry every attribute in the user filter
//!    with an exactly equal value. A missing attribute is a non-match. An
//!    empty filter accepts all.
//!
//! The author of every post is resolved even when the keyword stage already
//! rejected it, so a post without exactly one author always surfaces as
//! [`QueryError::Integrity`](crate::QueryError::Integrity).

use crate::error::Result;
use crate::model::GraphModel;
use murmur_core::Attributes;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether all keywords or any keyword must match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    All,
    Any,
}

/// How keywords are matched against post text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordMatcher {
    pub case_sensitive: bool,
    /// Only match keywords bounded by non-alphanumeric characters.
    pub whole_word: bool,
    pub mode: MatchMode,
}

impl KeywordMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn whole_word(mut self, yes: bool) -> Self {
        self.whole_word = yes;
        self
    }

    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    fn normalize(&self, s: &str) -> String {
        if self.case_sensitive {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    }

    /// Tests one already-normalized keyword against normalized text.
    fn contains(&self, text: &str, keyword: &str) -> bool {
        if !self.whole_word || keyword.is_empty() {
            return text.contains(keyword);
        }

        // Every start position: a rejected candidate may overlap a valid one.
        text.char_indices().any(|(start, _)| {
            if !text[start..].starts_with(keyword) {
                return false;
            }
            let before = text[..start].chars().next_back();
            let after = text[start + keyword.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
    }

    /// Tests `text` against a keyword list.
    pub fn matches<S: AsRef<str>>(&self, text: &str, keywords: &[S]) -> bool {
        let keywords: Vec<String> = keywords.iter().map(|k| self.normalize(k.as_ref())).collect();
        self.matches_normalized(&self.normalize(text), &keywords)
    }

    fn matches_normalized(&self, text: &str, keywords: &[String]) -> bool {
        if keywords.is_empty() {
            return true;
        }
        match self.mode {
            MatchMode::All => keywords.iter().all(|k| self.contains(text, k)),
            MatchMode::Any => keywords.iter().any(|k| self.contains(text, k)),
        }
    }
}

/// A reusable post filter.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    keywords: Vec<String>,
    user_filter: Attributes,
    matcher: KeywordMatcher,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn user_filter(mut self, user_filter: Attributes) -> Self {
        self.user_filter = user_filter;
        self
    }

    pub fn matcher(mut self, matcher: KeywordMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Returns the posts passing both stages, in graph order.
    pub fn apply<G: GraphModel>(&self, graph: &G) -> Result<Vec<G::Post>> {
        let keywords: Vec<String> = self
            .keywords
            .iter()
            .map(|k| self.matcher.normalize(k))
            .collect();

        let mut kept = Vec::new();
        let mut total = 0usize;

        for post in graph.posts() {
            total += 1;
            let author = graph.author_of(post)?;

            let text = self.matcher.normalize(graph.text_of(post));
            if !self.matcher.matches_normalized(&text, &keywords) {
                continue;
            }

            let author_matches = self
                .user_filter
                .iter()
                .all(|(key, expected)| graph.attribute(author, key) == Some(expected));
            if !author_matches {
                continue;
            }

            kept.push(post);
        }

        debug!(
            "Filter kept {} of {} posts ({} keywords, {} attributes)",
            kept.len(),
            total,
            keywords.len(),
            self.user_filter.len()
        );

        Ok(kept)
    }
}

/// Filters posts with the default keyword matcher (all keywords,
/// case-insensitive substring).
pub fn filter_posts_by_graph<G, I, S>(
    graph: &G,
    include_keywords: I,
    user_filter: &Attributes,
) -> Result<Vec<G::Post>>
where
    G: GraphModel,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PostFilter::new()
        .keywords(include_keywords)
        .user_filter(user_filter.clone())
        .apply(graph)
}

/// Maps post handles to their text.
pub fn post_texts<'g, G: GraphModel>(graph: &'g G, posts: &[G::Post]) -> Vec<&'g str> {
    posts.iter().map(|&post| graph.text_of(post)).collect()
}
