//! Post importance ranking.
//!
//! Each post gets a scalar score under a [`RankPolicy`]:
//!
//! - `views`: the post's view count
//! - `comments`: the number of comments on the post
//! - `mixed`: `weight * views + (1 - weight) * comments`
//!
//! Results are sorted by descending score. The sort is stable, so posts with
//! equal scores come out in graph iteration order and repeated runs over the
//! same graph give identical results.
//!
//! Mixed scores are plain `f64` arithmetic and ties are exact. Two blends that
//! are equal on paper can round apart: with weight `0.3`, seven views score
//! `2.1` while three comments score `2.0999999999999996`, so the views post
//! ranks first whatever the graph order.

use crate::error::{QueryError, Result};
use crate::model::GraphModel;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// How a post's importance is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankPolicy {
    Views,
    Comments,
    /// Weighted blend of views and comments.
    Mixed,
}

impl RankPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Comments => "comments",
            Self::Mixed => "mixed",
        }
    }

    /// Checks `weight` if this policy uses it.
    pub fn validate_weight(&self, weight: f64) -> Result<()> {
        match self {
            Self::Mixed if !(0.0..=1.0).contains(&weight) => Err(QueryError::InvalidWeight(weight)),
            _ => Ok(()),
        }
    }
}

impl FromStr for RankPolicy {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "views" => Ok(Self::Views),
            "comments" => Ok(Self::Comments),
            "mixed" => Ok(Self::Mixed),
            _ => Err(QueryError::InvalidPolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for RankPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A post together with the score it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedPost<P> {
    pub post: P,
    pub score: f64,
}

/// Scores a single post. `weight` is only read by [`RankPolicy::Mixed`].
pub fn score<G: GraphModel>(graph: &G, post: G::Post, policy: RankPolicy, weight: f64) -> f64 {
    match policy {
        RankPolicy::Views => graph.view_count(post) as f64,
        RankPolicy::Comments => graph.comment_count(post) as f64,
        RankPolicy::Mixed => {
            weight * graph.view_count(post) as f64
                + (1.0 - weight) * graph.comment_count(post) as f64
        }
    }
}

/// Returns the `n` most important posts, highest score first.
///
/// Returns every post when `n` exceeds the post count, and nothing when `n`
/// is zero. Fails with [`QueryError::InvalidWeight`] if the policy is
/// `Mixed` and `weight` is outside `[0, 1]`.
pub fn rank<G: GraphModel>(
    graph: &G,
    policy: RankPolicy,
    weight: f64,
    n: usize,
) -> Result<Vec<RankedPost<G::Post>>> {
    policy.validate_weight(weight)?;

    let mut ranked: Vec<RankedPost<G::Post>> = graph
        .posts()
        .map(|post| RankedPost {
            post,
            score: score(graph, post, policy, weight),
        })
        .collect();

    let total = ranked.len();

    // Vec::sort_by is stable: ties keep graph order.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(n);

    debug!(
        "Ranked {} posts by {} (weight {}), kept {}",
        total,
        policy,
        weight,
        ranked.len()
    );

    Ok(ranked)
}

/// Like [`rank`], with the policy given by name (`"views"`, `"comments"` or
/// `"mixed"`).
pub fn rank_by<G: GraphModel>(
    graph: &G,
    policy: &str,
    weight: f64,
    n: usize,
) -> Result<Vec<RankedPost<G::Post>>> {
    rank(graph, policy.parse()?, weight, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{Edge, EdgeKind};
    use crate::graph::{NodeId, SocialGraph};
    use murmur_core::{Comment, Post, User};

    /// Adds a post with the given views and comment count, authored by `author`.
    fn add_post(graph: &mut SocialGraph, id: &str, views: u64, comments: usize) -> NodeId {
        let author = match graph.get_index("author") {
            Some(index) => index,
            None => graph.add_user(User::new("author", "a")),
        };
        let post = graph.add_post(Post::new(id, "").with_views(views));
        graph.add_edge(author, post, Edge::new(EdgeKind::Authored));
        for i in 0..comments {
            let comment = graph.add_comment(Comment::new(format!("{}-c{}", id, i), ""));
            graph.add_edge(comment, post, Edge::new(EdgeKind::CommentedOn));
        }
        post
    }

    fn ids(graph: &SocialGraph, ranked: &[RankedPost<NodeId>]) -> Vec<String> {
        ranked
            .iter()
            .map(|r| graph.get(r.post).unwrap().id().to_string())
            .collect()
    }

    fn sample() -> SocialGraph {
        let mut graph = SocialGraph::new();
        add_post(&mut graph, "p1", 10, 3);
        add_post(&mut graph, "p2", 2, 8);
        graph
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("views".parse::<RankPolicy>(), Ok(RankPolicy::Views));
        assert_eq!(" Comments ".parse::<RankPolicy>(), Ok(RankPolicy::Comments));
        assert_eq!("MIXED".parse::<RankPolicy>(), Ok(RankPolicy::Mixed));
        assert_eq!(
            "invalid".parse::<RankPolicy>(),
            Err(QueryError::InvalidPolicy("invalid".to_string()))
        );
    }

    #[test]
    fn test_rank_by_views() {
        let graph = sample();
        let ranked = rank_by(&graph, "views", 0.5, 1).unwrap();
        assert_eq!(ids(&graph, &ranked), vec!["p1"]);
        assert_eq!(ranked[0].score, 10.0);
    }

    #[test]
    fn test_rank_by_comments() {
        let graph = sample();
        let ranked = rank_by(&graph, "comments", 0.5, 1).unwrap();
        assert_eq!(ids(&graph, &ranked), vec!["p2"]);
        assert_eq!(ranked[0].score, 8.0);
    }

    #[test]
    fn test_rank_mixed() {
        let graph = sample();
        let ranked = rank_by(&graph, "mixed", 0.5, 2).unwrap();
        assert_eq!(ids(&graph, &ranked), vec!["p1", "p2"]);
        assert_eq!(ranked[0].score, 6.5);
        assert_eq!(ranked[1].score, 5.0);
    }

    #[test]
    fn test_invalid_policy() {
        let graph = sample();
        assert!(matches!(
            rank_by(&graph, "invalid", 0.5, 1),
            Err(QueryError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_invalid_weight_only_for_mixed() {
        let graph = sample();
        assert_eq!(
            rank_by(&graph, "mixed", 1.5, 1),
            Err(QueryError::InvalidWeight(1.5))
        );
        assert!(rank_by(&graph, "mixed", -0.1, 1).is_err());
        assert!(rank_by(&graph, "mixed", f64::NAN, 1).is_err());
        assert!(rank_by(&graph, "views", 1.5, 1).is_ok());
        assert!(rank_by(&graph, "comments", -3.0, 1).is_ok());
    }

    #[test]
    fn test_weight_bounds_inclusive() {
        let graph = sample();
        assert!(rank(&graph, RankPolicy::Mixed, 0.0, 1).is_ok());
        assert!(rank(&graph, RankPolicy::Mixed, 1.0, 1).is_ok());
    }

    #[test]
    fn test_n_larger_than_posts() {
        let graph = sample();
        let ranked = rank(&graph, RankPolicy::Views, 0.0, 100).unwrap();
        assert_eq!(ids(&graph, &ranked), vec!["p1", "p2"]);
    }

    #[test]
    fn test_n_zero_is_empty() {
        let graph = sample();
        assert!(rank(&graph, RankPolicy::Views, 0.0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_graph() {
        let graph = SocialGraph::new();
        assert!(rank(&graph, RankPolicy::Comments, 0.0, 5).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_graph_order() {
        let mut graph = SocialGraph::new();
        add_post(&mut graph, "a", 5, 0);
        add_post(&mut graph, "b", 9, 0);
        add_post(&mut graph, "c", 5, 0);
        add_post(&mut graph, "d", 5, 0);

        let ranked = rank(&graph, RankPolicy::Views, 0.0, 10).unwrap();
        assert_eq!(ids(&graph, &ranked), vec!["b", "a", "c", "d"]);

        // Repeated queries agree.
        let again = rank(&graph, RankPolicy::Views, 0.0, 10).unwrap();
        assert_eq!(ranked, again);
    }

    #[test]
    fn test_mixed_extremes_match_single_policies() {
        let mut graph = SocialGraph::new();
        add_post(&mut graph, "a", 4, 1);
        add_post(&mut graph, "b", 1, 6);
        add_post(&mut graph, "c", 4, 6);
        add_post(&mut graph, "d", 0, 0);

        let views = rank(&graph, RankPolicy::Views, 0.0, 10).unwrap();
        let mixed_views = rank(&graph, RankPolicy::Mixed, 1.0, 10).unwrap();
        assert_eq!(views, mixed_views);

        let comments = rank(&graph, RankPolicy::Comments, 0.0, 10).unwrap();
        let mixed_comments = rank(&graph, RankPolicy::Mixed, 0.0, 10).unwrap();
        assert_eq!(comments, mixed_comments);
    }

    #[test]
    fn test_scores_non_increasing() {
        let mut graph = SocialGraph::new();
        for (i, (views, comments)) in [(3, 1), (0, 7), (12, 0), (5, 5), (1, 1)].iter().enumerate() {
            add_post(&mut graph, &format!("p{}", i), *views, *comments);
        }

        let ranked = rank(&graph, RankPolicy::Mixed, 0.3, 3).unwrap();
        assert_eq!(ranked.len(), 3);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_mixed_ties_are_exact() {
        let mut graph = SocialGraph::new();
        add_post(&mut graph, "comments", 0, 3);
        add_post(&mut graph, "views", 7, 0);

        let ranked = rank(&graph, RankPolicy::Mixed, 0.3, 2).unwrap();
        assert_eq!(ids(&graph, &ranked), vec!["views", "comments"]);
        assert_eq!(ranked[0].score, 0.3 * 7.0);
        assert_eq!(ranked[1].score, 0.7 * 3.0);
        assert!(ranked[0].score > ranked[1].score);
    }
}
