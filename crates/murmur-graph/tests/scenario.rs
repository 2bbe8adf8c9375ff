//! End-to-end checks through the public API.

use murmur_core::{Attributes, Dataset};
use murmur_graph::{
    filter_posts_by_graph, rank, rank_by, GraphBuilder, GraphModel, NodeId, QueryError,
    RankPolicy, SocialGraph,
};
use serde_json::{json, Value};

const SCENARIO: &str = r#"{
    "users": {
        "U1": {"username": "u1", "attributes": {"gender": "male"}},
        "U2": {"username": "u2", "attributes": {"gender": "female"}}
    },
    "posts": {
        "P1": {"author": "U1", "content": "hello world", "views": 10},
        "P2": {"author": "U2", "content": "hello", "views": 2}
    },
    "comments": {
        "C1": {"author": "U2", "post_id": "P1"},
        "C2": {"author": "U2", "post_id": "P1"},
        "C3": {"author": "U2", "post_id": "P1"},
        "C4": {"author": "U1", "post_id": "P2"},
        "C5": {"author": "U1", "post_id": "P2"},
        "C6": {"author": "U1", "post_id": "P2"},
        "C7": {"author": "U1", "post_id": "P2"},
        "C8": {"author": "U1", "post_id": "P2"},
        "C9": {"author": "U1", "post_id": "P2"},
        "C10": {"author": "U1", "post_id": "P2"},
        "C11": {"author": "U1", "post_id": "P2"}
    }
}"#;

fn scenario() -> SocialGraph {
    GraphBuilder::from_dataset(&Dataset::from_json_str(SCENARIO).unwrap())
}

fn ids(graph: &SocialGraph, posts: impl IntoIterator<Item = NodeId>) -> Vec<String> {
    posts
        .into_iter()
        .map(|p| graph.get(p).unwrap().id().to_string())
        .collect()
}

fn gender(value: &str) -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert("gender", value);
    attrs
}

#[test]
fn test_scenario_rankings() {
    let graph = scenario();

    let views = rank_by(&graph, "views", 0.5, 1).unwrap();
    assert_eq!(ids(&graph, views.iter().map(|r| r.post)), vec!["P1"]);

    let comments = rank_by(&graph, "comments", 0.5, 1).unwrap();
    assert_eq!(ids(&graph, comments.iter().map(|r| r.post)), vec!["P2"]);

    let mixed = rank_by(&graph, "mixed", 0.5, 2).unwrap();
    assert_eq!(ids(&graph, mixed.iter().map(|r| r.post)), vec!["P1", "P2"]);
    assert_eq!(mixed[0].score, 6.5);
    assert_eq!(mixed[1].score, 5.0);
}

#[test]
fn test_scenario_filters() {
    let graph = scenario();

    let both = filter_posts_by_graph(&graph, ["hello", "world"], &Attributes::new()).unwrap();
    assert_eq!(ids(&graph, both), vec!["P1"]);

    let female = filter_posts_by_graph(&graph, ["hello"], &gender("female")).unwrap();
    assert_eq!(ids(&graph, female), vec!["P2"]);

    let all = filter_posts_by_graph(&graph, Vec::<String>::new(), &Attributes::new()).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_scenario_errors() {
    let graph = scenario();

    assert!(matches!(
        rank_by(&graph, "invalid", 0.5, 1),
        Err(QueryError::InvalidPolicy(_))
    ));
    assert_eq!(
        rank_by(&graph, "mixed", 1.5, 1),
        Err(QueryError::InvalidWeight(1.5))
    );
}

/// A flat, hand-rolled model: queries must not care how the graph is stored.
struct FlatModel {
    posts: Vec<FlatPost>,
    users: Vec<Attributes>,
}

struct FlatPost {
    authors: Vec<usize>,
    views: u64,
    comments: usize,
    text: &'static str,
}

impl GraphModel for FlatModel {
    type Post = usize;
    type User = usize;

    fn posts(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.posts.len()
    }

    fn author_of(&self, post: usize) -> murmur_graph::Result<usize> {
        match self.posts[post].authors.as_slice() {
            [author] => Ok(*author),
            authors => Err(QueryError::Integrity {
                post: post.to_string(),
                authors: authors.len(),
            }),
        }
    }

    fn comment_count(&self, post: usize) -> usize {
        self.posts[post].comments
    }

    fn view_count(&self, post: usize) -> u64 {
        self.posts[post].views
    }

    fn text_of(&self, post: usize) -> &str {
        self.posts[post].text
    }

    fn attribute(&self, user: usize, key: &str) -> Option<&Value> {
        self.users[user].get(key)
    }
}

fn flat() -> FlatModel {
    FlatModel {
        users: vec![gender("male"), gender("female"), Attributes::new()],
        posts: vec![
            FlatPost { authors: vec![0], views: 3, comments: 3, text: "Cats and dogs" },
            FlatPost { authors: vec![1], views: 3, comments: 1, text: "dogs only" },
            FlatPost { authors: vec![2], views: 7, comments: 0, text: "cats" },
        ],
    }
}

#[test]
fn test_custom_model_ranking() {
    let model = flat();

    let ranked = rank(&model, RankPolicy::Views, 0.0, 5).unwrap();
    let order: Vec<usize> = ranked.iter().map(|r| r.post).collect();
    // Posts 0 and 1 tie on views and keep their order.
    assert_eq!(order, vec![2, 0, 1]);
}

#[test]
fn test_custom_model_filtering() {
    let model = flat();

    let cats = filter_posts_by_graph(&model, ["CATS"], &Attributes::new()).unwrap();
    assert_eq!(cats, vec![0, 2]);

    let male_dogs = filter_posts_by_graph(&model, ["dogs"], &gender("male")).unwrap();
    assert_eq!(male_dogs, vec![0]);

    // User 2 has no gender at all.
    let anyone = filter_posts_by_graph(&model, ["cats"], &gender("")).unwrap();
    assert!(anyone.is_empty());
}

#[test]
fn test_custom_model_integrity() {
    let mut model = flat();
    model.posts[1].authors = vec![0, 1];

    assert_eq!(
        filter_posts_by_graph(&model, Vec::<String>::new(), &Attributes::new()),
        Err(QueryError::Integrity {
            post: "1".to_string(),
            authors: 2
        })
    );
}

#[test]
fn test_queries_are_repeatable() {
    let graph = scenario();
    let first: Vec<NodeId> = graph.posts().collect();
    let second: Vec<NodeId> = graph.posts().collect();
    assert_eq!(first, second);

    let p1 = graph.get_index("P1").unwrap();
    let author = graph.author_of(p1).unwrap();
    assert_eq!(graph.attribute(author, "gender"), Some(&json!("male")));
}
