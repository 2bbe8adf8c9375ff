//! CLI command implementations.

use crate::config::{Config, CONFIG_DIR, CONFIG_FILE};
use crate::{FilterArgs, RankArgs};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use murmur_core::{Attributes, Dataset};
use murmur_graph::{
    aggregate_text, word_frequencies, GraphBuilder, GraphModel, KeywordMatcher, MatchMode, NodeId,
    PostFilter, RankPolicy, RankedPost, SocialGraph,
};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Parses a `key=value` author filter.
///
/// The value is read as JSON when it parses (so `age=30` is the number 30
/// and `verified=true` a boolean), otherwise as a plain string.
pub fn parse_attribute(s: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing attribute name in '{}'", s));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Write a default config in a directory.
pub fn init(path: &Path) -> Result<()> {
    let murmur_dir = path.join(CONFIG_DIR);
    let config_path = murmur_dir.join(CONFIG_FILE);

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    fs::create_dir_all(&murmur_dir)?;
    fs::write(
        &config_path,
        serde_json::to_string_pretty(&Config::default())?,
    )?;

    println!("{} Initialized Murmur in {}", "✓".green(), path.display());
    println!("  Edit {} to change defaults", config_path.display().to_string().cyan());

    Ok(())
}

/// Loads a dataset file and builds the graph.
fn load_graph(path: &Path) -> Result<SocialGraph> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Loading {}...", path.display()));

    let dataset = Dataset::load(path);
    spinner.finish_and_clear();

    Ok(GraphBuilder::from_dataset(&dataset?))
}

/// Merges config defaults with command-line overrides.
fn ranking_options(config: &Config, args: &RankArgs) -> Result<(RankPolicy, f64, usize)> {
    let policy = match &args.policy {
        Some(name) => name.parse::<RankPolicy>()?,
        None => config.ranking.policy,
    };
    let weight = args.weight.unwrap_or(config.ranking.weight);
    let limit = args.limit.map_or(config.ranking.limit, |n| n as usize);
    Ok((policy, weight, limit))
}

fn post_filter(config: &Config, args: &FilterArgs) -> PostFilter {
    let mut matcher: KeywordMatcher = config.keywords.clone();
    if args.any {
        matcher = matcher.mode(MatchMode::Any);
    }
    if args.case_sensitive {
        matcher = matcher.case_sensitive(true);
    }
    if args.whole_word {
        matcher = matcher.whole_word(true);
    }

    let user_filter: Attributes = args.attributes.iter().cloned().collect();

    PostFilter::new()
        .keywords(args.keywords.iter().cloned())
        .user_filter(user_filter)
        .matcher(matcher)
}

fn post_id(graph: &SocialGraph, post: NodeId) -> &str {
    graph.get(post).map(|node| node.id()).unwrap_or("?")
}

/// Runs the ranking query for a parsed graph.
fn ranked_posts(
    graph: &SocialGraph,
    config: &Config,
    args: &RankArgs,
) -> Result<(RankPolicy, Vec<RankedPost<NodeId>>)> {
    let (policy, weight, limit) = ranking_options(config, args)?;
    Ok((policy, murmur_graph::rank(graph, policy, weight, limit)?))
}

/// Show the most important posts.
pub fn rank_posts(
    graph: &SocialGraph,
    config: &Config,
    args: &RankArgs,
    json: bool,
) -> Result<String> {
    let (policy, ranked) = ranked_posts(graph, config, args)?;

    if json {
        let rows: Vec<Value> = ranked
            .iter()
            .enumerate()
            .map(|(i, r)| {
                serde_json::json!({
                    "rank": i + 1,
                    "id": post_id(graph, r.post),
                    "score": r.score,
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut out = format!(
        "{} important posts by {}\n",
        ranked.len(),
        policy.to_string().cyan()
    );
    for (i, r) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "\n  {} {} {}",
            format!("#{}", i + 1).yellow(),
            post_id(graph, r.post).cyan(),
            format!("(score {})", r.score).dimmed()
        ));
    }
    Ok(out)
}

pub fn rank(dataset: &Path, config: Option<&Path>, args: &RankArgs, json: bool) -> Result<()> {
    let config = Config::load(config)?;
    let graph = load_graph(dataset)?;
    println!("{}", rank_posts(&graph, &config, args, json)?);
    Ok(())
}

/// List posts matching the filter.
pub fn filter_posts(
    graph: &SocialGraph,
    config: &Config,
    args: &FilterArgs,
    json: bool,
) -> Result<String> {
    let posts = post_filter(config, args).apply(graph)?;

    if json {
        let rows: Vec<Value> = posts
            .iter()
            .map(|&p| {
                serde_json::json!({
                    "id": post_id(graph, p),
                    "content": graph.text_of(p),
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    if posts.is_empty() {
        return Ok("No posts matched".to_string());
    }

    let mut out = format!("Found {} posts:\n", posts.len());
    for &post in &posts {
        let author = graph.author_of(post)?;
        let author_label = graph.get(author).map(|n| n.label()).unwrap_or("?");
        out.push_str(&format!(
            "\n  {} {} {}",
            post_id(graph, post).cyan(),
            format!("by {}", author_label).dimmed(),
            graph.text_of(post)
        ));
    }
    Ok(out)
}

pub fn filter(dataset: &Path, config: Option<&Path>, args: &FilterArgs, json: bool) -> Result<()> {
    let config = Config::load(config)?;
    let graph = load_graph(dataset)?;
    println!("{}", filter_posts(&graph, &config, args, json)?);
    Ok(())
}

/// Word counts (or raw text) of the filtered posts.
pub fn post_words(
    graph: &SocialGraph,
    config: &Config,
    args: &FilterArgs,
    limit: Option<usize>,
    raw: bool,
) -> Result<String> {
    let posts = post_filter(config, args).apply(graph)?;
    let text = aggregate_text(graph, &posts);

    if raw {
        return Ok(text);
    }

    let mut words = word_frequencies(&text, config.words.min_len, config.words.stopwords.as_slice());
    words.truncate(limit.unwrap_or(config.words.limit));

    let width = words.iter().map(|(w, _)| w.chars().count()).max().unwrap_or(0);
    let lines: Vec<String> = words
        .iter()
        .map(|(word, count)| {
            format!(
                "  {:width$}  {}",
                word,
                count.to_string().cyan(),
                width = width
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn words(
    dataset: &Path,
    config: Option<&Path>,
    args: &FilterArgs,
    limit: Option<usize>,
    raw: bool,
) -> Result<()> {
    let config = Config::load(config)?;
    let graph = load_graph(dataset)?;
    println!("{}", post_words(&graph, &config, args, limit, raw)?);
    Ok(())
}

/// Show graph statistics.
pub fn stats(dataset: &Path) -> Result<()> {
    let graph = load_graph(dataset)?;
    let stats = graph.stats();

    println!("{}", "Murmur Graph".cyan().bold());
    println!();
    println!("  {} {}", "Users:".dimmed(), stats.users);
    println!("  {} {}", "Posts:".dimmed(), stats.posts);
    println!("  {} {}", "Comments:".dimmed(), stats.comments);
    println!("  {} {}", "Edges:".dimmed(), stats.edges);

    Ok(())
}

/// Export the graph to JSON with the top posts highlighted.
pub fn export(dataset: &Path, config: Option<&Path>, args: &RankArgs, output: &Path) -> Result<()> {
    let config = Config::load(config)?;
    let graph = load_graph(dataset)?;
    let (policy, ranked) = ranked_posts(&graph, &config, args)?;

    let export = graph.export().with_important(&graph, policy, &ranked);
    fs::write(output, serde_json::to_string_pretty(&export)?)?;
    println!("{} Exported to {}", "✓".green(), output.display());

    Ok(())
}
