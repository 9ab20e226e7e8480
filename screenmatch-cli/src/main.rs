use clap::Parser;
use screenmatch::io::{load_image, load_image_as};
use screenmatch::{
    best_for_each_template, score, MatchCandidate, MatchConfig, Matcher, Metric, ScaleRange,
    Template, DEFAULT_PIXEL_TOLERANCE,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod categories;

use categories::{CommandCategory, CommandInfo, COMMANDS};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "screenmatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Print command categories as JSON and exit.
    #[arg(long)]
    list_categories: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

fn default_tolerance() -> u32 {
    DEFAULT_PIXEL_TOLERANCE
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetricConfig {
    PixelDiff {
        #[serde(default = "default_tolerance")]
        tolerance: u32,
    },
    Ncc,
    #[serde(rename = "dhash")]
    DHash,
}

impl From<MetricConfig> for Metric {
    fn from(value: MetricConfig) -> Self {
        match value {
            MetricConfig::PixelDiff { tolerance } => Metric::PixelDiff { tolerance },
            MetricConfig::Ncc => Metric::Ncc,
            MetricConfig::DHash => Metric::DHash,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    metric: MetricConfig,
    stride: usize,
    prefilter_ratio: f32,
    good_enough: Option<f32>,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            metric: MetricConfig::PixelDiff {
                tolerance: DEFAULT_PIXEL_TOLERANCE,
            },
            stride: cfg.stride,
            prefilter_ratio: cfg.prefilter_ratio,
            good_enough: cfg.good_enough,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScaleRangeJson {
    min: f32,
    max: f32,
    step: f32,
}

#[derive(Debug, Deserialize)]
struct TemplateJson {
    id: String,
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    templates: Vec<TemplateJson>,
    compare_path: Option<String>,
    threshold: f32,
    scales: Option<ScaleRangeJson>,
    overlap_suppression: bool,
    output_path: Option<String>,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            templates: Vec::new(),
            compare_path: None,
            threshold: 0.9,
            scales: None,
            overlap_suppression: true,
            output_path: None,
            match_cfg: MatchConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    template: String,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    score: f32,
    scale: f32,
}

impl From<&MatchCandidate> for MatchRecord {
    fn from(value: &MatchCandidate) -> Self {
        Self {
            template: value.template.to_string(),
            x: value.region.x,
            y: value.region.y,
            width: value.region.width,
            height: value.region.height,
            score: value.score,
            scale: value.scale,
        }
    }
}

#[derive(Debug, Serialize)]
struct SimilarRecord {
    score: f32,
    similar: bool,
}

#[derive(Debug, Serialize)]
struct Output {
    metric: &'static str,
    comparisons: u64,
    matches: Vec<MatchRecord>,
    best_per_template: BTreeMap<String, MatchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    similar: Option<SimilarRecord>,
}

#[derive(Serialize)]
struct CategoryListing<'a> {
    categories: &'a [CommandCategory],
    commands: &'a [CommandInfo],
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("screenmatch=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }
    if cli.list_categories {
        let listing = CategoryListing {
            categories: &CommandCategory::ALL,
            commands: &COMMANDS,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }
    if config.templates.is_empty() && config.compare_path.is_none() {
        return Err("config needs at least one template or a compare_path".into());
    }

    let base = load_image(&config.image_path)?;
    let templates = config
        .templates
        .iter()
        .map(|tpl| {
            let image = load_image_as(&tpl.path, base.channels())?;
            Ok(Template::new(tpl.id.as_str(), image))
        })
        .collect::<Result<Vec<_>, screenmatch::MatchError>>()?;
    let scales = config
        .scales
        .as_ref()
        .map(|s| ScaleRange::new(s.min, s.max, s.step))
        .transpose()?;

    let matcher = Matcher::new(Metric::from(config.match_cfg.metric)).with_config(MatchConfig {
        stride: config.match_cfg.stride,
        prefilter_ratio: config.match_cfg.prefilter_ratio,
        good_enough: config.match_cfg.good_enough,
        parallel: config.match_cfg.parallel,
    });

    let result =
        matcher.find_all_templates(base.view(), &templates, config.threshold, scales.as_ref())?;
    let metric = result.metric;
    let comparisons = result.comparisons;
    let best_per_template = best_for_each_template(&result.candidates)
        .iter()
        .map(|(id, cand)| (id.to_string(), MatchRecord::from(cand)))
        .collect();
    let matches: Vec<MatchRecord> = result
        .resolve(config.overlap_suppression)
        .iter()
        .map(MatchRecord::from)
        .collect();
    tracing::info!(
        templates = templates.len(),
        matches = matches.len(),
        comparisons,
        "matching finished"
    );

    let similar = match &config.compare_path {
        Some(path) => {
            let other = load_image_as(path, base.channels())?;
            let value = score(base.view(), other.view(), matcher.kernel())?;
            Some(SimilarRecord {
                score: value,
                similar: matcher.similar_image(base.view(), other.view(), config.threshold)?,
            })
        }
        None => None,
    };

    let output = Output {
        metric,
        comparisons,
        matches,
        best_per_template,
        similar,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
