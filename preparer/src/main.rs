use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pesona_core::dataset::{load_raw, load_records, save_records, Category, DocRecord};
use pesona_core::{Bm25, Normalizer, SnowballNormalizer, TermContribution};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "pesona-prepare")]
#[command(about = "Prepare, evaluate and report on the search dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Language {
    Indonesian,
    English,
}

impl Language {
    fn normalizer(self) -> SnowballNormalizer {
        match self {
            Language::Indonesian => SnowballNormalizer::indonesian(),
            Language::English => SnowballNormalizer::english(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize the raw dataset into the prepared, tokenized dataset
    Build {
        /// Raw dataset JSON (pariwisata.json shape)
        #[arg(long)]
        input: String,
        /// Prepared dataset JSON to write
        #[arg(long)]
        output: String,
        #[arg(long, value_enum, default_value_t = Language::Indonesian)]
        language: Language,
    },
    /// Print precision/recall over a ground-truth scenario file
    Evaluate {
        /// Prepared dataset JSON
        #[arg(long)]
        data: String,
        /// JSON object mapping query -> expected name keywords
        #[arg(long)]
        scenarios: String,
        #[arg(long, default_value_t = 10)]
        top_k: usize,
        #[arg(long, value_enum, default_value_t = Language::Indonesian)]
        language: Language,
    },
    /// Write the per-term BM25 score breakdown for one query
    Report {
        /// Prepared dataset JSON
        #[arg(long)]
        data: String,
        /// Raw query text
        #[arg(long)]
        query: String,
        /// Report JSON to write
        #[arg(long)]
        output: String,
        #[arg(long, value_enum, default_value_t = Language::Indonesian)]
        language: Language,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, language } => build(&input, &output, language),
        Commands::Evaluate { data, scenarios, top_k, language } => {
            evaluate(&data, &scenarios, top_k, language)
        }
        Commands::Report { data, query, output, language } => {
            report(&data, &query, &output, language)
        }
    }
}

/// Raw records become one flat document list: per item, name + description
/// are normalized into the token stream; the untouched description is kept
/// for display.
fn build(input: &str, output: &str, language: Language) -> Result<()> {
    let raw = load_raw(input)?;
    let normalizer = language.normalizer();
    let mut records: Vec<DocRecord> = Vec::new();

    for province in raw.provinces.values() {
        for item in &province.attractions {
            records.push(prepare_record(&normalizer, &province.name, Category::Wisata, item.name.clone(), item.description.clone(), item.image.clone()));
        }
        for item in &province.dishes {
            records.push(prepare_record(&normalizer, &province.name, Category::Kuliner, item.name.clone(), item.description.clone(), item.image.clone()));
        }
    }

    let num_tokens: usize = records.iter().map(|r| r.tokens.len()).sum();
    tracing::info!(num_docs = records.len(), num_tokens, "dataset prepared");
    save_records(output, &records)?;
    tracing::info!(output, "prepared dataset written");
    Ok(())
}

fn prepare_record(
    normalizer: &SnowballNormalizer,
    province: &str,
    category: Category,
    name: String,
    description: String,
    image: String,
) -> DocRecord {
    let tokens = normalizer.normalize(&format!("{name} {description}"));
    DocRecord {
        province: province.to_string(),
        category,
        content: description,
        name,
        tokens,
        image,
    }
}

/// Precision/recall table over ground-truth scenarios: a retrieved document
/// counts as relevant when its name contains any expected keyword.
fn evaluate(data: &str, scenarios_path: &str, top_k: usize, language: Language) -> Result<()> {
    let records = load_records(data)?;
    let corpus: Vec<Vec<String>> = records.iter().map(|r| r.tokens.clone()).collect();
    let bm25 = Bm25::build(&corpus);
    let normalizer = language.normalizer();

    let file = File::open(scenarios_path)
        .with_context(|| format!("open scenarios {scenarios_path}"))?;
    let scenarios: BTreeMap<String, Vec<String>> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse scenarios {scenarios_path}"))?;

    println!("{:<30} | {:<10} | {:<10}", "QUERY", "PRECISION", "RECALL");
    println!("{}", "-".repeat(56));

    let mut total_precision = 0.0;
    let mut total_recall = 0.0;
    for (query, expected) in &scenarios {
        let tokens = normalizer.normalize(query);
        let ranked = bm25.ranked(&tokens, top_k);
        let retrieved: Vec<&str> = ranked.iter().map(|&i| records[i].name.as_str()).collect();
        let relevant = retrieved
            .iter()
            .filter(|name| {
                let lower = name.to_lowercase();
                expected.iter().any(|kw| lower.contains(&kw.to_lowercase()))
            })
            .count();
        let precision = if retrieved.is_empty() {
            0.0
        } else {
            relevant as f64 / retrieved.len() as f64
        };
        let recall = if expected.is_empty() {
            0.0
        } else {
            relevant as f64 / expected.len() as f64
        };
        println!("{query:<30} | {precision:<10.2} | {recall:<10.2}");
        total_precision += precision;
        total_recall += recall;
    }

    let n = scenarios.len().max(1) as f64;
    println!("{}", "-".repeat(56));
    println!(
        "{:<30} | {:<10.2} | {:<10.2}",
        "MEAN",
        total_precision / n,
        total_recall / n
    );
    Ok(())
}

#[derive(Serialize)]
struct DocTotal {
    doc: usize,
    #[serde(rename = "nama")]
    name: String,
    score: f64,
}

#[derive(Serialize)]
struct ScoreReport {
    query: Vec<String>,
    k1: f64,
    b: f64,
    avgdl: f64,
    rows: Vec<TermContribution>,
    totals: Vec<DocTotal>,
}

/// Full arithmetic behind one ranking: per doc x query term rows plus the
/// per-document totals in descending score order.
fn report(data: &str, query_text: &str, output: &str, language: Language) -> Result<()> {
    let records = load_records(data)?;
    let corpus: Vec<Vec<String>> = records.iter().map(|r| r.tokens.clone()).collect();
    let bm25 = Bm25::build(&corpus);
    let normalizer = language.normalizer();

    let query = normalizer.normalize(query_text);
    let rows = bm25.explain(&query);
    let scores = bm25.scores(&query);
    let mut totals: Vec<DocTotal> = scores
        .iter()
        .enumerate()
        .map(|(doc, &score)| DocTotal { doc, name: records[doc].name.clone(), score })
        .collect();
    totals.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let params = bm25.params();
    let report = ScoreReport {
        query,
        k1: params.k1,
        b: params.b,
        avgdl: bm25.avgdl(),
        rows,
        totals,
    };

    let file = File::create(output).with_context(|| format!("create report {output}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
    tracing::info!(output, "score report written");
    Ok(())
}
