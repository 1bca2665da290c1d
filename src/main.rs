//! pdfdom CLI
//!
//! Inspect saved document snapshots and try out paragraph layout.
//!
//! Usage:
//!   pdfdom elements snapshot.json            List every element
//!   pdfdom by-type snapshot.json PATH IMAGE  Elements of the given types
//!   pdfdom at snapshot.json 120 540          Elements containing a point
//!   pdfdom starts-with snapshot.json Invoice Text starting with a prefix
//!   pdfdom matching snapshot.json 'Total.*'  Paragraphs matching a pattern
//!   pdfdom form-fields snapshot.json         Form fields by kind
//!   pdfdom layout "Hello\nWorld" --x 72 --y 700

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdfdom::geometry::{Font, Position};
use pdfdom::selection::{collect_form_fields, FormScope};
use pdfdom::snapshot::{LocalSnapshotSource, SnapshotCache};
use pdfdom::text::ParagraphBuilder;
use pdfdom::{Config, DocumentSnapshot, ObjectType, SelectionIndex};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pdfdom", version, about = "PDF object model inspection tools")]
struct Cli {
    /// Override the selection tolerance
    #[arg(long, global = true)]
    epsilon: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SnapshotArgs {
    /// Document snapshot JSON file
    snapshot: PathBuf,

    /// Restrict to one page (zero based)
    #[arg(long)]
    page: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// List every typed element
    Elements {
        #[command(flatten)]
        source: SnapshotArgs,
    },
    /// List elements of the given concrete types
    ByType {
        #[command(flatten)]
        source: SnapshotArgs,
        #[arg(required = true)]
        types: Vec<String>,
    },
    /// List elements whose bounding box contains a point
    At {
        #[command(flatten)]
        source: SnapshotArgs,
        x: f64,
        y: f64,
    },
    /// List elements whose text starts with a prefix, ignoring case
    StartsWith {
        #[command(flatten)]
        source: SnapshotArgs,
        prefix: String,
    },
    /// List paragraphs (or text lines) whose whole text matches a pattern
    Matching {
        #[command(flatten)]
        source: SnapshotArgs,
        pattern: String,
        #[arg(long)]
        lines: bool,
    },
    /// List form fields stamped with their kind
    FormFields {
        #[command(flatten)]
        source: SnapshotArgs,
    },
    /// Lay out text into a paragraph and print it
    Layout {
        text: String,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        y: f64,
        #[arg(long, default_value_t = 0)]
        page_index: u32,
        #[arg(long)]
        font: Option<String>,
        #[arg(long, default_value_t = 12.0)]
        font_size: f64,
        /// Spacing factor; defaults to the configured value
        #[arg(long)]
        spacing: Option<f64>,
    },
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load(args: &SnapshotArgs) -> Result<DocumentSnapshot> {
    DocumentSnapshot::from_path(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot: {}", args.snapshot.display()))
}

/// Runs `query` against the whole document or the requested page
fn with_index<F>(args: &SnapshotArgs, epsilon: f64, query: F) -> Result<()>
where
    F: FnOnce(SelectionIndex<'_>) -> Result<()>,
{
    let document = load(args)?;
    match args.page {
        Some(page) => {
            let page_snapshot = document
                .page(page)
                .with_context(|| format!("Page {} not in snapshot", page))?;
            query(SelectionIndex::new(page_snapshot).with_epsilon(epsilon))
        }
        None => query(SelectionIndex::new(&document).with_epsilon(epsilon)),
    }
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let epsilon = cli.epsilon.unwrap_or(config.epsilon);

    match cli.command {
        Command::Elements { source } => with_index(&source, epsilon, |index| {
            print_json(&index.elements())
        }),
        Command::ByType { source, types } => {
            let types = types
                .iter()
                .map(|t| t.parse::<ObjectType>())
                .collect::<pdfdom::Result<Vec<_>>>()?;
            with_index(&source, epsilon, |index| {
                print_json(&index.elements_of_type(&types))
            })
        }
        Command::At { source, x, y } => with_index(&source, epsilon, |index| {
            print_json(&index.elements_at(x, y))
        }),
        Command::StartsWith { source, prefix } => with_index(&source, epsilon, |index| {
            print_json(&index.elements_starting_with(&prefix))
        }),
        Command::Matching {
            source,
            pattern,
            lines,
        } => with_index(&source, epsilon, |index| {
            let found = if lines {
                index.text_lines_matching(&pattern)?
            } else {
                index.paragraphs_matching(&pattern)?
            };
            let refs: Vec<pdfdom::ObjectRef> = found.into_iter().cloned().map(Into::into).collect();
            print_json(&refs)
        }),
        Command::FormFields { source } => {
            let cache = SnapshotCache::with_capacity(
                LocalSnapshotSource::new(load(&source)?),
                config.snapshot_cache_size,
            );
            let scope = match source.page {
                Some(page) => FormScope::Page(page as u32),
                None => FormScope::Document,
            };
            let fields: Vec<pdfdom::ObjectRef> = collect_form_fields(&cache, scope)?
                .into_iter()
                .map(Into::into)
                .collect();
            print_json(&fields)
        }
        Command::Layout {
            text,
            x,
            y,
            page_index,
            font,
            font_size,
            spacing,
        } => {
            let mut builder = ParagraphBuilder::with_default_spacing(config.line_spacing)
                .text(text.replace("\\n", "\n"))
                .at(Position::at_page_coordinates(page_index, x, y));
            if let Some(name) = font {
                builder = builder.font(Font::new(name, font_size));
            }
            if let Some(spacing) = spacing {
                builder = builder.line_spacing(spacing);
            }
            print_json(&builder.build())
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfdom=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    config.validate()?;

    run(Cli::parse(), config)
}
