use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::anyhow;
use clap::{Parser, Subcommand, ValueEnum};
use lsp_types::Position;
use tracing_subscriber::EnvFilter;

use strudel_index::{config::Config, format, lsp, model, KnowledgeBase};

#[derive(Parser, Debug)]
#[command(
    name = "strudel-index",
    version,
    about = "Completion and hover assistance for Strudel live-coding patterns",
    long_about = "Builds a function catalog from the doc comments in the Strudel sources \
        and answers completion and hover queries against it and the mini-notation \
        vocabulary.\n\n\
        Examples:\n  \
        strudel-index build ./packages/core -o data/strudel-api.json\n  \
        strudel-index complete pattern.js --line 0 --character 12\n  \
        strudel-index hover pattern.js --line 2 --character 5 --format markdown\n  \
        strudel-index describe lpf\n  \
        strudel-index list --category effect"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "json",
        help = "Output format",
        long_help = "Output format.\n  json     : JSON (default, best for programmatic use)\n  markdown : Human-readable markdown"
    )]
    format: OutputFormat,

    #[arg(
        long,
        global = true,
        help = "Config file (TOML); defaults to $STRUDEL_INDEX_CONFIG"
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Json,
    Markdown,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the function catalog from documented source files
    #[command(long_about = "Build the function catalog from documented source files.\n\n\
        Scans the files directly inside SOURCE_DIR (not subdirectories) for\n\
        /** ... */ blocks with an @name tag. The first definition of a name\n\
        wins; @synonyms add aliases.\n\n\
        Examples:\n  \
        strudel-index build ./packages/core\n  \
        strudel-index build ./src -o api.json --ext mjs --ext js")]
    Build {
        /// Directory holding the documented sources
        source_dir: PathBuf,

        #[arg(long, short, help = "Output path (defaults to the configured catalog)")]
        output: Option<PathBuf>,

        #[arg(long = "ext", help = "File extension to scan (repeatable)")]
        extensions: Vec<String>,
    },

    /// Completion candidates at a position
    Complete {
        /// Document path, or - for stdin
        file: PathBuf,

        #[arg(long, help = "Zero-based line")]
        line: u32,

        #[arg(long, help = "Zero-based character within the line")]
        character: u32,
    },

    /// Hover documentation at a position (exit code 0 = found, 1 = nothing)
    Hover {
        /// Document path, or - for stdin
        file: PathBuf,

        #[arg(long, help = "Zero-based line")]
        line: u32,

        #[arg(long, help = "Zero-based character within the line")]
        character: u32,
    },

    /// Show one catalog entry (exit code 0 = found, 1 = unknown)
    Describe {
        /// Function name, matched exactly
        name: String,
    },

    /// List catalog entries
    List {
        #[arg(long, short, help = "Only names starting with this (case-insensitive)")]
        prefix: Option<String>,

        #[arg(long, short, help = "Only this category: core, effect, pattern, synth")]
        category: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Build {
            source_dir,
            output,
            extensions,
        } => {
            let output = output.unwrap_or_else(|| config.catalog.clone());
            let extensions = if extensions.is_empty() {
                config.source_extensions.clone()
            } else {
                extensions
            };
            let summary = strudel_index::build_knowledge_base(&source_dir, &output, &extensions)?;
            print_output(&cli.format, &summary, format::build)?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Complete {
            file,
            line,
            character,
        } => {
            let kb = KnowledgeBase::load(&config)?;
            let text = strudel_index::read_document(&file)?;
            let items = lsp::complete(&text, Position { line, character }, &kb);
            print_output(&cli.format, &items, |items| format::completions(items))?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Hover {
            file,
            line,
            character,
        } => {
            let kb = KnowledgeBase::load(&config)?;
            let text = strudel_index::read_document(&file)?;
            match lsp::hover(&text, Position { line, character }, &kb) {
                Some(hover) => {
                    print_output(&cli.format, &hover, format::hover)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => Ok(ExitCode::from(1)),
            }
        }

        Command::Describe { name } => {
            let kb = KnowledgeBase::load(&config)?;
            match strudel_index::describe(&kb, &name) {
                Some(function) => {
                    print_output(&cli.format, function, format::descriptor)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("Unknown function: {name}");
                    Ok(ExitCode::from(1))
                }
            }
        }

        Command::List { prefix, category } => {
            let category = category
                .map(|c| {
                    c.parse::<model::Category>()
                        .map_err(|_| anyhow!("Unknown category: {c}"))
                })
                .transpose()?;
            let kb = KnowledgeBase::load(&config)?;
            let entries = strudel_index::list_functions(&kb, prefix.as_deref(), category);
            print_output(&cli.format, &entries, |entries| format::list(entries))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Print output in the requested format
fn print_output<T: serde::Serialize + ?Sized>(
    fmt: &OutputFormat,
    value: &T,
    markdown_fn: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match fmt {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Markdown => {
            print!("{}", markdown_fn(value));
        }
    }
    Ok(())
}
