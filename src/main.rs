mod commands;
mod diagnostics;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "BIBLEREF_LOG";

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "bibleref", version, about = "Resolve, autocomplete and search scripture references", long_about = None)]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
    /// JSON document to read (overrides `document` in .bibleref.toml)
    #[arg(long, global = true)]
    document: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the document's books with ids and abbreviations
    Books,
    /// Replay keystroke snapshots through one autocomplete session
    Complete {
        /// Successive contents of the input field, e.g. `G Gen "Genesis 1"`
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Print the verses of a reference, e.g. `Genesis 1:1-3` or `1.1.1-3`
    Get {
        /// Display string or canonical id.
        reference: String,
        /// Suffix each reference with the document's short name, e.g. `Genesis 1:1 KJV`
        #[arg(long)]
        with_version: bool,
    },
    /// Print the canonical id and display string of a reference
    Id {
        /// Display string or canonical id.
        reference: String,
        /// Suffix the display string with the document's short name
        #[arg(long)]
        with_version: bool,
    },
    /// Describe the document: name, short name, metadata, testaments
    Info,
    /// Print the chapter after a reference's chapter
    Next {
        /// Display string or canonical id with at least a chapter.
        reference: String,
    },
    /// Print the chapter before a reference's chapter
    Prev {
        /// Display string or canonical id with at least a chapter.
        reference: String,
    },
    /// Print a verse picked at random
    Random {
        /// Suffix the reference with the document's short name
        #[arg(long)]
        with_version: bool,
    },
    /// Search verse text
    Search {
        /// Restrict the search to one book (name, id or number)
        #[arg(long)]
        book: Option<String>,
        /// Maximum results (overrides `search_limit` in .bibleref.toml)
        #[arg(long)]
        limit: Option<usize>,
        /// Words or phrase to look for.
        query: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = commands::Context::load(cli.document.as_deref(), cli.json).and_then(|context| {
        return match &cli.command {
            Commands::Books => commands::books(&context),
            Commands::Complete { inputs } => commands::complete(&context, inputs),
            Commands::Get { reference, with_version } => commands::get(&context, reference, *with_version),
            Commands::Id { reference, with_version } => commands::id(&context, reference, *with_version),
            Commands::Info => commands::info(&context),
            Commands::Next { reference } => commands::close(&context, reference, true),
            Commands::Prev { reference } => commands::close(&context, reference, false),
            Commands::Random { with_version } => commands::random(&context, *with_version),
            Commands::Search { book, limit, query } => commands::search(&context, query, *limit, book.as_deref()),
        };
    });

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(2)
        },
    };
}

/// Install the stderr subscriber. `-v` wins over `BIBLEREF_LOG`; the default is `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| return EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
