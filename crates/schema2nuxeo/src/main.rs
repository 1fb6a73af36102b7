use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use schema2nuxeo::extraction::vocabulary_loader::{self, ALL_JSON_URL};
use schema2nuxeo::generator::{self, DEFAULT_ROOT_TYPE};
use schema2nuxeo::model::context::GenerationContext;

/// Generate Nuxeo XSD schemas and contributions from the schema.org vocabulary.
#[derive(Parser)]
#[command(name = "schema2nuxeo", version, about)]
struct Cli {
    /// Root type of the generated subtree.
    #[arg(default_value = DEFAULT_ROOT_TYPE)]
    root_type: String,

    /// Vocabulary location: an http(s) URL or a local JSON file.
    #[arg(short, long, value_name = "URL|FILE", default_value = ALL_JSON_URL)]
    source: String,

    /// Output directory. Replaced on every successful run.
    #[arg(short, long, value_name = "DIR", default_value = "tmp")]
    output: PathBuf,

    /// Directory holding icon_mappings.txt, valid_multiples.txt and skip_fields.txt.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    config_dir: PathBuf,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let context = GenerationContext::load(&cli.config_dir)?;
    let vocabulary = vocabulary_loader::load(&cli.source)?;

    let summary = generator::generate(&vocabulary, &context, &cli.root_type, &cli.output)?;

    if !cli.quiet {
        eprintln!(
            "Generated {} schemas ({} UI types) under {} into {}",
            summary.types.len(),
            summary.ui_types.len(),
            cli.root_type,
            cli.output.display()
        );
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
