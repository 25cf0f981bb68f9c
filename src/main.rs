// src/main.rs
use std::path::PathBuf;

use clap::Parser;
use precinct_extractor::document::schema;
use precinct_extractor::storage::{self, StorageManager};
use precinct_extractor::utils::{self, show::ShowContext};
use precinct_extractor::{AppError, PrecinctExtractor, PrecinctSelection};

/// Extract valid single precinct EDFs from a multi-precinct EDF.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// EDF file to select precincts from
    input_file: PathBuf,

    /// Position of the precinct's ballot style (optional, default: every precinct)
    #[arg(short, long)]
    precinct: Option<usize>,

    /// Position of the election in the document
    #[arg(short, long, default_value_t = 0)]
    election: usize,

    /// Output directory for extracted precincts
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Namespace prefix of '@type' tags (default: $EDF_NAMESPACE or ElectionResults)
    #[arg(long)]
    namespace: Option<String>,

    /// Replace files left by an earlier run
    #[arg(long)]
    overwrite: bool,

    /// Contexts to show debugging output in (repeatable)
    #[arg(long, value_enum)]
    show: Vec<ShowContext>,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    if !args.input_file.is_file() {
        return Err(AppError::Config(format!("Not a file: {}", args.input_file.display())));
    }

    // Namespace from command line, then environment, then the EDF default
    let namespace = match args.namespace.clone() {
        Some(namespace) => namespace,
        None => match std::env::var("EDF_NAMESPACE") {
            Ok(namespace) if !namespace.is_empty() => {
                tracing::debug!("Using EDF_NAMESPACE from environment: {}", namespace);
                namespace
            }
            _ => schema::DEFAULT_NAMESPACE.to_string(),
        },
    };

    // 3. Load the document
    let document = storage::load_document(&args.input_file)?;
    let stdout = std::io::stdout();
    if args.show.contains(&ShowContext::Document) {
        utils::show::show_document(&document, &mut stdout.lock())?;
    }

    // 4. Initialize storage and extractor
    let storage = StorageManager::new(&args.output_dir)?.with_overwrite(args.overwrite);
    let extractor = PrecinctExtractor::new(namespace.as_str());
    let source_stem = args
        .input_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "precinct".to_string());

    let precincts: Vec<usize> = match args.precinct {
        Some(precinct) => vec![precinct],
        None => (0..extractor.precinct_count(&document, args.election)?).collect(),
    };
    tracing::info!("Extracting {} precinct(s) from {}", precincts.len(), args.input_file.display());

    if precincts.is_empty() {
        return Err(AppError::Config(format!(
            "Election {} has no ballot styles to extract",
            args.election
        )));
    }

    // 5. Process each precinct
    let mut success_count = 0;
    let mut failure_count = 0;

    for precinct in precincts {
        if args.show.contains(&ShowContext::Selection) {
            let shown = PrecinctSelection::new(&document, &namespace, precinct, args.election)
                .map_err(AppError::from)
                .and_then(|selection| utils::show::show_selection(&selection, &mut stdout.lock()));
            if let Err(e) = shown {
                tracing::warn!("Failed to show selection for precinct {}: {}", precinct, e);
            }
        }

        match extractor.extract_precinct(&document, precinct, args.election) {
            Ok(extracted) => {
                let saved = storage
                    .save_precinct(&extracted, &source_stem)
                    .and_then(|path| {
                        storage.save_precinct_metadata(&extracted, &source_stem)?;
                        Ok(path)
                    });
                match saved {
                    Ok(path) => {
                        tracing::info!("Saved precinct {} to: {}", precinct, path.display());
                        success_count += 1;
                    }
                    Err(e) => {
                        tracing::error!("Failed to save precinct {}: {}", precinct, e);
                        failure_count += 1;
                    }
                }
            }
            Err(e) => {
                tracing::error!("Failed to extract precinct {}: {}", precinct, e);
                failure_count += 1;
            }
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 {
        return Err(AppError::Processing(format!(
            "Failed to extract any of {} precincts",
            failure_count
        )));
    }

    Ok(())
}
