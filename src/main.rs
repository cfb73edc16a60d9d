use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use blogsift::config::Config;
use blogsift::corpus::{tabular, Record};
use blogsift::notify::{Notifier, WebhookNotifier};
use blogsift::output::{files, terminal};
use blogsift::pipeline::{self, BatchOptions, FitSide, Progress};
use blogsift::store::local::read_records_file;
use blogsift::store::{prune_except, KeepLists, LocalStore, RecordStore, StoreKind};
use blogsift::text::{Normalizer, Stopwords};

/// Blogsift: find near-duplicate and unique articles in crawled blogs.
///
/// Compares extracted article corpora by the TF-IDF cosine similarity of
/// their titles and meta descriptions.
#[derive(Parser)]
#[command(name = "blogsift", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory layout
    Init,

    /// List reference articles with no close match among the candidates
    Unique {
        /// Reference corpus (a file in extracted/ or a path)
        reference: String,

        /// Candidate corpus (a file in extracted/ or a path)
        candidate: String,

        /// Which side the vector space is fitted on: candidate or reference
        #[arg(long, default_value = "candidate")]
        fit_on: FitSide,

        /// Save the unique set to unique/ as CSV and JSON
        #[arg(long)]
        save: bool,
    },

    /// List stored articles similar to a topic
    Similar {
        /// Corpus to search (a file in extracted/ or a path)
        corpus: String,

        /// Topic to search for
        topic: String,

        /// Deliver the matches to the webhook for this user
        #[arg(long)]
        notify: Option<String>,
    },

    /// Delete every stored file not in the keep lists
    Prune {
        /// Link files to keep
        #[arg(long, num_args = 0..)]
        links: Vec<String>,

        /// Extracted CSV files to keep
        #[arg(long, num_args = 0..)]
        csv: Vec<String>,

        /// Unique output files to keep
        #[arg(long, num_args = 0..)]
        unique: Vec<String>,
    },

    /// Show data directory contents and settings
    Status,

    /// Start the web API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 8080)
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind to (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blogsift=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let config = Config::load()?;
            info!(data_dir = %config.data_dir.display(), "Initializing data directory");
            let store = LocalStore::initialize(&config.data_dir)?;
            println!("Data directory ready at: {}", store.root().display());
            for kind in StoreKind::ALL {
                println!("  {}/", kind);
            }
            println!("\nPut extracted article CSVs in extracted/, then run:");
            println!("  blogsift unique <reference.csv> <candidate.csv>");
        }

        Commands::Unique {
            reference,
            candidate,
            fit_on,
            save,
        } => {
            let config = Config::load()?;
            let normalizer = load_normalizer(&config)?;

            let reference_records = load_corpus(&config, &reference).await?;
            let candidate_records = load_corpus(&config, &candidate).await?;
            println!(
                "Comparing {} reference articles against {} candidates...",
                reference_records.len(),
                candidate_records.len()
            );

            let options = BatchOptions {
                threshold: config.unique_threshold,
                fit_side: fit_on,
            };
            let result = run_with_bar("Scoring", move |progress| {
                pipeline::deduplicate(
                    &normalizer,
                    &reference_records,
                    &candidate_records,
                    &options,
                    progress,
                )
            })
            .await?;

            terminal::display_unique(&result);

            if save {
                let store = LocalStore::open(&config.data_dir)?;
                let names = files::save_unique(&store, &result).await?;
                println!("{} unique/{}", "Saved:".green(), names.csv);
                println!("{} unique/{}", "Saved:".green(), names.json);
            }
        }

        Commands::Similar {
            corpus,
            topic,
            notify,
        } => {
            let config = Config::load()?;
            let notifier = match &notify {
                Some(_) => Some(WebhookNotifier::new(
                    config.require_webhook()?,
                    config.webhook_retry,
                )?),
                None => None,
            };
            let normalizer = load_normalizer(&config)?;

            let candidate_records = load_corpus(&config, &corpus).await?;
            println!(
                "Searching {} articles for \"{}\"...",
                candidate_records.len(),
                topic
            );

            let options = BatchOptions {
                threshold: config.similar_threshold,
                ..BatchOptions::default()
            };
            let result = run_with_bar("Searching", move |progress| {
                pipeline::find_similar(&normalizer, &topic, &candidate_records, &options, progress)
            })
            .await?;

            terminal::display_similar(&result);

            if let (Some(user_id), Some(notifier)) = (notify, notifier) {
                let payload = tabular::to_json_array(&result.output_rows())?;
                notifier.notify_result(&user_id, &payload).await?;
                println!(
                    "{} {} matches sent to {}",
                    "Delivered:".green(),
                    result.len(),
                    notifier.url()
                );
            }
        }

        Commands::Prune { links, csv, unique } => {
            let config = Config::load()?;
            let store = LocalStore::open(&config.data_dir)?;
            let keep = KeepLists {
                link: links,
                csv,
                unique,
            };
            let removed = prune_except(&store, &keep).await?;
            terminal::display_pruned(&removed);
        }

        Commands::Status => {
            let config = Config::load()?;
            blogsift::status::show(&config).await?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            use blogsift::notify::NoopNotifier;
            use blogsift::web::{run_server, AppState};

            let config = Config::load()?;
            let store: Arc<dyn RecordStore> = Arc::new(LocalStore::open(&config.data_dir)?);
            let notifier: Arc<dyn Notifier> = match &config.webhook_url {
                Some(url) => Arc::new(WebhookNotifier::new(url.as_str(), config.webhook_retry)?),
                None => {
                    info!("WEBHOOK_URL not set, similarity results will only be logged");
                    Arc::new(NoopNotifier)
                }
            };
            let normalizer = Arc::new(load_normalizer(&config)?);

            let state = AppState::new(config, store, notifier, normalizer);
            run_server(state, port, &bind).await?;
        }
    }

    Ok(())
}

/// Build the normalizer from the configured stopword list.
fn load_normalizer(config: &Config) -> Result<Normalizer> {
    let stopwords = Stopwords::load(config.stopwords_path.as_deref())?;
    info!(stopwords = stopwords.len(), "Stopwords loaded");
    Ok(Normalizer::new(Arc::new(stopwords)))
}

/// Load a corpus argument: an existing path is read directly, anything else
/// names a file in the store's extracted/ folder.
async fn load_corpus(config: &Config, arg: &str) -> Result<Vec<Record>> {
    let path = Path::new(arg);
    if path.is_file() {
        return read_records_file(path).await;
    }
    let store = LocalStore::open(&config.data_dir)?;
    store
        .load_records(StoreKind::Extracted, arg)
        .await
        .with_context(|| format!("No corpus file at '{arg}' or in extracted/"))
}

/// Run a batch on the blocking pool, drawing a progress bar from its counters.
async fn run_with_bar<T, F>(label: &str, batch: F) -> Result<T>
where
    F: FnOnce(&Progress) -> T + Send + 'static,
    T: Send + 'static,
{
    let progress = Arc::new(Progress::new());
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!("  {label} [{{bar:30}}] {{pos}}/{{len}} ({{eta}})"))?,
    );

    let worker = Arc::clone(&progress);
    let mut handle = tokio::task::spawn_blocking(move || batch(&worker));
    let mut ticker = tokio::time::interval(Duration::from_millis(100));

    let result = loop {
        tokio::select! {
            joined = &mut handle => break joined.context("Batch worker panicked")?,
            _ = ticker.tick() => {
                let snapshot = progress.snapshot();
                pb.set_length(snapshot.total as u64);
                pb.set_position(snapshot.current as u64);
            }
        }
    };

    pb.finish_and_clear();
    Ok(result)
}
