//! drive_embed CLI - Convert Google Drive sharing links to embeddable image URLs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use drive_embed::clipboard::SystemClipboard;
use drive_embed::input::{collect_input, read_stdin};
use drive_embed::logging::init_logging;
use drive_embed::models::history_header;
use drive_embed::preview::{self, PreviewCard};
use drive_embed::{
    AppState, AssetFetcher, Config, Event, HistoryStore, OutputFormat, Outcome, Variant,
};

/// Turn Google Drive sharing links into directly embeddable image URLs.
#[derive(Parser)]
#[command(name = "drive_embed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file.
    #[arg(long, env = "DRIVE_EMBED_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging on stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert sharing links (arguments, files, or stdin) to image URLs.
    Convert {
        /// Sharing URLs. Read from stdin when no URLs or files are given.
        urls: Vec<String>,

        /// Files with one URL per line (supports glob patterns like links/*.txt, l_{1,2}.txt).
        #[arg(long = "file", short = 'i')]
        files: Vec<String>,

        /// Output format: plain, markdown, html, json or csv.
        #[arg(long, short = 'f')]
        format: Option<OutputFormat>,

        /// Converted URL form: export-view or thumbnail.
        #[arg(long)]
        variant: Option<Variant>,

        /// Emit labeled Preview/Direct URL blocks.
        #[arg(long)]
        labeled: bool,

        /// Also copy the output to the clipboard.
        #[arg(long)]
        copy: bool,

        /// Also write the output to its export file in this directory.
        #[arg(long)]
        export: Option<PathBuf>,

        /// Do not record this conversion in the history.
        #[arg(long)]
        no_history: bool,
    },

    /// Show preview cards for converted (or sharing) URLs.
    Preview {
        /// URLs to preview. Read from stdin when empty.
        urls: Vec<String>,

        /// Fetch each image and report unavailable ones as placeholders.
        #[arg(long)]
        check: bool,
    },

    /// Convert sharing links and download the images.
    Download {
        /// Sharing URLs. Read from stdin when empty.
        urls: Vec<String>,

        /// Destination directory.
        #[arg(long, short = 't')]
        to: Option<PathBuf>,
    },

    /// Show or clear the conversion history.
    History {
        /// Remove all entries.
        #[arg(long)]
        clear: bool,

        /// Print entries as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration.
    Config {
        /// Write the default configuration file.
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().or_else(Config::default_path);
    let config = match &config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };
    let store = config.history_store();

    match cli.command {
        Commands::Convert {
            urls,
            files,
            format,
            variant,
            labeled,
            copy,
            export,
            no_history,
        } => {
            let raw = gather(&urls, &files)?;
            let mut state = load_state(store.as_ref());
            state.apply(Event::SetFormat(format.unwrap_or(config.default_format)))?;
            state.apply(Event::SetLabeled(labeled || config.labeled))?;
            state.apply(Event::SetVariant(variant.unwrap_or(config.variant)))?;
            state.apply(Event::SetInput(raw))?;

            let outcome = convert(&mut state)?;
            if outcome == Outcome::HistoryChanged && !no_history {
                persist(store.as_ref(), &state);
            }

            println!("{}", state.output);

            if let Some(dir) = export {
                let path = state
                    .export(&dir)
                    .with_context(|| format!("Failed to export to {:?}", dir))?;
                eprintln!("Saved to: {}", path.display());
            }

            if copy {
                let copied = SystemClipboard::new().and_then(|clipboard| {
                    state.copy_output(&mut clipboard.with_hold(config.clipboard_hold()))
                });
                match copied {
                    Ok(()) => eprintln!("Copied to clipboard."),
                    Err(e) => eprintln!("Warning: {}", e.user_message()),
                }
            }
        }

        Commands::Preview { urls, check } => {
            let raw = gather(&urls, &[])?;
            let lines: Vec<String> = drive_embed::convert::split_input(&raw)
                .into_iter()
                .map(str::to_string)
                .collect();

            let mut cards = preview::build_cards(&lines);
            if check {
                let fetcher = AssetFetcher::new(config.request_timeout())?;
                cards = preview::resolve(&fetcher, cards).await;
            }

            for card in cards {
                match card {
                    PreviewCard::Image { id, image_url } => {
                        println!("[image]\t{}\t{}", id, image_url)
                    }
                    PreviewCard::Placeholder { url, reason } => match reason {
                        Some(reason) => println!("[unavailable]\t{}\t{}", url, reason),
                        None => println!("[no preview]\t{}", url),
                    },
                }
            }
        }

        Commands::Download { urls, to } => {
            let raw = gather(&urls, &[])?;
            let mut state = load_state(store.as_ref());
            state.apply(Event::SetVariant(config.variant))?;
            state.apply(Event::SetInput(raw))?;
            if convert(&mut state)? == Outcome::HistoryChanged {
                persist(store.as_ref(), &state);
            }

            let dir = to
                .or_else(|| config.download_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {:?}", dir))?;

            let items: Vec<(String, String)> = state
                .converted
                .iter()
                .map(|link| (link.preview.clone(), link.id.to_string()))
                .collect();

            println!("Downloading {} image(s) to {}...", items.len(), dir.display());

            let fetcher = AssetFetcher::new(config.request_timeout())?
                .with_concurrency(config.max_concurrent_downloads);
            let results = fetcher.download_all(&items, &dir).await;

            let mut failed = 0;
            for (idx, result) in results.iter().enumerate() {
                print!("[{}/{}] ", idx + 1, results.len());
                match result {
                    Ok(asset) => println!("OK {}", asset),
                    Err(e) => {
                        failed += 1;
                        println!("FAILED");
                        eprintln!("  Error: {}", e);
                    }
                }
            }

            println!("Done. {} saved, {} failed.", results.len() - failed, failed);
        }

        Commands::History { clear, json } => {
            let store = store.context("No data directory available for history")?;
            let mut state = load_state(Some(&store));

            if clear {
                state.apply(Event::ClearHistory)?;
                store.save(&state.history).context("Failed to save history")?;
                println!("History cleared.");
            } else if json {
                println!("{}", serde_json::to_string_pretty(&state.history)?);
            } else if state.history.is_empty() {
                println!("No history yet.");
            } else {
                println!("{}", history_header());
                println!("{}", "-".repeat(120));
                for entry in state.history.entries() {
                    println!("{}", entry);
                }
            }
        }

        Commands::Config { init } => {
            let path = config_path.context("No config directory available")?;
            if init {
                config
                    .save(&path)
                    .with_context(|| format!("Failed to write config to {:?}", path))?;
            }
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// URLs from arguments and files, or stdin when neither is given.
fn gather(urls: &[String], files: &[String]) -> Result<String> {
    if urls.is_empty() && files.is_empty() {
        return read_stdin().context("Failed to read stdin");
    }
    collect_input(urls, files).context("Failed to read input files")
}

fn load_state(store: Option<&HistoryStore>) -> AppState {
    let history = match store.map(|s| s.load()) {
        Some(Ok(history)) => history,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "ignoring unreadable history");
            Default::default()
        }
        None => Default::default(),
    };
    AppState::new(history)
}

fn convert(state: &mut AppState) -> Result<Outcome> {
    state.apply(Event::Convert).map_err(|e| {
        let message = e.user_message();
        anyhow::Error::new(e).context(message)
    })
}

fn persist(store: Option<&HistoryStore>, state: &AppState) {
    if let Some(store) = store {
        if let Err(e) = store.save(&state.history) {
            tracing::warn!(path = %store.path().display(), error = %e, "failed to save history");
        }
    }
}
