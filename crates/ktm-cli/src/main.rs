//! KTM Admin CLI
//!
//! Thin wrapper around ktm-core for managing student card records from a
//! terminal.
//!
//! ## Usage
//!
//! ```bash
//! # List records, optionally filtered by name or NIM
//! ktm list --query ilham
//!
//! # Add a record with a photo
//! ktm add --nim 50421001 --name "Ilham Nur" \
//!     --faculty EKONOMI --major "S1 - MANAJEMEN" --photo face.jpg
//!
//! # Update a record (the stored photo is kept unless --photo is given)
//! ktm update 4 --nim 50421001 --name "Ilham Nur" \
//!     --faculty EKONOMI --major "S1 - AKUTANSI"
//!
//! # Delete, asking for confirmation
//! ktm delete 4
//!
//! # Export the card image
//! ktm export 4 --out ./cards
//!
//! # Faculty/major catalog
//! ktm faculties
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

use ktm_core::logging::LoggingBuilder;
use ktm_core::notice::MSG_EXPORT_FAILED;
use ktm_core::table::{self, Confirm, DeleteOutcome, EmptyState, RecordTable};
use ktm_core::{
    catalog, export_file_name, CardExporter, CardPreview, CardRenderer, ClientConfig,
    DirectorySink, HttpGateway, Notice, PhotoAttachment, RecordForm, StudentId,
};

/// KTM Admin - student identity card records
#[derive(Parser)]
#[command(name = "ktm")]
#[command(version = "0.1.0")]
#[command(about = "KTM Admin - student identity card records")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Gateway base address (default: http://localhost:8080)
    #[arg(long, global = true, env = "KTM_GATEWAY_URL")]
    gateway: Option<String>,

    /// Data directory for activity logs
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Request timeout in seconds (default: none)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records
    List {
        /// Case-insensitive filter on name or NIM
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Add a record
    Add(RecordArgs),

    /// Update an existing record
    Update {
        /// Record ID
        id: String,
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Delete a record
    Delete {
        /// Record ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export a record's card as a PNG
    Export {
        /// Record ID
        id: String,
        /// Output directory (default: downloads directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the faculty and major catalog
    Faculties,

    /// Print the export file name for a student name
    Filename {
        name: String,
    },
}

/// Record fields. Empty values are rejected by validation, not by clap.
#[derive(Args)]
struct RecordArgs {
    #[arg(long, default_value = "")]
    nim: String,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    faculty: String,
    #[arg(long, default_value = "")]
    major: String,
    /// Photo file to upload
    #[arg(long)]
    photo: Option<PathBuf>,
}

impl RecordArgs {
    async fn into_form(self) -> Result<RecordForm> {
        let mut form = RecordForm::new();
        form.set_nim(self.nim);
        form.set_name(self.name);
        form.set_faculty(self.faculty);
        form.set_major(self.major);
        if let Some(path) = self.photo {
            let photo = PhotoAttachment::read(&path)
                .await
                .with_context(|| format!("Failed to read photo {}", path.display()))?;
            form.attach_photo(photo);
        }
        Ok(form)
    }
}

/// Reads a yes/no answer from stdin.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let mut stdout = tokio::io::stdout();
        let _ = stdout.write_all(format!("{} [y/N] ", prompt).as_bytes()).await;
        let _ = stdout.flush().await;

        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        match lines.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "ya")
}

fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::default().with_request_timeout(cli.timeout.map(Duration::from_secs));
    if let Some(url) = &cli.gateway {
        config = config.with_gateway_url(url.clone());
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    config
}

fn print_table(view: &RecordTable) {
    if let Some(state) = view.empty_state() {
        println!("{}", state.message());
        return;
    }
    println!(
        "{:<6} {:<12} {:<28} {:<40} {}",
        "ID", "NIM", "NAMA", "FAKULTAS", "JURUSAN"
    );
    for record in view.visible() {
        println!(
            "{:<6} {:<12} {:<28} {:<40} {}",
            record.id, record.nim, record.name, record.faculty, record.major
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    LoggingBuilder::new("cli")
        .with_logs_dir(config.logs_dir())
        .with_filter(verbosity_filter(cli.verbose))
        .init();

    tracing::debug!(gateway = %config.gateway_url, "ktm starting");

    match cli.command {
        Commands::Faculties => {
            for faculty in catalog::faculties() {
                println!("{}", faculty);
                for major in catalog::majors_for(faculty) {
                    println!("  - {}", major);
                }
            }
        }

        Commands::Filename { name } => {
            println!("{}", export_file_name(&name));
        }

        Commands::List { query } => {
            let gateway = HttpGateway::new(&config)?;
            let mut view = RecordTable::new();
            view.replace(table::load_records(&gateway).await);
            view.set_query(query);
            print_table(&view);
        }

        Commands::Add(record) => {
            let gateway = HttpGateway::new(&config)?;
            let mut form = record.into_form().await?;
            match form.submit(&gateway).await {
                Ok(outcome) => {
                    println!("{}", Notice::submitted(&outcome).message);
                    if let ktm_core::SubmitOutcome::Created(ack) = outcome {
                        if let Some(id) = ack.id {
                            println!("  ID: {}", id);
                        }
                    }
                }
                Err(e) => bail!("{}", Notice::submit_failed(false, &e).message),
            }
        }

        Commands::Update { id, record } => {
            let gateway = HttpGateway::new(&config)?;
            let form = record.into_form().await?;
            let id = StudentId::new(id);
            match RecordForm::send(form.payload(), Some(id), &gateway).await {
                Ok(outcome) => println!("{}", Notice::submitted(&outcome).message),
                Err(e) => bail!("{}", Notice::submit_failed(true, &e).message),
            }
        }

        Commands::Delete { id, yes } => {
            let gateway = HttpGateway::new(&config)?;
            let id = StudentId::new(id);
            let result = if yes {
                table::delete_record(&gateway, &true, &id).await
            } else {
                table::delete_record(&gateway, &StdinConfirm, &id).await
            };
            match result {
                Ok(DeleteOutcome::Deleted) => println!("{}", Notice::deleted().message),
                Ok(DeleteOutcome::Declined) => println!("Dibatalkan."),
                Err(e) => bail!("{}", Notice::delete_failed(&e).message),
            }
        }

        Commands::Export { id, out } => {
            let gateway = HttpGateway::new(&config)?;
            let id = StudentId::new(id);

            let mut view = RecordTable::new();
            view.replace(table::load_records(&gateway).await);
            let Some(record) = view.find(&id).cloned() else {
                if view.empty_state() == Some(EmptyState::NoRecords) {
                    bail!("{}", EmptyState::NoRecords.message());
                }
                bail!("Student {} not found", id);
            };

            let exporter = CardExporter::new(Arc::new(CardRenderer::new()), config.settle_delay);
            let surface = Mutex::new(CardPreview::new());
            let sink = DirectorySink::new(out.unwrap_or_else(|| config.export_dir.clone()));

            match exporter.export(&gateway, &surface, &sink, &record).await {
                Ok(card) => println!(
                    "Saved {} ({}x{})",
                    card.path.display(),
                    card.width,
                    card.height
                ),
                Err(e) => {
                    tracing::error!(id = %record.id, "Card export failed: {}", e);
                    bail!("{}", MSG_EXPORT_FAILED)
                }
            }
        }
    }

    Ok(())
}
