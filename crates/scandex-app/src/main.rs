// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scandex — ID document capture and record keeping.
//
// Entry point. Initialises logging and the service layer, then runs one
// command: scan a document (front and back image), browse or prune the
// record history, or export everything to a spreadsheet.

mod services;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scandex_core::error::{Result, ScandexError};
use scandex_core::human_errors::humanize_error;
use scandex_core::types::{CapturedImage, IdRecord, RecordId};

use services::app_services::AppServices;

#[derive(Debug, Parser)]
#[command(name = "scandex", version, about = "ID document capture and record keeping")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Capture one document from a front and a back image and save the
    /// reviewed record.
    Scan {
        /// Image of the front side.
        #[arg(long)]
        front: PathBuf,
        /// Image of the back side.
        #[arg(long)]
        back: PathBuf,
        /// Free-form note attached to the record.
        #[arg(long)]
        note: Option<String>,
    },
    /// List all saved records, most recent first.
    List,
    /// Show one record.
    Show { id: i64 },
    /// Delete one record.
    Delete { id: i64 },
    /// Export all records to a spreadsheet and offer it for sharing.
    Export {
        /// Target directory; defaults to the app's exports directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        let human = humanize_error(&err);
        eprintln!("{} {}", human.message, human.suggestion);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let svc = AppServices::init()?;

    match cli.command {
        Command::Scan { front, back, note } => {
            let front = image_from_path(&front)?;
            let back = image_from_path(&back)?;

            let mut draft = svc.scan_document(front, back).await?;
            draft.additional_info = note;

            println!("Review the extracted record:");
            print_record(&draft);

            let id = svc.save_record(&draft).await?;
            println!("Saved as record {id}.");
        }

        Command::List => {
            let records = svc.store().list().await?;
            if records.is_empty() {
                println!("No records yet.");
            }
            for record in records {
                let id = record.id.map_or_else(|| "-".into(), |i| i.to_string());
                println!(
                    "{id:>6}  {:<24} {:<14} {}",
                    record.name,
                    record.id_number,
                    record.scan_date.format("%Y-%m-%d %H:%M")
                );
            }
        }

        Command::Show { id } => {
            let record = svc.store().get_by_id(RecordId(id)).await?;
            print_record(&record);
        }

        Command::Delete { id } => {
            svc.store().delete_by_id(RecordId(id)).await?;
            println!("Record {id} deleted.");
        }

        Command::Export { out } => {
            let out_dir = out.unwrap_or_else(|| svc.export_dir());
            let outcome = svc.export_all(&out_dir).await?;
            if outcome.shared {
                println!("Exported and shared {}.", outcome.file_name);
            } else {
                println!(
                    "Exported {}. Sharing is unavailable here; the file is at {}.",
                    outcome.file_name,
                    outcome.path.display()
                );
            }
        }
    }

    Ok(())
}

/// Treat a local image file as a library-sourced capture.
fn image_from_path(path: &PathBuf) -> Result<CapturedImage> {
    if !path.exists() {
        return Err(ScandexError::Validation(format!(
            "image not found: {}",
            path.display()
        )));
    }
    Ok(CapturedImage::from_library(path.to_string_lossy()))
}

fn print_record(record: &IdRecord) {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    println!("  Name:            {}", record.name);
    println!("  Date of Birth:   {}", record.date_of_birth);
    println!("  ID Number:       {}", record.id_number);
    println!("  Address:         {}", record.address);
    println!("  Issue Date:      {}", opt(&record.issue_date));
    println!("  Expiry Date:     {}", opt(&record.expiry_date));
    println!("  Scan Date:       {}", record.scan_date.to_rfc3339());
    println!("  Additional Info: {}", opt(&record.additional_info));
}
