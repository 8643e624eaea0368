//! Batch command: apply free-form numeric text to the average column.

use clap::Args;
use std::io::Read;
use std::path::PathBuf;

use dayband_core::{format_as_text, EditorEvent, EventStatus};

use super::common;

#[derive(Args)]
pub struct BatchArgs {
    /// Bootstrap CSV of 96 `time,average` pairs
    #[arg(long)]
    pub input: PathBuf,
    /// File with the batch text; `-` reads stdin
    #[arg(long)]
    pub text: PathBuf,
    /// Optional TOML session config
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print the resulting session state as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = common::load_session(&args.input, args.config.as_deref())?;

    let text = if args.text.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&args.text)?
    };

    let outcome = session.handle(EditorEvent::BatchApply { text });
    match outcome.status {
        EventStatus::BatchApplied { status } => {
            eprintln!("{}", status.message());
        }
        EventStatus::BatchRejected { status } => {
            return Err(status.message().into());
        }
        other => return Err(other.message().into()),
    }

    if args.json {
        println!("{}", session.state_json()?);
    } else {
        let snapshot = session.dataset().snapshot();
        println!("{}", format_as_text(&snapshot.averages));
    }

    Ok(())
}
