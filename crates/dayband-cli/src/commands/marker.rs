//! Marker command: assign one of the six period markers.

use clap::Args;
use std::path::PathBuf;

use dayband_core::{EditorEvent, EventStatus, MarkerKey};

use super::common;

#[derive(Args)]
pub struct MarkerArgs {
    /// Bootstrap CSV of 96 `time,average` pairs
    #[arg(long)]
    pub input: PathBuf,
    /// Slot index whose time label is recorded (0-95)
    #[arg(long)]
    pub slot: usize,
    /// Marker key: start_A/start_B/start_C/end_A/end_B/end_C
    #[arg(long)]
    pub key: String,
    /// Optional TOML session config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: MarkerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let key = MarkerKey::parse(&args.key)
        .ok_or_else(|| format!("unknown marker key '{}'", args.key))?;

    let mut session = common::load_session(&args.input, args.config.as_deref())?;
    common::select_slot(&mut session, args.slot)?;

    let outcome = session.handle(EditorEvent::MarkerAssigned { key });
    match outcome.status {
        EventStatus::MarkerSet { key, time_label } => {
            println!("{key} set to {time_label}");
        }
        other => return Err(other.message().into()),
    }

    println!("\nPeriod markers:");
    for line in session.markers().summary_lines() {
        println!("  {line}");
    }

    Ok(())
}
