//! Show command: render the curve and band in the terminal.

use clap::Args;
use std::path::PathBuf;

use dayband_core::{AdjustmentMode, EditorEvent};

use super::common;

#[derive(Args)]
pub struct ShowArgs {
    /// Bootstrap CSV of 96 `time,average` pairs
    #[arg(long)]
    pub input: PathBuf,
    /// Optional TOML session config
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Recompute the band globally with this multiplier before rendering
    #[arg(long)]
    pub multiplier: Option<f64>,
    /// Print the full session state as JSON instead of the chart
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = common::load_session(&args.input, args.config.as_deref())?;

    if let Some(multiplier) = args.multiplier {
        session.handle(EditorEvent::ModeChanged {
            mode: AdjustmentMode::Global,
        });
        session.handle(EditorEvent::GlobalMultiplierChanged { multiplier });
    }

    if args.json {
        println!("{}", session.state_json()?);
        return Ok(());
    }

    println!("{}", session.dataset().render_ascii_chart());

    let records = session.dataset().records();
    let mean: f64 = records.iter().map(|r| r.average).sum::<f64>() / records.len() as f64;
    let peak = records
        .iter()
        .max_by(|a, b| a.average.total_cmp(&b.average));

    println!("Summary:");
    println!("  Slots: {}", records.len());
    println!("  Mean average: {mean:.3}");
    if let Some(peak) = peak {
        println!("  Peak: {:.3} at {}", peak.average, peak.time_label);
    }
    println!("  Variance multiplier: {}", session.multiplier());

    Ok(())
}
