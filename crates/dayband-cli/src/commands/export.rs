//! Export command: drive a full editing pipeline and write the CSV.

use clap::Args;
use std::path::PathBuf;

use dayband_core::{
    export_filename, AdjustmentMode, EditorEvent, EditorSession, EventStatus, MarkerKey,
};

use super::common;

#[derive(Args)]
pub struct ExportArgs {
    /// Bootstrap CSV of 96 `time,average` pairs
    #[arg(long)]
    pub input: PathBuf,
    /// Optional batch text file applied before exporting
    #[arg(long)]
    pub batch: Option<PathBuf>,
    /// Recompute the band globally with this multiplier
    #[arg(long)]
    pub multiplier: Option<f64>,
    /// Per-slot variance override, `SLOT=VARIANCE` (repeatable)
    #[arg(long = "set-variance", value_name = "SLOT=VARIANCE")]
    pub set_variance: Vec<String>,
    /// Period marker assignment, `KEY=SLOT` (repeatable)
    #[arg(long = "marker", value_name = "KEY=SLOT")]
    pub markers: Vec<String>,
    /// Output path (defaults to the session export filename in the
    /// current directory)
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Optional TOML session config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_variance_spec(spec: &str) -> Result<(usize, f64), String> {
    let (slot, variance) = spec
        .split_once('=')
        .ok_or_else(|| format!("invalid --set-variance '{spec}': expected SLOT=VARIANCE"))?;
    let slot = slot
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid slot in '{spec}'"))?;
    let variance = variance
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid variance in '{spec}'"))?;
    Ok((slot, variance))
}

fn parse_marker_spec(spec: &str) -> Result<(MarkerKey, usize), String> {
    let (key, slot) = spec
        .split_once('=')
        .ok_or_else(|| format!("invalid --marker '{spec}': expected KEY=SLOT"))?;
    let key =
        MarkerKey::parse(key.trim()).ok_or_else(|| format!("unknown marker key in '{spec}'"))?;
    let slot = slot
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid slot in '{spec}'"))?;
    Ok((key, slot))
}

fn apply_batch(session: &mut EditorSession, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let outcome = session.handle(EditorEvent::BatchApply { text });
    match outcome.status {
        EventStatus::BatchApplied { status } => {
            eprintln!("{}", status.message());
            Ok(())
        }
        other => Err(other.message().into()),
    }
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = common::load_session(&args.input, args.config.as_deref())?;

    if let Some(batch) = &args.batch {
        apply_batch(&mut session, batch)?;
    }

    if let Some(multiplier) = args.multiplier {
        session.handle(EditorEvent::ModeChanged {
            mode: AdjustmentMode::Global,
        });
        session.handle(EditorEvent::GlobalMultiplierChanged { multiplier });
        session.handle(EditorEvent::ModeChanged {
            mode: AdjustmentMode::Individual,
        });
    }

    for spec in &args.set_variance {
        let (slot, variance) = parse_variance_spec(spec)?;
        common::select_slot(&mut session, slot)?;
        let outcome = session.handle(EditorEvent::SliderChanged { variance });
        if !matches!(outcome.status, EventStatus::AdjustmentApplied { .. }) {
            return Err(outcome.status.message().into());
        }
    }

    for spec in &args.markers {
        let (key, slot) = parse_marker_spec(spec)?;
        common::select_slot(&mut session, slot)?;
        let outcome = session.handle(EditorEvent::MarkerAssigned { key });
        if !matches!(outcome.status, EventStatus::MarkerSet { .. }) {
            return Err(outcome.status.message().into());
        }
    }

    let outcome = session.handle(EditorEvent::ExportRequested);
    let table = outcome
        .export
        .ok_or("export event produced no table")?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(export_filename(&session.config().export_basename)));
    table.write_csv_file(&out)?;
    println!("Export written to {}", out.display());

    Ok(())
}
