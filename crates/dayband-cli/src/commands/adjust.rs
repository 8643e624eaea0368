//! Adjust command: per-slot variance edits.

use clap::Args;
use std::path::PathBuf;

use dayband_core::{EditorEvent, EventStatus, KeyCode, ScheduleRecord};

use super::common;

#[derive(Args)]
pub struct AdjustArgs {
    /// Bootstrap CSV of 96 `time,average` pairs
    #[arg(long)]
    pub input: PathBuf,
    /// Slot index to adjust (0-95)
    #[arg(long)]
    pub slot: usize,
    /// Set the variance to an absolute value in [0, 1]
    #[arg(long)]
    pub set: Option<f64>,
    /// Number of ArrowUp steps to apply after any absolute set
    #[arg(long, default_value_t = 0)]
    pub up: u32,
    /// Number of ArrowDown steps to apply after any absolute set
    #[arg(long, default_value_t = 0)]
    pub down: u32,
    /// Optional TOML session config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn print_record(prefix: &str, record: &ScheduleRecord) {
    println!(
        "{prefix} {} average={:.3} variance={:.3} band=[{:.3}, {:.3}]",
        record.time_label, record.average, record.variance, record.lower_bound, record.upper_bound
    );
}

pub fn run(args: AdjustArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.set.is_none() && args.up == 0 && args.down == 0 {
        return Err("nothing to do: pass --set, --up or --down".into());
    }

    let mut session = common::load_session(&args.input, args.config.as_deref())?;
    common::select_slot(&mut session, args.slot)?;

    if let Some(record) = session.dataset().get(args.slot) {
        print_record("before:", record);
    }

    if let Some(variance) = args.set {
        let outcome = session.handle(EditorEvent::SliderChanged { variance });
        if !matches!(outcome.status, EventStatus::AdjustmentApplied { .. }) {
            return Err(outcome.status.message().into());
        }
    }
    for _ in 0..args.up {
        session.handle(EditorEvent::KeyPressed { key: KeyCode::ArrowUp });
    }
    for _ in 0..args.down {
        session.handle(EditorEvent::KeyPressed { key: KeyCode::ArrowDown });
    }

    if let Some(record) = session.dataset().get(args.slot) {
        print_record("after: ", record);
    }

    Ok(())
}
