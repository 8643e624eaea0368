//! Editor events and outcomes.
//!
//! Every user-originated action enters the core as one [`EditorEvent`]
//! and is handled as a single transaction by
//! [`EditorSession::handle`](crate::session::EditorSession::handle).
//! The GUI shell serializes events as tagged JSON.

use serde::{Deserialize, Serialize};

use crate::export::ExportTable;
use crate::marker::MarkerKey;
use crate::parse::ParseStatus;
use crate::record::ChartSnapshot;
use crate::select::{AdjustmentMode, NoopReason, SelectedPoint};

/// Keyboard keys the core reacts to. Anything else never reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
}

impl KeyCode {
    /// Parse the DOM key name emitted by the view collaborator.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(KeyCode::ArrowUp),
            "ArrowDown" => Some(KeyCode::ArrowDown),
            _ => None,
        }
    }
}

/// A discrete user action against the editing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EditorEvent {
    /// Apply free-form batch text to the average column.
    BatchApply { text: String },
    /// The global variance multiplier slider moved.
    GlobalMultiplierChanged { multiplier: f64 },
    /// The adjustment-mode radio switched.
    ModeChanged { mode: AdjustmentMode },
    /// A point was clicked in either chart view.
    PointClicked { point: SelectedPoint },
    /// The per-slot variance slider moved.
    SliderChanged { variance: f64 },
    /// A key was pressed while a point is selected.
    KeyPressed { key: KeyCode },
    /// One of the six period-marker buttons was pressed.
    MarkerAssigned { key: MarkerKey },
    /// Explicit selection reset.
    ClearSelection,
    /// Build the export table for download.
    ExportRequested,
}

/// What a handled event did, for status display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventStatus {
    /// Batch text was applied and the band recomputed.
    BatchApplied { status: ParseStatus },
    /// Batch text yielded nothing usable; dataset unchanged.
    BatchRejected { status: ParseStatus },
    /// Global recompute ran with the given multiplier.
    BandRecomputed { multiplier: f64 },
    /// Multiplier recorded but not applied (mode is Individual).
    MultiplierStored { multiplier: f64 },
    ModeSet { mode: AdjustmentMode },
    PointSelected { index: usize },
    SelectionCleared,
    /// A single-slot variance edit landed.
    AdjustmentApplied { index: usize, variance: f64 },
    /// The event was a silent no-op.
    Ignored { reason: NoopReason },
    MarkerSet { key: MarkerKey, time_label: String },
    ExportReady { filename: String },
}

impl EventStatus {
    /// User-visible status line.
    pub fn message(&self) -> String {
        match self {
            EventStatus::BatchApplied { status } | EventStatus::BatchRejected { status } => {
                status.message()
            }
            EventStatus::BandRecomputed { multiplier } => {
                format!("Band recomputed (multiplier {multiplier})")
            }
            EventStatus::MultiplierStored { multiplier } => {
                format!("Multiplier set to {multiplier}")
            }
            EventStatus::ModeSet { mode } => format!("Adjustment mode: {mode:?}"),
            EventStatus::PointSelected { index } => format!("Selected slot {index}"),
            EventStatus::SelectionCleared => "Selection cleared".to_string(),
            EventStatus::AdjustmentApplied { index, variance } => {
                format!("Slot {index} variance set to {variance:.3}")
            }
            EventStatus::Ignored { reason } => format!("Ignored: {reason}"),
            EventStatus::MarkerSet { key, time_label } => {
                format!("{key} set to {time_label}")
            }
            EventStatus::ExportReady { filename } => format!("Export ready: {filename}"),
        }
    }
}

/// Result of one handled event. `chart` is present whenever the
/// dataset changed; `export` only for [`EditorEvent::ExportRequested`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOutcome {
    pub status: EventStatus,
    pub chart: Option<ChartSnapshot>,
    pub export: Option<ExportTable>,
}

impl EventOutcome {
    pub(crate) fn status_only(status: EventStatus) -> Self {
        Self {
            status,
            chart: None,
            export: None,
        }
    }

    pub(crate) fn with_chart(status: EventStatus, chart: ChartSnapshot) -> Self {
        Self {
            status,
            chart: Some(chart),
            export: None,
        }
    }
}
