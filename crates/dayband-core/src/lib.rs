//! # Dayband Core Library
//!
//! Core editing logic for a 96-slot daily activity curve ("schedule
//! curve"): batch numeric input, variance-band derivation, per-slot
//! adjustment, period markers, and CSV export. The CLI binary drives
//! this library directly; a chart GUI is a thin shell that renders
//! [`ChartSnapshot`]s and feeds point-click and keyboard events back
//! as [`EditorEvent`]s.
//!
//! ## Key Components
//!
//! - [`EditorSession`]: owns all session state; one atomic
//!   transaction per handled event
//! - [`Dataset`]: the fixed 96-record store with the band invariant
//! - [`parse_batch`]: free-form text normalization to 96 values
//! - [`ExportTable`]: the 9-column tabular output with embedded
//!   period markers

pub mod band;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod grid;
pub mod marker;
pub mod parse;
pub mod record;
pub mod select;
pub mod session;

pub use band::{recompute_global, recompute_one};
pub use config::SessionConfig;
pub use error::{ConfigError, CoreError, ExportError, Result, ValidationError};
pub use events::{EditorEvent, EventOutcome, EventStatus, KeyCode};
pub use export::{
    export_filename, load_average_pairs, load_average_pairs_file, ExportTable, EXPORT_BASENAME,
};
pub use grid::{slot_label, slot_labels, SLOT_COUNT};
pub use marker::{MarkerKey, PeriodMarkers};
pub use parse::{format_as_text, parse_batch, ParseStatus};
pub use record::{ChartSnapshot, Dataset, ScheduleRecord};
pub use select::{AdjustmentController, AdjustmentMode, NoopReason, SelectedPoint, Selection};
pub use session::{EditorSession, SessionState};
