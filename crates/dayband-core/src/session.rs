//! The editing session.
//!
//! [`EditorSession`] owns the dataset, selection, markers, mode and
//! multiplier, and handles each [`EditorEvent`] as one atomic
//! transaction: an event either fully applies (all derived fields it
//! touches updated) or leaves the prior state entirely untouched.
//! Events are processed strictly in arrival order; there is no
//! background computation, so the most recent event wins.

use serde::Serialize;

use crate::band::recompute_global;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::events::{EditorEvent, EventOutcome, EventStatus, KeyCode};
use crate::export::{export_filename, ExportTable};
use crate::marker::{MarkerKey, PeriodMarkers};
use crate::parse::parse_batch;
use crate::record::{ChartSnapshot, Dataset, ScheduleRecord};
use crate::select::{
    AdjustOutcome, AdjustmentController, AdjustmentMode, NoopReason, SelectedPoint, Selection,
};

/// Owns all session state and dispatches editor events.
#[derive(Debug, Clone)]
pub struct EditorSession {
    dataset: Dataset,
    selection: Selection,
    markers: PeriodMarkers,
    controller: AdjustmentController,
    multiplier: f64,
    config: SessionConfig,
}

/// Serializable snapshot of the whole session, for GUI polling.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub chart: ChartSnapshot,
    pub selection: Selection,
    pub markers: PeriodMarkers,
    pub mode: AdjustmentMode,
    pub multiplier: f64,
}

impl EditorSession {
    /// Start a session over a bootstrapped dataset with default
    /// configuration. The band is derived immediately.
    pub fn new(dataset: Dataset) -> Self {
        Self::with_config(dataset, SessionConfig::default())
    }

    /// Start a session with explicit configuration.
    pub fn with_config(mut dataset: Dataset, config: SessionConfig) -> Self {
        let multiplier = config.variance_multiplier;
        recompute_global(&mut dataset, multiplier);
        Self {
            dataset,
            selection: Selection::new(),
            markers: PeriodMarkers::new(),
            controller: AdjustmentController::with_step(config.variance_step),
            multiplier,
            config,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn markers(&self) -> &PeriodMarkers {
        &self.markers
    }

    pub fn mode(&self) -> AdjustmentMode {
        self.controller.mode
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The selected point together with its current record, for info
    /// panes. None when unselected or the index is stale.
    pub fn selected_record(&self) -> Option<(&SelectedPoint, &ScheduleRecord)> {
        let point = self.selection.current()?;
        let record = self.dataset.get(point.index)?;
        Some((point, record))
    }

    /// Full session state as JSON, for the GUI shell.
    pub fn state_json(&self) -> Result<String> {
        let state = SessionState {
            chart: self.dataset.snapshot(),
            selection: self.selection.clone(),
            markers: self.markers.clone(),
            mode: self.controller.mode,
            multiplier: self.multiplier,
        };
        Ok(serde_json::to_string(&state)?)
    }

    /// Handle one user-originated event.
    pub fn handle(&mut self, event: EditorEvent) -> EventOutcome {
        match event {
            EditorEvent::BatchApply { text } => self.apply_batch(&text),
            EditorEvent::GlobalMultiplierChanged { multiplier } => {
                self.change_multiplier(multiplier)
            }
            EditorEvent::ModeChanged { mode } => {
                // mode switches never clear the selection
                self.controller.mode = mode;
                EventOutcome::status_only(EventStatus::ModeSet { mode })
            }
            EditorEvent::PointClicked { point } => self.click_point(point),
            EditorEvent::SliderChanged { variance } => {
                let outcome = self
                    .controller
                    .set_variance(&mut self.dataset, &self.selection, variance);
                self.adjustment_outcome(outcome)
            }
            EditorEvent::KeyPressed { key } => self.press_key(key),
            EditorEvent::MarkerAssigned { key } => self.assign_marker(key),
            EditorEvent::ClearSelection => {
                self.selection.clear();
                EventOutcome::status_only(EventStatus::SelectionCleared)
            }
            EditorEvent::ExportRequested => self.build_export(),
        }
    }

    fn apply_batch(&mut self, text: &str) -> EventOutcome {
        let (values, status) = parse_batch(text);
        if !status.is_usable() {
            return EventOutcome::status_only(EventStatus::BatchRejected { status });
        }

        // stage the update so a partial write is never visible
        let mut staged = self.dataset.clone();
        if staged.replace_averages(&values).is_err() {
            return EventOutcome::status_only(EventStatus::BatchRejected { status });
        }
        recompute_global(&mut staged, self.multiplier);
        self.dataset = staged;

        EventOutcome::with_chart(EventStatus::BatchApplied { status }, self.dataset.snapshot())
    }

    fn change_multiplier(&mut self, multiplier: f64) -> EventOutcome {
        let multiplier = self.config.clamp_multiplier(multiplier);
        self.multiplier = multiplier;

        if self.controller.mode == AdjustmentMode::Global {
            recompute_global(&mut self.dataset, multiplier);
            EventOutcome::with_chart(
                EventStatus::BandRecomputed { multiplier },
                self.dataset.snapshot(),
            )
        } else {
            // recorded only; individual overrides must not be clobbered
            EventOutcome::status_only(EventStatus::MultiplierStored { multiplier })
        }
    }

    fn click_point(&mut self, point: SelectedPoint) -> EventOutcome {
        if point.index >= self.dataset.len() {
            return EventOutcome::status_only(EventStatus::Ignored {
                reason: NoopReason::IndexOutOfRange,
            });
        }
        let index = point.index;
        self.selection.select(point);
        EventOutcome::status_only(EventStatus::PointSelected { index })
    }

    fn press_key(&mut self, key: KeyCode) -> EventOutcome {
        let outcome = self
            .controller
            .step_variance(&mut self.dataset, &self.selection, key);
        self.adjustment_outcome(outcome)
    }

    fn adjustment_outcome(&self, outcome: AdjustOutcome) -> EventOutcome {
        match outcome {
            AdjustOutcome::Applied { index, variance } => EventOutcome::with_chart(
                EventStatus::AdjustmentApplied { index, variance },
                self.dataset.snapshot(),
            ),
            AdjustOutcome::Noop(reason) => {
                EventOutcome::status_only(EventStatus::Ignored { reason })
            }
        }
    }

    fn assign_marker(&mut self, key: MarkerKey) -> EventOutcome {
        let time_label = match self.selection.current() {
            Some(point) => point.time_label.clone(),
            None => {
                return EventOutcome::status_only(EventStatus::Ignored {
                    reason: NoopReason::NoSelection,
                })
            }
        };
        self.markers.set_marker(key, &self.selection);
        EventOutcome::status_only(EventStatus::MarkerSet { key, time_label })
    }

    fn build_export(&self) -> EventOutcome {
        let table = ExportTable::build(&self.dataset, &self.markers);
        EventOutcome {
            status: EventStatus::ExportReady {
                filename: export_filename(&self.config.export_basename),
            },
            chart: None,
            export: Some(table),
        }
    }
}
