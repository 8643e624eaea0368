//! Point selection and per-slot adjustment.
//!
//! The selection is a weak reference by index into the dataset, not an
//! owning copy: at most one slot is selected, a re-click replaces it
//! without passing through the unselected state, and switching
//! adjustment mode never clears it. Individual-only inputs (slider,
//! arrow keys) are silent no-ops while the mode is Global.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::band::recompute_one;
use crate::events::KeyCode;
use crate::record::Dataset;

/// Click payload from either chart view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPoint {
    /// Slot index (the stable per-slot tag, not the curve position)
    pub index: usize,
    /// `HH:MM` label of the clicked slot
    pub time_label: String,
    /// Y value of the clicked series at that slot
    pub value: f64,
    /// Which series was clicked (average, variance, bounds...)
    pub series_id: u32,
}

/// The at-most-one selected slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    current: Option<SelectedPoint>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current selection (re-click on a new point).
    pub fn select(&mut self, point: SelectedPoint) {
        self.current = Some(point);
    }

    /// Explicit reset back to the unselected state.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&SelectedPoint> {
        self.current.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.current.is_some()
    }
}

/// Which edit pathway is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentMode {
    /// Variance derived from the average via the cubic formula.
    Global,
    /// Variance is a free manual override per slot.
    #[default]
    Individual,
}

/// Why an adjustment was silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoopReason {
    /// No point has been clicked yet (or selection was reset).
    NoSelection,
    /// Individual-only input arrived while mode is Global.
    WrongMode,
    /// Selection index no longer fits the dataset; defensive check.
    IndexOutOfRange,
}

impl fmt::Display for NoopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NoopReason::NoSelection => "no slot selected",
            NoopReason::WrongMode => "not in individual mode",
            NoopReason::IndexOutOfRange => "selection out of range",
        };
        f.write_str(text)
    }
}

/// Result of a slider or keyboard edit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AdjustOutcome {
    Applied { index: usize, variance: f64 },
    Noop(NoopReason),
}

/// Applies per-slot variance edits against the active selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentController {
    /// Active edit pathway
    pub mode: AdjustmentMode,
    /// Keyboard increment per arrow-key press
    pub step: f64,
}

impl Default for AdjustmentController {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjustmentController {
    pub fn new() -> Self {
        Self {
            mode: AdjustmentMode::default(),
            step: 0.01,
        }
    }

    pub fn with_step(step: f64) -> Self {
        Self {
            mode: AdjustmentMode::default(),
            step,
        }
    }

    fn gate(&self, selection: &Selection, dataset: &Dataset) -> Result<usize, NoopReason> {
        if self.mode != AdjustmentMode::Individual {
            return Err(NoopReason::WrongMode);
        }
        let point = selection.current().ok_or(NoopReason::NoSelection)?;
        if point.index >= dataset.len() {
            return Err(NoopReason::IndexOutOfRange);
        }
        Ok(point.index)
    }

    /// Absolute variance edit (slider). Clamped to `[0, 1]`.
    pub fn set_variance(
        &self,
        dataset: &mut Dataset,
        selection: &Selection,
        variance: f64,
    ) -> AdjustOutcome {
        let index = match self.gate(selection, dataset) {
            Ok(index) => index,
            Err(reason) => return AdjustOutcome::Noop(reason),
        };
        let variance = variance.clamp(0.0, 1.0);
        if recompute_one(dataset, index, variance) {
            AdjustOutcome::Applied { index, variance }
        } else {
            AdjustOutcome::Noop(NoopReason::IndexOutOfRange)
        }
    }

    /// Incremental keyboard edit: ArrowUp increases, ArrowDown
    /// decreases, by `step`, saturating at the `[0, 1]` ends.
    pub fn step_variance(
        &self,
        dataset: &mut Dataset,
        selection: &Selection,
        key: KeyCode,
    ) -> AdjustOutcome {
        let index = match self.gate(selection, dataset) {
            Ok(index) => index,
            Err(reason) => return AdjustOutcome::Noop(reason),
        };
        let current = match dataset.get(index) {
            Some(record) => record.variance,
            None => return AdjustOutcome::Noop(NoopReason::IndexOutOfRange),
        };
        let variance = match key {
            KeyCode::ArrowUp => (current + self.step).clamp(0.0, 1.0),
            KeyCode::ArrowDown => (current - self.step).clamp(0.0, 1.0),
        };
        if recompute_one(dataset, index, variance) {
            AdjustOutcome::Applied { index, variance }
        } else {
            AdjustOutcome::Noop(NoopReason::IndexOutOfRange)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::recompute_global;
    use crate::grid::SLOT_COUNT;

    fn dataset_with_band(average: f64) -> Dataset {
        let mut dataset = Dataset::from_averages(vec![average; SLOT_COUNT]).unwrap();
        recompute_global(&mut dataset, 1.0);
        dataset
    }

    fn click(index: usize) -> SelectedPoint {
        SelectedPoint {
            index,
            time_label: crate::grid::slot_label(index),
            value: 0.3,
            series_id: 0,
        }
    }

    #[test]
    fn test_selection_replaces_on_reclick() {
        let mut selection = Selection::new();
        assert!(!selection.is_selected());

        selection.select(click(10));
        selection.select(click(20));
        assert_eq!(selection.current().unwrap().index, 20);

        selection.clear();
        assert!(selection.current().is_none());
    }

    #[test]
    fn test_set_variance_applies_to_selected_slot() {
        let mut dataset = dataset_with_band(0.3);
        let mut selection = Selection::new();
        selection.select(click(10));

        let controller = AdjustmentController::new();
        let outcome = controller.set_variance(&mut dataset, &selection, 0.2);
        assert_eq!(outcome, AdjustOutcome::Applied { index: 10, variance: 0.2 });
        assert_eq!(dataset.get(10).unwrap().variance, 0.2);
    }

    #[test]
    fn test_set_variance_without_selection_is_noop() {
        let mut dataset = dataset_with_band(0.3);
        let before = dataset.clone();
        let controller = AdjustmentController::new();

        let outcome = controller.set_variance(&mut dataset, &Selection::new(), 0.2);
        assert_eq!(outcome, AdjustOutcome::Noop(NoopReason::NoSelection));
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_individual_inputs_gated_in_global_mode() {
        let mut dataset = dataset_with_band(0.3);
        let mut selection = Selection::new();
        selection.select(click(10));

        let mut controller = AdjustmentController::new();
        controller.mode = AdjustmentMode::Global;

        let outcome = controller.set_variance(&mut dataset, &selection, 0.2);
        assert_eq!(outcome, AdjustOutcome::Noop(NoopReason::WrongMode));

        let outcome = controller.step_variance(&mut dataset, &selection, KeyCode::ArrowUp);
        assert_eq!(outcome, AdjustOutcome::Noop(NoopReason::WrongMode));

        // mode switch back does not require re-selection
        controller.mode = AdjustmentMode::Individual;
        let outcome = controller.set_variance(&mut dataset, &selection, 0.2);
        assert!(matches!(outcome, AdjustOutcome::Applied { .. }));
    }

    #[test]
    fn test_arrow_step_and_bounds_recompute() {
        // average 0.3, variance 0.05 -> ArrowUp gives 0.06, bounds 0.36/0.24
        let mut dataset = dataset_with_band(0.3);
        let mut selection = Selection::new();
        selection.select(click(10));
        let controller = AdjustmentController::new();

        controller.set_variance(&mut dataset, &selection, 0.05);
        let outcome = controller.step_variance(&mut dataset, &selection, KeyCode::ArrowUp);
        assert!(matches!(outcome, AdjustOutcome::Applied { index: 10, .. }));

        let record = dataset.get(10).unwrap();
        assert!((record.variance - 0.06).abs() < 1e-12);
        assert!((record.upper_bound - 0.36).abs() < 1e-12);
        assert!((record.lower_bound - 0.24).abs() < 1e-12);
    }

    #[test]
    fn test_arrow_up_saturates_at_one() {
        let mut dataset = dataset_with_band(0.3);
        let mut selection = Selection::new();
        selection.select(click(5));
        let controller = AdjustmentController::new();

        controller.set_variance(&mut dataset, &selection, 0.99);
        for _ in 0..100 {
            controller.step_variance(&mut dataset, &selection, KeyCode::ArrowUp);
        }
        assert_eq!(dataset.get(5).unwrap().variance, 1.0);
    }

    #[test]
    fn test_arrow_down_saturates_at_zero() {
        let mut dataset = dataset_with_band(0.3);
        let mut selection = Selection::new();
        selection.select(click(5));
        let controller = AdjustmentController::new();

        controller.set_variance(&mut dataset, &selection, 0.005);
        controller.step_variance(&mut dataset, &selection, KeyCode::ArrowDown);
        controller.step_variance(&mut dataset, &selection, KeyCode::ArrowDown);
        assert_eq!(dataset.get(5).unwrap().variance, 0.0);
    }

    #[test]
    fn test_stale_index_is_noop() {
        let mut dataset = dataset_with_band(0.3);
        let before = dataset.clone();
        let mut selection = Selection::new();
        selection.select(click(SLOT_COUNT + 4));

        let controller = AdjustmentController::new();
        let outcome = controller.set_variance(&mut dataset, &selection, 0.5);
        assert_eq!(outcome, AdjustOutcome::Noop(NoopReason::IndexOutOfRange));
        assert_eq!(dataset, before);
    }
}
