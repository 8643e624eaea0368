//! The schedule record store.
//!
//! A [`Dataset`] holds exactly 96 [`ScheduleRecord`]s in chronological
//! order. The bound invariant (`upper = min(avg + var, 1)`,
//! `lower = max(avg - var, 0)`) is re-derived through
//! [`ScheduleRecord::clamp_bounds`] after every change to an average or
//! variance; bounds are never edited independently.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::grid::{slot_label, SLOT_COUNT};

/// One slot of the schedule curve with its derived band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// `HH:MM` label of the slot
    pub time_label: String,
    /// Baseline activity level (0.0-1.0)
    pub average: f64,
    /// Uncertainty magnitude (0.0-1.0)
    pub variance: f64,
    /// `min(average + variance, 1)` -- derived, never set directly
    pub upper_bound: f64,
    /// `max(average - variance, 0)` -- derived, never set directly
    pub lower_bound: f64,
}

impl ScheduleRecord {
    /// Fresh record with zero variance and bounds collapsed onto the average.
    pub fn new(time_label: String, average: f64) -> Self {
        let mut record = Self {
            time_label,
            average,
            variance: 0.0,
            upper_bound: 0.0,
            lower_bound: 0.0,
        };
        record.clamp_bounds();
        record
    }

    /// Re-derive the band from the current average and variance.
    pub fn clamp_bounds(&mut self) {
        self.upper_bound = (self.average + self.variance).min(1.0);
        self.lower_bound = (self.average - self.variance).max(0.0);
    }
}

/// Parallel-array snapshot handed to a render collaborator.
///
/// `slot_indices` is the stable per-slot tag echoed back on point
/// clicks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub time_labels: Vec<String>,
    pub averages: Vec<f64>,
    pub variances: Vec<f64>,
    pub upper_bounds: Vec<f64>,
    pub lower_bounds: Vec<f64>,
    pub slot_indices: Vec<usize>,
}

/// Ordered sequence of exactly 96 records; the one shared mutable
/// resource of an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<ScheduleRecord>,
}

impl Dataset {
    /// Bootstrap from externally supplied `(time_label, average)` pairs.
    pub fn from_pairs(pairs: Vec<(String, f64)>) -> Result<Self, ValidationError> {
        if pairs.len() != SLOT_COUNT {
            return Err(ValidationError::WrongSlotCount {
                expected: SLOT_COUNT,
                actual: pairs.len(),
            });
        }
        let records = pairs
            .into_iter()
            .map(|(label, average)| ScheduleRecord::new(label, average))
            .collect();
        Ok(Self { records })
    }

    /// Build from bare averages, deriving labels from the grid.
    pub fn from_averages(values: Vec<f64>) -> Result<Self, ValidationError> {
        if values.len() != SLOT_COUNT {
            return Err(ValidationError::WrongSlotCount {
                expected: SLOT_COUNT,
                actual: values.len(),
            });
        }
        let records = values
            .into_iter()
            .enumerate()
            .map(|(i, average)| ScheduleRecord::new(slot_label(i), average))
            .collect();
        Ok(Self { records })
    }

    /// Bulk-replace the average column. Derived fields are left as-is;
    /// the caller must recompute the band afterward.
    pub fn replace_averages(&mut self, values: &[f64]) -> Result<(), ValidationError> {
        if values.len() != SLOT_COUNT {
            return Err(ValidationError::WrongSlotCount {
                expected: SLOT_COUNT,
                actual: values.len(),
            });
        }
        for (record, &value) in self.records.iter_mut().zip(values) {
            record.average = value;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false given the fixed-count invariant; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScheduleRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [ScheduleRecord] {
        &mut self.records
    }

    /// Parallel-array view for the chart collaborator.
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            time_labels: self.records.iter().map(|r| r.time_label.clone()).collect(),
            averages: self.records.iter().map(|r| r.average).collect(),
            variances: self.records.iter().map(|r| r.variance).collect(),
            upper_bounds: self.records.iter().map(|r| r.upper_bound).collect(),
            lower_bounds: self.records.iter().map(|r| r.lower_bound).collect(),
            slot_indices: (0..self.records.len()).collect(),
        }
    }

    /// Render the curve as an ASCII chart for terminal display.
    pub fn render_ascii_chart(&self) -> String {
        let mut output = String::from("\nSchedule curve:\n");
        output.push_str(&"─".repeat(56));
        output.push('\n');

        for record in &self.records {
            let bar_length = ((record.average * 30.0).round() as usize).min(30);
            let bar = "█".repeat(bar_length);
            let empty = " ".repeat(30 - bar_length);
            output.push_str(&format!(
                "{} {}{} {:.2} ±{:.3}\n",
                record.time_label, bar, empty, record.average, record.variance
            ));
        }

        output.push_str(&"─".repeat(56));
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::{recompute_global, recompute_one};
    use proptest::prelude::*;

    fn flat_dataset(average: f64) -> Dataset {
        Dataset::from_averages(vec![average; SLOT_COUNT]).unwrap()
    }

    #[test]
    fn test_record_bounds_clamped_at_edges() {
        let mut record = ScheduleRecord::new("00:00".to_string(), 0.9);
        record.variance = 0.3;
        record.clamp_bounds();
        assert_eq!(record.upper_bound, 1.0);
        assert!((record.lower_bound - 0.6).abs() < 1e-12);

        record.average = 0.1;
        record.clamp_bounds();
        assert_eq!(record.lower_bound, 0.0);
    }

    #[test]
    fn test_from_pairs_requires_96() {
        let pairs = vec![("00:00".to_string(), 0.5); 40];
        let err = Dataset::from_pairs(pairs).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::WrongSlotCount { expected: 96, actual: 40 }
        ));
    }

    #[test]
    fn test_from_averages_derives_labels() {
        let dataset = flat_dataset(0.5);
        assert_eq!(dataset.len(), SLOT_COUNT);
        assert_eq!(dataset.get(0).unwrap().time_label, "00:00");
        assert_eq!(dataset.get(95).unwrap().time_label, "23:45");
    }

    #[test]
    fn test_replace_averages_leaves_derived_fields() {
        let mut dataset = flat_dataset(0.5);
        recompute_global(&mut dataset, 1.0);
        let old_variance = dataset.get(0).unwrap().variance;

        dataset.replace_averages(&vec![0.8; SLOT_COUNT]).unwrap();
        assert_eq!(dataset.get(0).unwrap().average, 0.8);
        assert_eq!(dataset.get(0).unwrap().variance, old_variance);
    }

    #[test]
    fn test_replace_averages_rejects_wrong_count() {
        let mut dataset = flat_dataset(0.5);
        assert!(dataset.replace_averages(&[0.1; 10]).is_err());
    }

    #[test]
    fn test_snapshot_is_parallel() {
        let dataset = flat_dataset(0.5);
        let snapshot = dataset.snapshot();
        assert_eq!(snapshot.time_labels.len(), SLOT_COUNT);
        assert_eq!(snapshot.averages.len(), SLOT_COUNT);
        assert_eq!(snapshot.slot_indices[37], 37);
        assert_eq!(snapshot.time_labels[37], "09:15");
    }

    #[test]
    fn test_ascii_chart_has_one_row_per_slot() {
        let dataset = flat_dataset(0.25);
        let chart = dataset.render_ascii_chart();
        assert!(chart.contains("00:00"));
        assert!(chart.contains("23:45"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut dataset = flat_dataset(0.4);
        recompute_global(&mut dataset, 1.5);
        let json = serde_json::to_string(&dataset).unwrap();
        let decoded: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, dataset);
    }

    proptest! {
        /// The bound invariant holds for every slot after any sequence
        /// of global and single-slot recomputes.
        #[test]
        fn prop_bounds_invariant_after_operations(
            averages in proptest::collection::vec(0.0f64..=1.0, 96),
            multiplier in 0.1f64..=3.0,
            index in 0usize..96,
            override_variance in 0.0f64..=1.0,
        ) {
            let mut dataset = Dataset::from_averages(averages).unwrap();
            recompute_global(&mut dataset, multiplier);
            recompute_one(&mut dataset, index, override_variance);

            for record in dataset.records() {
                let expected_upper = (record.average + record.variance).min(1.0);
                let expected_lower = (record.average - record.variance).max(0.0);
                prop_assert_eq!(record.upper_bound, expected_upper);
                prop_assert_eq!(record.lower_bound, expected_lower);
                prop_assert!(record.upper_bound <= 1.0);
                prop_assert!(record.lower_bound >= 0.0);
            }
        }
    }
}
