//! Band derivation.
//!
//! Two pathways keep the variance column consistent with user intent:
//! the global cubic formula treats variance as a derived statistic of
//! the average (heavier activity carries proportionally more
//! uncertainty, cubed to suppress noise near zero), while the
//! single-slot override treats it as a manual value once the user has
//! drilled into one slot.

use crate::record::Dataset;

/// Recompute the whole band: `variance = average^3 * multiplier` for
/// every slot, then the bound invariant.
pub fn recompute_global(dataset: &mut Dataset, multiplier: f64) {
    for record in dataset.records_mut() {
        record.variance = record.average.powi(3) * multiplier;
        record.clamp_bounds();
    }
}

/// Override the variance of one slot (clamped to `[0, 1]`) and
/// recompute that slot's bounds only.
///
/// Returns false when `index` is out of range; the dataset is left
/// untouched in that case.
pub fn recompute_one(dataset: &mut Dataset, index: usize, variance: f64) -> bool {
    match dataset.records_mut().get_mut(index) {
        Some(record) => {
            record.variance = variance.clamp(0.0, 1.0);
            record.clamp_bounds();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SLOT_COUNT;

    fn flat_dataset(average: f64) -> Dataset {
        Dataset::from_averages(vec![average; SLOT_COUNT]).unwrap()
    }

    #[test]
    fn test_global_cubic_formula() {
        let mut dataset = flat_dataset(0.5);
        recompute_global(&mut dataset, 1.0);

        for record in dataset.records() {
            assert!((record.variance - 0.125).abs() < 1e-12);
            assert!((record.upper_bound - 0.625).abs() < 1e-12);
            assert!((record.lower_bound - 0.375).abs() < 1e-12);
        }
    }

    #[test]
    fn test_global_multiplier_scales_variance() {
        let mut dataset = flat_dataset(0.5);
        recompute_global(&mut dataset, 2.0);
        assert!((dataset.get(0).unwrap().variance - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_global_zero_average_gives_zero_band() {
        let mut dataset = flat_dataset(0.0);
        recompute_global(&mut dataset, 3.0);
        let record = dataset.get(10).unwrap();
        assert_eq!(record.variance, 0.0);
        assert_eq!(record.upper_bound, 0.0);
        assert_eq!(record.lower_bound, 0.0);
    }

    #[test]
    fn test_one_overrides_without_cubic() {
        let mut dataset = flat_dataset(0.3);
        recompute_global(&mut dataset, 1.0);

        assert!(recompute_one(&mut dataset, 10, 0.2));
        let edited = dataset.get(10).unwrap();
        assert_eq!(edited.variance, 0.2);
        assert!((edited.upper_bound - 0.5).abs() < 1e-12);
        assert!((edited.lower_bound - 0.1).abs() < 1e-12);

        // neighbors keep the cubic value
        let neighbor = dataset.get(11).unwrap();
        assert!((neighbor.variance - 0.027).abs() < 1e-12);
    }

    #[test]
    fn test_one_clamps_variance() {
        let mut dataset = flat_dataset(0.5);
        assert!(recompute_one(&mut dataset, 0, 1.7));
        assert_eq!(dataset.get(0).unwrap().variance, 1.0);
        assert!(recompute_one(&mut dataset, 0, -0.5));
        assert_eq!(dataset.get(0).unwrap().variance, 0.0);
    }

    #[test]
    fn test_one_out_of_range_is_noop() {
        let mut dataset = flat_dataset(0.5);
        let before = dataset.clone();
        assert!(!recompute_one(&mut dataset, SLOT_COUNT, 0.3));
        assert_eq!(dataset, before);
    }
}
