//! Export serialization and bootstrap loading.
//!
//! The export is a flat 9-column table: the four numeric columns of
//! every slot plus three marker columns. Period markers are embedded
//! into the first two rows (`start_period` / `end_period` tags) so the
//! session metadata travels in the same file without a second
//! artifact. Numerics are rounded to 6 decimal places.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{CoreError, ExportError};
use crate::marker::PeriodMarkers;
use crate::record::Dataset;

/// Fixed per-session export file stem.
pub const EXPORT_BASENAME: &str = "schedule-analysis-result";

/// Header row of the export table.
pub const COLUMNS: [&str; 9] = [
    "time",
    "average",
    "variance",
    "upper_bound",
    "lower_bound",
    "marker_tag",
    "marker_A",
    "marker_B",
    "marker_C",
];

/// `<basename>.csv`.
pub fn export_filename(basename: &str) -> String {
    format!("{basename}.csv")
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// One row of the export table. Marker cells are empty strings except
/// on the two header-embedding rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub time: String,
    pub average: f64,
    pub variance: f64,
    pub upper_bound: f64,
    pub lower_bound: f64,
    pub marker_tag: String,
    pub marker_a: String,
    pub marker_b: String,
    pub marker_c: String,
}

/// The assembled tabular output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTable {
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Assemble the table: one row per slot, markers embedded in rows
    /// 0 and 1.
    pub fn build(dataset: &Dataset, markers: &PeriodMarkers) -> Self {
        let start = markers.start_labels();
        let end = markers.end_labels();

        let rows = dataset
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let (marker_tag, cells) = match i {
                    0 => ("start_period".to_string(), start.clone()),
                    1 => ("end_period".to_string(), end.clone()),
                    _ => (String::new(), Default::default()),
                };
                let [marker_a, marker_b, marker_c] = cells;
                ExportRow {
                    time: record.time_label.clone(),
                    average: round6(record.average),
                    variance: round6(record.variance),
                    upper_bound: round6(record.upper_bound),
                    lower_bound: round6(record.lower_bound),
                    marker_tag,
                    marker_a,
                    marker_b,
                    marker_c,
                }
            })
            .collect();

        Self { rows }
    }

    /// Write the table as CSV with the header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(COLUMNS)?;
        for row in &self.rows {
            csv_writer.write_record([
                row.time.as_str(),
                &row.average.to_string(),
                &row.variance.to_string(),
                &row.upper_bound.to_string(),
                &row.lower_bound.to_string(),
                row.marker_tag.as_str(),
                row.marker_a.as_str(),
                row.marker_b.as_str(),
                row.marker_c.as_str(),
            ])?;
        }
        csv_writer.flush().map_err(|source| ExportError::WriteFailed {
            path: "<writer>".into(),
            source,
        })?;
        Ok(())
    }

    /// Write the table to a file.
    pub fn write_csv_file(&self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|source| ExportError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_csv(file)
    }
}

/// Load the bootstrap `(time_label, average)` pairs from a two-column
/// CSV. A non-numeric first row is treated as a header and skipped.
pub fn load_average_pairs<R: Read>(reader: R) -> Result<Vec<(String, f64)>, CoreError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result.map_err(ExportError::from)?;
        if record.len() < 2 {
            return Err(ExportError::InvalidInput {
                row,
                message: format!("expected 2 columns, got {}", record.len()),
            }
            .into());
        }
        let label = record[0].trim().to_string();
        match record[1].trim().parse::<f64>() {
            Ok(average) => pairs.push((label, average)),
            // header row
            Err(_) if row == 0 => continue,
            Err(_) => {
                return Err(ExportError::InvalidInput {
                    row,
                    message: format!("'{}' is not a number", record[1].trim()),
                }
                .into());
            }
        }
    }
    Ok(pairs)
}

/// Load bootstrap pairs from a file path.
pub fn load_average_pairs_file(path: &Path) -> Result<Vec<(String, f64)>, CoreError> {
    let file = File::open(path)?;
    load_average_pairs(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::recompute_global;
    use crate::grid::SLOT_COUNT;
    use crate::marker::MarkerKey;
    use crate::select::{SelectedPoint, Selection};

    fn dataset_with_band() -> Dataset {
        let mut dataset = Dataset::from_averages(vec![0.5; SLOT_COUNT]).unwrap();
        recompute_global(&mut dataset, 1.0);
        dataset
    }

    fn markers_with(key: MarkerKey, label: &str) -> PeriodMarkers {
        let mut selection = Selection::new();
        selection.select(SelectedPoint {
            index: 0,
            time_label: label.to_string(),
            value: 0.5,
            series_id: 0,
        });
        let mut markers = PeriodMarkers::new();
        markers.set_marker(key, &selection);
        markers
    }

    #[test]
    fn test_build_embeds_markers_in_first_two_rows() {
        let mut markers = markers_with(MarkerKey::StartA, "07:30");
        let mut selection = Selection::new();
        selection.select(SelectedPoint {
            index: 90,
            time_label: "22:30".to_string(),
            value: 0.1,
            series_id: 0,
        });
        markers.set_marker(MarkerKey::EndB, &selection);

        let table = ExportTable::build(&dataset_with_band(), &markers);
        assert_eq!(table.rows.len(), SLOT_COUNT);

        assert_eq!(table.rows[0].marker_tag, "start_period");
        assert_eq!(table.rows[0].marker_a, "07:30");
        assert_eq!(table.rows[0].marker_b, "");

        assert_eq!(table.rows[1].marker_tag, "end_period");
        assert_eq!(table.rows[1].marker_b, "22:30");

        for row in &table.rows[2..] {
            assert_eq!(row.marker_tag, "");
            assert_eq!(row.marker_a, "");
            assert_eq!(row.marker_b, "");
            assert_eq!(row.marker_c, "");
        }
    }

    #[test]
    fn test_build_rounds_to_six_decimals() {
        let mut dataset = Dataset::from_averages(vec![1.0 / 3.0; SLOT_COUNT]).unwrap();
        recompute_global(&mut dataset, 1.0);
        let table = ExportTable::build(&dataset, &PeriodMarkers::new());

        assert_eq!(table.rows[0].average, 0.333333);
        assert_eq!(table.rows[0].variance, 0.037037);
    }

    #[test]
    fn test_csv_output_shape() {
        let table = ExportTable::build(&dataset_with_band(), &markers_with(MarkerKey::StartA, "07:30"));
        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 97); // header + 96 rows
        assert_eq!(
            lines[0],
            "time,average,variance,upper_bound,lower_bound,marker_tag,marker_A,marker_B,marker_C"
        );
        assert_eq!(lines[1], "00:00,0.5,0.125,0.625,0.375,start_period,07:30,,");
        assert!(lines[2].starts_with("00:15,0.5,0.125,0.625,0.375,end_period,"));
        assert!(lines[3].ends_with(",,,,"));
    }

    #[test]
    fn test_write_csv_file_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_filename(EXPORT_BASENAME));

        let table = ExportTable::build(&dataset_with_band(), &PeriodMarkers::new());
        table.write_csv_file(&path).unwrap();

        let pairs = load_average_pairs_file(&path).unwrap();
        assert_eq!(pairs.len(), SLOT_COUNT);
        assert_eq!(pairs[0].0, "00:00");
        assert_eq!(pairs[0].1, 0.5);
    }

    #[test]
    fn test_load_pairs_with_and_without_header() {
        let with_header = "time,average\n00:00,0.1\n00:15,0.2\n";
        let pairs = load_average_pairs(with_header.as_bytes()).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], ("00:15".to_string(), 0.2));

        let without_header = "00:00,0.1\n00:15,0.2\n";
        let pairs = load_average_pairs(without_header.as_bytes()).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("00:00".to_string(), 0.1));
    }

    #[test]
    fn test_load_pairs_rejects_bad_row() {
        let text = "00:00,0.1\n00:15,not-a-number\n";
        assert!(load_average_pairs(text.as_bytes()).is_err());

        let short = "00:00\n";
        assert!(load_average_pairs(short.as_bytes()).is_err());
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(EXPORT_BASENAME), "schedule-analysis-result.csv");
    }
}
