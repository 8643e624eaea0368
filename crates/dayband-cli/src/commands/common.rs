//! Shared helpers for command modules.

use std::path::Path;

use dayband_core::{
    load_average_pairs_file, CoreError, Dataset, EditorEvent, EditorSession, EventStatus,
    SelectedPoint, SessionConfig,
};

/// Build a session from a bootstrap pairs CSV and an optional config
/// file.
pub fn load_session(
    input: &Path,
    config: Option<&Path>,
) -> Result<EditorSession, Box<dyn std::error::Error>> {
    let pairs = load_average_pairs_file(input)?;
    let dataset = Dataset::from_pairs(pairs).map_err(CoreError::from)?;
    let config = match config {
        Some(path) => SessionConfig::load_from_file(path).map_err(CoreError::from)?,
        None => SessionConfig::default(),
    };
    Ok(EditorSession::with_config(dataset, config))
}

/// Select a slot by index, emulating a chart click on the average
/// series.
pub fn select_slot(
    session: &mut EditorSession,
    index: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = session
        .dataset()
        .get(index)
        .ok_or_else(|| format!("slot {index} out of range (0-{})", session.dataset().len() - 1))?;
    let point = SelectedPoint {
        index,
        time_label: record.time_label.clone(),
        value: record.average,
        series_id: 0,
    };
    let outcome = session.handle(EditorEvent::PointClicked { point });
    match outcome.status {
        EventStatus::PointSelected { .. } => Ok(()),
        other => Err(other.message().into()),
    }
}
