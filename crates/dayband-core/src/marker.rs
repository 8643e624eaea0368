//! Period markers.
//!
//! Six fixed slots for named time labels: three "start" and three
//! "end" markers (A/B/C each). Purely a labeling facility, so there is
//! no chronological validation between start and end markers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::select::Selection;

/// One of the six fixed marker keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKey {
    #[serde(rename = "start_A")]
    StartA,
    #[serde(rename = "start_B")]
    StartB,
    #[serde(rename = "start_C")]
    StartC,
    #[serde(rename = "end_A")]
    EndA,
    #[serde(rename = "end_B")]
    EndB,
    #[serde(rename = "end_C")]
    EndC,
}

impl MarkerKey {
    /// All keys in display order (starts first).
    pub const ALL: [MarkerKey; 6] = [
        MarkerKey::StartA,
        MarkerKey::StartB,
        MarkerKey::StartC,
        MarkerKey::EndA,
        MarkerKey::EndB,
        MarkerKey::EndC,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKey::StartA => "start_A",
            MarkerKey::StartB => "start_B",
            MarkerKey::StartC => "start_C",
            MarkerKey::EndA => "end_A",
            MarkerKey::EndB => "end_B",
            MarkerKey::EndC => "end_C",
        }
    }

    /// Parse the key name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "start_a" => Some(MarkerKey::StartA),
            "start_b" => Some(MarkerKey::StartB),
            "start_c" => Some(MarkerKey::StartC),
            "end_a" => Some(MarkerKey::EndA),
            "end_b" => Some(MarkerKey::EndB),
            "end_c" => Some(MarkerKey::EndC),
            _ => None,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, MarkerKey::StartA | MarkerKey::StartB | MarkerKey::StartC)
    }
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session-lifetime registry of the six period markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodMarkers {
    start_a: Option<String>,
    start_b: Option<String>,
    start_c: Option<String>,
    end_a: Option<String>,
    end_b: Option<String>,
    end_c: Option<String>,
}

impl PeriodMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: MarkerKey) -> Option<&str> {
        let slot = match key {
            MarkerKey::StartA => &self.start_a,
            MarkerKey::StartB => &self.start_b,
            MarkerKey::StartC => &self.start_c,
            MarkerKey::EndA => &self.end_a,
            MarkerKey::EndB => &self.end_b,
            MarkerKey::EndC => &self.end_c,
        };
        slot.as_deref()
    }

    /// Store the selected slot's time label under `key`, overwriting
    /// any prior value. Returns false (registry unchanged) when
    /// nothing is selected.
    pub fn set_marker(&mut self, key: MarkerKey, selection: &Selection) -> bool {
        let Some(point) = selection.current() else {
            return false;
        };
        let label = Some(point.time_label.clone());
        match key {
            MarkerKey::StartA => self.start_a = label,
            MarkerKey::StartB => self.start_b = label,
            MarkerKey::StartC => self.start_c = label,
            MarkerKey::EndA => self.end_a = label,
            MarkerKey::EndB => self.end_b = label,
            MarkerKey::EndC => self.end_c = label,
        }
        true
    }

    /// The three start markers in A/B/C order, empty string when unset.
    pub fn start_labels(&self) -> [String; 3] {
        [
            self.start_a.clone().unwrap_or_default(),
            self.start_b.clone().unwrap_or_default(),
            self.start_c.clone().unwrap_or_default(),
        ]
    }

    /// The three end markers in A/B/C order, empty string when unset.
    pub fn end_labels(&self) -> [String; 3] {
        [
            self.end_a.clone().unwrap_or_default(),
            self.end_b.clone().unwrap_or_default(),
            self.end_c.clone().unwrap_or_default(),
        ]
    }

    /// Human-readable listing for status panes.
    pub fn summary_lines(&self) -> Vec<String> {
        MarkerKey::ALL
            .iter()
            .map(|&key| format!("{key}: {}", self.get(key).unwrap_or("unset")))
            .collect()
    }
}
