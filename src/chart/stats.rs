use serde::{Deserialize, Serialize};

/// Counts of input the engine discarded while building a dataset.
///
/// None of these are errors; they exist so callers can tell a sparse chart from a broken upstream join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChartStats {
    /// Download records whose version is not in the supplied version list
    pub unmatched_records: u64,

    /// Download records dated outside the window
    pub out_of_window_records: u64,

    /// Extra download records dated outside the window
    pub out_of_window_extra_records: u64,

    /// Set when at least one label failed to parse as a version, so labels kept their input order
    pub unordered_labels: bool,
}
