// tsv.rs - Tab-separated family record loader

use crate::data::person::Family;
use crate::error::Result;
use std::path::Path;

impl Family {
    /// Load a tab-separated family file (same header as the CSV format)
    pub fn from_tsv(file_path: &Path) -> Result<Self> {
        Self::from_delimited(file_path, b'\t')
    }
}
