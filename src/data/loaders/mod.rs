// mod.rs - Family record loaders

pub mod csv;
pub mod tsv;

use crate::data::person::Family;
use crate::error::Result;
use std::path::Path;

impl Family {
    /// Load a family file, picking the delimiter from the extension (`.tsv` or comma-separated)
    pub fn from_file(file_path: &Path) -> Result<Self> {
        eprintln!("📊 Loading family records: {}", file_path.display());

        let extension = file_path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("csv");

        match extension {
            "tsv" | "tab" => Self::from_tsv(file_path),
            _ => Self::from_csv(file_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "name,mother,father,trait\nHarry,Lily,James,\nJames,,,1\nLily,,,0\n").unwrap();
        let family = Family::from_file(file.path()).unwrap();
        assert_eq!(family.len(), 3);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Family::from_file(Path::new("/nonexistent/family.csv")).unwrap_err();
        assert!(err.is_input_error());
    }
}
