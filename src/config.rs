//! Column names and output naming for the transformation.

use std::path::{Path, PathBuf};

pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";

pub const CANDLE_TYPE: &str = "CandleType";
pub const HIGHER_HIGH: &str = "HigherHigh";
pub const LOWER_LOW: &str = "LowerLow";
pub const EXCESS_HIGH: &str = "ExcessHigh";
pub const EXCESS_LOW: &str = "ExcessLow";
pub const PIVOT: &str = "Pivot";
pub const PIVOT_TYPE: &str = "PivotType";

/// Raw price columns every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [OPEN, HIGH, LOW, CLOSE];

/// Inserted between the input file stem and its extension.
pub const OUTPUT_SUFFIX: &str = "_transformed";

/// `data/eurusd.csv` -> `data/eurusd_transformed.csv`, same directory as the input.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };
    input.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_goes_before_extension() {
        let out = output_path_for(Path::new("data/eurusd_h1.csv"));
        assert_eq!(out, PathBuf::from("data/eurusd_h1_transformed.csv"));
    }

    #[test]
    fn bare_file_name_stays_in_current_directory() {
        assert_eq!(
            output_path_for(Path::new("prices.csv")),
            PathBuf::from("prices_transformed.csv")
        );
    }

    #[test]
    fn extensionless_input_gets_plain_suffix() {
        assert_eq!(
            output_path_for(Path::new("/tmp/prices")),
            PathBuf::from("/tmp/prices_transformed")
        );
    }

    #[test]
    fn only_last_extension_is_preserved() {
        assert_eq!(
            output_path_for(Path::new("archive.2021.csv")),
            PathBuf::from("archive.2021_transformed.csv")
        );
    }
}
