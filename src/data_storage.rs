//! CSV persistence for price tables.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Load a delimited table with a header row. Row order is kept as read.
///
/// The schema is inferred over the whole file so a price column that only
/// looks fractional far down the file is still read as a float.
pub fn load_dataframe(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        anyhow::bail!("Dataset not found: {}", path.display());
    }
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(None)
        .finish()
        .with_context(|| format!("Failed to initialize CSV reader for {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read CSV data from {}", path.display()))?;
    Ok(df)
}

/// Save a DataFrame to a CSV file (overwrites). Missing values are written
/// as empty fields.
pub fn save_dataframe_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
