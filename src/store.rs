//! Position-indexed column table that every pipeline stage reads and writes.
//!
//! Backed by a polars `DataFrame`. Rows are never inserted, removed or
//! reordered here; the schema only grows.

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::candle::Candle;
use crate::config::{CLOSE, HIGH, LOW, OPEN};
use crate::error::TransformError;

pub struct SeriesStore {
    frame: DataFrame,
}

impl SeriesStore {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Build a table holding only the four price columns.
    pub fn from_candles(candles: &[Candle]) -> Result<Self> {
        let open: Vec<f64> = candles.iter().map(|c| c.open).collect();
        let high: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let low: Vec<f64> = candles.iter().map(|c| c.low).collect();
        let close: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let frame = df!(
            OPEN => open,
            HIGH => high,
            LOW => low,
            CLOSE => close,
        )?;
        Ok(Self::new(frame))
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut DataFrame {
        &mut self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.get_column_index(name).is_some()
    }

    /// Error on the first name in `names` that is not a column.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        if let Some(missing) = names.iter().find(|name| !self.has_column(name)) {
            return Err(TransformError::MissingColumn(missing.to_string()).into());
        }
        Ok(())
    }

    /// Numeric view of a column; integer columns are widened to `f64` and
    /// unparseable or empty cells come back as `None`.
    pub fn get_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        if !self.has_column(name) {
            return Err(TransformError::MissingColumn(name.to_string()).into());
        }
        let values = self
            .frame
            .column(name)?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column \"{name}\" is not numeric"))?;
        let values = values.f64()?.into_iter().collect();
        Ok(values)
    }

    /// Append a column aligned one-to-one with the existing rows.
    pub fn add_column<T>(&mut self, name: &str, values: Vec<T>) -> Result<()>
    where
        Series: NamedFrom<Vec<T>, [T]>,
    {
        if self.has_column(name) {
            return Err(TransformError::DuplicateColumn(name.to_string()).into());
        }
        if values.len() != self.height() {
            return Err(TransformError::LengthMismatch {
                name: name.to_string(),
                expected: self.height(),
                actual: values.len(),
            }
            .into());
        }
        let series = <Series as NamedFrom<Vec<T>, [T]>>::new(name, values);
        self.frame
            .with_column(series)
            .with_context(|| format!("Failed to add column \"{name}\""))?;
        Ok(())
    }

    /// Values of `columns` as seen from `offset` rows away. Row `i` reads row
    /// `i + offset`; when that falls outside the table the value is absent.
    pub fn shifted_view(&self, columns: &[&str], offset: isize) -> Result<ShiftedView> {
        let mut values = Vec::with_capacity(columns.len());
        for name in columns {
            values.push(self.get_column(name)?);
        }
        Ok(ShiftedView {
            names: columns.iter().map(|name| name.to_string()).collect(),
            values,
            offset,
            height: self.height(),
        })
    }
}

/// Read-only neighbor lookup produced by [`SeriesStore::shifted_view`].
///
/// Nothing here is written back to the table, so no scratch columns can end
/// up in the output schema.
#[derive(Debug, Clone)]
pub struct ShiftedView {
    names: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
    offset: isize,
    height: usize,
}

impl ShiftedView {
    pub fn offset(&self) -> isize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    /// Value of `column` for `row`'s neighbor. `None` when the neighbor does
    /// not exist, when its cell is empty, or when `column` is not part of
    /// the view.
    pub fn value(&self, row: usize, column: &str) -> Option<f64> {
        let position = self.names.iter().position(|name| name == column)?;
        let source = neighbor_index(row, self.offset, self.height)?;
        self.values[position][source]
    }

    /// All viewed values for `row`'s neighbor, in view column order, or
    /// `None` when the neighbor row does not exist.
    pub fn row(&self, row: usize) -> Option<Vec<Option<f64>>> {
        let source = neighbor_index(row, self.offset, self.height)?;
        Some(self.values.iter().map(|column| column[source]).collect())
    }
}

/// Index of the row `offset` positions away from `row`, if it lies in `0..height`.
pub fn neighbor_index(row: usize, offset: isize, height: usize) -> Option<usize> {
    if row >= height {
        return None;
    }
    let source = row.checked_add_signed(offset)?;
    (source < height).then_some(source)
}
