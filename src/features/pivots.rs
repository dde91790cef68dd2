//! Single-bar pivot points.
//! A candle is a peak when it makes a higher high and the next candle breaks
//! its low without extending the high; a trough is the mirror image. Only the
//! breakout flags of the candle and its successor are consulted.

use anyhow::Result;

use super::{skip_if_present, SkipReason, StageOutcome};
use crate::config::{HIGHER_HIGH, LOWER_LOW, PIVOT, PIVOT_TYPE};
use crate::store::SeriesStore;

pub const OUTPUTS: [&str; 2] = [PIVOT, PIVOT_TYPE];
const INPUTS: [&str; 2] = [HIGHER_HIGH, LOWER_LOW];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotKind {
    Peak,
    Trough,
}

impl PivotKind {
    /// Value written to `PivotType`.
    pub fn code(self) -> i32 {
        match self {
            PivotKind::Peak => 1,
            PivotKind::Trough => 0,
        }
    }
}

/// Breakout flags of one candle as read from the table. A missing cell or a
/// missing candle compares unequal to both 0 and 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BreakoutFlags {
    pub higher_high: Option<f64>,
    pub lower_low: Option<f64>,
}

fn is_set(flag: Option<f64>) -> bool {
    flag == Some(1.0)
}

fn is_clear(flag: Option<f64>) -> bool {
    flag == Some(0.0)
}

/// Classify a candle from its own flags and its successor's. Peak and trough
/// need opposite successor flags, so at most one of them can match.
pub fn classify(current: BreakoutFlags, next: BreakoutFlags) -> Option<PivotKind> {
    if is_set(current.higher_high) && is_set(next.lower_low) && is_clear(next.higher_high) {
        Some(PivotKind::Peak)
    } else if is_set(current.lower_low)
        && is_set(next.higher_high)
        && is_clear(next.lower_low)
    {
        Some(PivotKind::Trough)
    } else {
        None
    }
}

/// Add `Pivot` and `PivotType`.
///
/// The last candle has no successor and is never a pivot. When the breakout
/// flags are not in the table (the breakout stage was skipped on a partial
/// column set) this stage is skipped as well.
pub fn add_pivot_features(store: &mut SeriesStore) -> Result<StageOutcome> {
    if let Some(reason) = skip_if_present(store, &OUTPUTS) {
        return Ok(StageOutcome::Skipped(reason));
    }
    let missing: Vec<&'static str> = INPUTS
        .iter()
        .copied()
        .filter(|name| !store.has_column(name))
        .collect();
    if !missing.is_empty() {
        return Ok(StageOutcome::Skipped(SkipReason::MissingInput(missing)));
    }

    let higher_high = store.get_column(HIGHER_HIGH)?;
    let lower_low = store.get_column(LOWER_LOW)?;
    let next = store.shifted_view(&INPUTS, 1)?;

    let n = store.height();
    let mut pivot = Vec::with_capacity(n);
    let mut pivot_type = Vec::with_capacity(n);

    for i in 0..n {
        let current = BreakoutFlags {
            higher_high: higher_high[i],
            lower_low: lower_low[i],
        };
        let following = BreakoutFlags {
            higher_high: next.value(i, HIGHER_HIGH),
            lower_low: next.value(i, LOWER_LOW),
        };
        let kind = classify(current, following);
        pivot.push(i32::from(kind.is_some()));
        pivot_type.push(kind.map(PivotKind::code));
    }

    store.add_column(PIVOT, pivot)?;
    store.add_column(PIVOT_TYPE, pivot_type)?;

    Ok(StageOutcome::Computed(OUTPUTS.to_vec()))
}
