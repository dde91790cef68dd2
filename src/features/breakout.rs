//! Higher-high / lower-low breakouts against the previous candle, with the
//! excess magnitude of each breakout.

use anyhow::Result;

use super::{skip_if_present, StageOutcome};
use crate::config::{EXCESS_HIGH, EXCESS_LOW, HIGH, HIGHER_HIGH, LOW, LOWER_LOW};
use crate::store::SeriesStore;

pub const OUTPUTS: [&str; 4] = [HIGHER_HIGH, LOWER_LOW, EXCESS_HIGH, EXCESS_LOW];

/// Amount by which `current` clears `reference`, only when it does so
/// strictly. A missing side never counts as a breakout.
fn excess(current: Option<f64>, reference: Option<f64>) -> Option<f64> {
    match (current, reference) {
        (Some(c), Some(r)) if c > r => Some(c - r),
        _ => None,
    }
}

/// Add `HigherHigh`, `LowerLow`, `ExcessHigh` and `ExcessLow`.
///
/// Row 0 has no previous candle, so both flags are 0 and both excesses are
/// missing. If any of the four columns already exists the whole stage is
/// skipped; a partial set is not completed.
pub fn add_breakout_features(store: &mut SeriesStore) -> Result<StageOutcome> {
    if let Some(reason) = skip_if_present(store, &OUTPUTS) {
        return Ok(StageOutcome::Skipped(reason));
    }

    let high = store.get_column(HIGH)?;
    let low = store.get_column(LOW)?;
    let previous = store.shifted_view(&[HIGH, LOW], -1)?;

    let n = store.height();
    let mut higher_high = Vec::with_capacity(n);
    let mut lower_low = Vec::with_capacity(n);
    let mut excess_high = Vec::with_capacity(n);
    let mut excess_low = Vec::with_capacity(n);

    for i in 0..n {
        let up = excess(high[i], previous.value(i, HIGH));
        // Lows break downwards: the previous low must exceed the current one.
        let down = excess(previous.value(i, LOW), low[i]);

        higher_high.push(i32::from(up.is_some()));
        lower_low.push(i32::from(down.is_some()));
        excess_high.push(up);
        excess_low.push(down);
    }

    store.add_column(HIGHER_HIGH, higher_high)?;
    store.add_column(LOWER_LOW, lower_low)?;
    store.add_column(EXCESS_HIGH, excess_high)?;
    store.add_column(EXCESS_LOW, excess_low)?;

    Ok(StageOutcome::Computed(OUTPUTS.to_vec()))
}
