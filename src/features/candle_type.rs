//! Candle direction: 1 when the close is above the open, -1 below, 0 for a doji.

use anyhow::Result;

use super::{skip_if_present, StageOutcome};
use crate::config::{CANDLE_TYPE, CLOSE, OPEN};
use crate::store::SeriesStore;

pub const OUTPUTS: [&str; 1] = [CANDLE_TYPE];

/// Direction of a single candle. `None` when either price is missing.
pub fn classify(open: Option<f64>, close: Option<f64>) -> Option<i32> {
    let (open, close) = (open?, close?);
    if close > open {
        Some(1)
    } else if close < open {
        Some(-1)
    } else if close == open {
        Some(0)
    } else {
        // NaN on either side
        None
    }
}

/// Add `CandleType`. An existing column is left as is, even if stale.
pub fn add_candle_type(store: &mut SeriesStore) -> Result<StageOutcome> {
    if let Some(reason) = skip_if_present(store, &OUTPUTS) {
        return Ok(StageOutcome::Skipped(reason));
    }

    let open = store.get_column(OPEN)?;
    let close = store.get_column(CLOSE)?;
    let labels: Vec<Option<i32>> = open
        .iter()
        .zip(close.iter())
        .map(|(&o, &c)| classify(o, c))
        .collect();

    store.add_column(CANDLE_TYPE, labels)?;
    Ok(StageOutcome::Computed(OUTPUTS.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candle::Candle;
    use crate::features::SkipReason;

    #[test]
    fn labels_follow_close_minus_open() {
        let mut store = SeriesStore::from_candles(&[
            Candle::new(1.0, 5.0, 1.0, 3.0),
            Candle::new(3.0, 6.0, 2.0, 2.0),
            Candle::new(2.0, 4.0, 1.0, 2.0),
        ])
        .unwrap();

        let outcome = add_candle_type(&mut store).unwrap();
        assert_eq!(outcome, StageOutcome::Computed(vec![CANDLE_TYPE]));
        assert_eq!(
            store.get_column(CANDLE_TYPE).unwrap(),
            vec![Some(1.0), Some(-1.0), Some(0.0)]
        );
    }

    #[test]
    fn existing_column_is_not_overwritten() {
        let mut store =
            SeriesStore::from_candles(&[Candle::new(1.0, 2.0, 0.5, 2.0)]).unwrap();
        // Deliberately stale label: the candle is bullish.
        store.add_column(CANDLE_TYPE, vec![-1i32]).unwrap();

        let outcome = add_candle_type(&mut store).unwrap();
        assert_eq!(
            outcome,
            StageOutcome::Skipped(SkipReason::AlreadyPresent(vec![CANDLE_TYPE]))
        );
        assert_eq!(store.get_column(CANDLE_TYPE).unwrap(), vec![Some(-1.0)]);
    }

    #[test]
    fn missing_prices_give_missing_label() {
        assert_eq!(classify(None, Some(1.0)), None);
        assert_eq!(classify(Some(1.0), None), None);
        assert_eq!(classify(Some(f64::NAN), Some(1.0)), None);
        assert_eq!(classify(Some(1.0), Some(1.0)), Some(0));
    }
}
