/// One OHLC observation. Only the four price fields take part in the
/// transformation; any other dataset columns are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }
}

impl From<(f64, f64, f64, f64)> for Candle {
    fn from((open, high, low, close): (f64, f64, f64, f64)) -> Self {
        Self::new(open, high, low, close)
    }
}
