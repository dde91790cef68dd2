//! Feature engineering: runs candle typing, breakout detection and pivot
//! classification in order and reports what each stage did.

use anyhow::Result;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::{CANDLE_TYPE, HIGHER_HIGH, LOWER_LOW, PIVOT_TYPE, REQUIRED_COLUMNS};
use crate::store::SeriesStore;
use crate::utils::measure_time;

pub mod breakout;
pub mod candle_type;
pub mod pivots;

pub use breakout::add_breakout_features;
pub use candle_type::add_candle_type;
pub use pivots::add_pivot_features;

/// What a stage did to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Columns appended by this run.
    Computed(Vec<&'static str>),
    Skipped(SkipReason),
}

impl StageOutcome {
    pub fn is_computed(&self) -> bool {
        matches!(self, StageOutcome::Computed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// At least one output column exists. A partial set counts as done and
    /// is not repaired.
    AlreadyPresent(Vec<&'static str>),
    /// Input columns produced by an earlier stage are not in the table.
    MissingInput(Vec<&'static str>),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyPresent(columns) => {
                write!(f, "column(s) {} already exist in dataset", quoted(columns))
            }
            SkipReason::MissingInput(columns) => {
                write!(f, "input column(s) {} not found in dataset", quoted(columns))
            }
        }
    }
}

fn quoted(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Skip guard shared by all stages: `Some` when any of `outputs` exists.
pub(crate) fn skip_if_present(
    store: &SeriesStore,
    outputs: &[&'static str],
) -> Option<SkipReason> {
    let existing: Vec<&'static str> = outputs
        .iter()
        .copied()
        .filter(|name| store.has_column(name))
        .collect();
    (!existing.is_empty()).then_some(SkipReason::AlreadyPresent(existing))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CandleType,
    Breakout,
    Pivot,
}

impl Stage {
    /// Dependency order; each stage reads what the previous one wrote.
    pub const ALL: [Stage; 3] = [Stage::CandleType, Stage::Breakout, Stage::Pivot];

    pub fn label(self) -> &'static str {
        match self {
            Stage::CandleType => "candle type",
            Stage::Breakout => "breakout",
            Stage::Pivot => "pivot",
        }
    }

    pub fn run(self, store: &mut SeriesStore) -> Result<StageOutcome> {
        match self {
            Stage::CandleType => add_candle_type(store),
            Stage::Breakout => add_breakout_features(store),
            Stage::Pivot => add_pivot_features(store),
        }
    }
}

/// Counts of the derived labels currently in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSummary {
    pub rows: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub doji: usize,
    pub higher_highs: usize,
    pub lower_lows: usize,
    pub peaks: usize,
    pub troughs: usize,
}

impl FeatureSummary {
    /// Columns that are absent contribute zero.
    pub fn collect(store: &SeriesStore) -> Result<Self> {
        let count = |name: &str, wanted: f64| -> Result<usize> {
            if !store.has_column(name) {
                return Ok(0);
            }
            Ok(store
                .get_column(name)?
                .iter()
                .filter(|v| **v == Some(wanted))
                .count())
        };

        Ok(Self {
            rows: store.height(),
            bullish: count(CANDLE_TYPE, 1.0)?,
            bearish: count(CANDLE_TYPE, -1.0)?,
            doji: count(CANDLE_TYPE, 0.0)?,
            higher_highs: count(HIGHER_HIGH, 1.0)?,
            lower_lows: count(LOWER_LOW, 1.0)?,
            peaks: count(PIVOT_TYPE, 1.0)?,
            troughs: count(PIVOT_TYPE, 0.0)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub stages: Vec<(Stage, StageOutcome)>,
    pub summary: FeatureSummary,
    pub elapsed: Duration,
}

impl PipelineReport {
    pub fn outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, outcome)| outcome)
    }

    /// Every column appended during this run, in the order they were added.
    pub fn added_columns(&self) -> Vec<&'static str> {
        self.stages
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                StageOutcome::Computed(columns) => Some(columns.clone()),
                StageOutcome::Skipped(_) => None,
            })
            .flatten()
            .collect()
    }
}

/// Run every stage on the table in place.
///
/// Fails before touching the table if a raw price column is missing. Stages
/// whose outputs already exist are skipped with a notice, so re-running on an
/// augmented table is a no-op.
pub fn compute_features(store: &mut SeriesStore) -> Result<PipelineReport> {
    let start = Instant::now();

    store.require_columns(&REQUIRED_COLUMNS)?;

    let mut stages = Vec::with_capacity(Stage::ALL.len());
    for stage in Stage::ALL {
        let outcome = measure_time(stage.label(), || stage.run(store))?;
        match &outcome {
            StageOutcome::Computed(columns) => {
                info!(stage = stage.label(), columns = ?columns, "Stage computed")
            }
            StageOutcome::Skipped(reason) => {
                info!(stage = stage.label(), "Skipping stage: {}", reason)
            }
        }
        stages.push((stage, outcome));
    }

    let summary = FeatureSummary::collect(store)?;
    let elapsed = start.elapsed();
    info!(
        rows = summary.rows,
        peaks = summary.peaks,
        troughs = summary.troughs,
        "Feature computation took: {:.2} ms",
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(PipelineReport {
        stages,
        summary,
        elapsed,
    })
}
