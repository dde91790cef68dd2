//! Derives candle direction, breakout and pivot features from an OHLC table.

pub mod candle;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod features;
pub mod store;
pub mod utils;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

pub use candle::Candle;
pub use error::TransformError;
pub use features::{compute_features, PipelineReport, SkipReason, Stage, StageOutcome};
pub use store::{SeriesStore, ShiftedView};

/// Load `input`, run the pipeline and write the augmented table next to it.
/// Returns the output path and what each stage did.
pub fn transform_file(input: &Path) -> Result<(PathBuf, PipelineReport)> {
    let frame = data_storage::load_dataframe(input)?;
    let mut store = SeriesStore::new(frame);
    utils::log_memory_breakdown(&store);

    let report = compute_features(&mut store)?;

    let output = config::output_path_for(input);
    data_storage::save_dataframe_csv(store.frame_mut(), &output)?;
    info!(
        rows = store.height(),
        path = %output.display(),
        "Transformed dataset written"
    );

    Ok((output, report))
}
