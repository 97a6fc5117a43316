use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use tracing::*;

use crate::{
    analysis::{
        draw::{canvas_size, draw_matches},
        quad::Quad,
        sort::sort_reading_order,
    },
    config::RebuildConfig,
    error::{FerrtableError, IoReadSnafu, JsonSnafu},
    layout::element::{DetectedTextBox, RecognizedText, TableHtml, TableStructure},
    table::{matcher::match_cells, rebuild::rebuild_table},
};

/// One detected region together with the text read from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRegion {
    pub quad: Quad,
    #[serde(flatten)]
    pub text: RecognizedText,
}

/// Recorded outputs of the three table models for one image.
///
/// Replaying a record runs the same sort, match and rebuild steps as
/// [`TableSystem`](crate::pipeline::system::TableSystem) without an image or
/// any model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableEvidence {
    pub structure: TableStructure,
    #[serde(default)]
    pub regions: Vec<EvidenceRegion>,
}

impl TableEvidence {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FerrtableError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).context(IoReadSnafu {
            path: path.to_string_lossy(),
        })?;

        serde_json::from_str(&raw).context(JsonSnafu {
            path: path.to_string_lossy(),
        })
    }

    /// Regions sorted into reading order, each text still with its quad.
    pub fn sorted_regions(&self, config: &RebuildConfig) -> Vec<EvidenceRegion> {
        let mut regions = self.regions.clone();
        sort_reading_order(&mut regions, |r| r.quad.top_left(), config.row_tolerance);
        regions
    }

    /// Rebuilds the table markup. `Ok(None)` when no region was recorded.
    pub fn rebuild(&self, config: &RebuildConfig) -> Result<Option<TableHtml>, FerrtableError> {
        if self.regions.is_empty() {
            return Ok(None);
        }

        let regions = self.sorted_regions(config);
        let text_boxes: Vec<_> = regions
            .iter()
            .map(|r| r.quad.text_box(config.box_outset))
            .collect();
        let texts: Vec<_> = regions.into_iter().map(|r| r.text).collect();

        rebuild_table(&self.structure, &text_boxes, &texts).map(Some)
    }

    /// Writes the cell assignment overlay for this record to `output`.
    ///
    /// The canvas is sized to fit every cell and text box.
    pub fn draw<P: AsRef<Path>>(&self, output: P, config: &RebuildConfig) -> Result<(), FerrtableError> {
        let text_boxes: Vec<_> = self
            .sorted_regions(config)
            .iter()
            .map(|r| r.quad.text_box(config.box_outset))
            .collect();
        let matched = match_cells(&text_boxes, &self.structure.cells)?;
        for text_box in DetectedTextBox::enumerate(&text_boxes) {
            trace!(
                "text box {} {:?} -> cell {:?}",
                text_box.index,
                <[f32; 4]>::from(text_box.bbox),
                matched.cell_of(text_box.index)
            );
        }

        let canvas = canvas_size(self.structure.cells.iter().chain(&text_boxes));
        draw_matches(output, canvas, &self.structure.cells, &text_boxes, &matched)
    }
}

/// Rebuilds every record in parallel. Results keep the input order.
#[tracing::instrument(skip_all)]
pub fn rebuild_batch(
    records: &[TableEvidence],
    config: &RebuildConfig,
) -> Vec<Result<Option<TableHtml>, FerrtableError>> {
    info!("Rebuilding {} tables", records.len());

    records
        .par_iter()
        .map(|record| record.rebuild(config))
        .collect()
}
