use image::{DynamicImage, GenericImageView};
use snafu::ensure;
use tracing::*;

use crate::{
    analysis::{bbox::Bbox, quad::Quad, sort::sort_quads},
    config::RebuildConfig,
    error::{FerrtableError, RecognitionCountSnafu},
    inference::model::{TableStructurer, TextDetector, TextRecognizer},
    layout::element::TableHtml,
    pipeline::crop::crop_text_boxes,
    table::rebuild::rebuild_table,
};

/// Runs the three table models over one image and rebuilds the table markup.
///
/// Each model is called at most once per image, strictly in sequence.
pub struct TableSystem<D, R, S> {
    detector: D,
    recognizer: R,
    structurer: S,
    config: RebuildConfig,
}

impl<D, R, S> TableSystem<D, R, S>
where
    D: TextDetector,
    R: TextRecognizer,
    S: TableStructurer,
{
    pub fn new(detector: D, recognizer: R, structurer: S) -> Self {
        Self {
            detector,
            recognizer,
            structurer,
            config: RebuildConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RebuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RebuildConfig {
        &self.config
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    pub fn structurer(&self) -> &S {
        &self.structurer
    }

    /// Rebuilds the table in `image`.
    ///
    /// Returns `Ok(None)` when the detector finds no text, in which case the
    /// recognizer is never called.
    #[tracing::instrument(skip_all)]
    pub fn run(&mut self, image: &DynamicImage) -> Result<Option<TableHtml>, FerrtableError> {
        let (width, height) = image.dimensions();
        info!("Rebuilding table from {}x{} image", width, height);

        let structure = self.structurer.infer(image)?;
        debug!(
            "{} predicted {} tokens and {} cells",
            S::MODEL_NAME,
            structure.tokens.len(),
            structure.cells.len()
        );

        let mut quads = self.detector.detect(image)?;
        if quads.is_empty() {
            info!("{} found no text, skipping recognition", D::MODEL_NAME);
            return Ok(None);
        }
        debug!("{} found {} text regions", D::MODEL_NAME, quads.len());

        sort_quads(&mut quads, self.config.row_tolerance);
        let text_boxes = text_boxes(&quads, self.config.box_outset);

        let crops = crop_text_boxes(image, &text_boxes, self.config.crop_margin);
        let texts = self.recognizer.recognize(&crops)?;
        ensure!(
            texts.len() == crops.len(),
            RecognitionCountSnafu {
                expected: crops.len(),
                actual: texts.len(),
            }
        );
        debug!("{} read {} crops", R::MODEL_NAME, crops.len());

        let table = rebuild_table(&structure, &text_boxes, &texts)?;
        info!("Rebuilt table with {} tokens", table.tokens.len());

        Ok(Some(table))
    }
}

/// Text boxes for quads already in reading order.
pub fn text_boxes(quads: &[Quad], outset: f32) -> Vec<Bbox> {
    quads.iter().map(|quad| quad.text_box(outset)).collect()
}
