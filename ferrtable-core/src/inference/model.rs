use image::DynamicImage;

use crate::{
    analysis::quad::Quad,
    error::FerrtableError,
    layout::element::{RecognizedText, TableStructure},
};

/// Text detection model: finds text regions in a table image.
pub trait TextDetector {
    const MODEL_NAME: &'static str;

    /// One polygon per text region, in any order. May be empty.
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<Quad>, FerrtableError>;
}

/// Text recognition model: reads the text in cropped regions.
pub trait TextRecognizer {
    const MODEL_NAME: &'static str;

    /// Exactly one result per crop, in crop order.
    fn recognize(&mut self, crops: &[DynamicImage]) -> Result<Vec<RecognizedText>, FerrtableError>;
}

/// Table structure model: predicts markup tokens and cell boxes.
pub trait TableStructurer {
    const MODEL_NAME: &'static str;

    /// `cells` must hold one box per cell-closing token of `tokens`.
    fn infer(&mut self, image: &DynamicImage) -> Result<TableStructure, FerrtableError>;
}
