use serde::{Deserialize, Serialize};

use crate::{analysis::bbox::Bbox, consts::CELL_CLOSE};

/// A detected text box in reading order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DetectedTextBox {
    pub index: usize,
    pub bbox: Bbox,
}

impl DetectedTextBox {
    /// Numbers boxes that are already in reading order.
    pub fn enumerate(boxes: &[Bbox]) -> Vec<Self> {
        boxes
            .iter()
            .enumerate()
            .map(|(index, &bbox)| Self { index, bbox })
            .collect()
    }
}

/// A predicted table cell, numbered by the order its cell-closing token
/// appears in the structure stream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PredictedCell {
    pub ordinal: usize,
    pub bbox: Bbox,
}

/// Recognizer output for one text crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecognizedText {
    pub text: String,
    #[serde(default)]
    pub score: f32,
}

impl RecognizedText {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Table structure model output: markup tokens plus one box per cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableStructure {
    pub tokens: Vec<String>,
    pub cells: Vec<Bbox>,
}

impl TableStructure {
    pub fn new(tokens: Vec<String>, cells: Vec<Bbox>) -> Self {
        Self { tokens, cells }
    }

    /// Number of cell-closing tokens in the stream.
    ///
    /// A well-formed structure has exactly `cells.len()` of them.
    pub fn cell_close_count(&self) -> usize {
        self.tokens.iter().filter(|t| is_cell_close(t)).count()
    }

    pub fn predicted_cells(&self) -> impl Iterator<Item = PredictedCell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(ordinal, &bbox)| PredictedCell { ordinal, bbox })
    }
}

/// Reconstructed table markup and the token sequence it was joined from.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TableHtml {
    pub html: String,
    pub tokens: Vec<String>,
}

pub fn is_cell_close(token: &str) -> bool {
    token.contains(CELL_CLOSE)
}
