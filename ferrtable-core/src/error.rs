use snafu::prelude::*;

use crate::config::RebuildConfigBuilderError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FerrtableError {
    #[snafu(display("Table structure has no cells to match {} text boxes against", text_boxes))]
    EmptyStructure { text_boxes: usize },
    #[snafu(display(
        "Text box {} has no recognized text, only {} texts available",
        index,
        available
    ))]
    MissingText { index: usize, available: usize },
    #[snafu(display("Recognizer returned {} texts for {} crops", actual, expected))]
    RecognitionCount { expected: usize, actual: usize },
    #[snafu(display("Model stage `{}` error: {}", stage, message))]
    Model { stage: String, message: String },
    #[snafu(display("Rebuild config error: {}", source))]
    Config { source: RebuildConfigBuilderError },
    #[snafu(display("Read `{}` error: {}", path, source))]
    IoRead {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Parse json `{}` error: {}", path, source))]
    Json {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Image Write `{}` error: {}", path, source))]
    ImageWrite {
        source: image::ImageError,
        path: String,
    },
}
