pub mod model;

pub use model::{TableStructurer, TextDetector, TextRecognizer};
