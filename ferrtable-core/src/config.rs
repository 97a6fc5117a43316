use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::consts::{BOX_OUTSET, CROP_MARGIN, ROW_TOLERANCE};

/// Tunables for turning detector output into matched, cropped text boxes.
///
/// The defaults are the values the reconstruction heuristics were calibrated
/// with; see `consts` for what each one controls.
///
/// # Example
/// ```
/// use ferrtable_core::config::RebuildConfigBuilder;
/// let config = RebuildConfigBuilder::default()
///     .row_tolerance(6.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.row_tolerance, 6.0);
/// assert_eq!(config.crop_margin, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder, Serialize, Deserialize)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct RebuildConfig {
    /// Maximum top-left y difference for two boxes to share a row.
    pub row_tolerance: f32,
    /// Outset applied to the detector polygon's bounding rectangle.
    pub box_outset: f32,
    /// Margin added around each text box before cropping.
    pub crop_margin: f32,
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self {
            row_tolerance: ROW_TOLERANCE,
            box_outset: BOX_OUTSET,
            crop_margin: CROP_MARGIN,
        }
    }
}

impl RebuildConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("row_tolerance", self.row_tolerance),
            ("box_outset", self.box_outset),
            ("crop_margin", self.crop_margin),
        ];

        for (name, value) in fields {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(format!("{name} must be a finite non-negative number, got {value}"));
                }
            }
        }

        Ok(())
    }
}
