/// Maximum top-left y difference for two text boxes to count as one visual row.
///
/// After the primary `(y, x)` sort, adjacent boxes closer than this vertically
/// are swapped when the later one starts further left. Detector polygons on
/// the same printed line rarely share an exact y, so a strict sort would read
/// a row in the wrong order.
pub const ROW_TOLERANCE: f32 = 10.0;

/// Outset applied to each side of a detector polygon's min/max rectangle.
///
/// The detector's polygon hugs the glyphs tightly; the text box used for
/// matching and cropping is the polygon's bounding rectangle grown by this
/// many units on every side.
pub const BOX_OUTSET: f32 = 1.0;

/// Pixel margin added around a text box before it is cropped for recognition.
///
/// The expanded rectangle is clamped to the image, so boxes touching an edge
/// get a smaller margin on that side.
pub const CROP_MARGIN: f32 = 2.0;

/// Marker that makes a structure token cell-closing.
///
/// Any token containing this marker (`</td>`, or a fused `<td></td>`) closes
/// exactly one cell and advances the cell ordinal.
pub const CELL_CLOSE: &str = "</td>";

/// Inline bold opening marker produced by the recognizer.
pub const BOLD_OPEN: &str = "<b>";

/// Inline bold closing marker produced by the recognizer.
pub const BOLD_CLOSE: &str = "</b>";
