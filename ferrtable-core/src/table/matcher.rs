use snafu::ensure;
use tracing::*;

use crate::{
    analysis::bbox::Bbox,
    error::{EmptyStructureSnafu, FerrtableError},
};

/// Text-box indices assigned to each predicted cell.
///
/// Indexed by cell ordinal and sized at the cell count. Each list keeps the
/// order boxes were matched in, which is reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchMap {
    cells: Vec<Vec<usize>>,
}

impl MatchMap {
    /// Text boxes assigned to `ordinal`, or `None` when the cell received none
    /// or lies past the last predicted cell.
    pub fn get(&self, ordinal: usize) -> Option<&[usize]> {
        self.cells
            .get(ordinal)
            .map(Vec::as_slice)
            .filter(|boxes| !boxes.is_empty())
    }

    /// Number of predicted cells the map was built for.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// `(ordinal, text boxes)` for every cell that received at least one box.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, boxes)| !boxes.is_empty())
            .map(|(ordinal, boxes)| (ordinal, boxes.as_slice()))
    }

    /// Cell owning text box `index`.
    pub fn cell_of(&self, index: usize) -> Option<usize> {
        self.cells.iter().position(|boxes| boxes.contains(&index))
    }
}

/// Matching cost of a text box against one cell.
///
/// Ordered lexicographically: less overlap loses first, corner distance only
/// breaks ties.
#[derive(Clone, Copy, Debug, PartialEq)]
struct MatchCost {
    overlap_miss: f32,
    distance: f32,
}

impl MatchCost {
    fn new(text_box: &Bbox, cell: &Bbox) -> Self {
        Self {
            overlap_miss: 1.0 - text_box.iou(cell),
            distance: text_box.corner_distance(cell),
        }
    }

    fn compare(&self, other: &Self) -> std::cmp::Ordering {
        self.overlap_miss
            .total_cmp(&other.overlap_miss)
            .then(self.distance.total_cmp(&other.distance))
    }
}

/// Assigns every text box to the cell it most likely belongs to.
///
/// Each box independently picks the cell with the highest IoU, breaking ties
/// by corner distance and then by the lower cell ordinal. Boxes are never
/// dropped: a box overlapping no cell still goes to the nearest one. Several
/// boxes may land in one cell and some cells may get none.
///
/// Fails with `EmptyStructure` when there are text boxes but no cells.
pub fn match_cells(text_boxes: &[Bbox], cells: &[Bbox]) -> Result<MatchMap, FerrtableError> {
    ensure!(
        text_boxes.is_empty() || !cells.is_empty(),
        EmptyStructureSnafu {
            text_boxes: text_boxes.len()
        }
    );

    let mut matched = vec![Vec::new(); cells.len()];

    for (index, text_box) in text_boxes.iter().enumerate() {
        let best = cells
            .iter()
            .map(|cell| MatchCost::new(text_box, cell))
            .enumerate()
            .min_by(|(_, a), (_, b)| a.compare(b));

        if let Some((ordinal, cost)) = best {
            trace!(
                "text box {index} -> cell {ordinal} (iou {:.3}, distance {:.1})",
                1.0 - cost.overlap_miss,
                cost.distance
            );
            matched[ordinal].push(index);
        }
    }

    let map = MatchMap { cells: matched };
    debug!(
        "matched {} text boxes into {} of {} cells",
        text_boxes.len(),
        map.iter().count(),
        cells.len()
    );

    Ok(map)
}
