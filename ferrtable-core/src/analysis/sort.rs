use glam::Vec2;

use crate::analysis::quad::Quad;

/// Sorts items into reading order, top-to-bottom then left-to-right.
///
/// The primary order is a stable sort on the top-left point `(y, x)`. One
/// left-to-right pass then swaps each adjacent pair whose top-left y values
/// differ by less than `row_tolerance` when the later item starts further
/// left. A swapped item is compared again at the next position, so it can
/// move more than one place in a single pass.
pub fn sort_reading_order<T, F>(items: &mut [T], top_left: F, row_tolerance: f32)
where
    F: Fn(&T) -> Vec2,
{
    items.sort_by(|a, b| {
        let (a, b) = (top_left(a), top_left(b));
        a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
    });

    for i in 1..items.len() {
        let prev = top_left(&items[i - 1]);
        let next = top_left(&items[i]);

        if (next.y - prev.y).abs() < row_tolerance && next.x < prev.x {
            items.swap(i - 1, i);
        }
    }
}

/// Sorts detector polygons into reading order by their first point.
pub fn sort_quads(quads: &mut [Quad], row_tolerance: f32) {
    sort_reading_order(quads, Quad::top_left, row_tolerance);
}
