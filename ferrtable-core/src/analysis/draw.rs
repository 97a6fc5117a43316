use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};
use snafu::ResultExt;

use crate::{
    analysis::bbox::Bbox,
    error::{FerrtableError, ImageWriteSnafu},
    table::matcher::MatchMap,
};

const CELL_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const SHARED_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const ALONE_COLOR: Rgb<u8> = Rgb([0, 160, 0]);

/// Smallest canvas holding every box, at least 1×1.
pub fn canvas_size<'a, I>(boxes: I) -> (u32, u32)
where
    I: IntoIterator<Item = &'a Bbox>,
{
    let (width, height) = boxes
        .into_iter()
        .fold((1.0f32, 1.0f32), |(w, h), bbox| (w.max(bbox.max.x), h.max(bbox.max.y)));

    (width.ceil() as u32, height.ceil() as u32)
}

/// Draws cells in blue and text boxes on a white canvas.
///
/// A text box is green when it is the only box in its cell and red when it
/// shares the cell.
pub fn draw_matches<P: AsRef<Path>>(
    output: P,
    canvas: (u32, u32),
    cells: &[Bbox],
    text_boxes: &[Bbox],
    matched: &MatchMap,
) -> Result<(), FerrtableError> {
    let (width, height) = canvas;
    let mut output_img = RgbImage::from_pixel(width.max(1), height.max(1), Rgb([255, 255, 255]));

    for cell in cells {
        draw_box(&mut output_img, cell, CELL_COLOR, 2);
    }

    for (index, text_box) in text_boxes.iter().enumerate() {
        let alone = matched
            .cell_of(index)
            .and_then(|ordinal| matched.get(ordinal))
            .is_some_and(|boxes| boxes.len() == 1);
        let color = if alone { ALONE_COLOR } else { SHARED_COLOR };

        draw_box(&mut output_img, text_box, color, 1);
    }

    output_img.save(output.as_ref()).context(ImageWriteSnafu {
        path: output.as_ref().to_string_lossy(),
    })?;

    Ok(())
}

fn draw_box(image: &mut RgbImage, bbox: &Bbox, color: Rgb<u8>, thickness: i32) {
    let x = bbox.min.x as i32;
    let y = bbox.min.y as i32;

    let width = bbox.width() as u32;
    let height = bbox.height() as u32;

    if width == 0 || height == 0 {
        return;
    }

    // Nested rectangles for thicker lines
    for offset in 0..thickness {
        let thick_rect = Rect::at(x - offset, y - offset)
            .of_size(width + (offset * 2) as u32, height + (offset * 2) as u32);
        draw_hollow_rect_mut(image, thick_rect, color);
    }
}
