use glam::Vec2;
use image::{DynamicImage, GenericImageView};

use crate::analysis::bbox::Bbox;

/// Crops `bbox` grown by `margin` out of `image`.
///
/// The grown box is clamped to the image and its corners are truncated to
/// whole pixels. A box with no pixels left yields a 1×1 image.
pub fn crop_image_region(image: &DynamicImage, bbox: &Bbox, margin: f32) -> DynamicImage {
    let (image_width, image_height) = image.dimensions();
    let framed = bbox.expand_within(margin, Vec2::new(image_width as f32, image_height as f32));

    let x = framed.min.x as u32;
    let y = framed.min.y as u32;
    let width = (framed.max.x as u32)
        .saturating_sub(x)
        .min(image_width.saturating_sub(x));
    let height = (framed.max.y as u32)
        .saturating_sub(y)
        .min(image_height.saturating_sub(y));

    if width == 0 || height == 0 {
        return DynamicImage::new_rgb8(1, 1);
    }

    image.crop_imm(x, y, width, height)
}

/// One crop per text box, in the order given.
pub fn crop_text_boxes(image: &DynamicImage, text_boxes: &[Bbox], margin: f32) -> Vec<DynamicImage> {
    text_boxes
        .iter()
        .map(|bbox| crop_image_region(image, bbox, margin))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CROP_MARGIN;

    fn bbox(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Bbox {
        Bbox::from([x_min, y_min, x_max, y_max])
    }

    #[test]
    fn test_crop_adds_margin() {
        let image = DynamicImage::new_rgb8(200, 100);

        let crop = crop_image_region(&image, &bbox(20.0, 30.0, 60.0, 50.0), CROP_MARGIN);
        assert_eq!(crop.dimensions(), (44, 24));
    }

    #[test]
    fn test_crop_clamps_to_image_bounds() {
        let image = DynamicImage::new_rgb8(200, 100);

        // Touches the top-left corner
        let crop = crop_image_region(&image, &bbox(0.0, 1.0, 30.0, 20.0), CROP_MARGIN);
        assert_eq!(crop.dimensions(), (32, 22));

        // Runs past the bottom-right corner
        let crop = crop_image_region(&image, &bbox(180.0, 90.0, 230.0, 130.0), CROP_MARGIN);
        assert_eq!(crop.dimensions(), (22, 12));
    }

    #[test]
    fn test_crop_truncates_to_whole_pixels() {
        let image = DynamicImage::new_rgb8(200, 100);

        // (7.7, 7.2)..(50.9, 30.6) frames to (5.7, 5.2)..(52.9, 32.6)
        let crop = crop_image_region(&image, &bbox(7.7, 7.2, 50.9, 30.6), CROP_MARGIN);
        assert_eq!(crop.dimensions(), (47, 27));
    }

    #[test]
    fn test_crop_degenerate_region() {
        let image = DynamicImage::new_rgb8(200, 100);

        // Entirely outside the image
        let crop = crop_image_region(&image, &bbox(300.0, 300.0, 320.0, 320.0), CROP_MARGIN);
        assert_eq!(crop.dimensions(), (1, 1));

        // Zero-size box without margin
        let crop = crop_image_region(&image, &bbox(40.0, 40.0, 40.0, 40.0), 0.0);
        assert_eq!(crop.dimensions(), (1, 1));
    }

    #[test]
    fn test_crop_text_boxes_keeps_order() {
        let image = DynamicImage::new_rgb8(200, 100);
        let boxes = vec![bbox(10.0, 10.0, 20.0, 20.0), bbox(50.0, 50.0, 90.0, 60.0)];

        let crops = crop_text_boxes(&image, &boxes, CROP_MARGIN);
        let sizes: Vec<(u32, u32)> = crops.iter().map(|c| c.dimensions()).collect();
        assert_eq!(sizes, vec![(14, 14), (44, 14)]);
    }
}
