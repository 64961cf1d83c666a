//! Rendering grids to images.
//!
//! Cell `(x, y)` becomes a `scale x scale` block whose top-left pixel is
//! `(x * scale, y * scale)`.

use crate::error::{ChromaError, Result};
use crate::som::vector::to_rgb8;
use crate::som::GridView;
use image::{imageops, ImageBuffer, Rgb, RgbImage};
use std::path::Path;

/// Pixel length of `cells` cells at `scale`, or an error if it does not
/// fit in a `u32`.
fn scaled_len(cells: usize, scale: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|c| c.checked_mul(scale))
        .ok_or_else(|| {
            ChromaError::Image(format!(
                "{} cells at scale {} exceed the maximum image size",
                cells, scale
            ))
        })
}

/// Renders a grid with each cell as a `scale x scale` block.
///
/// A scale of zero is treated as one. Fails if the image would be wider
/// or taller than `u32::MAX` pixels.
pub fn render_grid(view: &GridView, scale: u32) -> Result<RgbImage> {
    let scale = scale.max(1);
    let width = scaled_len(view.width, scale)?;
    let height = scaled_len(view.height, scale)?;

    Ok(ImageBuffer::from_fn(width, height, |px, py| {
        let x = (px / scale) as usize;
        let y = (py / scale) as usize;
        Rgb(to_rgb8(&view.get(x, y)))
    }))
}

/// Renders `before` and `after` side by side, separated by a black
/// gutter `gutter` pixels wide.
pub fn render_comparison(
    before: &GridView,
    after: &GridView,
    scale: u32,
    gutter: u32,
) -> Result<RgbImage> {
    let left_width = scaled_len(before.width, scale.max(1))?;
    let right_width = scaled_len(after.width, scale.max(1))?;
    let width = left_width
        .checked_add(gutter)
        .and_then(|w| w.checked_add(right_width))
        .ok_or_else(|| {
            ChromaError::Image(format!(
                "comparison of {} and {} cells at scale {} with a {} pixel gutter is too wide",
                before.width, after.width, scale, gutter
            ))
        })?;

    let left = render_grid(before, scale)?;
    let right = render_grid(after, scale)?;

    let height = left.height().max(right.height());
    let mut canvas: RgbImage = ImageBuffer::from_pixel(width, height, Rgb([0, 0, 0]));

    imageops::replace(&mut canvas, &left, 0, 0);
    imageops::replace(&mut canvas, &right, i64::from(left_width) + i64::from(gutter), 0);
    Ok(canvas)
}

/// Writes an image as PNG, creating parent directories as needed.
pub fn save_png<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_one() -> GridView {
        GridView {
            width: 2,
            height: 1,
            cells: vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    #[test]
    fn test_render_grid() {
        let img = render_grid(&two_by_one(), 3).unwrap();
        assert_eq!(img.dimensions(), (6, 3));
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(2, 2), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(3, 0), &Rgb([0, 0, 255]));
        assert_eq!(img.get_pixel(5, 2), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_zero_scale() {
        let img = render_grid(&two_by_one(), 0).unwrap();
        assert_eq!(img.dimensions(), (2, 1));
    }

    #[test]
    fn test_render_comparison() {
        let before = two_by_one();
        let after = GridView {
            width: 2,
            height: 1,
            cells: vec![[0.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
        };

        let img = render_comparison(&before, &after, 2, 5).unwrap();
        assert_eq!(img.dimensions(), (2 * 2 + 5 + 2 * 2, 2));
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(5, 1), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(9, 0), &Rgb([0, 255, 0]));
        assert_eq!(img.get_pixel(12, 1), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_oversized_render_is_an_error() {
        let view = GridView {
            width: 50,
            height: 50,
            cells: vec![[0.5, 0.5, 0.5]; 2500],
        };

        assert!(matches!(render_grid(&view, 100_000_000), Err(ChromaError::Image(_))));
        assert!(matches!(
            render_comparison(&view, &view, 100_000_000, 0),
            Err(ChromaError::Image(_))
        ));
        // Each pane fits on its own, the two plus the gutter do not
        assert!(matches!(
            render_comparison(&view, &view, u32::MAX / 60, 0),
            Err(ChromaError::Image(_))
        ));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("grid.png");

        save_png(&render_grid(&two_by_one(), 4).unwrap(), &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (8, 4));
        assert_eq!(loaded.get_pixel(7, 3), &Rgb([0, 0, 255]));
    }
}
