//! Image file output.
//!
//! Converts the renderer's linear f32 HDR buffer to disk formats: 8-bit PNG
//! with gamma compression, or EXR with the linear values preserved. The
//! driver picks the format from the output extension.

use image::{ImageBuffer, Rgb};
use log::info;
use std::path::Path;

/// Errors surfaced by the save functions; the driver reports and exits.
pub type SaveError = Box<dyn std::error::Error + Send + Sync>;

/// Quantize one linear channel to 8 bits.
///
/// Clamps to [0, 1], applies gamma-2 compression (sqrt), then scales and
/// truncates. The cast saturates, so overbright values pin at 255 instead of
/// wrapping.
fn to_u8(linear: f32) -> u8 {
    (255.99 * linear.clamp(0.0, 1.0).sqrt()) as u8
}

fn ensure_parent_dir(path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Save the HDR buffer as an 8-bit gamma-compressed PNG.
///
/// Rows are written top to bottom with interleaved RGB channels. The output
/// directory is created if missing.
pub fn save_image_as_png(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
) -> Result<(), SaveError> {
    ensure_parent_dir(output_path)?;

    let (width, height) = image.dimensions();
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([to_u8(pixel[0]), to_u8(pixel[1]), to_u8(pixel[2])])
    });

    u8_image.save(output_path)?;
    info!("Image saved as {}", output_path);
    Ok(())
}

/// Save the HDR buffer as an EXR with full linear f32 precision.
///
/// No tone mapping or gamma is applied; this is the archival form for
/// post-processing workflows.
pub fn save_image_as_exr(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
) -> Result<(), SaveError> {
    ensure_parent_dir(output_path)?;

    let (width, height) = image.dimensions();
    exr::prelude::write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;

    info!("HDR image saved as EXR: {}", output_path);
    Ok(())
}
