pub mod distort;
pub mod simulate;

use std::path::Path;

use palmwarp_frame_model::PixelBuffer;

/// Decode an image file into an RGBA pixel buffer.
pub fn load_buffer(path: &Path) -> anyhow::Result<PixelBuffer> {
    let decoded = image::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    PixelBuffer::from_raw(width, height, decoded.into_raw())
        .map_err(|e| anyhow::anyhow!("Decoded image is not a valid buffer: {e}"))
}

/// Encode a pixel buffer as PNG.
pub fn save_buffer(buffer: &PixelBuffer, path: &Path) -> anyhow::Result<()> {
    let image = image::RgbaImage::from_raw(
        buffer.width(),
        buffer.height(),
        buffer.data().to_vec(),
    )
    .ok_or_else(|| anyhow::anyhow!("Buffer does not form a valid image"))?;
    image
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
    Ok(())
}
