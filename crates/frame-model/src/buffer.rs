//! Dense RGBA8 pixel buffers.
//!
//! Buffers are row-major with four interleaved 8-bit channels per pixel.
//! The captured source frame is immutable for the life of a session;
//! distortion passes allocate a fresh destination each time and hand it
//! off exactly once.

use crate::FrameError;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// A dense row-major RGBA8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-initialized buffer (fully transparent black).
    ///
    /// Zero-sized dimensions are rejected; a buffer that exists is
    /// always addressable.
    pub fn new(width: u32, height: u32) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * CHANNELS],
        })
    }

    /// Allocate a buffer filled with a single RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, FrameError> {
        let mut buffer = Self::new(width, height)?;
        for chunk in buffer.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&rgba);
        }
        Ok(buffer)
    }

    /// Wrap existing RGBA bytes, validating the length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(FrameError::DataLengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether signed pixel coordinates fall inside the raster.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Byte offset of the pixel at `(x, y)`. Caller guarantees bounds.
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read the RGBA channels at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.offset(x, y);
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Write the RGBA channels at `(x, y)`. Out-of-bounds writes are
    /// ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.offset(x, y);
        self.data[idx..idx + CHANNELS].copy_from_slice(&rgba);
    }

    /// Copy the pixel at `(sx, sy)` in `source` into `(dx, dy)` here.
    ///
    /// All four channels are copied verbatim. Both coordinates must be
    /// in bounds; callers check with [`PixelBuffer::contains`] first.
    pub fn copy_pixel_from(&mut self, source: &PixelBuffer, sx: u32, sy: u32, dx: u32, dy: u32) {
        if let Some(rgba) = source.pixel(sx, sy) {
            self.set_pixel(dx, dy, rgba);
        }
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
