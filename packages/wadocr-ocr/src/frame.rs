use std::io::Cursor;

use image::{GrayImage, ImageFormat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame dimensions {rows}x{cols} do not match buffer length {len}")]
    DimensionMismatch { rows: u32, cols: u32, len: usize },
    #[error("empty crop rectangle {0:?}")]
    EmptyRect(Rect),
    #[error("rectangle {rect:?} exceeds frame bounds {rows}x{cols}")]
    OutOfBounds { rect: Rect, rows: u32, cols: u32 },
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Axis-aligned rectangle, x/y addressing columns/rows of a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Swaps the axes of the rectangle: `(x, y, w, h)` becomes
    /// `(y, x, h, w)`. Used for rectangles configured against a plotting
    /// convention whose first axis is the image row axis.
    pub fn transposed(&self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            w: self.h,
            h: self.w,
        }
    }
}

/// One 8-bit grayscale image frame, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    rows: u32,
    cols: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(rows: u32, cols: u32, data: Vec<u8>) -> Result<Self, FrameError> {
        if data.len() != (rows as usize) * (cols as usize) {
            return Err(FrameError::DimensionMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copies out the sub-frame covered by `rect` (x/w along columns,
    /// y/h along rows). Rectangles reaching past either edge are an error;
    /// nothing is clamped.
    pub fn crop(&self, rect: Rect) -> Result<Frame, FrameError> {
        if rect.w == 0 || rect.h == 0 {
            return Err(FrameError::EmptyRect(rect));
        }
        let right = rect.x.checked_add(rect.w);
        let bottom = rect.y.checked_add(rect.h);
        match (right, bottom) {
            (Some(r), Some(b)) if r <= self.cols && b <= self.rows => {}
            _ => {
                return Err(FrameError::OutOfBounds {
                    rect,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }

        let mut data = Vec::with_capacity((rect.w as usize) * (rect.h as usize));
        for row in rect.y..rect.y + rect.h {
            let start = (row as usize) * (self.cols as usize) + rect.x as usize;
            data.extend_from_slice(&self.data[start..start + rect.w as usize]);
        }
        Ok(Frame {
            rows: rect.h,
            cols: rect.w,
            data,
        })
    }

    /// Encodes the frame as PNG, the interchange format handed to OCR
    /// backends that consume encoded images.
    pub fn to_png(&self) -> Result<Vec<u8>, FrameError> {
        let img = GrayImage::from_raw(self.cols, self.rows, self.data.clone())
            .ok_or(FrameError::DimensionMismatch {
                rows: self.rows,
                cols: self.cols,
                len: self.data.len(),
            })?;
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    pub fn to_gray_image(&self) -> Result<GrayImage, FrameError> {
        GrayImage::from_raw(self.cols, self.rows, self.data.clone()).ok_or(
            FrameError::DimensionMismatch {
                rows: self.rows,
                cols: self.cols,
                len: self.data.len(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(rows: u32, cols: u32) -> Frame {
        let data: Vec<u8> = (0..rows * cols).map(|i| (i % 251) as u8).collect();
        Frame::new(rows, cols, data).unwrap()
    }

    #[test]
    fn test_new_rejects_mismatched_buffer() {
        assert!(matches!(
            Frame::new(4, 4, vec![0; 15]),
            Err(FrameError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_crop_copies_expected_pixels() {
        // 3x4 frame with distinct values per cell.
        let frame = Frame::new(3, 4, (0..12).collect()).unwrap();
        let crop = frame.crop(Rect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(crop.rows(), 2);
        assert_eq!(crop.cols(), 2);
        assert_eq!(crop.data(), &[5, 6, 9, 10]);
    }

    #[test]
    fn test_crop_full_frame_is_identity() {
        let frame = gradient_frame(5, 7);
        let crop = frame.crop(Rect::new(0, 0, 7, 5)).unwrap();
        assert_eq!(crop, frame);
    }

    #[test]
    fn test_crop_out_of_bounds_fails() {
        let frame = gradient_frame(10, 10);
        let err = frame.crop(Rect::new(5, 0, 6, 5)).unwrap_err();
        assert!(matches!(err, FrameError::OutOfBounds { .. }));
        let err = frame.crop(Rect::new(0, 8, 2, 3)).unwrap_err();
        assert!(matches!(err, FrameError::OutOfBounds { .. }));
    }

    #[test]
    fn test_crop_overflowing_rect_fails() {
        let frame = gradient_frame(10, 10);
        let err = frame.crop(Rect::new(u32::MAX, 0, 2, 2)).unwrap_err();
        assert!(matches!(err, FrameError::OutOfBounds { .. }));
    }

    #[test]
    fn test_crop_empty_rect_fails() {
        let frame = gradient_frame(10, 10);
        assert!(matches!(
            frame.crop(Rect::new(0, 0, 0, 5)),
            Err(FrameError::EmptyRect(_))
        ));
    }

    #[test]
    fn test_transposed_swaps_axes() {
        let rect = Rect::new(5, 20, 50, 8);
        assert_eq!(rect.transposed(), Rect::new(20, 5, 8, 50));
    }

    #[test]
    fn test_png_round_trip() {
        let frame = gradient_frame(6, 9);
        let png = frame.to_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(decoded.width(), 9);
        assert_eq!(decoded.height(), 6);
        assert_eq!(decoded.as_raw().as_slice(), frame.data());
    }
}
