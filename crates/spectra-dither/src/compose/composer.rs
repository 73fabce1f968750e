use image::imageops;
use image::RgbImage;

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::error::{ConfigError, InputError};

use super::ResampleFilter;

/// Fits a source image inside a fixed-size frame ("contain").
///
/// The source keeps its aspect ratio. The side that is relatively larger
/// is scaled to fill the frame exactly, the other is scaled to match and
/// centered; the leftover border is filled with the background color.
///
/// ```
/// use image::RgbImage;
/// use spectra_dither::{FrameComposer, Rgb};
///
/// let composer = FrameComposer::new(100, 200, Rgb::WHITE).unwrap();
/// let canvas = composer.compose(&RgbImage::new(50, 50)).unwrap();
///
/// assert_eq!((canvas.width(), canvas.height()), (100, 200));
/// assert_eq!(canvas.get(0, 49), Some(Rgb::WHITE));
/// assert_eq!(canvas.get(0, 50), Some(Rgb::BLACK));
/// assert_eq!(canvas.get(0, 150), Some(Rgb::WHITE));
/// ```
#[derive(Debug, Clone)]
pub struct FrameComposer {
    width: u32,
    height: u32,
    background: Rgb,
    filter: ResampleFilter,
}

impl FrameComposer {
    pub fn new(width: u32, height: u32, background: Rgb) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            background,
            filter: ResampleFilter::default(),
        })
    }

    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Scale and center `source` on a new canvas of the frame's size.
    pub fn compose(&self, source: &RgbImage) -> Result<Canvas, InputError> {
        let (src_w, src_h) = source.dimensions();
        if src_w == 0 || src_h == 0 {
            return Err(InputError::ZeroArea {
                width: src_w,
                height: src_h,
            });
        }

        let (new_w, new_h) = contain_size(src_w, src_h, self.width, self.height);
        let left = (self.width - new_w) / 2;
        let top = (self.height - new_h) / 2;

        let resized;
        let scaled = if (new_w, new_h) == (src_w, src_h) {
            source
        } else {
            tracing::debug!(
                from = ?(src_w, src_h),
                to = ?(new_w, new_h),
                filter = %self.filter,
                "Resampling source"
            );
            resized = imageops::resize(source, new_w, new_h, self.filter.into());
            &resized
        };

        let background = self.background;
        Ok(Canvas::from_fn(self.width, self.height, |x, y| {
            if x >= left && x < left + new_w && y >= top && y < top + new_h {
                Rgb::from_bytes(scaled.get_pixel(x - left, y - top).0)
            } else {
                background
            }
        }))
    }
}

/// Size of `src` scaled to fit inside `target` with its aspect ratio kept.
///
/// The limiting side matches the target exactly; the other side is rounded
/// to the nearest pixel and never drops below 1.
pub fn contain_size(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> (u32, u32) {
    let (sw, sh, tw, th) = (
        src_w as u64,
        src_h as u64,
        target_w as u64,
        target_h as u64,
    );
    if sw * th >= sh * tw {
        // width-limited
        let h = (2 * sh * tw + sw) / (2 * sw);
        (target_w, h.clamp(1, th) as u32)
    } else {
        let w = (2 * sw * th + sh) / (2 * sh);
        (w.clamp(1, tw) as u32, target_h)
    }
}
