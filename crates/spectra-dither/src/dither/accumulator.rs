//! Storage for quantization error waiting to be applied.

use std::fmt;
use std::str::FromStr;

use crate::color::Rgbf;
use crate::error::ParseOptionError;

/// Per-pixel error carried forward during one dithering pass.
///
/// The ditherer reads the current row with
/// [`accumulated`](Self::accumulated), pushes error ahead with
/// [`add`](Self::add) and calls [`advance_row`](Self::advance_row) once a
/// row is finished.
pub trait ErrorAccumulator {
    /// Error accumulated so far for column `x` of the current row.
    fn accumulated(&self, x: usize) -> Rgbf;

    /// Add `error` to column `x`, `row_offset` rows below the current one.
    /// Out-of-range targets are ignored.
    fn add(&mut self, x: usize, row_offset: usize, error: Rgbf);

    fn advance_row(&mut self);
}

/// Which [`ErrorAccumulator`] a ditherer allocates.
///
/// Both produce identical output; they only differ in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccumulatorMode {
    /// `depth` rows of error, reused as the scan moves down. O(width).
    #[default]
    Rolling,
    /// One error cell per pixel. O(width * height).
    FullFrame,
}

impl FromStr for AccumulatorMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rolling" => Ok(Self::Rolling),
            "full-frame" | "full" => Ok(Self::FullFrame),
            _ => Err(ParseOptionError::new(
                "accumulator",
                s,
                "rolling, full-frame",
            )),
        }
    }
}

impl fmt::Display for AccumulatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rolling => "rolling",
            Self::FullFrame => "full-frame",
        })
    }
}

/// Sliding window of error rows.
///
/// `rows[0]` is the current row, `rows[1]` the next, and so on. Advancing
/// rotates the window and zeroes the row that falls off the front.
#[derive(Debug)]
pub struct RollingErrorBuffer {
    rows: Vec<Vec<Rgbf>>,
    width: usize,
}

impl RollingErrorBuffer {
    /// `depth` is the kernel's `max_dy + 1`.
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            rows: (0..depth).map(|_| vec![Rgbf::ZERO; width]).collect(),
            width,
        }
    }
}

impl ErrorAccumulator for RollingErrorBuffer {
    #[inline]
    fn accumulated(&self, x: usize) -> Rgbf {
        self.rows[0][x]
    }

    #[inline]
    fn add(&mut self, x: usize, row_offset: usize, error: Rgbf) {
        if x < self.width && row_offset < self.rows.len() {
            self.rows[row_offset][x] += error;
        }
    }

    fn advance_row(&mut self) {
        // [0,1,2] -> [1,2,0], then clear the recycled row
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill(Rgbf::ZERO);
        }
    }
}

/// One error cell for every pixel of the frame.
#[derive(Debug)]
pub struct FullFrameErrorBuffer {
    cells: Vec<Rgbf>,
    width: usize,
    height: usize,
    row: usize,
}

impl FullFrameErrorBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Rgbf::ZERO; width * height],
            width,
            height,
            row: 0,
        }
    }
}

impl ErrorAccumulator for FullFrameErrorBuffer {
    #[inline]
    fn accumulated(&self, x: usize) -> Rgbf {
        self.cells[self.row * self.width + x]
    }

    #[inline]
    fn add(&mut self, x: usize, row_offset: usize, error: Rgbf) {
        let y = self.row + row_offset;
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] += error;
        }
    }

    fn advance_row(&mut self) {
        self.row += 1;
    }
}
