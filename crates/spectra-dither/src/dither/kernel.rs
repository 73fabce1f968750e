//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: the neighbor at offset (dx, dy)
/// receives `error * weight / divisor`. Neighbors are always ahead in scan
/// order (`dy > 0`, or `dy == 0 && dx > 0`).
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, usize, u8)],
    pub divisor: u8,
    /// Deepest row the kernel reaches; a rolling buffer needs
    /// `max_dy + 1` rows.
    pub max_dy: usize,
}

/// Floyd-Steinberg: 100% of the error to four neighbors.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};

impl Kernel {
    /// Fraction of the error carried by entry weight `weight`.
    #[inline]
    pub fn fraction(&self, weight: u8) -> f32 {
        weight as f32 / self.divisor as f32
    }
}
