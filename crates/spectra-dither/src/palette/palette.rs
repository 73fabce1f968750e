//! Ordered, validated output palette.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::Rgb;

/// One palette color with its stable index and a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub index: u8,
    pub name: String,
    pub color: Rgb,
}

/// An ordered, immutable list of output colors.
///
/// The first [`anchor_count()`](Palette::anchor_count) entries are the
/// anchors: the colors the panel physically produces. Extended palettes
/// append synthetic shades after them. Indices are stable and fit in a `u8`,
/// so a palette holds at most 256 colors. Colors must be unique.
///
/// ```
/// use spectra_dither::{Palette, Rgb};
///
/// let bw = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(bw.len(), 2);
/// assert_eq!(bw.index_of(Rgb::WHITE), Some(1));
/// assert!(Palette::new(&[]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    anchor_count: usize,
}

impl Palette {
    /// Build an anchors-only palette from unnamed colors.
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        let named: Vec<(String, Rgb)> = colors
            .iter()
            .enumerate()
            .map(|(i, &c)| (format!("color-{i}"), c))
            .collect();
        Self::with_names(&named)
    }

    /// Build an anchors-only palette from `(name, color)` pairs.
    pub fn with_names<S: AsRef<str>>(named: &[(S, Rgb)]) -> Result<Self, PaletteError> {
        let entries = Self::entries_from(named, 0);
        validate(&entries)?;
        let anchor_count = entries.len();
        Ok(Self {
            entries,
            anchor_count,
        })
    }

    /// Parse a palette from hex strings (`#RRGGBB` or `#RGB`).
    pub fn from_hex(hex: &[&str]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| {
                s.parse::<Rgb>().map_err(|source| PaletteError::ParseColor {
                    value: (*s).to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    /// A new palette with `extra` appended after the existing entries.
    ///
    /// Anchors keep their indices and the anchor count is unchanged.
    pub fn extend<S: AsRef<str>>(&self, extra: &[(S, Rgb)]) -> Result<Self, PaletteError> {
        let mut entries = self.entries.clone();
        entries.extend(Self::entries_from(extra, entries.len()));
        validate(&entries)?;
        Ok(Self {
            entries,
            anchor_count: self.anchor_count,
        })
    }

    /// A palette restricted to the given indices, in their original order.
    ///
    /// Duplicated indices are ignored. Used to narrow a calibrated palette,
    /// for example to black and white only.
    pub fn subset(&self, indices: &[usize]) -> Result<Self, PaletteError> {
        let mut picked: Vec<usize> = indices.to_vec();
        picked.sort_unstable();
        picked.dedup();
        if let Some(&bad) = picked.iter().find(|&&i| i >= self.entries.len()) {
            return Err(PaletteError::IndexOutOfRange {
                index: bad,
                len: self.entries.len(),
            });
        }
        if picked.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let anchor_count = picked.iter().filter(|&&i| i < self.anchor_count).count();
        let entries = picked
            .iter()
            .enumerate()
            .map(|(new_index, &old)| PaletteEntry {
                index: new_index as u8,
                ..self.entries[old].clone()
            })
            .collect();
        Ok(Self {
            entries,
            anchor_count,
        })
    }

    /// Construct from known-good constants without validation.
    pub(crate) fn from_trusted(anchors: &[(&str, Rgb)], extended: &[(&str, Rgb)]) -> Self {
        let mut entries = Self::entries_from(anchors, 0);
        entries.extend(Self::entries_from(extended, anchors.len()));
        debug_assert!(validate(&entries).is_ok(), "built-in palette is invalid");
        Self {
            entries,
            anchor_count: anchors.len(),
        }
    }

    fn entries_from<S: AsRef<str>>(named: &[(S, Rgb)], first_index: usize) -> Vec<PaletteEntry> {
        named
            .iter()
            .enumerate()
            .map(|(i, (name, color))| PaletteEntry {
                // out-of-range indices are caught by validate()
                index: (first_index + i) as u8,
                name: name.as_ref().to_string(),
                color: *color,
            })
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    /// Color at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn color(&self, index: usize) -> Rgb {
        self.entries[index].color
    }

    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.entries.iter().map(|e| e.color)
    }

    #[inline]
    pub fn anchor_count(&self) -> usize {
        self.anchor_count
    }

    #[inline]
    pub fn anchors(&self) -> &[PaletteEntry] {
        &self.entries[..self.anchor_count]
    }

    pub fn index_of(&self, color: Rgb) -> Option<usize> {
        self.entries.iter().position(|e| e.color == color)
    }

    pub fn contains(&self, color: Rgb) -> bool {
        self.index_of(color).is_some()
    }
}

fn validate(entries: &[PaletteEntry]) -> Result<(), PaletteError> {
    if entries.is_empty() {
        return Err(PaletteError::EmptyPalette);
    }
    if entries.len() > 256 {
        return Err(PaletteError::TooManyColors {
            count: entries.len(),
        });
    }
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if !seen.insert(entry.color) {
            return Err(PaletteError::DuplicateColor {
                index,
                color: entry.color,
            });
        }
    }
    Ok(())
}
