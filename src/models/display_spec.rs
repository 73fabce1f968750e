/// Panel geometry for the supported Spectra 6 frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySpec {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl DisplaySpec {
    /// Waveshare 7.3" Spectra 6 (HAT E): 800x480
    pub const SPECTRA6_7IN3: Self = Self {
        name: "spectra6-7in3",
        width: 800,
        height: 480,
    };

    /// Waveshare 13.3" Spectra 6: 1200x1600
    pub const SPECTRA6_13IN3: Self = Self {
        name: "spectra6-13in3",
        width: 1200,
        height: 1600,
    };

    pub const ALL: [Self; 2] = [Self::SPECTRA6_7IN3, Self::SPECTRA6_13IN3];

    /// Look up a model by name. Waveshare driver names are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "spectra6-7in3" | "epd7in3e" => Some(Self::SPECTRA6_7IN3),
            "spectra6-13in3" | "epd13in3e" => Some(Self::SPECTRA6_13IN3),
            _ => None,
        }
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|spec| spec.name)
    }
}

impl Default for DisplaySpec {
    fn default() -> Self {
        Self::SPECTRA6_7IN3
    }
}
