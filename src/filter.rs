//! Interpolation filter set and host-string normalization.
//!
//! Hosts hand filters around as strings; [`Filter::parse`] folds case and
//! whitespace and falls back to the default rather than erroring, matching
//! the lenient contract of node-graph hosts.

/// Interpolation filter for resampling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Box averaging over the source footprint of each output pixel.
    /// Downscale-oriented; behaves like adaptive average pooling.
    Area,
    /// Cubic convolution, support 2. The default.
    #[default]
    Bicubic,
    /// Triangle (tent) kernel, support 1.
    Bilinear,
    /// Nearest source sample, no filtering.
    Nearest,
}

impl Filter {
    /// Parse a filter name. Returns `None` for unrecognized names.
    ///
    /// Matching is ASCII case-insensitive and ignores surrounding whitespace.
    pub fn from_name(value: &str) -> Option<Self> {
        let v = value.trim();
        if v.eq_ignore_ascii_case("area") {
            Some(Self::Area)
        } else if v.eq_ignore_ascii_case("bicubic") {
            Some(Self::Bicubic)
        } else if v.eq_ignore_ascii_case("bilinear") {
            Some(Self::Bilinear)
        } else if v.eq_ignore_ascii_case("nearest") {
            Some(Self::Nearest)
        } else {
            None
        }
    }

    /// Parse a filter name, falling back to [`Filter::Bicubic`] for anything
    /// unrecognized.
    pub fn parse(value: &str) -> Self {
        Self::from_name(value).unwrap_or_default()
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Bicubic => "bicubic",
            Self::Bilinear => "bilinear",
            Self::Nearest => "nearest",
        }
    }

    /// The `align_corners` value to hand the resample primitive.
    ///
    /// Unset for nearest; `false` for every other filter. The area kernel
    /// ignores the flag.
    pub const fn align_corners(self) -> Option<bool> {
        match self {
            Self::Nearest => None,
            _ => Some(false),
        }
    }

    /// Whether the filter has an antialiased (widened-kernel) variant.
    /// Only the convolution filters do.
    pub const fn supports_antialias(self) -> bool {
        matches!(self, Self::Bicubic | Self::Bilinear)
    }
}
