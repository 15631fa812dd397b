//! Pixel-budget dimension solving.
//!
//! Computes target dimensions whose product approximates a total pixel budget
//! while tracking the source aspect ratio, with both axes snapped to a grid
//! multiple (downstream models and encoders commonly require tile-aligned
//! dimensions). Pure geometry — no pixel operations, no allocations, `no_std`
//! compatible.
//!
//! # Example
//!
//! ```
//! use gridfit::{Budget, Size};
//!
//! let size = Budget::new().solve(1920, 1080);
//!
//! // ~1 megapixel, both axes multiples of 64, aspect ratio ≈ 16:9.
//! assert_eq!(size, Size::new(1344, 768));
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count.
    pub const fn pixels(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Pixel-budget constraint.
///
/// Describes the total pixel count to approximate and the grid both output
/// axes must divide evenly by. [`solve`](Self::solve) maps source dimensions
/// to the grid-aligned size whose product lands closest to the budget.
///
/// # Example
///
/// ```
/// use gridfit::{Budget, Size};
///
/// let size = Budget::new()
///     .target_pixels(250_000)
///     .grid(32)
///     .solve(1600, 900);
///
/// assert_eq!(size.width % 32, 0);
/// assert_eq!(size.height % 32, 0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Budget {
    /// Total pixel count to approximate.
    pub target_pixels: u32,
    /// Grid both output axes must be a multiple of.
    pub grid: u32,
}

impl Budget {
    /// Default pixel budget: one megapixel.
    pub const DEFAULT_TARGET_PIXELS: u32 = 1_000_000;
    /// Default grid multiple.
    pub const DEFAULT_GRID: u32 = 64;

    /// Create a budget with the default target (1 MP) and grid (64).
    pub const fn new() -> Self {
        Self {
            target_pixels: Self::DEFAULT_TARGET_PIXELS,
            grid: Self::DEFAULT_GRID,
        }
    }

    /// Set the total pixel count to approximate.
    pub const fn target_pixels(mut self, target_pixels: u32) -> Self {
        self.target_pixels = target_pixels;
        self
    }

    /// Set the grid multiple. Zero is treated as 1.
    pub const fn grid(mut self, grid: u32) -> Self {
        self.grid = grid;
        self
    }

    /// Solve for the grid-aligned size closest to the pixel budget.
    ///
    /// Both output axes are multiples of the grid and at least one grid step.
    /// Zero source dimensions degenerate to the minimal grid square.
    ///
    /// Two candidates are derived — one anchored on the ideal height, one on
    /// the ideal width — and the one whose pixel product deviates less from
    /// the budget wins. A single anchor-then-derive pass can snap both axes
    /// in directions that compound rounding error; racing both anchor orders
    /// bounds the worst case and symmetrizes portrait and landscape inputs.
    /// Ties keep the height-anchored candidate.
    pub fn solve(&self, source_w: u32, source_h: u32) -> Size {
        let grid = self.grid.max(1);
        if source_w == 0 || source_h == 0 {
            return Size::new(grid, grid);
        }

        let aspect = source_w as f64 / source_h as f64;
        let ideal_h = (self.target_pixels as f64 / aspect).sqrt();
        let ideal_w = ideal_h * aspect;

        let a = anchor_height(ideal_h, aspect, self.target_pixels, grid);
        let b = anchor_width(ideal_w, aspect, self.target_pixels, grid);

        if a.deviation <= b.deviation {
            a.size
        } else {
            b.size
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Internal geometry
// ============================================================================

/// One anchor-ordered solution and its distance from the pixel budget.
#[derive(Copy, Clone, Debug)]
struct Candidate {
    size: Size,
    deviation: u64,
}

impl Candidate {
    fn new(width: u32, height: u32, target_pixels: u32) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            deviation: size.pixels().abs_diff(target_pixels as u64),
        }
    }
}

/// Height-anchored candidate: round the ideal height, derive width from the
/// aspect ratio, snap both to the grid, then re-derive the axis that moved
/// more during snapping from the tighter axis' final value.
fn anchor_height(ideal_h: f64, aspect: f64, target_pixels: u32, grid: u32) -> Candidate {
    let h0 = round_dim(ideal_h);
    let w0 = round_dim(h0 as f64 * aspect);
    let mut h = snap_to_grid(h0 as f64, grid);
    let mut w = snap_to_grid(w0 as f64, grid);
    if h0.abs_diff(h) < w0.abs_diff(w) {
        // Height held its value through snapping — re-derive width from it.
        w = snap_to_grid(h as f64 * aspect, grid);
    } else {
        h = snap_to_grid(w as f64 / aspect, grid);
    }
    Candidate::new(w, h, target_pixels)
}

/// Width-anchored mirror of [`anchor_height`].
fn anchor_width(ideal_w: f64, aspect: f64, target_pixels: u32, grid: u32) -> Candidate {
    let w0 = round_dim(ideal_w);
    let h0 = round_dim(w0 as f64 / aspect);
    let mut w = snap_to_grid(w0 as f64, grid);
    let mut h = snap_to_grid(h0 as f64, grid);
    if w0.abs_diff(w) < h0.abs_diff(h) {
        h = snap_to_grid(w as f64 / aspect, grid);
    } else {
        w = snap_to_grid(h as f64 * aspect, grid);
    }
    Candidate::new(w, h, target_pixels)
}

/// Round to the nearest positive integer (half away from zero), at least 1.
fn round_dim(value: f64) -> u32 {
    // as-casts from f64 saturate, so extreme aspect ratios cap at u32::MAX.
    value.round().max(1.0) as u32
}

/// Snap to the nearest multiple of `grid`, never below one multiple.
///
/// `snap(v, m) = max(m, round(v / m) * m)`, rounding half away from zero.
/// The step count saturates so the product stays within `u32`.
fn snap_to_grid(value: f64, grid: u32) -> u32 {
    let steps = (value / grid as f64).round().max(1.0);
    let max_steps = (u32::MAX / grid) as f64;
    steps.min(max_steps) as u32 * grid
}
