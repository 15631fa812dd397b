//! Resampler seam and CPU reference kernels.
//!
//! The batch loop never touches pixels directly; it builds a
//! [`ResampleRequest`] and hands a channel-first view to a [`Resampler`].
//! [`CpuResampler`] is the reference implementation: separable convolution
//! for the bilinear/bicubic filters (with PIL-style widened kernels when
//! antialiasing), box averaging for area, and index mapping for nearest.

use alloc::vec::Vec;

use ndarray::{Array3, ArrayView3};
#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::budget::Size;
use crate::filter::Filter;

/// What the batch loop asks the resample primitive to do.
///
/// [`new`](Self::new) applies the gating rules: `align_corners` is unset for
/// nearest and `false` otherwise, and antialiasing is requested only for the
/// convolution filters on a strict downscale of both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResampleRequest {
    /// Dimensions to resample to.
    pub target: Size,
    /// Interpolation filter.
    pub filter: Filter,
    /// Corner-alignment coordinate transform. `None` leaves the choice to
    /// the primitive (half-pixel for [`CpuResampler`]); the area filter
    /// ignores it.
    pub align_corners: Option<bool>,
    /// Widen the kernel to low-pass the source while downscaling.
    pub antialias: bool,
}

impl ResampleRequest {
    /// Build a request for resampling `source`-sized pixels to `target`.
    pub fn new(filter: Filter, source: Size, target: Size) -> Self {
        let antialias = filter.supports_antialias()
            && target.width < source.width
            && target.height < source.height;
        Self {
            target,
            filter,
            align_corners: filter.align_corners(),
            antialias,
        }
    }
}

/// Resample failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResampleError {
    /// Source has a zero-sized height or width plane.
    ZeroSourceDimension,
    /// Requested target width or height is zero.
    ZeroTargetDimension,
}

/// The external interpolation primitive.
///
/// `source` is channel-first `(channels, height, width)`; the output has the
/// same channel count at the request's target `(channels, target_h, target_w)`.
/// Implementations either succeed or fail the whole invocation — partial
/// output is never produced.
pub trait Resampler {
    /// Resample one image to the requested size.
    fn resample(
        &self,
        source: ArrayView3<'_, f32>,
        request: &ResampleRequest,
    ) -> Result<Array3<f32>, ResampleError>;
}

/// Synchronous CPU resampler.
///
/// Coordinate transform is half-pixel (`src = (dst + 0.5) · in/out`) unless
/// the request sets `align_corners`, in which case `src = dst · (in−1)/(out−1)`.
/// Edge windows renormalize over the in-bounds taps. Output values are not
/// clamped, so bicubic overshoot is preserved.
#[derive(Copy, Clone, Debug, Default)]
pub struct CpuResampler;

impl Resampler for CpuResampler {
    fn resample(
        &self,
        source: ArrayView3<'_, f32>,
        request: &ResampleRequest,
    ) -> Result<Array3<f32>, ResampleError> {
        let (_, in_h, in_w) = source.dim();
        if in_h == 0 || in_w == 0 {
            return Err(ResampleError::ZeroSourceDimension);
        }
        if request.target.width == 0 || request.target.height == 0 {
            return Err(ResampleError::ZeroTargetDimension);
        }

        let align = request.align_corners == Some(true);
        let out = match request.filter {
            Filter::Nearest => nearest(source, request.target),
            Filter::Area => area(source, request.target),
            Filter::Bilinear => separable(
                source,
                request.target,
                align,
                request.antialias,
                triangle_kernel,
                1.0,
            ),
            Filter::Bicubic => separable(
                source,
                request.target,
                align,
                request.antialias,
                cubic_kernel,
                2.0,
            ),
        };
        Ok(out)
    }
}

// ============================================================================
// Kernels
// ============================================================================

/// Triangle (tent) kernel: `max(0, 1 - |x|)`.
fn triangle_kernel(x: f32) -> f32 {
    let x = x.abs();
    if x < 1.0 { 1.0 - x } else { 0.0 }
}

/// Cubic convolution kernel, `a = -0.75`.
fn cubic_kernel(x: f32) -> f32 {
    const A: f32 = -0.75;
    let x = x.abs();
    if x < 1.0 {
        ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        (((x - 5.0) * x + 8.0) * x - 4.0) * A
    } else {
        0.0
    }
}

/// Contribution window of one output position along one axis.
struct AxisTap {
    start: usize,
    weights: Vec<f32>,
}

/// Precompute per-output-position source windows and normalized weights for
/// one axis.
///
/// With antialiasing the kernel footprint widens by `max(scale, 1)` so that
/// every source sample under the output pixel contributes while downscaling.
fn axis_taps(
    in_len: usize,
    out_len: usize,
    align_corners: bool,
    antialias: bool,
    kernel: fn(f32) -> f32,
    base_support: f32,
) -> Vec<AxisTap> {
    let align = align_corners && out_len > 1;
    let scale = if align {
        (in_len - 1) as f32 / (out_len - 1) as f32
    } else {
        in_len as f32 / out_len as f32
    };
    let filterscale = if antialias { scale.max(1.0) } else { 1.0 };
    let support = base_support * filterscale;

    (0..out_len)
        .map(|i| {
            // Window center in pixel-center coordinates of the source axis.
            let center = if align {
                i as f32 * scale + 0.5
            } else {
                (i as f32 + 0.5) * scale
            };
            let lo = ((center - support + 0.5).floor() as isize).clamp(0, in_len as isize - 1);
            let hi = (((center + support + 0.5).floor() as isize).min(in_len as isize))
                .max(lo + 1);
            let (lo, hi) = (lo as usize, hi as usize);

            let mut weights: Vec<f32> = (lo..hi)
                .map(|x| kernel((x as f32 + 0.5 - center) / filterscale))
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum.abs() > f32::EPSILON {
                for w in &mut weights {
                    *w /= sum;
                }
            } else {
                // Every tap landed on a kernel zero; keep the middle one.
                let mid = weights.len() / 2;
                for w in &mut weights {
                    *w = 0.0;
                }
                weights[mid] = 1.0;
            }
            AxisTap { start: lo, weights }
        })
        .collect()
}

/// Two-pass separable resample: horizontal into `(C, in_h, out_w)`, then
/// vertical into the target.
fn separable(
    source: ArrayView3<'_, f32>,
    target: Size,
    align_corners: bool,
    antialias: bool,
    kernel: fn(f32) -> f32,
    support: f32,
) -> Array3<f32> {
    let (channels, in_h, in_w) = source.dim();
    let out_h = target.height as usize;
    let out_w = target.width as usize;

    let x_taps = axis_taps(in_w, out_w, align_corners, antialias, kernel, support);
    let mut mid = Array3::<f32>::zeros((channels, in_h, out_w));
    for c in 0..channels {
        for y in 0..in_h {
            for (ox, tap) in x_taps.iter().enumerate() {
                let mut acc = 0.0;
                for (k, &w) in tap.weights.iter().enumerate() {
                    acc += source[[c, y, tap.start + k]] * w;
                }
                mid[[c, y, ox]] = acc;
            }
        }
    }

    let y_taps = axis_taps(in_h, out_h, align_corners, antialias, kernel, support);
    let mut out = Array3::<f32>::zeros((channels, out_h, out_w));
    for c in 0..channels {
        for (oy, tap) in y_taps.iter().enumerate() {
            for ox in 0..out_w {
                let mut acc = 0.0;
                for (k, &w) in tap.weights.iter().enumerate() {
                    acc += mid[[c, tap.start + k, ox]] * w;
                }
                out[[c, oy, ox]] = acc;
            }
        }
    }
    out
}

/// Nearest source sample per output position: `src = floor(dst · in/out)`.
fn nearest(source: ArrayView3<'_, f32>, target: Size) -> Array3<f32> {
    let (channels, in_h, in_w) = source.dim();
    let out_h = target.height as usize;
    let out_w = target.width as usize;
    let sy = in_h as f32 / out_h as f32;
    let sx = in_w as f32 / out_w as f32;
    Array3::from_shape_fn((channels, out_h, out_w), |(c, y, x)| {
        let iy = ((y as f32 * sy) as usize).min(in_h - 1);
        let ix = ((x as f32 * sx) as usize).min(in_w - 1);
        source[[c, iy, ix]]
    })
}

/// Box average over each output position's source footprint, with the
/// adaptive-pooling boundaries `floor(i·in/out) .. ceil((i+1)·in/out)`.
fn area(source: ArrayView3<'_, f32>, target: Size) -> Array3<f32> {
    let (channels, in_h, in_w) = source.dim();
    let out_h = target.height as usize;
    let out_w = target.width as usize;
    Array3::from_shape_fn((channels, out_h, out_w), |(c, oy, ox)| {
        let y0 = oy * in_h / out_h;
        let y1 = ((oy + 1) * in_h).div_ceil(out_h);
        let x0 = ox * in_w / out_w;
        let x1 = ((ox + 1) * in_w).div_ceil(out_w);
        let mut acc = 0.0;
        for y in y0..y1 {
            for x in x0..x1 {
                acc += source[[c, y, x]];
            }
        }
        acc / ((y1 - y0) * (x1 - x0)) as f32
    })
}
