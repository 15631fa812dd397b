//! Per-item batch resize loop over 4-D image arrays.
//!
//! Batches are `(batch, height, width, channels)` with `f32` samples. The
//! boundary is dynamic-rank: anything that is not a rank-4 array, or has no
//! batch slots, passes through unchanged rather than erroring — node hosts
//! forward foreign values and expect them back intact.

use alloc::vec::Vec;

use ndarray::{Array3, Array4, ArrayD, ArrayView3, Ix4};

use crate::budget::{Budget, Size};
use crate::filter::Filter;
use crate::resample::{ResampleError, ResampleRequest, Resampler};

/// Resize a batch using a host-supplied interpolation mode string.
///
/// Unrecognized mode strings fall back to bicubic; everything else behaves
/// like [`resize_batch`].
///
/// # Example
///
/// ```
/// use gridfit::{Budget, CpuResampler, resize_to_budget};
/// use ndarray::ArrayD;
///
/// let batch = ArrayD::<f32>::zeros(vec![1, 512, 512, 3]);
/// let out = resize_to_budget(&batch, "Bilinear", &Budget::new(), &CpuResampler).unwrap();
/// assert_eq!(out.shape(), &[1, 1024, 1024, 3]);
/// ```
pub fn resize_to_budget<R: Resampler>(
    image: &ArrayD<f32>,
    mode: &str,
    budget: &Budget,
    resampler: &R,
) -> Result<ArrayD<f32>, ResampleError> {
    resize_batch(image, Filter::parse(mode), budget, resampler)
}

/// Resize every batch slot to its solved pixel-budget dimensions.
///
/// Slots are processed independently, in order. A slot whose solved size
/// equals its current size is copied through untouched. The input is never
/// mutated.
pub fn resize_batch<R: Resampler>(
    image: &ArrayD<f32>,
    filter: Filter,
    budget: &Budget,
    resampler: &R,
) -> Result<ArrayD<f32>, ResampleError> {
    let Ok(batch) = image.view().into_dimensionality::<Ix4>() else {
        return Ok(image.clone());
    };
    let items = batch.dim().0;
    if items == 0 {
        return Ok(image.clone());
    }

    let mut resized = Vec::with_capacity(items);
    for item in batch.outer_iter() {
        resized.push(resize_image(item, filter, budget, resampler)?);
    }

    // Every slot of a rank-4 batch shares (height, width), so the solver
    // lands on one target and the slots reassemble into a rank-4 array.
    let (out_h, out_w, channels) = resized[0].dim();
    let mut out = Array4::<f32>::zeros((items, out_h, out_w, channels));
    for (mut slot, item) in out.outer_iter_mut().zip(&resized) {
        slot.assign(item);
    }
    Ok(out.into_dyn())
}

/// Resize one `(height, width, channels)` image to its solved dimensions.
///
/// This is the per-slot operation of [`resize_batch`]; callers with
/// heterogeneously sized images invoke it directly per image.
pub fn resize_image<R: Resampler>(
    image: ArrayView3<'_, f32>,
    filter: Filter,
    budget: &Budget,
    resampler: &R,
) -> Result<Array3<f32>, ResampleError> {
    let (h, w, _) = image.dim();
    let source = Size::new(w as u32, h as u32);
    let target = budget.solve(source.width, source.height);
    if target == source {
        return Ok(image.to_owned());
    }

    let request = ResampleRequest::new(filter, source, target);
    let planar = image.permuted_axes([2, 0, 1]);
    let resized = resampler.resample(planar, &request)?;
    Ok(resized
        .permuted_axes([1, 2, 0])
        .as_standard_layout()
        .to_owned())
}
