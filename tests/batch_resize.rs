//! End-to-end batch behavior, including what the batch loop asks of the
//! resample primitive.
//!
//! A recording resampler sits at the [`Resampler`] seam and captures every
//! [`ResampleRequest`] so the align-corners and antialias gating can be
//! observed exactly as an external primitive would see it.

use std::cell::RefCell;

use gridfit::{
    Budget, CpuResampler, Filter, ResampleError, ResampleRequest, Resampler, Size,
    resize_batch, resize_image, resize_to_budget,
};
use ndarray::{Array3, ArrayD, ArrayView3, Axis};

// ---- Recording seam ----

/// Captures requests and returns zeros of the requested shape, so gating can
/// be asserted without doing pixel work.
#[derive(Default)]
struct RecordingResampler {
    requests: RefCell<Vec<ResampleRequest>>,
}

impl RecordingResampler {
    fn take(&self) -> Vec<ResampleRequest> {
        self.requests.take()
    }
}

impl Resampler for RecordingResampler {
    fn resample(
        &self,
        source: ArrayView3<'_, f32>,
        request: &ResampleRequest,
    ) -> Result<Array3<f32>, ResampleError> {
        self.requests.borrow_mut().push(*request);
        let channels = source.dim().0;
        Ok(Array3::zeros((
            channels,
            request.target.height as usize,
            request.target.width as usize,
        )))
    }
}

fn gradient(items: usize, h: usize, w: usize, channels: usize) -> ArrayD<f32> {
    ArrayD::from_shape_fn(vec![items, h, w, channels], |idx| {
        (idx[0] * 31 + idx[1] * 7 + idx[2] * 3 + idx[3]) as f32 * 0.01
    })
}

// Small budget so gating tests stay cheap: 32×32 is the solved size for any
// square source at 1024 px on an 8-grid.
fn small_budget() -> Budget {
    Budget::new().target_pixels(1024).grid(8)
}

// ---- Primitive negotiation ----

#[test]
fn downscale_requests_antialias_for_convolution_filters() {
    let recorder = RecordingResampler::default();
    let batch = gradient(1, 64, 64, 3);

    for (filter, expect_aa) in [
        (Filter::Bicubic, true),
        (Filter::Bilinear, true),
        (Filter::Area, false),
        (Filter::Nearest, false),
    ] {
        resize_batch(&batch, filter, &small_budget(), &recorder).unwrap();
        let reqs = recorder.take();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].target, Size::new(32, 32));
        assert_eq!(reqs[0].antialias, expect_aa, "{}", filter.name());
    }
}

#[test]
fn upscale_never_requests_antialias() {
    let recorder = RecordingResampler::default();
    let batch = gradient(1, 16, 16, 3);

    for filter in [Filter::Bicubic, Filter::Bilinear] {
        resize_batch(&batch, filter, &small_budget(), &recorder).unwrap();
        let reqs = recorder.take();
        assert_eq!(reqs[0].target, Size::new(32, 32));
        assert!(!reqs[0].antialias, "{}", filter.name());
    }
}

#[test]
fn single_axis_downscale_never_requests_antialias() {
    // 2048 wide, 2 tall on the small budget solves to 1024×8: width shrinks,
    // height grows — not a strict downscale, so no antialiasing.
    let recorder = RecordingResampler::default();
    let batch = gradient(1, 2, 2048, 1);

    resize_batch(&batch, Filter::Bicubic, &small_budget(), &recorder).unwrap();
    let reqs = recorder.take();
    assert_eq!(reqs.len(), 1);
    let t = reqs[0].target;
    assert_eq!(t, Size::new(1024, 8));
    assert!(!reqs[0].antialias);
}

#[test]
fn align_corners_is_false_except_for_nearest() {
    let recorder = RecordingResampler::default();
    let batch = gradient(1, 64, 64, 3);

    for filter in [Filter::Area, Filter::Bicubic, Filter::Bilinear] {
        resize_batch(&batch, filter, &small_budget(), &recorder).unwrap();
        assert_eq!(recorder.take()[0].align_corners, Some(false));
    }
    resize_batch(&batch, Filter::Nearest, &small_budget(), &recorder).unwrap();
    assert_eq!(recorder.take()[0].align_corners, None);
}

#[test]
fn primitive_is_not_invoked_for_noop_slots() {
    let recorder = RecordingResampler::default();
    let batch = gradient(2, 32, 32, 3);

    let out = resize_batch(&batch, Filter::Bicubic, &small_budget(), &recorder).unwrap();
    assert!(recorder.take().is_empty());
    assert_eq!(out, batch);
}

#[test]
fn one_request_per_slot_in_order() {
    let recorder = RecordingResampler::default();
    let batch = gradient(3, 64, 64, 2);

    resize_batch(&batch, Filter::Bilinear, &small_budget(), &recorder).unwrap();
    let reqs = recorder.take();
    assert_eq!(reqs.len(), 3);
    for r in &reqs {
        assert_eq!(r.target, Size::new(32, 32));
        assert_eq!(r.filter, Filter::Bilinear);
    }
}

// ---- End-to-end over the CPU primitive ----

#[test]
fn batch_and_singles_agree_exactly() {
    let batch = gradient(3, 48, 80, 3);
    let joint = resize_batch(&batch, Filter::Bicubic, &small_budget(), &CpuResampler).unwrap();

    for i in 0..3 {
        let item = batch
            .view()
            .into_dimensionality::<ndarray::Ix4>()
            .unwrap()
            .index_axis(Axis(0), i)
            .to_owned();
        let alone = resize_image(item.view(), Filter::Bicubic, &small_budget(), &CpuResampler)
            .unwrap()
            .into_dyn();
        assert_eq!(joint.index_axis(Axis(0), i), alone, "item {i}");
    }
}

#[test]
fn mode_string_fallback_matches_bicubic_end_to_end() {
    let batch = gradient(1, 48, 80, 3);
    let budget = small_budget();
    let fallback = resize_to_budget(&batch, "not-a-mode", &budget, &CpuResampler).unwrap();
    let explicit = resize_batch(&batch, Filter::Bicubic, &budget, &CpuResampler).unwrap();
    assert_eq!(fallback, explicit);
}

#[test]
fn output_batch_and_channel_count_match_input() {
    let batch = gradient(4, 100, 60, 7);
    let budget = Budget::new().target_pixels(4096).grid(16);
    let out = resize_to_budget(&batch, "area", &budget, &CpuResampler).unwrap();
    assert_eq!(out.shape()[0], 4);
    assert_eq!(out.shape()[3], 7);
    assert_eq!(out.shape()[1] % 16, 0);
    assert_eq!(out.shape()[2] % 16, 0);
}

#[test]
fn input_is_not_mutated() {
    let batch = gradient(1, 48, 80, 3);
    let copy = batch.clone();
    let _ = resize_batch(&batch, Filter::Bilinear, &small_budget(), &CpuResampler).unwrap();
    assert_eq!(batch, copy);
}

#[test]
fn default_budget_hits_one_megapixel_shapes() {
    let batch = gradient(1, 1080, 1920, 3);
    let out = resize_to_budget(&batch, "bicubic", &Budget::new(), &CpuResampler).unwrap();
    assert_eq!(out.shape(), &[1, 768, 1344, 3]);
}
