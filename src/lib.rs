//! Pixel-budget image sizing: grid-aligned dimension solving and batch resampling.
//!
//! Computes target dimensions whose product approximates a total pixel budget
//! while tracking the source aspect ratio and keeping both axes on a grid
//! multiple, then resizes image batches to match. The dimension math is pure
//! geometry — no pixel operations, no allocations, `no_std` compatible. Pixel
//! work lives behind the [`Resampler`] seam and is gated on `alloc`.
//!
//! # Modules
//!
//! - [`budget`] — Pixel-budget dimension solver (the core)
//! - [`filter`] — Interpolation filter set and host-string normalization
//! - [`resample`] — Resampler seam, request negotiation, CPU reference kernels
//! - [`batch`] — Per-item batch resize loop over 4-D image arrays

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod budget;
pub mod filter;

#[cfg(feature = "alloc")]
pub mod batch;
#[cfg(feature = "alloc")]
pub mod resample;

// Re-exports: core types from the solver and filter modules
pub use budget::{Budget, Size};
pub use filter::Filter;

#[cfg(feature = "alloc")]
pub use batch::{resize_batch, resize_image, resize_to_budget};
#[cfg(feature = "alloc")]
pub use resample::{CpuResampler, ResampleError, ResampleRequest, Resampler};
