//! # chunky
//!
//! *Planar in, chunky out.*
//!
//! Takes N separately stored planes of samples (one buffer per channel) and
//! writes them as a single interleaved buffer, pixel after pixel. Samples
//! may be 1, 2, 4, 8, 12 or 16 bits wide and are packed MSB first.
//!
//! Three- and four-plane inputs use dedicated routines for each depth
//! (lookup tables, bit-matrix transposes, and SIMD unpacks on x86-64 AVX2).
//! Any other plane count goes through a generic bit packer.
//!
//! ## Core operations (always available)
//!
//! All functions in the crate root operate on raw `&[u8]` / `&mut [u8]`
//! slices. Multi-byte samples are copied verbatim; no byte swapping happens.
//!
//! ```
//! // Two 4-bit planes: pixel 0 = (0xA, 0x3), pixel 1 = (0x5, 0xC).
//! let mut out = [0u8; 2];
//! chunky::interleave(&mut out, &[&[0xA5], &[0x3C]], 0, 1, 4).unwrap();
//! assert_eq!(out, [0xA3, 0x5C]);
//! ```
//!
//! ## Feature flags
//!
//! - **`rgb`**: Planar channels to [`rgb`] crate pixel slices via bytemuck.
//! - **`imgref`**: Whole-image conversions over strided [`imgref`] buffers.
//!   Implies `rgb`.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod error;
mod flip;

pub use error::FlipError;
pub use flip::*;

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod img;
