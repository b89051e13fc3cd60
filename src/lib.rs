//! A fixed-length bitmap packed into 64-bit buckets, with checked bit access.
//! `no_std` with `alloc`, no `unsafe`.
//!
//! [`Bitmap`] is the main struct in this library. The number of bits is
//! chosen once at construction and never changes. Every single-bit operation
//! validates its position and returns an [`OutOfRange`] error instead of
//! panicking, and construction is bounded by a platform capacity ceiling
//! ([`max_bit_count`]).
//!
//! # Examples
//! ```
//! use bucket_bitmap::Bitmap;
//!
//! let mut bitmap = Bitmap::new(10)?;
//! assert_eq!(bitmap.count_ones(), 0);
//! assert!(!bitmap.is_one(3)?);
//! bitmap.set_one(3)?;
//! assert!(bitmap.is_one(3)?);
//! assert_eq!(bitmap.render(), "0000001000");
//! # Ok::<(), bucket_bitmap::BitmapError>(())
//! ```
//!
//! # Use Cases
//!
//! - Presence sets over a dense, known range of integers
//! - Visited marks in graph traversals
//! - Bucket and radix sorts
//!
//! # Features
//!
//! - Single-bit operations: `set_one`, `set_zero`, `is_one`, `flip`
//! - Bulk operations: `clear_all`, `fill_all`
//! - Canonical `'0'`/`'1'` rendering via `render` or `Display`
//! - Iteration over all, set or unset bits:
//!   - `iter()` (all bits as bools)
//!   - `iter_ones()` (positions of set bits)
//!   - `iter_zeros()` (positions of unset bits)
//! - `count_ones`, `first_one`
//! - Per-instance capacity ceilings via `Bitmap::with_ceiling`
//!
//! # Cargo features
//!
//! - `tracing` (default): emits `tracing` events when a bitmap is created or
//!   a construction is rejected.
//!
//! The bitmap is not internally synchronized; share it across threads behind
//! your own lock.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;
#[cfg(test)]
#[macro_use]
extern crate std;

mod bitmap;
mod capacity;
mod error;

pub use bitmap::{Bitmap, BitmapIter, IterOnes, IterZeros};
pub use capacity::{BUCKET_BITS, MAX_BIT_COUNT, bucket_count, max_bit_count};
pub use error::{BitmapError, CapacityExceeded, OutOfRange};
