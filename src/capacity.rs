use core::mem::size_of;

/// Number of bits held by one bucket.
pub const BUCKET_BITS: u32 = u64::BITS;

/// A bucket with every bit set.
pub(crate) const FULL_BUCKET: u64 = u64::MAX;

const BUCKET_BYTES: u64 = size_of::<u64>() as u64;

/// Upper bound on the bit ceiling regardless of the platform.
const BIT_COUNT_CLAMP: u32 = i32::MAX as u32;

/// The platform capacity ceiling, see [`max_bit_count`].
pub const MAX_BIT_COUNT: u32 = max_bit_count();

/// Computes the number of buckets needed to store `bit_count` bits.
///
/// # Examples
/// ```
/// use bucket_bitmap::bucket_count;
///
/// assert_eq!(bucket_count(0), 0);
/// assert_eq!(bucket_count(64), 1);
/// assert_eq!(bucket_count(65), 2);
/// ```
pub const fn bucket_count(bit_count: u32) -> usize {
    bit_count.div_ceil(BUCKET_BITS) as usize
}

/// Returns the maximum number of bits a [`Bitmap`] may hold on this target.
///
/// A slice of buckets can span at most `isize::MAX` bytes, which bounds the
/// bucket count and therefore the bit count. The result is clamped to
/// `i32::MAX`, so on 32- and 64-bit targets the ceiling is `2_147_483_647`
/// and only narrower address spaces lower it further.
///
/// # Examples
/// ```
/// use bucket_bitmap::max_bit_count;
///
/// assert!(max_bit_count() <= i32::MAX as u32);
/// assert_eq!(max_bit_count(), bucket_bitmap::MAX_BIT_COUNT);
/// ```
///
/// [`Bitmap`]: crate::Bitmap
pub const fn max_bit_count() -> u32 {
    let max_buckets = isize::MAX as u64 / BUCKET_BYTES;
    let max_bits = max_buckets.saturating_mul(BUCKET_BITS as u64);
    if max_bits > BIT_COUNT_CLAMP as u64 {
        BIT_COUNT_CLAMP
    } else {
        max_bits as u32
    }
}

#[inline]
pub(crate) const fn low_mask(width: u32) -> u64 {
    if width >= BUCKET_BITS {
        FULL_BUCKET
    } else {
        (1u64 << width) - 1
    }
}
