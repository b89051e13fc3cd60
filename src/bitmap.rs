use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{FusedIterator, Iterator};

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use crate::capacity::{BUCKET_BITS, FULL_BUCKET, bucket_count, low_mask, max_bit_count};
use crate::error::{BitmapError, CapacityExceeded, OutOfRange};

/// Maps `pos` to its `(bucket index, bit offset)` pair.
///
/// Rejects positions at or past `len` and positions above `ceiling`.
#[inline]
pub(crate) const fn locate(len: u32, ceiling: u32, pos: u32) -> Result<(usize, u32), OutOfRange> {
    if pos >= len || pos > ceiling {
        return Err(OutOfRange { pos, len });
    }
    Ok(((pos / BUCKET_BITS) as usize, pos % BUCKET_BITS))
}

/// A fixed-length sequence of bits stored in 64-bit buckets.
///
/// Bit `p` lives in bucket `p / 64` at offset `p % 64`, least significant bit
/// first. The length is chosen at construction and never changes; every
/// single-bit accessor checks its position against it and returns
/// [`OutOfRange`] instead of panicking.
///
/// # Examples
/// ```
/// use bucket_bitmap::Bitmap;
///
/// let mut bitmap = Bitmap::new(10).unwrap();
/// bitmap.set_one(0).unwrap();
/// bitmap.set_one(9).unwrap();
/// assert!(bitmap.set_one(10).is_err());
/// assert_eq!(bitmap.render(), "1000000001");
/// ```
#[derive(Clone)]
pub struct Bitmap {
    buckets: Vec<u64>,
    len: u32,
    ceiling: u32,
}

impl Bitmap {
    /// Creates a bitmap of `len` bits, all unset.
    ///
    /// # Errors
    /// Returns [`CapacityExceeded`] if `len` is greater than
    /// [`max_bit_count`].
    ///
    /// # Examples
    /// ```
    /// use bucket_bitmap::Bitmap;
    ///
    /// let bitmap = Bitmap::new(100).unwrap();
    /// assert_eq!(bitmap.len(), 100);
    /// assert_eq!(bitmap.count_ones(), 0);
    ///
    /// assert!(Bitmap::new(u32::MAX).is_err());
    /// ```
    ///
    /// [`max_bit_count`]: crate::max_bit_count
    pub fn new(len: u32) -> Result<Self, CapacityExceeded> {
        Self::with_ceiling(len, max_bit_count())
    }

    /// Creates a bitmap of `len` bits checked against a caller-chosen
    /// capacity ceiling.
    ///
    /// The effective ceiling is `ceiling` or the platform ceiling, whichever
    /// is lower. It stays attached to the bitmap and bounds every position
    /// lookup.
    ///
    /// # Errors
    /// Returns [`CapacityExceeded`] if `len` is greater than the effective
    /// ceiling.
    ///
    /// # Examples
    /// ```
    /// use bucket_bitmap::Bitmap;
    ///
    /// let bitmap = Bitmap::with_ceiling(512, 1024).unwrap();
    /// assert_eq!(bitmap.ceiling(), 1024);
    ///
    /// let err = Bitmap::with_ceiling(2048, 1024).unwrap_err();
    /// assert_eq!(err.ceiling, 1024);
    /// ```
    pub fn with_ceiling(len: u32, ceiling: u32) -> Result<Self, CapacityExceeded> {
        let ceiling = ceiling.min(max_bit_count());
        if len > ceiling {
            #[cfg(feature = "tracing")]
            tracing::debug!(requested = len, ceiling, "bitmap length exceeds capacity ceiling");
            return Err(CapacityExceeded {
                requested: len,
                ceiling,
            });
        }

        let buckets = vec![0u64; bucket_count(len)];
        #[cfg(feature = "tracing")]
        tracing::trace!(len, buckets = buckets.len(), "created bitmap");

        Ok(Self {
            buckets,
            len,
            ceiling,
        })
    }

    /// Creates a bitmap of `len` bits with only the given positions set.
    ///
    /// # Errors
    /// Returns [`BitmapError::CapacityExceeded`] if `len` is too large and
    /// [`BitmapError::OutOfRange`] for the first position `>= len`.
    ///
    /// # Examples
    /// ```
    /// use bucket_bitmap::Bitmap;
    ///
    /// let bitmap = Bitmap::from_ones(5, [0, 2, 4]).unwrap();
    /// assert_eq!(bitmap.render(), "10101");
    /// assert!(Bitmap::from_ones(5, [5]).is_err());
    /// ```
    pub fn from_ones<I: IntoIterator<Item = u32>>(len: u32, ones: I) -> Result<Self, BitmapError> {
        let mut bitmap = Self::new(len)?;
        for pos in ones {
            bitmap.set_one(pos)?;
        }
        Ok(bitmap)
    }

    /// Returns the number of addressable bits.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Returns `true` if the bitmap has no addressable bits.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity ceiling this bitmap was validated against.
    #[inline]
    pub const fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Returns the backing buckets, lowest positions first.
    ///
    /// Bits of the last bucket beyond [`len`](Bitmap::len) are always unset.
    #[inline]
    pub fn as_buckets(&self) -> &[u64] {
        &self.buckets
    }

    #[inline]
    fn locate(&self, pos: u32) -> Result<(usize, u32), OutOfRange> {
        locate(self.len, self.ceiling, pos)
    }

    /// Sets the bit at `pos`.
    ///
    /// # Errors
    /// Returns [`OutOfRange`] if `pos >= len`; the bitmap is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use bucket_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new(8).unwrap();
    /// bm.set_one(3).unwrap();
    /// assert!(bm.is_one(3).unwrap());
    /// ```
    #[inline]
    pub fn set_one(&mut self, pos: u32) -> Result<(), OutOfRange> {
        let (bucket, offset) = self.locate(pos)?;
        self.buckets[bucket] |= 1u64 << offset;
        Ok(())
    }

    /// Unsets the bit at `pos`.
    ///
    /// # Errors
    /// Returns [`OutOfRange`] if `pos >= len`; the bitmap is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use bucket_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new(8).unwrap();
    /// bm.fill_all();
    /// bm.set_zero(3).unwrap();
    /// assert!(!bm.is_one(3).unwrap());
    /// ```
    #[inline]
    pub fn set_zero(&mut self, pos: u32) -> Result<(), OutOfRange> {
        let (bucket, offset) = self.locate(pos)?;
        self.buckets[bucket] &= !(1u64 << offset);
        Ok(())
    }

    /// Returns `true` if the bit at `pos` is set.
    ///
    /// # Errors
    /// Returns [`OutOfRange`] if `pos >= len`.
    #[inline]
    pub fn is_one(&self, pos: u32) -> Result<bool, OutOfRange> {
        let (bucket, offset) = self.locate(pos)?;
        Ok((self.buckets[bucket] >> offset) & 1 == 1)
    }

    /// Toggles the bit at `pos`.
    ///
    /// # Errors
    /// Returns [`OutOfRange`] if `pos >= len`; the bitmap is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use bucket_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new(8).unwrap();
    /// bm.flip(4).unwrap();
    /// assert!(bm.is_one(4).unwrap());
    /// bm.flip(4).unwrap();
    /// assert!(!bm.is_one(4).unwrap());
    /// ```
    #[inline]
    pub fn flip(&mut self, pos: u32) -> Result<(), OutOfRange> {
        let (bucket, offset) = self.locate(pos)?;
        self.buckets[bucket] ^= 1u64 << offset;
        Ok(())
    }

    /// Unsets every bit.
    pub fn clear_all(&mut self) {
        self.buckets.fill(0);
    }

    /// Sets every bit.
    ///
    /// # Examples
    /// ```
    /// use bucket_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new(70).unwrap();
    /// bm.fill_all();
    /// assert_eq!(bm.count_ones(), 70);
    /// ```
    pub fn fill_all(&mut self) {
        self.buckets.fill(FULL_BUCKET);
        self.clean_unused_bits();
    }

    #[inline]
    fn clean_unused_bits(&mut self) {
        let bits_in_last = self.len % BUCKET_BITS;
        if bits_in_last != 0
            && let Some(last) = self.buckets.last_mut()
        {
            *last &= low_mask(bits_in_last);
        }
    }

    /// Renders the bitmap as a string of `'0'` and `'1'` characters.
    ///
    /// Buckets are written in ascending order. Each full bucket is printed
    /// as 64 binary digits, most significant first; a trailing partial
    /// bucket is printed with only as many digits as it has valid bits. The
    /// result is exactly [`len`](Bitmap::len) characters long.
    ///
    /// # Examples
    /// ```
    /// use bucket_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new(4).unwrap();
    /// bm.set_one(0).unwrap();
    /// bm.set_one(2).unwrap();
    /// assert_eq!(bm.render(), "0101");
    /// assert_eq!(Bitmap::new(0).unwrap().render(), "");
    /// ```
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Returns an iterator over all bits as `bool`, starting at position 0.
    #[inline]
    pub fn iter(&self) -> BitmapIter<'_> {
        BitmapIter {
            buckets: &self.buckets,
            len: self.len,
            pos: 0,
        }
    }

    /// Returns an iterator over the positions of set bits, in ascending
    /// order.
    ///
    /// # Examples
    /// ```
    /// use bucket_bitmap::Bitmap;
    ///
    /// let mut bm = Bitmap::new(130).unwrap();
    /// for pos in [1, 64, 129] {
    ///     bm.set_one(pos).unwrap();
    /// }
    /// assert_eq!(bm.iter_ones().collect::<Vec<_>>(), [1, 64, 129]);
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes {
            buckets: &self.buckets,
            len: self.len,
            bucket_idx: 0,
            current: self.buckets.first().copied().unwrap_or(0),
            base_pos: 0,
        }
    }

    /// Returns an iterator over the positions of unset bits, in ascending
    /// order.
    #[inline]
    pub fn iter_zeros(&self) -> IterZeros<'_> {
        IterZeros {
            buckets: &self.buckets,
            len: self.len,
            bucket_idx: 0,
            current: self.buckets.first().map_or(0, |bucket| !bucket),
            base_pos: 0,
        }
    }

    /// Returns the number of set bits.
    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.buckets.iter().map(|bucket| bucket.count_ones()).sum()
    }

    /// Returns the lowest set position, or `None` if no bit is set.
    pub fn first_one(&self) -> Option<u32> {
        for (i, bucket) in self.buckets.iter().enumerate() {
            if *bucket != 0 {
                return Some(i as u32 * BUCKET_BITS + bucket.trailing_zeros());
            }
        }
        None
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
            len: 0,
            ceiling: max_bit_count(),
        }
    }
}

// The ceiling is a construction policy, not part of the value.
impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.buckets == other.buckets
    }
}

impl Eq for Bitmap {}

impl Hash for Bitmap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.buckets.hash(state);
    }
}

impl<'bitmap> IntoIterator for &'bitmap Bitmap {
    type Item = bool;
    type IntoIter = BitmapIter<'bitmap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Bitmap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut remaining = self.len;
        for bucket in &self.buckets {
            let width = remaining.min(BUCKET_BITS);
            write!(f, "{:0width$b}", bucket & low_mask(width), width = width as usize)?;
            remaining -= width;
        }
        Ok(())
    }
}

impl Debug for Bitmap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LSB ->")?;
        for (i, bit) in self.iter().enumerate() {
            if i % 8 == 0 {
                write!(f, " {i}: ")?;
            }
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        write!(f, " <- MSB")
    }
}

/// Iterator over all bits of a bitmap as `bool` values.
///
/// Returned by [`Bitmap::iter()`].
#[derive(Clone, Copy)]
pub struct BitmapIter<'bitmap> {
    buckets: &'bitmap [u64],
    len: u32,
    pos: u32,
}

impl Iterator for BitmapIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let bucket = self.buckets[(self.pos / BUCKET_BITS) as usize];
        let bit = (bucket >> (self.pos % BUCKET_BITS)) & 1;
        self.pos += 1;
        Some(bit == 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.pos) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitmapIter<'_> {}

impl FusedIterator for BitmapIter<'_> {}

/// Iterator over the positions of set bits.
///
/// Returned by [`Bitmap::iter_ones()`].
#[derive(Clone, Copy)]
pub struct IterOnes<'bitmap> {
    buckets: &'bitmap [u64],
    len: u32,
    bucket_idx: usize,
    current: u64,
    base_pos: u32,
}

impl Iterator for IterOnes<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket_idx < self.buckets.len() {
            if self.current != 0 {
                let pos = self.base_pos + self.current.trailing_zeros();
                if pos >= self.len {
                    self.current = 0;
                    return None;
                }
                self.current &= self.current - 1; // unset LSB
                return Some(pos);
            }

            self.bucket_idx += 1;
            self.base_pos += BUCKET_BITS;
            self.current = self.buckets.get(self.bucket_idx).copied().unwrap_or(0);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}

/// Iterator over the positions of unset bits.
///
/// Returned by [`Bitmap::iter_zeros()`].
#[derive(Clone, Copy)]
pub struct IterZeros<'bitmap> {
    buckets: &'bitmap [u64],
    len: u32,
    bucket_idx: usize,
    current: u64,
    base_pos: u32,
}

impl Iterator for IterZeros<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket_idx < self.buckets.len() {
            if self.current != 0 {
                let pos = self.base_pos + self.current.trailing_zeros();
                if pos >= self.len {
                    // only the last bucket has positions past `len`
                    self.current = 0;
                    return None;
                }
                self.current &= self.current - 1;
                return Some(pos);
            }

            self.bucket_idx += 1;
            self.base_pos += BUCKET_BITS;
            self.current = self.buckets.get(self.bucket_idx).map_or(0, |bucket| !bucket);
        }
        None
    }
}

impl FusedIterator for IterZeros<'_> {}
