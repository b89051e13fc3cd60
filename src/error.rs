/// A bit position was outside the bitmap's valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("bit position {pos} out of range for bitmap of length {len}")]
pub struct OutOfRange {
    /// The rejected position.
    pub pos: u32,
    /// Length of the bitmap that rejected it.
    pub len: u32,
}

/// Construction asked for more bits than the capacity ceiling allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("requested {requested} bits exceeds capacity ceiling of {ceiling} bits")]
pub struct CapacityExceeded {
    /// The requested length.
    pub requested: u32,
    /// The ceiling the request was checked against.
    pub ceiling: u32,
}

/// Any error produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BitmapError {
    /// See [`OutOfRange`].
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
    /// See [`CapacityExceeded`].
    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceeded),
}
