/// Width of the little-endian length prefix in front of every leaf.
pub(crate) const LEAF_LEN_BYTES: usize = 2;
/// Width of the little-endian count prefix in front of sequences and mappings.
pub(crate) const COUNT_BYTES: usize = 4;

/// Largest leaf payload the 2-byte prefix can describe.
pub const MAX_LEAF_LEN: usize = u16::max_value() as usize;
/// Largest entry count the 4-byte prefix can describe.
pub const MAX_COUNT: usize = u32::max_value() as usize;

/// Payload width of bool leaves.
pub(crate) const BOOL_WIDTH: usize = 1;
/// Payload width of every integer leaf, regardless of declared width.
pub(crate) const INT_WIDTH: usize = 8;
/// Payload width of every float leaf, regardless of declared width.
pub(crate) const FLOAT_WIDTH: usize = 8;
/// Payload width of complex leaves, real half first.
pub(crate) const COMPLEX_WIDTH: usize = 2 * FLOAT_WIDTH;

/// `false` payload byte.
pub(crate) const CON_FALSE: u8 = 0x00;
/// `true` payload byte.
pub(crate) const CON_TRUE: u8 = 0x01;
