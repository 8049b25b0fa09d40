//! Common tools

/// Simple bit ops
pub trait BitOps {
    /// set the bit at `pos` to 1, and return the new value
    fn set_bit(&mut self, pos: u8) -> Self;
    /// set the bit at `pos` to 0, and return the new value
    fn clear_bit(&mut self, pos: u8) -> Self;
    /// whether the bit at `pos` is 1
    fn is_bit_set(&self, pos: u8) -> bool;
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self |= 1u8 << pos;
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self &= !(1u8 << pos);
        *self
    }

    fn is_bit_set(&self, pos: u8) -> bool {
        assert!(pos <= 7, "bit offset larger than 7");
        (*self >> pos) & 1 == 1
    }
}
