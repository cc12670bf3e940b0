// src/vga_buffer/cell.rs

//! Encoding of a single display cell.
//!
//! The VGA hardware addresses the screen as 16-bit cells: character code in
//! the low byte, colour attribute in the high byte. The layout is dictated
//! by the hardware and must match exactly.

use super::color::ColorCode;

/// One hardware-addressable display cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCell(u16);

impl ScreenCell {
    /// Pack a character code and a colour attribute into one cell
    pub const fn new(byte: u8, color: ColorCode) -> Self {
        Self((color.as_u8() as u16) << 8 | byte as u16)
    }

    /// A blank cell (space) under the given colour
    pub const fn blank(color: ColorCode) -> Self {
        Self::new(b' ', color)
    }

    /// The raw 16-bit hardware value
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Reconstruct a cell from its raw hardware value
    pub const fn from_u16(value: u16) -> Self {
        Self(value)
    }

    /// Character code stored in the low byte
    pub const fn byte(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Colour attribute stored in the high byte
    pub const fn color_bits(self) -> u8 {
        (self.0 >> 8) as u8
    }
}
