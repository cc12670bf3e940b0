// src/vga_buffer/color.rs

//! VGA colour definitions and colour attribute packing.

/// VGA colour codes (4-bit colour palette)
#[allow(dead_code)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VgaColor {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// Colour attribute combining foreground and background colours.
///
/// The layout is fixed by the VGA hardware: foreground in the low nibble,
/// background in the high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Create a new colour code from foreground and background colours
    pub const fn new(fg: VgaColor, bg: VgaColor) -> Self {
        Self((bg as u8) << 4 | (fg as u8))
    }

    /// Get the raw attribute byte
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Foreground nibble of the attribute byte
    pub const fn foreground_bits(self) -> u8 {
        self.0 & 0x0f
    }

    /// Background nibble of the attribute byte
    pub const fn background_bits(self) -> u8 {
        self.0 >> 4
    }

    /// Default colour scheme (light gray on black)
    pub const fn normal() -> Self {
        Self::new(VgaColor::LightGray, VgaColor::Black)
    }

    /// Panic colour scheme (white on red)
    pub const fn panic() -> Self {
        Self::new(VgaColor::White, VgaColor::Red)
    }
}
