// src/vga_buffer/writer.rs

//! Terminal writer: cursor state and the write/advance algorithm.
//!
//! The writer owns the cursor (row, column, current colour) and turns a
//! stream of bytes into cell writes through a [`VgaBufferAccess`] backend.
//! When the cursor walks off the right edge it wraps to the next row; when
//! it walks off the bottom it wraps back to the top row and overwrites old
//! content. There is deliberately no scrolling.

use super::backend::VgaBufferAccess;
use super::cell::ScreenCell;
use super::color::ColorCode;
use super::constants::{VGA_HEIGHT, VGA_WIDTH};
use core::fmt;

/// Errors that can occur when interacting with the VGA subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VgaError {
    /// The requested cell lies outside the visible screen area.
    OutOfBounds,
}

impl VgaError {
    /// Convert the error into a human-readable static message.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfBounds => "cell position out of bounds",
        }
    }
}

impl fmt::Display for VgaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A writer that renders bytes onto a VGA text buffer.
///
/// Generic over the backend so the same algorithm drives the real hardware
/// buffer in the kernel and a stub buffer in host tests.
pub struct VgaWriter<B: VgaBufferAccess> {
    row: usize,
    column: usize,
    color: ColorCode,
    buffer: B,
}

impl<B: VgaBufferAccess> VgaWriter<B> {
    /// Create a writer with the cursor at the top-left corner and the
    /// default colour. The screen contents are untouched until
    /// [`clear`](Self::clear) runs.
    pub const fn new(buffer: B) -> Self {
        Self {
            row: 0,
            column: 0,
            color: ColorCode::normal(),
            buffer,
        }
    }

    /// Reset the terminal: cursor to (0,0), colour to the default, every
    /// cell blanked under the default colour.
    ///
    /// Running it again is the screen-clear operation; the result is
    /// identical to a fresh initialization.
    pub fn clear(&mut self) {
        self.color = ColorCode::normal();
        self.buffer.fill(ScreenCell::blank(self.color).as_u16());
        self.row = 0;
        self.column = 0;
    }

    /// Set the colour used by subsequent writes. Previously written cells
    /// keep their attribute.
    pub fn set_color(&mut self, color: ColorCode) {
        self.color = color;
    }

    /// The colour currently applied to new writes.
    #[must_use]
    pub const fn color(&self) -> ColorCode {
        self.color
    }

    /// Current cursor position as `(row, column)`.
    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    /// Write one cell at the given coordinates without touching the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] when the coordinates lie outside
    /// the 80x25 surface.
    pub fn put_at(
        &mut self,
        byte: u8,
        color: ColorCode,
        col: usize,
        row: usize,
    ) -> Result<(), VgaError> {
        if col >= VGA_WIDTH || row >= VGA_HEIGHT {
            return Err(VgaError::OutOfBounds);
        }
        self.buffer
            .write_cell(row * VGA_WIDTH + col, ScreenCell::new(byte, color).as_u16())
    }

    /// Read back the cell at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] when the coordinates lie outside
    /// the 80x25 surface.
    pub fn cell_at(&self, col: usize, row: usize) -> Result<ScreenCell, VgaError> {
        if col >= VGA_WIDTH || row >= VGA_HEIGHT {
            return Err(VgaError::OutOfBounds);
        }
        self.buffer
            .read_cell(row * VGA_WIDTH + col)
            .map(ScreenCell::from_u16)
    }

    /// Write one byte at the cursor and advance it.
    ///
    /// A line feed does not render a glyph: it resets the column and moves
    /// to the next row, wrapping to the top row past the bottom edge. Every
    /// other byte is rendered as-is under the current colour.
    pub fn write_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            byte => {
                let cell = ScreenCell::new(byte, self.color);
                // In range while the cursor invariant (row < 25, column < 80)
                // holds, which every transition below preserves.
                let _ = self
                    .buffer
                    .write_cell(self.row * VGA_WIDTH + self.column, cell.as_u16());
                self.advance_cursor();
            }
        }
    }

    /// Write a byte slice via sequential [`write_byte`](Self::write_byte)
    /// calls, preserving order.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Write a string slice byte-by-byte.
    pub fn write_string(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    fn advance_cursor(&mut self) {
        self.column += 1;
        if self.column == VGA_WIDTH {
            self.new_line();
        }
    }

    fn new_line(&mut self) {
        self.column = 0;
        self.row += 1;
        if self.row == VGA_HEIGHT {
            self.row = 0;
        }
    }
}

impl<B: VgaBufferAccess> fmt::Write for VgaWriter<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_string(s);
        Ok(())
    }
}


#[cfg(all(test, feature = "std-tests"))]
mod tests {
    use super::super::backend::StubBuffer;
    use super::super::color::VgaColor;
    use super::*;

    fn fresh_writer() -> VgaWriter<StubBuffer> {
        let mut writer = VgaWriter::new(StubBuffer::new());
        writer.clear();
        writer
    }

    #[test]
    fn test_clear_blanks_every_cell_and_resets_cursor() {
        let mut writer = VgaWriter::new(StubBuffer::new());
        writer.write_string("leftover text");
        writer.set_color(ColorCode::panic());
        writer.clear();

        assert_eq!(writer.cursor(), (0, 0));
        assert_eq!(writer.color(), ColorCode::normal());
        let blank = ScreenCell::blank(ColorCode::normal());
        for row in 0..VGA_HEIGHT {
            for col in 0..VGA_WIDTH {
                assert_eq!(writer.cell_at(col, row).unwrap(), blank);
            }
        }
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut once = VgaWriter::new(StubBuffer::new());
        once.clear();
        let mut twice = VgaWriter::new(StubBuffer::new());
        twice.clear();
        twice.clear();

        assert_eq!(once.cursor(), twice.cursor());
        for row in 0..VGA_HEIGHT {
            for col in 0..VGA_WIDTH {
                assert_eq!(
                    once.cell_at(col, row).unwrap(),
                    twice.cell_at(col, row).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_put_at_round_trip() {
        let mut writer = fresh_writer();
        let color = ColorCode::new(VgaColor::Yellow, VgaColor::Blue);
        writer.put_at(b'Z', color, 79, 24).unwrap();

        assert_eq!(writer.cell_at(79, 24).unwrap(), ScreenCell::new(b'Z', color));
        // put_at must not move the cursor
        assert_eq!(writer.cursor(), (0, 0));
    }

    #[test]
    fn test_put_at_rejects_out_of_bounds() {
        let mut writer = fresh_writer();
        let color = ColorCode::normal();
        assert_eq!(
            writer.put_at(b'a', color, VGA_WIDTH, 0),
            Err(VgaError::OutOfBounds)
        );
        assert_eq!(
            writer.put_at(b'a', color, 0, VGA_HEIGHT),
            Err(VgaError::OutOfBounds)
        );
        assert_eq!(writer.cell_at(VGA_WIDTH, 0), Err(VgaError::OutOfBounds));
    }

    #[test]
    fn test_write_byte_uses_current_color() {
        let mut writer = fresh_writer();
        let color = ColorCode::new(VgaColor::LightGreen, VgaColor::Black);
        writer.set_color(color);
        writer.write_byte(b'g');

        assert_eq!(writer.cell_at(0, 0).unwrap(), ScreenCell::new(b'g', color));
        assert_eq!(writer.cursor(), (0, 1));
    }

    #[test]
    fn test_set_color_leaves_old_cells_untouched() {
        let mut writer = fresh_writer();
        writer.write_byte(b'a');
        writer.set_color(ColorCode::panic());
        writer.write_byte(b'b');

        assert_eq!(
            writer.cell_at(0, 0).unwrap(),
            ScreenCell::new(b'a', ColorCode::normal())
        );
        assert_eq!(
            writer.cell_at(1, 0).unwrap(),
            ScreenCell::new(b'b', ColorCode::panic())
        );
    }

    #[test]
    fn test_full_row_wraps_to_next_row() {
        let mut writer = fresh_writer();
        for _ in 0..VGA_WIDTH {
            writer.write_byte(b'x');
        }
        assert_eq!(writer.cursor(), (1, 0));
    }

    #[test]
    fn test_full_screen_wraps_to_top_without_scrolling() {
        let mut writer = fresh_writer();
        for _ in 0..(VGA_WIDTH * VGA_HEIGHT) {
            writer.write_byte(b'x');
        }
        assert_eq!(writer.cursor(), (0, 0));

        // One more byte overwrites the top-left cell; nothing scrolled.
        writer.write_byte(b'y');
        assert_eq!(writer.cursor(), (0, 1));
        assert_eq!(
            writer.cell_at(0, 0).unwrap(),
            ScreenCell::new(b'y', ColorCode::normal())
        );
        assert_eq!(
            writer.cell_at(0, 1).unwrap(),
            ScreenCell::new(b'x', ColorCode::normal())
        );
    }

    #[test]
    fn test_newline_moves_cursor_without_glyph() {
        let mut writer = fresh_writer();
        writer.write_string("Hello kernel!\n");

        let expected = b"Hello kernel!";
        for (col, &byte) in expected.iter().enumerate() {
            assert_eq!(
                writer.cell_at(col, 0).unwrap(),
                ScreenCell::new(byte, ColorCode::normal())
            );
        }
        // The cell after the text is still blank; the newline rendered
        // nothing and only moved the cursor.
        assert_eq!(
            writer.cell_at(expected.len(), 0).unwrap(),
            ScreenCell::blank(ColorCode::normal())
        );
        assert_eq!(writer.cursor(), (1, 0));
    }

    #[test]
    fn test_newline_at_bottom_wraps_to_top() {
        let mut writer = fresh_writer();
        for _ in 0..(VGA_HEIGHT - 1) {
            writer.write_byte(b'\n');
        }
        assert_eq!(writer.cursor(), (VGA_HEIGHT - 1, 0));
        writer.write_byte(b'\n');
        assert_eq!(writer.cursor(), (0, 0));
    }

    #[test]
    fn test_write_bytes_matches_sequential_write_byte() {
        let data = b"abc\nwrap me around the edge of the screen";

        let mut bulk = fresh_writer();
        bulk.write_bytes(data);

        let mut sequential = fresh_writer();
        for &byte in data {
            sequential.write_byte(byte);
        }

        assert_eq!(bulk.cursor(), sequential.cursor());
        for row in 0..VGA_HEIGHT {
            for col in 0..VGA_WIDTH {
                assert_eq!(
                    bulk.cell_at(col, row).unwrap(),
                    sequential.cell_at(col, row).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_fmt_write_renders_formatted_text() {
        use core::fmt::Write;

        let mut writer = fresh_writer();
        write!(writer, "row {}", 7).unwrap();

        let expected = b"row 7";
        for (col, &byte) in expected.iter().enumerate() {
            assert_eq!(writer.cell_at(col, 0).unwrap().byte(), byte);
        }
        assert_eq!(writer.cursor(), (0, expected.len()));
    }
}
