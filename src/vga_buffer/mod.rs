// src/vga_buffer/mod.rs

//! VGA text mode terminal driver.
//!
//! Turns a logical stream of characters and colour attributes into writes
//! at the right offsets of the 80x25 hardware text buffer:
//! - 16-colour support (VGA standard palette)
//! - cursor tracking with edge wraparound (no scrolling)
//! - interrupt-safe locking around the single writer instance
//! - `fmt::Write` implementation for the `print!`/`println!` macros
//!
//! Exactly one writer exists for the lifetime of the kernel; everything
//! else reaches it through the locked `with_writer` helper, which is also
//! the single mutual-exclusion boundary the buffer needs if more execution
//! contexts ever appear.

mod backend;
mod cell;
mod color;
mod constants;
mod writer;

pub use backend::{StubBuffer, TextModeBuffer, VgaBufferAccess};
pub use cell::ScreenCell;
pub use color::{ColorCode, VgaColor};
pub use constants::{VGA_HEIGHT, VGA_WIDTH};
pub use writer::{VgaError, VgaWriter};

use backend::DefaultVgaBuffer;
use core::fmt;
use spin::Mutex;

/// Global VGA writer protected by a Mutex.
///
/// # Locking Order
///
/// To prevent deadlocks, acquire the serial lock (in `serial.rs`) before
/// this one whenever both are needed.
static WRITER: Mutex<VgaWriter<DefaultVgaBuffer>> =
    Mutex::new(VgaWriter::new(DefaultVgaBuffer::new()));

/// Execute a function with the VGA writer, protected from interrupts.
///
/// Disabling interrupts while the lock is held means an interrupt handler
/// can never re-enter the lock from the same core.
#[cfg(target_arch = "x86_64")]
fn with_writer<F, R>(f: F) -> R
where
    F: FnOnce(&mut VgaWriter<DefaultVgaBuffer>) -> R,
{
    x86_64::instructions::interrupts::without_interrupts(|| f(&mut WRITER.lock()))
}

#[cfg(not(target_arch = "x86_64"))]
fn with_writer<F, R>(f: F) -> R
where
    F: FnOnce(&mut VgaWriter<DefaultVgaBuffer>) -> R,
{
    f(&mut WRITER.lock())
}

/// Initialize the terminal: blank the screen under the default colour and
/// reset the cursor.
///
/// Must run before any other output call. Calling it again clears the
/// screen, which is the documented way to clear.
pub fn init() {
    with_writer(|writer| writer.clear());
}

/// Clear the screen and reset the cursor and colour.
pub fn clear() {
    with_writer(|writer| writer.clear());
}

/// Set the colour applied to subsequent output.
pub fn set_color(color: ColorCode) {
    with_writer(|writer| writer.set_color(color));
}

/// Print a string in the given colour, then restore the previous colour.
pub fn print_colored(s: &str, color: ColorCode) {
    with_writer(|writer| {
        let old_color = writer.color();
        writer.set_color(color);
        writer.write_string(s);
        writer.set_color(old_color);
    });
}

/// Print function called by the macros
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    with_writer(|writer| {
        use core::fmt::Write;
        let _ = writer.write_fmt(args);
    });
}

/// Global print! macro
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ({
        $crate::vga_buffer::_print(format_args!($($arg)*))
    });
}

/// Global println! macro
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($fmt:expr) => ($crate::print!(concat!($fmt, "\n")));
    ($fmt:expr, $($arg:tt)*) => ($crate::print!(concat!($fmt, "\n"), $($arg)*));
}
