// src/vga_buffer/constants.rs

//! Constants describing the VGA text-mode display surface.

/// VGA text buffer physical memory address
pub const VGA_BUFFER_ADDR: usize = 0xb8000;

/// Screen dimensions
pub const VGA_WIDTH: usize = 80;
pub const VGA_HEIGHT: usize = 25;

/// Total number of addressable character cells
pub const CELL_COUNT: usize = VGA_WIDTH * VGA_HEIGHT;

/// Bytes per character cell (1 byte ASCII + 1 byte colour attribute)
#[allow(dead_code)]
pub const BYTES_PER_CELL: usize = 2;

/// Total buffer size in bytes
#[allow(dead_code)]
pub const BUFFER_SIZE: usize = CELL_COUNT * BYTES_PER_CELL;
