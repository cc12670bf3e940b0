// src/vga_buffer/backend.rs

//! Low-level display buffer access.
//!
//! This module is the only place in the crate that performs raw address
//! arithmetic on the hardware buffer. Higher-level code (the terminal
//! writer) targets the [`VgaBufferAccess`] trait, so it can run against the
//! real text-mode buffer at `0xB8000` or against an in-memory stub when
//! testing on the host.

use super::constants::{CELL_COUNT, VGA_BUFFER_ADDR};
use super::writer::VgaError;
use core::ptr::NonNull;

/// Abstraction over the VGA character buffer memory.
pub trait VgaBufferAccess {
    /// Total number of addressable character cells.
    fn capacity(&self) -> usize {
        CELL_COUNT
    }

    /// Read the encoded value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] when `index` is outside the buffer.
    fn read_cell(&self, index: usize) -> Result<u16, VgaError>;

    /// Write `value` to the cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`VgaError::OutOfBounds`] when `index` is outside the buffer.
    fn write_cell(&mut self, index: usize, value: u16) -> Result<(), VgaError>;

    /// Fill every cell of the buffer with `value`.
    fn fill(&mut self, value: u16);
}

/// Concrete backend that talks to the legacy text-mode buffer at 0xB8000.
#[derive(Clone, Copy)]
pub struct TextModeBuffer {
    ptr: NonNull<u16>,
}

impl TextModeBuffer {
    /// Construct a new text-mode backend.
    ///
    /// The boot environment must have the physical buffer mapped and
    /// writable before the first cell access.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            // SAFETY: 0xB8000 is the canonical VGA text buffer address.
            ptr: unsafe { NonNull::new_unchecked(VGA_BUFFER_ADDR as *mut u16) },
        }
    }

    #[inline]
    const fn is_valid_index(index: usize) -> bool {
        index < CELL_COUNT
    }
}

// SAFETY: the backend wraps a fixed MMIO address with no thread affinity;
// all access is serialized through the writer's lock.
unsafe impl Send for TextModeBuffer {}

impl VgaBufferAccess for TextModeBuffer {
    fn read_cell(&self, index: usize) -> Result<u16, VgaError> {
        if !Self::is_valid_index(index) {
            return Err(VgaError::OutOfBounds);
        }

        // SAFETY: the index was checked against CELL_COUNT, so the access
        // stays inside the mapped hardware buffer.
        Ok(unsafe { core::ptr::read_volatile(self.ptr.as_ptr().add(index)) })
    }

    fn write_cell(&mut self, index: usize, value: u16) -> Result<(), VgaError> {
        if !Self::is_valid_index(index) {
            return Err(VgaError::OutOfBounds);
        }

        // SAFETY: the index was checked against CELL_COUNT, so the access
        // stays inside the mapped hardware buffer.
        unsafe {
            core::ptr::write_volatile(self.ptr.as_ptr().add(index), value);
            core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
        }
        Ok(())
    }

    fn fill(&mut self, value: u16) {
        for index in 0..CELL_COUNT {
            // SAFETY: index iterates 0..CELL_COUNT and stays in bounds.
            unsafe {
                core::ptr::write_volatile(self.ptr.as_ptr().add(index), value);
            }
        }
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

impl Default for TextModeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple stub implementation backed by regular memory for testing.
#[cfg_attr(target_arch = "x86_64", allow(dead_code))]
#[derive(Clone)]
pub struct StubBuffer {
    cells: [u16; CELL_COUNT],
}

#[cfg_attr(target_arch = "x86_64", allow(dead_code))]
impl StubBuffer {
    /// Create a zeroed stub buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }
}

impl VgaBufferAccess for StubBuffer {
    fn read_cell(&self, index: usize) -> Result<u16, VgaError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(VgaError::OutOfBounds)
    }

    fn write_cell(&mut self, index: usize, value: u16) -> Result<(), VgaError> {
        self.cells
            .get_mut(index)
            .map(|cell| {
                *cell = value;
            })
            .ok_or(VgaError::OutOfBounds)
    }

    fn fill(&mut self, value: u16) {
        self.cells = [value; CELL_COUNT];
    }
}

impl Default for StubBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "x86_64")]
pub type DefaultVgaBuffer = TextModeBuffer;

#[cfg(not(target_arch = "x86_64"))]
pub type DefaultVgaBuffer = StubBuffer;
