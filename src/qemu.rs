// src/qemu.rs

//! Utilities for interacting with QEMU test infrastructure.

use x86_64::instructions::port::Port;

/// Exit codes understood by QEMU's ISA debug exit device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum QemuExitCode {
    /// Signal that the test run completed successfully.
    Success = 0x10,
    /// Signal that at least one test failed.
    Failed = 0x11,
}

/// Write the exit code to QEMU's debug exit port and halt the CPU.
#[inline]
pub fn exit_qemu(code: QemuExitCode) -> ! {
    // SAFETY: Port 0xF4 is the QEMU ISA debug exit. Writing to it causes
    // QEMU to exit with the provided status.
    unsafe {
        let mut port = Port::<u32>::new(0xf4);
        port.write(code as u32);
    }

    crate::hlt_loop();
}
