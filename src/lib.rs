// src/lib.rs

//! hello_os - minimal x86_64 kernel with a VGA text-mode terminal driver
//!
//! The crate is deliberately small: a hardware text buffer model, a
//! terminal writer on top of it, a serial port for debug output, and the
//! glue an in-QEMU test harness needs. Host-side unit tests run against an
//! in-memory stub buffer when the `std-tests` feature is enabled.

#![no_std]
#![cfg_attr(all(test, not(feature = "std-tests")), no_main)]
#![cfg_attr(all(test, not(feature = "std-tests")), feature(custom_test_frameworks))]
#![cfg_attr(
    all(test, not(feature = "std-tests")),
    test_runner(crate::test_runner)
)]
#![cfg_attr(
    all(test, not(feature = "std-tests")),
    reexport_test_harness_main = "test_main"
)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod qemu;
pub mod serial;
pub mod vga_buffer;

pub use qemu::{exit_qemu, QemuExitCode};

/// Bring up the output path: serial first (so failures are reportable),
/// then the VGA terminal.
///
/// Serial hardware may be absent (for example on stripped-down emulator
/// configs); that is not fatal, output simply goes to the screen only.
pub fn init() {
    let _ = serial::init();
    vga_buffer::init();
}

/// Halt the CPU until the next interrupt, forever.
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn hlt_loop() -> ! {
    loop {
        x86_64::instructions::hlt();
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn hlt_loop() -> ! {
    loop {
        core::hint::spin_loop();
    }
}

/// Trait for functions runnable by the kernel test harness.
pub trait Testable {
    fn run(&self);
}

impl<T> Testable for T
where
    T: Fn(),
{
    fn run(&self) {
        serial_print!("[TEST] {} ... ", core::any::type_name::<T>());
        self();
        serial_println!("ok");
    }
}

/// Test runner for in-QEMU tests.
pub fn test_runner(tests: &[&dyn Testable]) {
    serial_println!("[TEST RUNNER] running {} tests", tests.len());
    for test in tests {
        test.run();
    }
    exit_qemu(QemuExitCode::Success);
}

/// Report a panic during an in-QEMU test run and exit with failure.
#[inline(never)]
pub fn test_panic_handler(info: &core::panic::PanicInfo) -> ! {
    serial_println!("[TEST PANIC] {}", info);
    exit_qemu(QemuExitCode::Failed);
}

#[cfg(all(test, not(feature = "std-tests")))]
mod test_harness {
    use bootloader_api::{entry_point, BootInfo};
    use core::panic::PanicInfo;

    entry_point!(test_kernel_main);

    fn test_kernel_main(_boot_info: &'static mut BootInfo) -> ! {
        crate::init();
        crate::test_main();
        crate::hlt_loop();
    }

    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        crate::test_panic_handler(info)
    }
}
