// src/main.rs

//! Kernel entry point.
//!
//! The bootloader hands over control exactly once; we bring up the output
//! path, greet the world on the VGA text screen, and park the CPU.

#![no_std]
#![no_main]
#![deny(unsafe_op_in_unsafe_fn)]

use bootloader_api::{entry_point, BootInfo};
use core::panic::PanicInfo;
use hello_os::vga_buffer::ColorCode;
use hello_os::{println, serial_println};

entry_point!(kernel_main);

fn kernel_main(_boot_info: &'static mut BootInfo) -> ! {
    serial_println!("[KERNEL] Entry point reached");

    hello_os::init();
    serial_println!("[OK] Terminal initialized");

    println!("Hello kernel!");
    serial_println!("[KERNEL] Startup message written");
    serial_println!("[KERNEL] System in low-power hlt loop");

    hello_os::hlt_loop();
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // Best effort on both channels; the serial side survives even when the
    // VGA path is what panicked.
    serial_println!("[KERNEL PANIC] {}", info);
    hello_os::vga_buffer::set_color(ColorCode::panic());
    println!("[KERNEL PANIC] {}", info);
    hello_os::hlt_loop();
}
