#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(hello_os::test_runner)]
#![reexport_test_harness_main = "test_main"]

use bootloader_api::{entry_point, BootInfo};
use core::panic::PanicInfo;
use hello_os::vga_buffer::{self, ColorCode, VgaColor};
use hello_os::println;

entry_point!(test_kernel_main);

fn test_kernel_main(_boot_info: &'static mut BootInfo) -> ! {
    hello_os::init();
    test_main();
    hello_os::hlt_loop();
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    hello_os::test_panic_handler(info)
}

#[test_case]
fn test_println_simple() {
    println!("test_println_simple output");
}

#[test_case]
fn test_println_wraps_past_bottom() {
    // More lines than the screen has rows; the cursor must wrap back to
    // the top without faulting.
    for _ in 0..200 {
        println!("test_println_wraps_past_bottom output");
    }
}

#[test_case]
fn test_clear_after_output() {
    println!("text before clear");
    vga_buffer::clear();
    println!("text after clear");
}

#[test_case]
fn test_colored_output() {
    vga_buffer::print_colored("colored line\n", ColorCode::new(VgaColor::LightCyan, VgaColor::Black));
}
