// src/serial.rs

//! Serial port driver (COM1) for boot and debug output.
//!
//! Configures the UART for 38400 baud, 8 data bits, no parity, 1 stop bit.
//! Output polls the line status register so bytes are never pushed into a
//! full transmit buffer; a timeout keeps the kernel from spinning forever
//! on hardware that stops responding.

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicBool, Ordering};
use spin::Mutex;
use x86_64::instructions::port::Port;

/// COM1 base I/O port address
const SERIAL_IO_PORT: u16 = 0x3f8;

/// Register offsets from the base port
mod register_offset {
    pub const DATA: u16 = 0;
    pub const INTERRUPT_ENABLE: u16 = 1;
    pub const FIFO_CONTROL: u16 = 2;
    pub const LINE_CONTROL: u16 = 3;
    pub const MODEM_CONTROL: u16 = 4;
    pub const LINE_STATUS: u16 = 5;
    pub const SCRATCH: u16 = 7;
}

/// Divisor for 38400 baud (115200 / 38400)
const BAUD_RATE_DIVISOR: u16 = 3;
/// DLAB bit in the line control register
const DLAB_ENABLE: u8 = 0x80;
/// 8 data bits, no parity, 1 stop bit
const CONFIG_8N1: u8 = 0x03;
/// Enable FIFO, clear both queues, 14-byte threshold
const FIFO_ENABLE_CLEAR: u8 = 0xc7;
/// IRQs enabled, RTS/DSR set
const MODEM_CTRL_ENABLE: u8 = 0x0b;
/// Transmit holding register empty bit in the LSR
const LSR_TRANSMIT_EMPTY: u8 = 0x20;
/// Poll iterations before a transmit is abandoned
const TIMEOUT_ITERATIONS: u32 = 100_000;
/// Patterns for scratch-register presence detection
const SCRATCH_TEST_PRIMARY: u8 = 0x55;
const SCRATCH_TEST_SECONDARY: u8 = 0xaa;

static SERIAL_INITIALIZED: AtomicBool = AtomicBool::new(false);
static SERIAL_PORT_AVAILABLE: AtomicBool = AtomicBool::new(false);

/// The COM1 register file.
struct SerialPorts {
    data: Port<u8>,
    interrupt_enable: Port<u8>,
    fifo_control: Port<u8>,
    line_control: Port<u8>,
    modem_control: Port<u8>,
    line_status: Port<u8>,
    scratch: Port<u8>,
}

impl SerialPorts {
    const fn new() -> Self {
        Self {
            data: Port::new(SERIAL_IO_PORT + register_offset::DATA),
            interrupt_enable: Port::new(SERIAL_IO_PORT + register_offset::INTERRUPT_ENABLE),
            fifo_control: Port::new(SERIAL_IO_PORT + register_offset::FIFO_CONTROL),
            line_control: Port::new(SERIAL_IO_PORT + register_offset::LINE_CONTROL),
            modem_control: Port::new(SERIAL_IO_PORT + register_offset::MODEM_CONTROL),
            line_status: Port::new(SERIAL_IO_PORT + register_offset::LINE_STATUS),
            scratch: Port::new(SERIAL_IO_PORT + register_offset::SCRATCH),
        }
    }

    /// Program baud rate, framing, FIFO and modem control registers.
    fn configure(&mut self) {
        // SAFETY: fixed COM1 register addresses; callers hold the
        // SERIAL_PORTS mutex, so register accesses do not interleave.
        unsafe {
            self.interrupt_enable.write(0x00);
            self.line_control.write(DLAB_ENABLE);
            self.data.write((BAUD_RATE_DIVISOR & 0xff) as u8);
            self.interrupt_enable.write((BAUD_RATE_DIVISOR >> 8) as u8);
            self.line_control.write(CONFIG_8N1);
            self.fifo_control.write(FIFO_ENABLE_CLEAR);
            self.modem_control.write(MODEM_CTRL_ENABLE);
        }
    }

    /// Write a test pattern to the scratch register and read it back.
    ///
    /// The scratch register has no side effects; on machines without the
    /// port a read returns 0xFF, which makes a cheap presence probe.
    fn scratch_round_trip(&mut self, value: u8) -> u8 {
        // SAFETY: scratch register access is side-effect-free; mutex held.
        unsafe {
            self.scratch.write(value);
            self.scratch.read()
        }
    }

    /// Poll the LSR and write a byte once the transmitter is ready.
    ///
    /// Returns `false` when the transmitter never became ready.
    fn poll_and_write(&mut self, byte: u8) -> bool {
        // SAFETY: LSR reads are read-only and the data write happens only
        // after the transmit buffer reports empty; mutex held.
        unsafe {
            for _ in 0..TIMEOUT_ITERATIONS {
                if (self.line_status.read() & LSR_TRANSMIT_EMPTY) != 0 {
                    self.data.write(byte);
                    return true;
                }
                core::hint::spin_loop();
            }
        }
        false
    }
}

static SERIAL_PORTS: Mutex<SerialPorts> = Mutex::new(SerialPorts::new());

/// Serial port initialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    AlreadyInitialized,
    PortNotPresent,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::AlreadyInitialized => write!(f, "serial port already initialized"),
            InitError::PortNotPresent => write!(f, "serial port hardware not present"),
        }
    }
}

/// Detect and configure COM1.
///
/// # Errors
///
/// - `InitError::AlreadyInitialized` when called a second time
/// - `InitError::PortNotPresent` when the scratch-register probe fails
pub fn init() -> Result<(), InitError> {
    if SERIAL_INITIALIZED.swap(true, Ordering::AcqRel) {
        return Err(InitError::AlreadyInitialized);
    }

    if !is_port_present() {
        SERIAL_INITIALIZED.store(false, Ordering::Release);
        return Err(InitError::PortNotPresent);
    }

    SERIAL_PORTS.lock().configure();
    SERIAL_PORT_AVAILABLE.store(true, Ordering::Release);
    Ok(())
}

fn is_port_present() -> bool {
    let mut ports = SERIAL_PORTS.lock();
    ports.scratch_round_trip(SCRATCH_TEST_PRIMARY) == SCRATCH_TEST_PRIMARY
        && ports.scratch_round_trip(SCRATCH_TEST_SECONDARY) == SCRATCH_TEST_SECONDARY
}

/// Return whether the serial port hardware is available
#[inline]
pub fn is_available() -> bool {
    SERIAL_PORT_AVAILABLE.load(Ordering::Acquire)
}

fn write_byte(byte: u8) {
    if !is_available() {
        return;
    }
    let _ = SERIAL_PORTS.lock().poll_and_write(byte);
}

/// Write a string to the serial port
pub fn write_str(s: &str) {
    for byte in s.bytes() {
        write_byte(byte);
    }
}

/// Serial writer implementing `core::fmt::Write`
pub struct SerialWriter;

impl Write for SerialWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write_str(s);
        Ok(())
    }
}

/// Write formatted data to the serial port
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    let mut writer = SerialWriter;
    let _ = writer.write_fmt(args);
}

/// Serial print macro
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => ({
        $crate::serial::_print(format_args!($($arg)*));
    });
}

/// Serial println macro
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($fmt:expr) => ($crate::serial_print!(concat!($fmt, "\n")));
    ($fmt:expr, $($arg:tt)*) => ($crate::serial_print!(
        concat!($fmt, "\n"), $($arg)*
    ));
}
