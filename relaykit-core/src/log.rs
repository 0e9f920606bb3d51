//! Gated debug console output
//!
//! [`DebugLog`] mirrors the print/println/printf family of a serial console
//! but only forwards bytes to its sink when its debug flag is set. The flag is
//! fixed at construction, either passed explicitly or taken from the
//! `debug-log` Cargo feature via [`DEBUG_ENABLED`].
//!
//! ```ignore
//! let mut log = DebugLog::from_build(console);
//! log.println("relaykit up");
//! log.println_with(0xBEEFu16, Format::Radix(Radix::Hex)); // "BEEF\r\n"
//! debug_printf!(log, "ip {}.{}.{}.{}\r\n", ip[0], ip[1], ip[2], ip[3]);
//! ```
//!
//! Disabled output is skipped entirely; sink errors are dropped.

use core::fmt::{self, Write};

use relaykit_hal::UartTx;

/// Debug flag derived from the `debug-log` feature
pub const DEBUG_ENABLED: bool = cfg!(feature = "debug-log");

/// Line terminator appended by the `println` family
pub const LINE_ENDING: &str = "\r\n";

/// Fractional digits used for floats when no format is given
pub const DEFAULT_FLOAT_DIGITS: u8 = 2;

/// Integer output radix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Radix {
    Bin,
    Oct,
    #[default]
    Dec,
    Hex,
}

impl Radix {
    /// Numeric base
    pub const fn base(self) -> u32 {
        match self {
            Radix::Bin => 2,
            Radix::Oct => 8,
            Radix::Dec => 10,
            Radix::Hex => 16,
        }
    }
}

/// Representation selector for a printed value
///
/// `Radix` applies to integers, `Digits` to floats. A format that does not
/// apply to the value's type is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Format {
    /// Integer radix
    Radix(Radix),
    /// Number of fractional digits
    Digits(u8),
}

impl From<Radix> for Format {
    fn from(radix: Radix) -> Self {
        Format::Radix(radix)
    }
}

/// A value the logger knows how to print
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Printable<'a> {
    Int(i32),
    UInt(u32),
    Float(f64),
    Char(char),
    /// Printed as `1` or `0`
    Bool(bool),
    Text(&'a str),
}

macro_rules! printable_from {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for Printable<'_> {
                fn from(value: $ty) -> Self {
                    Printable::$variant(value.into())
                }
            }
        )*
    };
}

printable_from!(Int: i8, i16, i32);
printable_from!(UInt: u8, u16, u32);
printable_from!(Float: f32, f64);

impl From<char> for Printable<'_> {
    fn from(value: char) -> Self {
        Printable::Char(value)
    }
}

impl From<bool> for Printable<'_> {
    fn from(value: bool) -> Self {
        Printable::Bool(value)
    }
}

impl<'a> From<&'a str> for Printable<'a> {
    fn from(value: &'a str) -> Self {
        Printable::Text(value)
    }
}

impl<'a, const N: usize> From<&'a heapless::String<N>> for Printable<'a> {
    fn from(value: &'a heapless::String<N>) -> Self {
        Printable::Text(value.as_str())
    }
}

impl Printable<'_> {
    /// Render this value with an optional format
    pub fn render<W: Write>(&self, out: &mut W, format: Option<Format>) -> fmt::Result {
        let radix = match format {
            Some(Format::Radix(radix)) => radix,
            _ => Radix::Dec,
        };

        match *self {
            Printable::Int(v) if radix == Radix::Dec => write!(out, "{}", v),
            // Non-decimal radix shows the two's complement bit pattern
            Printable::Int(v) => write_radix(out, v as u32, radix),
            Printable::UInt(v) => write_radix(out, v, radix),
            Printable::Float(v) => {
                let digits = match format {
                    Some(Format::Digits(digits)) => digits,
                    _ => DEFAULT_FLOAT_DIGITS,
                };
                write!(out, "{:.*}", digits as usize, v)
            }
            Printable::Char(c) => out.write_char(c),
            Printable::Bool(b) => out.write_str(if b { "1" } else { "0" }),
            Printable::Text(s) => out.write_str(s),
        }
    }
}

fn write_radix<W: Write>(out: &mut W, value: u32, radix: Radix) -> fmt::Result {
    match radix {
        Radix::Bin => write!(out, "{:b}", value),
        Radix::Oct => write!(out, "{:o}", value),
        Radix::Dec => write!(out, "{}", value),
        Radix::Hex => write!(out, "{:X}", value),
    }
}

/// `fmt::Write` view of a console sink
struct SinkWriter<'a, W: UartTx> {
    sink: &'a mut W,
}

impl<W: UartTx> Write for SinkWriter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sink.write_blocking(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Debug logger over a console sink
pub struct DebugLog<W> {
    sink: W,
    enabled: bool,
}

impl<W: UartTx> DebugLog<W> {
    /// Create a logger with an explicit debug flag
    pub fn new(sink: W, enabled: bool) -> Self {
        Self { sink, enabled }
    }

    /// Create a logger gated by the `debug-log` feature
    pub fn from_build(sink: W) -> Self {
        Self::new(sink, DEBUG_ENABLED)
    }

    /// Whether output reaches the sink
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Give the sink back
    pub fn release(self) -> W {
        self.sink
    }

    /// Print a value in its default representation
    pub fn print<'a>(&mut self, value: impl Into<Printable<'a>>) {
        self.emit(value.into(), None, false);
    }

    /// Print a value with an explicit radix or digit count
    pub fn print_with<'a>(&mut self, value: impl Into<Printable<'a>>, format: impl Into<Format>) {
        self.emit(value.into(), Some(format.into()), false);
    }

    /// Print a value followed by a line terminator
    pub fn println<'a>(&mut self, value: impl Into<Printable<'a>>) {
        self.emit(value.into(), None, true);
    }

    /// Print a formatted value followed by a line terminator
    pub fn println_with<'a>(&mut self, value: impl Into<Printable<'a>>, format: impl Into<Format>) {
        self.emit(value.into(), Some(format.into()), true);
    }

    /// Print only the line terminator
    pub fn newline(&mut self) {
        if self.enabled {
            let _ = self.sink.write_blocking(LINE_ENDING.as_bytes());
        }
    }

    /// Print pre-built format arguments
    ///
    /// Use through [`debug_printf!`](crate::debug_printf).
    pub fn printf(&mut self, args: fmt::Arguments<'_>) {
        if self.enabled {
            let mut out = SinkWriter {
                sink: &mut self.sink,
            };
            let _ = out.write_fmt(args);
        }
    }

    /// Flush the sink
    pub fn flush(&mut self) {
        if self.enabled {
            let _ = self.sink.flush();
        }
    }

    fn emit(&mut self, value: Printable<'_>, format: Option<Format>, newline: bool) {
        if !self.enabled {
            return;
        }
        let mut out = SinkWriter {
            sink: &mut self.sink,
        };
        let _ = value.render(&mut out, format);
        if newline {
            let _ = out.write_str(LINE_ENDING);
        }
    }
}

impl<W: UartTx> Write for DebugLog<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.enabled {
            let _ = self.sink.write_blocking(s.as_bytes());
        }
        Ok(())
    }
}

/// Print a value through a [`DebugLog`]
///
/// `debug_print!(log, value)` or `debug_print!(log, value, format)`.
#[macro_export]
macro_rules! debug_print {
    ($log:expr, $value:expr $(,)?) => {
        $log.print($value)
    };
    ($log:expr, $value:expr, $format:expr $(,)?) => {
        $log.print_with($value, $format)
    };
}

/// Print a value and a line terminator through a [`DebugLog`]
///
/// `debug_println!(log)`, `debug_println!(log, value)` or
/// `debug_println!(log, value, format)`.
#[macro_export]
macro_rules! debug_println {
    ($log:expr $(,)?) => {
        $log.newline()
    };
    ($log:expr, $value:expr $(,)?) => {
        $log.println($value)
    };
    ($log:expr, $value:expr, $format:expr $(,)?) => {
        $log.println_with($value, $format)
    };
}

/// Formatted print through a [`DebugLog`]
///
/// `debug_printf!(log, "x={} y={:X}", x, y)`.
#[macro_export]
macro_rules! debug_printf {
    ($log:expr, $($arg:tt)*) => {
        $log.printf(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Sink recording every byte and write call
    #[derive(Default)]
    struct Recorder {
        data: Vec<u8, 256>,
        writes: usize,
        flushes: usize,
    }

    impl Recorder {
        fn text(&self) -> &str {
            core::str::from_utf8(&self.data).unwrap()
        }
    }

    impl UartTx for Recorder {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            self.writes += 1;
            self.data.extend_from_slice(data)
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushes += 1;
            Ok(())
        }
    }

    /// Sink that rejects everything
    struct Broken;

    impl UartTx for Broken {
        type Error = ();

        fn write_blocking(&mut self, _data: &[u8]) -> Result<(), ()> {
            Err(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            Err(())
        }
    }

    fn enabled() -> DebugLog<Recorder> {
        DebugLog::new(Recorder::default(), true)
    }

    #[test]
    fn test_print_defaults() {
        let mut log = enabled();
        log.print(42u8);
        log.print(' ');
        log.print(-7i32);
        log.print(' ');
        log.print(3.14159f32);
        log.print(' ');
        log.print(true);
        log.print(' ');
        log.print("ok");
        assert_eq!(log.sink().text(), "42 -7 3.14 1 ok");
    }

    #[test]
    fn test_println_appends_crlf() {
        let mut log = enabled();
        log.println("relay on");
        log.newline();
        assert_eq!(log.sink().text(), "relay on\r\n\r\n");
    }

    #[test]
    fn test_radix_formats() {
        let mut log = enabled();
        log.println_with(255u8, Radix::Hex);
        log.println_with(5u8, Radix::Bin);
        log.println_with(8u8, Radix::Oct);
        log.println_with(10u8, Format::Radix(Radix::Dec));
        assert_eq!(log.sink().text(), "FF\r\n101\r\n10\r\n10\r\n");
    }

    #[test]
    fn test_negative_hex_is_twos_complement() {
        let mut log = enabled();
        log.print_with(-1i32, Radix::Hex);
        assert_eq!(log.sink().text(), "FFFFFFFF");
    }

    #[test]
    fn test_float_digits() {
        let mut log = enabled();
        log.print_with(2.25f32, Format::Digits(0));
        log.print(' ');
        log.print_with(1.23449f64, Format::Digits(4));
        assert_eq!(log.sink().text(), "2 1.2345");
    }

    #[test]
    fn test_inapplicable_format_ignored() {
        let mut log = enabled();
        log.print_with("text", Radix::Hex);
        log.print_with(12u8, Format::Digits(3));
        log.print_with(1.5f32, Radix::Hex);
        assert_eq!(log.sink().text(), "text121.50");
    }

    #[test]
    fn test_printf() {
        let mut log = enabled();
        let ip = [192u8, 168, 1, 1];
        crate::debug_printf!(log, "ip {}.{}.{}.{} ({:02X})", ip[0], ip[1], ip[2], ip[3], 10);
        assert_eq!(log.sink().text(), "ip 192.168.1.1 (0A)");
    }

    #[test]
    fn test_macros() {
        let mut log = enabled();
        crate::debug_print!(log, "a");
        crate::debug_print!(log, 10u8, Radix::Hex);
        crate::debug_println!(log);
        crate::debug_println!(log, 'b');
        crate::debug_println!(log, 3u8, Radix::Bin);
        assert_eq!(log.sink().text(), "aA\r\nb\r\n11\r\n");
    }

    #[test]
    fn test_heapless_string() {
        let mut log = enabled();
        let mut name: heapless::String<16> = heapless::String::new();
        name.push_str("mask1").unwrap();
        log.print(&name);
        assert_eq!(log.sink().text(), "mask1");
    }

    #[test]
    fn test_fmt_write() {
        let mut log = enabled();
        write!(log, "{}-{}", 1, 2).unwrap();
        assert_eq!(log.sink().text(), "1-2");
    }

    #[test]
    fn test_disabled_writes_nothing() {
        let mut log = DebugLog::new(Recorder::default(), false);
        assert!(!log.is_enabled());

        for i in 0..1000u32 {
            log.print(i);
            log.println_with(i, Radix::Hex);
            log.print_with(i as f32, Format::Digits(3));
            crate::debug_printf!(log, "{}", i);
            log.newline();
            write!(log, "{}", i).unwrap();
        }
        log.flush();

        let sink = log.release();
        assert_eq!(sink.writes, 0);
        assert_eq!(sink.flushes, 0);
        assert!(sink.data.is_empty());
    }

    #[test]
    fn test_disabled_still_evaluates_arguments() {
        let mut log = DebugLog::new(Recorder::default(), false);
        let mut calls = 0;
        let mut next = || {
            calls += 1;
            calls
        };
        log.print(next() as u32);
        crate::debug_printf!(log, "{}", next());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_from_build_follows_feature() {
        let log = DebugLog::from_build(Recorder::default());
        assert_eq!(log.is_enabled(), DEBUG_ENABLED);
    }

    #[test]
    fn test_flush_forwarded() {
        let mut log = enabled();
        log.flush();
        assert_eq!(log.sink().flushes, 1);
    }

    #[test]
    fn test_sink_errors_are_dropped() {
        let mut log = DebugLog::new(Broken, true);
        log.println("lost");
        crate::debug_printf!(log, "{}", 1);
        log.flush();
        assert!(write!(log, "still ok").is_ok());
    }

    #[test]
    fn test_radix_base() {
        assert_eq!(Radix::Bin.base(), 2);
        assert_eq!(Radix::Oct.base(), 8);
        assert_eq!(Radix::Dec.base(), 10);
        assert_eq!(Radix::Hex.base(), 16);
        assert_eq!(Radix::default(), Radix::Dec);
    }
}
