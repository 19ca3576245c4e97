//! Bounded message rendering.
//!
//! Messages are rendered into a buffer with a fixed byte capacity. Output
//! past the capacity is dropped at the last whole character that fits, so a
//! runaway message can never grow the write past its bound.

use std::fmt::{self, Write};

/// Default capacity of the message buffer, in bytes.
pub const MESSAGE_CAPACITY: usize = 1024;

/// A `fmt::Write` sink that silently stops accepting text at `cap` bytes.
#[derive(Debug)]
pub struct BoundedBuf {
    buf: String,
    cap: usize,
    truncated: bool,
}

impl BoundedBuf {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: String::with_capacity(cap),
            cap,
            truncated: false,
        }
    }

    /// True once any output was dropped.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl Write for BoundedBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        let room = self.cap.saturating_sub(self.buf.len());
        if s.len() <= room {
            self.buf.push_str(s);
            return Ok(());
        }
        let mut end = room;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.buf.push_str(s.get(..end).unwrap_or_default());
        self.truncated = true;
        Ok(())
    }
}

/// Render `args` into at most `cap` bytes.
///
/// Only a failing `Display` impl produces an error; overflow never does.
pub fn render(args: fmt::Arguments<'_>, cap: usize) -> Result<String, fmt::Error> {
    let mut buf = BoundedBuf::with_capacity(cap);
    buf.write_fmt(args)?;
    Ok(buf.into_string())
}

#[cfg(test)]
mod tests {
    use std::fmt::{self, Write};

    use super::{BoundedBuf, MESSAGE_CAPACITY, render};

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn renders_printf_style_arguments() {
        let out = render(format_args!("value={}", 42), MESSAGE_CAPACITY).expect("render");
        assert_eq!(out, "value=42");
    }

    #[test]
    fn short_message_is_not_truncated() {
        let mut buf = BoundedBuf::with_capacity(8);
        buf.write_str("12345678").expect("write");
        assert!(!buf.truncated());
        assert_eq!(buf.into_string(), "12345678");
    }

    #[test]
    fn long_message_truncates_at_capacity() {
        let long = "x".repeat(MESSAGE_CAPACITY * 3);
        let out = render(format_args!("{long}"), MESSAGE_CAPACITY).expect("render");
        assert_eq!(out.len(), MESSAGE_CAPACITY);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Each 'é' is two bytes, so only two fit into five bytes.
        let out = render(format_args!("{}", "ééé"), 5).expect("render");
        assert_eq!(out, "éé");
    }

    #[test]
    fn output_after_truncation_is_dropped() {
        let mut buf = BoundedBuf::with_capacity(4);
        buf.write_str("abcdef").expect("write");
        buf.write_str("gh").expect("write");
        assert!(buf.truncated());
        assert_eq!(buf.into_string(), "abcd");
    }

    #[test]
    fn failing_display_is_an_error() {
        assert!(render(format_args!("{}", Broken), MESSAGE_CAPACITY).is_err());
    }
}
