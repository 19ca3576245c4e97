//! Fatal escalation and the modal notification channel.
//!
//! A GUI process without a console has one place to tell the operator that
//! its logger died: a blocking message box. [`Terminate`] shows one and ends
//! the process. [`PanicOnFatal`] turns the same condition into a panic for
//! hosts that install their own panic hook, and for tests.

use crate::error::LogError;

/// Caption of the dialog shown before the process is terminated.
pub const FATAL_TITLE: &str = "exelog terminating error";

/// Caption of the optional per-message dialog.
pub const MESSAGE_TITLE: &str = "exelog";

/// What happens when the logger hits an unrecoverable error.
///
/// Implementations must not return: a logger that cannot log does not keep
/// running in a degraded mode.
pub trait FatalHandler: Send + Sync {
    fn fatal(&self, err: &LogError) -> !;
}

/// Show the error in a modal dialog, then exit the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminate;

impl FatalHandler for Terminate {
    fn fatal(&self, err: &LogError) -> ! {
        notify_fatal(&err.to_string());
        std::process::exit(0)
    }
}

/// Panic with the error text instead of terminating.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicOnFatal;

impl FatalHandler for PanicOnFatal {
    fn fatal(&self, err: &LogError) -> ! {
        panic!("{FATAL_TITLE}: {err}")
    }
}

/// Blocking error dialog with [`FATAL_TITLE`].
pub fn notify_fatal(text: &str) {
    platform::message_box(FATAL_TITLE, text, true);
}

/// Blocking informational dialog with [`MESSAGE_TITLE`].
pub fn show_message(text: &str) {
    platform::message_box(MESSAGE_TITLE, text, false);
}

#[cfg(windows)]
mod platform {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        MB_ICONERROR, MB_ICONINFORMATION, MB_OK, MB_SETFOREGROUND, MessageBoxW,
    };

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    #[allow(unsafe_code)]
    pub(super) fn message_box(title: &str, text: &str, error: bool) {
        let title = wide(title);
        let text = wide(text);
        let icon = if error { MB_ICONERROR } else { MB_ICONINFORMATION };

        // SAFETY: both strings are NUL-terminated UTF-16 buffers that live
        // until the call returns. A null owner window is allowed.
        unsafe {
            MessageBoxW(
                std::ptr::null_mut(),
                text.as_ptr(),
                title.as_ptr(),
                MB_OK | MB_SETFOREGROUND | icon,
            );
        }
    }
}

#[cfg(not(windows))]
mod platform {
    /// No message box outside Windows; stderr is the closest thing.
    pub(super) fn message_box(title: &str, text: &str, _error: bool) {
        eprintln!("{title}: {text}");
    }
}
