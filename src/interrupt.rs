//! Cancellation token fed by SIGINT and SIGTERM.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::signal::{SIGINT, SIGTERM};

/// Signals that abort a capture before the screenshot tool runs.
pub const INTERRUPT_SIGNALS: [i32; 2] = [SIGINT, SIGTERM];

/// Shared "stop before capturing" flag.
///
/// The signal handler only stores `true` into the atomic; all reporting
/// happens on the main thread when the flag is polled.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// A token that is only raised explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token raised by SIGINT or SIGTERM.
    ///
    /// Registering replaces the default terminate action for these signals,
    /// so the process keeps running long enough to report the interruption.
    pub fn install() -> io::Result<Self> {
        let interrupt = Self::new();
        for signal in INTERRUPT_SIGNALS {
            signal_hook::flag::register(signal, Arc::clone(&interrupt.flag))?;
        }
        log::debug!("Interrupt handlers registered for SIGINT and SIGTERM");
        Ok(interrupt)
    }

    pub fn raise(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
