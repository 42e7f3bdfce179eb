//! Region screenshots for Wayland compositors.
//!
//! eagleshot lets the user draw a rectangle with `slurp` and saves that part
//! of the screen with `grim` to `~/Pictures/scr_YYYYMMDD_HHMMSS.png`.

pub mod capture;
pub mod config;
pub mod interrupt;

pub use config::Config;
pub use interrupt::Interrupt;

/// `eagleshot version <crate version> (<git hash>)`, as printed by `--version`.
pub fn version_string() -> String {
    format!(
        "eagleshot version {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("EAGLESHOT_GIT_HASH")
    )
}
