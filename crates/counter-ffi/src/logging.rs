//! Opt-in logger installation for C/C++ hosts.
//!
//! The library only emits through the `log` facade. Hosts that do not run
//! a Rust logger of their own call [`counter_ffi_init_logging`] once to get
//! `env_logger` output on stderr, filtered by `COUNTER_FFI_LOG`
//! (same syntax as `RUST_LOG`, default `warn`).

use log::info;
use once_cell::sync::OnceCell;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "COUNTER_FFI_LOG";

/// Filter used when [`LOG_ENV`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

static LOGGER_INSTALLED: OnceCell<bool> = OnceCell::new();

/// Installs `env_logger` once. Returns whether this library's logger is the
/// active one; false means another logger was already installed by the host.
pub fn init_logging() -> bool {
    *LOGGER_INSTALLED.get_or_init(|| {
        let installed = env_logger::Builder::from_env(
            env_logger::Env::default().filter_or(LOG_ENV, DEFAULT_LOG_FILTER),
        )
        .try_init()
        .is_ok();
        if installed {
            info!("{} logging initialized", crate::VERSION.trim_end_matches('\0'));
        }
        installed
    })
}

/// C entry point for [`init_logging`]. Safe to call repeatedly.
#[no_mangle]
pub extern "C" fn counter_ffi_init_logging() -> bool {
    init_logging()
}
