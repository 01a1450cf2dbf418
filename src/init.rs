//! One-time platform warm-up.
//!
//! Every classifier in this crate memoizes its own probing, so nothing here
//! is required for correctness. The entry point exists so process startup
//! can pay the probe cost at a chosen moment, once, no matter how many
//! threads race into it.

use crate::compiler::probe;
use crate::error::Result;
use crate::features;
use std::sync::atomic::{AtomicBool, Ordering};

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static INIT_IN_PROGRESS: AtomicBool = AtomicBool::new(false);

/// Pre-fills the memoized probes so later queries are plain reads.
fn warm_up() -> Result<()> {
    let _ = probe::native_macro_set();
    let _ = features::feature_set();
    Ok(())
}

/// Idempotent, thread-safe one-time setup for the runtime probes.
///
/// Exactly one caller performs the warm-up; concurrent callers wait for it
/// to finish. A failed warm-up is logged and swallowed, and the state stays
/// retryable by a later call. Once initialization has completed the call is
/// a single atomic read.
pub fn initialize_platform() {
    loop {
        if INITIALIZED.load(Ordering::Acquire) {
            return;
        }
        if INIT_IN_PROGRESS
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            match warm_up() {
                Ok(()) => INITIALIZED.store(true, Ordering::Release),
                Err(e) => log::debug!("platform warm-up failed: {e}"),
            }
            INIT_IN_PROGRESS.store(false, Ordering::Release);
            return;
        }
        // Another caller is warming up; wait until it finishes either way.
        while INIT_IN_PROGRESS.load(Ordering::Acquire) && !INITIALIZED.load(Ordering::Acquire) {
            std::hint::spin_loop();
        }
    }
}

/// Whether a warm-up has completed.
pub fn is_platform_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}
