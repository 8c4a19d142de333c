//! Scoped silencing of diagnostic output around external solver calls.
//!
//! The solver and its bindings report progress through the `log` facade.
//! While at least one [`OutputSilencer`] is alive the global max level is
//! `Off`; when the last one drops, including during unwinding, the level that
//! was active before the first guard is restored. Guards may nest and may be
//! held concurrently by sweep workers.
//!
//! Only `log` records are suppressed. Output a solver writes straight to the
//! process stdout/stderr (`eprintln!`, native libraries) still goes through.

use log::LevelFilter;
use parking_lot::{const_mutex, Mutex};

struct SilenceState {
    depth: usize,
    saved: LevelFilter,
}

static STATE: Mutex<SilenceState> = const_mutex(SilenceState {
    depth: 0,
    saved: LevelFilter::Off,
});

#[must_use = "output is restored as soon as the guard is dropped"]
pub struct OutputSilencer {
    _private: (),
}

impl OutputSilencer {
    pub fn engage() -> Self {
        let mut state = STATE.lock();
        if state.depth == 0 {
            state.saved = log::max_level();
            log::set_max_level(LevelFilter::Off);
        }
        state.depth += 1;
        Self { _private: () }
    }
}

impl Drop for OutputSilencer {
    fn drop(&mut self) {
        let mut state = STATE.lock();
        state.depth = state.depth.saturating_sub(1);
        if state.depth == 0 {
            log::set_max_level(state.saved);
        }
    }
}

/// Run `f` with diagnostic output silenced.
pub fn silenced<T>(f: impl FnOnce() -> T) -> T {
    let _guard = OutputSilencer::engage();
    f()
}
