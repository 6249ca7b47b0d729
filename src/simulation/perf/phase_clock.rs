//! Stopwatch for the tick phases

// Instant panics on wasm32-unknown-unknown; the browser clock stands in there
#[cfg(target_arch = "wasm32")]
type Stamp = f64;
#[cfg(not(target_arch = "wasm32"))]
type Stamp = std::time::Instant;

#[cfg(target_arch = "wasm32")]
fn now() -> Stamp {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> Stamp {
    std::time::Instant::now()
}

#[cfg(target_arch = "wasm32")]
fn millis_since(stamp: Stamp) -> f64 {
    js_sys::Date::now() - stamp
}

#[cfg(not(target_arch = "wasm32"))]
fn millis_since(stamp: Stamp) -> f64 {
    stamp.elapsed().as_secs_f64() * 1000.0
}

/// Started only while perf metrics are on, so disabled ticks never read a clock
#[derive(Clone, Copy)]
pub(crate) struct PhaseClock {
    started: Option<Stamp>,
}

impl PhaseClock {
    #[inline]
    pub(crate) fn begin(enabled: bool) -> Self {
        Self {
            started: enabled.then(now),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Store the milliseconds since `begin` into `slot`; a stopped clock leaves it untouched
    pub(crate) fn record(&self, slot: &mut f64) {
        if let Some(stamp) = self.started {
            *slot = millis_since(stamp);
        }
    }
}
