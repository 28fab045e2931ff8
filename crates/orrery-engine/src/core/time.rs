use std::time::Instant;

/// Source of wall-clock time, in seconds since the clock's own epoch.
///
/// Orbital positions are computed from absolute elapsed time, so the clock
/// is the only input that moves bodies along their orbits. Tests and the web
/// bridge inject a `ManualClock`; native hosts use `SystemClock`.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Monotonic clock started at construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock advanced by hand (synthetic time, or host-supplied timestamps).
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Jump to an absolute time.
    pub fn set(&mut self, seconds: f64) {
        self.seconds = seconds;
    }

    pub fn advance(&mut self, seconds: f64) {
        self.seconds += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_set_and_advance() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.now(), 0.0);
        clock.advance(1.5);
        clock.advance(0.5);
        assert_eq!(clock.now(), 2.0);
        clock.set(10.0);
        assert_eq!(clock.now(), 10.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
