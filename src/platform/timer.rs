//! Fixed-delay repeating timer driven by host frame time
//!
//! The host reports elapsed milliseconds each frame; the owner then pulls
//! due fires one at a time so it can stop mid-batch (e.g. when a run ends).

use crate::consts::MAX_CATCHUP;

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    period_ms: f64,
    elapsed_ms: f64,
    /// Fires handed out since the last `accumulate`
    fired: u32,
    cancelled: bool,
}

impl IntervalTimer {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: f64::from(period_ms.max(1)),
            elapsed_ms: 0.0,
            fired: 0,
            cancelled: false,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms as u32
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled
    }

    /// Add frame time
    pub fn accumulate(&mut self, dt_ms: f64) {
        if self.cancelled {
            return;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        self.fired = 0;
    }

    /// Consume one period if due. At most `MAX_CATCHUP` fires per
    /// `accumulate`; any further backlog is dropped.
    pub fn take_due(&mut self) -> bool {
        if self.cancelled || self.elapsed_ms < self.period_ms {
            return false;
        }
        if self.fired >= MAX_CATCHUP {
            self.elapsed_ms %= self.period_ms;
            return false;
        }
        self.elapsed_ms -= self.period_ms;
        self.fired += 1;
        true
    }

    /// Change the period and restart the phase, like clearing and
    /// re-arming a browser interval
    pub fn set_period(&mut self, period_ms: u32) {
        self.period_ms = f64::from(period_ms.max(1));
        self.elapsed_ms = 0.0;
    }

    /// Stop for good; a cancelled timer never fires again
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.elapsed_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timer: &mut IntervalTimer) -> u32 {
        let mut n = 0;
        while timer.take_due() {
            n += 1;
        }
        n
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = IntervalTimer::new(150);
        timer.accumulate(100.0);
        assert_eq!(drain(&mut timer), 0);
        timer.accumulate(60.0);
        assert_eq!(drain(&mut timer), 1);
        timer.accumulate(290.0);
        assert_eq!(drain(&mut timer), 2);
    }

    #[test]
    fn test_catchup_is_bounded() {
        let mut timer = IntervalTimer::new(10);
        timer.accumulate(1000.0);
        assert_eq!(drain(&mut timer), MAX_CATCHUP);
        timer.accumulate(5.0);
        assert_eq!(drain(&mut timer), 0);
    }

    #[test]
    fn test_set_period_restarts_phase() {
        let mut timer = IntervalTimer::new(150);
        timer.accumulate(140.0);
        timer.set_period(148);
        timer.accumulate(140.0);
        assert_eq!(drain(&mut timer), 0);
        timer.accumulate(8.0);
        assert_eq!(drain(&mut timer), 1);
        assert_eq!(timer.period_ms(), 148);
    }

    #[test]
    fn test_cancelled_never_fires() {
        let mut timer = IntervalTimer::new(10);
        timer.accumulate(50.0);
        timer.cancel();
        assert!(!timer.is_active());
        assert_eq!(drain(&mut timer), 0);
        timer.accumulate(500.0);
        assert_eq!(drain(&mut timer), 0);
    }
}
