use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::game::GameStatus;

/// Fixed-period tick scheduler driving a [`crate::game::GameState`].
///
/// The clock arms itself the first time it sees a running game and disarms
/// whenever the game is not running, so the first tick lands one full period
/// after start. Late polls fire a single tick; missed periods are dropped.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    period: Duration,
    last_tick: Option<Instant>,
}

impl TickClock {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_tick: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.tick_interval())
    }

    /// Returns true when the engine should tick at `now`.
    pub fn poll(&mut self, now: Instant, status: GameStatus) -> bool {
        if status != GameStatus::Running {
            self.last_tick = None;
            return false;
        }

        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now.saturating_duration_since(last) >= self.period => {
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Returns how long a host may sleep before the next tick is due.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self
                .period
                .saturating_sub(now.saturating_duration_since(last)),
            None => self.period,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::game::GameStatus;

    use super::TickClock;

    const PERIOD: Duration = Duration::from_millis(150);

    #[test]
    fn first_tick_fires_one_period_after_start() {
        let mut clock = TickClock::new(PERIOD);
        let start = Instant::now();

        assert!(!clock.poll(start, GameStatus::Running));
        assert!(!clock.poll(start + Duration::from_millis(149), GameStatus::Running));
        assert!(clock.poll(start + PERIOD, GameStatus::Running));
    }

    #[test]
    fn late_poll_fires_only_once() {
        let mut clock = TickClock::new(PERIOD);
        let start = Instant::now();
        clock.poll(start, GameStatus::Running);

        let late = start + PERIOD * 5;
        assert!(clock.poll(late, GameStatus::Running));
        assert!(!clock.poll(late, GameStatus::Running));
    }

    #[test]
    fn clock_stays_silent_unless_running() {
        let mut clock = TickClock::new(PERIOD);
        let start = Instant::now();
        clock.poll(start, GameStatus::Running);

        assert!(!clock.poll(start + PERIOD, GameStatus::Over));
        assert!(!clock.poll(start + PERIOD * 2, GameStatus::Idle));

        // Re-armed on the next running poll rather than firing immediately.
        assert!(!clock.poll(start + PERIOD * 3, GameStatus::Running));
        assert!(clock.poll(start + PERIOD * 4, GameStatus::Running));
    }

    #[test]
    fn remaining_time_counts_down_from_last_tick() {
        let mut clock = TickClock::new(PERIOD);
        let start = Instant::now();

        assert_eq!(clock.time_until_next(start), PERIOD);

        clock.poll(start, GameStatus::Running);
        assert_eq!(
            clock.time_until_next(start + Duration::from_millis(100)),
            Duration::from_millis(50)
        );
        assert_eq!(clock.time_until_next(start + PERIOD * 2), Duration::ZERO);
    }
}
