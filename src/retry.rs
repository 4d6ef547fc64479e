use std::time::Duration;

use rand::Rng;

use crate::{ClientOptions, DateTimeError};

/// Decides whether a failed attempt is retried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Retries every failure except configuration errors.
    #[default]
    RetryAll,
    /// Retries transport and body failures and 408/429/5xx statuses only.
    ///
    /// Other 4xx statuses, malformed bodies and unbuildable requests fail
    /// on the first attempt.
    Strict,
}

impl RetryPolicy {
    pub fn should_retry(self, err: &DateTimeError) -> bool {
        if err.is_configuration() {
            return false;
        }
        match self {
            Self::RetryAll => !matches!(err, DateTimeError::RetryExhausted { .. }),
            Self::Strict => match err {
                DateTimeError::Transport(_) | DateTimeError::Body(_) => true,
                DateTimeError::Http { status, .. } => {
                    matches!(*status, 408 | 429) || (500..600).contains(status)
                }
                _ => false,
            },
        }
    }
}

/// Exponential backoff schedule with randomized jitter and an elapsed-time
/// ceiling. One instance covers a single fetch.
#[derive(Clone, Debug)]
pub struct Backoff {
    current: Duration,
    multiplier: f64,
    max_interval: Duration,
    randomization_factor: f64,
    max_elapsed: Duration,
}

impl Backoff {
    pub fn from_options(options: &ClientOptions) -> Self {
        let multiplier = options.backoff_multiplier;
        let multiplier = if multiplier.is_finite() && multiplier >= 0.0 {
            multiplier
        } else {
            1.0
        };
        let randomization_factor = if options.randomization_factor.is_finite() {
            options.randomization_factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let max_interval = Duration::from_millis(options.max_backoff_ms);

        Self {
            current: Duration::from_millis(options.initial_backoff_ms).min(max_interval),
            multiplier,
            max_interval,
            randomization_factor,
            max_elapsed: Duration::from_millis(options.max_elapsed_ms),
        }
    }

    /// Returns the delay before the next attempt, or `None` once `elapsed`
    /// has reached the ceiling.
    ///
    /// A delay that would overshoot the ceiling is clamped so the final
    /// attempt starts right at it.
    pub fn next_delay(&mut self, elapsed: Duration) -> Option<Duration> {
        if elapsed >= self.max_elapsed {
            return None;
        }
        let delay = randomize(self.current, self.randomization_factor);
        self.advance();
        Some(delay.min(self.max_elapsed - elapsed))
    }

    fn advance(&mut self) {
        let next = self.current.as_secs_f64() * self.multiplier;
        self.current = if next.is_finite() && next < self.max_interval.as_secs_f64() {
            Duration::from_secs_f64(next)
        } else {
            self.max_interval
        };
    }
}

fn randomize(interval: Duration, factor: f64) -> Duration {
    if factor == 0.0 {
        return interval;
    }
    let base = interval.as_secs_f64();
    let spread = base * factor;
    let secs = rand::rng().random_range((base - spread)..=(base + spread));
    Duration::from_secs_f64(secs.max(0.0))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Backoff, RetryPolicy};
    use crate::{ClientOptions, DateTimeError};

    fn options(
        initial_ms: u64,
        multiplier: f64,
        max_ms: u64,
        max_elapsed_ms: u64,
    ) -> ClientOptions {
        ClientOptions {
            initial_backoff_ms: initial_ms,
            backoff_multiplier: multiplier,
            max_backoff_ms: max_ms,
            max_elapsed_ms,
            randomization_factor: 0.0,
            ..ClientOptions::default()
        }
    }

    #[test]
    fn intervals_grow_until_capped() {
        let mut backoff = Backoff::from_options(&options(100, 2.0, 1_000, 60_000));
        let delays: Vec<u128> = (0..6)
            .map(|_| backoff.next_delay(Duration::ZERO).unwrap().as_millis())
            .collect();

        assert_eq!(delays, vec![100, 200, 400, 800, 1_000, 1_000]);
    }

    #[test]
    fn default_schedule_starts_at_half_a_second() {
        let mut backoff = Backoff::from_options(&ClientOptions {
            randomization_factor: 0.0,
            ..ClientOptions::default()
        });

        assert_eq!(backoff.next_delay(Duration::ZERO), Some(Duration::from_millis(500)));
        assert_eq!(backoff.next_delay(Duration::ZERO), Some(Duration::from_millis(750)));
    }

    #[test]
    fn delay_is_clamped_to_remaining_budget() {
        let mut backoff = Backoff::from_options(&options(500, 1.5, 60_000, 30_000));
        assert_eq!(
            backoff.next_delay(Duration::from_millis(29_900)),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn stops_once_budget_is_spent() {
        let mut backoff = Backoff::from_options(&options(500, 1.5, 60_000, 30_000));
        assert_eq!(backoff.next_delay(Duration::from_secs(30)), None);
        assert_eq!(backoff.next_delay(Duration::from_secs(45)), None);
    }

    #[test]
    fn jitter_stays_within_randomization_window() {
        for _ in 0..100 {
            let mut backoff = Backoff::from_options(&ClientOptions {
                initial_backoff_ms: 1_000,
                randomization_factor: 0.5,
                ..ClientOptions::default()
            });
            let delay = backoff.next_delay(Duration::ZERO).unwrap();
            assert!(delay >= Duration::from_millis(500), "{delay:?}");
            assert!(delay <= Duration::from_millis(1_500), "{delay:?}");
        }
    }

    #[test]
    fn nonsensical_factors_are_sanitized() {
        let mut backoff = Backoff::from_options(&ClientOptions {
            initial_backoff_ms: 10,
            backoff_multiplier: f64::NAN,
            randomization_factor: f64::INFINITY,
            ..ClientOptions::default()
        });
        assert_eq!(backoff.next_delay(Duration::ZERO), Some(Duration::from_millis(10)));
        assert_eq!(backoff.next_delay(Duration::ZERO), Some(Duration::from_millis(10)));
    }

    #[test]
    fn retry_all_skips_only_configuration_errors() {
        let policy = RetryPolicy::RetryAll;
        assert!(policy.should_retry(&DateTimeError::Http {
            status: 404,
            body: String::new(),
        }));
        assert!(policy.should_retry(&DateTimeError::Decode("bad".to_owned())));
        assert!(!policy.should_retry(&DateTimeError::MissingEndpointConfig("url".to_owned())));
        assert!(!policy.should_retry(&DateTimeError::UnsupportedContentType("x".to_owned())));
    }

    #[test]
    fn strict_fails_fast_on_client_errors_and_bad_bodies() {
        let policy = RetryPolicy::Strict;
        let http = |status| DateTimeError::Http {
            status,
            body: String::new(),
        };

        assert!(policy.should_retry(&http(500)));
        assert!(policy.should_retry(&http(503)));
        assert!(policy.should_retry(&http(429)));
        assert!(policy.should_retry(&http(408)));
        assert!(!policy.should_retry(&http(404)));
        assert!(!policy.should_retry(&http(400)));
        assert!(!policy.should_retry(&DateTimeError::Decode("bad".to_owned())));
    }
}
