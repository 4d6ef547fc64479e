use crate::RetryPolicy;

/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Wall-clock ceiling across all attempts of one fetch, in milliseconds.
    pub max_elapsed_ms: u64,
    /// First backoff interval in milliseconds.
    pub initial_backoff_ms: u64,
    /// Growth factor applied to the interval after each attempt.
    pub backoff_multiplier: f64,
    /// Upper bound for a single (pre-jitter) interval in milliseconds.
    pub max_backoff_ms: u64,
    /// Jitter spread; `0.5` draws each delay from `[0.5 * i, 1.5 * i]`.
    pub randomization_factor: f64,
    /// Which failures are worth another attempt.
    pub retry_policy: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_elapsed_ms: 30_000,
            initial_backoff_ms: 500,
            backoff_multiplier: 1.5,
            max_backoff_ms: 60_000,
            randomization_factor: 0.5,
            retry_policy: RetryPolicy::RetryAll,
        }
    }
}
