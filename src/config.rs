use std::time::Duration;

/// Execution limits for one interpreter run.
///
/// Both limits are off by default: a `while` loop whose condition never
/// becomes false then runs forever, and guarding against that is up to the
/// host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Total `while` iterations allowed across the whole program.
    pub max_loop_iterations: Option<u64>,
    /// Wall-clock time allowed for the whole program, checked once per loop
    /// iteration.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn with_max_loop_iterations(mut self, iterations: u64) -> Self {
        self.max_loop_iterations = Some(iterations);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
