use std::time::Instant;

/// Measures the seconds since the planner started solving, as printed in the log lines that
/// report each narrower placement.
#[derive(Debug, Copy, Clone)]
pub struct Stopwatch {
    started_at: Instant,
}

impl Stopwatch {
    pub fn starting_now() -> Stopwatch {
        Stopwatch {
            started_at: Instant::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
