pub mod timing {
    use std::time::Duration;

    /// Watchdog and auto-hide pulse
    pub const TICK_INTERVAL: Duration = Duration::from_millis(250);
    /// How often the simulated engine reports progress
    pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);
    /// Delay between opening a source and the simulated load report
    pub const LOAD_DELAY: Duration = Duration::from_millis(300);
}

pub mod simulation {
    pub const DEFAULT_DURATION_SECS: f64 = 600.0;
}
