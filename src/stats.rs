use std::time::{Duration, Instant};

/// Interval between periodic reports
const REPORT_INTERVAL: Duration = Duration::from_millis(500);

pub trait Recorder {
    type Str: AsRef<str>;

    fn record(&mut self, ticks: u64, alive: usize);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> Self::Str;
}

/// The one-line status shown under the grid
///
/// `Ticks: N ~ Alive Cells: M ~ Delay: Dms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub ticks: u64,
    pub alive: usize,
    pub delay: Duration,
    pub running: bool,
}
impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ticks: {} ~ Alive Cells: {} ~ Delay: {}ms",
            self.ticks,
            self.alive,
            self.delay.as_millis()
        )?;
        if !self.running {
            f.write_str(" ~ paused")?;
        }
        Ok(())
    }
}

/// Tracks throughput for headless runs
pub struct RateRecord {
    ticks: u64,
    alive: usize,
    ticks_in_report: u64,
    last_report: Instant,
}
impl RateRecord {
    pub fn new(alive: usize) -> Self {
        Self {
            ticks: 0,
            alive,
            ticks_in_report: 0,
            last_report: Instant::now(),
        }
    }

    #[inline]
    pub fn alive(&self) -> usize {
        self.alive
    }
}
impl Recorder for RateRecord {
    type Str = String;

    fn record(&mut self, ticks: u64, alive: usize) {
        self.ticks_in_report += ticks.saturating_sub(self.ticks);
        self.ticks = ticks;
        self.alive = alive;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed() >= REPORT_INTERVAL
    }
    fn report(&mut self) -> Self::Str {
        let elapsed = self.last_report.elapsed().as_secs_f64();
        let ticks_per_sec = if elapsed > 0.0 {
            self.ticks_in_report as f64 / elapsed
        } else {
            0.0
        };
        // reset stats for next report
        self.last_report = Instant::now();
        self.ticks_in_report = 0;

        format!(
            "{:.02}gen/s ticks:{}, alive:{}",
            ticks_per_sec, self.ticks, self.alive
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_format() {
        let status = StatusLine {
            ticks: 12,
            alive: 417,
            delay: Duration::from_millis(500),
            running: true,
        };

        assert_eq!(
            status.to_string(),
            "Ticks: 12 ~ Alive Cells: 417 ~ Delay: 500ms"
        );
    }

    #[test]
    fn paused_status_line() {
        let status = StatusLine {
            ticks: 0,
            alive: 0,
            delay: Duration::from_millis(250),
            running: false,
        };

        assert!(status.to_string().ends_with("~ paused"));
    }

    #[test]
    fn rate_record_tracks_latest() {
        let mut record = RateRecord::new(10);
        record.record(1, 8);
        record.record(2, 7);

        assert_eq!(record.alive(), 7);
        let report = record.report();
        assert!(report.ends_with("ticks:2, alive:7"), "{report}");
        assert!(!record.has_report());
    }
}
