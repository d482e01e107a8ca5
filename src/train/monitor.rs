use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::train::iteration_stats::IterationStats;

/// Receives per-iteration progress. Returning `Ok(false)` stops training
/// after the current iteration.
pub trait TrainingMonitor {
    fn on_iteration(&mut self, stats: &IterationStats) -> io::Result<bool>;
}

/// Writes `Iteration #n Error:x% ...` lines: the first iteration, then at most
/// one per `interval`, then the last one.
pub struct ConsoleMonitor<W: Write> {
    out: W,
    interval: Duration,
    last_report: Option<Instant>,
}

impl<W: Write> ConsoleMonitor<W> {
    pub fn new(out: W, interval: Duration) -> Self {
        ConsoleMonitor { out, interval, last_report: None }
    }
}

impl<W: Write> TrainingMonitor for ConsoleMonitor<W> {
    fn on_iteration(&mut self, stats: &IterationStats) -> io::Result<bool> {
        let due = match self.last_report {
            None => true,
            Some(at) => at.elapsed() >= self.interval || stats.remaining.is_zero(),
        };
        if due {
            writeln!(
                self.out,
                "Iteration #{} Error:{:.6}% elapsed time = {} time left = {}",
                stats.iteration,
                stats.error * 100.0,
                format_clock(stats.elapsed),
                format_clock(stats.remaining),
            )?;
            self.last_report = Some(Instant::now());
        }
        Ok(true)
    }
}

/// Single-line live progress, redrawn in place with `\r`.
pub struct LiveMonitor<W: Write> {
    out: W,
}

impl<W: Write> LiveMonitor<W> {
    pub fn new(out: W) -> Self {
        LiveMonitor { out }
    }

    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }
}

impl<W: Write> TrainingMonitor for LiveMonitor<W> {
    fn on_iteration(&mut self, stats: &IterationStats) -> io::Result<bool> {
        write!(
            self.out,
            "\r[{:>8}] error {:>10.6}%  elapsed {}  left {}{}",
            stats.iteration,
            stats.error * 100.0,
            format_clock(stats.elapsed),
            format_clock(stats.remaining),
            if stats.reset { "  (reset)" } else { "         " },
        )?;
        self.out.flush()?;
        Ok(true)
    }
}

/// `hh:mm:ss`, hours unbounded.
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(iteration: usize, remaining: u64) -> IterationStats {
        IterationStats {
            iteration,
            error: 0.125,
            elapsed: Duration::from_secs(61),
            remaining: Duration::from_secs(remaining),
            reset: false,
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_clock(Duration::from_secs(3725)), "01:02:05");
    }

    #[test]
    fn test_console_monitor_throttles_but_reports_last() {
        let mut buf = Vec::new();
        {
            let mut monitor = ConsoleMonitor::new(&mut buf, Duration::from_secs(3600));
            assert!(monitor.on_iteration(&stats(1, 30)).unwrap());
            assert!(monitor.on_iteration(&stats(2, 20)).unwrap());
            assert!(monitor.on_iteration(&stats(3, 0)).unwrap());
        }
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Iteration #1 Error:12.500000% elapsed time = 00:01:01 time left = 00:00:30");
        assert!(lines[1].starts_with("Iteration #3 "));
    }
}
