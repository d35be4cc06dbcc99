//! Providers of `(used, total)` memory readings.

use memtrack_core::{MetricReadError, Reading};
use std::{
    collections::VecDeque,
    path::PathBuf,
    time::Instant,
};
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

/// A source of memory readings.
///
/// `read` reports failures as they are. Substituting a value for a failed
/// read is up to the caller (see [`crate::Sampler::tick`]).
pub trait MetricSource {
    fn read(&mut self) -> Result<Reading, MetricReadError>;
}

impl<S: MetricSource + ?Sized> MetricSource for Box<S> {
    fn read(&mut self) -> Result<Reading, MetricReadError> {
        (**self).read()
    }
}

/// Parse the two-line `<label>:<used>` / `<label>:<total>` format.
///
/// The value is the text between the first and second `:`, trimmed.
pub fn parse_mem_tracker(raw: &str) -> Result<(u64, u64), MetricReadError> {
    let mut lines = raw.lines();

    let mut field = |line: usize| -> Result<u64, MetricReadError> {
        let text = lines.next().ok_or(MetricReadError::MissingLine { line })?;
        let value = text
            .split(':')
            .nth(1)
            .ok_or(MetricReadError::MissingSeparator { line })?
            .trim();
        value.parse::<u64>().map_err(|_| MetricReadError::InvalidValue {
            line,
            value: value.to_owned(),
        })
    };

    let used = field(1)?;
    let total = field(2)?;
    Ok((used, total))
}

// ── Pseudo-file ───────────────────────────────────────────────────────────────

/// Readings backed by a pseudo-file such as `/proc/mem_tracker`.
#[derive(Debug, Clone)]
pub struct ProcFileSource {
    path: PathBuf,
}

impl ProcFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcFileSource {
    fn default() -> Self {
        Self::new(memtrack_config::SourceConfig::DEFAULT_PATH)
    }
}

impl MetricSource for ProcFileSource {
    fn read(&mut self) -> Result<Reading, MetricReadError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let (used, total) = parse_mem_tracker(&raw)?;
        Ok(Reading::new(used, total))
    }
}

// ── Simulated ─────────────────────────────────────────────────────────────────

/// A sinusoidal signal oscillating between 40% and 80% with a period of 2π
/// seconds. Needs no kernel support, which makes it handy for demos.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    start: Instant,
}

impl SimulatedSource {
    /// Total reported by every simulated reading, in KB.
    pub const TOTAL_KB: u64 = 100_000;

    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    /// The reading `elapsed_secs` after start.
    pub fn sample_at(elapsed_secs: f64) -> Reading {
        let percent = 60.0 + 20.0 * elapsed_secs.sin();
        let used = (percent * 1_000.0) as u64;
        Reading::new(used, Self::TOTAL_KB)
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for SimulatedSource {
    fn read(&mut self) -> Result<Reading, MetricReadError> {
        Ok(Self::sample_at(self.start.elapsed().as_secs_f64()))
    }
}

// ── Live system RAM ───────────────────────────────────────────────────────────

/// Live RAM usage via `sysinfo`, reported in KB.
pub struct SystemSource {
    sys: System,
}

impl SystemSource {
    pub fn new() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        Self { sys }
    }
}

impl Default for SystemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for SystemSource {
    fn read(&mut self) -> Result<Reading, MetricReadError> {
        self.sys.refresh_memory();

        let total = self.sys.total_memory() / 1024;
        if total == 0 {
            return Err(MetricReadError::Unavailable(
                "sysinfo reported no physical memory".into(),
            ));
        }

        Ok(Reading::new(self.sys.used_memory() / 1024, total))
    }
}

// ── Scripted ──────────────────────────────────────────────────────────────────

/// Replays a fixed script of readings; every read past the end fails.
///
/// `None` entries in the script fail as well, standing in for a broken source.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    script: VecDeque<Option<Reading>>,
    reads:  usize,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Option<Reading>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            reads:  0,
        }
    }

    /// One successful reading per percentage (`total` = 1000).
    pub fn from_percents(percents: impl IntoIterator<Item = f64>) -> Self {
        Self::new(percents.into_iter().map(|p| {
            Some(Reading {
                used: (p * 10.0).round() as u64,
                total: 1_000,
                percent: p,
            })
        }))
    }

    /// Number of times `read` has been called.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl MetricSource for ScriptedSource {
    fn read(&mut self) -> Result<Reading, MetricReadError> {
        self.reads += 1;
        self.script
            .pop_front()
            .flatten()
            .ok_or_else(|| MetricReadError::Unavailable("scripted failure".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "memtrack-{name}-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_two_line_format() {
        assert_eq!(parse_mem_tracker("used: 450\ntotal: 1000\n").unwrap(), (450, 1000));
    }

    #[test]
    fn parse_trims_whitespace_after_colon() {
        assert_eq!(parse_mem_tracker("Used:\t 12 \nTotal:   34").unwrap(), (12, 34));
    }

    #[test]
    fn parse_reports_missing_line() {
        let err = parse_mem_tracker("used: 450\n").unwrap_err();
        assert!(matches!(err, MetricReadError::MissingLine { line: 2 }));
    }

    #[test]
    fn parse_reports_missing_separator() {
        let err = parse_mem_tracker("used 450\ntotal: 1000").unwrap_err();
        assert!(matches!(err, MetricReadError::MissingSeparator { line: 1 }));
    }

    #[test]
    fn parse_reports_invalid_value() {
        let err = parse_mem_tracker("used: 450\ntotal: lots").unwrap_err();
        match err {
            MetricReadError::InvalidValue { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn proc_file_source_reads_file() {
        let path = temp_file("proc-ok", "used: 450\ntotal: 1000\n");
        let mut source = ProcFileSource::new(&path);
        let reading = source.read().unwrap();
        assert_eq!(reading, Reading::new(450, 1000));
        assert_eq!(reading.percent, 45.0);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn proc_file_source_zero_total() {
        let path = temp_file("proc-zero", "used: 5\ntotal: 0\n");
        let reading = ProcFileSource::new(&path).read().unwrap();
        assert_eq!(reading.percent, 0.0);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut source = ProcFileSource::new("/nonexistent/memtrack/mem_tracker");
        assert!(matches!(source.read(), Err(MetricReadError::Io(_))));
    }

    #[test]
    fn scripted_source_replays_then_fails() {
        let mut source = ScriptedSource::new([Some(Reading::new(1, 2)), None]);
        assert_eq!(source.read().unwrap().percent, 50.0);
        assert!(source.read().is_err());
        assert!(source.read().is_err());
    }

    #[test]
    fn simulated_source_stays_in_band() {
        for step in 0..100 {
            let reading = SimulatedSource::sample_at(step as f64 * 0.37);
            assert!((39.9..=80.0).contains(&reading.percent), "{}", reading.percent);
            assert_eq!(reading.total, SimulatedSource::TOTAL_KB);
        }
        assert!((SimulatedSource::sample_at(0.0).percent - 60.0).abs() < 1e-9);
    }

    #[test]
    fn boxed_sources_delegate() {
        let mut source: Box<dyn MetricSource> = Box::new(ScriptedSource::from_percents([12.5]));
        assert_eq!(source.read().unwrap().percent, 12.5);
        assert!(source.read().is_err());
    }
}
