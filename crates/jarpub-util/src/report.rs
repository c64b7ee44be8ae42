//! Diagnostic reporting passed explicitly into resolvers and mergers.
//!
//! A report is a one-line title plus a multi-line "proposed action" detail.
//! Resolvers never reach for a global logger; the caller decides where the
//! messages go by choosing the [`Reporter`] implementation.

use std::sync::Mutex;

/// Prefix attached to every reported title.
pub const LOG_PREFIX: &str = "[jarpub]";

/// Severity of a reported message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

/// A recorded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: Level,
    pub title: String,
    pub detail: String,
}

/// Receiver of warnings and errors raised while resolving configuration.
pub trait Reporter {
    fn report(&self, level: Level, title: &str, detail: &str);

    fn warn(&self, title: &str, detail: &str) {
        self.report(Level::Warning, title, detail);
    }

    fn error(&self, title: &str, detail: &str) {
        self.report(Level::Error, title, detail);
    }
}

/// The lines a report is written as: the title, then the proposed action
/// block when there is a detail.
pub fn report_lines(level: Level, title: &str, detail: &str) -> Vec<String> {
    let tag = match level {
        Level::Warning => "WARNING",
        Level::Error => "ERROR",
    };
    let mut lines = vec![format!("{tag}: {LOG_PREFIX} {title}")];
    if !detail.is_empty() {
        lines.push(format!("{LOG_PREFIX} ------ Proposed action"));
        lines.extend(detail.lines().map(|line| format!("{LOG_PREFIX} {line}")));
        lines.push(format!("{LOG_PREFIX} ------"));
    }
    lines
}

/// Writes reports through `tracing`, every line at the report's level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, level: Level, title: &str, detail: &str) {
        for line in report_lines(level, title, detail) {
            match level {
                Level::Warning => tracing::warn!("{line}"),
                Level::Error => tracing::error!("{line}"),
            }
        }
    }
}

/// Collects reports in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    reports: Mutex<Vec<Report>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<Report> {
        self.reports()
            .into_iter()
            .filter(|r| r.level == Level::Warning)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: Level, title: &str, detail: &str) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(Report {
                level,
                title: title.to_string(),
                detail: detail.to_string(),
            });
        }
    }
}
