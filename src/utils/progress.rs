//! Page-quality tally
//!
//! Wikisource marks every transcribed page with a proofreading level from 0
//! to 4. The tally counts pages per level over a run.

use std::fmt;

use crate::utils::error::{ConversionError, ConversionResult};

/// Proofreading status names, indexed by level
pub const QUALITY_LABELS: [&str; 5] = [
    "Pages without text",
    "Pages that have not been proofread",
    "Problematic pages",
    "Proofread pages",
    "Validated pages",
];

/// Count of pages per quality level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressTally {
    status: [usize; 5],
}

impl ProgressTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one page at the given level
    pub fn record(&mut self, level: u8) -> ConversionResult<()> {
        let slot = self
            .status
            .get_mut(level as usize)
            .ok_or_else(|| ConversionError::invalid(format!("page quality {} out of range", level)))?;
        *slot += 1;
        Ok(())
    }

    pub fn count(&self, level: u8) -> usize {
        self.status.get(level as usize).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.status.iter().sum()
    }

    /// Share of pages at `level`, in percent, rounded to two places
    pub fn percentage(&self, level: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let raw = 100.0 * self.count(level) as f64 / total as f64;
        (raw * 100.0).round() / 100.0
    }
}

impl fmt::Display for ProgressTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number of pages parsed: {}", self.total())?;
        for (level, label) in QUALITY_LABELS.iter().enumerate() {
            let level = level as u8;
            write!(
                f,
                "\n{}: {} ({}%)",
                label,
                self.count(level),
                self.percentage(level)
            )?;
        }
        Ok(())
    }
}
