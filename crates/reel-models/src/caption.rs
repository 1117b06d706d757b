//! Timed caption lines and schedules.

use serde::{Deserialize, Serialize};

/// One caption line with its display window.
///
/// The line is visible during `[start, end)` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionLine {
    /// Display text (unescaped; rendering escapes it for the filter grammar).
    pub text: String,
    /// Window start in seconds from the beginning of the reel.
    pub start: f64,
    /// Window end in seconds.
    pub end: f64,
}

impl CaptionLine {
    /// Create a new caption line.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// An ordered sequence of caption lines covering the whole audio track.
///
/// Windows are contiguous and non-overlapping by construction, so at most
/// one line is visible at any instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSchedule {
    /// Lines in display order.
    pub lines: Vec<CaptionLine>,
    /// Total audio duration the schedule partitions, in seconds.
    pub total_duration: f64,
}

impl CaptionSchedule {
    /// Create a schedule from pre-timed lines.
    pub fn new(lines: Vec<CaptionLine>, total_duration: f64) -> Self {
        Self {
            lines,
            total_duration,
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the schedule has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the lines in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CaptionLine> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_duration() {
        let line = CaptionLine::new("hello", 1.5, 4.0);
        assert!((line.duration() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_accessors() {
        let schedule = CaptionSchedule::new(
            vec![
                CaptionLine::new("a", 0.0, 2.0),
                CaptionLine::new("b", 2.0, 4.0),
            ],
            4.0,
        );
        assert_eq!(schedule.len(), 2);
        assert!(!schedule.is_empty());
        assert_eq!(schedule.iter().count(), 2);
    }
}
