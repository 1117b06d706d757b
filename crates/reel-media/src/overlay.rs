//! Typed caption overlay specifications.
//!
//! A [`DrawTextSpec`] is the renderer-neutral description of one burned-in
//! caption: escaped text, a display window, and a font size. Lowering to
//! the ffmpeg drawtext grammar happens in one place so the caption
//! scheduler never handles filter syntax.

use reel_models::CaptionSchedule;

use crate::captions::escape_overlay_text;

/// One caption overlay, gated to its display window.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawTextSpec {
    /// Filter-safe (already escaped) caption text.
    pub text: String,
    /// Window start in seconds.
    pub start: f64,
    /// Window end in seconds.
    pub end: f64,
    /// Font size in pixels.
    pub font_size: u32,
}

impl DrawTextSpec {
    /// Build overlay specs from a caption schedule, skipping blank lines.
    pub fn from_schedule(schedule: &CaptionSchedule, font_size: u32) -> Vec<Self> {
        schedule
            .iter()
            .filter_map(|line| {
                let text = escape_overlay_text(&line.text);
                if text.is_empty() {
                    return None;
                }
                Some(Self {
                    text,
                    start: line.start,
                    end: line.end,
                    font_size,
                })
            })
            .collect()
    }

    /// Lower this spec to a drawtext filter expression.
    ///
    /// Single centered line near the bottom of the frame, boxed for
    /// contrast, enabled only inside its window.
    pub fn to_filter(&self) -> String {
        format!(
            "drawtext=text='{}':fontcolor=white:fontsize={}:box=1:boxcolor=black@0.5:boxborderw=12:x=(w-text_w)/2:y=h-(h/5):enable='between(t,{:.3},{:.3})'",
            self.text, self.font_size, self.start, self.end
        )
    }
}

/// Chain overlay specs into a single filter expression.
///
/// Returns `None` when there is nothing to draw.
pub fn build_drawtext_chain(specs: &[DrawTextSpec]) -> Option<String> {
    if specs.is_empty() {
        return None;
    }
    Some(
        specs
            .iter()
            .map(DrawTextSpec::to_filter)
            .collect::<Vec<_>>()
            .join(","),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::{CaptionLine, CaptionSchedule};

    fn schedule() -> CaptionSchedule {
        CaptionSchedule::new(
            vec![
                CaptionLine::new("first line", 0.0, 2.5),
                CaptionLine::new("", 2.5, 5.0),
                CaptionLine::new("it's 100% news", 5.0, 7.5),
            ],
            7.5,
        )
    }

    #[test]
    fn test_blank_lines_emit_no_overlay() {
        let specs = DrawTextSpec::from_schedule(&schedule(), 36);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].text, "first line");
    }

    #[test]
    fn test_specs_carry_escaped_text() {
        let specs = DrawTextSpec::from_schedule(&schedule(), 36);
        assert_eq!(specs[1].text, "it\\'s 100\\% news");
    }

    #[test]
    fn test_filter_contains_enable_window() {
        let spec = DrawTextSpec {
            text: "hello".to_string(),
            start: 2.5,
            end: 5.0,
            font_size: 40,
        };
        let filter = spec.to_filter();
        assert!(filter.contains("enable='between(t,2.500,5.000)'"));
        assert!(filter.contains("fontsize=40"));
        assert!(filter.contains("x=(w-text_w)/2"));
    }

    #[test]
    fn test_chain_joins_with_comma() {
        let specs = DrawTextSpec::from_schedule(&schedule(), 36);
        let chain = build_drawtext_chain(&specs).unwrap();
        assert_eq!(chain.matches("drawtext=").count(), 2);
        assert!(chain.contains("',drawtext="));
    }

    #[test]
    fn test_empty_chain() {
        assert!(build_drawtext_chain(&[]).is_none());
    }
}
