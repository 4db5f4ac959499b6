//! Renderer capability.
//!
//! The engine never draws anything; a finished [`LayoutPass`] is handed to a
//! [`SegmentRenderer`] supplied by the host view.

use std::fmt::Write as _;

use crate::models::layout::Segment;
use crate::services::engine::LayoutPass;
use crate::services::header::HeaderColumn;

/// Receives a layout pass in presentation order: every header column, then
/// the all-day segments, then each column's timed segments.
#[cfg_attr(test, mockall::automock)]
pub trait SegmentRenderer {
    fn column(&mut self, column: &HeaderColumn);
    fn all_day_segment(&mut self, segment: &Segment);
    fn timed_segment(&mut self, column: &HeaderColumn, segment: &Segment);
}

impl LayoutPass {
    pub fn render_into<R: SegmentRenderer + ?Sized>(&self, renderer: &mut R) {
        for column in &self.columns {
            renderer.column(column);
        }
        for segment in self.all_day_segments() {
            renderer.all_day_segment(segment);
        }
        for column in &self.columns {
            let key = column.key();
            for segment in self.timed_segments().filter(|s| s.key == key) {
                renderer.timed_segment(column, segment);
            }
        }
    }
}

/// Plain-text listing, one line per column or segment.
#[derive(Debug, Default)]
pub struct TextRenderer {
    output: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn flags(segment: &Segment) -> String {
        let mut flags = String::new();
        if segment.continues_before {
            flags.push('<');
        }
        if segment.continues_after {
            flags.push('>');
        }
        if segment.preview {
            flags.push('*');
        }
        flags
    }
}

impl SegmentRenderer for TextRenderer {
    fn column(&mut self, column: &HeaderColumn) {
        let _ = writeln!(
            self.output,
            "column {} {}{}",
            column.date,
            column.resource,
            column
                .label
                .as_deref()
                .map(|label| format!(" ({})", label))
                .unwrap_or_default()
        );
    }

    fn all_day_segment(&mut self, segment: &Segment) {
        let _ = writeln!(
            self.output,
            "  all-day #{} {:?} row {}/{} days {:.3}+{:.3} {}",
            segment.event_id,
            segment.title,
            segment.lane + 1,
            segment.total_lanes,
            segment.time_offset,
            segment.time_span,
            Self::flags(segment)
        );
    }

    fn timed_segment(&mut self, column: &HeaderColumn, segment: &Segment) {
        let _ = writeln!(
            self.output,
            "  {} {} #{} {:?} {}-{} lane {}/{} x {:.3}+{:.3} y {:.3}+{:.3} {}",
            column.date,
            column.resource,
            segment.event_id,
            segment.title,
            segment.interval.start.format("%H:%M"),
            segment.interval.end.format("%H:%M"),
            segment.lane + 1,
            segment.total_lanes,
            segment.offset,
            segment.span,
            segment.time_offset,
            segment.time_span,
            Self::flags(segment)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::Event;
    use crate::models::layout::SegmentArea;
    use crate::models::range::ViewRange;
    use crate::models::resource::ResourceSet;
    use crate::models::settings::LayoutConfig;
    use crate::services::engine::LayoutEngine;
    use chrono::{NaiveDate, NaiveDateTime};
    use mockall::Sequence;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 4, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample_pass() -> LayoutPass {
        let engine = LayoutEngine::new(LayoutConfig::by_day(), ResourceSet::default()).unwrap();
        let holiday = Event::builder()
            .id(1)
            .title("Holiday")
            .start(at(3, 0))
            .end(at(5, 0))
            .all_day(true)
            .build()
            .unwrap();
        let events = vec![
            Event::new(2, "Second day", at(4, 9), at(4, 10)).unwrap(),
            Event::new(3, "First day", at(3, 9), at(3, 10)).unwrap(),
            holiday,
        ];
        let range = ViewRange::consecutive(NaiveDate::from_ymd_opt(2015, 4, 3).unwrap(), 2).unwrap();
        engine.layout(&events, &range)
    }

    #[test]
    fn test_render_order() {
        let pass = sample_pass();
        let mut renderer = MockSegmentRenderer::new();
        let mut seq = Sequence::new();

        renderer
            .expect_column()
            .times(2)
            .in_sequence(&mut seq)
            .return_const(());
        renderer
            .expect_all_day_segment()
            .withf(|segment| segment.event_id == 1 && segment.area == SegmentArea::AllDay)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        renderer
            .expect_timed_segment()
            .withf(|column, segment| segment.event_id == 3 && column.key() == segment.key)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        renderer
            .expect_timed_segment()
            .withf(|column, segment| segment.event_id == 2 && column.key() == segment.key)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        pass.render_into(&mut renderer);
    }

    #[test]
    fn test_empty_pass_draws_nothing() {
        let pass = LayoutPass::default();
        let mut renderer = MockSegmentRenderer::new();
        renderer.expect_column().never();
        renderer.expect_all_day_segment().never();
        renderer.expect_timed_segment().never();
        pass.render_into(&mut renderer);
    }

    #[test]
    fn test_text_renderer_flags() {
        let pass = sample_pass();
        let mut renderer = TextRenderer::new();
        pass.render_into(&mut renderer);
        let output = renderer.finish();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "column 2015-04-03 *");
        assert!(lines[2].starts_with("  all-day #1 \"Holiday\" row 1/1 days 0.000+1.000"));
        assert!(lines[3].contains("#3 \"First day\" 09:00-10:00 lane 1/1"));
    }
}
