//! Reusable clickable UI components.
//!
//! [`ClickableList`] pairs rendered lines with click actions so that
//! rendering and click-target registration stay co-located: annotate a
//! line as clickable when you add it, then register all targets once
//! after layout is known.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;
use ratzilla::ratatui::widgets::Paragraph;

use crate::input::ClickState;

pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs into `lines`.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line. The action is bound to whatever row the line
    /// ends up on — inserting lines before it moves the target with it.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    /// Rendered height of the list at the given content width, counting
    /// wrapped lines. Uses `Paragraph::line_count` (the
    /// `unstable-rendered-line-info` ratatui feature).
    pub fn visual_height(&self, width: u16) -> u16 {
        if width == 0 {
            return self.lines.len() as u16;
        }
        Paragraph::new(self.lines.clone()).line_count(width) as u16
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines. `top_offset` and
    /// `bottom_offset` account for block borders. Assumes one visual row
    /// per logical line (no wrapping inside clickable rows).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}

impl<'a> Default for ClickableList<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_lines_register_at_their_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("first"), 10);
        cl.push_clickable(Line::from("second"), 11);

        let mut cs = ClickState::new();
        let area = Rect::new(0, 5, 40, 6);
        cl.register_targets(area, &mut cs, 1, 1);

        // Border offset 1: header at row 6, clickables at rows 7 and 8.
        assert_eq!(cs.hit_test(3, 6), None);
        assert_eq!(cs.hit_test(3, 7), Some(10));
        assert_eq!(cs.hit_test(3, 8), Some(11));
    }

    #[test]
    fn rows_outside_the_area_are_not_registered() {
        let mut cl = ClickableList::new();
        for i in 0..10 {
            cl.push_clickable(Line::from(format!("row {}", i)), 100 + i);
        }

        let mut cs = ClickState::new();
        // Only 3 content rows fit (height 5 minus two border rows).
        let area = Rect::new(0, 0, 40, 5);
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(0, 1), Some(100));
        assert_eq!(cs.hit_test(0, 3), Some(102));
        assert_eq!(cs.hit_test(0, 4), None);
    }

    #[test]
    fn interleaved_plain_lines_shift_targets() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("a"), 1);
        cl.push(Line::from(""));
        cl.push_clickable(Line::from("b"), 2);

        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 20, 10), &mut cs, 0, 0);

        assert_eq!(cs.hit_test(0, 0), Some(1));
        assert_eq!(cs.hit_test(0, 1), None);
        assert_eq!(cs.hit_test(0, 2), Some(2));
    }

    #[test]
    fn visual_height_counts_unwrapped_lines() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("one"));
        cl.push(Line::from("two"));
        assert_eq!(cl.visual_height(40), 2);
    }
}
