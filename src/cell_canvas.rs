//! A [`Canvas`] that rasterises into terminal cells.
//!
//! Layout units map onto a grid of cells `cell_width` x `cell_height` units
//! large. Terminal cells are roughly twice as tall as they are wide, so the
//! default 8x16 cell keeps a square widget looking round.

use crate::canvas::Canvas;
use crate::geometry::RectF;
use crate::paint::{Paint, TextAlign};
use lipgloss_extras::lipgloss::{Color, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Default cell width in layout units.
pub const DEFAULT_CELL_WIDTH: f32 = 8.0;
/// Default cell height in layout units.
pub const DEFAULT_CELL_HEIGHT: f32 = 16.0;

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Empty,
    Glyph { ch: char, color: String },
    // Right half of a double width glyph.
    Continuation,
}

/// A grid of coloured glyphs.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    width: f32,
    height: f32,
    cell_width: f32,
    cell_height: f32,
    cols: usize,
    rows: usize,
    slots: Vec<Slot>,
}

impl CellCanvas {
    /// Creates a blank surface covering `width` x `height` layout units.
    ///
    /// Non-positive cell sizes fall back to the defaults.
    pub fn new(width: f32, height: f32, cell_width: f32, cell_height: f32) -> Self {
        let cell_width = if cell_width > 0.0 {
            cell_width
        } else {
            DEFAULT_CELL_WIDTH
        };
        let cell_height = if cell_height > 0.0 {
            cell_height
        } else {
            DEFAULT_CELL_HEIGHT
        };
        let cols = (width.max(0.0) / cell_width).ceil() as usize;
        let rows = (height.max(0.0) / cell_height).ceil() as usize;

        Self {
            width,
            height,
            cell_width,
            cell_height,
            cols,
            rows,
            slots: vec![Slot::Empty; cols * rows],
        }
    }

    /// Number of cell columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cell rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The glyph at a cell, if anything was drawn there.
    pub fn glyph_at(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        match &self.slots[row * self.cols + col] {
            Slot::Glyph { ch, .. } => Some(*ch),
            _ => None,
        }
    }

    /// The colour at a cell, if anything was drawn there.
    pub fn color_at(&self, col: usize, row: usize) -> Option<&str> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        match &self.slots[row * self.cols + col] {
            Slot::Glyph { color, .. } => Some(color.as_str()),
            _ => None,
        }
    }

    /// Rows without any styling, blank cells as spaces.
    pub fn plain_lines(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                self.row_slots(row)
                    .iter()
                    .filter_map(|slot| match slot {
                        Slot::Empty => Some(' '),
                        Slot::Glyph { ch, .. } => Some(*ch),
                        Slot::Continuation => None,
                    })
                    .collect()
            })
            .collect()
    }

    /// Rows styled with lipgloss and joined by newlines.
    ///
    /// Consecutive glyphs of one colour are rendered as a single styled run.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows);

        for row in 0..self.rows {
            let mut line = String::new();
            let mut run = String::new();
            let mut run_color: Option<&str> = None;

            for slot in self.row_slots(row) {
                match slot {
                    Slot::Continuation => {}
                    Slot::Empty => {
                        flush_run(&mut line, &mut run, run_color.take());
                        line.push(' ');
                    }
                    Slot::Glyph { ch, color } => {
                        if run_color != Some(color.as_str()) {
                            flush_run(&mut line, &mut run, run_color.take());
                            run_color = Some(color.as_str());
                        }
                        run.push(*ch);
                    }
                }
            }
            flush_run(&mut line, &mut run, run_color);
            lines.push(line);
        }

        lines.join("\n")
    }

    fn row_slots(&self, row: usize) -> &[Slot] {
        let start = row * self.cols;
        &self.slots[start..start + self.cols]
    }

    fn cell_of(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let col = (x / self.cell_width) as usize;
        let row = (y / self.cell_height) as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    fn put(&mut self, col: usize, row: usize, slot: Slot) {
        let idx = row * self.cols + col;
        // Overwriting half of a wide glyph blanks the other half.
        let orphan = match &self.slots[idx] {
            Slot::Continuation if col > 0 => Some(idx - 1),
            Slot::Glyph { ch, .. } if ch.width() == Some(2) && col + 1 < self.cols => {
                Some(idx + 1)
            }
            _ => None,
        };
        if let Some(orphan) = orphan {
            self.slots[orphan] = Slot::Empty;
        }
        self.slots[idx] = slot;
    }
}

fn flush_run(line: &mut String, run: &mut String, color: Option<&str>) {
    if run.is_empty() {
        return;
    }
    match color {
        Some(color) => {
            let styled = Style::new().foreground(Color::from(color)).render(run.as_str());
            line.push_str(&styled);
        }
        None => line.push_str(run),
    }
    run.clear();
}

impl Canvas for CellCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn draw_arc(
        &mut self,
        oval: RectF,
        start_angle: f32,
        sweep_angle: f32,
        _use_center: bool,
        paint: &Paint,
    ) {
        if oval.is_empty() || sweep_angle == 0.0 || !sweep_angle.is_finite() {
            return;
        }
        let sweep = sweep_angle.clamp(-360.0, 360.0);
        let steps = ((sweep.abs() * 2.0).ceil() as usize).max(1);

        let rx = oval.width() / 2.0;
        let ry = oval.height() / 2.0;
        let (cx, cy) = (oval.center_x(), oval.center_y());

        let half = paint.stroke_width.max(0.0) / 2.0;
        let band_step = self.cell_width.min(self.cell_height) / 2.0;
        let bands = ((2.0 * half) / band_step).ceil() as usize;

        for i in 0..=steps {
            let angle = (start_angle + sweep * i as f32 / steps as f32).to_radians();
            let (sin, cos) = angle.sin_cos();
            for band in 0..=bands {
                let offset = if bands == 0 {
                    0.0
                } else {
                    -half + 2.0 * half * band as f32 / bands as f32
                };
                let x = cx + (rx + offset) * cos;
                let y = cy + (ry + offset) * sin;
                if let Some((col, row)) = self.cell_of(x, y) {
                    self.put(
                        col,
                        row,
                        Slot::Glyph {
                            ch: paint.glyph,
                            color: paint.color.clone(),
                        },
                    );
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        let center_y = y + self.font_metrics(paint).center_offset();
        if !(center_y >= 0.0) {
            return;
        }
        let row = (center_y / self.cell_height) as usize;
        if row >= self.rows {
            return;
        }

        let text_cols = text.width() as f32;
        let anchor = x / self.cell_width;
        let start = match paint.text_align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - text_cols / 2.0,
            TextAlign::Right => anchor - text_cols,
        };

        let mut col = start.round() as i64;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as i64;
            if w == 0 {
                continue;
            }
            let fits = col >= 0 && ((col + w) as usize) <= self.cols;
            if fits {
                let c = col as usize;
                self.put(
                    c,
                    row,
                    Slot::Glyph {
                        ch,
                        color: paint.color.clone(),
                    },
                );
                if w == 2 {
                    self.put(c + 1, row, Slot::Continuation);
                }
            }
            col += w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(glyph: char) -> Paint {
        Paint::round_stroke("#00FF00", 8.0, glyph)
    }

    #[test]
    fn test_grid_size() {
        let canvas = CellCanvas::new(160.0, 160.0, 8.0, 16.0);
        assert_eq!(canvas.cols(), 20);
        assert_eq!(canvas.rows(), 10);
        assert_eq!(canvas.plain_lines().len(), 10);
        assert!(canvas
            .plain_lines()
            .iter()
            .all(|l| l.len() == 20 && l.trim().is_empty()));
    }

    #[test]
    fn test_invalid_cell_size_falls_back() {
        let canvas = CellCanvas::new(80.0, 32.0, 0.0, -1.0);
        assert_eq!(canvas.cols(), 10);
        assert_eq!(canvas.rows(), 2);
    }

    #[test]
    fn test_full_circle_touches_all_sides() {
        let mut canvas = CellCanvas::new(160.0, 160.0, 8.0, 16.0);
        canvas.draw_arc(
            RectF::new(24.0, 24.0, 136.0, 136.0),
            0.0,
            360.0,
            false,
            &stroke('o'),
        );

        // 3 o'clock, 9 o'clock, 12 o'clock and 6 o'clock.
        assert_eq!(canvas.glyph_at(17, 5), Some('o'));
        assert_eq!(canvas.glyph_at(3, 5), Some('o'));
        assert_eq!(canvas.glyph_at(10, 1), Some('o'));
        assert_eq!(canvas.glyph_at(10, 8), Some('o'));
        // Centre stays empty.
        assert_eq!(canvas.glyph_at(10, 5), None);
    }

    #[test]
    fn test_quarter_arc_from_top_goes_clockwise() {
        let mut canvas = CellCanvas::new(160.0, 160.0, 8.0, 16.0);
        canvas.draw_arc(
            RectF::new(24.0, 24.0, 136.0, 136.0),
            270.0,
            90.0,
            false,
            &stroke('x'),
        );

        // Top right quadrant is drawn, bottom left is not.
        assert_eq!(canvas.glyph_at(10, 1), Some('x'));
        assert_eq!(canvas.glyph_at(17, 5), Some('x'));
        assert_eq!(canvas.glyph_at(3, 5), None);
        assert_eq!(canvas.glyph_at(10, 8), None);
    }

    #[test]
    fn test_zero_sweep_and_empty_oval_draw_nothing() {
        let mut canvas = CellCanvas::new(160.0, 160.0, 8.0, 16.0);
        canvas.draw_arc(
            RectF::new(24.0, 24.0, 136.0, 136.0),
            270.0,
            0.0,
            false,
            &stroke('x'),
        );
        canvas.draw_arc(
            RectF::new(100.0, 100.0, 60.0, 60.0),
            0.0,
            360.0,
            false,
            &stroke('x'),
        );
        assert!(canvas.plain_lines().iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_centered_text_lands_on_center_row() {
        let mut canvas = CellCanvas::new(160.0, 168.0, 8.0, 16.0);
        let paint = Paint::centered_text("#00FF00", 24.0);
        let metrics = canvas.font_metrics(&paint);
        canvas.draw_text("42%", 80.0, 84.0 - metrics.center_offset(), &paint);

        let lines = canvas.plain_lines();
        assert_eq!(lines[5].trim(), "42%");
        let start = lines[5].find("42%").unwrap_or(usize::MAX);
        assert!(start == 8 || start == 9);
    }

    #[test]
    fn test_text_clips_at_edges() {
        let mut canvas = CellCanvas::new(16.0, 16.0, 8.0, 16.0);
        let paint = Paint {
            text_align: TextAlign::Left,
            ..Paint::centered_text("#fff", 8.0)
        };
        canvas.draw_text("abcd", 0.0, 12.0, &paint);
        assert_eq!(canvas.plain_lines(), vec!["ab".to_string()]);
    }

    #[test]
    fn test_render_has_one_line_per_row() {
        let mut canvas = CellCanvas::new(80.0, 48.0, 8.0, 16.0);
        let paint = Paint {
            text_align: TextAlign::Left,
            ..Paint::centered_text("#ff0000", 8.0)
        };
        canvas.draw_text("ok", 0.0, 20.0, &paint);
        let rendered = canvas.render();
        assert_eq!(rendered.lines().count(), 3);
        assert!(lipgloss_extras::lipgloss::strip_ansi(&rendered).contains("ok"));
    }

    #[test]
    fn test_later_draws_overwrite() {
        let mut canvas = CellCanvas::new(160.0, 160.0, 8.0, 16.0);
        let oval = RectF::new(24.0, 24.0, 136.0, 136.0);
        canvas.draw_arc(oval, 0.0, 360.0, false, &Paint::round_stroke("#888888", 8.0, '░'));
        canvas.draw_arc(oval, 270.0, 90.0, false, &Paint::round_stroke("#00FF00", 8.0, '█'));
        assert_eq!(canvas.glyph_at(17, 5), Some('█'));
        assert_eq!(canvas.color_at(17, 5), Some("#00FF00"));
        assert_eq!(canvas.glyph_at(3, 5), Some('░'));
    }
}
