use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};

/// Vertically scrollable view over pre-wrapped lines.
#[derive(Default)]
pub struct Viewport {
    lines: Vec<Line<'static>>,
    y_offset: usize,
    height: usize,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content, keeping the offset when it still points at a line.
    pub fn set_content(&mut self, lines: Vec<Line<'static>>) {
        self.lines = lines;
        if self.y_offset > self.lines.len().saturating_sub(1) {
            self.goto_bottom();
        }
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.y_offset = self.y_offset.min(self.max_y_offset());
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    fn max_y_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.y_offset = (self.y_offset + n).min(self.max_y_offset());
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_sub(n);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.height / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.height / 2).max(1));
    }

    pub fn goto_top(&mut self) {
        self.y_offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.y_offset = self.max_y_offset();
    }

    /// Scroll the least amount that brings `line` on screen.
    pub fn ensure_visible(&mut self, line: usize) {
        if line < self.y_offset {
            self.y_offset = line;
        } else if self.height > 0 && line >= self.y_offset + self.height {
            self.y_offset = (line + 1 - self.height).min(self.max_y_offset());
        }
    }

    /// Fraction of the content scrolled past, 1.0 when everything fits.
    pub fn scroll_percent(&self) -> f64 {
        if self.height >= self.lines.len() {
            return 1.0;
        }
        let scrolled = self.y_offset as f64 / (self.lines.len() - self.height) as f64;
        scrolled.clamp(0.0, 1.0)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.set_height(area.height as usize);

        let start = self.y_offset.min(self.lines.len());
        let end = (start + self.height).min(self.lines.len());
        let visible = self.lines[start..end].to_vec();

        f.render_widget(Paragraph::new(visible), area);
    }
}
