use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use log::{debug, info};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};

use crate::event_source::EventSource;
use crate::markers::{highlight, link_line};
use crate::session::Session;
use crate::theme::{Base16Palette, current_theme};
use crate::types::LinkInfo;
use crate::widget::annotated::{reflow, to_lines};
use crate::widget::viewport::Viewport;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const MOUSE_SCROLL_LINES: usize = 3;
/// Columns kept free to the right of wrapped text
const WRAP_MARGIN: u16 = 2;
const MAX_EVENTS_PER_FRAME: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
}

pub struct App {
    session: Session,
    /// Annotated text of the whole page, fixed after load
    content: String,
    /// `content` wrapped at the current width
    wrapped: String,
    selected: usize,
    last_width: Option<u16>,
    viewport: Viewport,
}

impl App {
    pub fn new(session: Session) -> Self {
        let content = session.page.annotated_text();
        Self {
            session,
            content,
            wrapped: String::new(),
            selected: 0,
            last_width: None,
            viewport: Viewport::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Ordinal of the highlighted link. Not bounded by the link count.
    pub fn selected_link(&self) -> usize {
        self.selected
    }

    pub fn selected_link_info(&self) -> Option<&LinkInfo> {
        self.session.links.get(self.selected)
    }

    /// Re-wrap the page for a body `width` columns wide.
    pub fn set_width(&mut self, width: u16) {
        if self.last_width == Some(width) {
            return;
        }
        self.last_width = Some(width);

        let wrap_width = width.saturating_sub(WRAP_MARGIN) as usize;
        self.wrapped = reflow(&self.content, wrap_width);
        debug!(
            "Wrapped content at {wrap_width} columns into {} lines",
            self.wrapped.lines().count()
        );
        self.refresh_body();
    }

    fn refresh_body(&mut self) {
        let highlighted = highlight(&self.wrapped, self.selected);
        self.viewport
            .set_content(to_lines(&highlighted, current_theme()));
    }

    pub fn next_link(&mut self) {
        self.selected += 1;
        self.refresh_body();

        match link_line(&self.wrapped, self.selected) {
            Some(line) => self.viewport.ensure_visible(line),
            None => debug!(
                "Selected link {} is past the last of {} links",
                self.selected,
                self.session.links.len()
            ),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<AppAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Some(AppAction::Quit),
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppAction::Quit),
            KeyCode::Char('n') => self.next_link(),
            KeyCode::Char('d') => self.viewport.half_page_down(),
            KeyCode::Char('u') => self.viewport.half_page_up(),
            KeyCode::Char('j') | KeyCode::Down => self.viewport.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.viewport.scroll_up(1),
            KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('f') => {
                self.viewport.page_down()
            }
            KeyCode::PageUp | KeyCode::Char('b') => self.viewport.page_up(),
            KeyCode::Char('g') | KeyCode::Home => self.viewport.goto_top(),
            KeyCode::Char('G') | KeyCode::End => self.viewport.goto_bottom(),
            _ => {}
        }
        None
    }

    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::ScrollDown => self.viewport.scroll_down(MOUSE_SCROLL_LINES),
            MouseEventKind::ScrollUp => self.viewport.scroll_up(MOUSE_SCROLL_LINES),
            _ => {}
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let palette = current_theme();
        let area = f.area();

        let background_block = Block::default().style(Style::default().bg(palette.base_00));
        f.render_widget(background_block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.set_width(chunks[1].width);
        self.viewport.render(f, chunks[1]);

        self.render_header(f, chunks[0], palette);
        self.render_footer(f, chunks[2], palette);
    }

    /// Page title in a box, then a rule to the right edge.
    fn render_header(&self, f: &mut Frame, area: Rect, palette: &Base16Palette) {
        let title = Span::styled(self.session.page.title.clone(), palette.title_style());
        let box_width = boxed_width(title.width(), area.width);
        let border_set = border::Set {
            vertical_right: "├",
            ..border::ROUNDED
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(box_width), Constraint::Min(0)])
            .split(area);

        let block = Block::bordered()
            .border_set(border_set)
            .border_style(palette.border_style())
            .padding(Padding::horizontal(1));
        f.render_widget(Paragraph::new(Line::from(title)).block(block), chunks[0]);
        render_rule(f, chunks[1], palette);
    }

    /// A rule, then the scroll position in a box.
    fn render_footer(&self, f: &mut Frame, area: Rect, palette: &Base16Palette) {
        let info = Span::styled(
            format!("{:3.0}%", self.viewport.scroll_percent() * 100.0),
            palette.text_style(),
        );
        let box_width = boxed_width(info.width(), area.width);
        let border_set = border::Set {
            vertical_left: "┤",
            ..border::ROUNDED
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(box_width)])
            .split(area);

        render_rule(f, chunks[0], palette);
        let block = Block::bordered()
            .border_set(border_set)
            .border_style(palette.border_style())
            .padding(Padding::horizontal(1));
        f.render_widget(Paragraph::new(Line::from(info)).block(block), chunks[1]);
    }
}

/// Width of a bordered, padded box around `content_width` columns.
fn boxed_width(content_width: usize, available: u16) -> u16 {
    u16::try_from(content_width)
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(available)
}

fn render_rule(f: &mut Frame, area: Rect, palette: &Base16Palette) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let middle = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    let rule = Paragraph::new("─".repeat(area.width as usize)).style(palette.border_style());
    f.render_widget(rule, middle);
}

pub fn run_app_with_event_source<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()> {
    let poll_timeout = Duration::from_millis(250);
    terminal.draw(|f| app.draw(f))?;

    loop {
        if !event_source.poll(poll_timeout)? {
            continue;
        }

        let mut events_processed = 0;
        while events_processed < MAX_EVENTS_PER_FRAME && event_source.poll(Duration::ZERO)? {
            events_processed += 1;
            match event_source.read()? {
                Event::Key(key) => {
                    if app.handle_key_event(key) == Some(AppAction::Quit) {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse_event) => app.handle_mouse_event(mouse_event),
                // The next draw picks up the new size and re-wraps
                Event::Resize(cols, rows) => debug!("Terminal resized to {cols}x{rows}"),
                _ => {}
            }
        }

        terminal.draw(|f| app.draw(f))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_html;

    fn app_for(html: &str) -> App {
        App::new(Session::new("https://example.com", parse_html(html.as_bytes())))
    }

    fn press(app: &mut App, code: KeyCode) -> Option<AppAction> {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_for("<p>x</p>");
        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(AppAction::Quit));
        assert_eq!(press(&mut app, KeyCode::Esc), Some(AppAction::Quit));
        assert_eq!(
            app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppAction::Quit)
        );
        assert_eq!(press(&mut app, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_next_link_advances_by_one_without_clamp() {
        let mut app = app_for(r#"<p><a href="/1">one</a> <a href="/2">two</a></p>"#);
        app.set_width(40);
        assert_eq!(app.selected_link(), 0);
        assert_eq!(app.selected_link_info().map(|l| l.text.as_str()), Some("one"));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected_link(), 1);
        assert_eq!(app.selected_link_info().map(|l| l.text.as_str()), Some("two"));

        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected_link(), 3);
        assert!(app.selected_link_info().is_none());
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = app_for("<p><a>one</a></p>");
        let mut key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(app.handle_key_event(key), None);
        assert_eq!(app.selected_link(), 0);
    }

    #[test]
    fn test_width_change_rewraps() {
        let mut app = app_for("<p>alpha beta gamma delta</p>");
        app.set_width(40);
        assert_eq!(app.viewport().total_lines(), 1);
        app.set_width(12);
        assert_eq!(app.viewport().total_lines(), 3);
    }

    #[test]
    fn test_mouse_scroll() {
        let paragraphs: String = (0..30).map(|i| format!("<p>line {i}</p>")).collect();
        let mut app = app_for(&paragraphs);
        app.set_width(40);
        app.viewport.set_height(10);

        let scroll = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse_event(scroll(MouseEventKind::ScrollDown));
        assert_eq!(app.viewport().y_offset(), MOUSE_SCROLL_LINES);
        app.handle_mouse_event(scroll(MouseEventKind::ScrollUp));
        assert_eq!(app.viewport().y_offset(), 0);
    }

    #[test]
    fn test_half_page_keys_with_and_without_ctrl() {
        let paragraphs: String = (0..30).map(|i| format!("<p>line {i}</p>")).collect();
        let mut app = app_for(&paragraphs);
        app.set_width(40);
        app.viewport.set_height(10);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.viewport().y_offset(), 5);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(app.viewport().y_offset(), 10);
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.viewport().y_offset(), 5);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.viewport().y_offset(), 0);
    }

    #[test]
    fn test_boxed_width_saturates() {
        assert_eq!(boxed_width(7, 40), 11);
        assert_eq!(boxed_width(65533, 40), 40);
        assert_eq!(boxed_width(usize::MAX, u16::MAX), u16::MAX);
    }

    #[test]
    fn test_next_link_scrolls_into_view() {
        let mut html: String = (0..20).map(|i| format!("<p>filler {i}</p>")).collect();
        html.push_str(r#"<p><a href="/top">top</a></p>"#);
        html.insert_str(0, r#"<p><a href="/first">first</a></p>"#);
        let mut app = app_for(&html);
        app.set_width(40);
        app.viewport.set_height(5);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.viewport().y_offset(), 17);
    }
}
