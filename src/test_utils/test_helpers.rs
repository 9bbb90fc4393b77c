use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use crate::main_app::App;
use crate::parsing::parse_html;
use crate::session::Session;

pub const TEST_URL: &str = "https://example.com/wiki/Example";

pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

pub fn create_test_app(html: &str) -> App {
    App::new(Session::new(TEST_URL, parse_html(html.as_bytes())))
}

/// Rows of the buffer as plain strings
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer.cell((x, y)).map(|cell| cell.symbol()).unwrap_or(" "))
                .collect()
        })
        .collect()
}

/// Position of the first occurrence of `needle` on screen
pub fn find_text(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
    buffer_lines(buffer)
        .iter()
        .enumerate()
        .find_map(|(y, line)| {
            line.find(needle).map(|byte_index| {
                let column = line[..byte_index].chars().count();
                (column as u16, y as u16)
            })
        })
}
