//! Wrapping and styling of annotated text for the body view.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use textwrap::{Options, WordSeparator, WrapAlgorithm};

use crate::theme::Base16Palette;

const ESC: char = '\x1b';

/// Word-wrap annotated text to `width` columns.
///
/// Words are only split on ASCII spaces and never broken, so a marker stays
/// glued to the word it precedes. Marker bytes do not count toward the width.
pub fn reflow(text: &str, width: usize) -> String {
    let options = Options::new(width.max(1))
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .break_words(false);

    textwrap::wrap(text, options).join("\n")
}

/// Convert (possibly highlighted) annotated text into styled lines.
///
/// Styles carry over line breaks, so a link wrapped onto the next line keeps
/// its color. Escape sequences other than the known markers are dropped.
pub fn to_lines(text: &str, palette: &Base16Palette) -> Vec<Line<'static>> {
    let base = palette.text_style();
    let mut style = base;
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ESC => {
                let mut sequence = String::new();
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            sequence.push(next);
                            break;
                        }
                        sequence.push(next);
                    }
                }

                if let Some(params) = sequence.strip_suffix('m') {
                    flush(&mut current, &mut spans, style);
                    style = apply_sgr(params, style, base, palette);
                }
            }
            '\n' => {
                flush(&mut current, &mut spans, style);
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
            _ => current.push(ch),
        }
    }

    flush(&mut current, &mut spans, style);
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

fn flush(current: &mut String, spans: &mut Vec<Span<'static>>, style: Style) {
    if !current.is_empty() {
        spans.push(Span::styled(std::mem::take(current), style));
    }
}

fn apply_sgr(params: &str, style: Style, base: Style, palette: &Base16Palette) -> Style {
    params
        .split(';')
        .fold(style, |style, code| match code {
            "" | "0" => base,
            "7" => style.add_modifier(Modifier::REVERSED),
            "31" => style.patch(palette.heading_style()),
            "32" => style.patch(palette.link_style()),
            _ => style,
        })
}
