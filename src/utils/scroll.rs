//! Transcript line building and scroll math
//!
//! Ratatui wraps paragraphs at render time, so scroll offsets have to be
//! computed against an estimate of the wrapped line count that matches
//! `Wrap { trim: true }` behavior.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::TranscriptEntry;

const USER_PREFIX: &str = "Ты: ";

/// Build display lines for the whole transcript.
pub fn build_display_lines(entries: &[TranscriptEntry]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in entries {
        add_entry_lines(&mut lines, entry);
    }
    lines
}

fn add_entry_lines(lines: &mut Vec<Line<'static>>, entry: &TranscriptEntry) {
    match entry {
        TranscriptEntry::Turn(msg) if msg.role.is_user() => {
            lines.push(Line::from(vec![
                Span::styled(
                    USER_PREFIX,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(msg.text.clone(), Style::default().fg(Color::Cyan)),
            ]));
            if let Some(uri) = &msg.image {
                let mime = crate::utils::image::parse_data_uri(uri)
                    .map(|p| p.mime_type)
                    .unwrap_or_else(|| "image".to_string());
                lines.push(Line::from(Span::styled(
                    format!("[фото: {mime}]"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(""));
        }
        TranscriptEntry::Turn(msg) => {
            // Lucky's replies: no prefix, split so wrapping stays sane.
            for content_line in msg.text.lines() {
                if content_line.trim().is_empty() {
                    lines.push(Line::from(""));
                } else {
                    lines.push(Line::from(Span::styled(
                        content_line.to_string(),
                        Style::default().fg(Color::White),
                    )));
                }
            }
            lines.push(Line::from(""));
        }
        TranscriptEntry::Notice(text) => {
            lines.push(Line::from(Span::styled(
                text.clone(),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
        }
    }
}

/// Estimate how many terminal rows the lines occupy after word wrapping.
pub fn wrapped_line_count(lines: &[Line], terminal_width: u16) -> u16 {
    let mut total = 0u16;
    for line in lines {
        let text = line.to_string();
        let trimmed = text.trim();
        if trimmed.is_empty() || terminal_width == 0 {
            total = total.saturating_add(1);
        } else {
            total = total.saturating_add(word_wrapped_lines(trimmed, terminal_width));
        }
    }
    total
}

fn word_wrapped_lines(text: &str, terminal_width: u16) -> u16 {
    let width = terminal_width as usize;
    let mut current_len = 0usize;
    let mut count = 1u16;

    for word in text.split_whitespace() {
        let word_len = word.width();
        if current_len > 0 && current_len + 1 + word_len > width {
            count = count.saturating_add(1);
            current_len = word_len;
        } else {
            if current_len > 0 {
                current_len += 1;
            }
            current_len += word_len;
        }
    }
    count
}

/// Largest valid scroll offset for the transcript.
pub fn max_scroll_offset(
    entries: &[TranscriptEntry],
    terminal_width: u16,
    available_height: u16,
) -> u16 {
    let lines = build_display_lines(entries);
    let total = wrapped_line_count(&lines, terminal_width);
    total.saturating_sub(available_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;

    fn turn(entry: Message) -> TranscriptEntry {
        TranscriptEntry::Turn(entry)
    }

    #[test]
    fn user_turns_get_a_prefix_and_spacing() {
        let lines = build_display_lines(&[turn(Message::user("привет", None))]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].to_string().starts_with(USER_PREFIX));
    }

    #[test]
    fn image_turns_show_a_marker_line() {
        let uri = crate::utils::image::encode_data_uri("image/png", b"png");
        let lines = build_display_lines(&[turn(Message::user("смотри", Some(uri)))]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].to_string(), "[фото: image/png]");
    }

    #[test]
    fn model_turns_split_into_their_own_lines() {
        let lines = build_display_lines(&[turn(Message::model("раз\n\nдва"))]);
        // Two content lines, one blank in between, one trailing spacer.
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn wrapping_estimates_match_width() {
        let lines = vec![Line::from("слово ".repeat(10).trim().to_string())];
        assert_eq!(wrapped_line_count(&lines, 200), 1);
        assert!(wrapped_line_count(&lines, 12) > 1);
        // Zero width never divides by zero.
        assert_eq!(wrapped_line_count(&lines, 0), 1);
    }

    #[test]
    fn short_transcripts_cannot_scroll() {
        let entries = vec![turn(Message::user("привет", None))];
        assert_eq!(max_scroll_offset(&entries, 80, 40), 0);
    }
}
