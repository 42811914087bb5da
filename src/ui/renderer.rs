//! Frame rendering for the chat screen

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::App;

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let lines = app.build_display_lines();

    // Account for the title row.
    let available_height = chunks[0].height.saturating_sub(1);
    let max_offset = app.max_scroll_offset(available_height, chunks[0].width);
    let scroll_offset = app.scroll_offset.min(max_offset);

    let title = format!(
        "Lucky AI v{} — {} (id {}) • {} • XP {} • {}",
        env!("CARGO_PKG_VERSION"),
        app.user.username,
        app.user.id,
        app.mode().label(),
        app.user.xp,
        app.user.rank(),
    );

    let transcript = Paragraph::new(lines)
        .block(Block::default().title(title))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));
    f.render_widget(transcript, chunks[0]);

    let input_style = if app.is_processing {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let input_title = if app.is_processing {
        "Луки расшифровывает... 🧠✨".to_string()
    } else if app.missing_required_image() {
        "Сначала скинь фото: /image <файл> 📸 (/help — подсказка, Ctrl+C — выход)".to_string()
    } else if app.pending_image.is_some() {
        "Фото прикреплено 📸 (/help — подсказка, Ctrl+C — выход)".to_string()
    } else {
        "Напиши что-нибудь дерзкое... 🔥 (/help — подсказка, Ctrl+C — выход)".to_string()
    };

    let input_text = if app.is_processing {
        // Pulsing indicator pinned to the right edge of the input box.
        let elapsed = app.pulse_start.elapsed().as_millis() as f32 / 1000.0;
        let pulse_phase = (elapsed * 2.0) % 2.0;
        let pulse_intensity = if pulse_phase < 1.0 {
            pulse_phase
        } else {
            2.0 - pulse_phase
        };
        let symbol = if pulse_intensity < 0.33 {
            '○'
        } else if pulse_intensity < 0.66 {
            '◐'
        } else {
            '●'
        };

        let inner_width = chunks[1].width.saturating_sub(2) as usize;
        let mut result = vec![' '; inner_width];
        let input_chars: Vec<char> = app.input.chars().collect();
        let max_input_len = inner_width.saturating_sub(3);

        for (i, &ch) in input_chars.iter().take(max_input_len).enumerate() {
            result[i] = ch;
        }
        if input_chars.len() > max_input_len && max_input_len >= 3 {
            result[max_input_len - 3] = '.';
            result[max_input_len - 2] = '.';
            result[max_input_len - 1] = '.';
        }
        if inner_width > 1 {
            result[inner_width - 2] = symbol;
        }
        result.into_iter().collect()
    } else {
        app.input.clone()
    };

    let input = Paragraph::new(input_text.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Reset))
                .title(input_title),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(input, chunks[1]);

    if !app.is_processing {
        let max_cursor_pos = chunks[1].width.saturating_sub(2);
        let cursor_x = (app.input.width() as u16 + 1).min(max_cursor_pos);
        f.set_cursor_position((chunks[1].x + cursor_x, chunks[1].y + 1));
    }
}
