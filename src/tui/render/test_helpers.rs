use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::model::config::default_seed;
use crate::model::{TaskFields, UiConfig};
use crate::ops::task_ops::Store;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    render_with_buffer(w, h, f).0
}

/// Render into an in-memory buffer; return the plain text and the buffer
/// itself so tests can inspect styles.
pub fn render_with_buffer<F>(w: u16, h: u16, f: F) -> (String, Buffer)
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    (lines[..end].join("\n"), buf)
}

/// Position of the first cell where `text` starts. Single-width text only.
pub fn find_text(buf: &Buffer, text: &str) -> Option<(u16, u16)> {
    let chars: Vec<char> = text.chars().collect();
    let area = buf.area;
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if x as usize + chars.len() > area.right() as usize {
                break;
            }
            let hit = chars.iter().enumerate().all(|(i, c)| {
                let mut tmp = [0u8; 4];
                buf[(x + i as u16, y)].symbol() == c.encode_utf8(&mut tmp)
            });
            if hit {
                return Some((x, y));
            }
        }
    }
    None
}

/// Fixed date for the due-date picker
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// App holding the default seed task
pub fn seeded_app() -> App {
    let mut app = App::new(
        Store::with_seed(&default_seed()).unwrap(),
        &UiConfig::default(),
    );
    app.today = test_today();
    app
}

/// App whose list shows `titles` top to bottom, all to-do
pub fn app_with_tasks(titles: &[&str]) -> App {
    let mut store = Store::new();
    for title in titles.iter().rev() {
        store.add_task(TaskFields::new(*title)).unwrap();
    }
    let mut app = App::new(store, &UiConfig::default());
    app.today = test_today();
    app
}
