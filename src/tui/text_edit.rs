use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

fn grapheme_width(g: &str) -> usize {
    if g == "\t" {
        4
    } else {
        UnicodeWidthStr::width(g)
    }
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut result = String::new();
    for g in s.graphemes(true) {
        let gw = grapheme_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(g);
    }
    result.push('\u{2026}');
    result
}

/// Byte offset of the grapheme boundary at or before display column `col`
fn col_to_offset(line: &str, col: usize) -> usize {
    let mut width = 0;
    for (i, g) in line.grapheme_indices(true) {
        let gw = grapheme_width(g);
        if width + gw > col {
            return i;
        }
        width += gw;
    }
    line.len()
}

/// Tail of a single-line buffer that fits in `width` cells with the cursor visible.
/// Returns the visible text and the cursor's column inside it.
pub fn visible_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
    let cursor = cursor.min(text.len());
    let mut start = 0;
    // Keep one cell free for the cursor itself
    while start < cursor && display_width(&text[start..cursor]) + 1 > width {
        start = next_boundary(text, start).unwrap_or(cursor);
    }
    let col = display_width(&text[start..cursor]);
    let mut shown = String::new();
    let mut used = 0;
    for g in text[start..].graphemes(true) {
        let gw = grapheme_width(g);
        if used + gw > width {
            break;
        }
        used += gw;
        shown.push_str(g);
    }
    (shown, col)
}

fn next_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset >= s.len() {
        return None;
    }
    match s[offset..].grapheme_indices(true).nth(1) {
        Some((i, _)) => Some(offset + i),
        None => Some(s.len()),
    }
}

fn prev_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset == 0 {
        return None;
    }
    s[..offset].grapheme_indices(true).next_back().map(|(i, _)| i)
}

fn is_space(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// A text field buffer and its byte-offset cursor, borrowed for one edit.
///
/// The cursor always sits on a grapheme boundary. Single-line fields never
/// contain `\n`.
pub struct TextEdit<'a> {
    text: &'a mut String,
    cursor: &'a mut usize,
    multiline: bool,
}

impl<'a> TextEdit<'a> {
    pub fn single_line(text: &'a mut String, cursor: &'a mut usize) -> Self {
        *cursor = (*cursor).min(text.len());
        TextEdit {
            text,
            cursor,
            multiline: false,
        }
    }

    pub fn multi_line(text: &'a mut String, cursor: &'a mut usize) -> Self {
        *cursor = (*cursor).min(text.len());
        TextEdit {
            text,
            cursor,
            multiline: true,
        }
    }

    /// Insert text at the cursor. Single-line fields flatten newlines to spaces.
    pub fn insert_str(&mut self, s: &str) {
        let clean = if self.multiline {
            s.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            s.replace("\r\n", " ").replace(['\n', '\r'], " ")
        };
        self.text.insert_str(*self.cursor, &clean);
        *self.cursor += clean.len();
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_boundary(self.text.as_str(), *self.cursor) {
            self.text.drain(prev..*self.cursor);
            *self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_boundary(self.text.as_str(), *self.cursor) {
            self.text.drain(*self.cursor..next);
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_boundary(self.text.as_str(), *self.cursor) {
            *self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_boundary(self.text.as_str(), *self.cursor) {
            *self.cursor = next;
        }
    }

    /// Start of the previous whitespace-delimited word
    pub fn word_left(&mut self) {
        let graphemes: Vec<(usize, &str)> =
            self.text[..*self.cursor].grapheme_indices(true).collect();
        let mut idx = graphemes.len();
        while idx > 0 && is_space(graphemes[idx - 1].1) {
            idx -= 1;
        }
        while idx > 0 && !is_space(graphemes[idx - 1].1) {
            idx -= 1;
        }
        *self.cursor = graphemes.get(idx).map_or(0, |(i, _)| *i);
    }

    /// Start of the next whitespace-delimited word
    pub fn word_right(&mut self) {
        let base = *self.cursor;
        let graphemes: Vec<(usize, &str)> = self.text[base..].grapheme_indices(true).collect();
        let mut idx = 0;
        while idx < graphemes.len() && !is_space(graphemes[idx].1) {
            idx += 1;
        }
        while idx < graphemes.len() && is_space(graphemes[idx].1) {
            idx += 1;
        }
        *self.cursor = graphemes
            .get(idx)
            .map_or(self.text.len(), |(i, _)| base + i);
    }

    /// Delete back to the start of the previous word (Ctrl+W)
    pub fn delete_word_back(&mut self) {
        let end = *self.cursor;
        self.word_left();
        self.text.drain(*self.cursor..end);
    }

    fn line_start(&self) -> usize {
        self.text[..*self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.text[*self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| *self.cursor + i)
    }

    pub fn home(&mut self) {
        *self.cursor = self.line_start();
    }

    pub fn end(&mut self) {
        *self.cursor = self.line_end();
    }

    /// Delete back to the start of the current line (Ctrl+U)
    pub fn kill_to_line_start(&mut self) {
        let start = self.line_start();
        self.text.drain(start..*self.cursor);
        *self.cursor = start;
    }

    /// Move to the same column on the previous line. False on the first line.
    pub fn up(&mut self) -> bool {
        let start = self.line_start();
        if start == 0 {
            return false;
        }
        let col = display_width(&self.text[start..*self.cursor]);
        let prev_end = start - 1;
        let prev_start = self.text[..prev_end].rfind('\n').map_or(0, |i| i + 1);
        *self.cursor = prev_start + col_to_offset(&self.text[prev_start..prev_end], col);
        true
    }

    /// Move to the same column on the next line. False on the last line.
    pub fn down(&mut self) -> bool {
        let end = self.line_end();
        if end == self.text.len() {
            return false;
        }
        let col = display_width(&self.text[self.line_start()..*self.cursor]);
        let next_start = end + 1;
        let next_end = self.text[next_start..]
            .find('\n')
            .map_or(self.text.len(), |i| next_start + i);
        *self.cursor = next_start + col_to_offset(&self.text[next_start..next_end], col);
        true
    }
}

/// (line index, display column) of a byte offset in a multi-line buffer
pub fn line_and_col(text: &str, cursor: usize) -> (usize, usize) {
    let cursor = cursor.min(text.len());
    let before = &text[..cursor];
    let line = before.matches('\n').count();
    let start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, display_width(&text[start..cursor]))
}
