use unicode_width::UnicodeWidthStr;

/// Single-line text input used by the chat composer, the login form and the
/// edit screens.
///
/// The cursor is a byte offset into `content` and always sits on a char
/// boundary, so multibyte input (pasted emoji, accented names) edits cleanly.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    content: String,
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.len();
        Self { content, cursor }
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a whole string at the cursor. Used for bracketed paste.
    pub fn insert_str(&mut self, s: &str) {
        self.content.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor (Backspace).
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.content.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    /// Delete the character under the cursor (Delete).
    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.content.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Take the content out of the field, leaving it empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    /// Display column of the cursor, counting wide characters as two cells.
    pub fn cursor_column(&self) -> usize {
        self.content[..self.cursor].width()
    }

    /// Slice of the content to draw in a window `width` cells wide, together
    /// with the cursor column inside that slice. Scrolls so the cursor stays
    /// visible, keeping one trailing cell free for the cursor block.
    pub fn visible_window(&self, width: usize) -> (&str, usize) {
        if width == 0 {
            return ("", 0);
        }
        let cursor_col = self.cursor_column();
        let mut skip_cols = 0;
        if cursor_col >= width {
            skip_cols = cursor_col - width + 1;
        }

        let mut start = 0;
        let mut skipped = 0;
        for (idx, c) in self.content.char_indices() {
            if skipped >= skip_cols {
                start = idx;
                break;
            }
            skipped += unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            start = idx + c.len_utf8();
        }

        let mut end = start;
        let mut taken = 0;
        for (idx, c) in self.content[start..].char_indices() {
            let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if taken + w > width {
                break;
            }
            taken += w;
            end = start + idx + c.len_utf8();
        }

        (&self.content[start..end], cursor_col - skipped)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}
