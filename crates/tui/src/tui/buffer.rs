/// Single-line input with a byte-offset cursor and a character cap.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    max_chars: usize,
}

impl TextBuffer {
    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            max_chars,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the contents, dropping anything past the cap, cursor at the end.
    pub fn set<T: Into<String>>(&mut self, value: T) {
        let value: String = value.into();
        self.text = value
            .chars()
            .filter(|ch| !ch.is_control())
            .take(self.max_chars)
            .collect();
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.text.chars().count() >= self.max_chars {
            return false;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        true
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.drain(idx..self.cursor);
            self.cursor = idx;
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.text.drain(self.cursor..self.cursor + ch.len_utf8());
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Text before and after the cursor, for drawing a caret between them.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_places_cursor_at_end() {
        let mut buffer = TextBuffer::new(20);
        buffer.set("hello");

        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.split_at_cursor(), ("hello", ""));
    }

    #[test]
    fn set_truncates_to_cap() {
        let mut buffer = TextBuffer::new(3);
        buffer.set("abcdef");
        assert_eq!(buffer.as_str(), "abc");
    }

    #[test]
    fn insert_respects_cap_and_rejects_newlines() {
        let mut buffer = TextBuffer::new(2);
        assert!(buffer.insert_char('a'));
        assert!(!buffer.insert_char('\n'));
        assert!(buffer.insert_char('é'));
        assert!(!buffer.insert_char('z'));
        assert_eq!(buffer.as_str(), "aé");
    }

    #[test]
    fn editing_in_the_middle_handles_multibyte() {
        let mut buffer = TextBuffer::new(10);
        buffer.set("añb");
        buffer.move_left();
        buffer.backspace();
        assert_eq!(buffer.as_str(), "ab");
        assert_eq!(buffer.split_at_cursor(), ("a", "b"));

        buffer.insert_char('ü');
        buffer.move_home();
        buffer.delete_char();
        assert_eq!(buffer.as_str(), "üb");
        buffer.move_end();
        assert_eq!(buffer.split_at_cursor(), ("üb", ""));
    }
}
