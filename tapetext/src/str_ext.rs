/// Characters that end a line of text
pub(crate) const LINE_BREAKS: [char; 4] = ['\n', '\r', '\x0b', '\x0c'];

pub(crate) trait StrExt {
    /// The byte index and value of the first line-breaking character, if any.
    fn find_line_break(&self) -> Option<(usize, char)>;
}

impl StrExt for str {
    fn find_line_break(&self) -> Option<(usize, char)> {
        self.char_indices().find(|(_, c)| LINE_BREAKS.contains(c))
    }
}
