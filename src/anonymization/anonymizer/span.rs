//! Rune-addressed slicing of text

use crate::anonymization::models::Location;
use crate::domain::AnonymizeError;

/// A text split around one span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitText<'a> {
    pub before: &'a str,
    pub span: &'a str,
    pub after: &'a str,
}

impl<'a> SplitText<'a> {
    /// Split `text` around `location`, counting offsets in runes
    ///
    /// # Errors
    ///
    /// [`AnonymizeError::OutOfBounds`] if the location does not fit the text.
    pub fn new(text: &'a str, location: &Location) -> Result<Self, AnonymizeError> {
        let range = location.rune_range(text.chars().count())?;
        let start = byte_offset(text, range.start);
        let end = start + byte_offset(&text[start..], range.len());

        Ok(Self {
            before: &text[..start],
            span: &text[start..end],
            after: &text[end..],
        })
    }

    /// Rebuild the text with the span replaced
    pub fn splice(&self, replacement: &str) -> String {
        let mut out =
            String::with_capacity(self.before.len() + replacement.len() + self.after.len());
        out.push_str(self.before);
        out.push_str(replacement);
        out.push_str(self.after);
        out
    }
}

fn byte_offset(text: &str, runes: usize) -> usize {
    text.char_indices()
        .nth(runes)
        .map_or(text.len(), |(index, _)| index)
}
