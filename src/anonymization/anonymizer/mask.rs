//! Mask primitive

use super::span::SplitText;
use crate::anonymization::models::Location;
use crate::domain::AnonymizeError;

/// Parse a mask character, which must be exactly one rune
pub fn parse_mask_char(masking_character: &str) -> Result<char, AnonymizeError> {
    let mut chars = masking_character.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(AnonymizeError::InvalidMaskChar(
            masking_character.to_string(),
        )),
    }
}

/// Mask up to `chars_to_mask` runes of the span from the front or the back
///
/// Counts past the span length mask the whole span; zero or negative counts
/// leave the span as is.
pub fn mask_value(
    text: &str,
    location: &Location,
    masking_character: &str,
    chars_to_mask: i32,
    from_end: bool,
) -> Result<String, AnonymizeError> {
    let split = SplitText::new(text, location)?;
    let mask = parse_mask_char(masking_character)?;

    let span_len = split.span.chars().count();
    let count = usize::try_from(chars_to_mask).unwrap_or(0).min(span_len);
    let masked_range = if from_end {
        span_len - count..span_len
    } else {
        0..count
    };

    let masked: String = split
        .span
        .chars()
        .enumerate()
        .map(|(i, c)| if masked_range.contains(&i) { mask } else { c })
        .collect();

    Ok(split.splice(&masked))
}
