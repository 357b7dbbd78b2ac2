//! Lexical analyzer for the TF-IDF index.
//!
//! Lowercases, splits on non-alphanumeric characters, and keeps tokens of at
//! least [`MIN_LEXICAL_TOKEN_LEN`](crate::config::MIN_LEXICAL_TOKEN_LEN) characters.
//! No stop words are removed here: the text blob arrives already normalized.
//! Tokens are byte spans into one lowercased buffer, so analysis costs a
//! single allocation for the text plus one for the span list.

use crate::config::MIN_LEXICAL_TOKEN_LEN;

/// Analyzed text: owns the lowercased buffer, yields `&str` terms via byte spans.
pub struct Terms {
    buffer: String,
    spans: Vec<(u32, u32)>,
}

impl Terms {
    /// Returns an iterator over the term slices in text order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans
            .iter()
            .map(|&(s, e)| &self.buffer[s as usize..e as usize])
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if the text produced no terms.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Split `text` into lexical terms.
pub fn analyze(text: &str) -> Terms {
    let buffer = text.to_lowercase();
    let mut spans = Vec::new();
    // (byte offset, char count) of the token being scanned
    let mut start: Option<(usize, usize)> = None;

    for (i, c) in buffer.char_indices() {
        if c.is_alphanumeric() {
            match start.as_mut() {
                Some((_, chars)) => *chars += 1,
                None => start = Some((i, 1)),
            }
        } else if let Some((s, chars)) = start.take() {
            if chars >= MIN_LEXICAL_TOKEN_LEN {
                spans.push((s as u32, i as u32));
            }
        }
    }
    if let Some((s, chars)) = start {
        if chars >= MIN_LEXICAL_TOKEN_LEN {
            spans.push((s as u32, buffer.len() as u32));
        }
    }

    Terms { buffer, spans }
}
