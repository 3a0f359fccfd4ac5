/// An ordered sequence of whitespace-delimited tokens borrowed from a text.
///
/// Runs of whitespace collapse into a single separator and leading or
/// trailing whitespace produces no tokens, so an empty token never appears.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSequence<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> TokenSequence<'a> {
    pub fn from_text(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.tokens
    }
}
