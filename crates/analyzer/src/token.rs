/// Characters that become standalone tokens
const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// One unit of the tokenized input.
///
/// Positions count punctuation tokens; offsets index into the original text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Normalized (lower-case) form
    pub word: String,

    /// Surface form as written
    pub original: String,

    /// Index in the token sequence
    pub position: usize,

    /// Byte offset into the original text
    pub offset: usize,

    /// Whether this token is a punctuation mark
    pub punctuation: bool,

    /// Sentence index, when sentence annotation is enabled
    pub sentence: Option<usize>,

    /// 0-based position within the sentence
    pub sentence_position: Option<usize>,
}

impl Token {
    /// Whether this token ends a sentence
    #[must_use]
    pub fn ends_sentence(&self) -> bool {
        self.punctuation && matches!(self.word.as_str(), "." | "!" | "?")
    }
}

/// Split text into word and punctuation tokens.
///
/// Apostrophes stay inside words ("don't" is one token). Empty input yields
/// an empty sequence, never an error.
#[must_use]
pub fn tokenize(text: &str, annotate_sentences: bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if PUNCTUATION.contains(&ch) {
            flush_word(text, &mut tokens, &mut word_start, idx);
            tokens.push(Token {
                word: ch.to_string(),
                original: ch.to_string(),
                position: 0,
                offset: idx,
                punctuation: true,
                sentence: None,
                sentence_position: None,
            });
        } else if ch.is_whitespace() {
            flush_word(text, &mut tokens, &mut word_start, idx);
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }
    flush_word(text, &mut tokens, &mut word_start, text.len());

    for (position, token) in tokens.iter_mut().enumerate() {
        token.position = position;
    }

    if annotate_sentences {
        assign_sentences(&mut tokens);
    }

    tokens
}

fn flush_word(text: &str, tokens: &mut Vec<Token>, word_start: &mut Option<usize>, end: usize) {
    if let Some(start) = word_start.take() {
        let surface = &text[start..end];
        tokens.push(Token {
            word: surface.to_lowercase(),
            original: surface.to_string(),
            position: 0,
            offset: start,
            punctuation: false,
            sentence: None,
            sentence_position: None,
        });
    }
}

/// Assign sentence indices linearly. A terminator belongs to the sentence it
/// closes; an unterminated trailing run still gets an index.
fn assign_sentences(tokens: &mut [Token]) {
    let mut sentence = 0usize;
    let mut position = 0usize;

    for token in tokens.iter_mut() {
        token.sentence = Some(sentence);
        token.sentence_position = Some(position);
        if token.ends_sentence() {
            sentence += 1;
            position = 0;
        } else {
            position += 1;
        }
    }
}
