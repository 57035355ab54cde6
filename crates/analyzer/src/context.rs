use crate::token::Token;

/// Bounded view around one token, plus sentence context when available
#[derive(Debug)]
pub struct ContextWindow<'a> {
    /// Up to `window_size` tokens before the target
    pub preceding: &'a [Token],

    /// Up to `window_size` tokens after the target
    pub following: &'a [Token],

    /// Full window including the target
    pub window: &'a [Token],

    /// Target index within `window`
    pub position_in_window: usize,

    /// Sentence the target belongs to, when annotated
    pub sentence: Option<SentenceContext<'a>>,
}

/// All tokens sharing the target's sentence
#[derive(Debug)]
pub struct SentenceContext<'a> {
    pub tokens: &'a [Token],

    /// Target position within the sentence
    pub position: usize,

    /// Sentence reconstructed from original surface forms
    pub text: String,
}

impl ContextWindow<'_> {
    /// Normalized text of the preceding tokens
    #[must_use]
    pub fn preceding_text(&self) -> String {
        join_words(self.preceding)
    }

    /// Normalized text of the full window, target included
    #[must_use]
    pub fn window_text(&self) -> String {
        join_words(self.window)
    }
}

fn join_words(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&token.word);
    }
    out
}

/// Extract the context window around `index`, clipped to the token range
#[must_use]
pub fn extract<'a>(tokens: &'a [Token], index: usize, window_size: usize) -> ContextWindow<'a> {
    debug_assert!(index < tokens.len());
    let start = index.saturating_sub(window_size);
    let end = (index + window_size + 1).min(tokens.len());

    ContextWindow {
        preceding: &tokens[start..index],
        following: &tokens[index + 1..end],
        window: &tokens[start..end],
        position_in_window: index - start,
        sentence: sentence_context(tokens, index),
    }
}

fn sentence_context<'a>(tokens: &'a [Token], index: usize) -> Option<SentenceContext<'a>> {
    let target = &tokens[index];
    let sentence = target.sentence?;

    let mut start = index;
    while start > 0 && tokens[start - 1].sentence == Some(sentence) {
        start -= 1;
    }
    let mut end = index + 1;
    while end < tokens.len() && tokens[end].sentence == Some(sentence) {
        end += 1;
    }

    let slice = &tokens[start..end];
    Some(SentenceContext {
        tokens: slice,
        position: target.sentence_position.unwrap_or(index - start),
        text: render_sentence(slice),
    })
}

/// Rebuild readable sentence text; punctuation attaches to the word before it
fn render_sentence(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if !token.punctuation && !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&token.original);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;
    use pretty_assertions::assert_eq;

    #[test]
    fn clips_window_at_document_edges() {
        let tokens = tokenize("one two three", false);
        let ctx = extract(&tokens, 0, 5);
        assert!(ctx.preceding.is_empty());
        assert_eq!(ctx.following.len(), 2);
        assert_eq!(ctx.position_in_window, 0);

        let ctx = extract(&tokens, 2, 5);
        assert_eq!(ctx.preceding.len(), 2);
        assert!(ctx.following.is_empty());
        assert_eq!(ctx.position_in_window, 2);
    }

    #[test]
    fn window_text_includes_target_and_following() {
        let tokens = tokenize("you must be perfect every day", false);
        let ctx = extract(&tokens, 3, 2);
        assert_eq!(ctx.preceding_text(), "must be");
        assert_eq!(ctx.window_text(), "must be perfect every day");
    }

    #[test]
    fn sentence_context_spans_terminator() {
        let tokens = tokenize("It was fine. It was not.", true);
        // "not" lives in the second sentence
        let index = tokens.iter().position(|t| t.word == "not").unwrap();
        let ctx = extract(&tokens, index, 5);
        let sentence = ctx.sentence.expect("sentence metadata");
        assert_eq!(sentence.text, "It was not.");
        assert_eq!(sentence.position, 2);
    }

    #[test]
    fn no_sentence_context_without_annotation() {
        let tokens = tokenize("plain text here", false);
        let ctx = extract(&tokens, 1, 3);
        assert!(ctx.sentence.is_none());
    }
}
