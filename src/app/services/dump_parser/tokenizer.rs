//! Quote-aware splitting of a single value group

/// Split the inner text of a value group into raw tokens
///
/// A comma separates tokens only when it is outside a single-quoted span, so
/// `'Área, fase adulta'` stays one token. Tokens keep their surrounding
/// whitespace and quotes. Unbalanced quotes never fail; the split is simply
/// best effort from the first stray quote onwards.
///
/// Inside quotes `\'` and `''` are escaped quotes and do not close the span.
pub fn split_tuple(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut in_quote = false;
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        match ch {
            '\\' if in_quote => {
                chars.next();
            }
            '\'' if in_quote && chars.peek().is_some_and(|&(_, next)| next == '\'') => {
                chars.next();
            }
            '\'' => in_quote = !in_quote,
            ',' if !in_quote => {
                tokens.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    tokens.push(&text[start..]);
    tokens
}
