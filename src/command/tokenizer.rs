use std::str::Chars;

/// Split a console line into tokens.
///
/// The returned iterator is lazy and cheap to clone, so a caller can restart
/// from any point by cloning it before consuming.
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens {
        chars: line.chars(),
    }
}

/// Lazy token stream over one input line
///
/// Whitespace outside quotes separates tokens. A `"` or `'` opens a quoted
/// span that only the same character closes; the quotes themselves are
/// dropped. A backslash makes the next character literal and is dropped.
/// An unterminated quote still yields whatever was buffered.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    chars: Chars<'a>,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut token = String::new();
        let mut quote: Option<char> = None;

        while let Some(c) = self.chars.next() {
            match c {
                '\\' => {
                    if let Some(escaped) = self.chars.next() {
                        token.push(escaped);
                    }
                }
                '"' | '\'' => match quote {
                    Some(open) if open == c => quote = None,
                    Some(_) => token.push(c),
                    None => quote = Some(c),
                },
                c if c.is_whitespace() && quote.is_none() => {
                    if !token.is_empty() {
                        return Some(token);
                    }
                }
                c => token.push(c),
            }
        }

        if token.is_empty() { None } else { Some(token) }
    }
}
