use super::Flavor;

/// What the scanner is currently inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Quoted(char),
    LineComment,
    BlockComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// A character of SQL text, with the state it was read in
    Char(char, State),

    /// An unquoted `?`
    Placeholder,
}

/// Walks `sql`, handing every character and placeholder to `f` in order.
fn scan(sql: &str, flavor: Flavor, mut f: impl FnMut(Token)) {
    let mut state = State::Code;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '?' => {
                    f(Token::Placeholder);
                    continue;
                }
                '\'' | '"' | '`' => state = State::Quoted(c),
                '-' if chars.peek() == Some(&'-') => state = State::LineComment,
                '/' if chars.peek() == Some(&'*') => state = State::BlockComment,
                _ => {}
            },
            State::Quoted(quote) => {
                if c == '\\' && quote != '`' && flavor.backslash_escapes() {
                    f(Token::Char(c, state));
                    if let Some(next) = chars.next() {
                        f(Token::Char(next, state));
                    }
                    continue;
                }

                if c == quote {
                    if chars.peek() == Some(&quote) {
                        // Doubled quote: escaped, the literal continues
                        f(Token::Char(c, state));
                        chars.next();
                        f(Token::Char(quote, state));
                        continue;
                    } else {
                        state = State::Code;
                    }
                }
            }
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    f(Token::Char(c, state));
                    chars.next();
                    f(Token::Char('/', state));
                    state = State::Code;
                    continue;
                }
            }
        }

        f(Token::Char(c, state));
    }
}

pub(super) fn translate(sql: &str, flavor: Flavor) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut n = 0usize;

    scan(sql, flavor, |token| match token {
        Token::Placeholder => {
            n += 1;
            match flavor {
                Flavor::Mysql => out.push('?'),
                Flavor::Sqlite => {
                    out.push('?');
                    out.push_str(&n.to_string());
                }
            }
        }
        Token::Char(c, _) => out.push(c),
    });

    out
}

pub(super) fn count(sql: &str, flavor: Flavor) -> usize {
    let mut n = 0;
    scan(sql, flavor, |token| {
        if token == Token::Placeholder {
            n += 1;
        }
    });
    n
}
