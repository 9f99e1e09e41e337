//! Ignore-rule line parser with .gitignore syntax compatibility

use glob::{MatchOptions, Pattern};
use thiserror::Error;

/// Options every compiled rule is matched with.
///
/// `*` and `?` never cross a `/`; only a whole-segment `**` does.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Type of ignore pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternType {
    /// Normal ignore pattern
    Ignore,
    /// Negation pattern (starts with !)
    Include,
}

/// A compiled rule from an ignore file
#[derive(Debug, Clone)]
pub struct Rule {
    /// The original line, with trailing whitespace stripped
    pub original: String,
    /// The compiled glob pattern
    pub pattern: Pattern,
    /// Type of pattern (ignore or negation)
    pub pattern_type: PatternType,
    /// Whether the pattern matches the full path from the ignore root
    pub is_anchored: bool,
    /// Whether this pattern only matches directories
    pub directory_only: bool,
    /// 1-based line number in the ignore file
    pub line: usize,
}

impl Rule {
    /// Whether a match re-includes the path
    pub fn is_negated(&self) -> bool {
        self.pattern_type == PatternType::Include
    }

    /// Test this rule against a normalized, `/`-separated relative path.
    ///
    /// Non-anchored rules only look at the last segment. Ancestor
    /// directories are matched separately by the rule set.
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        if self.directory_only && !is_dir {
            return false;
        }

        if self.is_anchored {
            self.pattern.matches_with(path, MATCH_OPTIONS)
        } else {
            let name = path.rsplit('/').next().unwrap_or(path);
            self.pattern.matches_with(name, MATCH_OPTIONS)
        }
    }

    /// Human readable description used in ignore reasons
    pub fn describe(&self) -> String {
        format!("'{}' (line {})", self.original, self.line)
    }
}

/// A malformed ignore-file line. Never fatal: the line is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: {text:?}")]
pub struct ParseError {
    pub line: usize,
    pub text: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("pattern only names the root directory")]
    RootOnly,

    #[error("negation without a pattern")]
    EmptyNegation,

    #[error("unescaped trailing backslash")]
    TrailingBackslash,

    #[error("pattern could not be compiled")]
    InvalidGlob,
}

/// Parse a single line from an ignore file.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line_num: usize, line: &str) -> Result<Option<Rule>, ParseError> {
    if line.starts_with('#') {
        return Ok(None);
    }

    let line = trim_trailing_whitespace(line);
    if line.is_empty() {
        return Ok(None);
    }

    let error = |kind| ParseError {
        line: line_num,
        text: line.to_string(),
        kind,
    };

    let (pattern_type, body) = match line.strip_prefix('!') {
        Some(rest) => (PatternType::Include, rest),
        None => (PatternType::Ignore, line),
    };

    let mut tokens = unescape(body).ok_or_else(|| error(ParseErrorKind::TrailingBackslash))?;
    if tokens.is_empty() {
        return Err(error(ParseErrorKind::EmptyNegation));
    }

    let directory_only = tokens.last() == Some(&('/', false));
    if directory_only {
        tokens.pop();
    }

    let mut is_anchored = false;
    if tokens.first() == Some(&('/', false)) {
        tokens.remove(0);
        is_anchored = true;
    }

    if tokens.is_empty() {
        return Err(error(ParseErrorKind::RootOnly));
    }

    // Any remaining separator ties the pattern to the ignore root
    is_anchored |= tokens.contains(&('/', false));

    let pattern = compile_glob(&tokens).ok_or_else(|| error(ParseErrorKind::InvalidGlob))?;

    Ok(Some(Rule {
        original: line.to_string(),
        pattern,
        pattern_type,
        is_anchored,
        directory_only,
        line: line_num,
    }))
}

/// Strip trailing spaces and tabs unless escaped with a backslash
fn trim_trailing_whitespace(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut end = bytes.len();

    while end > 0 && matches!(bytes[end - 1], b' ' | b'\t') {
        let backslashes = bytes[..end - 1]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= 1;
    }

    &line[..end]
}

/// Split a pattern into `(char, escaped)` tokens.
///
/// Returns `None` when the pattern ends in a lone backslash.
fn unescape(pattern: &str) -> Option<Vec<(char, bool)>> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            let escaped = chars.next()?;
            // A separator cannot be escaped in a path glob
            tokens.push((escaped, escaped != '/'));
        } else {
            tokens.push((c, false));
        }
    }

    Some(tokens)
}

/// Translate gitignore tokens into a `glob::Pattern`.
///
/// Anything the glob engine rejects is retried as a literal.
fn compile_glob(tokens: &[(char, bool)]) -> Option<Pattern> {
    let mut glob = String::with_capacity(tokens.len() + 4);
    let segments: Vec<&[(char, bool)]> = tokens.split(|&t| t == ('/', false)).collect();
    let last = segments.len() - 1;

    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            glob.push('/');
        }

        if *segment == [('*', false), ('*', false)] {
            // A trailing `**` matches everything inside, at any depth
            glob.push_str(if idx == last { "**/*" } else { "**" });
            continue;
        }

        push_segment(&mut glob, segment);
    }

    Pattern::new(&glob).ok().or_else(|| {
        let literal: String = tokens.iter().map(|&(c, _)| c).collect();
        Pattern::new(&Pattern::escape(&literal)).ok()
    })
}

fn push_segment(glob: &mut String, segment: &[(char, bool)]) {
    let mut i = 0;

    while i < segment.len() {
        let (c, escaped) = segment[i];

        if escaped {
            push_literal(glob, c);
            i += 1;
            continue;
        }

        match c {
            '*' => {
                // `**` inside a segment is just `*`
                while segment.get(i + 1) == Some(&('*', false)) {
                    i += 1;
                }
                glob.push('*');
            },
            '?' => glob.push('?'),
            '[' => match class_end(segment, i) {
                Some(end) => {
                    push_class(glob, &segment[i + 1..end]);
                    i = end;
                },
                None => push_literal(glob, '['),
            },
            ']' => push_literal(glob, ']'),
            _ => glob.push(c),
        }

        i += 1;
    }
}

/// Index of the `]` closing the class opened at `start`
fn class_end(segment: &[(char, bool)], start: usize) -> Option<usize> {
    let mut j = start + 1;

    if matches!(segment.get(j), Some(('!' | '^', false))) {
        j += 1;
    }
    // A leading `]` is a member, not the end
    if matches!(segment.get(j), Some((']', _))) {
        j += 1;
    }

    // An escaped `]` is a member
    (j..segment.len()).find(|&k| segment[k] == (']', false))
}

/// Emit a class body in glob syntax.
///
/// glob has no escapes inside `[...]`: a literal `]` must come first, a
/// literal `-` last, and a literal `!` anywhere but first.
fn push_class(glob: &mut String, members: &[(char, bool)]) {
    let (negated, members) = match members.split_first() {
        Some((&('!' | '^', false), rest)) => (true, rest),
        _ => (false, members),
    };

    let mut close = false;
    let mut body = String::with_capacity(members.len() + 2);
    let mut bang = false;
    let mut dash = false;
    for &(c, escaped) in members {
        match (c, escaped) {
            (']', _) => close = true,
            ('!', true) => bang = true,
            ('-', true) => dash = true,
            _ => body.push(c),
        }
    }

    if close {
        body.insert(0, ']');
    }
    if bang {
        body.push('!');
    }
    if dash {
        body.push('-');
    }

    if !negated && body == "!" {
        push_literal(glob, '!');
        return;
    }
    if !negated && body == "!-" {
        body = "-!".to_string();
    }

    glob.push('[');
    if negated {
        glob.push('!');
    }
    glob.push_str(&body);
    glob.push(']');
}

fn push_literal(glob: &mut String, c: char) {
    let mut buf = [0u8; 4];
    glob.push_str(&Pattern::escape(c.encode_utf8(&mut buf)));
}
