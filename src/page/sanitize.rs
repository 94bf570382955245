// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

//! Textual cleanup applied to page fields: tags out, then character entities out.
//!
//! This is not an HTML decoder. Entities are removed, never decoded.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A run of named or numeric entities, with the horizontal whitespace around them.
static ENTITY_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[ \t]*(?:&#?[a-z0-9]{2,8};[ \t]*)+").expect("entity regex is valid")
});

/// Removes markup tags and comments.
///
/// A `<` followed by whitespace, or at the end of the input, is literal text.
/// Quoted attribute values may contain `>`. Nested `<` inside a tag deepen it.
/// An unterminated tag swallows the rest of the input.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some((_, next)) if !next.is_whitespace() => {}
            _ => {
                out.push(c);
                continue;
            }
        }

        if input[idx..].starts_with("<!--") {
            match input[idx + 4..].find("-->") {
                Some(end) => {
                    let resume = idx + 4 + end + 3;
                    while matches!(chars.peek(), Some((i, _)) if *i < resume) {
                        chars.next();
                    }
                }
                None => break,
            }
            continue;
        }

        let mut depth = 1usize;
        let mut quote: Option<char> = None;
        for (_, c) in chars.by_ref() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"') | (None, '\'') => quote = Some(c),
                (None, '<') => depth += 1,
                (None, '>') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    out
}

/// Removes `&name;` and `&#NNN;` style entities.
///
/// A removed run that touched whitespace leaves one space behind, so
/// `Hello &amp; World` becomes `Hello World`. Removal repeats until nothing
/// matches, since removing an entity can join the halves of another.
pub fn strip_entities(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = ENTITY_RUN
            .replace_all(&current, |caps: &Captures| {
                let run = &caps[0];
                if run.contains([' ', '\t']) {
                    " ".to_string()
                } else {
                    String::new()
                }
            })
            .into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Full cleanup pass for a page field.
pub fn sanitize(input: &str) -> String {
    strip_entities(&strip_tags(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_basic() {
        assert_eq!(strip_tags("<b>Hello</b> world"), "Hello world");
        assert_eq!(strip_tags("<p class=\"x\">Body</p>"), "Body");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn test_strip_tags_literal_lt() {
        assert_eq!(strip_tags("1 < 2"), "1 < 2");
        assert_eq!(strip_tags("a <"), "a <");
        assert_eq!(strip_tags("a > b"), "a > b");
    }

    #[test]
    fn test_strip_tags_quoted_gt() {
        assert_eq!(strip_tags("<a title=\"x > y\">link</a>"), "link");
        assert_eq!(strip_tags("<a title='>'>link</a>"), "link");
    }

    #[test]
    fn test_strip_tags_comments_and_nesting() {
        assert_eq!(strip_tags("a<!-- <b>hidden</b> -->b"), "ab");
        assert_eq!(strip_tags("<<b>b>text"), "text");
        assert_eq!(strip_tags("text<unterminated"), "text");
        assert_eq!(strip_tags("text<!-- open"), "text");
    }

    #[test]
    fn test_strip_tags_keeps_unicode() {
        assert_eq!(strip_tags("<i>café</i> ünïcödé"), "café ünïcödé");
    }

    #[test]
    fn test_strip_entities() {
        assert_eq!(strip_entities("Hello &amp; World"), "Hello World");
        assert_eq!(strip_entities("Body &#38; text"), "Body text");
        assert_eq!(strip_entities("a&nbsp;b"), "ab");
        assert_eq!(strip_entities("A&AMP;B"), "AB");
        assert_eq!(strip_entities("x &amp;&lt; y"), "x y");
        assert_eq!(strip_entities("&#8217;quoted&#8217;"), "quoted");
    }

    #[test]
    fn test_strip_entities_bounds() {
        // one character names and names over eight characters are not entities
        assert_eq!(strip_entities("&a;"), "&a;");
        assert_eq!(strip_entities("&abcdefghi;"), "&abcdefghi;");
        assert_eq!(strip_entities("AT&T"), "AT&T");
        assert_eq!(strip_entities("it&#x27;s"), "its");
    }

    #[test]
    fn test_strip_entities_nested() {
        assert_eq!(strip_entities("&am&amp;p;"), "");
    }

    #[test]
    fn test_sanitize_scenarios() {
        assert_eq!(sanitize("<b>Hello &amp; World</b>"), "Hello World");
        assert_eq!(sanitize("<p>Body &#38; text</p>"), "Body text");
        assert_eq!(sanitize("&lt;b&gt;bold&lt;/b&gt;"), "bbold/b");
    }

    #[test]
    fn test_sanitize_idempotent() {
        let inputs = [
            "<b>Hello &amp; World</b>",
            "<p>Body &#38; text</p>",
            "&am&amp;p;",
            "<<b>b>text &nbsp; more",
            "1 < 2 &gt; 0",
            "<a href='x'>&#60;i&#62;</a>",
            "plain",
            "",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input={:?}", input);
        }
    }
}
