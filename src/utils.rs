//! Source-text and token helpers shared by fix synthesis

use oxc_span::Span;

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Find a keyword as a whole word within `[from, to)` of the source text.
///
/// Returns the keyword's span. Occurrences glued to identifier characters
/// (`mytype`, `typed`) are skipped.
pub fn find_keyword(source: &str, from: u32, to: u32, keyword: &str) -> Option<Span> {
    let slice = source.get(from as usize..to as usize)?;
    for (offset, _) in slice.match_indices(keyword) {
        let before_ok = slice[..offset]
            .chars()
            .next_back()
            .is_none_or(|c| !is_ident_char(c));
        let after_ok = slice[offset + keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_ident_char(c));
        if before_ok && after_ok {
            let start = from + offset as u32;
            return Some(Span::new(start, start + keyword.len() as u32));
        }
    }
    None
}

/// Byte offset of the next occurrence of `ch` at or after `from`.
pub fn find_char(source: &str, from: u32, ch: char) -> Option<u32> {
    let slice = source.get(from as usize..)?;
    slice.find(ch).map(|offset| from + offset as u32)
}

/// First position at or after `from` that is not whitespace.
pub fn skip_whitespace(source: &str, from: u32) -> u32 {
    let slice = &source[from as usize..];
    let skipped = slice.len() - slice.trim_start().len();
    from + skipped as u32
}

/// Extend a statement span over the line break that follows it, so that
/// deleting the statement does not leave a blank line behind.
pub fn statement_removal_span(source: &str, span: Span) -> Span {
    let rest = &source[span.end as usize..];
    let extra = if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    };
    Span::new(span.start, span.end + extra)
}

/// Join names as `"a"`, `"a" and "b"`, or `"a", "b", and "c"`.
pub fn format_name_list(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [one] => format!("\"{one}\""),
        [first, second] => format!("\"{first}\" and \"{second}\""),
        [init @ .., last] => {
            let mut out = String::new();
            for name in init {
                out.push_str(&format!("\"{name}\", "));
            }
            out.push_str(&format!("and \"{last}\""));
            out
        }
    }
}
