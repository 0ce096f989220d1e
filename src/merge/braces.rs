//! Lexical brace-depth scanning
//!
//! Every `{` and `}` character counts, including those inside string,
//! comment, and regex literals. This is a deliberate approximation, not a
//! parser: the input is prose-adjacent text that is not guaranteed to be
//! valid source.

/// Net brace balance of a single line (`{` count minus `}` count).
pub fn line_balance(line: &str) -> i64 {
    line.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

/// Index of the line closing the block opened on `lines[start]`.
///
/// Depth starts at the opening line's own balance. A line that opens and
/// closes its own block ends there. Returns `None` when the depth never
/// returns to zero.
pub fn block_end(lines: &[&str], start: usize) -> Option<usize> {
    let mut depth = line_balance(lines.get(start)?);
    if depth <= 0 {
        return Some(start);
    }

    for (offset, line) in lines[start + 1..].iter().enumerate() {
        depth += line_balance(line);
        if depth <= 0 {
            return Some(start + 1 + offset);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_balance() {
        assert_eq!(line_balance("function a() {"), 1);
        assert_eq!(line_balance("} else {"), 0);
        assert_eq!(line_balance("}}"), -2);
        assert_eq!(line_balance("plain text"), 0);
    }

    #[test]
    fn test_braces_in_strings_are_counted() {
        assert_eq!(line_balance("const s = \"{{\";"), 2);
        assert_eq!(line_balance("// closes }"), -1);
    }

    #[test]
    fn test_block_end_nested() {
        let lines = vec!["f() {", "  if (x) {", "    y();", "  }", "}", "after();"];
        assert_eq!(block_end(&lines, 0), Some(4));
        assert_eq!(block_end(&lines, 1), Some(3));
    }

    #[test]
    fn test_block_end_single_line() {
        let lines = vec!["f() { return 1; }", "g();"];
        assert_eq!(block_end(&lines, 0), Some(0));
    }

    #[test]
    fn test_block_end_unterminated() {
        let lines = vec!["f() {", "  y();"];
        assert_eq!(block_end(&lines, 0), None);
        assert_eq!(block_end(&lines, 5), None);
    }
}
