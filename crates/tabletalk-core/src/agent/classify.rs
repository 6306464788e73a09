//! Response classification at the agent-adapter boundary.
//!
//! Agent backends overwhelmingly finish with prose, but the legacy
//! contract allows a raw result set shaped as a list of tuples --
//! `[(1, 'a'), (2, 'b')]` -- to pass straight through. Classification
//! happens exactly once, here, so everything downstream dispatches on
//! the closed [`AgentResponse`] tag set instead of sniffing shapes.

use tabletalk_types::chat::AgentResponse;

/// Classify a final answer into the response union.
///
/// - blank output -> `Unrecognized`
/// - a tuple-list literal -> `Table` (including the empty list)
/// - anything else -> `Text`
pub fn classify_final_answer(answer: &str) -> AgentResponse {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return AgentResponse::Unrecognized;
    }

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Some(rows) = parse_tuple_list(trimmed) {
            return AgentResponse::table(rows);
        }
    }

    AgentResponse::text(trimmed)
}

/// Parse a tuple-list literal into rows of cell strings.
///
/// Accepts `[(cell, ...), ...]` where cells are single-quoted strings
/// or bare tokens (numbers, NULL). Returns `None` on any deviation;
/// the caller falls back to prose rather than guessing.
fn parse_tuple_list(s: &str) -> Option<Vec<Vec<String>>> {
    let inner = s.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }

    let mut rows = Vec::new();
    let mut rest = inner;

    loop {
        rest = rest.trim_start();
        let (row, after) = parse_tuple(rest)?;
        rows.push(row);
        rest = after.trim_start();

        if rest.is_empty() {
            return Some(rows);
        }
        rest = rest.strip_prefix(',')?;
    }
}

/// Parse one `(cell, ...)` tuple, returning the cells and the remainder.
fn parse_tuple(s: &str) -> Option<(Vec<String>, &str)> {
    let mut rest = s.strip_prefix('(')?;
    let mut cells = Vec::new();

    loop {
        rest = rest.trim_start();

        if let Some(after_open) = rest.strip_prefix('\'') {
            let end = find_quote_end(after_open)?;
            cells.push(after_open[..end].replace("\\'", "'"));
            rest = &after_open[end + 1..];
        } else {
            // Bare token: runs to the next comma or closing paren.
            let end = rest.find([',', ')'])?;
            let token = rest[..end].trim();
            if token.is_empty() {
                return None;
            }
            cells.push(token.to_string());
            rest = &rest[end..];
        }

        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix(')') {
            return Some((cells, after));
        }
        rest = rest.strip_prefix(',')?;
        // Python prints one-element tuples with a trailing comma: (2,)
        if let Some(after) = rest.trim_start().strip_prefix(')') {
            return Some((cells, after));
        }
    }
}

/// Index of the closing quote, skipping escaped quotes.
fn find_quote_end(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\'' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prose() {
        assert_eq!(
            classify_final_answer("There are 42 orders."),
            AgentResponse::text("There are 42 orders.")
        );
    }

    #[test]
    fn test_classify_blank_is_unrecognized() {
        assert_eq!(classify_final_answer("   "), AgentResponse::Unrecognized);
    }

    #[test]
    fn test_classify_tuple_list() {
        assert_eq!(
            classify_final_answer("[(1, 'a'), (2, 'b')]"),
            AgentResponse::table(vec![
                vec!["1".to_string(), "a".to_string()],
                vec!["2".to_string(), "b".to_string()],
            ])
        );
    }

    #[test]
    fn test_classify_empty_list_is_empty_table() {
        assert_eq!(classify_final_answer("[]"), AgentResponse::table(vec![]));
    }

    #[test]
    fn test_classify_non_uniform_rows_still_table() {
        // Arity validation is the renderer's job, not the classifier's.
        assert_eq!(
            classify_final_answer("[(1, 'a'), (2,)]"),
            AgentResponse::table(vec![
                vec!["1".to_string(), "a".to_string()],
                vec!["2".to_string()],
            ])
        );
    }

    #[test]
    fn test_classify_bracketed_prose_falls_back_to_text() {
        let answer = "[see the orders table for details]";
        assert_eq!(classify_final_answer(answer), AgentResponse::text(answer));
    }

    #[test]
    fn test_classify_escaped_quote_in_cell() {
        assert_eq!(
            classify_final_answer(r"[(1, 'O\'Brien')]"),
            AgentResponse::table(vec![vec!["1".to_string(), "O'Brien".to_string()]])
        );
    }

    #[test]
    fn test_classify_floats_and_null() {
        assert_eq!(
            classify_final_answer("[(3.5, NULL)]"),
            AgentResponse::table(vec![vec!["3.5".to_string(), "NULL".to_string()]])
        );
    }
}
