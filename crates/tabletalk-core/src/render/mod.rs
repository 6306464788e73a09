//! Response rendering: the three-way dispatch from [`AgentResponse`]
//! to [`RenderedView`].
//!
//! This function is total. Malformed agent output -- empty tables,
//! non-uniform row arities, unrecognized shapes -- always degrades to a
//! visible notice, never a panic or an error. Column headers are
//! synthesized positional labels; no schema is ever guessed.

use tabletalk_types::chat::{AgentResponse, RenderedView};

/// Notice shown for empty or non-uniform tabular output.
pub const NOT_TABULAR_NOTICE: &str = "The response is not in tabular format.";

/// Notice shown for shapes that are neither text nor rows.
pub const UNEXPECTED_FORMAT_NOTICE: &str = "Unexpected response format.";

/// Render an agent response into a view.
pub fn render(response: AgentResponse) -> RenderedView {
    match response {
        AgentResponse::Text { content } => RenderedView::Message { content },
        AgentResponse::Table { rows } => render_table(rows),
        AgentResponse::Unrecognized => RenderedView::Notice {
            content: UNEXPECTED_FORMAT_NOTICE.to_string(),
        },
    }
}

/// Rows become a grid only when they are non-empty and uniform in
/// arity; otherwise the "not tabular" notice is shown instead of
/// guessing a schema.
fn render_table(rows: Vec<Vec<String>>) -> RenderedView {
    let Some(first) = rows.first() else {
        return RenderedView::Notice {
            content: NOT_TABULAR_NOTICE.to_string(),
        };
    };

    let arity = first.len();
    if arity == 0 || rows.iter().any(|row| row.len() != arity) {
        return RenderedView::Notice {
            content: NOT_TABULAR_NOTICE.to_string(),
        };
    }

    let headers = (1..=arity).map(|i| format!("Column {i}")).collect();
    RenderedView::Grid { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let view = render(AgentResponse::text("42"));
        assert_eq!(
            view,
            RenderedView::Message {
                content: "42".to_string()
            }
        );
    }

    #[test]
    fn test_render_uniform_table_synthesizes_headers() {
        let view = render(AgentResponse::table(vec![
            vec!["1".to_string(), "a".to_string()],
            vec!["2".to_string(), "b".to_string()],
        ]));
        assert_eq!(
            view,
            RenderedView::Grid {
                headers: vec!["Column 1".to_string(), "Column 2".to_string()],
                rows: vec![
                    vec!["1".to_string(), "a".to_string()],
                    vec!["2".to_string(), "b".to_string()],
                ],
            }
        );
    }

    #[test]
    fn test_render_wide_table_header_count_matches_arity() {
        let row: Vec<String> = (0..7).map(|i| i.to_string()).collect();
        let view = render(AgentResponse::table(vec![row.clone()]));
        match view {
            RenderedView::Grid { headers, rows } => {
                assert_eq!(headers.len(), 7);
                assert_eq!(headers[0], "Column 1");
                assert_eq!(headers[6], "Column 7");
                assert_eq!(rows, vec![row]);
            }
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn test_render_empty_table_is_not_tabular() {
        let view = render(AgentResponse::table(vec![]));
        assert_eq!(
            view,
            RenderedView::Notice {
                content: NOT_TABULAR_NOTICE.to_string()
            }
        );
    }

    #[test]
    fn test_render_non_uniform_table_is_not_tabular() {
        let view = render(AgentResponse::table(vec![
            vec!["1".to_string(), "a".to_string()],
            vec!["2".to_string()],
        ]));
        assert_eq!(
            view,
            RenderedView::Notice {
                content: NOT_TABULAR_NOTICE.to_string()
            }
        );
    }

    #[test]
    fn test_render_zero_arity_rows_are_not_tabular() {
        let view = render(AgentResponse::table(vec![vec![], vec![]]));
        assert_eq!(
            view,
            RenderedView::Notice {
                content: NOT_TABULAR_NOTICE.to_string()
            }
        );
    }

    #[test]
    fn test_render_unrecognized() {
        let view = render(AgentResponse::Unrecognized);
        assert_eq!(
            view,
            RenderedView::Notice {
                content: UNEXPECTED_FORMAT_NOTICE.to_string()
            }
        );
    }
}
