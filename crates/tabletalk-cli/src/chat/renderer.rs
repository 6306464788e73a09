//! Terminal rendering for agent answers.
//!
//! `ChatRenderer` turns a [`RenderedView`] into styled terminal output:
//! prose goes through `termimad` for markdown formatting, tabular
//! results become a `comfy-table` grid, and notices are printed dimmed
//! so they read as status rather than an answer.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use console::style;
use termimad::MadSkin;

use tabletalk_types::chat::RenderedView;

/// Terminal renderer for the chat surface.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    /// Render a view to a string ready for printing.
    pub fn render(&self, view: &RenderedView) -> String {
        match view {
            RenderedView::Message { content } => self.render_prose(content),
            RenderedView::Grid { headers, rows } => Self::render_grid(headers, rows),
            RenderedView::Notice { content } => {
                format!("  {}\n", style(content).yellow())
            }
        }
    }

    /// Render markdown prose through termimad.
    ///
    /// Code fences are printed dimmed rather than highlighted; answers
    /// from the SQL agent are mostly short prose and the occasional
    /// SELECT statement.
    fn render_prose(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;

        for line in markdown.lines() {
            if line.starts_with("```") {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                output.push_str(&format!("  {}\n", style(line).dim()));
            } else {
                let rendered = self.skin.term_text(line);
                output.push_str(&format!("  {rendered}"));
            }
        }

        output
    }

    /// Render a grid of rows as a bordered table.
    fn render_grid(headers: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers.iter().map(|h| Cell::new(h)));

        for row in rows {
            table.add_row(row.iter().map(Cell::new));
        }

        let mut output = String::new();
        for line in table.lines() {
            output.push_str(&format!("  {line}\n"));
        }
        output
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}
