// Plain-text table rendering with per-column colors

use console::{measure_text_width, pad_str, style, Alignment, Color};

struct Column {
    header: String,
    color: Color,
}

/// Column-aligned table; widths follow the widest cell of each column
pub struct Table {
    title: Option<String>,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            title: None,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn column(mut self, header: &str, color: Color) -> Self {
        self.columns.push(Column {
            header: header.to_string(),
            color,
        });
        self
    }

    /// Missing trailing cells render empty, extra cells are dropped
    pub fn add_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|row| measure_text_width(&row[i]))
                    .chain(std::iter::once(measure_text_width(&col.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render to lines; styling is applied after padding so colors never
    /// disturb the alignment
    pub fn render(&self) -> Vec<String> {
        let widths = self.widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 3);

        if let Some(title) = &self.title {
            lines.push(style(title).bold().italic().to_string());
        }

        let header = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| style(pad_str(&col.header, *w, Alignment::Left, None)).bold().to_string())
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(header.trim_end().to_string());

        let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ");
        lines.push(style(rule).dim().to_string());

        for row in &self.rows {
            let line = row
                .iter()
                .zip(&self.columns)
                .zip(&widths)
                .map(|((cell, col), w)| {
                    style(pad_str(cell, *w, Alignment::Left, None))
                        .fg(col.color)
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(line.trim_end().to_string());
        }

        lines
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
