use crate::cli::ui::style::UiStyle;

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: usize) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

/// Row data for a [`Table`].
#[derive(Debug, Clone)]
pub struct TableRow {
    pub cells: Vec<String>,
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        let row = TableRow {
            cells: cells.into_iter().map(|value| value.into()).collect(),
        };
        self.rows.push(row);
    }
}

/// Renders [`Table`] instances using simple padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table, style: &UiStyle) {
        for line in Self::render_lines(table, style) {
            println!("{line}");
        }
    }

    pub fn render_lines(table: &Table, style: &UiStyle) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(title) = &table.title {
            lines.push(style.apply_header_style(title));
        }

        if !table.columns.is_empty() {
            let total_width = table
                .columns
                .iter()
                .map(|col| col.width + 1)
                .sum::<usize>()
                .max(1);
            if !style.plain_mode {
                lines.push(style.horizontal_line(total_width));
            }

            let header = table
                .columns
                .iter()
                .map(|col| format!("{:width$} ", col.header, width = col.width))
                .collect::<String>();
            lines.push(style.apply_header_style(header.trim_end()));
            if !style.plain_mode {
                lines.push(style.horizontal_line(total_width));
            }
        }

        if table.rows.is_empty() {
            lines.push("(empty)".to_string());
        }

        for row in &table.rows {
            let mut line = String::new();
            for (idx, column) in table.columns.iter().enumerate() {
                if idx > 0 {
                    line.push(' ');
                }
                let cell = row.cells.get(idx).map(String::as_str).unwrap_or("");
                line.push_str(&format!("{:width$}", cell, width = column.width));
            }
            lines.push(line.trim_end().to_string());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_padded_rows_under_rules() {
        let mut table = Table::new(
            Some("Demo"),
            vec![TableColumn::new("Name", 6), TableColumn::new("Qty", 3)],
        );
        table.add_row(vec!["block", "42"]);

        let lines = TableRenderer::render_lines(&table, &UiStyle::ascii());
        assert_eq!(lines[0], "Demo");
        assert_eq!(lines[1], "-".repeat(40));
        assert_eq!(lines[2], "Name   Qty");
        assert_eq!(lines[4], "block  42");
    }

    #[test]
    fn empty_tables_say_so() {
        let table = Table::new(Some("Nothing"), vec![TableColumn::new("A", 2)]);
        let lines = TableRenderer::render_lines(&table, &UiStyle::ascii());
        assert_eq!(lines.last().map(String::as_str), Some("(empty)"));
    }
}
