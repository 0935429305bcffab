//! Text table for a loaded collection: header, one row per item, item
//! count, and the empty/error states of a list screen.

use std::fmt::Write;

use malha_model::Resource;

use crate::search;
use crate::store::CrudState;

/// Shown when the collection itself is empty.
pub const NO_ITEMS: &str = "no items found";
/// Shown when items exist but none match the search term.
pub const NO_RESULTS: &str = "no results for the search";

/// Custom cell renderer.
pub type Render<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    render: Option<Render<T>>,
}

impl<T: Resource> Column<T> {
    /// Column showing the raw field `key`.
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label, render: None }
    }

    /// Column with a custom renderer.
    pub fn with<F>(key: &'static str, label: &'static str, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            key,
            label,
            render: Some(Box::new(render)),
        }
    }

    pub fn cell(&self, item: &T) -> String {
        match &self.render {
            Some(render) => render(item),
            None => search::field_text(item, self.key).unwrap_or_default(),
        }
    }
}

/// List screen for one resource.
pub struct Table<T> {
    title: String,
    columns: Vec<Column<T>>,
    search_fields: Vec<&'static str>,
}

impl<T: Resource> Table<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: Vec::new(),
            search_fields: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column<T>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn searchable(mut self, fields: &[&'static str]) -> Self {
        self.search_fields = fields.to_vec();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Items matching `term` in any searchable field.
    pub fn filter<'a>(&self, items: &'a [T], term: &str) -> Vec<&'a T> {
        search::filter(items, &self.search_fields, term)
    }

    /// Render `items` filtered by `term`.
    pub fn render(&self, items: &[T], term: &str) -> String {
        let rows = self.filter(items, term);

        let mut headers = vec!["ID".to_string()];
        headers.extend(self.columns.iter().map(|c| c.label.to_uppercase()));
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|item| {
                let mut row = vec![item.id().to_string()];
                row.extend(self.columns.iter().map(|c| c.cell(item)));
                row
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &headers, &widths);
        if cells.is_empty() {
            let empty = if items.is_empty() { NO_ITEMS } else { NO_RESULTS };
            let _ = writeln!(out, "{}", empty);
        }
        for row in &cells {
            push_row(&mut out, row, &widths);
        }
        let _ = write!(out, "{} item(s)", rows.len());
        out
    }

    /// Render a store snapshot: loading and error lines before the table.
    pub fn render_state(&self, state: &CrudState<T>, term: &str) -> String {
        if state.loading {
            return format!("{}: loading...", self.title);
        }
        let mut out = String::new();
        if let Some(err) = &state.error {
            let _ = writeln!(out, "error: {}", err);
        }
        out.push_str(&self.render(&state.items, term));
        out
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| pad(cell, *w))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", s, " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use malha_model::Color;

    fn color(id: &str, name: &str, description: &str) -> Color {
        Color {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn table() -> Table<Color> {
        Table::new("Colors")
            .column(Column::new("name", "Name"))
            .column(Column::with("description", "Description", |c: &Color| {
                if c.description.is_empty() { "-".into() } else { c.description.clone() }
            }))
            .searchable(&["name", "description"])
    }

    #[test]
    fn renders_header_rows_and_count() {
        let items = vec![color("c1", "Azul", "cor fria"), color("c22", "Vermelho", "")];
        let out = table().render(&items, "");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "ID   NAME      DESCRIPTION");
        assert_eq!(lines[1], "c1   Azul      cor fria");
        assert_eq!(lines[2], "c22  Vermelho  -");
        assert_eq!(lines[3], "2 item(s)");
    }

    #[test]
    fn search_narrows_rows() {
        let items = vec![color("c1", "Azul", "cor fria"), color("c2", "Vermelho", "quente")];
        let out = table().render(&items, "QUENTE");
        assert!(out.contains("Vermelho"));
        assert!(!out.contains("Azul"));
        assert!(out.ends_with("1 item(s)"));
    }

    #[test]
    fn empty_collection_message() {
        let out = table().render(&[], "");
        assert!(out.contains(NO_ITEMS));
        assert!(out.ends_with("0 item(s)"));
    }

    #[test]
    fn no_match_message() {
        let items = vec![color("c1", "Azul", "")];
        let out = table().render(&items, "verde");
        assert!(out.contains(NO_RESULTS));
        assert!(!out.contains(NO_ITEMS));
    }

    #[test]
    fn state_with_error_and_loading() {
        let t = table();
        let failed = CrudState {
            items: Vec::new(),
            loading: false,
            error: Some("HTTP 500".into()),
        };
        let out = t.render_state(&failed, "");
        assert!(out.starts_with("error: HTTP 500\n"));
        assert!(out.contains(NO_ITEMS));

        let loading = CrudState { loading: true, ..failed };
        assert_eq!(t.render_state(&loading, ""), "Colors: loading...");
    }

    #[test]
    fn default_cell_is_field_text() {
        let c = Column::<Color>::new("name", "Name");
        assert_eq!(c.cell(&color("c1", "Azul", "")), "Azul");
        let missing = Column::<Color>::new("nope", "Nope");
        assert_eq!(missing.cell(&color("c1", "Azul", "")), "");
    }
}
