//! Table column visibility

/// One table column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Stable key
    pub id: &'static str,
    /// Header label
    pub label: &'static str,
    /// Whether the column is rendered
    pub visible: bool,
}

/// Ordered columns of a table page; toggling never reorders them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    /// All columns visible, in the given order
    pub fn new(defs: &[(&'static str, &'static str)]) -> Self {
        Self {
            columns: defs
                .iter()
                .map(|&(id, label)| Column {
                    id,
                    label,
                    visible: true,
                })
                .collect(),
        }
    }

    /// Collection page columns
    pub fn collection() -> Self {
        Self::new(&[
            ("title", "Title"),
            ("source", "Source"),
            ("format", "Format"),
            ("date", "Date"),
            ("summary", "Summary"),
            ("status", "Status"),
        ])
    }

    /// Credibility check page columns
    pub fn check() -> Self {
        Self::new(&[
            ("source", "Source"),
            ("title", "Title"),
            ("credibility", "Credibility"),
            ("description", "Description"),
            ("status", "Status"),
        ])
    }

    /// Publications list columns
    pub fn publications() -> Self {
        Self::new(&[
            ("title", "Title"),
            ("text", "Text"),
            ("network", "Network"),
            ("channel", "Channel"),
            ("status", "Status"),
            ("publish_date", "Published"),
        ])
    }

    /// All columns, in table order
    pub fn all(&self) -> &[Column] {
        &self.columns
    }

    /// Visible columns, in table order
    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    /// Whether a column is shown; unknown ids are not
    pub fn is_visible(&self, id: &str) -> bool {
        self.columns.iter().any(|c| c.id == id && c.visible)
    }

    /// Show or hide a column, returning the new visibility
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let column = self.columns.iter_mut().find(|c| c.id == id)?;
        column.visible = !column.visible;
        Some(column.visible)
    }

    /// Toggle the column at `index` (menu position)
    pub fn toggle_at(&mut self, index: usize) -> Option<bool> {
        let column = self.columns.get_mut(index)?;
        column.visible = !column.visible;
        Some(column.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_keeps_order() {
        let mut columns = ColumnSet::check();
        assert_eq!(columns.toggle("credibility"), Some(false));
        assert!(!columns.is_visible("credibility"));

        let visible: Vec<_> = columns.visible().map(|c| c.id).collect();
        assert_eq!(visible, vec!["source", "title", "description", "status"]);

        assert_eq!(columns.toggle("credibility"), Some(true));
        let all: Vec<_> = columns.all().iter().map(|c| c.id).collect();
        assert_eq!(all, vec!["source", "title", "credibility", "description", "status"]);
    }

    #[test]
    fn test_unknown_column() {
        let mut columns = ColumnSet::publications();
        assert_eq!(columns.toggle("likes"), None);
        assert_eq!(columns.toggle_at(99), None);
        assert!(!columns.is_visible("likes"));
    }
}
