//! Sortable, scrollable table of string rows.

use std::cmp::Ordering;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Margin, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{
        Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Table, TableState,
    },
};

use crate::presentation::theme::Theme;

/// Sort direction of the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Active sort: column index and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    /// Sorted column index.
    pub column: usize,
    /// Sort direction.
    pub direction: SortDirection,
}

fn numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Total order over cells: finite numbers first, compared numerically, then
/// everything else lexicographically.
fn compare_cells(a: &str, b: &str) -> Ordering {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Rows plus selection and sort state. Selection is tracked by logical row,
/// so it survives re-sorting.
#[derive(Debug, Default)]
pub struct RecordGridState {
    columns: usize,
    rows: Vec<Vec<String>>,
    /// Display position -> logical row.
    view: Vec<usize>,
    selected: Option<usize>,
    sort: Option<SortOrder>,
    active_column: usize,
    focused: bool,
    table_state: TableState,
}

impl RecordGridState {
    /// Empty grid with `columns` columns.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn insert_row(&mut self, row: Vec<String>) {
        self.push_row(row);
        self.rebuild_view();
    }

    fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns, String::new());
        self.rows.push(row);
    }

    /// Deletes all rows and drops the selection.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.view.clear();
        self.selected = None;
        self.table_state = TableState::default();
    }

    /// Replaces the contents with `rows`, in order.
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.clear();
        for row in rows {
            self.push_row(row);
        }
        self.rebuild_view();
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order.
    pub fn displayed_rows(&self) -> impl Iterator<Item = &[String]> {
        self.view.iter().map(|&i| self.rows[i].as_slice())
    }

    /// The selected row, if any.
    #[must_use]
    pub fn selected_row(&self) -> Option<&[String]> {
        self.selected.map(|i| self.rows[i].as_slice())
    }

    fn selected_position(&self) -> Option<usize> {
        let selected = self.selected?;
        self.view.iter().position(|&i| i == selected)
    }

    fn select_position(&mut self, position: usize) -> bool {
        let Some(&row) = self.view.get(position) else {
            return false;
        };
        let changed = self.selected != Some(row);
        self.selected = Some(row);
        changed
    }

    /// Returns whether the selection changed.
    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Returns whether the selection changed.
    pub fn select_next(&mut self) -> bool {
        let next = self
            .selected_position()
            .map_or(0, |p| (p + 1).min(self.view.len().saturating_sub(1)));
        self.select_position(next)
    }

    /// Returns whether the selection changed.
    pub fn select_previous(&mut self) -> bool {
        let previous = self.selected_position().map_or(0, |p| p.saturating_sub(1));
        self.select_position(previous)
    }

    /// Selects the first displayed row. Returns whether the selection changed.
    pub fn select_first(&mut self) -> bool {
        self.select_position(0)
    }

    /// Selects the last displayed row. Returns whether the selection changed.
    pub fn select_last(&mut self) -> bool {
        self.select_position(self.view.len().saturating_sub(1))
    }

    /// Column that `s` sorts.
    #[must_use]
    pub const fn active_column(&self) -> usize {
        self.active_column
    }

    /// Makes the next column active, stopping at the last one.
    pub fn next_column(&mut self) {
        if self.active_column + 1 < self.columns {
            self.active_column += 1;
        }
    }

    /// Makes the previous column active, stopping at the first one.
    pub fn previous_column(&mut self) {
        self.active_column = self.active_column.saturating_sub(1);
    }

    /// Current sort, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    /// Cycles the active column through ascending, descending and unsorted.
    pub fn cycle_sort(&mut self) {
        let column = self.active_column;
        self.sort = match self.sort {
            Some(SortOrder {
                column: c,
                direction: SortDirection::Ascending,
            }) if c == column => Some(SortOrder {
                column,
                direction: SortDirection::Descending,
            }),
            Some(SortOrder {
                column: c,
                direction: SortDirection::Descending,
            }) if c == column => None,
            _ => Some(SortOrder {
                column,
                direction: SortDirection::Ascending,
            }),
        };
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        self.view = (0..self.rows.len()).collect();
        if let Some(SortOrder { column, direction }) = self.sort {
            let rows = &self.rows;
            let cell = |i: usize| rows[i].get(column).map_or("", String::as_str);
            self.view.sort_by(|&a, &b| {
                let ordering = compare_cells(cell(a), cell(b));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
    }

    /// Marks the grid as receiving keys.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the grid receives keys.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }
}

/// Grid colors.
pub struct RecordGridStyle {
    /// Column headers.
    pub header: Style,
    /// Header of the active column.
    pub active_header: Style,
    /// Selected row.
    pub selection: Style,
    /// Border when unfocused.
    pub border: Style,
    /// Border when focused.
    pub focused_border: Style,
}

impl RecordGridStyle {
    /// Derives the grid colors from `theme`.
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            header: theme.header_style,
            active_header: theme.header_style.add_modifier(Modifier::UNDERLINED),
            selection: theme.selection_style,
            border: theme.border_style,
            focused_border: theme.focused_border_style,
        }
    }
}

/// Table widget drawing a [`RecordGridState`] with a vertical scrollbar.
pub struct RecordGrid<'a> {
    headers: &'a [String],
    title: &'a str,
    style: RecordGridStyle,
}

impl<'a> RecordGrid<'a> {
    /// Grid with one header per column.
    #[must_use]
    pub fn new(headers: &'a [String], theme: &Theme) -> Self {
        Self {
            headers,
            title: "",
            style: RecordGridStyle::from_theme(theme),
        }
    }

    /// Block title.
    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn header_row(&self, state: &RecordGridState) -> Row<'a> {
        let cells = self.headers.iter().enumerate().map(|(i, label)| {
            let arrow = match state.sort {
                Some(SortOrder { column, direction }) if column == i => match direction {
                    SortDirection::Ascending => " ▲",
                    SortDirection::Descending => " ▼",
                },
                _ => "",
            };
            let style = if state.focused && i == state.active_column {
                self.style.active_header
            } else {
                self.style.header
            };
            Cell::from(Line::from(format!("{label}{arrow}"))).style(style)
        });
        Row::new(cells)
    }
}

impl StatefulWidget for RecordGrid<'_> {
    type State = RecordGridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if state.focused {
            self.style.focused_border
        } else {
            self.style.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title);

        let header = self.header_row(state);
        let rows: Vec<Row> = state
            .displayed_rows()
            .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.clone()))))
            .collect();
        let widths = vec![Constraint::Fill(1); self.headers.len().max(1)];

        let position = state.selected_position();
        state.table_state.select(position);

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(self.style.selection);
        StatefulWidget::render(table, area, buf, &mut state.table_state);

        let mut scrollbar_state = ScrollbarState::new(state.view.len())
            .position(position.unwrap_or_else(|| state.table_state.offset()));
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            buf,
            &mut scrollbar_state,
        );
    }
}
