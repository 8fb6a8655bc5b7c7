use super::node::Position;

/// Spacing used to lay dialog nodes out on the canvas.
///
/// Every depth gets its own column (`x` grows with depth) and every row is one
/// `row_height` below the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub column_width: f64,
    pub row_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 300.0,
            row_height: 150.0,
        }
    }
}

impl LayoutConfig {
    pub fn new(column_width: f64, row_height: f64) -> Self {
        Self {
            column_width,
            row_height,
        }
    }

    /// Position of the cell at `column`/`row`, relative to `origin`.
    pub fn place(&self, origin: Position, column: u32, row: u32) -> Position {
        Position {
            x: origin.x + f64::from(column) * self.column_width,
            y: origin.y + f64::from(row) * self.row_height,
        }
    }
}

/// Assigns rows to a tree so that siblings never share a row and later siblings sit lower.
///
/// A node takes the current row; its first child continues on the same row, and each
/// further sibling starts one row below everything its elder siblings used. This is a
/// stable function of the tree's shape, so re-laying out an unchanged tree moves nothing.
#[derive(Debug, Default)]
pub(crate) struct RowCursor {
    next_free: u32,
}

impl RowCursor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Row for a node whose parent sits on `parent_row`; `first_child` marks the eldest sibling.
    pub(crate) fn claim(&mut self, parent_row: Option<u32>, first_child: bool) -> u32 {
        let row = match parent_row {
            Some(row) if first_child => row,
            _ => self.next_free,
        };
        self.next_free = self.next_free.max(row + 1);
        row
    }
}
