/// Dense `columns × rows` grid of cells with a designated empty value.
///
/// Cells are stored row-major. Coordinates are signed so callers can pass
/// raw cell indices derived from world positions; anything outside the grid
/// reads as empty and ignores writes.
#[derive(Debug, Clone, PartialEq)]
pub struct Map<T> {
    columns: usize,
    rows: usize,
    cells: Vec<T>,
    empty: T,
}

impl<T: Clone + PartialEq> Map<T> {
    /// Creates a map filled with `empty`.
    pub fn new(columns: usize, rows: usize, empty: T) -> Self {
        Self {
            columns,
            rows,
            cells: vec![empty.clone(); columns * rows],
            empty,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The sentinel that marks a cell as unoccupied.
    pub fn empty(&self) -> &T {
        &self.empty
    }

    pub fn in_bounds(&self, col: isize, row: isize) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.columns && (row as usize) < self.rows
    }

    #[inline]
    fn index(&self, col: isize, row: isize) -> Option<usize> {
        if self.in_bounds(col, row) {
            Some(col as usize + row as usize * self.columns)
        } else {
            None
        }
    }

    pub fn get(&self, col: isize, row: isize) -> Option<&T> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Writes one cell. Returns `false` when the cell is outside the grid.
    pub fn set(&mut self, col: isize, row: isize, value: T) -> bool {
        match self.index(col, row) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// True for empty cells and for anything outside the grid.
    pub fn is_empty_at(&self, col: isize, row: isize) -> bool {
        self.get(col, row).map_or(true, |value| *value == self.empty)
    }

    /// Writes `value` into the block starting at `(col, row)`, clamped to the grid.
    pub fn fill(&mut self, value: T, col: isize, row: isize, width: isize, height: isize) {
        let col_start = col.max(0);
        let row_start = row.max(0);
        let col_end = col.saturating_add(width).min(self.columns as isize);
        let row_end = row.saturating_add(height).min(self.rows as isize);

        for r in row_start..row_end {
            for c in col_start..col_end {
                let i = c as usize + r as usize * self.columns;
                self.cells[i] = value.clone();
            }
        }
    }

    /// Resets every cell to the empty value.
    pub fn clear(&mut self) {
        let empty = self.empty.clone();
        for cell in self.cells.iter_mut() {
            *cell = empty.clone();
        }
    }

    /// Changes the dimensions. Negative sizes are taken by absolute value;
    /// the overlapping region keeps its values and new cells are empty.
    pub fn resize(&mut self, columns: isize, rows: isize) {
        let columns = columns.unsigned_abs();
        let rows = rows.unsigned_abs();
        if columns == self.columns && rows == self.rows {
            return;
        }

        let mut cells = vec![self.empty.clone(); columns * rows];
        let keep_columns = columns.min(self.columns);
        let keep_rows = rows.min(self.rows);
        for r in 0..keep_rows {
            for c in 0..keep_columns {
                cells[c + r * columns] = self.cells[c + r * self.columns].clone();
            }
        }

        log::debug!(
            "map resized from {}x{} to {}x{}",
            self.columns,
            self.rows,
            columns,
            rows
        );
        self.columns = columns;
        self.rows = rows;
        self.cells = cells;
    }

    /// Every cell as `(col, row, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let columns = self.columns.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, value)| (i % columns, i / columns, value))
    }

    /// Non-empty cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.iter().filter(move |(_, _, value)| **value != self.empty)
    }
}
