//! Swap-to-end maintenance primitives.
//!
//! Deletion always swaps the doomed item to the end of its list, migrates its
//! elements to the tail of the global element list, and truncates. Every
//! cross-reference that an index move invalidates is repaired here, inside
//! the primitive; callers never touch back-pointers.

use crate::model::{Model, ModelError};
use crate::types::ItemState;

impl Model {
    /// Exchange the rows at `a` and `b`, rewriting the row back-pointer of
    /// every element listed by either row.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<(), ModelError> {
        let len = self.rows.len();
        if a >= len {
            return Err(self.row_range_error(a));
        }
        if b >= len {
            return Err(self.row_range_error(b));
        }
        if a == b {
            return Ok(());
        }

        for &e in &self.rows[a].elements {
            self.elements[e].row = b;
        }
        for &e in &self.rows[b].elements {
            self.elements[e].row = a;
        }
        self.rows.swap(a, b);

        match self.objective_row {
            Some(o) if o == a => self.objective_row = Some(b),
            Some(o) if o == b => self.objective_row = Some(a),
            _ => {}
        }
        tracing::trace!(component = "model", operation = "swap_rows", a, b, "Swapped rows");
        Ok(())
    }

    /// Exchange the columns at `a` and `b`, rewriting the column back-pointer
    /// of every element listed by either column.
    pub fn swap_columns(&mut self, a: usize, b: usize) -> Result<(), ModelError> {
        let len = self.columns.len();
        if a >= len {
            return Err(self.column_range_error(a));
        }
        if b >= len {
            return Err(self.column_range_error(b));
        }
        if a == b {
            return Ok(());
        }

        for &e in &self.columns[a].elements {
            self.elements[e].column = b;
        }
        for &e in &self.columns[b].elements {
            self.elements[e].column = a;
        }
        self.columns.swap(a, b);
        tracing::trace!(component = "model", operation = "swap_columns", a, b, "Swapped columns");
        Ok(())
    }

    /// Delete the row at `index`.
    ///
    /// The row is first swapped to the end of the list, then each of its
    /// elements is detached and migrated to the element-list tail, and
    /// finally both lists are truncated. Deleting the objective row clears
    /// the objective designation.
    pub fn delete_row(&mut self, index: usize) -> Result<(), ModelError> {
        let len = self.rows.len();
        if index >= len {
            return Err(self.row_range_error(index));
        }
        let last = len - 1;
        if index != last {
            self.swap_rows(index, last)?;
        }
        if self.objective_row == Some(last) {
            self.objective_row = None;
        }

        // The list entries are rewritten in place whenever the tail element
        // moves, so popping one entry at a time always yields the element's
        // current location.
        while let Some(current) = self.rows[last].elements.pop() {
            self.drop_element(current);
        }

        let dropped = self.rows.pop();
        tracing::trace!(
            component = "model",
            operation = "delete_row",
            row = %dropped.map(|r| r.name).unwrap_or_default(),
            "Deleted row"
        );
        Ok(())
    }

    /// Delete the column at `index`; the column-side analogue of
    /// [`Model::delete_row`].
    pub fn delete_column(&mut self, index: usize) -> Result<(), ModelError> {
        let len = self.columns.len();
        if index >= len {
            return Err(self.column_range_error(index));
        }
        let last = len - 1;
        if index != last {
            self.swap_columns(index, last)?;
        }

        while let Some(current) = self.columns[last].elements.pop() {
            self.drop_element(current);
        }

        let dropped = self.columns.pop();
        tracing::trace!(
            component = "model",
            operation = "delete_column",
            column = %dropped.map(|c| c.name).unwrap_or_default(),
            "Deleted column"
        );
        Ok(())
    }

    /// Delete every row tagged [`ItemState::Delete`], scanning from the end
    /// so that each remaining tagged index stays valid until it is reached.
    /// Returns the number of rows deleted.
    pub fn delete_tagged_rows(&mut self) -> Result<usize, ModelError> {
        let mut deleted = 0;
        for index in (0..self.rows.len()).rev() {
            if self.rows[index].state == ItemState::Delete {
                self.delete_row(index)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// Delete every column tagged [`ItemState::Delete`], scanning from the
    /// end. Returns the number of columns deleted.
    pub fn delete_tagged_columns(&mut self) -> Result<usize, ModelError> {
        let mut deleted = 0;
        for index in (0..self.columns.len()).rev() {
            if self.columns[index].state == ItemState::Delete {
                self.delete_column(index)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// Detach the element at `index` from both host lists, relocate the tail
    /// element into its slot, repair the two references to the tail, and
    /// truncate the element list by one.
    fn drop_element(&mut self, index: usize) {
        let row = self.elements[index].row;
        self.rows[row].elements.retain(|&e| e != index);
        let column = self.elements[index].column;
        self.columns[column].elements.retain(|&e| e != index);

        let tail = self.elements.len() - 1;
        if index != tail {
            let moved_row = self.elements[tail].row;
            if let Some(slot) = self.rows[moved_row].elements.iter_mut().find(|slot| **slot == tail) {
                *slot = index;
            }
            let moved_column = self.elements[tail].column;
            if let Some(slot) = self
                .columns[moved_column]
                .elements
                .iter_mut()
                .find(|slot| **slot == tail)
            {
                *slot = index;
            }
            self.elements.swap(index, tail);
        }
        self.elements.pop();
    }
}
