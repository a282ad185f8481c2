//! The individual reduction kernels.
//!
//! Each kernel scans active items, tags what it removes, appends a ledger
//! record per removal (one record for a joint row-and-column removal), and
//! finishes by sweeping the tagged items out of the store. Tagging and
//! deletion are never interleaved within a pass.

mod empty;
mod fixed;
mod nonbinding;
mod singleton;

pub(crate) use empty::{delete_empty_columns, delete_empty_rows};
pub(crate) use fixed::delete_fixed_variables;
pub(crate) use nonbinding::delete_nonbinding_rows;
pub(crate) use singleton::{delete_free_column_singletons, delete_row_singletons};
