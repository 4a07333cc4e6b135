//! sheetgrid - A1 notation and grid shaping for spreadsheet REST clients
//!
//! This crate translates between human-facing A1 cell labels ("B7", "A1:C10",
//! "A:B", "5:9") and the 0-based half-open `GridRange` indices a spreadsheet
//! REST API expects, and reshapes the ragged row arrays such APIs return into
//! rectangular grids. Everything is pure and synchronous; no network I/O.
//!
//! # Quick Start
//!
//! ```rust
//! use sheetgrid::{a1_to_rowcol, rowcol_to_a1, a1_range_to_grid_range};
//!
//! fn main() -> Result<(), sheetgrid::SheetGridError> {
//!     let address = a1_to_rowcol("AA10")?;
//!     assert_eq!((address.row, address.col), (10, 27));
//!     assert_eq!(rowcol_to_a1(10, 27)?, "AA10");
//!
//!     // Corners are normalized per axis
//!     let range = a1_range_to_grid_range("D4:A1", Some(0))?;
//!     assert_eq!(range.start_row_index, Some(0));
//!     assert_eq!(range.end_column_index, Some(4));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Shaping Responses
//!
//! ```rust
//! use sheetgrid::fill_gaps;
//!
//! let ragged = vec![vec!["a".to_string(), "b".to_string()], vec![]];
//! let grid = fill_gaps(ragged, Some(3), None, String::new());
//!
//! assert_eq!(grid, vec![vec!["a", "b"], vec!["", ""], vec!["", ""]]);
//! ```
//!
//! # Planning Writes
//!
//! ```rust
//! use sheetgrid::{CellUpdate, GridShaperBuilder, ValueInputOption};
//!
//! fn main() -> Result<(), sheetgrid::SheetGridError> {
//!     let shaper = GridShaperBuilder::<String>::new()
//!         .with_max_batch_cells(2)
//!         .with_value_input_option(ValueInputOption::UserEntered)
//!         .build()?;
//!
//!     let updates = vec![
//!         CellUpdate::new(1, 3, "y".to_string()),
//!         CellUpdate::new(1, 2, "x".to_string()),
//!         CellUpdate::new(4000, 200, "z".to_string()),
//!     ];
//!
//!     // One request per batch; each request writes only the updated cells,
//!     // grouped into runs of adjacent cells within a row
//!     let requests = shaper.batch_update_requests("Sheet1", &updates)?;
//!     assert_eq!(requests.len(), 2);
//!     assert_eq!(requests[0].data[0].range, "'Sheet1'!B1:C1");
//!     assert_eq!(requests[1].data[0].range, "'Sheet1'!GR4000:GR4000");
//!
//!     for request in &requests {
//!         println!("{}", request.to_json_string()?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Records
//!
//! ```rust
//! use sheetgrid::{get_all_records, CellValue, RecordOptions};
//!
//! let values = vec![
//!     vec!["name".to_string(), "score".to_string()],
//!     vec!["Alice".to_string(), "1,200".to_string()],
//! ];
//! let records = get_all_records(&values, &RecordOptions::default()).unwrap();
//! assert_eq!(records[0].get("score"), Some(&CellValue::Int(1200)));
//! ```

mod address;
mod api;
mod batch;
mod builder;
mod error;
mod grid;
mod records;
mod types;
mod wire;

// 公開API
pub use address::{
    a1_range_to_grid_range, a1_to_rowcol, absolute_range_name, column_index_to_letter,
    column_letter_to_index, get_a1_from_absolute_range, is_full_a1_notation, parse_endpoint,
    rowcol_to_a1,
};
pub use api::{Dimension, TableDirection, ValueInputOption};
pub use batch::{partition_updates, DEFAULT_MAX_CELLS_PER_BATCH};
pub use builder::{GridShaper, GridShaperBuilder, RangeRequest, RangeRequestBuilder, RangeSpec};
pub use error::SheetGridError;
pub use grid::{cell_list_to_rect, combined_merge_values, fill_gaps, find_table};
pub use records::{
    get_all_records, numericise, to_records, NumericiseOptions, Record, RecordOptions,
};
pub use types::{CellAddress, CellRect, CellUpdate, CellValue, RangeEndpoint};
pub use wire::{BatchUpdateValuesRequest, GridRange, ValueRange};
