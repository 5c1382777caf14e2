//! Reading item tables and writing solved placements as comma-separated text.

mod item_table;

pub use item_table::read_item_table;
pub use item_table::write_placement;
pub use item_table::ItemTableError;
