pub mod csv_file;
pub mod roster_rows;
pub mod sheets;
