pub mod export;

pub use export::{export_csv, write_csv, write_json_lines};
