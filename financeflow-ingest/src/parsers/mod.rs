pub mod csv_records;
pub mod json_records;
pub mod llm_reply;

pub use csv_records::parse_csv_records;
pub use json_records::{parse_json_records, records_from_value};
pub use llm_reply::parse_llm_reply;
