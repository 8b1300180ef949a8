//! Diagram log format (append-only text).
//!
//! One diagram per line, placements separated by commas, label last:
//!
//! ```text
//! Row 12 Red,Column 5 Blue,Row 3 Yellow,Column 18 Green, Dangerous
//! ```
//!
//! Inference input uses the same placement fields without the label.
//!
//! # Example
//!
//! ```
//! use wirelab::format::{format_record, parse_record};
//!
//! let line = "Row 12 Red,Column 5 Blue,Row 3 Yellow,Column 18 Green, Dangerous";
//! let record = parse_record(line).expect("well-formed record");
//! assert_eq!(format_record(&record.diagram, record.label), line);
//! ```

mod log;
mod record;

pub use log::{read_records, DiagramLog, LoadPolicy, LoadReport};
pub use record::{format_record, parse_diagram, parse_placement, parse_record, Record};
