//! Declarative rule tables and value parsers for vale and order fields.

pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod vendors;
pub mod words;

pub use amounts::parse_amount;
pub use dates::parse_fecha;
pub use vendors::{generic_branch, standard_branches};
pub use words::spanish_rule_table;
