//! Row-level diffing of query results.

mod comparer;


pub use comparer::*;
