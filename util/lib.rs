/*!
This crate holds small utilities shared by the profiler crates.
*/

pub mod not_nan;
pub mod table;
