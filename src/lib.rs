//! Deadline tracking and named-list editing over plain JSON files.
//!
//! `model` holds the data types, `ops` the operations on them, `io` the disk
//! adapters, and `cli` the `dk` front end.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod util;
