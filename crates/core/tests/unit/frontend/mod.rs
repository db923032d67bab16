//! # Front Ends


/// Fixed 3-core front end.
pub mod tricore;
