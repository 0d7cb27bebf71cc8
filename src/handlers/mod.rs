//! Demo handlers registered by the `gooday` binary.

pub mod day;
