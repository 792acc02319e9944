//! Core domain types
//!
//! These records travel over the wire between the results page served in the
//! cluster and the instructor's collector.

pub mod submission;
