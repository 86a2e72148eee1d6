//! Command implementations for the seedalign CLI

pub mod search;
