// docbrowser shared type definitions
// Each submodule defines types used across the crate.

pub mod document;
pub mod errors;
pub mod frequently_viewed;
pub mod settings;
