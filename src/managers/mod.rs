// docbrowser state managers
// Managers own stateful operations over the local store.

pub mod frequently_viewed;
pub mod frequently_viewed_view;
