//! docbrowser — documentation browser core.
//!
//! The centre of the crate is the frequently viewed documents list kept in a
//! local key-value store ([`managers::frequently_viewed`]). Around it sit the
//! store backends, settings, static page loading and a JSON-RPC front end.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod storage;
pub mod types;
