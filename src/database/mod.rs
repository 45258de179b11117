//! SQLite database layer behind the persistent local store.
//!
//! # Usage
//!
//! ```no_run
//! use docbrowser::database::Database;
//!
//! let db = Database::open("docbrowser.db").expect("failed to open database");
//! let in_memory = Database::open_in_memory().expect("failed to open in-memory database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
