//! ingeniia-store - Filesystem-backed key-value store.
//!
//! [`FileStore`] is the durable backend behind the token store: one JSON
//! object per file, rewritten atomically on every change.

mod file;

pub use file::FileStore;
