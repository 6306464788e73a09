//! Read-only SQLite access: the pooled handle, its TTL cache, and the
//! SQL toolkit implementation the agent queries through.

pub mod cache;
pub mod pool;
pub mod toolkit;

pub use cache::HandleCache;
pub use pool::ReadOnlyPool;
pub use toolkit::SqliteToolkit;
