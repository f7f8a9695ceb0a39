//! Client-side persisted state

mod identity_file_cache;

pub use identity_file_cache::FileIdentityCache;
