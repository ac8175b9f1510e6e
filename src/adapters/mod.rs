// Adapters layer: concrete implementations of the domain ports (local files, JSON documents).

pub mod json_store;
pub mod storage;
