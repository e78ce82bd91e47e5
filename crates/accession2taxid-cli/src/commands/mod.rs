//! Command implementations

pub mod lookup;
pub mod redis;
pub mod sqlite;
