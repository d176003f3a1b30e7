pub mod chatlog;
pub mod config;
pub mod error;
pub mod highlight;
pub mod milestone;
pub mod model;
pub mod plugin;
pub mod streak;
pub mod wildcard;
