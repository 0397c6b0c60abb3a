pub mod host;
pub mod pending;
