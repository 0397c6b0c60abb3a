pub mod broadcaster;
pub mod state;
