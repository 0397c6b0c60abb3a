pub mod buffer;
pub mod gate;
pub mod loop_controller;
