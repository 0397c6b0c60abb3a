pub mod channel;
pub mod ease;
pub mod ramp;
pub mod smoothing;
pub mod spring;
