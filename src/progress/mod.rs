pub mod mapper;
pub mod offset;
