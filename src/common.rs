pub mod error;
pub mod extract;
pub mod money;
pub mod patch;
