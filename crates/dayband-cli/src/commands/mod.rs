pub mod adjust;
pub mod batch;
pub mod common;
pub mod export;
pub mod marker;
pub mod show;
