pub mod archive;
pub mod error;
pub mod export;
pub mod pipeline;
