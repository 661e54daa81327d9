mod reader;
mod dir;
mod memory;

pub use reader::ArchiveReader;
pub use dir::DirReader;
pub use memory::MemoryReader;
