mod reader;
mod writer;

pub use reader::ZipBatch;
pub use writer::ZipArchiveWriter;
