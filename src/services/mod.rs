pub mod chunk_decoder;
pub mod notes_markup;

pub use chunk_decoder::ChunkDecoder;
pub use notes_markup::{export_notes, to_pdf_markup, NotesExport};
