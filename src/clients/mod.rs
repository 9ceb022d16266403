pub mod backend;
pub mod http_backend;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Backend, NotesStream};
pub use http_backend::HttpBackend;
