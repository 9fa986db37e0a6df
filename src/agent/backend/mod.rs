pub mod backend_interface;
pub mod ollama_backend;

pub use backend_interface::*;
pub use ollama_backend::*;
