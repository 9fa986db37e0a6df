pub mod models;
pub mod local_store;
pub mod json_store;
pub(crate) mod sample_data;

pub use models::*;
pub use local_store::*;
pub use json_store::*;
