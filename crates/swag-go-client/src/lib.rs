pub mod emitters;
pub mod error;
pub mod generator;
pub mod type_mapper;

pub use error::GenerateError;
pub use generator::{CLIENT_FILE, GoClientGenerator, emit_client};
