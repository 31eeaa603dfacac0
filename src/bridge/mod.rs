pub mod registry;
pub mod wire;

pub use registry::{ComponentRegistry, ComponentSpec, InMemoryComponents};
pub use wire::decode;
