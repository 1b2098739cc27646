//! Static geometry: CPU-side triangles, the shared vertex layout and the GPU
//! buffers they are uploaded to.

mod layout;
mod store;
mod triangle;

pub use layout::{VertexAttributeDesc, VertexLayout};
pub use store::{GeometryHandle, GeometryStore};
pub use triangle::Triangle;
