//! Response envelope decoding and typed response handles

pub mod decoder;
pub mod handle;
pub mod shape;

pub use decoder::{decode_bare, decode_data, decode_envelope, decode_json};
pub use handle::{BareResponse, RawResponse, ResponseHandle};
pub use shape::{Container, ContainerKind, List, ListOf, Map, MapOf, Plain, Shape};
