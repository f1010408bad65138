pub mod data_type;
pub mod descriptor;
pub mod element_kind;
pub mod error;
pub mod sidecar;
pub mod typed_array;

pub use data_type::*;
pub use descriptor::*;
pub use element_kind::*;
pub use error::*;
pub use sidecar::*;
pub use typed_array::*;
