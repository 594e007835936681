//! Data model types for the address-space, Browse, TranslateBrowsePathsToNodeIds and
//! subscription/monitored-item/Publish services of an OPC UA server.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate serde_derive;

pub mod browse;
pub mod constants;
pub mod data_value;
pub mod node;
pub mod node_id;
pub mod qualified_name;
pub mod reference;
pub mod service_types;
pub mod status_code;
pub mod translate;
pub mod variant;

pub mod prelude {
    pub use crate::browse::*;
    pub use crate::constants::*;
    pub use crate::data_value::*;
    pub use crate::node::*;
    pub use crate::node_id::*;
    pub use crate::qualified_name::*;
    pub use crate::reference::*;
    pub use crate::service_types::*;
    pub use crate::status_code::*;
    pub use crate::translate::*;
    pub use crate::variant::*;
}
