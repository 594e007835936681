//! The address-space index, Browse/BrowseNext engine, TranslateBrowsePathsToNodeIds resolver,
//! and subscription/monitored-item/Publish scheduler of an OPC UA server, tied together by
//! `ServerCore`. Session/authentication and wire transport are external collaborators; see
//! `session.rs` and `publish.rs` for the minimal stand-ins this crate uses to drive itself.

#[macro_use]
extern crate serde_derive;

pub mod address_space;
pub mod browse;
pub mod config;
pub mod continuation_point;
pub mod core;
pub mod diagnostics;
pub mod fill_data_value;
pub mod publish;
pub mod session;
pub mod subscriptions;
pub mod translate;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::address_space::{AddressSpace, AddressSpaceBuilder};
    pub use crate::config::ServerConfig;
    pub use crate::core::ServerCore;
    pub use crate::diagnostics::ServerDiagnostics;
    pub use crate::session::{Session, SessionData, SessionStore};
    pub use opcua_types::prelude::*;
}
