//! D-Bus plumbing: the ObjectManager proxy and variant decoding helpers

pub mod bytestring;
pub mod object_manager;
pub(crate) mod values;

pub use object_manager::{ManagedObjectsReply, UDisks2ObjectManagerProxy};
