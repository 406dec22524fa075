//! Metadata entities
//!
//! Leaf records ([`Checksum`], [`Release`], [`Provide`]) and the
//! [`Component`] that aggregates them.

mod builder;
mod checksum;
mod component;
mod provide;
mod release;

pub use builder::ComponentBuilder;
pub use checksum::{Checksum, DEFAULT_CHECKSUM_KIND};
pub use component::{Component, IconAttributes, ACCEPTED_METADATA_LICENSE};
pub use provide::{Provide, KIND_FIRMWARE_FLASHED};
pub use release::Release;
