//! # appstream
//!
//! Parse, validate and write AppStream firmware metadata.
//!
//! Vendors ship a metainfo file per firmware component; a firmware service
//! checks each one, merges new releases into what it already knows, and
//! publishes a compressed catalog of everything.
//!
//! ## Features
//!
//! - Component, release, provide and checksum parsing from metainfo XML
//! - Firmware metadata validation
//! - Description markup flattening, validation and plain-text import
//! - Catalog (`<components>`) parsing and writing, gzip-compressed on disk
//!
//! ## Example
//!
//! ```rust
//! use appstream::{Component, Store};
//!
//! let xml = r#"<component type="firmware">
//!   <id>com.hughski.ColorHug.firmware</id>
//!   <name>ColorHug Device Update</name>
//!   <summary>Firmware for the Hughski ColorHug Colorimeter</summary>
//!   <description><p>Updating adds new features.</p></description>
//!   <provides><firmware type="flashed">40338ceb-b966-4eae-adae-9c32edfcc484</firmware></provides>
//!   <metadata_license>CC0-1.0</metadata_license>
//!   <project_license>GPL-2.0+</project_license>
//!   <developer_name>Hughski Limited</developer_name>
//!   <releases><release version="1.2.4" timestamp="1438454314"/></releases>
//! </component>"#;
//!
//! let component = Component::parse(xml)?;
//! component.validate()?;
//!
//! let mut store = Store::with_origin("lvfs");
//! store.add(component);
//! assert!(store.to_xml().contains("<id>com.hughski.ColorHug.firmware</id>"));
//! # Ok::<(), appstream::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod documents;
pub mod error;
pub mod limits;
pub mod markup;
pub mod store;

// Re-exports for convenience
pub use components::{Checksum, Component, ComponentBuilder, Provide, Release};
pub use error::{Error, ParseError, Result, ValidationError};
pub use limits::Limits;
pub use store::Store;

/// Version of the appstream library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
