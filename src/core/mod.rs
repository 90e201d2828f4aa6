//! # Core Module
//!
//! Shared resource containers used throughout the voxel engine.
//!
//! ## Key Components
//! - `StResource`: Single-threaded reference-counted resource with interior mutability.
//!   The world uses it for chunk handles so a chunk can be shared with callers while
//!   the world keeps ownership of the chunk map.
//!
//! ## Usage
//! ```rust
//! use voxel_terrain::core::StResource;
//!
//! let counter = StResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod st_resource;

pub use st_resource::StResource;
