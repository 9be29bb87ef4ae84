//! Resource providers for label artwork.
//!
//! [`FilesystemResourceProvider`] reads logos and backgrounds from disk;
//! [`InMemoryResourceProvider`] is re-exported for callers that hold the
//! bytes already.

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use jarlabel_traits::InMemoryResourceProvider;
