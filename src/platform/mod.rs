//! Platform bindings of the tree-access capability.
//!
//! Only macOS has one. Elsewhere the [`RecordExtractor`](crate::RecordExtractor)
//! facade reports `UnsupportedPlatform` and trees can still be replayed from
//! JSON dumps through [`MemoryTree`](crate::memory::MemoryTree).

#[cfg(target_os = "macos")]
pub mod macos;
