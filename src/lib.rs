//! nfs3-attr - NFSv3 attribute translation for Rust NFS servers
//!
//! This library converts host filesystem metadata into the fixed-layout
//! attribute structures of the NFS version 3 protocol as defined in
//! RFC 1813: file type tags, permission bits, timestamps, the full `fattr3`
//! attribute record, and the weak cache consistency (`wcc_data`) bundle
//! that mutating operations attach to their replies.
//!
//! ## Main Components
//!
//! - `protocol::nfs3` (re-exported as `nfs3`): the wire-side data model.
//!   Field order and integer widths follow RFC 1813 exactly; encoding them
//!   as XDR bytes is the transport layer's job, not this crate's.
//!
//! - `stat`: the host-side `FileStat` record. The filesystem dispatcher
//!   performs the actual status query and hands its outcome here; on Unix a
//!   `FileStat` can be taken straight from `std::fs::Metadata`.
//!
//! - `attr`: the translation functions. All of them are pure and free of
//!   I/O, so they can be called concurrently from any request-handling
//!   context without synchronization.
//!
//! ## Conversion policy
//!
//! Host integers wider than their wire fields (timestamp seconds, link
//! counts) saturate to the destination range, uniformly across the crate.
//! Unrecognizable file-type bits surface as `NFS3ERR_BADTYPE` instead of a
//! crash, except when assembling post-operation attributes, where the
//! protocol requires degrading to the absent value. The `rdev` field is
//! always the zero placeholder; real device numbers are a known gap, not an
//! oversight.

pub mod attr;
pub mod protocol;
pub mod stat;

pub use protocol::nfs3;
