//! Wire-facing protocol definitions.
//!
//! Only the NFSv3 attribute structures live here; the RPC envelope and the
//! XDR byte encoding belong to the transport layer that consumes them.

pub mod nfs3;
