//! NFS version 3 attribute data types and constants, as defined in RFC 1813.
//!
//! These are the fixed-layout structures that attribute-bearing NFSv3 replies
//! carry on the wire: the file type enumeration, the mode bit layout, the
//! timestamp pair, the full `fattr3` attribute record, and the weak cache
//! consistency (`wcc_data`) bundle attached to mutating operations.
//!
//! This module only defines the structures; XDR encoding of them is the
//! serialization layer's job. Field order and integer widths follow RFC 1813
//! exactly so the structures can be serialized field by field.

// Preserve original RFC naming conventions for consistency with the specification
#![allow(non_camel_case_types)]

use num_derive::{FromPrimitive, ToPrimitive};

/// File identifier as defined in RFC 1813 section 2.5
/// A unique number that identifies a file within a filesystem
pub type fileid3 = u64;
/// User ID as defined in RFC 1813 section 2.5
pub type uid3 = u32;
/// Group ID as defined in RFC 1813 section 2.5
pub type gid3 = u32;
/// File size in bytes as defined in RFC 1813 section 2.5
pub type size3 = u64;
/// File mode bits as defined in RFC 1813 section 2.5
pub type mode3 = u32;

/// Status codes returned by NFS version 3 operations
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum nfsstat3 {
    /// The call completed successfully.
    NFS3_OK = 0,
    /// Not owner. The caller is neither privileged nor the owner of the
    /// target of the operation.
    NFS3ERR_PERM = 1,
    /// No such file or directory.
    NFS3ERR_NOENT = 2,
    /// A hard I/O error (for example, a disk error) occurred while
    /// processing the requested operation.
    NFS3ERR_IO = 5,
    /// No such device or address.
    NFS3ERR_NXIO = 6,
    /// Permission denied. Contrast with NFS3ERR_PERM, which restricts
    /// itself to owner or privileged-user permission failures.
    NFS3ERR_ACCES = 13,
    /// The file specified already exists.
    NFS3ERR_EXIST = 17,
    /// Attempt to do a cross-device hard link.
    NFS3ERR_XDEV = 18,
    /// No such device.
    NFS3ERR_NODEV = 19,
    /// The caller specified a non-directory in a directory operation.
    NFS3ERR_NOTDIR = 20,
    /// The caller specified a directory in a non-directory operation.
    NFS3ERR_ISDIR = 21,
    /// Invalid or unsupported argument for an operation.
    NFS3ERR_INVAL = 22,
    /// The operation would have caused a file to grow beyond the server's
    /// limit.
    NFS3ERR_FBIG = 27,
    /// No space left on device.
    NFS3ERR_NOSPC = 28,
    /// A modifying operation was attempted on a read-only file system.
    NFS3ERR_ROFS = 30,
    /// Too many hard links.
    NFS3ERR_MLINK = 31,
    /// The filename in an operation was too long.
    NFS3ERR_NAMETOOLONG = 63,
    /// An attempt was made to remove a directory that was not empty.
    NFS3ERR_NOTEMPTY = 66,
    /// Resource (quota) hard limit exceeded.
    NFS3ERR_DQUOT = 69,
    /// Invalid file handle. The file referred to by that file handle no
    /// longer exists or access to it has been revoked.
    NFS3ERR_STALE = 70,
    /// Too many levels of remote in path.
    NFS3ERR_REMOTE = 71,
    /// Illegal NFS file handle. The file handle failed internal
    /// consistency checks.
    NFS3ERR_BADHANDLE = 10001,
    /// Update synchronization mismatch was detected during a SETATTR
    /// operation.
    NFS3ERR_NOT_SYNC = 10002,
    /// READDIR or READDIRPLUS cookie is stale.
    NFS3ERR_BAD_COOKIE = 10003,
    /// Operation is not supported.
    NFS3ERR_NOTSUPP = 10004,
    /// Buffer or request is too small.
    NFS3ERR_TOOSMALL = 10005,
    /// An error occurred on the server which does not map to any of the
    /// legal NFS version 3 protocol error values.
    NFS3ERR_SERVERFAULT = 10006,
    /// An attempt was made to create an object of a type not supported by
    /// the server.
    NFS3ERR_BADTYPE = 10007,
    /// The server initiated the request, but was not able to complete it
    /// in a timely fashion. The client should wait and then retry with a
    /// new RPC transaction ID.
    NFS3ERR_JUKEBOX = 10008,
}

/// File type enumeration as defined in RFC 1813 section 2.3.5
/// Determines the type of a file system object
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum ftype3 {
    /// Regular File
    #[default]
    NF3REG = 1,
    /// Directory
    NF3DIR = 2,
    /// Block Special Device
    NF3BLK = 3,
    /// Character Special Device
    NF3CHR = 4,
    /// Symbolic Link
    NF3LNK = 5,
    /// Socket
    NF3SOCK = 6,
    /// Named Pipe
    NF3FIFO = 7,
}

// Mode bit layout as defined in RFC 1813 section 2.3.5. The numeric values
// coincide with the traditional POSIX permission bits, but the protocol fixes
// them independently, so they are spelled out here rather than borrowed from
// the host's headers.

/// Set user ID on execution.
pub const MODE3_SUID: mode3 = 0x00800;
/// Set group ID on execution.
pub const MODE3_SGID: mode3 = 0x00400;
/// Save swapped text (not defined in POSIX). Defined by the protocol but
/// never produced by the attribute translator.
pub const MODE3_SVTX: mode3 = 0x00200;
/// Read permission for the owner of the file.
pub const MODE3_ROWNER: mode3 = 0x00100;
/// Write permission for the owner of the file.
pub const MODE3_WOWNER: mode3 = 0x00080;
/// Execute (search for directories) permission for the owner of the file.
pub const MODE3_XOWNER: mode3 = 0x00040;
/// Read permission for the group of the file.
pub const MODE3_RGROUP: mode3 = 0x00020;
/// Write permission for the group of the file.
pub const MODE3_WGROUP: mode3 = 0x00010;
/// Execute permission for the group of the file.
pub const MODE3_XGROUP: mode3 = 0x00008;
/// Read permission for others.
pub const MODE3_ROTHER: mode3 = 0x00004;
/// Write permission for others.
pub const MODE3_WOTHER: mode3 = 0x00002;
/// Execute permission for others.
pub const MODE3_XOTHER: mode3 = 0x00001;

/// NFS version 3 time structure
/// Used for file timestamps (access, modify, change)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct nfstime3 {
    /// Seconds since Unix epoch (January 1, 1970)
    pub seconds: u32,
    /// Nanoseconds (0-999999999)
    pub nseconds: u32,
}

impl From<nfstime3> for filetime::FileTime {
    fn from(time: nfstime3) -> Self {
        filetime::FileTime::from_unix_time(time.seconds as i64, time.nseconds)
    }
}

/// Special device information for character and block special devices
/// Contains the major and minor device numbers
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct specdata3 {
    /// Major device number
    pub specdata1: u32,
    /// Minor device number
    pub specdata2: u32,
}

/// File attributes in NFS version 3 as defined in RFC 1813 section 2.3.5
///
/// Field order matches the protocol's XDR layout and must not be rearranged:
/// type, mode, nlink, uid, gid, size, used, rdev, fsid, fileid, atime,
/// mtime, ctime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct fattr3 {
    /// Type of file (regular, directory, symbolic link, etc.)
    pub ftype: ftype3,
    /// File permission bits in the wire layout described by the `MODE3_*`
    /// constants
    pub mode: mode3,
    /// Number of hard links to the file
    pub nlink: u32,
    /// User ID of the file owner
    pub uid: uid3,
    /// Group ID of the file's group
    pub gid: gid3,
    /// File size in bytes
    pub size: size3,
    /// Size in bytes actually allocated to the file on the server's file
    /// system. May differ from size due to block allocation policies
    pub used: size3,
    /// Device ID information for character or block special files.
    /// Always the zero placeholder in attributes built by this crate; real
    /// device numbers are not yet plumbed through from the host
    pub rdev: specdata3,
    /// File system identifier
    pub fsid: u64,
    /// File identifier (inode number), unique within its file system
    pub fileid: fileid3,
    /// Time of last access to the file data
    pub atime: nfstime3,
    /// Time of last modification to the file data
    pub mtime: nfstime3,
    /// Time of last status change (modification to the file's attributes)
    pub ctime: nfstime3,
}

/// Attributes used in weak cache consistency checking as defined in
/// RFC 1813 section 2.3.8
///
/// Deliberately a small subset of `fattr3`: enough for a client to detect
/// that the object changed underneath it, not enough to refresh its
/// attribute cache.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct wcc_attr {
    /// File size in bytes
    pub size: size3,
    /// Last modification time of the file
    pub mtime: nfstime3,
    /// Last status change time of the file
    pub ctime: nfstime3,
}

/// Pre-operation attributes for weak cache consistency as defined in
/// RFC 1813 section 2.3.8. Presence-flagged on the wire.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u32)]
pub enum pre_op_attr {
    #[default]
    /// No attributes available
    Void,
    /// Attributes are available
    attributes(wcc_attr),
}

/// Post-operation attributes as defined in RFC 1813 section 2.3.8.
/// Returned in almost all NFS procedure responses so clients can maintain a
/// consistent attribute cache; `Void` tells the client to fetch attributes
/// itself if it wants them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u32)]
pub enum post_op_attr {
    #[default]
    /// No attributes available
    Void,
    /// Attributes are available
    attributes(fattr3),
}

/// Weak cache consistency data as defined in RFC 1813 section 2.3.8
///
/// Attached to the response of every mutating operation. `before` lets the
/// client confirm it is invalidating the version it expected; `after` lets
/// it refresh its cache without an extra GETATTR round trip. Either side may
/// independently be absent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct wcc_data {
    /// File attributes before the operation
    pub before: pre_op_attr,
    /// File attributes after the operation
    pub after: post_op_attr,
}
