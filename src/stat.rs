//! Host-side file status record handed to the attribute translator.
//!
//! The filesystem dispatcher owns the actual status query; this crate only
//! receives its outcome. `FileStat` is a plain snapshot of the stat fields
//! the translator consumes, so callers (and tests) can construct one without
//! touching the filesystem, and so the translation logic is written against
//! a single field-naming convention regardless of platform.

#[cfg(unix)]
use std::fs::Metadata;
#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// A host timestamp: seconds and nanoseconds relative to the Unix epoch.
///
/// Wider than the wire's `nfstime3` on purpose; hosts can report pre-1970
/// and far-future times that the wire format cannot carry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeSpec {
    /// Seconds since the Unix epoch, possibly negative
    pub seconds: i64,
    /// Nanosecond part of the timestamp
    pub nanos: i64,
}

impl From<filetime::FileTime> for TimeSpec {
    fn from(time: filetime::FileTime) -> Self {
        TimeSpec { seconds: time.unix_seconds(), nanos: time.nanoseconds() as i64 }
    }
}

/// Snapshot of the host metadata for one filesystem object.
///
/// Field widths are the host-native ones; narrowing to the wire widths is
/// the translator's job.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FileStat {
    /// Raw POSIX mode word: file type bits plus permission bits
    pub mode: u32,
    /// Number of hard links
    pub nlink: u64,
    /// Owner user ID
    pub uid: u32,
    /// Owner group ID
    pub gid: u32,
    /// Object size in bytes
    pub size: u64,
    /// Number of 512-byte storage blocks allocated to the object
    pub blocks: u64,
    /// Device number of the filesystem holding the object
    pub dev: u64,
    /// Inode number
    pub ino: u64,
    /// Time of last access
    pub atime: TimeSpec,
    /// Time of last data modification
    pub mtime: TimeSpec,
    /// Time of last status change
    pub ctime: TimeSpec,
}

/// The one place platform divergence in stat field naming is resolved.
/// `MetadataExt` exposes the timestamp pairs under uniform accessor names
/// across Unix families, so the translator never branches on platform.
#[cfg(unix)]
impl From<&Metadata> for FileStat {
    fn from(meta: &Metadata) -> Self {
        FileStat {
            mode: meta.mode(),
            nlink: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            blocks: meta.blocks(),
            dev: meta.dev(),
            ino: meta.ino(),
            atime: TimeSpec { seconds: meta.atime(), nanos: meta.atime_nsec() },
            mtime: TimeSpec { seconds: meta.mtime(), nanos: meta.mtime_nsec() },
            ctime: TimeSpec { seconds: meta.ctime(), nanos: meta.ctime_nsec() },
        }
    }
}
