//! Translation between host file metadata and NFSv3 wire attributes.
//!
//! This module contains functions for:
//! - Mapping the POSIX file-type bits to and from the `ftype3` enumeration
//! - Mapping the POSIX permission bits to the wire mode layout
//! - Narrowing host timestamps into `nfstime3` and widening them back
//! - Assembling `fattr3` records and weak cache consistency bundles from
//!   status-query results
//!
//! Every function here is pure: no I/O, no shared state, safe to call from
//! any number of request handlers concurrently. Narrowing conversions that
//! can lose information (timestamp seconds, link counts) uniformly saturate
//! to the destination range rather than fail; a clamp is logged at debug
//! level because it means the client will see a wrong but representable
//! value.

use tracing::debug;

use crate::protocol::nfs3;
use crate::stat::{FileStat, TimeSpec};

/// Unit of the `blocks` field of [`FileStat`], in bytes.
pub const BLOCK_SIZE: u64 = 512;

/// Maps the file-type bits of a POSIX mode word to the NFS file type.
///
/// Returns `NFS3ERR_BADTYPE` when the type bits match none of the seven
/// types the protocol knows, rather than assuming the remainder must be a
/// fifo; mode words come from the filesystem layer and are not trusted to
/// be well formed.
pub fn mode_to_ftype3(mode: u32) -> Result<nfs3::ftype3, nfs3::nfsstat3> {
    let fmt = mode & libc::S_IFMT as u32;
    if fmt == libc::S_IFREG as u32 {
        Ok(nfs3::ftype3::NF3REG)
    } else if fmt == libc::S_IFDIR as u32 {
        Ok(nfs3::ftype3::NF3DIR)
    } else if fmt == libc::S_IFBLK as u32 {
        Ok(nfs3::ftype3::NF3BLK)
    } else if fmt == libc::S_IFCHR as u32 {
        Ok(nfs3::ftype3::NF3CHR)
    } else if fmt == libc::S_IFLNK as u32 {
        Ok(nfs3::ftype3::NF3LNK)
    } else if fmt == libc::S_IFSOCK as u32 {
        Ok(nfs3::ftype3::NF3SOCK)
    } else if fmt == libc::S_IFIFO as u32 {
        Ok(nfs3::ftype3::NF3FIFO)
    } else {
        debug!("unrecognized file type bits in mode {:#o}", mode);
        Err(nfs3::nfsstat3::NFS3ERR_BADTYPE)
    }
}

/// Maps an NFS file type back to its canonical POSIX file-type constant.
///
/// The match is exhaustive on purpose so that a new `ftype3` variant cannot
/// be added without extending this mapping.
pub fn ftype3_to_mode(ftype: nfs3::ftype3) -> u32 {
    match ftype {
        nfs3::ftype3::NF3REG => libc::S_IFREG as u32,
        nfs3::ftype3::NF3DIR => libc::S_IFDIR as u32,
        nfs3::ftype3::NF3BLK => libc::S_IFBLK as u32,
        nfs3::ftype3::NF3CHR => libc::S_IFCHR as u32,
        nfs3::ftype3::NF3LNK => libc::S_IFLNK as u32,
        nfs3::ftype3::NF3SOCK => libc::S_IFSOCK as u32,
        nfs3::ftype3::NF3FIFO => libc::S_IFIFO as u32,
    }
}

/// Maps the POSIX permission bits of a mode word to the wire mode layout.
///
/// Each of the eleven permission-affecting host bits is tested on its own
/// and ORs in exactly one wire bit; file-type bits and anything else in the
/// mode word are ignored.
pub fn mode_to_nfs_mode(mode: u32) -> nfs3::mode3 {
    let mut nfs_mode = 0;

    // Owner bits:
    if mode & libc::S_IRUSR as u32 != 0 {
        nfs_mode |= nfs3::MODE3_ROWNER;
    }
    if mode & libc::S_IWUSR as u32 != 0 {
        nfs_mode |= nfs3::MODE3_WOWNER;
    }
    if mode & libc::S_IXUSR as u32 != 0 {
        nfs_mode |= nfs3::MODE3_XOWNER;
    }

    // Group bits:
    if mode & libc::S_IRGRP as u32 != 0 {
        nfs_mode |= nfs3::MODE3_RGROUP;
    }
    if mode & libc::S_IWGRP as u32 != 0 {
        nfs_mode |= nfs3::MODE3_WGROUP;
    }
    if mode & libc::S_IXGRP as u32 != 0 {
        nfs_mode |= nfs3::MODE3_XGROUP;
    }

    // Other bits:
    if mode & libc::S_IROTH as u32 != 0 {
        nfs_mode |= nfs3::MODE3_ROTHER;
    }
    if mode & libc::S_IWOTH as u32 != 0 {
        nfs_mode |= nfs3::MODE3_WOTHER;
    }
    if mode & libc::S_IXOTH as u32 != 0 {
        nfs_mode |= nfs3::MODE3_XOTHER;
    }

    if mode & libc::S_ISUID as u32 != 0 {
        nfs_mode |= nfs3::MODE3_SUID;
    }
    if mode & libc::S_ISGID as u32 != 0 {
        nfs_mode |= nfs3::MODE3_SGID;
    }

    nfs_mode
}

/// Saturates a signed host value into a `u32` wire field.
fn narrow_i64(value: i64, what: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| {
        let clamped = if value < 0 { 0 } else { u32::MAX };
        debug!("{} {} outside wire range, clamping to {}", what, value, clamped);
        clamped
    })
}

/// Saturates an unsigned host value into a `u32` wire field.
fn narrow_u64(value: u64, what: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| {
        debug!("{} {} outside wire range, clamping to {}", what, value, u32::MAX);
        u32::MAX
    })
}

/// Narrows a host timestamp to the wire time structure.
///
/// The wire fields are unsigned 32-bit, so pre-1970 times clamp to the
/// epoch and times past 2106 clamp to the maximum representable second.
pub fn timespec_to_nfstime(time: TimeSpec) -> nfs3::nfstime3 {
    nfs3::nfstime3 {
        seconds: narrow_i64(time.seconds, "timestamp seconds"),
        nseconds: narrow_i64(time.nanos, "timestamp nanoseconds"),
    }
}

/// Widens a wire time structure back to a host timestamp. Always lossless.
pub fn nfstime_to_timespec(time: nfs3::nfstime3) -> TimeSpec {
    TimeSpec { seconds: time.seconds as i64, nanos: time.nseconds as i64 }
}

/// Builds the full NFS attribute record from a host status snapshot.
///
/// `used` is derived from the allocated block count at [`BLOCK_SIZE`] bytes
/// per block. `rdev` is always the zero placeholder; host device numbers
/// for special files are not reported yet. Fails only when the mode word's
/// file-type bits are unrecognizable.
pub fn stat_to_fattr3(stat: &FileStat) -> Result<nfs3::fattr3, nfs3::nfsstat3> {
    Ok(nfs3::fattr3 {
        ftype: mode_to_ftype3(stat.mode)?,
        mode: mode_to_nfs_mode(stat.mode),
        nlink: narrow_u64(stat.nlink, "link count"),
        uid: stat.uid,
        gid: stat.gid,
        size: stat.size,
        used: stat.blocks.saturating_mul(BLOCK_SIZE),
        rdev: nfs3::specdata3::default(),
        fsid: stat.dev,
        fileid: stat.ino,
        atime: timespec_to_nfstime(stat.atime),
        mtime: timespec_to_nfstime(stat.mtime),
        ctime: timespec_to_nfstime(stat.ctime),
    })
}

/// Extracts the cheap pre-operation snapshot from a host status record.
///
/// Only size, mtime and ctime: enough for a client to tell whether the
/// object it cached is the one that was mutated, and nothing more.
pub fn stat_to_wcc_attr(stat: &FileStat) -> nfs3::wcc_attr {
    nfs3::wcc_attr {
        size: stat.size,
        mtime: timespec_to_nfstime(stat.mtime),
        ctime: timespec_to_nfstime(stat.ctime),
    }
}

/// Wraps the pre-operation snapshot in its wire presence flag.
pub fn stat_to_pre_op_attr(stat: &FileStat) -> nfs3::pre_op_attr {
    nfs3::pre_op_attr::attributes(stat_to_wcc_attr(stat))
}

fn fattr3_or_void(stat: &FileStat) -> nfs3::post_op_attr {
    match stat_to_fattr3(stat) {
        Ok(attr) => nfs3::post_op_attr::attributes(attr),
        Err(status) => {
            debug!("dropping post-op attributes: {:?}", status);
            nfs3::post_op_attr::Void
        }
    }
}

/// Combines optional pre- and post-mutation status snapshots into the weak
/// cache consistency bundle attached to mutating operation replies.
///
/// Each side is present exactly when the corresponding snapshot is; an
/// absent side tells the client nothing is known about that state, never
/// that the object is unchanged.
pub fn stat_to_wcc_data(pre: Option<&FileStat>, post: Option<&FileStat>) -> nfs3::wcc_data {
    nfs3::wcc_data {
        before: match pre {
            Some(stat) => stat_to_pre_op_attr(stat),
            None => nfs3::pre_op_attr::Void,
        },
        after: match post {
            Some(stat) => fattr3_or_void(stat),
            None => nfs3::post_op_attr::Void,
        },
    }
}

/// Builds post-operation attributes from the outcome of a status query.
///
/// A failed query degrades to the absent value no matter why it failed;
/// re-stating a file after a mutation is best-effort and must never fail
/// the enclosing reply.
pub fn stat_to_post_op_attr<E: std::fmt::Debug>(stat: Result<FileStat, E>) -> nfs3::post_op_attr {
    match stat {
        Ok(stat) => fattr3_or_void(&stat),
        Err(err) => {
            debug!("no post-op attributes: {:?}", err);
            nfs3::post_op_attr::Void
        }
    }
}

/// Compares two NFS attribute records for a significant change.
///
/// Checks the fields clients key their caches on: file identity, data
/// modification time, size and type.
pub fn fattr3_differ(lhs: &nfs3::fattr3, rhs: &nfs3::fattr3) -> bool {
    lhs.fileid != rhs.fileid
        || lhs.mtime.seconds != rhs.mtime.seconds
        || lhs.mtime.nseconds != rhs.mtime.nseconds
        || lhs.size != rhs.size
        || lhs.ftype as u32 != rhs.ftype as u32
}
