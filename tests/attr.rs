use nfs3_attr::attr::{
    fattr3_differ, ftype3_to_mode, mode_to_ftype3, mode_to_nfs_mode, nfstime_to_timespec,
    stat_to_fattr3, stat_to_post_op_attr, stat_to_pre_op_attr, stat_to_wcc_data,
    timespec_to_nfstime, BLOCK_SIZE,
};
use nfs3_attr::nfs3;
use nfs3_attr::stat::{FileStat, TimeSpec};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .try_init();
}

fn sample_stat(mode: u32) -> FileStat {
    FileStat {
        mode,
        nlink: 2,
        uid: 501,
        gid: 20,
        size: 4096,
        blocks: 9,
        dev: 0x803,
        ino: 1234567,
        atime: TimeSpec { seconds: 1_700_000_000, nanos: 111_111_111 },
        mtime: TimeSpec { seconds: 1_700_000_100, nanos: 222_222_222 },
        ctime: TimeSpec { seconds: 1_700_000_200, nanos: 333_333_333 },
    }
}

#[test]
fn ftype_round_trips_for_all_seven_types() {
    init_logging();
    let canonical = [
        libc::S_IFREG as u32,
        libc::S_IFDIR as u32,
        libc::S_IFBLK as u32,
        libc::S_IFCHR as u32,
        libc::S_IFLNK as u32,
        libc::S_IFSOCK as u32,
        libc::S_IFIFO as u32,
    ];
    for mode in canonical {
        let ftype = mode_to_ftype3(mode).expect("canonical mode must map");
        assert_eq!(ftype3_to_mode(ftype), mode);
        // permission bits must not disturb the type mapping
        let ftype = mode_to_ftype3(mode | 0o755).expect("mode with permissions must map");
        assert_eq!(ftype3_to_mode(ftype), mode);
    }
}

#[test]
fn ftype_tags_match_the_protocol() {
    assert_eq!(nfs3::ftype3::NF3REG as u32, 1);
    assert_eq!(nfs3::ftype3::NF3DIR as u32, 2);
    assert_eq!(nfs3::ftype3::NF3BLK as u32, 3);
    assert_eq!(nfs3::ftype3::NF3CHR as u32, 4);
    assert_eq!(nfs3::ftype3::NF3LNK as u32, 5);
    assert_eq!(nfs3::ftype3::NF3SOCK as u32, 6);
    assert_eq!(nfs3::ftype3::NF3FIFO as u32, 7);
}

#[test]
fn unrecognized_type_bits_are_rejected() {
    init_logging();
    assert_eq!(mode_to_ftype3(0), Err(nfs3::nfsstat3::NFS3ERR_BADTYPE));
    assert_eq!(mode_to_ftype3(0o644), Err(nfs3::nfsstat3::NFS3ERR_BADTYPE));
    assert_eq!(mode_to_ftype3(0o170000), Err(nfs3::nfsstat3::NFS3ERR_BADTYPE));
}

#[test]
fn each_permission_bit_maps_to_exactly_one_wire_bit() {
    let table: [(u32, nfs3::mode3); 11] = [
        (libc::S_IRUSR as u32, nfs3::MODE3_ROWNER),
        (libc::S_IWUSR as u32, nfs3::MODE3_WOWNER),
        (libc::S_IXUSR as u32, nfs3::MODE3_XOWNER),
        (libc::S_IRGRP as u32, nfs3::MODE3_RGROUP),
        (libc::S_IWGRP as u32, nfs3::MODE3_WGROUP),
        (libc::S_IXGRP as u32, nfs3::MODE3_XGROUP),
        (libc::S_IROTH as u32, nfs3::MODE3_ROTHER),
        (libc::S_IWOTH as u32, nfs3::MODE3_WOTHER),
        (libc::S_IXOTH as u32, nfs3::MODE3_XOTHER),
        (libc::S_ISUID as u32, nfs3::MODE3_SUID),
        (libc::S_ISGID as u32, nfs3::MODE3_SGID),
    ];
    let mut all_host = 0;
    let mut all_wire = 0;
    for (host_bit, wire_bit) in table {
        assert_eq!(mode_to_nfs_mode(host_bit), wire_bit);
        all_host |= host_bit;
        all_wire |= wire_bit;
    }
    // combinations are the OR of the individual mappings
    assert_eq!(mode_to_nfs_mode(all_host), all_wire);
    assert_eq!(
        mode_to_nfs_mode(libc::S_IRUSR as u32 | libc::S_IXOTH as u32 | libc::S_ISUID as u32),
        nfs3::MODE3_ROWNER | nfs3::MODE3_XOTHER | nfs3::MODE3_SUID
    );
}

#[test]
fn unrelated_mode_bits_do_not_leak_into_wire_mode() {
    assert_eq!(mode_to_nfs_mode(0), 0);
    assert_eq!(mode_to_nfs_mode(libc::S_IFREG as u32), 0);
    assert_eq!(mode_to_nfs_mode(libc::S_IFDIR as u32), 0);
    assert_eq!(mode_to_nfs_mode(libc::S_ISVTX as u32), 0);
    assert_eq!(
        mode_to_nfs_mode(libc::S_IFLNK as u32 | 0o755),
        mode_to_nfs_mode(0o755)
    );
}

#[test]
fn in_range_timestamps_round_trip() {
    for spec in [
        TimeSpec { seconds: 0, nanos: 0 },
        TimeSpec { seconds: 1, nanos: 999_999_999 },
        TimeSpec { seconds: 1_700_000_000, nanos: 123_456_789 },
        TimeSpec { seconds: u32::MAX as i64, nanos: 0 },
    ] {
        assert_eq!(nfstime_to_timespec(timespec_to_nfstime(spec)), spec);
    }
}

#[test]
fn nfstime_bridges_to_filetime() {
    let time = nfs3::nfstime3 { seconds: 1_700_000_000, nseconds: 42 };
    let ft = filetime::FileTime::from(time);
    assert_eq!(ft.unix_seconds(), 1_700_000_000);
    assert_eq!(ft.nanoseconds(), 42);
    assert_eq!(TimeSpec::from(ft), TimeSpec { seconds: 1_700_000_000, nanos: 42 });
}

#[test]
fn full_attributes_are_assembled_field_by_field() {
    init_logging();
    let stat = sample_stat(libc::S_IFREG as u32 | 0o644);
    let attr = stat_to_fattr3(&stat).expect("regular file must convert");

    assert_eq!(attr.ftype, nfs3::ftype3::NF3REG);
    assert_eq!(
        attr.mode,
        nfs3::MODE3_ROWNER | nfs3::MODE3_WOWNER | nfs3::MODE3_RGROUP | nfs3::MODE3_ROTHER
    );
    assert_eq!(attr.nlink, 2);
    assert_eq!(attr.uid, 501);
    assert_eq!(attr.gid, 20);
    assert_eq!(attr.size, 4096);
    assert_eq!(attr.used, 9 * BLOCK_SIZE);
    assert_eq!(attr.fsid, 0x803);
    assert_eq!(attr.fileid, 1234567);
    assert_eq!(attr.atime, nfs3::nfstime3 { seconds: 1_700_000_000, nseconds: 111_111_111 });
    assert_eq!(attr.mtime, nfs3::nfstime3 { seconds: 1_700_000_100, nseconds: 222_222_222 });
    assert_eq!(attr.ctime, nfs3::nfstime3 { seconds: 1_700_000_200, nseconds: 333_333_333 });
}

#[test]
fn rdev_is_always_the_zero_placeholder() {
    for mode in [
        libc::S_IFREG as u32 | 0o644,
        libc::S_IFBLK as u32 | 0o600,
        libc::S_IFCHR as u32 | 0o666,
    ] {
        let attr = stat_to_fattr3(&sample_stat(mode)).expect("must convert");
        assert_eq!(attr.rdev, nfs3::specdata3::default());
    }
}

#[test]
fn space_used_is_blocks_times_512() {
    let mut stat = sample_stat(libc::S_IFREG as u32 | 0o644);
    stat.blocks = 0;
    assert_eq!(stat_to_fattr3(&stat).unwrap().used, 0);
    stat.blocks = 1000;
    assert_eq!(stat_to_fattr3(&stat).unwrap().used, 512_000);
    stat.blocks = u64::MAX;
    assert_eq!(stat_to_fattr3(&stat).unwrap().used, u64::MAX);
}

#[test]
fn oversized_link_count_saturates() {
    init_logging();
    let mut stat = sample_stat(libc::S_IFDIR as u32 | 0o755);
    stat.nlink = u64::MAX;
    assert_eq!(stat_to_fattr3(&stat).unwrap().nlink, u32::MAX);
}

#[test]
fn wcc_data_tracks_presence_of_each_side() {
    init_logging();
    let pre = sample_stat(libc::S_IFREG as u32 | 0o644);
    let post = {
        let mut stat = pre;
        stat.size = 8192;
        stat.mtime.seconds += 5;
        stat
    };

    let wcc = stat_to_wcc_data(None, None);
    assert_eq!(wcc.before, nfs3::pre_op_attr::Void);
    assert_eq!(wcc.after, nfs3::post_op_attr::Void);

    let wcc = stat_to_wcc_data(Some(&pre), None);
    let nfs3::pre_op_attr::attributes(before) = wcc.before else {
        panic!("before side must be present");
    };
    assert_eq!(before.size, pre.size);
    assert_eq!(before.mtime, timespec_to_nfstime(pre.mtime));
    assert_eq!(before.ctime, timespec_to_nfstime(pre.ctime));
    assert_eq!(wcc.after, nfs3::post_op_attr::Void);

    let wcc = stat_to_wcc_data(Some(&pre), Some(&post));
    assert_eq!(wcc.before, stat_to_pre_op_attr(&pre));
    assert_eq!(
        wcc.after,
        nfs3::post_op_attr::attributes(stat_to_fattr3(&post).unwrap())
    );
}

#[test]
fn post_op_attr_is_absent_on_any_failure() {
    init_logging();
    assert_eq!(
        stat_to_post_op_attr(Err::<FileStat, _>(nfs3::nfsstat3::NFS3ERR_IO)),
        nfs3::post_op_attr::Void
    );
    assert_eq!(
        stat_to_post_op_attr(Err::<FileStat, _>(nfs3::nfsstat3::NFS3ERR_STALE)),
        nfs3::post_op_attr::Void
    );
    assert_eq!(
        stat_to_post_op_attr(Err::<FileStat, _>("stat raced with unlink")),
        nfs3::post_op_attr::Void
    );

    let stat = sample_stat(libc::S_IFREG as u32 | 0o644);
    assert_eq!(
        stat_to_post_op_attr(Ok::<_, nfs3::nfsstat3>(stat)),
        nfs3::post_op_attr::attributes(stat_to_fattr3(&stat).unwrap())
    );
}

#[test]
fn post_op_attr_degrades_on_malformed_mode() {
    init_logging();
    // present stat whose type bits are garbage still must not fail the reply
    let stat = sample_stat(0o644);
    assert_eq!(
        stat_to_post_op_attr(Ok::<_, nfs3::nfsstat3>(stat)),
        nfs3::post_op_attr::Void
    );
    let wcc = stat_to_wcc_data(None, Some(&stat));
    assert_eq!(wcc.after, nfs3::post_op_attr::Void);
}

#[test]
fn fattr3_differ_spots_significant_changes() {
    let base = stat_to_fattr3(&sample_stat(libc::S_IFREG as u32 | 0o644)).unwrap();
    assert!(!fattr3_differ(&base, &base));

    let mut grown = base;
    grown.size += 1;
    assert!(fattr3_differ(&base, &grown));

    let mut touched = base;
    touched.mtime.nseconds += 1;
    assert!(fattr3_differ(&base, &touched));

    // atime-only changes are not significant for cache invalidation
    let mut accessed = base;
    accessed.atime.seconds += 60;
    assert!(!fattr3_differ(&base, &accessed));
}

#[cfg(unix)]
#[test]
fn file_stat_converts_from_real_metadata() {
    init_logging();
    let meta = std::fs::metadata("Cargo.toml").expect("manifest must exist");
    let stat = FileStat::from(&meta);
    let attr = stat_to_fattr3(&stat).expect("a real file must convert");
    assert_eq!(attr.ftype, nfs3::ftype3::NF3REG);
    assert!(attr.size > 0);
    assert!(attr.nlink >= 1);
}
