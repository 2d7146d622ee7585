use super::*;

fn names(frames: &[OrderedFrame]) -> Vec<String> {
    frames
        .iter()
        .map(|f| f.path.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn orders_numerically_not_lexically() {
    let frames = order_frames(["frame_10.png", "frame_2.png", "frame_1.png"]).unwrap();
    assert_eq!(
        names(&frames),
        vec!["frame_1.png", "frame_2.png", "frame_10.png"]
    );
    assert_eq!(frames[2].index, FrameIndex(10));
}

#[test]
fn file_names_round_trip_through_the_parser() {
    let name = frame_file_name("frame", FrameIndex(42));
    assert_eq!(name, "frame_42.png");
    assert_eq!(parse_frame_index(&name).unwrap(), FrameIndex(42));
    assert_eq!(
        parse_frame_index("my_video_out_7.png").unwrap(),
        FrameIndex(7)
    );
    assert_eq!(
        parse_frame_index("dir/frame_3.png").unwrap(),
        FrameIndex(3)
    );
}

#[test]
fn malformed_names_are_reported() {
    for bad in ["frame.png", "frame_.png", "frame_x1.png", "frame_-1.png", "_"] {
        let err = parse_frame_index(bad).unwrap_err();
        assert!(
            matches!(err, ReelError::MalformedFrameName(_)),
            "{bad}: {err}"
        );
    }
}

#[test]
fn duplicate_indices_are_rejected() {
    let err = order_frames(["a_1.png", "b_01.png"]).unwrap_err();
    assert!(matches!(err, ReelError::MalformedFrameName(_)));
}

#[test]
fn gaps_are_accepted() {
    let frames = order_frames(["frame_5.png", "frame_1.png"]).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].index, FrameIndex(1));
}

#[test]
fn stale_frame_removal_only_touches_own_frames() {
    let dir = std::path::PathBuf::from("target/unit_naming/stale");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    for name in ["frame_0.png", "frame_7.png", "other_1.png", "frame_x.png", "notes.txt"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    assert_eq!(remove_stale_frames(&dir, "frame").unwrap(), 2);
    assert!(!dir.join("frame_0.png").exists());
    assert!(!dir.join("frame_7.png").exists());
    assert!(dir.join("other_1.png").exists());
    assert!(dir.join("frame_x.png").exists());
    assert!(dir.join("notes.txt").exists());
}

#[test]
fn stale_frame_removal_tolerates_missing_dir() {
    assert_eq!(
        remove_stale_frames(Path::new("target/unit_naming/absent"), "frame").unwrap(),
        0
    );
}
