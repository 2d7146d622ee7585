use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30000, 1001).unwrap().to_ffmpeg_arg(), "30000/1001");
}

#[test]
fn fps_duration_helpers() {
    let fps = Fps::new(5, 1).unwrap();
    assert_eq!(fps.as_f64(), 5.0);
    assert_eq!(fps.frames_to_secs(10), 2.0);
}

#[test]
fn frame_index_orders_numerically() {
    let mut v = vec![FrameIndex(10), FrameIndex(2), FrameIndex(1)];
    v.sort();
    assert_eq!(v, vec![FrameIndex(1), FrameIndex(2), FrameIndex(10)]);
    assert_eq!(FrameIndex(7).to_string(), "7");
}
