use super::*;

#[test]
fn demultiply_handles_edges() {
    let mut px = vec![0u8, 0, 0, 0, 10, 20, 30, 255, 50, 25, 0, 128];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[0, 0, 0, 0]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..12], &[100, 50, 0, 128]);
}
