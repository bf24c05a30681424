use super::*;

/// Paints its whole placement with one color.
struct Solid([u8; 4]);

impl RenderSource for Solid {
    fn natural_size(&self) -> Option<Size> {
        Some(Size::new(10.0, 10.0))
    }

    fn draw(
        &self,
        target: &mut tiny_skia::PixmapMut<'_>,
        placement: Rect,
        _at: Duration,
    ) -> SvgshotResult<()> {
        let rect = tiny_skia::Rect::from_ltrb(
            placement.x0 as f32,
            placement.y0 as f32,
            placement.x1 as f32,
            placement.y1 as f32,
        )
        .unwrap();
        let mut paint = tiny_skia::Paint::default();
        let [r, g, b, a] = self.0;
        paint.set_color_rgba8(r, g, b, a);
        target.fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
        Ok(())
    }
}

/// Draws nothing.
struct Blank;

impl RenderSource for Blank {
    fn natural_size(&self) -> Option<Size> {
        None
    }

    fn draw(
        &self,
        _target: &mut tiny_skia::PixmapMut<'_>,
        _placement: Rect,
        _at: Duration,
    ) -> SvgshotResult<()> {
        Ok(())
    }
}

fn opts(w: u32, h: u32, transparent: bool, circle: bool) -> SurfaceOpts {
    SurfaceOpts {
        width: w,
        height: h,
        transparent_background: transparent,
        circular_crop: circle,
    }
}

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn opaque_background_is_white() {
    let mut c = FrameComposer::new(opts(4, 4, false, false), None).unwrap();
    c.compose(&Blank, Duration::ZERO).unwrap();
    let frame = c.read_back();
    assert!(frame.premultiplied);
    assert!(frame.data.chunks_exact(4).all(|p| p == [255, 255, 255, 255]));
}

#[test]
fn transparent_background_stays_clear() {
    let mut c = FrameComposer::new(opts(4, 4, true, false), None).unwrap();
    c.compose(&Blank, Duration::ZERO).unwrap();
    assert!(c.read_back().data.iter().all(|&b| b == 0));
}

#[test]
fn each_compose_starts_from_a_clean_surface() {
    let mut c = FrameComposer::new(opts(4, 4, true, false), None).unwrap();
    c.compose(&Solid([255, 0, 0, 255]), Duration::ZERO).unwrap();
    assert_eq!(px(&c.read_back(), 2, 2), [255, 0, 0, 255]);
    c.compose(&Blank, Duration::ZERO).unwrap();
    assert_eq!(px(&c.read_back(), 2, 2), [0, 0, 0, 0]);
}

#[test]
fn circular_crop_keeps_background_in_corners() {
    let mut c = FrameComposer::new(opts(20, 20, false, true), None).unwrap();
    c.compose(&Solid([255, 0, 0, 255]), Duration::ZERO).unwrap();
    let frame = c.read_back();
    assert_eq!(px(&frame, 10, 10), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 0, 0), [255, 255, 255, 255]);
    assert_eq!(px(&frame, 19, 19), [255, 255, 255, 255]);
}

#[test]
fn circular_crop_on_transparent_leaves_corners_clear() {
    let mut c = FrameComposer::new(opts(20, 10, true, true), None).unwrap();
    c.compose(&Solid([0, 0, 255, 255]), Duration::ZERO).unwrap();
    let frame = c.read_back();
    assert_eq!(px(&frame, 10, 5), [0, 0, 255, 255]);
    // Radius is min(w, h) / 2, so the sides of a wide surface are outside the disc.
    assert_eq!(px(&frame, 1, 5), [0, 0, 0, 0]);
    assert_eq!(px(&frame, 18, 5), [0, 0, 0, 0]);
}

#[test]
fn placement_is_computed_from_natural_size() {
    let c = FrameComposer::new(opts(200, 100, false, false), Some(Size::new(100.0, 100.0)))
        .unwrap();
    let p = c.placement();
    assert_eq!((p.x0, p.y0, p.width(), p.height()), (0.0, -50.0, 200.0, 200.0));
}

#[test]
fn zero_sized_surface_is_rejected() {
    assert!(matches!(
        FrameComposer::new(opts(0, 10, false, false), None),
        Err(SvgshotError::Validation(_))
    ));
}
