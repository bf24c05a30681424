use crate::foundation::core::{Rect, Size};

/// Aspect-preserving fill placement of a `natural`-sized image on a `dest`-sized surface.
///
/// The result covers `dest` completely; overflow on one axis is centered and cropped by the
/// surface bounds. Without a usable natural size the image is stretched over the whole surface.
pub fn aspect_fill(natural: Option<Size>, dest: Size) -> Rect {
    let full = Rect::new(0.0, 0.0, dest.width, dest.height);
    let Some(natural) = natural.filter(|n| usable(n.width) && usable(n.height)) else {
        return full;
    };
    if !usable(dest.width) || !usable(dest.height) {
        return full;
    }

    let src_aspect = natural.width / natural.height;
    let dest_aspect = dest.width / dest.height;

    if src_aspect > dest_aspect {
        let dh = dest.height;
        let dw = dh * src_aspect;
        let dx = (dest.width - dw) / 2.0;
        Rect::new(dx, 0.0, dx + dw, dh)
    } else {
        let dw = dest.width;
        let dh = dw / src_aspect;
        let dy = (dest.height - dh) / 2.0;
        Rect::new(0.0, dy, dw, dy + dh)
    }
}

fn usable(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/render/placement.rs"]
mod tests;
