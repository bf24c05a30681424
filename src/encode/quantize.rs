use std::collections::HashMap;

use crate::foundation::error::{SvgshotError, SvgshotResult};
use crate::render::backend::FrameRGBA;

/// Most colors an indexed frame can reference.
pub const MAX_PALETTE: usize = 256;

/// Pixels with alpha below this are written as the transparent index.
const ALPHA_CUTOFF: u8 = 128;

/// NeuQuant sampling factor: 1 is best quality, 30 fastest.
const NEUQUANT_SAMPLE_FAC: i32 = 10;

/// A frame reduced to a palette and one palette index per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    /// Packed RGB triples, at most [`MAX_PALETTE`] entries.
    pub palette: Vec<u8>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
    /// Palette index standing for "no pixel", if the frame has any.
    pub transparent: Option<u8>,
}

impl IndexedFrame {
    /// Number of palette entries.
    pub fn palette_len(&self) -> usize {
        self.palette.len() / 3
    }
}

/// Reduce `frame` to at most 256 colors.
///
/// Frames with few distinct colors keep them exactly; others go through NeuQuant. Alpha is
/// collapsed to on/off at [`ALPHA_CUTOFF`] since GIF has a single transparent index.
pub fn quantize_frame(frame: &FrameRGBA) -> SvgshotResult<IndexedFrame> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected || expected == 0 {
        return Err(SvgshotError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }

    let mut rgba = frame.clone().into_straight_alpha().data;
    let mut has_transparent = false;
    for px in rgba.chunks_exact_mut(4) {
        if px[3] < ALPHA_CUTOFF {
            px.copy_from_slice(&[0, 0, 0, 0]);
            has_transparent = true;
        } else {
            px[3] = 255;
        }
    }

    let (palette, indices, transparent) = match exact_palette(&rgba) {
        Some(exact) => exact,
        None => neuquant_palette(&rgba, has_transparent),
    };

    Ok(IndexedFrame {
        width: frame.width,
        height: frame.height,
        palette,
        indices,
        transparent,
    })
}

type Quantized = (Vec<u8>, Vec<u8>, Option<u8>);

fn exact_palette(rgba: &[u8]) -> Option<Quantized> {
    let mut lookup: HashMap<[u8; 4], u8> = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity(rgba.len() / 4);
    let mut transparent = None;

    for px in rgba.chunks_exact(4) {
        let key = [px[0], px[1], px[2], px[3]];
        let idx = match lookup.get(&key) {
            Some(&idx) => idx,
            None => {
                if lookup.len() == MAX_PALETTE {
                    return None;
                }
                let idx = lookup.len() as u8;
                lookup.insert(key, idx);
                palette.extend_from_slice(&key[..3]);
                if key[3] == 0 {
                    transparent = Some(idx);
                }
                idx
            }
        };
        indices.push(idx);
    }
    Some((palette, indices, transparent))
}

// Trained on opaque pixels only. With transparency the last palette slot is reserved for it.
fn neuquant_palette(rgba: &[u8], has_transparent: bool) -> Quantized {
    let colors = if has_transparent {
        MAX_PALETTE - 1
    } else {
        MAX_PALETTE
    };
    let opaque: Vec<u8> = rgba
        .chunks_exact(4)
        .filter(|px| px[3] != 0)
        .flatten()
        .copied()
        .collect();
    let nq = color_quant::NeuQuant::new(NEUQUANT_SAMPLE_FAC, colors, &opaque);

    let mut palette = nq.color_map_rgb();
    let transparent = has_transparent.then(|| {
        let idx = (palette.len() / 3) as u8;
        palette.extend_from_slice(&[0, 0, 0]);
        idx
    });
    let indices = rgba
        .chunks_exact(4)
        .map(|px| match transparent {
            Some(t) if px[3] == 0 => t,
            _ => nq.index_of(px) as u8,
        })
        .collect();
    (palette, indices, transparent)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/quantize.rs"]
mod tests;
