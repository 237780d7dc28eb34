//! Per-pixel color kernels for 8-bit samples
//!
//! Gray uses the BT.601 weights in 14-bit fixed point. HSV hue is stored
//! halved so that it fits a byte: H in [0, 180), S and V in [0, 255].

const GRAY_SHIFT: u32 = 14;
const R2Y: u32 = 4899; // 0.299
const G2Y: u32 = 9617; // 0.587
const B2Y: u32 = 1868; // 0.114

/// Luma of a BGR pixel
#[inline]
pub fn bgr_to_gray(b: u8, g: u8, r: u8) -> u8 {
    let y = b as u32 * B2Y + g as u32 * G2Y + r as u32 * R2Y + (1 << (GRAY_SHIFT - 1));
    (y >> GRAY_SHIFT) as u8
}

/// BGR to (H/2, S, V)
#[inline]
pub fn bgr_to_hsv(b: u8, g: u8, r: u8) -> [u8; 3] {
    let (b, g, r) = (b as i32, g as i32, r as i32);
    let v = b.max(g).max(r);
    let vmin = b.min(g).min(r);
    let diff = v - vmin;

    let s = if v == 0 {
        0
    } else {
        ((255 * diff) as f32 / v as f32).round() as i32
    };

    let h = if diff == 0 {
        0
    } else {
        let sector = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let h = ((sector * 180) as f32 / (6 * diff) as f32 + 0.5).floor() as i32;
        if h < 0 {
            h + 180
        } else {
            h
        }
    };

    [h as u8, s as u8, v as u8]
}

/// (H/2, S, V) to BGR
#[inline]
pub fn hsv_to_bgr(h: u8, s: u8, v: u8) -> [u8; 3] {
    let s = s as f32 / 255.0;
    let v = v as f32 / 255.0;

    let (b, g, r) = if s == 0.0 {
        (v, v, v)
    } else {
        let mut h = (h as f32 * 2.0) / 60.0;
        while h >= 6.0 {
            h -= 6.0;
        }
        let sector = h.floor();
        let frac = h - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * frac);
        let t = v * (1.0 - s * (1.0 - frac));

        match sector as u8 {
            0 => (p, t, v),
            1 => (p, v, q),
            2 => (t, v, p),
            3 => (v, q, p),
            4 => (v, p, t),
            _ => (q, p, v),
        }
    };

    [to_byte(b), to_byte(g), to_byte(r)]
}

#[inline]
fn to_byte(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}
