/// Painting primitives on RGBA bitmaps
///
/// Every primitive clips to the image bounds. Outlines are rasterised into a
/// coverage mask first and blended once per pixel, so overlapping pen stamps
/// never darken a semi-transparent stroke twice.

use image::{Rgba, RgbaImage};

/// Source-over blend of `color` onto one pixel, with an extra opacity factor.
pub fn blend_pixel(dst: &mut Rgba<u8>, color: Rgba<u8>, opacity: f32) {
    let a = (color[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = a + dst_a * (1.0 - a);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for c in 0..3 {
        let src = color[c] as f32;
        let under = dst[c] as f32;
        let v = (src * a + under * dst_a * (1.0 - a)) / out_a;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Fill an axis-aligned rectangle (x, y, w, h) with a blended color.
pub fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, color: Rgba<u8>, opacity: f32) {
    let (iw, ih) = (img.width() as i32, img.height() as i32);
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(w).min(iw);
    let y1 = y.saturating_add(h).min(ih);
    for py in y0..y1 {
        for px in x0..x1 {
            blend_pixel(img.get_pixel_mut(px as u32, py as u32), color, opacity);
        }
    }
}

/// Stroke a line with round caps and joins, fully opaque in `color`.
pub fn stroke_line(img: &mut RgbaImage, from: (i32, i32), to: (i32, i32), color: Rgba<u8>, width: u32) {
    let min = (from.0.min(to.0), from.1.min(to.1));
    let max = (from.0.max(to.0), from.1.max(to.1));
    let mut mask = Coverage::spanning(img, min, max, width);
    mask.line(from, to, width);
    mask.blend_into(img, color, 1.0);
}

/// Outline of the rectangle spanning (x, y) to (x + w, y + h).
pub fn stroke_rect(
    img: &mut RgbaImage,
    x: i32, y: i32,
    w: i32, h: i32,
    color: Rgba<u8>,
    width: u32,
    opacity: f32,
) {
    let mut mask = Coverage::spanning(img, (x.min(x + w), y.min(y + h)), (x.max(x + w), y.max(y + h)), width);
    let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h)];
    for i in 0..corners.len() {
        mask.line(corners[i], corners[(i + 1) % corners.len()], width);
    }
    mask.blend_into(img, color, opacity);
}

/// Outline of the ellipse inscribed in the box (x, y, w, h).
pub fn stroke_ellipse(
    img: &mut RgbaImage,
    x: i32, y: i32,
    w: i32, h: i32,
    color: Rgba<u8>,
    width: u32,
    opacity: f32,
) {
    let rx = w as f64 / 2.0;
    let ry = h as f64 / 2.0;
    let cx = x as f64 + rx;
    let cy = y as f64 + ry;

    // Ramanujan's perimeter estimate, sampled at ~2 points per pixel
    let perimeter = std::f64::consts::PI
        * (3.0 * (rx + ry) - ((3.0 * rx + ry) * (rx + 3.0 * ry)).max(0.0).sqrt());
    let steps = ((perimeter * 2.0).ceil() as usize).max(8);

    let mut mask = Coverage::spanning(img, (x.min(x + w), y.min(y + h)), (x.max(x + w), y.max(y + h)), width);
    let point = |k: usize| {
        let t = k as f64 / steps as f64 * std::f64::consts::TAU;
        ((cx + rx * t.cos()).round() as i32, (cy + ry * t.sin()).round() as i32)
    };
    let mut prev = point(0);
    for k in 1..=steps {
        let next = point(k);
        mask.line(prev, next, width);
        prev = next;
    }
    mask.blend_into(img, color, opacity);
}

/// Draw text with the built-in 3×5 bitmap font; glyph bottoms sit on `baseline_y`.
pub fn draw_text(img: &mut RgbaImage, text: &str, x: i32, baseline_y: i32, color: Rgba<u8>, scale: u32) {
    let scale = scale.max(1) as i32;
    let top = baseline_y - 5 * scale;
    let mut cx = x;
    for ch in text.chars() {
        let g = glyph(ch);
        for (row, &bits) in g.iter().enumerate() {
            for col in 0..3i32 {
                if (bits >> (2 - col)) & 1 == 1 {
                    fill_rect(
                        img,
                        cx + col * scale,
                        top + row as i32 * scale,
                        scale,
                        scale,
                        color,
                        1.0,
                    );
                }
            }
        }
        cx += 4 * scale;
    }
}

fn glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        'A' | 'a' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' | 'b' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' | 'c' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' | 'd' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' | 'e' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' | 'f' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' | 'g' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' | 'h' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' | 'i' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' | 'j' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' | 'k' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' | 'l' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' | 'm' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' | 'n' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' | 'o' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' | 'p' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' | 'q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' | 'r' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' | 's' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' | 't' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' | 'u' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' | 'v' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' | 'w' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' | 'x' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' | 'y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' | 'z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}

/// Set of pixels touched by a pen, blended in a single pass.
///
/// Only the region the pen can reach is allocated, clipped to the image.
struct Coverage {
    /// Top-left image pixel of the region
    x0: i32,
    y0: i32,
    width: u32,
    height: u32,
    hits: Vec<bool>,
}

impl Coverage {
    /// Mask over the box `min..=max` grown by the pen radius, clipped to `img`.
    fn spanning(img: &RgbaImage, min: (i32, i32), max: (i32, i32), diameter: u32) -> Self {
        let reach = (diameter.max(1) as f32 / 2.0).ceil() as i32;
        let x0 = min.0.saturating_sub(reach).max(0);
        let y0 = min.1.saturating_sub(reach).max(0);
        let x1 = max.0.saturating_add(reach).min(img.width() as i32 - 1);
        let y1 = max.1.saturating_add(reach).min(img.height() as i32 - 1);
        let width = if x1 >= x0 { (x1 - x0 + 1) as u32 } else { 0 };
        let height = if y1 >= y0 { (y1 - y0 + 1) as u32 } else { 0 };
        Self {
            x0,
            y0,
            width,
            height,
            hits: vec![false; width as usize * height as usize],
        }
    }

    fn mark(&mut self, x: i32, y: i32) {
        let (lx, ly) = (x - self.x0, y - self.y0);
        if lx >= 0 && ly >= 0 && (lx as u32) < self.width && (ly as u32) < self.height {
            self.hits[ly as usize * self.width as usize + lx as usize] = true;
        }
    }

    /// Round pen tip of the given diameter centred on (cx, cy)
    fn stamp(&mut self, cx: i32, cy: i32, diameter: u32) {
        let r = diameter.max(1) as f32 / 2.0;
        let reach = r.ceil() as i32;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if (dx * dx + dy * dy) as f32 <= r * r {
                    self.mark(cx + dx, cy + dy);
                }
            }
        }
    }

    /// Bresenham walk stamping the pen at every step
    fn line(&mut self, from: (i32, i32), to: (i32, i32), diameter: u32) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: i32 = if x0 < x1 { 1 } else { -1 };
        let sy: i32 = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut cx = x0;
        let mut cy = y0;
        loop {
            self.stamp(cx, cy, diameter);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    fn blend_into(&self, img: &mut RgbaImage, color: Rgba<u8>, opacity: f32) {
        for (i, _) in self.hits.iter().enumerate().filter(|(_, &hit)| hit) {
            let x = self.x0 as u32 + (i % self.width as usize) as u32;
            let y = self.y0 as u32 + (i / self.width as usize) as u32;
            blend_pixel(img.get_pixel_mut(x, y), color, opacity);
        }
    }
}
