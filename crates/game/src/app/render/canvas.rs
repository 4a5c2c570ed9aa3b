use super::font::{glyph_for, glyph_advance, GLYPH_WIDTH, SPACE_GLYPH};

pub(crate) type Rgba = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScreenRect {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl ScreenRect {
    pub(crate) const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn intersect(self, other: ScreenRect) -> ScreenRect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        ScreenRect::new(left, top, (right - left).max(0), (bottom - top).max(0))
    }
}

/// RGBA8 frame view with a clip rectangle. Every write is bounds-checked and
/// alpha-blended over what is already there.
pub(crate) struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    clip: ScreenRect,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
            clip: ScreenRect::new(0, 0, width as i32, height as i32),
        }
    }

    pub(crate) fn width(&self) -> i32 {
        self.width as i32
    }

    pub(crate) fn height(&self) -> i32 {
        self.height as i32
    }

    /// Restricts drawing to `rect` until `reset_clip`.
    pub(crate) fn set_clip(&mut self, rect: ScreenRect) {
        self.clip = ScreenRect::new(0, 0, self.width(), self.height()).intersect(rect);
    }

    pub(crate) fn reset_clip(&mut self) {
        self.clip = ScreenRect::new(0, 0, self.width(), self.height());
    }

    pub(crate) fn clear(&mut self, color: Rgba) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub(crate) fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let clip = self.clip;
        if x < clip.x || y < clip.y || x >= clip.x + clip.width || y >= clip.y + clip.height {
            return;
        }
        let Some(pixel_offset) = (y as usize)
            .checked_mul(self.width as usize)
            .and_then(|row| row.checked_add(x as usize))
        else {
            return;
        };
        let Some(byte_offset) = pixel_offset.checked_mul(4) else {
            return;
        };
        let Some(pixel) = self.frame.get_mut(byte_offset..byte_offset + 4) else {
            return;
        };

        let alpha = u16::from(color[3]);
        if alpha == 255 {
            pixel.copy_from_slice(&color);
            return;
        }
        let inverse = 255 - alpha;
        for channel in 0..3 {
            let blended = (u16::from(color[channel]) * alpha + u16::from(pixel[channel]) * inverse) / 255;
            pixel[channel] = blended as u8;
        }
        pixel[3] = 255;
    }

    pub(crate) fn fill_rect(&mut self, rect: ScreenRect, color: Rgba) {
        let area = self.clip.intersect(rect);
        for py in area.y..area.y + area.height {
            for px in area.x..area.x + area.width {
                self.blend_pixel(px, py, color);
            }
        }
    }

    pub(crate) fn rect_outline(&mut self, rect: ScreenRect, color: Rgba) {
        if rect.width <= 1 || rect.height <= 1 {
            return;
        }
        let ScreenRect {
            x,
            y,
            width,
            height,
        } = rect;
        self.fill_rect(ScreenRect::new(x, y, width, 1), color);
        self.fill_rect(ScreenRect::new(x, y + height - 1, width, 1), color);
        self.fill_rect(ScreenRect::new(x, y + 1, 1, height - 2), color);
        self.fill_rect(ScreenRect::new(x + width - 1, y + 1, 1, height - 2), color);
    }

    pub(crate) fn fill_circle(&mut self, center_x: f32, center_y: f32, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let radius_sq = radius * radius;
        let top = (center_y - radius).floor() as i32;
        let bottom = (center_y + radius).ceil() as i32;
        let left = (center_x - radius).floor() as i32;
        let right = (center_x + radius).ceil() as i32;
        for py in top..=bottom {
            for px in left..=right {
                let dx = px as f32 + 0.5 - center_x;
                let dy = py as f32 + 0.5 - center_y;
                if dx * dx + dy * dy < radius_sq {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`. Characters without
    /// a glyph draw as blanks.
    pub(crate) fn draw_text(&mut self, mut x: i32, y: i32, text: &str, scale: i32, color: Rgba) {
        if scale <= 0 {
            return;
        }
        for ch in text.chars() {
            let glyph = glyph_for(ch).unwrap_or(SPACE_GLYPH);
            for (row_index, row_bits) in glyph.rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                        continue;
                    }
                    self.fill_rect(
                        ScreenRect::new(
                            x + col * scale,
                            y + row_index as i32 * scale,
                            scale,
                            scale,
                        ),
                        color,
                    );
                }
            }
            x += glyph_advance(scale);
        }
    }
}
