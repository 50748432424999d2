// veridion-core/src/surface.rs
//! The rendering seam.
//!
//! Image decoding and drawing belong to the caller. The engine only hands over
//! rectangles; anything that can fill a rectangle with a flat colour can act
//! as a [`RedactionSurface`]. [`PixelBuffer`] is a minimal in-memory surface.

use log::debug;

use crate::audit_log::RedactionPlan;
use crate::token::Rect;

/// A raster that can have solid rectangles painted onto it.
pub trait RedactionSurface {
    /// Paints `rect` opaquely. Must be idempotent.
    fn fill_rect(&mut self, rect: Rect);
}

/// Paints every rectangle of `plan`, verbatim and in plan order.
pub fn paint_plan<S: RedactionSurface + ?Sized>(plan: &RedactionPlan, surface: &mut S) {
    for rect in plan.rects() {
        surface.fill_rect(rect);
    }
    debug!("Painted {} redaction rectangle(s).", plan.len());
}

/// Single-channel 8-bit raster. Redacted pixels are set to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// A `width` x `height` buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: u8) -> Self {
        let len = width as usize * height as usize;
        Self { width, height, pixels: vec![background; len] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl RedactionSurface for PixelBuffer {
    fn fill_rect(&mut self, rect: Rect) {
        // Clip to the buffer; OCR boxes may extend past the page edge.
        let x_end = rect.right().min(u64::from(self.width)) as usize;
        let y_end = rect.bottom().min(u64::from(self.height)) as usize;
        let width = self.width as usize;
        for y in (rect.y as usize)..y_end {
            let row = y * width;
            for x in (rect.x as usize)..x_end {
                self.pixels[row + x] = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit_log::{AuditAction, AuditEntry};

    fn plan_of(rects: &[Rect]) -> RedactionPlan {
        RedactionPlan {
            entries: rects
                .iter()
                .enumerate()
                .map(|(i, r)| AuditEntry {
                    text: format!("t{}", i),
                    action: AuditAction::Redacted,
                    coordinates: *r,
                    rule_name: "TEST".into(),
                    first_ordinal: i,
                })
                .collect(),
        }
    }

    #[test]
    fn test_painting_twice_is_idempotent() {
        let rect = Rect::new(2, 1, 3, 2);
        let mut once = PixelBuffer::new(8, 4, 255);
        once.fill_rect(rect);
        let mut twice = PixelBuffer::new(8, 4, 255);
        paint_plan(&plan_of(&[rect, rect]), &mut twice);
        assert_eq!(once, twice);
        assert_eq!(once.pixel(2, 1), Some(0));
        assert_eq!(once.pixel(4, 2), Some(0));
        assert_eq!(once.pixel(5, 2), Some(255));
        assert_eq!(once.pixel(1, 1), Some(255));
    }

    #[test]
    fn test_fill_clips_to_bounds() {
        let mut buf = PixelBuffer::new(4, 4, 255);
        buf.fill_rect(Rect::new(2, 2, 100, 100));
        buf.fill_rect(Rect::new(10, 10, 5, 5));
        assert_eq!(buf.as_bytes().iter().filter(|&&p| p == 0).count(), 4);
        assert_eq!(buf.pixel(4, 4), None);
    }
}
