use crate::surface::PixelPos;

/// Pointer state between a press and the matching release
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrokeState {
    // Only `Some` while the primary button is held on the canvas
    last: Option<PixelPos>,
}

impl StrokeState {
    pub fn begin(&mut self, pos: PixelPos) {
        self.last = Some(pos);
    }

    /// Advance to `pos`, returning the segment to draw if a stroke is in progress
    pub fn advance(&mut self, pos: PixelPos) -> Option<(PixelPos, PixelPos)> {
        let from = self.last?;
        self.last = Some(pos);
        Some((from, pos))
    }

    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    pub fn last_position(&self) -> Option<PixelPos> {
        self.last
    }
}
