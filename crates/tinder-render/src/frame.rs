//! Display list for one rendered frame

use tinder_core::{Color, Rect, Vec2, Viewport};

/// Back-to-front drawing layers. Commands are always emitted in layer order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Ground,
    Collectibles,
    Enemies,
    Player,
}

/// A primitive in logical (viewport) units
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    /// Vertical gradient filling `rect`, `top` at its top edge
    Gradient { rect: Rect, top: Color, bottom: Color },
    FillRect { rect: Rect, color: Color },
    /// Simple polygon, filled with the even-odd rule
    FillPolygon { points: Vec<Vec2>, color: Color },
    FillEllipse { center: Vec2, radii: Vec2, color: Color },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    pub layer: Layer,
    pub command: DrawCommand,
}

/// Ordered draw commands for a viewport-sized canvas
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    items: Vec<DrawItem>,
}

impl Frame {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Commands on one layer, in draw order
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.items
            .iter()
            .filter(move |item| item.layer == layer)
            .map(|item| &item.command)
    }

    pub fn push(&mut self, layer: Layer, command: DrawCommand) {
        debug_assert!(
            self.items.last().map_or(true, |last| last.layer <= layer),
            "draw layers must be emitted back to front"
        );
        self.items.push(DrawItem { layer, command });
    }

    pub fn fill_rect(&mut self, layer: Layer, rect: Rect, color: Color) {
        self.push(layer, DrawCommand::FillRect { rect, color });
    }

    pub fn fill_ellipse(&mut self, layer: Layer, center: Vec2, radii: Vec2, color: Color) {
        self.push(
            layer,
            DrawCommand::FillEllipse {
                center,
                radii,
                color,
            },
        );
    }

    pub fn fill_polygon(&mut self, layer: Layer, points: Vec<Vec2>, color: Color) {
        if points.len() >= 3 {
            self.push(layer, DrawCommand::FillPolygon { points, color });
        }
    }
}
