//! View state for one rendered page image
//!
//! Tracks the original and currently scaled image sizes, the image
//! origin within the canvas, the accumulated pan offset and the absolute
//! table scale ratio. All of it is plain bookkeeping consumed by the
//! controller; nothing here touches table geometry directly.

use statement_tables_shared::{Point, Size, DEFAULT_ZOOM_STEP};

/// Mutable record of where and how large the page image currently is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageView {
    pub canvas_size: Size,
    pub original_size: Size,
    pub scaled_size: Size,
    /// Top-left corner of the image within the canvas
    pub origin: Point,
    /// Accumulated pan displacement applied by the hand tool
    pub offset: Point,
    /// Absolute scaled/original ratio most recently applied to the
    /// page's tables
    scale_ratio: f64,
}

impl PageView {
    pub fn new(canvas_size: Size, original_size: Size) -> Self {
        Self {
            canvas_size,
            original_size,
            scaled_size: original_size,
            origin: Point::new(0.0, 0.0),
            offset: Point::new(0.0, 0.0),
            scale_ratio: 1.0,
        }
    }

    /// Install a freshly rendered page image, resetting zoom and pan
    pub fn reset_image(&mut self, original_size: Size) {
        self.original_size = original_size;
        self.scaled_size = original_size;
        self.offset = Point::new(0.0, 0.0);
        self.scale_ratio = 1.0;
        self.recenter();
    }

    /// Recompute the image origin from the canvas size and pan offset.
    ///
    /// Returns the `(dx, dy)` displacement of the origin so the caller
    /// can shift table geometry by the same amount.
    pub fn recenter(&mut self) -> (f64, f64) {
        let x = (self.canvas_size.width - self.scaled_size.width) / 2.0 + self.offset.x;
        let y = (self.canvas_size.height - self.scaled_size.height) / 2.0 + self.offset.y;

        let dx = x - self.origin.x;
        let dy = y - self.origin.y;
        self.origin = Point::new(x, y);

        (dx, dy)
    }

    /// Apply one or more scroll-wheel notches to the scaled image size.
    /// Positive steps zoom in, negative zoom out; aspect ratio is
    /// preserved by construction.
    pub fn zoom(&mut self, steps: i32) {
        let factor = DEFAULT_ZOOM_STEP.powi(steps);
        self.scaled_size = self.scaled_size.scaled(factor);
    }

    /// Shift the pan offset and the image origin together
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset = self.offset.translated(dx, dy);
        self.origin = self.origin.translated(dx, dy);
    }

    /// Centre point of the image as currently displayed, used as the
    /// zoom pivot
    pub fn centre(&self) -> Point {
        Point::new(
            self.origin.x + self.scaled_size.width / 2.0,
            self.origin.y + self.scaled_size.height / 2.0,
        )
    }

    /// Absolute scaled/original size ratio, averaged over both axes
    pub fn absolute_ratio(&self) -> f64 {
        let ratio_x = self.scaled_size.width / self.original_size.width;
        let ratio_y = self.scaled_size.height / self.original_size.height;
        (ratio_x + ratio_y) / 2.0
    }

    /// Ratio of the current image scale to the scale last applied to the
    /// tables. Advances the stored absolute ratio, so successive zoom
    /// steps compose multiplicatively.
    pub fn advance_scale_ratio(&mut self) -> f64 {
        let absolute = self.absolute_ratio();
        let relative = absolute / self.scale_ratio;
        self.scale_ratio = absolute;
        relative
    }

    pub fn scale_ratio(&self) -> f64 {
        self.scale_ratio
    }

    pub fn set_canvas_size(&mut self, canvas_size: Size) {
        self.canvas_size = canvas_size;
    }
}
