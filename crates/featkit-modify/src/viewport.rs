//! Viewport and coordinate mapping for the editing surface.
//!
//! Handles conversion between pixel coordinates (screen space) and plane
//! coordinates (feature space). Manages zoom and pan with proper
//! coordinate mapping; the host updates it as its camera moves.

use std::fmt;

use featkit_core::{PixelPoint, Point};

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a new viewport with initial dimensions.
    /// Sets up the coordinate system with (0,0) at bottom-left with a
    /// small margin.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        const MARGIN: f64 = 5.0; // pixels from edge
        Self {
            zoom: 1.0,
            pan_x: MARGIN,
            pan_y: MARGIN,
            canvas_width,
            canvas_height,
        }
    }

    /// Gets the canvas width.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the host window
    /// resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, constrained between 0.1 and 50.0.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > 0.1 && zoom < 50.0 {
            self.zoom = zoom;
        }
    }

    /// Zooms in by multiplying current zoom by 1.2.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * 1.2);
    }

    /// Zooms out by dividing current zoom by 1.2.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / 1.2);
    }

    /// Gets the pan offset (X coordinate).
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y coordinate).
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta amount.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts pixel coordinates to plane coordinates.
    ///
    /// Pixel coordinates are in screen space (0,0 at top-left). Plane
    /// coordinates have (0,0) at bottom-left, so the Y axis flips.
    ///
    /// Formula:
    /// ```text
    /// plane_x = (pixel_x - pan_x) / zoom
    /// plane_y = (canvas_height - pixel_y - pan_y) / zoom
    /// ```
    pub fn pixel_to_plane(&self, pixel: &PixelPoint) -> Point {
        let plane_x = (pixel.x - self.pan_x) / self.zoom;
        let plane_y = (self.canvas_height - pixel.y - self.pan_y) / self.zoom;
        Point::new(plane_x, plane_y)
    }

    /// Converts plane coordinates to pixel coordinates.
    ///
    /// Formula:
    /// ```text
    /// pixel_x = plane_x * zoom + pan_x
    /// pixel_y = canvas_height - (plane_y * zoom + pan_y)
    /// ```
    pub fn plane_to_pixel(&self, point: &Point) -> PixelPoint {
        let pixel_x = point.x * self.zoom + self.pan_x;
        let pixel_y = self.canvas_height - (point.y * self.zoom + self.pan_y);
        PixelPoint::new(pixel_x, pixel_y)
    }

    /// Plane-space distance covered by `pixels` at the current zoom.
    pub fn plane_tolerance(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    /// Whether a pixel falls inside the canvas.
    pub fn contains_pixel(&self, pixel: &PixelPoint) -> bool {
        pixel.x >= 0.0
            && pixel.y >= 0.0
            && pixel.x <= self.canvas_width
            && pixel.y <= self.canvas_height
    }

    /// Centers the viewport on a plane coordinate.
    pub fn center_on(&mut self, point: &Point) {
        self.pan_x = self.canvas_width / 2.0 - point.x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - point.y * self.zoom;
    }

    /// Resets viewport to default state (1:1 zoom, default pan).
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 5.0;
        self.pan_y = 5.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
