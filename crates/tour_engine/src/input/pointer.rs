//! Pointer state for picking operations
//!
//! Provides utilities for converting screen-space coordinates to
//! Normalized Device Coordinates (NDC) for ray casting.

/// Pointer state for picking operations
#[derive(Debug, Clone)]
pub struct PointerState {
    /// Current screen-space X position (pixels)
    pub screen_x: f64,
    /// Current screen-space Y position (pixels)
    pub screen_y: f64,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
}

impl PointerState {
    /// Create a new pointer state with the pointer at the top-left corner
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: 0.0,
            screen_y: 0.0,
            window_width,
            window_height,
        }
    }

    /// Convert screen coordinates to Normalized Device Coordinates (NDC)
    ///
    /// NDC range: [-1, 1] where:
    /// - X: -1 = left, +1 = right
    /// - Y: +1 = top, -1 = bottom
    ///
    /// Positions outside the window map outside [-1, 1]; they are still
    /// valid inputs for ray casting.
    ///
    /// # Examples
    /// ```
    /// # use tour_engine::input::PointerState;
    /// let mut pointer = PointerState::new(1920, 1080);
    /// pointer.update_position(960.0, 540.0);
    /// assert_eq!(pointer.screen_to_ndc(), (0.0, 0.0));
    /// ```
    pub fn screen_to_ndc(&self) -> (f32, f32) {
        let width = f64::from(self.window_width.max(1));
        let height = f64::from(self.window_height.max(1));
        let ndc_x = (self.screen_x / width * 2.0 - 1.0) as f32;
        let ndc_y = (-(self.screen_y / height) * 2.0 + 1.0) as f32;
        (ndc_x, ndc_y)
    }

    /// Update pointer position from window events
    ///
    /// # Arguments
    /// * `x` - Pointer X position in screen space (pixels from left)
    /// * `y` - Pointer Y position in screen space (pixels from top)
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Update window size (for NDC conversion)
    ///
    /// This should be called whenever the window is resized to ensure
    /// accurate screen-to-NDC conversion.
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Width over height of the current window
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width.max(1) as f32 / self.window_height.max(1) as f32
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}
