//! Normalized pointer offset relative to a container.

/// Pointer offset from the container center, each axis in `[-0.5, 0.5]`.
///
/// `(-0.5, -0.5)` is the top-left corner, `(0.5, 0.5)` the bottom-right and
/// `(0, 0)` the center or "no pointer".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    x: f32,
    y: f32,
}

impl PointerState {
    /// Builds a state, clamping each axis. Non-finite values become `0.0`.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_finite() { value.clamp(-0.5, 0.5) } else { 0.0 }
}

/// Axis-aligned rectangle of the tracked container, in the same pixel space as
/// pointer positions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContainerBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerBounds {
    /// Bounds covering `fraction` of a viewport (`[left, top, width, height]` in `[0, 1]`).
    ///
    /// # Arguments
    /// * `viewport` - Viewport size in physical pixels
    /// * `fraction` - Rectangle as viewport fractions
    pub fn from_viewport_rect(viewport: (u32, u32), fraction: [f32; 4]) -> Self {
        let (w, h) = (viewport.0 as f32, viewport.1 as f32);
        Self {
            left: fraction[0] * w,
            top: fraction[1] * h,
            width: fraction[2] * w,
            height: fraction[3] * h,
        }
    }

    /// Whether the bounds have no usable area.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Whether `(x, y)` lies inside the bounds (edges included).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        !self.is_degenerate()
            && x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }
}

/// Translates raw pointer events into a [`PointerState`].
#[derive(Debug, Clone, Default)]
pub struct PointerInputAdapter {
    state: PointerState,
}

impl PointerInputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer move at `(x, y)` over `bounds`.
    ///
    /// Degenerate bounds record `(0, 0)` instead of dividing by zero.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, bounds: &ContainerBounds) {
        self.state = if bounds.is_degenerate() {
            PointerState::default()
        } else {
            PointerState::new(
                (x - bounds.left) / bounds.width - 0.5,
                (y - bounds.top) / bounds.height - 0.5,
            )
        };
    }

    /// Records that the pointer left the container.
    pub fn on_pointer_leave(&mut self) {
        self.state = PointerState::default();
    }

    /// Handles a cursor position from a window that has no per-element hover events:
    /// inside `bounds` counts as a move, outside as a leave.
    pub fn on_cursor(&mut self, x: f32, y: f32, bounds: &ContainerBounds) {
        if bounds.contains(x, y) {
            self.on_pointer_move(x, y, bounds);
        } else {
            self.on_pointer_leave();
        }
    }

    /// Current state, as read once per frame by the composer.
    pub fn snapshot(&self) -> PointerState {
        self.state
    }
}
