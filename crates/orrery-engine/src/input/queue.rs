/// Input event types the engine understands.
/// Pointer coordinates are client (CSS pixel) coordinates, as delivered by
/// the host page; the engine maps them through the viewport rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A press ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A wheel tick. Negative `delta_y` scrolls up (zoom in).
    Wheel { delta_y: f32 },
    /// The host viewport changed size.
    Resize { width: f32, height: f32, pixel_ratio: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; the engine drains them at the start of
/// each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Tells a click from a drag: a press that travels less than the threshold
/// before release is a click.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    threshold: f32,
    down_at: Option<(f32, f32)>,
    last: (f32, f32),
    dragging: bool,
}

/// What a pointer event amounts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    None,
    /// Drag step of (dx, dy) since the previous move.
    Drag { dx: f32, dy: f32 },
    /// Released without exceeding the drag threshold.
    Click { x: f32, y: f32 },
}

impl PointerTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn down(&mut self, x: f32, y: f32) {
        self.down_at = Some((x, y));
        self.last = (x, y);
        self.dragging = false;
    }

    pub fn moved(&mut self, x: f32, y: f32) -> PointerGesture {
        let Some((sx, sy)) = self.down_at else {
            return PointerGesture::None;
        };
        if !self.dragging {
            let (dx, dy) = (x - sx, y - sy);
            if (dx * dx + dy * dy).sqrt() < self.threshold {
                return PointerGesture::None;
            }
            self.dragging = true;
        }
        let (lx, ly) = self.last;
        self.last = (x, y);
        PointerGesture::Drag { dx: x - lx, dy: y - ly }
    }

    pub fn up(&mut self, x: f32, y: f32) -> PointerGesture {
        let Some((sx, sy)) = self.down_at.take() else {
            return PointerGesture::None;
        };
        let was_dragging = std::mem::take(&mut self.dragging);
        let (dx, dy) = (x - sx, y - sy);
        if was_dragging || (dx * dx + dy * dy).sqrt() >= self.threshold {
            PointerGesture::None
        } else {
            PointerGesture::Click { x, y }
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.down_at.is_some()
    }
}
