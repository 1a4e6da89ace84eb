/// Maximum time between two touch starts that still counts as a double tap.
pub const DOUBLE_TAP_DELAY_MS: i64 = 300;
/// Maximum distance between two touch starts that still counts as a double tap.
pub const DOUBLE_TAP_RADIUS: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: i64,
}

impl TouchEvent {
    pub fn new(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self { x, y, timestamp_ms }
    }

    pub fn distance_to(&self, other: &TouchEvent) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// What the gesture source reports. Only starts take part in classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start(TouchEvent),
    End(TouchEvent),
}

/// The previous touch start, or nothing before the first one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TapMemory {
    last: Option<TouchEvent>,
}

impl TapMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remembering(event: TouchEvent) -> Self {
        Self { last: Some(event) }
    }

    pub fn last(&self) -> Option<&TouchEvent> {
        self.last.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureClassifier {
    pub delay_ms: i64,
    pub radius: f32,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self {
            delay_ms: DOUBLE_TAP_DELAY_MS,
            radius: DOUBLE_TAP_RADIUS,
        }
    }
}

impl GestureClassifier {
    pub fn new(delay_ms: i64, radius: f32) -> Self {
        Self { delay_ms, radius }
    }

    /// Decides whether `event` completes a double tap with the remembered
    /// touch. The returned memory always holds `event`, whatever the outcome,
    /// so a fast third tap is judged against the second one.
    pub fn classify(&self, event: TouchEvent, memory: TapMemory) -> (bool, TapMemory) {
        // An unrepresentable gap is never a double tap
        let is_double_tap = memory.last.is_some_and(|last| {
            event
                .timestamp_ms
                .checked_sub(last.timestamp_ms)
                .is_some_and(|dt| dt < self.delay_ms && event.distance_to(&last) < self.radius)
        });
        (is_double_tap, TapMemory { last: Some(event) })
    }
}

/// Threads a `TapMemory` through successive gesture events.
#[derive(Debug, Clone, Default)]
pub struct TapTracker {
    classifier: GestureClassifier,
    memory: TapMemory,
}

impl TapTracker {
    pub fn new(classifier: GestureClassifier) -> Self {
        Self {
            classifier,
            memory: TapMemory::new(),
        }
    }

    /// Returns true when the event is a touch start completing a double tap.
    pub fn observe(&mut self, event: GestureEvent) -> bool {
        match event {
            GestureEvent::Start(touch) => {
                let (is_double_tap, memory) = self.classifier.classify(touch, self.memory);
                self.memory = memory;
                is_double_tap
            }
            GestureEvent::End(_) => false,
        }
    }

    pub fn memory(&self) -> TapMemory {
        self.memory
    }

    pub fn reset(&mut self) {
        self.memory = TapMemory::new();
    }
}
