/// An in-progress seeker drag. Exists only between drag start and drag end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer X minus the seeker's left edge at drag start.
    pub diff_x: f64,
}

impl DragSession {
    pub fn begin(pointer_x: f64, seeker_left_px: f64) -> Self {
        Self {
            diff_x: pointer_x - seeker_left_px,
        }
    }

    /// Seeker left edge implied by the pointer, truncated to whole pixels.
    pub fn proposed_left(&self, pointer_x: f64) -> f64 {
        (pointer_x - self.diff_x).trunc()
    }
}
