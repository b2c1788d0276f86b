use addrplate_core::geom::{Transform, vector};

/// Explicit save/restore stack of affine transforms threaded through layout.
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Transform::identity(),
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> Transform {
        self.current
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Returns `false` when there was nothing to restore.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(t) => {
                self.current = t;
                true
            }
            None => false,
        }
    }

    /// Moves the local origin by `(dx, dy)` in local units.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current = self.current.pre_translate(vector(dx, dy));
    }

    pub fn scale(&mut self, factor: f64) {
        self.current = self.current.pre_scale(factor, factor);
    }
}
