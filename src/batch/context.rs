// batch/context.rs

/// Per-frame render-order assignment context. The host drives one of these
/// through all independently rendered content and the batchers in a single
/// pass, so batched groups interleave with the caller's own draws.
#[derive(Debug, Default)]
pub struct UpdateContext {
    pub rendering_order: u32,
}

impl UpdateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current order slot and advances the counter.
    pub fn next_order(&mut self) -> u32 {
        let order = self.rendering_order;
        self.rendering_order += 1;
        order
    }
}
