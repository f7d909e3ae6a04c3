/// Unique identifier for a node on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// An event emitted by the animation for the embedding UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    /// The pencil tip moved to absolute canvas coordinates (x, y).
    PencilMoved { x: f32, y: f32 },
    /// The whole name has been written. Emitted once per run.
    Complete,
}

/// Hands out node ids for one run. Reset together with the canvas.
#[derive(Debug, Clone)]
pub struct NodeIds {
    next: u32,
}

impl NodeIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    pub fn reset(&mut self) {
        self.next = 1;
    }
}

impl Default for NodeIds {
    fn default() -> Self {
        Self::new()
    }
}
