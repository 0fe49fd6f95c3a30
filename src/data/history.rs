/// Linear undo/redo history of full image snapshots
///
/// Every edit stores a complete copy of the bitmap. Pushing while the cursor
/// sits before the tail discards the redo branch.

use image::RgbaImage;

#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<RgbaImage>,
    /// Position of the snapshot matching the displayed image
    index: Option<usize>,
    /// Maximum number of snapshots kept, 0 = unlimited
    limit: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` snapshots (0 = unlimited)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record a copy of `snapshot` as the newest state
    pub fn push(&mut self, snapshot: &RgbaImage) {
        if let Some(idx) = self.index {
            self.snapshots.truncate(idx + 1);
        }
        self.snapshots.push(snapshot.clone());

        if self.limit > 0 && self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.index = Some(self.snapshots.len() - 1);
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.index = None;
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.snapshots.len())
    }

    /// Step back and return a copy of the previous snapshot
    pub fn undo(&mut self) -> Option<RgbaImage> {
        if !self.can_undo() {
            return None;
        }
        let idx = self.index? - 1;
        self.index = Some(idx);
        Some(self.snapshots[idx].clone())
    }

    /// Step forward and return a copy of the next snapshot
    pub fn redo(&mut self) -> Option<RgbaImage> {
        if !self.can_redo() {
            return None;
        }
        let idx = self.index? + 1;
        self.index = Some(idx);
        Some(self.snapshots[idx].clone())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}
