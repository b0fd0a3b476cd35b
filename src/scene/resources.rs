//! Bookkeeping for render-side buffers.
//!
//! Every geometry or material a scene component creates is allocated from the
//! [`ResourceLedger`] and handed back when the component is torn down. Handles
//! are move-only, so a buffer can be released at most once.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Geometry,
    Material,
}

#[derive(Debug, PartialEq, Eq)]
pub struct GpuHandle {
    id: u64,
    kind: ResourceKind,
}

impl GpuHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

#[derive(Debug, Default)]
pub struct ResourceLedger {
    next_id: u64,
    live: HashMap<u64, (ResourceKind, &'static str)>,
    allocated_total: u64,
    released_total: u64,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, kind: ResourceKind, label: &'static str) -> GpuHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.live.insert(id, (kind, label));
        self.allocated_total += 1;
        GpuHandle { id, kind }
    }

    pub fn release(&mut self, handle: GpuHandle) {
        if self.live.remove(&handle.id).is_some() {
            self.released_total += 1;
        } else {
            tracing::warn!(id = handle.id, kind = ?handle.kind, "release of unknown resource");
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_of(&self, kind: ResourceKind) -> usize {
        self.live.values().filter(|(k, _)| *k == kind).count()
    }

    pub fn live_labelled(&self, label: &str) -> usize {
        self.live.values().filter(|(_, l)| *l == label).count()
    }

    pub fn allocated_total(&self) -> u64 {
        self.allocated_total
    }

    pub fn released_total(&self) -> u64 {
        self.released_total
    }
}
