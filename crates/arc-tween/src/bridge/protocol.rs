//! Flat per-tween sample record read by a JS timeline host.
//! Must stay in sync with the host's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [px, py, pz, rx, ry, rz, rw, flags]
//! ```
//!
//! `flags` is a bit set stored as a float: which channels are valid and
//! whether the frame raised an issue.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

use crate::api::anchors::TweenSample;

/// Protocol version reported to the host.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// `flags` bit: position fields are valid.
pub const FLAG_POSITION: u32 = 1;
/// `flags` bit: rotation fields are valid.
pub const FLAG_ROTATION: u32 = 1 << 1;
/// `flags` bit: evaluation raised at least one issue this frame.
pub const FLAG_ISSUE: u32 = 1 << 2;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SampleRecord {
    pub px: f32,
    pub py: f32,
    pub pz: f32,
    pub rx: f32,
    pub ry: f32,
    pub rz: f32,
    pub rw: f32,
    pub flags: f32,
}

impl SampleRecord {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Pack a sample. Missing channels are zero-filled and left unflagged.
    pub fn pack(sample: &TweenSample, had_issue: bool) -> Self {
        let mut flags = 0u32;
        let p = match sample.position {
            Some(p) => {
                flags |= FLAG_POSITION;
                p
            }
            None => Vec3::ZERO,
        };
        let r = match sample.rotation {
            Some(r) => {
                flags |= FLAG_ROTATION;
                r
            }
            None => Quat::IDENTITY,
        };
        if had_issue {
            flags |= FLAG_ISSUE;
        }
        Self {
            px: p.x,
            py: p.y,
            pz: p.z,
            rx: r.x,
            ry: r.y,
            rz: r.z,
            rw: r.w,
            flags: flags as f32,
        }
    }

    pub fn flags(&self) -> u32 {
        self.flags as u32
    }

    pub fn position(&self) -> Option<Vec3> {
        (self.flags() & FLAG_POSITION != 0).then(|| Vec3::new(self.px, self.py, self.pz))
    }

    pub fn rotation(&self) -> Option<Quat> {
        (self.flags() & FLAG_ROTATION != 0)
            .then(|| Quat::from_xyzw(self.rx, self.ry, self.rz, self.rw))
    }

    pub fn had_issue(&self) -> bool {
        self.flags() & FLAG_ISSUE != 0
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

/// Reusable buffer of records, one slot per evaluated tween this frame.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    records: Vec<SampleRecord>,
}

impl SampleBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn push(&mut self, record: SampleRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Records viewed as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.records)
    }

    pub fn ptr(&self) -> *const f32 {
        self.records.as_ptr() as *const f32
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
