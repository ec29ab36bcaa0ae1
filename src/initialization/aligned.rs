use crate::defaults::BUFFER_ALIGNMENT;
use crate::error::{NbodyError, Result};
use bytemuck::{Pod, Zeroable};
use std::ops::{Deref, DerefMut};

const LANE_WIDTH: usize = BUFFER_ALIGNMENT / std::mem::size_of::<f32>();

/// One cache line worth of floats. The alignment of the whole buffer follows
/// from the alignment of its first lane.
#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C, align(64))]
struct Lane([f32; LANE_WIDTH]);

/// Fixed length `f32` buffer whose first element sits on a 64-byte boundary.
#[derive(Clone)]
pub struct AlignedBuffer {
    lanes: Vec<Lane>,
    len: usize,
}

impl AlignedBuffer {
    /// Allocates `len` zeroed floats.
    pub fn zeroed(len: usize) -> Result<AlignedBuffer> {
        let padded: usize = len
            .checked_add(LANE_WIDTH - 1)
            .ok_or(NbodyError::Allocation { len })?;
        let n_lanes: usize = padded / LANE_WIDTH;
        let mut lanes: Vec<Lane> = Vec::new();
        lanes
            .try_reserve_exact(n_lanes)
            .map_err(|_| NbodyError::Allocation { len })?;
        lanes.resize(n_lanes, Lane::zeroed());
        Ok(AlignedBuffer { lanes, len })
    }

    pub fn from_slice(values: &[f32]) -> Result<AlignedBuffer> {
        let mut buffer: AlignedBuffer = AlignedBuffer::zeroed(values.len())?;
        buffer.copy_from_slice(values);
        Ok(buffer)
    }

    pub fn as_slice(&self) -> &[f32] {
        &bytemuck::cast_slice::<Lane, f32>(&self.lanes)[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        let len: usize = self.len;
        &mut bytemuck::cast_slice_mut::<Lane, f32>(&mut self.lanes)[..len]
    }
}

impl Deref for AlignedBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl DerefMut for AlignedBuffer {
    fn deref_mut(&mut self) -> &mut [f32] {
        self.as_mut_slice()
    }
}

impl std::fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice().iter()).finish()
    }
}
