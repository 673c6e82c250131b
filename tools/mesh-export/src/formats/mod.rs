//! Binary mesh asset format (.pmesh)
//!
//! POD format - no magic bytes, all values little-endian.
//!
//! # Layout
//! ```text
//! 0x00: vertex_count u32
//! 0x04: index_count u32
//! 0x08: flags u8 (bit0 normals, bit1 uvs)
//! 0x09: padding (3 bytes)
//! 0x0C: bounds center f32x3, bounds size f32x3
//! 0x24: positions (vertex_count * 12 bytes)
//! var:  normals (vertex_count * 12 bytes), if flagged
//! var:  uvs (vertex_count * 8 bytes), if flagged
//! var:  indices (index_count * 4 bytes)
//! ```

use std::io::Write;

use anyhow::Result;
use glam::{Vec2, Vec3};
use procmesh_core::{Bounds, MeshData};

use crate::error::ExportError;

pub const FLAG_NORMALS: u8 = 1 << 0;
pub const FLAG_UVS: u8 = 1 << 1;

/// Mesh asset header (36 bytes, bounds included)
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct MeshAssetHeader {
    pub vertex_count: u32,
    pub index_count: u32,
    pub flags: u8,
    pub _padding: [u8; 3],
    pub bounds_center: [f32; 3],
    pub bounds_size: [f32; 3],
}

impl MeshAssetHeader {
    pub const SIZE: usize = 36;

    pub fn new(vertex_count: u32, index_count: u32, flags: u8, bounds: Bounds) -> Self {
        Self {
            vertex_count,
            index_count,
            flags,
            _padding: [0; 3],
            bounds_center: bounds.center.to_array(),
            bounds_size: bounds.size.to_array(),
        }
    }

    pub fn has_normals(&self) -> bool {
        self.flags & FLAG_NORMALS != 0
    }

    pub fn has_uvs(&self) -> bool {
        self.flags & FLAG_UVS != 0
    }

    /// Bytes of vertex and index data following the header
    pub fn body_size(&self) -> usize {
        let vertices = self.vertex_count as usize;
        let mut size = vertices * 12 + self.index_count as usize * 4;
        if self.has_normals() {
            size += vertices * 12;
        }
        if self.has_uvs() {
            size += vertices * 8;
        }
        size
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.index_count.to_le_bytes());
        bytes[8] = self.flags;
        // padding bytes stay 0
        let floats = self.bounds_center.iter().chain(&self.bounds_size);
        for (i, f) in floats.enumerate() {
            let at = 12 + i * 4;
            bytes[at..at + 4].copy_from_slice(&f.to_le_bytes());
        }
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let f32_at = |at: usize| f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        Some(Self {
            vertex_count: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            index_count: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            flags: bytes[8],
            _padding: [0; 3],
            bounds_center: [f32_at(12), f32_at(16), f32_at(20)],
            bounds_size: [f32_at(24), f32_at(28), f32_at(32)],
        })
    }
}

/// Decoded contents of a mesh asset
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    pub bounds: Bounds,
    pub positions: Vec<Vec3>,
    pub normals: Option<Vec<Vec3>>,
    pub uvs: Option<Vec<Vec2>>,
    pub indices: Vec<u32>,
}

impl MeshAsset {
    /// Snapshot of a generated mesh with every attribute present
    pub fn from_mesh(mesh: &MeshData) -> Self {
        Self {
            bounds: mesh.bounds,
            positions: mesh.vertices.clone(),
            normals: Some(mesh.normals.clone()),
            uvs: Some(mesh.uv.clone()),
            indices: mesh.triangles.clone(),
        }
    }

    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.normals.is_some() {
            flags |= FLAG_NORMALS;
        }
        if self.uvs.is_some() {
            flags |= FLAG_UVS;
        }
        flags
    }

    pub fn header(&self) -> MeshAssetHeader {
        MeshAssetHeader::new(
            self.positions.len() as u32,
            self.indices.len() as u32,
            self.flags(),
            self.bounds,
        )
    }
}

fn write_floats<W: Write>(w: &mut W, floats: &[f32]) -> Result<()> {
    for f in floats {
        w.write_all(&f.to_le_bytes())?;
    }
    Ok(())
}

/// Write a complete mesh asset
pub fn write_mesh_asset<W: Write>(w: &mut W, asset: &MeshAsset) -> Result<()> {
    w.write_all(&asset.header().to_bytes())?;

    write_floats(w, bytemuck::cast_slice(&asset.positions))?;
    if let Some(normals) = &asset.normals {
        write_floats(w, bytemuck::cast_slice(normals))?;
    }
    if let Some(uvs) = &asset.uvs {
        write_floats(w, bytemuck::cast_slice(uvs))?;
    }
    for index in &asset.indices {
        w.write_all(&index.to_le_bytes())?;
    }

    Ok(())
}

/// Sequential little-endian reader over the asset body
struct Cursor<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl Cursor<'_> {
    fn floats(&mut self, count: usize) -> Vec<f32> {
        let end = self.at + count * 4;
        let floats = self.bytes[self.at..end]
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        self.at = end;
        floats
    }

    fn vec3s(&mut self, count: usize) -> Vec<Vec3> {
        bytemuck::cast_slice(&self.floats(count * 3)).to_vec()
    }

    fn vec2s(&mut self, count: usize) -> Vec<Vec2> {
        bytemuck::cast_slice(&self.floats(count * 2)).to_vec()
    }

    fn u32s(&mut self, count: usize) -> Vec<u32> {
        let end = self.at + count * 4;
        let values = self.bytes[self.at..end]
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        self.at = end;
        values
    }
}

/// Decode a mesh asset, checking sizes and index ranges
pub fn read_mesh_asset(bytes: &[u8]) -> Result<MeshAsset, ExportError> {
    let header = MeshAssetHeader::from_bytes(bytes).ok_or(ExportError::Truncated {
        expected: MeshAssetHeader::SIZE,
        actual: bytes.len(),
    })?;

    let expected = MeshAssetHeader::SIZE + header.body_size();
    if bytes.len() < expected {
        return Err(ExportError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(ExportError::TrailingBytes(bytes.len() - expected));
    }

    let vertex_count = header.vertex_count as usize;
    let mut cursor = Cursor {
        bytes,
        at: MeshAssetHeader::SIZE,
    };

    let positions = cursor.vec3s(vertex_count);
    let normals = header.has_normals().then(|| cursor.vec3s(vertex_count));
    let uvs = header.has_uvs().then(|| cursor.vec2s(vertex_count));
    let indices = cursor.u32s(header.index_count as usize);

    if let Some(&index) = indices.iter().find(|&&i| i >= header.vertex_count) {
        return Err(ExportError::IndexOutOfRange {
            index,
            vertex_count: header.vertex_count,
        });
    }

    Ok(MeshAsset {
        bounds: Bounds::new(
            Vec3::from_array(header.bounds_center),
            Vec3::from_array(header.bounds_size),
        ),
        positions,
        normals,
        uvs,
        indices,
    })
}
