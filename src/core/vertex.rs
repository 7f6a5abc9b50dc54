use bytemuck::{Pod, Zeroable};

/// Terrain vertex as handed to the presentation surface.
/// Position is local to the owning chunk's origin.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl TerrainVertex {
    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        TerrainVertex { position, color }
    }

    pub fn height(&self) -> f32 {
        self.position[1]
    }
}

/// Raw bytes for uploading a vertex slice to a GPU buffer.
pub fn vertex_bytes(vertices: &[TerrainVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
