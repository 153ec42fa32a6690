/// Opaque handles to externally managed meshes and textures.
///
/// The values of the named constants are indices into the external mesh
/// and texture managers used by the default scene catalog.

/// Handle to a mesh owned by the external mesh manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

impl MeshId {
    pub const PLANE: MeshId = MeshId(0);
    pub const CUBE: MeshId = MeshId(1);
    pub const SPHERE: MeshId = MeshId(2);
    pub const LOW_SPHERE: MeshId = MeshId(3);
    pub const CYLINDER: MeshId = MeshId(4);
    pub const LOW_CYLINDER: MeshId = MeshId(5);
    pub const CONE: MeshId = MeshId(6);
    pub const PYRAMID: MeshId = MeshId(7);
    pub const FRUSTUM_PYRAMID: MeshId = MeshId(8);
    pub const TORUS: MeshId = MeshId(9);
    pub const LOW_TORUS: MeshId = MeshId(10);
}

/// Handle to a texture owned by the external texture manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

impl TextureId {
    pub const DESK: TextureId = TextureId(0);
    pub const BRICK: TextureId = TextureId(1);
    pub const SPECULAR_PLASTIC: TextureId = TextureId(2);
    pub const SPECULAR_METAL: TextureId = TextureId(3);
    pub const DRINK_FRONT: TextureId = TextureId(4);
    pub const DRINK_TOP: TextureId = TextureId(5);
    pub const PANELS: TextureId = TextureId(6);
    pub const BRASS: TextureId = TextureId(7);
    pub const LEAF: TextureId = TextureId(8);
    pub const LEAF_DARK: TextureId = TextureId(9);
    pub const QUESTION: TextureId = TextureId(10);
    pub const CLEAR: TextureId = TextureId(11);
    pub const GREEN: TextureId = TextureId(12);
    pub const ORANGE: TextureId = TextureId(13);
    pub const YELLOW: TextureId = TextureId(14);
    pub const EYES: TextureId = TextureId(15);
    pub const WOOD: TextureId = TextureId(16);
    pub const HAMMER_HEAD: TextureId = TextureId(17);
    pub const SPECULAR_HAMMER_HEAD: TextureId = TextureId(18);
    pub const GRASS: TextureId = TextureId(19);
    pub const FENCE: TextureId = TextureId(20);
}
