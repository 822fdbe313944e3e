// Render primitives: the renderer-agnostic output of the scene builder.
//
// A `Primitive` is one drawable piece (a box, a cylinder, a flat ring, ...)
// placed in world space with a material and opacity. The scene builder only
// emits these descriptions; turning them into GPU meshes is the embedding
// renderer's job. Positions are the shape's centre. Flat shapes (`Plane`,
// `Disc`, `Ring`, `GroundPlane`) are oriented as documented on each variant.
//
// See also: `building.rs`, `site.rs` and `overlay.rs` which emit these,
// `config.rs` for the palette that colours each `Material`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometric shape of a primitive, in local units before placement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrimitiveShape {
    /// Axis-aligned box with extents `[x, y, z]`.
    Box { size: [f32; 3] },
    /// Upright cylinder (or frustum).
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    Sphere { radius: f32 },
    /// Vertical plane facing +Z before `rotation_y` is applied.
    Plane { width: f32, height: f32 },
    /// Horizontal rectangle lying on the ground, `width` along X.
    GroundPlane { width: f32, depth: f32 },
    /// Horizontal filled circle.
    Disc { radius: f32 },
    /// Horizontal annulus.
    Ring { inner: f32, outer: f32 },
}

/// Surface a primitive is drawn with. Colours come from the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Material {
    Concrete,
    Stone,
    Glass,
    Dark,
    Canopy,
    RoofEquipment,
    WindowPane,
    Mullion,
    Ground,
    Terrain,
    Asphalt,
    Marking,
    Curb,
    Parking,
    ParkingLine,
    TreeTrunk,
    Leaf,
    TargetRing,
    SelectedRing,
    ArrivalPulse,
    PathDot,
    AvatarPulse,
    AvatarDot,
    AvatarBorder,
}

impl Material {
    /// Highlight decorations drawn on top of a building. They never change
    /// its geometry.
    pub fn is_decoration(self) -> bool {
        matches!(
            self,
            Material::TargetRing | Material::SelectedRing | Material::ArrivalPulse
        )
    }
}

/// One drawable item in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Primitive {
    pub shape: PrimitiveShape,
    /// World-space centre.
    pub position: [f32; 3],
    /// Rotation about the vertical axis, in radians.
    pub rotation_y: f32,
    /// Horizontal (XZ) scale, used by animated rings.
    pub scale: f32,
    pub material: Material,
    pub opacity: f32,
}

impl Primitive {
    /// An opaque, unrotated, unscaled primitive.
    pub fn new(shape: PrimitiveShape, position: [f32; 3], material: Material) -> Self {
        Self {
            shape,
            position,
            rotation_y: 0.0,
            scale: 1.0,
            material,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_rotation(mut self, rotation_y: f32) -> Self {
        self.rotation_y = rotation_y;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

pub fn cuboid(size: [f32; 3], position: [f32; 3], material: Material) -> Primitive {
    Primitive::new(PrimitiveShape::Box { size }, position, material)
}

pub fn ring(inner: f32, outer: f32, position: [f32; 3], material: Material) -> Primitive {
    Primitive::new(PrimitiveShape::Ring { inner, outer }, position, material)
}

pub fn sphere(radius: f32, position: [f32; 3], material: Material) -> Primitive {
    Primitive::new(PrimitiveShape::Sphere { radius }, position, material)
}

pub fn ground_plane(width: f32, depth: f32, position: [f32; 3], material: Material) -> Primitive {
    Primitive::new(PrimitiveShape::GroundPlane { width, depth }, position, material)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_fields() {
        let p = ring(1.0, 1.3, [0.0, 0.2, 0.0], Material::AvatarPulse)
            .with_opacity(0.5)
            .with_scale(2.0);
        assert_eq!(p.shape, PrimitiveShape::Ring { inner: 1.0, outer: 1.3 });
        assert_eq!(p.scale, 2.0);
        assert!(p.is_transparent());
        assert!(!cuboid([1.0; 3], [0.0; 3], Material::Concrete).is_transparent());
    }

    #[test]
    fn only_rings_are_decorations() {
        assert!(Material::TargetRing.is_decoration());
        assert!(Material::ArrivalPulse.is_decoration());
        assert!(!Material::Glass.is_decoration());
        assert!(!Material::AvatarPulse.is_decoration());
    }
}
