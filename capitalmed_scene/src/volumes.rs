// Architectural volume decomposition.
//
// Each footprint shape is split into 3 or 4 box sub-volumes so buildings read
// as composed masses rather than single blocks. Offsets (`px`, `pz`) are
// relative to the footprint centre; extents are fractions of the footprint
// width `w`, depth `d` and building height `h`:
//
//   Rectangular  main        ( 0,     0    )  0.85w × 0.85d × h     concrete
//                facade      ( 0.1w,  0.3d )  0.5w  × 0.2d  × 0.7h  glass
//                accent      (-0.35w, 0    )  0.15w × 0.6d  × 0.6h  stone
//   L            main bar    (-0.15w, 0    )  0.7w  × d     × h     concrete
//                extension   ( 0.3w, -0.25d)  0.4w  × 0.5d  × 0.75h stone
//                glass link  ( 0.1w, -0.15d)  0.15w × 0.3d  × 0.55h glass
//   U            back bar    ( 0,    -0.35d)  w     × 0.3d  × h     concrete
//                west wing   (-0.35w, 0.1d )  0.3w  × 0.7d  × 0.85h stone
//                east wing   ( 0.35w, 0.1d )  0.3w  × 0.7d  × 0.85h stone
//                connector   ( 0,     0.35d)  0.4w  × 0.15d × 0.5h  glass
//
// Negative Z is the back (north) of the building; the entrance faces +Z.

use capitalmed_sim::types::Shape;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Facade finish of a sub-volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Finish {
    Concrete,
    Stone,
    Glass,
}

/// What part of the composition a sub-volume is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VolumeRole {
    Main,
    Facade,
    Accent,
    Extension,
    Link,
    BackBar,
    Wing,
    Connector,
}

/// One box of a building's massing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubVolume {
    pub role: VolumeRole,
    pub finish: Finish,
    /// X offset from the footprint centre.
    pub px: f32,
    /// Z offset from the footprint centre.
    pub pz: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl SubVolume {
    fn new(
        role: VolumeRole,
        finish: Finish,
        (px, pz): (f32, f32),
        (width, depth, height): (f32, f32, f32),
    ) -> Self {
        Self {
            role,
            finish,
            px,
            pz,
            width,
            depth,
            height,
        }
    }

    /// Glass volumes have no separate window grid.
    pub fn has_windows(&self) -> bool {
        self.finish != Finish::Glass
    }
}

pub type Volumes = SmallVec<[SubVolume; 4]>;

/// Split a `w × d` footprint of height `h` into its sub-volumes.
pub fn decompose(shape: Shape, w: f32, d: f32, h: f32) -> Volumes {
    use Finish::*;
    use VolumeRole::*;

    let mut v = Volumes::new();
    match shape {
        Shape::UShaped => {
            v.push(SubVolume::new(BackBar, Concrete, (0.0, -d * 0.35), (w, d * 0.3, h)));
            v.push(SubVolume::new(
                Wing,
                Stone,
                (-w * 0.35, d * 0.1),
                (w * 0.3, d * 0.7, h * 0.85),
            ));
            v.push(SubVolume::new(
                Wing,
                Stone,
                (w * 0.35, d * 0.1),
                (w * 0.3, d * 0.7, h * 0.85),
            ));
            v.push(SubVolume::new(
                Connector,
                Glass,
                (0.0, d * 0.35),
                (w * 0.4, d * 0.15, h * 0.5),
            ));
        }
        Shape::LShaped => {
            v.push(SubVolume::new(Main, Concrete, (-w * 0.15, 0.0), (w * 0.7, d, h)));
            v.push(SubVolume::new(
                Extension,
                Stone,
                (w * 0.3, -d * 0.25),
                (w * 0.4, d * 0.5, h * 0.75),
            ));
            v.push(SubVolume::new(
                Link,
                Glass,
                (w * 0.1, -d * 0.15),
                (w * 0.15, d * 0.3, h * 0.55),
            ));
        }
        Shape::Rectangular => {
            v.push(SubVolume::new(Main, Concrete, (0.0, 0.0), (w * 0.85, d * 0.85, h)));
            v.push(SubVolume::new(
                Facade,
                Glass,
                (w * 0.1, d * 0.3),
                (w * 0.5, d * 0.2, h * 0.7),
            ));
            v.push(SubVolume::new(
                Accent,
                Stone,
                (-w * 0.35, 0.0),
                (w * 0.15, d * 0.6, h * 0.6),
            ));
        }
    }
    v
}
