//! Output geometry filled by the layer traversal.
//!
//! Every sink is plain data: a traversal clears it, appends one entry per
//! selected voxel, and hands it back. How the caller publishes or renders
//! it is outside this crate.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::voxel::color::{rainbow_color_map, Color, ColorRgba};

/// Height that maps to the start of the occupancy color ramp
pub const OCCUPANCY_COLOR_Z_OFFSET: f32 = 5.0;
/// Ramp periods per metre of height; one full hue cycle every 0.1 m
pub const OCCUPANCY_COLOR_Z_SCALE: f32 = 10.0;
/// Namespace given to occupancy cube markers
pub const OCCUPIED_VOXELS_NAMESPACE: &str = "occupied_voxels";

/// Height-keyed color used for occupied voxel cubes.
pub fn occupancy_color(z: f32) -> Color {
    rainbow_color_map((z - OCCUPANCY_COLOR_Z_OFFSET) * OCCUPANCY_COLOR_Z_SCALE)
}

/// Sink for one traversal mode.
///
/// `Attribute` is whatever the voxel predicate derives for a selected voxel:
/// a color, an intensity, or nothing at all.
pub trait Accumulator {
    type Attribute;

    /// Drop every entry, keeping allocated capacity.
    fn clear(&mut self);

    /// Append the voxel centred at `coords`.
    fn push(&mut self, coords: Vec3, attribute: Self::Attribute);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Point types
// ---------------------------------------------------------------------------

/// Colored point - 16 bytes, GPU-uploadable
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct PointXyzRgb {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(skip)]
    _pad: u8,
}

impl PointXyzRgb {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            r: color.r,
            g: color.g,
            b: color.b,
            _pad: 0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn color(&self) -> Color {
        Color::new(self.r, self.g, self.b)
    }
}

/// Point with a scalar intensity - 16 bytes, GPU-uploadable
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct PointXyzI {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
}

impl PointXyzI {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            intensity,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Point clouds
// ---------------------------------------------------------------------------

/// Ordered list of colored points
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorPointCloud {
    pub points: Vec<PointXyzRgb>,
}

impl ColorPointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointXyzRgb> {
        self.points.iter()
    }

    /// Raw point data for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

impl Accumulator for ColorPointCloud {
    type Attribute = Color;

    fn clear(&mut self) {
        self.points.clear();
    }

    fn push(&mut self, coords: Vec3, color: Color) {
        self.points.push(PointXyzRgb::new(coords, color));
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Ordered list of intensity points
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IntensityPointCloud {
    pub points: Vec<PointXyzI>,
}

impl IntensityPointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointXyzI> {
        self.points.iter()
    }

    /// Raw point data for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

impl Accumulator for IntensityPointCloud {
    type Attribute = f32;

    fn clear(&mut self) {
        self.points.clear();
    }

    fn push(&mut self, coords: Vec3, intensity: f32) {
        self.points.push(PointXyzI::new(coords, intensity));
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Batch of equally sized cubes, one color per cube.
///
/// `points[i]` is drawn with `colors[i]`; both lists always have the same
/// length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubeListMarker {
    /// Reference frame the cube centres are expressed in
    pub frame_id: String,
    pub ns: String,
    pub id: i32,
    /// Cube edge lengths
    pub scale: Vec3,
    pub points: Vec<Vec3>,
    pub colors: Vec<ColorRgba>,
}

impl CubeListMarker {
    /// Empty cube list with uniform cube edge `cube_size`.
    pub fn new(frame_id: impl Into<String>, ns: impl Into<String>, cube_size: f32) -> Self {
        Self {
            frame_id: frame_id.into(),
            ns: ns.into(),
            id: 0,
            scale: Vec3::splat(cube_size),
            points: Vec::new(),
            colors: Vec::new(),
        }
    }
}

impl Accumulator for CubeListMarker {
    type Attribute = ();

    fn clear(&mut self) {
        self.points.clear();
        self.colors.clear();
    }

    fn push(&mut self, coords: Vec3, _: ()) {
        self.points.push(coords);
        self.colors.push(occupancy_color(coords.z).to_rgba());
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Collection of markers published together
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerArray {
    pub markers: Vec<CubeListMarker>,
}

impl MarkerArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total cube count across all markers
    pub fn num_cubes(&self) -> usize {
        self.markers.iter().map(|m| m.points.len()).sum()
    }
}
