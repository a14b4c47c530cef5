use voxbag_core::math::{floor_div, floor_mod};
use voxbag_core::types::{Voxel, WorldCoord};
use voxbag_core::{voxel, VoxbagError};

/// Block type written by the default generators.
pub const DEFAULT_SOLID_BLOCK: u16 = 1;
/// Mortar block type used by `BrickFill::default`.
pub const DEFAULT_MORTAR_BLOCK: u16 = 2;

/// Deterministic source of voxel words for world population.
/// `None` leaves the target voxel untouched (and its chunk unallocated).
pub trait VoxelSource<W> {
    fn sample(&self, world: WorldCoord) -> Option<W>;
}

impl<W, F> VoxelSource<W> for F
where
    F: Fn(WorldCoord) -> Option<W>,
{
    fn sample(&self, world: WorldCoord) -> Option<W> {
        self(world)
    }
}

/// Cheap hash noise: `fract(sin(dot(p, k) + seed) * 43758.5453123)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HashNoise {
    pub seed: f64,
}

impl HashNoise {
    /// Noise field for `seed`.
    pub fn new(seed: f64) -> Self {
        Self { seed }
    }

    /// Pseudo-random value in `[0, 1)`, identical for identical inputs.
    pub fn value(&self, world: WorldCoord) -> f64 {
        let s = (world.x as f64 * 12.9898 + world.y as f64 * 78.233 + world.z as f64 * 42.345
            + self.seed)
            .sin()
            * 43758.5453123;
        let fract = s - s.floor();
        // s - floor(s) can round up to exactly 1.0 for tiny negative s
        if fract >= 1.0 {
            0.0
        } else {
            fract
        }
    }
}

/// Staggered brick wall in the XY plane; z is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickPattern {
    width: i32,
    height: i32,
    thickness: i32,
    alternating: bool,
}

impl Default for BrickPattern {
    fn default() -> Self {
        Self {
            width: 20,
            height: 10,
            thickness: 2,
            alternating: true,
        }
    }
}

impl BrickPattern {
    /// Pattern with the given brick size in voxels; zero width or height is rejected.
    pub fn new(
        width: u32,
        height: u32,
        thickness: u32,
        alternating: bool,
    ) -> Result<Self, VoxbagError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(VoxbagError::InvalidGenerator(format!(
                "brick size {width}x{height} must be positive"
            )));
        }
        Ok(Self {
            width: width as i32,
            height: height as i32,
            thickness: thickness.min(i32::MAX as u32) as i32,
            alternating,
        })
    }

    /// True inside a brick, false in the mortar between bricks.
    pub fn is_brick(&self, x: i32, y: i32) -> bool {
        let row = floor_div(y, self.height);
        let offset = if self.alternating && floor_mod(row, 2) == 1 {
            self.width / 2
        } else {
            0
        };
        let local_x = floor_mod(x.wrapping_sub(offset), self.width);
        let local_y = floor_mod(y, self.height);
        local_x >= self.thickness && local_y >= self.thickness
    }
}

/// Solid voxels wherever `HashNoise` reaches `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseFill {
    pub noise: HashNoise,
    pub threshold: f64,
    pub block_type: u16,
}

impl NoiseFill {
    /// Fill with `DEFAULT_SOLID_BLOCK` wherever noise reaches `threshold`.
    pub fn new(seed: f64, threshold: f64) -> Self {
        Self {
            noise: HashNoise::new(seed),
            threshold,
            block_type: DEFAULT_SOLID_BLOCK,
        }
    }
}

impl VoxelSource<Voxel> for NoiseFill {
    fn sample(&self, world: WorldCoord) -> Option<Voxel> {
        (self.noise.value(world) >= self.threshold)
            .then(|| voxel::pack(true, self.block_type, 0, 0xFF))
    }
}

/// Every voxel solid, typed as brick or mortar by a `BrickPattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickFill {
    pub pattern: BrickPattern,
    pub brick_type: u16,
    pub mortar_type: u16,
}

impl Default for BrickFill {
    fn default() -> Self {
        Self {
            pattern: BrickPattern::default(),
            brick_type: DEFAULT_SOLID_BLOCK,
            mortar_type: DEFAULT_MORTAR_BLOCK,
        }
    }
}

impl VoxelSource<Voxel> for BrickFill {
    fn sample(&self, world: WorldCoord) -> Option<Voxel> {
        let block = if self.pattern.is_brick(world.x, world.y) {
            self.brick_type
        } else {
            self.mortar_type
        };
        Some(voxel::pack(true, block, 0, 0xFF))
    }
}
