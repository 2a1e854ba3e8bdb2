//! Global constants for av-core

/// Topology file format version
pub const TOPOLOGY_VERSION: u32 = 1;

/// Number of straight segments used to approximate a connection curve
pub const CURVE_SEGMENTS: usize = 50;

/// Height the curve control point is lifted above the higher endpoint
pub const CURVE_LIFT: f32 = 2.0;

/// Particles flowing along each connection
pub const PARTICLES_PER_CONNECTION: usize = 3;

/// Particle speed range (curve progress per frame)
pub const PARTICLE_MIN_SPEED: f32 = 0.01;
pub const PARTICLE_MAX_SPEED: f32 = 0.03;

/// Fallback color for components whose color fails to parse (gray, RGBA)
pub const DEFAULT_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
