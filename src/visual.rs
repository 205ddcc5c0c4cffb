//! Per-planet animated presentation state.

use crate::catalog::PlanetDescriptor;
use crate::spring::{Spring, SpringConfig};

/// Self-rotation rate of a planet, radians per second
pub const ROTATION_RATE: f64 = 0.1;
/// Rotation rate of the ring around its own axis, radians per second
pub const RING_ROTATION_RATE: f64 = 0.05;
/// Ring radii as multiples of the planet radius
pub const RING_INNER: f64 = 1.2;
pub const RING_OUTER: f64 = 1.8;
/// Ring opacity relative to the planet opacity
pub const RING_OPACITY: f64 = 0.2;

/// Presentation values derived for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualParams {
    pub visible: bool,
    pub scale: f64,
    pub opacity: f64,
}

/// Geometry of the annulus drawn around a ringed planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingParams {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub rotation: f64,
    pub opacity: f64,
}

pub struct PlanetVisual {
    /// Catalog entry this visual presents
    pub descriptor: &'static PlanetDescriptor,
    /// Whether this planet is the current one
    visible: bool,
    /// Uniform scale, animated between 0 and 1
    scale: Spring,
    /// Opacity, animated between 0 and 1
    opacity: Spring,
    /// Accumulated self-rotation around the Y-axis, radians
    rotation: f64,
    /// Accumulated ring rotation around its own axis, radians
    ring_rotation: f64,
}

impl PlanetVisual {
    /// Creates the visual already at rest in its visible or hidden state
    pub fn new(descriptor: &'static PlanetDescriptor, visible: bool, spring: SpringConfig) -> Self {
        let rest = if visible { 1.0 } else { 0.0 };
        PlanetVisual {
            descriptor,
            visible,
            scale: Spring::at_rest(rest, spring),
            opacity: Spring::at_rest(rest, spring),
            rotation: 0.0,
            ring_rotation: 0.0,
        }
    }

    /// Retargets the fade animation when visibility changes
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        let target = if visible { 1.0 } else { 0.0 };
        self.scale.set_target(target);
        self.opacity.set_target(target);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Advances the fade animation and, unless `paused`, the rotation
    pub fn tick(&mut self, dt: f64, paused: bool) {
        self.scale.step(dt);
        self.opacity.step(dt);
        if !paused {
            self.rotation += dt * ROTATION_RATE;
            self.ring_rotation += dt * RING_ROTATION_RATE;
        }
    }

    pub fn params(&self) -> VisualParams {
        VisualParams {
            visible: self.visible,
            scale: self.scale.value().clamp(0.0, 1.0),
            opacity: self.opacity.value().clamp(0.0, 1.0),
        }
    }

    /// Whether anything of this planet would reach the screen
    pub fn is_drawn(&self) -> bool {
        let params = self.params();
        params.scale > 0.0 && params.opacity > 0.0
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Unscaled radius for a given base unit
    pub fn radius(&self, base_unit: f64) -> f64 {
        base_unit * self.descriptor.size_scale()
    }

    /// Ring geometry, present only for a ringed planet while it is visible
    pub fn ring(&self, base_unit: f64) -> Option<RingParams> {
        if !self.descriptor.ringed || !self.visible {
            return None;
        }
        let radius = self.radius(base_unit);
        Some(RingParams {
            inner_radius: radius * RING_INNER,
            outer_radius: radius * RING_OUTER,
            rotation: self.ring_rotation,
            opacity: self.params().opacity * RING_OPACITY,
        })
    }
}

/// Builds one visual per catalog entry with `current` shown
pub fn build_visuals(
    catalog: &'static [PlanetDescriptor],
    current: usize,
    spring: SpringConfig,
) -> Vec<PlanetVisual> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, descriptor)| PlanetVisual::new(descriptor, index == current, spring))
        .collect()
}
