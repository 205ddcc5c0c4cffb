//! The fixed, ordered list of planets the viewer cycles through.

use crate::color::Rgb;

/// Static description of one planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetDescriptor {
    pub name: &'static str,
    /// Texture file name, relative to the configured texture directory
    pub texture: &'static str,
    /// Size relative to Earth, before cube-root scaling
    pub relative_size: f64,
    pub description: &'static str,
    pub diameter: &'static str,
    pub day_length: &'static str,
    pub year_length: &'static str,
    /// Draws an annulus around the equator
    pub ringed: bool,
    /// Surface color used until (or instead of) the texture
    pub fallback_color: Rgb,
}

impl PlanetDescriptor {
    /// Size scale applied to the base unit
    pub fn size_scale(&self) -> f64 {
        self.relative_size.cbrt()
    }
}

pub const CATALOG: [PlanetDescriptor; 8] = [
    PlanetDescriptor {
        name: "Mercury",
        texture: "mercury.jpeg",
        relative_size: 0.383,
        description: "The smallest planet in our solar system and closest to the Sun",
        diameter: "4,879 km",
        day_length: "59 Earth days",
        year_length: "88 Earth days",
        ringed: false,
        fallback_color: Rgb::new(151, 151, 159),
    },
    PlanetDescriptor {
        name: "Venus",
        texture: "venus.jpeg",
        relative_size: 0.949,
        description: "Often called Earth's twin because of their similar size and structure",
        diameter: "12,104 km",
        day_length: "243 Earth days",
        year_length: "225 Earth days",
        ringed: false,
        fallback_color: Rgb::new(227, 187, 118),
    },
    PlanetDescriptor {
        name: "Earth",
        texture: "earth.jpeg",
        relative_size: 1.0,
        description: "Our home planet and the only known place in the universe confirmed to host life",
        diameter: "12,742 km",
        day_length: "24 hours",
        year_length: "365.25 days",
        ringed: false,
        fallback_color: Rgb::new(60, 110, 200),
    },
    PlanetDescriptor {
        name: "Mars",
        texture: "mars.jpeg",
        relative_size: 0.532,
        description: "The Red Planet, known for its reddish appearance due to iron oxide on its surface",
        diameter: "6,779 km",
        day_length: "24.6 hours",
        year_length: "687 Earth days",
        ringed: false,
        fallback_color: Rgb::new(193, 68, 14),
    },
    PlanetDescriptor {
        name: "Jupiter",
        texture: "jupiter.jpeg",
        relative_size: 11.21,
        description: "The largest planet in our solar system, a gas giant with a Great Red Spot",
        diameter: "139,820 km",
        day_length: "9.93 hours",
        year_length: "11.86 Earth years",
        ringed: false,
        fallback_color: Rgb::new(201, 144, 57),
    },
    PlanetDescriptor {
        name: "Saturn",
        texture: "saturn.jpeg",
        relative_size: 9.45,
        description: "Known for its prominent ring system, composed mainly of ice particles",
        diameter: "116,460 km",
        day_length: "10.7 hours",
        year_length: "29.46 Earth years",
        ringed: true,
        fallback_color: Rgb::new(226, 191, 125),
    },
    PlanetDescriptor {
        name: "Uranus",
        texture: "uranus.jpeg",
        relative_size: 4.01,
        description: "An ice giant with a tilted rotation axis, causing extreme seasons",
        diameter: "50,724 km",
        day_length: "17.24 hours",
        year_length: "84 Earth years",
        ringed: false,
        fallback_color: Rgb::new(147, 205, 241),
    },
    PlanetDescriptor {
        name: "Neptune",
        texture: "neptune.jpeg",
        relative_size: 3.88,
        description: "The windiest planet in our solar system, with dark spots and blue color",
        diameter: "49,244 km",
        day_length: "16.11 hours",
        year_length: "164.79 Earth years",
        ringed: false,
        fallback_color: Rgb::new(63, 84, 186),
    },
];

/// Resolves a planet by case-insensitive name or by catalog index
pub fn find(query: &str) -> Option<usize> {
    let query = query.trim();
    if let Ok(index) = query.parse::<usize>() {
        return (index < CATALOG.len()).then_some(index);
    }
    CATALOG
        .iter()
        .position(|planet| planet.name.eq_ignore_ascii_case(query))
}
