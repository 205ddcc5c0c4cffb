use crossterm::style::Color;

/// 24-bit color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Blends `self` over `dst` with coverage `alpha` in `[0, 1]`
    pub fn blend_over(self, dst: Rgb, alpha: f64) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| -> u8 {
            (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8
        };
        Rgb::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }

    /// Terminal color for this value
    pub fn to_color(self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Applies lighting to a color
pub fn apply_lighting(color: Rgb, intensity: f64) -> Rgb {
    let r = (color.r as f64 * intensity).min(255.0) as u8;
    let g = (color.g as f64 * intensity).min(255.0) as u8;
    let b = (color.b as f64 * intensity).min(255.0) as u8;
    Rgb::new(r, g, b)
}
