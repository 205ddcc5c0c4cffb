use crate::color::{apply_lighting, Rgb};
use crate::math::{barycentric, calculate_light_intensity, edge_function, normalize, Vec3};
use crate::texture::Texture;
use crate::vertex::Vertex;

/// Color and depth buffers for one frame
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Rgb>,
    pub depth: Vec<f64>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            depth: vec![f64::INFINITY; width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Writes a single point if it passes the depth test
    pub fn plot(&mut self, x: f64, y: f64, depth: f64, color: Rgb) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = y * self.width + x;
        if depth < self.depth[offset] {
            self.depth[offset] = depth;
            self.pixels[offset] = color;
        }
    }
}

/// Directional light plus ambient term
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    /// Unit vector pointing from the scene towards the light
    pub direction: Vec3,
    pub ambient: f64,
}

/// Surface description used while shading a triangle
pub enum Material<'a> {
    /// Lit surface, textured when a texture is available
    Lit {
        texture: Option<&'a Texture>,
        color: Rgb,
        lighting: Lighting,
    },
    /// Flat color ignoring lights
    Unlit(Rgb),
}

impl Material<'_> {
    fn shade(&self, normal: &Vec3, uv: [f64; 2]) -> Rgb {
        match self {
            Material::Lit {
                texture,
                color,
                lighting,
            } => {
                let base = texture.map_or(*color, |t| t.sample(uv[0], uv[1]));
                let intensity =
                    calculate_light_intensity(normal, &lighting.direction, lighting.ambient);
                apply_lighting(base, intensity)
            }
            Material::Unlit(color) => *color,
        }
    }
}

/// Draws a triangle with per-pixel lighting, blended by `opacity`.
///
/// Both windings are filled so that open surfaces stay visible from behind.
pub fn draw_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    frame: &mut FrameBuffer,
    material: &Material,
    opacity: f64,
) {
    if frame.width == 0 || frame.height == 0 || opacity <= 0.0 {
        return;
    }
    let width = frame.width;
    let height = frame.height;

    // Compute bounding box of the triangle
    let min_x = v0.screen_position[0]
        .min(v1.screen_position[0])
        .min(v2.screen_position[0])
        .floor()
        .max(0.0);
    let max_x = v0.screen_position[0]
        .max(v1.screen_position[0])
        .max(v2.screen_position[0])
        .ceil()
        .min(width as f64 - 1.0);
    let min_y = v0.screen_position[1]
        .min(v1.screen_position[1])
        .min(v2.screen_position[1])
        .floor()
        .max(0.0);
    let max_y = v0.screen_position[1]
        .max(v1.screen_position[1])
        .max(v2.screen_position[1])
        .ceil()
        .min(height as f64 - 1.0);
    if min_x > max_x || min_y > max_y {
        return;
    }

    // Precompute area of the triangle
    let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
    if area == 0.0 {
        return;
    }

    for y in min_y as usize..=max_y as usize {
        for x in min_x as usize..=max_x as usize {
            let p = [x as f64 + 0.5, y as f64 + 0.5];

            // Dividing by the signed area makes the weights positive inside for either winding
            let w = [
                edge_function(&v1.screen_position, &v2.screen_position, &p) / area,
                edge_function(&v2.screen_position, &v0.screen_position, &p) / area,
                edge_function(&v0.screen_position, &v1.screen_position, &p) / area,
            ];
            if w.iter().any(|&weight| weight < 0.0) {
                continue;
            }

            // Depth test
            let depth = barycentric(v0.depth, v1.depth, v2.depth, &w);
            let offset = y * width + x;
            if depth >= frame.depth[offset] {
                continue;
            }
            frame.depth[offset] = depth;

            // Interpolate normal
            let normal = normalize(&[
                barycentric(v0.normal[0], v1.normal[0], v2.normal[0], &w),
                barycentric(v0.normal[1], v1.normal[1], v2.normal[1], &w),
                barycentric(v0.normal[2], v1.normal[2], v2.normal[2], &w),
            ]);
            let uv = [
                barycentric(v0.uv[0], v1.uv[0], v2.uv[0], &w),
                barycentric(v0.uv[1], v1.uv[1], v2.uv[1], &w),
            ];

            let shaded = material.shade(&normal, uv);
            frame.pixels[offset] = if opacity >= 1.0 {
                shaded
            } else {
                shaded.blend_over(frame.pixels[offset], opacity)
            };
        }
    }
}

/// Draws a line between two points in the pixel buffer using Bresenham's algorithm
pub fn draw_line(x0: f64, y0: f64, x1: f64, y1: f64, frame: &mut FrameBuffer, color: Rgb) {
    let (mut x0, mut y0, x1, y1) = (
        x0.round() as isize,
        y0.round() as isize,
        x1.round() as isize,
        y1.round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        if x0 >= 0 && x0 < frame.width as isize && y0 >= 0 && y0 < frame.height as isize {
            let offset = y0 as usize * frame.width + x0 as usize;
            frame.pixels[offset] = color;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
