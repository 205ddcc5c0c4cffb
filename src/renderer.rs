//! Draws the scene into a frame buffer.

use std::f64::consts::FRAC_PI_2;

use crate::camera::{OrbitCamera, Projection};
use crate::color::Rgb;
use crate::graphics::{draw_line, draw_triangle, FrameBuffer, Lighting, Material};
use crate::math::{
    dot, multiply_matrices, multiply_matrix_vector, normalize, rotation_x, rotation_y, rotation_z,
    scale, Mat3, Vec3,
};
use crate::mesh::Mesh;
use crate::scene::Scene;
use crate::stars::StarField;
use crate::vertex::Vertex;

/// Position of the directional light
const SUN_POSITION: Vec3 = [5.0, 3.0, 5.0];
const AMBIENT: f64 = 0.2;

/// Screen-space circle covered by the displayed planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: [f64; 2],
    pub radius: f64,
}

impl Disc {
    pub fn contains(&self, point: [f64; 2]) -> bool {
        let dx = point[0] - self.center[0];
        let dy = point[1] - self.center[1];
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

pub struct Renderer {
    sphere: Mesh,
    ring_segments: usize,
    stars: StarField,
    lighting: Lighting,
}

/// World units per planet radius step: an eighth of the smaller view extent
pub fn base_unit(camera: &OrbitCamera, width: usize, height: usize) -> f64 {
    if width == 0 || height == 0 {
        return 0.0;
    }
    let (view_width, view_height) = camera.reference_extents(width as f64 / height as f64);
    view_width.min(view_height) / 8.0
}

/// A mesh vertex after projection, with the view facing flag used for culling
struct Projected {
    vertex: Vertex,
    facing: bool,
}

impl Renderer {
    pub fn new(sphere_segments: usize, ring_segments: usize, star_count: usize) -> Self {
        Renderer {
            sphere: Mesh::sphere(sphere_segments),
            ring_segments,
            stars: StarField::generate(star_count),
            lighting: Lighting {
                direction: normalize(&SUN_POSITION),
                ambient: AMBIENT,
            },
        }
    }

    pub fn light_position(&self) -> Vec3 {
        SUN_POSITION
    }

    /// Renders stars, planets and rings; returns the disc of the displayed planet
    pub fn render(&self, scene: &Scene, frame: &mut FrameBuffer) -> Option<Disc> {
        let camera = &scene.camera;
        let view_rotation = camera.rotation();
        let projection = Projection::new(camera, frame.width, frame.height);
        let unit = base_unit(camera, frame.width, frame.height);

        self.draw_stars(camera, &view_rotation, &projection, frame);

        let mut disc = None;
        for (index, visual) in scene.visuals().iter().enumerate() {
            if !visual.is_drawn() {
                continue;
            }
            let params = visual.params();
            let radius = visual.radius(unit) * params.scale;
            let spin = rotation_y(visual.rotation());

            let projected: Vec<Option<Projected>> = self
                .sphere
                .vertices
                .iter()
                .map(|mesh_vertex| {
                    let normal = multiply_matrix_vector(&spin, &mesh_vertex.normal);
                    let world = scale(&multiply_matrix_vector(&spin, &mesh_vertex.position), radius);
                    let view = camera.to_view(&view_rotation, &world);
                    let view_normal = multiply_matrix_vector(&view_rotation, &normal);
                    projection.project(&view).map(|(screen_position, depth)| Projected {
                        vertex: Vertex {
                            screen_position,
                            depth,
                            normal,
                            uv: mesh_vertex.uv,
                        },
                        facing: dot(&view_normal, &scale(&view, -1.0)) > 0.0,
                    })
                })
                .collect();

            let material = Material::Lit {
                texture: scene.texture(index),
                color: visual.descriptor.fallback_color,
                lighting: self.lighting,
            };
            let wire_color = visual.descriptor.fallback_color.blend_over(Rgb::BLACK, params.opacity);

            for &[a, b, c] in &self.sphere.triangles {
                let (Some(a), Some(b), Some(c)) = (&projected[a], &projected[b], &projected[c])
                else {
                    continue;
                };
                if !(a.facing || b.facing || c.facing) {
                    continue;
                }
                if scene.wireframe {
                    for (from, to) in [(a, b), (b, c), (c, a)] {
                        draw_line(
                            from.vertex.screen_position[0],
                            from.vertex.screen_position[1],
                            to.vertex.screen_position[0],
                            to.vertex.screen_position[1],
                            frame,
                            wire_color,
                        );
                    }
                } else {
                    draw_triangle(&a.vertex, &b.vertex, &c.vertex, frame, &material, params.opacity);
                }
            }

            if visual.is_visible() {
                let center = camera.to_view(&view_rotation, &[0.0, 0.0, 0.0]);
                if let Some((screen, depth)) = projection.project(&center) {
                    disc = Some(Disc {
                        center: screen,
                        radius: radius * projection.focal / depth,
                    });
                }
            }
        }

        // Translucent rings go last so they blend over every planet
        for (index, ring) in scene.rings(unit) {
            let group_scale = scene.visuals()[index].params().scale;
            let mesh = Mesh::ring(
                ring.inner_radius * group_scale,
                ring.outer_radius * group_scale,
                self.ring_segments,
            );
            let tilt = multiply_matrices(&rotation_x(FRAC_PI_2), &rotation_z(ring.rotation));
            Self::draw_unlit(&mesh, &tilt, camera, &view_rotation, &projection, frame, ring.opacity);
        }

        disc
    }

    fn draw_stars(
        &self,
        camera: &OrbitCamera,
        view_rotation: &Mat3,
        projection: &Projection,
        frame: &mut FrameBuffer,
    ) {
        for star in &self.stars.stars {
            let view = camera.to_view(view_rotation, &star.position);
            if let Some((screen, depth)) = projection.project(&view) {
                let level = (star.brightness * 255.0) as u8;
                frame.plot(screen[0], screen[1], depth, Rgb::new(level, level, level));
            }
        }
    }

    fn draw_unlit(
        mesh: &Mesh,
        model: &Mat3,
        camera: &OrbitCamera,
        view_rotation: &Mat3,
        projection: &Projection,
        frame: &mut FrameBuffer,
        opacity: f64,
    ) {
        let vertices: Vec<Option<Vertex>> = mesh
            .vertices
            .iter()
            .map(|mesh_vertex| {
                let world = multiply_matrix_vector(model, &mesh_vertex.position);
                let view = camera.to_view(view_rotation, &world);
                projection.project(&view).map(|(screen_position, depth)| Vertex {
                    screen_position,
                    depth,
                    normal: multiply_matrix_vector(model, &mesh_vertex.normal),
                    uv: mesh_vertex.uv,
                })
            })
            .collect();

        let material = Material::Unlit(Rgb::WHITE);
        for &[a, b, c] in &mesh.triangles {
            if let (Some(a), Some(b), Some(c)) = (&vertices[a], &vertices[b], &vertices[c]) {
                draw_triangle(a, b, c, frame, &material, opacity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSettings;
    use crate::carousel::Direction;
    use crate::input::Action;

    const WIDTH: usize = 120;
    const HEIGHT: usize = 80;

    fn settled_scene_at(index: usize) -> Scene {
        let mut scene = Scene::new(0, CameraSettings::default());
        for _ in 0..index {
            scene.apply(Action::Advance(Direction::Forward));
        }
        for _ in 0..150 {
            scene.tick(1.0 / 30.0);
        }
        scene
    }

    fn render(scene: &Scene) -> (FrameBuffer, Option<Disc>) {
        let renderer = Renderer::new(16, 48, 0);
        let mut frame = FrameBuffer::new(WIDTH, HEIGHT);
        let disc = renderer.render(scene, &mut frame);
        (frame, disc)
    }

    /// Screen pixel of a world point on the X-axis
    fn pixel_on_x_axis(scene: &Scene, x: f64) -> (usize, usize) {
        let camera = &scene.camera;
        let projection = Projection::new(camera, WIDTH, HEIGHT);
        let view = camera.to_view(&camera.rotation(), &[x, 0.0, 0.0]);
        let (screen, _) = projection.project(&view).expect("in front of camera");
        (screen[0] as usize, screen[1] as usize)
    }

    #[test]
    fn displayed_planet_covers_the_center() {
        let scene = settled_scene_at(2);
        let (frame, disc) = render(&scene);
        let disc = disc.expect("earth is displayed");
        assert!(disc.contains([WIDTH as f64 / 2.0, HEIGHT as f64 / 2.0]));
        let center = frame.pixel(WIDTH / 2, HEIGHT / 2);
        assert_ne!(center, Rgb::BLACK);
        assert_eq!(frame.pixel(0, 0), Rgb::BLACK);
    }

    #[test]
    fn saturn_ring_is_drawn_only_when_saturn_is_displayed() {
        let saturn = settled_scene_at(5);
        let unit = base_unit(&saturn.camera, WIDTH, HEIGHT);
        let ring_x = saturn.visuals()[5].radius(unit) * 1.5;

        let (x, y) = pixel_on_x_axis(&saturn, ring_x);
        let (frame, _) = render(&saturn);
        assert_ne!(frame.pixel(x, y), Rgb::BLACK);

        for other in [4, 6] {
            let scene = settled_scene_at(other);
            let (x, y) = pixel_on_x_axis(&scene, ring_x);
            let (frame, _) = render(&scene);
            assert_eq!(frame.pixel(x, y), Rgb::BLACK, "ring visible at index {other}");
        }
    }

    #[test]
    fn wireframe_leaves_the_surface_unfilled() {
        let mut scene = settled_scene_at(4);
        scene.apply(Action::ToggleWireframe);
        let (frame, _) = render(&scene);
        let lit = frame.pixels.iter().filter(|&&p| p != Rgb::BLACK).count();
        let (solid, _) = render(&settled_scene_at(4));
        let solid_lit = solid.pixels.iter().filter(|&&p| p != Rgb::BLACK).count();
        assert!(lit > 0);
        assert!(lit < solid_lit);
    }

    #[test]
    fn mercury_disc_is_small() {
        let scene = settled_scene_at(0);
        let (_, disc) = render(&scene);
        let disc = disc.expect("mercury is displayed");
        // Mercury is the smallest planet, so its disc is smaller than a quarter screen
        assert!(disc.radius < HEIGHT as f64 / 4.0);
    }
}
