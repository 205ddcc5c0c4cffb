//! Application state: the carousel and everything derived from it.

use crossbeam_channel::{Receiver, TryRecvError};
use tracing::{debug, info, warn};

use crate::camera::{CameraSettings, OrbitCamera};
use crate::carousel::Carousel;
use crate::catalog::CATALOG;
use crate::input::Action;
use crate::spring::SpringConfig;
use crate::texture::{LoadedTexture, Texture};
use crate::visual::{build_visuals, PlanetVisual, RingParams};

pub struct Scene {
    /// Index of the displayed planet
    carousel: Carousel,
    /// Animated state per catalog entry, in catalog order
    visuals: Vec<PlanetVisual>,
    /// Viewpoint shared by every planet
    pub camera: OrbitCamera,
    /// Loaded surface textures, `None` until one arrives
    textures: Vec<Option<Texture>>,
    /// Pending texture loads, dropped once every loader has finished
    texture_source: Option<Receiver<LoadedTexture>>,
    /// Last known pointer cell
    pub pointer: Option<(u16, u16)>,
    /// Stops self-rotation, not the fades
    pub paused: bool,
    /// Shows the debug readout
    pub debug: bool,
    /// Draws planets as triangle outlines
    pub wireframe: bool,
    /// Cleared when the user quits
    running: bool,
}

impl Scene {
    pub fn new(start: usize, camera: CameraSettings) -> Self {
        let carousel = Carousel::new(start);
        let visuals = build_visuals(&CATALOG, carousel.current_index(), SpringConfig::default());
        Scene {
            carousel,
            visuals,
            camera: OrbitCamera::new(camera),
            textures: vec![None; CATALOG.len()],
            texture_source: None,
            pointer: None,
            paused: false,
            debug: false,
            wireframe: false,
            running: true,
        }
    }

    /// Installs textures as they arrive from `source`
    pub fn with_texture_source(mut self, source: Receiver<LoadedTexture>) -> Self {
        self.texture_source = Some(source);
        self
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Advance(direction) => {
                self.carousel.advance(direction);
                self.sync_visibility();
                info!(
                    index = self.carousel.current_index(),
                    planet = self.carousel.current().name,
                    "showing planet"
                );
            }
            Action::Zoom(factor) => self.camera.zoom(factor),
            Action::Orbit { yaw, pitch } => self.camera.orbit(yaw, pitch),
            Action::Pointer(col, row) => self.pointer = Some((col, row)),
            Action::TogglePause => self.paused = !self.paused,
            Action::ToggleDebug => self.debug = !self.debug,
            Action::ToggleWireframe => self.wireframe = !self.wireframe,
            Action::ResetCamera => self.camera.reset(),
            Action::Quit => self.running = false,
        }
    }

    fn sync_visibility(&mut self) {
        for (index, visual) in self.visuals.iter_mut().enumerate() {
            visual.set_visible(self.carousel.is_current(index));
        }
    }

    /// Advances animations by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        for visual in &mut self.visuals {
            visual.tick(dt, self.paused);
        }
    }

    /// Drains finished texture loads without blocking
    pub fn poll_textures(&mut self) {
        let Some(source) = &self.texture_source else {
            return;
        };
        loop {
            match source.try_recv() {
                Ok((index, Ok(texture))) => {
                    let (width, height) = texture.dimensions();
                    debug!(planet = CATALOG[index].name, width, height, "texture ready");
                    self.textures[index] = Some(texture);
                }
                Ok((index, Err(err))) => {
                    warn!(planet = CATALOG[index].name, %err, "using fallback color");
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.texture_source = None;
                    break;
                }
            }
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn visuals(&self) -> &[PlanetVisual] {
        &self.visuals
    }

    pub fn texture(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index).and_then(Option::as_ref)
    }

    /// Rings to draw this frame, tagged with their planet index
    pub fn rings(&self, base_unit: f64) -> Vec<(usize, RingParams)> {
        self.visuals
            .iter()
            .enumerate()
            .filter_map(|(index, visual)| visual.ring(base_unit).map(|ring| (index, ring)))
            .collect()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
