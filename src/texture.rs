//! Planet surface textures and their background loading.

use crate::catalog::PlanetDescriptor;
use crate::color::Rgb;
use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to load texture {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture {0} has no pixels")]
    Empty(PathBuf),
}

/// Decoded RGB image sampled with wrapping horizontal coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Texture {
    /// Builds a texture from row-major pixels
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Option<Self> {
        (width > 0 && height > 0 && pixels.len() == width * height).then_some(Texture {
            width,
            height,
            pixels,
        })
    }

    pub fn load(path: &Path) -> Result<Self, TextureError> {
        let image = image::open(path)
            .map_err(|source| TextureError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();
        let (width, height) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|pixel| Rgb::new(pixel[0], pixel[1], pixel[2]))
            .collect();
        Texture::from_pixels(width as usize, height as usize, pixels)
            .ok_or_else(|| TextureError::Empty(path.to_path_buf()))
    }

    /// Nearest-neighbor lookup; `u` wraps, `v` clamps
    pub fn sample(&self, u: f64, v: f64) -> Rgb {
        let u = u.rem_euclid(1.0);
        let x = ((u * self.width as f64) as usize).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f64) as usize).min(self.height - 1);
        self.pixels[y * self.width + x]
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Result of one background load, tagged with the catalog index
pub type LoadedTexture = (usize, Result<Texture, TextureError>);

/// Starts one loader thread per planet and returns the receiving end.
///
/// Results arrive in completion order, not catalog order.
pub fn spawn_loaders(dir: &Path, catalog: &[PlanetDescriptor]) -> Receiver<LoadedTexture> {
    let (tx, rx) = crossbeam_channel::unbounded();
    for (index, planet) in catalog.iter().enumerate() {
        let path = dir.join(planet.texture);
        let tx: Sender<LoadedTexture> = tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("texture-{}", planet.name.to_lowercase()))
            .spawn(move || {
                debug!(path = %path.display(), "loading texture");
                // The viewer may have quit before the texture finished loading
                let _ = tx.send((index, Texture::load(&path)));
            });
        if let Err(err) = spawned {
            warn!(planet = planet.name, %err, "could not start texture loader");
        }
    }
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    fn checker() -> Texture {
        let pixels = vec![Rgb::WHITE, Rgb::BLACK, Rgb::BLACK, Rgb::WHITE];
        Texture::from_pixels(2, 2, pixels).expect("valid dimensions")
    }

    #[test]
    fn sampling_wraps_horizontally_and_clamps_vertically() {
        let texture = checker();
        assert_eq!(texture.sample(0.25, 0.25), Rgb::WHITE);
        assert_eq!(texture.sample(0.75, 0.25), Rgb::BLACK);
        assert_eq!(texture.sample(1.25, 0.25), Rgb::WHITE);
        assert_eq!(texture.sample(-0.25, 0.75), Rgb::WHITE);
        assert_eq!(texture.sample(0.25, 1.0), Rgb::BLACK);
        assert_eq!(texture.sample(0.25, -3.0), Rgb::WHITE);
    }

    #[test]
    fn mismatched_pixel_count_is_rejected() {
        assert!(Texture::from_pixels(3, 2, vec![Rgb::BLACK; 5]).is_none());
        assert!(Texture::from_pixels(0, 0, Vec::new()).is_none());
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tiny.png");
        let image = image::RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]));
        image.save(&path).expect("write png");

        let texture = Texture::load(&path).expect("decodes");
        assert_eq!(texture.dimensions(), (4, 2));
        assert_eq!(texture.sample(0.5, 0.5), Rgb::new(10, 20, 30));
    }

    #[test]
    fn every_planet_reports_a_result_even_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let rx = spawn_loaders(dir.path(), &CATALOG);
        let mut seen: Vec<usize> = rx
            .iter()
            .take(CATALOG.len())
            .map(|(index, result)| {
                assert!(matches!(result, Err(TextureError::Decode { .. })));
                index
            })
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..CATALOG.len()).collect::<Vec<_>>());
    }
}
