//! Text overlay: title, instructions, carousel buttons, info panel and debug readout.

use crate::carousel::Direction;
use crate::color::Rgb;
use crate::renderer::Disc;
use crate::scene::Scene;
use crate::terminal::Canvas;

pub const INSTRUCTION: &str = "Use arrow keys or buttons to switch planets. Scroll to zoom in/out.";

const TEXT: Rgb = Rgb::WHITE;
const BUTTON_BG: Rgb = Rgb::new(26, 26, 26);
const BUTTON_HOVER_BG: Rgb = Rgb::new(51, 51, 51);
const BUTTON_BORDER: Rgb = Rgb::new(77, 77, 77);
const PANEL_BG: Rgb = Rgb::new(15, 15, 30);
const PANEL_BORDER: Rgb = Rgb::new(110, 110, 140);

const BUTTON_WIDTH: u16 = 7;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_MARGIN: u16 = 2;
const PANEL_WIDTH: u16 = 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// Fixed screen positions of the interactive elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub columns: u16,
    pub rows: u16,
    pub left_button: Rect,
    pub right_button: Rect,
}

impl Layout {
    /// Buttons sit vertically centred against the left and right edges
    pub fn new(columns: u16, rows: u16) -> Self {
        let y = (rows / 2).saturating_sub(BUTTON_HEIGHT / 2);
        Layout {
            columns,
            rows,
            left_button: Rect {
                x: BUTTON_MARGIN,
                y,
                width: BUTTON_WIDTH,
                height: BUTTON_HEIGHT,
            },
            right_button: Rect {
                x: columns.saturating_sub(BUTTON_MARGIN + BUTTON_WIDTH),
                y,
                width: BUTTON_WIDTH,
                height: BUTTON_HEIGHT,
            },
        }
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<Direction> {
        if self.left_button.contains(column, row) {
            Some(Direction::Backward)
        } else if self.right_button.contains(column, row) {
            Some(Direction::Forward)
        } else {
            None
        }
    }
}

/// Per-frame readings shown in the debug overlay
pub struct DebugInfo {
    pub fps: f64,
    pub light: [f64; 3],
}

/// Whether the pointer rests on the displayed planet
pub fn pointer_over(disc: Option<&Disc>, pointer: Option<(u16, u16)>) -> bool {
    match (disc, pointer) {
        // Each cell holds two pixel rows
        (Some(disc), Some((column, row))) => {
            disc.contains([column as f64 + 0.5, row as f64 * 2.0 + 1.0])
        }
        _ => false,
    }
}

pub fn draw_overlay(
    canvas: &mut Canvas,
    layout: &Layout,
    scene: &Scene,
    disc: Option<&Disc>,
    debug: &DebugInfo,
) {
    draw_centered(canvas, 1, INSTRUCTION);
    let title = scene.carousel().current().name;
    draw_centered(canvas, canvas.height.saturating_sub(3), title);

    let hovered = scene.pointer.and_then(|(column, row)| layout.button_at(column, row));
    draw_button(canvas, &layout.left_button, '←', hovered == Some(Direction::Backward));
    draw_button(canvas, &layout.right_button, '→', hovered == Some(Direction::Forward));

    if let Some(disc) = disc.filter(|_| pointer_over(disc, scene.pointer)) {
        draw_info_panel(canvas, scene, disc);
    }

    if scene.debug {
        draw_debug(canvas, scene, debug);
    }

    if scene.paused {
        draw_centered(canvas, canvas.height / 2, " Paused ");
    }
}

fn draw_centered(canvas: &mut Canvas, row: u16, text: &str) {
    let length = text.chars().count() as u16;
    let x = canvas.width.saturating_sub(length) / 2;
    canvas.put_str(x, row, text, TEXT, Rgb::BLACK);
}

fn draw_button(canvas: &mut Canvas, rect: &Rect, arrow: char, hovered: bool) {
    let bg = if hovered { BUTTON_HOVER_BG } else { BUTTON_BG };
    let border = if hovered { TEXT } else { BUTTON_BORDER };
    canvas.draw_box(rect.x, rect.y, rect.width, rect.height, border, bg);
    canvas.put(rect.x + rect.width / 2, rect.y + rect.height / 2, arrow, TEXT, bg);
}

/// Wraps `text` into lines of at most `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn draw_info_panel(canvas: &mut Canvas, scene: &Scene, disc: &Disc) {
    let planet = scene.carousel().current();
    let inner = PANEL_WIDTH as usize - 4;
    let mut lines = vec![planet.name.to_string(), String::new()];
    lines.extend(wrap(planet.description, inner));
    lines.push(String::new());
    lines.push(format!("Diameter: {}", planet.diameter));
    lines.push(format!("Day Length: {}", planet.day_length));
    lines.push(format!("Year Length: {}", planet.year_length));

    let height = lines.len() as u16 + 2;
    // Anchored half a radius beyond the planet's right edge
    let anchor = disc.center[0] + disc.radius * 1.5;
    let x = (anchor.max(0.0) as u16).min(canvas.width.saturating_sub(PANEL_WIDTH));
    let y = ((disc.center[1] / 2.0) as u16)
        .saturating_sub(height / 2)
        .min(canvas.height.saturating_sub(height));

    canvas.draw_box(x, y, PANEL_WIDTH, height, PANEL_BORDER, PANEL_BG);
    for (offset, line) in lines.iter().enumerate() {
        canvas.put_str(x + 2, y + 1 + offset as u16, line, TEXT, PANEL_BG);
    }
}

fn draw_debug(canvas: &mut Canvas, scene: &Scene, debug: &DebugInfo) {
    let camera = &scene.camera;
    let lines = [
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        format!(
            "Planet: {} ({}/{})",
            scene.carousel().current().name,
            scene.carousel().current_index() + 1,
            scene.carousel().len()
        ),
        format!("Yaw: {:.2}, Pitch: {:.2}", camera.yaw, camera.pitch),
        format!(
            "Light: ({:.2}, {:.2}, {:.2})",
            debug.light[0], debug.light[1], debug.light[2]
        ),
        format!("FPS: {:.2}", debug.fps),
        format!("Zoom: {:.2}", camera.zoom_ratio()),
    ];
    for (row, line) in lines.iter().enumerate() {
        canvas.put_str(1, 3 + row as u16, line, TEXT, Rgb::BLACK);
    }
}
