/// Vertex structure with screen position, depth, world normal and texture coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub screen_position: [f64; 2],
    pub depth: f64,
    pub normal: [f64; 3],
    pub uv: [f64; 2],
}
