use glam::Vec2;

/// Circle test used for every collision in the game: centres closer than
/// the mean of the two sizes.
pub fn circles_overlap(a: Vec2, a_size: f32, b: Vec2, b_size: f32) -> bool {
    a.distance(b) < (a_size + b_size) / 2.0
}

/// Unit vector from `from` toward `to`; `None` when the points coincide.
pub fn aim_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

pub fn rotate(dir: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(dir)
}

pub fn inside_field(pos: Vec2, field: Vec2) -> bool {
    pos.x >= 0.0 && pos.x <= field.x && pos.y >= 0.0 && pos.y <= field.y
}
