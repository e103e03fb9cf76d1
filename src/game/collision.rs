use super::direction::Direction;
use super::snake::Position;

/// Type of collision that ends the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Snake left the grid
    Wall,
    /// Snake ran into one of its own segments
    SelfCollision,
}

/// Classify the move of `head` one step in `direction`.
///
/// `body` must be the pre-shift body: the tail still holds its cell, so
/// moving onto it counts as a hit.
pub fn detect(
    head: Position,
    direction: Direction,
    body: &[Position],
    width: usize,
    height: usize,
) -> Option<CollisionKind> {
    let next = head.moved_in_direction(direction);

    let in_x = next.x >= 0 && (next.x as i64) < width as i64;
    let in_z = next.z >= 0 && (next.z as i64) < height as i64;
    if !in_x || !in_z {
        return Some(CollisionKind::Wall);
    }

    if body.contains(&next) {
        return Some(CollisionKind::SelfCollision);
    }

    None
}

pub fn will_collide(
    head: Position,
    direction: Direction,
    body: &[Position],
    width: usize,
    height: usize,
) -> bool {
    detect(head, direction, body, width, height).is_some()
}
