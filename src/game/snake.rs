use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dz) = direction.delta();
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Euclidean distance between two cell centers
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dz = f64::from(self.z - other.z);
        dx.hypot(dz)
    }
}

/// The snake's segments, head at index 0 and tail last
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeBody {
    segments: Vec<Position>,
}

impl SnakeBody {
    /// A straight snake whose body trails behind the head, opposite to `direction`
    pub fn straight(head: Position, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let mut segments = Vec::with_capacity(length.max(1));
        segments.push(head);
        for i in 1..length {
            let prev = segments[i - 1];
            segments.push(prev.moved_in_direction(back));
        }
        Self { segments }
    }

    /// Build a body from explicit positions. Returns `None` for an empty list.
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self { segments })
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Advance one cell: every segment takes the place of the one ahead of
    /// it, then the head steps in `direction`.
    pub fn shift(&mut self, direction: Direction) {
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] = self.segments[0].moved_in_direction(direction);
    }

    /// Stack `count` new segments on the tail cell; they spread out over
    /// the following shifts.
    pub fn grow(&mut self, count: usize) {
        let tail = self.tail();
        self.segments.extend(std::iter::repeat(tail).take(count));
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a body keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
