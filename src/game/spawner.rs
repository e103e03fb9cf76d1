use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use super::snake::Position;
use crate::error::GameError;

/// Source of uniformly distributed indices for the shuffle
pub trait RandomSource {
    /// A uniform draw from `0..=max`
    fn index_up_to(&mut self, max: usize) -> usize;
}

impl RandomSource for StdRng {
    fn index_up_to(&mut self, max: usize) -> usize {
        self.gen_range(0..=max)
    }
}

/// Picks berry cells away from the snake
#[derive(Debug, Clone)]
pub struct BerrySpawner {
    width: usize,
    height: usize,
    min_distance: f64,
}

impl BerrySpawner {
    pub fn new(width: usize, height: usize, min_distance: f64) -> Self {
        Self {
            width,
            height,
            min_distance,
        }
    }

    /// Choose the next berry cell. Never returns a cell listed in `body`.
    pub fn spawn<R: RandomSource + ?Sized>(
        &self,
        body: &[Position],
        head: Position,
        rng: &mut R,
    ) -> Result<Position, GameError> {
        let mut candidates = self.free_cells(body);
        shuffle(&mut candidates, rng);
        let berry = self
            .select(&candidates, head)
            .ok_or(GameError::BoardFull)?;
        debug!(
            x = berry.x,
            z = berry.z,
            free = candidates.len(),
            "berry spawned"
        );
        Ok(berry)
    }

    /// Every cell not covered by the body, column by column
    pub fn free_cells(&self, body: &[Position]) -> Vec<Position> {
        let mut occupied = vec![false; self.width * self.height];
        for pos in body {
            if let Some(idx) = self.index_of(*pos) {
                occupied[idx] = true;
            }
        }

        let mut free = Vec::with_capacity(occupied.len());
        for x in 0..self.width {
            for z in 0..self.height {
                if !occupied[x * self.height + z] {
                    free.push(Position::new(x as i32, z as i32));
                }
            }
        }
        free
    }

    /// First candidate at least `min_distance` from `head`, else the farthest one.
    ///
    /// The farthest cell is tracked by the same pass that looks for the first
    /// far-enough cell; when nothing qualifies that pass has seen every
    /// candidate, so the fallback is the global maximum. `None` only when
    /// there are no candidates at all.
    pub fn select(&self, candidates: &[Position], head: Position) -> Option<Position> {
        let mut farthest: Option<(Position, f64)> = None;

        for &cell in candidates {
            let distance = cell.distance_to(head);
            if distance >= self.min_distance {
                return Some(cell);
            }
            if farthest.map_or(true, |(_, best)| distance > best) {
                farthest = Some((cell, distance));
            }
        }

        farthest.map(|(cell, _)| cell)
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let z = usize::try_from(pos.z).ok()?;
        (x < self.width && z < self.height).then(|| x * self.height + z)
    }
}

/// Fisher-Yates shuffle driven by `rng`
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.index_up_to(i);
        items.swap(i, j);
    }
}
