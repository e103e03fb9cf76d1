use std::time::Duration;

use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{
    clock::GameClock,
    collision::{self, CollisionKind},
    direction::{Axis, Direction},
    input::TurnInputBuffer,
    snake::{Position, SnakeBody},
    spawner::{BerrySpawner, RandomSource},
};
use crate::config::GameConfig;
use crate::error::GameError;

/// Something the presentation side may want to react to (sound, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BerryEaten,
    Collision(CollisionKind),
    ScoreChanged(u32),
    GameOver,
}

/// Overall game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GameState {
    running: bool,
    score: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            running: true,
            score: 0,
        }
    }
}

/// Owns the whole simulation and advances it one tick at a time
pub struct GameLoop<R: RandomSource = StdRng> {
    config: GameConfig,
    spawner: BerrySpawner,
    rng: R,
    clock: GameClock,
    input: TurnInputBuffer,
    snake: SnakeBody,
    direction: Direction,
    berry: Position,
    state: GameState,
    ticks: u64,
}

impl<R: RandomSource> GameLoop<R> {
    /// Start a game with the configured snake and a freshly spawned berry
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let spawner = spawner_for(&config);
        let direction = Direction::default();
        let snake = starting_snake(&config, direction);
        let berry = spawner.spawn(snake.segments(), snake.head(), &mut rng)?;

        Ok(Self {
            clock: GameClock::new(config.tick_interval()),
            config,
            spawner,
            rng,
            input: TurnInputBuffer::new(),
            snake,
            direction,
            berry,
            state: GameState::default(),
            ticks: 0,
        })
    }

    /// Start from an explicit snake, heading and berry.
    ///
    /// Every segment and the berry must lie on the grid, and the berry must
    /// not sit on the snake.
    pub fn from_parts(
        config: GameConfig,
        rng: R,
        snake: SnakeBody,
        direction: Direction,
        berry: Position,
    ) -> Result<Self, GameError> {
        config.validate()?;

        if let Some(pos) = snake
            .segments()
            .iter()
            .find(|&&pos| !on_grid(&config, pos))
        {
            return Err(GameError::InvalidConfig(format!(
                "snake segment ({}, {}) is outside the {}x{} grid",
                pos.x, pos.z, config.grid_width, config.grid_height
            )));
        }
        if !on_grid(&config, berry) {
            return Err(GameError::InvalidConfig(format!(
                "berry ({}, {}) is outside the {}x{} grid",
                berry.x, berry.z, config.grid_width, config.grid_height
            )));
        }
        if snake.contains(berry) {
            return Err(GameError::InvalidConfig(format!(
                "berry ({}, {}) sits on the snake",
                berry.x, berry.z
            )));
        }

        Ok(Self {
            clock: GameClock::new(config.tick_interval()),
            spawner: spawner_for(&config),
            config,
            rng,
            input: TurnInputBuffer::new(),
            snake,
            direction,
            berry,
            state: GameState::default(),
            ticks: 0,
        })
    }

    /// Record one frame's raw axis sample
    pub fn set_input(&mut self, axis: Axis, value: f32) {
        self.input.record(axis, value);
    }

    /// Advance the clock by one frame and run a tick if one is due
    pub fn tick(&mut self, elapsed: Duration) -> Result<Vec<GameEvent>, GameError> {
        if self.clock.advance(elapsed) {
            self.step()
        } else {
            Ok(Vec::new())
        }
    }

    /// Run one simulation tick right away
    pub fn step(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        let turn = self.input.consume_and_clear();
        let direction = self.direction.resolve(turn);
        if direction != self.direction {
            debug!(from = ?self.direction, to = ?direction, "turned");
        }
        self.direction = direction;

        if !self.state.running {
            return Ok(events);
        }

        if let Some(kind) = collision::detect(
            self.snake.head(),
            self.direction,
            self.snake.segments(),
            self.config.grid_width,
            self.config.grid_height,
        ) {
            self.state.running = false;
            info!(?kind, score = self.state.score, ticks = self.ticks, "game over");
            events.push(GameEvent::Collision(kind));
            events.push(GameEvent::GameOver);
            return Ok(events);
        }

        self.snake.shift(self.direction);
        self.ticks += 1;
        self.check_berry(&mut events)?;

        Ok(events)
    }

    /// Eat the berry if the head sits on it. The replacement berry is chosen
    /// against the body before it grows.
    fn check_berry(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        if self.snake.head() != self.berry {
            return Ok(());
        }

        let next = match self
            .spawner
            .spawn(self.snake.segments(), self.snake.head(), &mut self.rng)
        {
            Ok(pos) => pos,
            Err(err) => {
                self.state.running = false;
                return Err(err);
            }
        };
        self.berry = next;

        self.snake.grow(self.config.growth_per_berry);
        self.state.score += 1;
        debug!(
            score = self.state.score,
            length = self.snake.len(),
            "berry eaten"
        );

        events.push(GameEvent::BerryEaten);
        events.push(GameEvent::ScoreChanged(self.state.score));
        Ok(())
    }

    /// Throw away the current game and start a fresh one
    pub fn restart(&mut self) -> Result<(), GameError> {
        let direction = Direction::default();
        let snake = starting_snake(&self.config, direction);
        let berry = self
            .spawner
            .spawn(snake.segments(), snake.head(), &mut self.rng)?;

        self.snake = snake;
        self.direction = direction;
        self.berry = berry;
        self.state = GameState::default();
        self.input = TurnInputBuffer::new();
        self.clock.reset();
        self.ticks = 0;

        info!("game restarted");
        Ok(())
    }

    pub fn segments(&self) -> &[Position] {
        self.snake.segments()
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn berry(&self) -> Position {
        self.berry
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Moves made since the game started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn spawner_for(config: &GameConfig) -> BerrySpawner {
    BerrySpawner::new(
        config.grid_width,
        config.grid_height,
        config.spawn_min_distance,
    )
}

fn on_grid(config: &GameConfig, pos: Position) -> bool {
    let in_x = usize::try_from(pos.x).map_or(false, |x| x < config.grid_width);
    let in_z = usize::try_from(pos.z).map_or(false, |z| z < config.grid_height);
    in_x && in_z
}

fn starting_snake(config: &GameConfig, direction: Direction) -> SnakeBody {
    SnakeBody::straight(
        Position::new(config.start_x, config.start_z),
        direction,
        config.initial_length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Sign;
    use rand::SeedableRng;

    const UP: Direction = Direction::Z(Sign::Positive);
    const DOWN: Direction = Direction::Z(Sign::Negative);
    const RIGHT: Direction = Direction::X(Sign::Positive);

    fn cells(points: &[(i32, i32)]) -> SnakeBody {
        SnakeBody::from_segments(points.iter().map(|&(x, z)| Position::new(x, z)).collect())
            .unwrap()
    }

    fn scenario(points: &[(i32, i32)], direction: Direction, berry: (i32, i32)) -> GameLoop {
        GameLoop::from_parts(
            GameConfig::default(),
            StdRng::seed_from_u64(11),
            cells(points),
            direction,
            Position::new(berry.0, berry.1),
        )
        .unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = GameLoop::new(GameConfig::default(), StdRng::seed_from_u64(1)).unwrap();
        assert!(game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.segments().len(), 5);
        assert_eq!(game.segments()[0], Position::new(10, 10));
        assert_eq!(game.segments()[4], Position::new(10, 6));
        assert_eq!(game.direction(), UP);
        assert!(!game.segments().contains(&game.berry()));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            grid_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameLoop::new(config, StdRng::seed_from_u64(1)),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_safe_step_moves_without_growing() {
        let mut game = scenario(&[(5, 5), (5, 4), (5, 3)], UP, (15, 15));
        let events = game.step().unwrap();

        assert!(events.is_empty());
        assert_eq!(game.ticks(), 1);
        assert_eq!(
            game.segments(),
            &[Position::new(5, 6), Position::new(5, 5), Position::new(5, 4)]
        );
    }

    #[test]
    fn test_wall_hit_stops_the_game() {
        let mut game = scenario(&[(19, 10), (18, 10)], RIGHT, (3, 3));
        let events = game.step().unwrap();

        assert_eq!(
            events,
            vec![GameEvent::Collision(CollisionKind::Wall), GameEvent::GameOver]
        );
        assert!(!game.is_running());
        assert_eq!(game.segments()[0], Position::new(19, 10));

        // Nothing moves until restart
        assert!(game.step().unwrap().is_empty());
        assert_eq!(game.segments()[0], Position::new(19, 10));
        assert_eq!(game.ticks(), 0);
    }

    #[test]
    fn test_running_into_the_tail_cell_is_fatal() {
        let mut game = scenario(&[(5, 5), (5, 4), (5, 6)], DOWN, (15, 15));
        let events = game.step().unwrap();
        assert_eq!(events[0], GameEvent::Collision(CollisionKind::SelfCollision));
        assert!(!game.is_running());
    }

    #[test]
    fn test_buffered_turn_applies_on_next_step() {
        let mut game = scenario(&[(5, 5), (5, 4), (5, 3)], UP, (15, 15));
        game.set_input(Axis::Horizontal, 1.0);
        game.set_input(Axis::Horizontal, 0.0);
        game.step().unwrap();
        assert_eq!(game.direction(), RIGHT);
        assert_eq!(game.segments()[0], Position::new(6, 5));

        // Buffer was cleared by the previous step
        game.step().unwrap();
        assert_eq!(game.direction(), RIGHT);
    }

    #[test]
    fn test_reversal_input_is_ignored() {
        let mut game = scenario(&[(5, 5), (5, 4), (5, 3)], UP, (15, 15));
        game.set_input(Axis::Vertical, -1.0);
        game.step().unwrap();
        assert_eq!(game.direction(), UP);
        assert!(game.is_running());
    }

    #[test]
    fn test_eating_a_berry() {
        let mut game = scenario(&[(5, 5), (5, 4), (5, 3)], UP, (5, 6));
        let events = game.step().unwrap();

        assert_eq!(
            events,
            vec![GameEvent::BerryEaten, GameEvent::ScoreChanged(1)]
        );
        assert_eq!(game.score(), 1);
        assert_eq!(game.segments().len(), 6);
        assert_eq!(&game.segments()[2..], &[Position::new(5, 4); 4]);

        let pre_growth = [Position::new(5, 6), Position::new(5, 5), Position::new(5, 4)];
        assert!(!pre_growth.contains(&game.berry()));
    }

    #[test]
    fn test_tick_waits_for_the_clock() {
        let mut game = scenario(&[(5, 5), (5, 4)], UP, (15, 15));
        let frame = Duration::from_millis(50);

        for _ in 0..3 {
            game.tick(frame).unwrap();
        }
        assert_eq!(game.ticks(), 0);

        game.tick(frame).unwrap();
        assert_eq!(game.ticks(), 1);
        assert_eq!(game.segments()[0], Position::new(5, 6));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = scenario(&[(19, 10), (18, 10)], RIGHT, (5, 6));
        game.step().unwrap();
        assert!(!game.is_running());

        game.set_input(Axis::Horizontal, -1.0);
        game.restart().unwrap();

        assert!(game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.ticks(), 0);
        assert_eq!(game.direction(), UP);
        assert_eq!(
            game.segments(),
            &[
                Position::new(10, 10),
                Position::new(10, 9),
                Position::new(10, 8),
                Position::new(10, 7),
                Position::new(10, 6),
            ]
        );
        assert!(!game.segments().contains(&game.berry()));

        // Input buffered before the restart does not leak into the new game
        game.step().unwrap();
        assert_eq!(game.direction(), UP);
    }

    fn parts(points: &[(i32, i32)], berry: (i32, i32)) -> Result<GameLoop, GameError> {
        GameLoop::from_parts(
            GameConfig::default(),
            StdRng::seed_from_u64(11),
            cells(points),
            UP,
            Position::new(berry.0, berry.1),
        )
    }

    #[test]
    fn test_from_parts_rejects_off_grid_snake() {
        assert!(matches!(
            parts(&[(40, 40), (40, 39)], (3, 3)),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            parts(&[(5, 5), (5, -1)], (3, 3)),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_parts_rejects_head_at_the_edge_of_i32() {
        assert!(matches!(
            parts(&[(0, i32::MAX)], (3, 3)),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_parts_rejects_misplaced_berry() {
        // On the body
        assert!(matches!(
            parts(&[(5, 5), (5, 4)], (5, 4)),
            Err(GameError::InvalidConfig(_))
        ));
        // Off the grid
        assert!(matches!(
            parts(&[(5, 5), (5, 4)], (20, 3)),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(parts(&[(5, 5), (5, 4)], (19, 19)).is_ok());
    }

    #[test]
    fn test_eating_the_last_free_cell_fills_the_board() {
        let config = GameConfig {
            grid_width: 2,
            grid_height: 3,
            initial_length: 3,
            start_x: 0,
            start_z: 2,
            ..Default::default()
        };
        // Growth still stacked on the tail, so the shift frees no cell
        let mut game = GameLoop::from_parts(
            config,
            StdRng::seed_from_u64(11),
            cells(&[(0, 1), (0, 0), (1, 0), (1, 1), (1, 2), (1, 2)]),
            UP,
            Position::new(0, 2),
        )
        .unwrap();

        assert_eq!(game.step(), Err(GameError::BoardFull));
        assert!(!game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().head(), Position::new(0, 2));

        // A stopped game stays put
        assert!(game.step().unwrap().is_empty());
        assert_eq!(game.snake().head(), Position::new(0, 2));
        assert_eq!(game.ticks(), 1);
    }
}
