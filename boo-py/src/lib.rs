//! Python bindings for the boo physics core.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from boo_physics import Game
//!
//! game = Game.from_assets("assets", "test")
//!
//! while game.lives > 0 and not game.cleared:
//!     game.set_pad_position(0.5)
//!     game.advance()          # runs the ticks due since the last call
//!     ball = game.ball()
//!     print(f"Ball at ({ball.x}, {ball.y})")
//!     game.relax()
//! ```

use pyo3::exceptions::{PyFileNotFoundError, PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use boo_core::config::{Config, ConfigError, ConfigLoader};
use boo_core::shapes::{Circle as CoreCircle, Rectangle as CoreRectangle};
use boo_core::timer::FrameTimer;
use boo_core::types::{Side, Vec2 as CoreVec2};
use boo_core::world::{World, WorldEvent};

fn config_error(err: ConfigError) -> PyErr {
    match err {
        ConfigError::NotFound(name) => PyFileNotFoundError::new_err(name),
        ConfigError::IoError(e) => PyIOError::new_err(e.to_string()),
        e @ (ConfigError::ParseError(_) | ConfigError::Invalid(_)) => {
            PyValueError::new_err(e.to_string())
        }
    }
}

/// 2D vector for positions and velocities.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec2 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl Vec2 {
    #[new]
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn __repr__(&self) -> String {
        format!("Vec2({:.4}, {:.4})", self.x, self.y)
    }

    fn magnitude(&self) -> f64 {
        CoreVec2::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<CoreVec2> for Vec2 {
    fn from(v: CoreVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vec2> for CoreVec2 {
    fn from(v: Vec2) -> Self {
        CoreVec2::new(v.x, v.y)
    }
}

/// Read-only axis-aligned rectangle, for drawing bricks and the pad.
#[pyclass(frozen)]
#[derive(Clone, Copy)]
pub struct Rectangle {
    #[pyo3(get)]
    pub xmin: f64,
    #[pyo3(get)]
    pub xmax: f64,
    #[pyo3(get)]
    pub ymin: f64,
    #[pyo3(get)]
    pub ymax: f64,
}

#[pymethods]
impl Rectangle {
    fn __repr__(&self) -> String {
        format!(
            "Rectangle(x=[{:.4}, {:.4}], y=[{:.4}, {:.4}])",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }

    #[getter]
    fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[getter]
    fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    #[getter]
    fn center(&self) -> Vec2 {
        Vec2::new((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }
}

impl From<&CoreRectangle> for Rectangle {
    fn from(r: &CoreRectangle) -> Self {
        Self {
            xmin: r.xmin(),
            xmax: r.xmax(),
            ymin: r.ymin(),
            ymax: r.ymax(),
        }
    }
}

/// Read-only circle, for drawing the ball.
#[pyclass(frozen)]
#[derive(Clone, Copy)]
pub struct Circle {
    #[pyo3(get)]
    pub x: f64,
    #[pyo3(get)]
    pub y: f64,
    #[pyo3(get)]
    pub radius: f64,
}

#[pymethods]
impl Circle {
    fn __repr__(&self) -> String {
        format!("Circle(({:.4}, {:.4}), r={:.4})", self.x, self.y, self.radius)
    }
}

impl From<CoreCircle> for Circle {
    fn from(c: CoreCircle) -> Self {
        Self {
            x: c.center.x,
            y: c.center.y,
            radius: c.radius,
        }
    }
}

fn event_name(event: &WorldEvent) -> String {
    match event {
        WorldEvent::BrickDestroyed(_) => "brick".to_string(),
        WorldEvent::PadHit => "pad".to_string(),
        WorldEvent::WallHit(Side::Left) => "wall:left".to_string(),
        WorldEvent::WallHit(Side::Right) => "wall:right".to_string(),
        WorldEvent::WallHit(Side::Top) => "wall:top".to_string(),
        WorldEvent::BallLost => "lost".to_string(),
    }
}

/// Main game class.
///
/// Owns the world and a frame timer; advances in fixed ticks of `1 / fps`
/// seconds.
#[pyclass]
pub struct Game {
    world: World,
    timer: FrameTimer,
    ticks: u64,
    last_events: Vec<String>,
}

impl Game {
    fn with_world(config: &Config, world: World) -> Self {
        Self {
            world,
            timer: FrameTimer::new(config.fps),
            ticks: 0,
            last_events: Vec::new(),
        }
    }
}

#[pymethods]
impl Game {
    /// Create a game with default settings and the built-in test level.
    #[new]
    fn new() -> Self {
        let config = Config::default();
        let mut world = World::new(&config.world);
        world.setup_test_level();
        Self::with_world(&config, world)
    }

    /// Load `config/default.yaml` and `levels/<level>.yaml` from `path`.
    #[staticmethod]
    fn from_assets(path: &str, level: &str) -> PyResult<Self> {
        let loader = ConfigLoader::new(path);
        let config = loader.load_config("default").map_err(config_error)?;
        let level = loader.load_level(level).map_err(config_error)?;
        let world = World::from_level(&config.world, &level);
        Ok(Self::with_world(&config, world))
    }

    /// Names of the levels available under `path`.
    #[staticmethod]
    fn list_levels(path: &str) -> PyResult<Vec<String>> {
        ConfigLoader::new(path).list_levels().map_err(config_error)
    }

    /// Length of a tick in seconds.
    #[getter]
    fn delta(&self) -> f64 {
        self.timer.delta()
    }

    /// Number of ticks simulated so far.
    #[getter]
    fn ticks(&self) -> u64 {
        self.ticks
    }

    #[getter]
    fn score(&self) -> u32 {
        self.world.score()
    }

    #[getter]
    fn lives(&self) -> u32 {
        self.world.lives()
    }

    #[getter]
    fn cleared(&self) -> bool {
        self.world.is_cleared()
    }

    fn ball(&self) -> Circle {
        self.world.ball().into()
    }

    fn ball_velocity(&self) -> Vec2 {
        self.world.ball_velocity().into()
    }

    fn pad(&self) -> Rectangle {
        self.world.pad().into()
    }

    fn bricks(&self) -> Vec<Rectangle> {
        self.world.bricks().iter().map(Rectangle::from).collect()
    }

    fn arena(&self) -> Rectangle {
        self.world.arena().into()
    }

    /// Move the pad; 0 is against the left wall, 1 against the right.
    fn set_pad_position(&mut self, pos: f64) {
        self.world.set_pad_position(pos);
    }

    /// Set ball position and velocity.
    fn place_ball(&mut self, x: f64, y: f64, vx: f64, vy: f64) {
        self.world
            .place_ball(CoreVec2::new(x, y), CoreVec2::new(vx, vy));
    }

    /// Serve a new ball from the pad.
    fn serve(&mut self) {
        self.world.serve();
    }

    /// Events of the last tick: "brick", "pad", "wall:<side>", "lost".
    fn last_events(&self) -> Vec<String> {
        self.last_events.clone()
    }

    /// Advance the game by one tick.
    fn tick(&mut self) {
        let report = self.world.update(self.timer.delta());
        self.last_events = report.events.iter().map(event_name).collect();
        self.ticks += 1;
    }

    /// Run multiple ticks at once (more efficient).
    fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Run the ticks due since the previous call and return their count.
    fn advance(&mut self) -> u64 {
        let frames = self.timer.tick();
        for _ in 0..frames {
            self.tick();
        }
        frames
    }

    /// Sleep until the next tick is due.
    fn relax(&self, py: Python<'_>) {
        py.allow_threads(|| self.timer.relax());
    }

    /// Restart real-time counting from now.
    fn reset_timer(&mut self) {
        self.timer.reset();
    }

    /// Get current state as dict for easy inspection.
    fn state_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let ball = self.world.ball();
        let vel = self.world.ball_velocity();

        let dict = PyDict::new(py);
        dict.set_item("ticks", self.ticks)?;
        dict.set_item("ball_x", ball.center.x)?;
        dict.set_item("ball_y", ball.center.y)?;
        dict.set_item("ball_vx", vel.x)?;
        dict.set_item("ball_vy", vel.y)?;
        dict.set_item("pad_x", self.world.pad().center().x)?;
        dict.set_item("bricks", self.world.bricks().len())?;
        dict.set_item("score", self.world.score())?;
        dict.set_item("lives", self.world.lives())?;
        Ok(dict)
    }
}

/// Python module definition.
#[pymodule]
fn boo_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec2>()?;
    m.add_class::<Rectangle>()?;
    m.add_class::<Circle>()?;
    m.add_class::<Game>()?;
    Ok(())
}
