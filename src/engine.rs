//=========================================================================
// Aetheric Engine
//
// Main entry point and frame loop coordinator.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(game)──>  Engine  ──run()──>  [Frame Loop]
//         │                              │
//         ├─ with_name()                 ├─ SignalPump  → InputTracker / EventBus
//         ├─ with_target_fps()           ├─ Game::update / Game::render
//         └─ with_signal_capacity()      └─ InputTracker::update (last)
// ```
//
// Frame order: pump signals → (unless suspended) clock, update, render,
// pacing → input snapshot. Input must be advanced last so the game can
// compare "is down" with "was down" during its own update.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, error, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::clock::Clock;
use crate::core::event::{
    shared_listener, Event, EventBus, EventCode, EventContext, ObjectId, SharedListener,
};
use crate::core::input::{InputTracker, Key};
use crate::core::memory::{MemoryStats, MemoryTag};
use crate::core::platform_bridge::{signal_channel, SignalPump, SignalSender, TickControl};

//=== Constants ===========================================================

/// Sleep between loop iterations while the window is minimized.
const SUSPENDED_SLEEP: Duration = Duration::from_millis(10);

/// Slack left when sleeping for frame pacing.
const PACING_SLACK_SECONDS: f64 = 0.001;

/// Lowest accepted target frame rate (one frame per second).
const MIN_TARGET_FPS: f64 = 1.0;

//=== EngineError =========================================================

/// Engine creation and runtime errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `run()` was called on an engine that already ran its loop.
    #[error("engine loop already ran; build a new engine to run again")]
    AlreadyRun,

    /// A core subsystem refused to start.
    #[error("{0} failed to initialize")]
    Subsystem(&'static str),

    /// A game callback reported failure.
    #[error("game failure: {0}")]
    Game(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::Game`].
    pub fn game(reason: impl Into<String>) -> Self {
        Self::Game(reason.into())
    }
}

//=== Game ================================================================

/// Everything a game callback may touch during a frame.
pub struct FrameContext<'a> {
    /// Event bus; listeners may be registered and events fired.
    pub bus: &'a EventBus,

    /// Input snapshots for this frame.
    pub input: &'a InputTracker,

    /// Number of completed frames before this one.
    pub frame: u64,
}

/// Game hooks driven by the engine.
///
/// Returning an error from `initialize`, `update` or `render` stops the
/// engine and surfaces the error from [`EngineBuilder::build`] or
/// [`Engine::run`].
pub trait Game {
    /// Called once after the core subsystems are up.
    fn initialize(&mut self, _ctx: &FrameContext<'_>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Advances game state by `delta_time` seconds.
    fn update(&mut self, ctx: &FrameContext<'_>, delta_time: f64) -> Result<(), EngineError>;

    /// Produces the frame.
    fn render(&mut self, ctx: &FrameContext<'_>, delta_time: f64) -> Result<(), EngineError>;

    /// Called with the start size after initialization and on every
    /// non-zero resize.
    fn on_resize(&mut self, _width: u32, _height: u32) {}
}

//=== EngineConfig ========================================================

/// Application settings collected by [`EngineBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub name: String,
    pub start_x: i32,
    pub start_y: i32,
    pub start_width: u32,
    pub start_height: u32,
    pub target_fps: f64,
    pub frame_limit: bool,
    pub signal_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: String::from("Aetheric Engine"),
            start_x: 100,
            start_y: 100,
            start_width: 1280,
            start_height: 720,
            target_fps: 60.0,
            frame_limit: false,
            signal_capacity: 128,
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Name**: "Aetheric Engine"
/// - **Start position**: (100, 100)
/// - **Start size**: 1280 × 720
/// - **Target FPS**: 60.0
/// - **Frame limiting**: off
/// - **Signal capacity**: 128 signals
///
/// # Examples
///
/// ```no_run
/// use aetheric_core::prelude::*;
///
/// struct Demo;
///
/// impl Game for Demo {
///     fn update(&mut self, ctx: &FrameContext<'_>, _dt: f64) -> Result<(), EngineError> {
///         if ctx.input.is_key_down(Key::Q) {
///             ctx.bus.fire(EventCode::APPLICATION_QUIT, None, EventContext::new());
///         }
///         Ok(())
///     }
///
///     fn render(&mut self, _ctx: &FrameContext<'_>, _dt: f64) -> Result<(), EngineError> {
///         Ok(())
///     }
/// }
///
/// let mut engine = EngineBuilder::new()
///     .with_name("Demo")
///     .with_target_fps(120.0)
///     .with_frame_limit(true)
///     .build(Demo)?;
/// engine.run()?;
/// # Ok::<(), EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Sets the application name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Sets the requested window position.
    pub fn with_start_position(mut self, x: i32, y: i32) -> Self {
        self.config.start_x = x;
        self.config.start_y = y;
        self
    }

    /// Sets the initial drawable size, reported to [`Game::on_resize`]
    /// right after initialization.
    pub fn with_start_size(mut self, width: u32, height: u32) -> Self {
        self.config.start_width = width;
        self.config.start_height = height;
        self
    }

    /// Sets the frame rate used for pacing.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0`, if it is below one frame per second, or
    /// if it is not finite.
    pub fn with_target_fps(mut self, fps: f64) -> Self {
        assert!(fps > 0.0, "Target FPS must be positive, got {}", fps);
        assert!(
            fps.is_finite() && fps >= MIN_TARGET_FPS,
            "Target FPS must be a finite value of at least {}, got {}",
            MIN_TARGET_FPS,
            fps
        );
        self.config.target_fps = fps;
        self
    }

    /// Enables sleeping away the rest of each frame.
    ///
    /// Default: false
    pub fn with_frame_limit(mut self, enabled: bool) -> Self {
        self.config.frame_limit = enabled;
        self
    }

    /// Sets the capacity of the platform → core signal channel.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_signal_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Signal capacity must be positive");
        self.config.signal_capacity = capacity;
        self
    }

    /// Brings up the core subsystems and initializes `game`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if a subsystem or the game fails to
    /// initialize.
    pub fn build<G: Game>(self, game: G) -> Result<Engine<G>, EngineError> {
        Engine::new(self.config, game)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Loop State ==========================================================

/// Flags written by the engine's own listeners and read by the loop.
#[derive(Debug)]
struct LoopState {
    running: Cell<bool>,
    suspended: Cell<bool>,
    pending_resize: Cell<Option<(u16, u16)>>,
}

impl LoopState {
    fn new() -> Self {
        Self {
            running: Cell::new(true),
            suspended: Cell::new(false),
            pending_resize: Cell::new(None),
        }
    }
}

//--- Engine Listeners ----------------------------------------------------

fn quit_listener(state: Rc<LoopState>) -> SharedListener {
    shared_listener(move |_: &EventBus, _: &Event| {
        info!(target: "engine", "APPLICATION_QUIT received, shutting down");
        state.running.set(false);
        true
    })
}

fn key_listener() -> SharedListener {
    shared_listener(|bus: &EventBus, event: &Event| {
        let Ok(code) = u8::try_from(event.context.u16(0)) else {
            return false;
        };
        let key = Key::from_code(code);

        if event.code == EventCode::KEY_PRESSED {
            if key == Key::ESCAPE {
                // Fires to the engine's own quit listener; block further key processing
                bus.fire(EventCode::APPLICATION_QUIT, None, EventContext::new());
                return true;
            }
            debug!(target: "engine", "{:?} pressed in window", key);
        } else {
            debug!(target: "engine", "{:?} released in window", key);
        }
        false
    })
}

fn resize_listener(state: Rc<LoopState>) -> SharedListener {
    shared_listener(move |_: &EventBus, event: &Event| {
        let width = event.context.u16(0);
        let height = event.context.u16(1);

        if width == 0 && height == 0 {
            if !state.suspended.replace(true) {
                info!(target: "engine", "Window minimized, suspending frame loop");
            }
        } else {
            if state.suspended.replace(false) {
                info!(target: "engine", "Window restored, resuming frame loop");
            }
            state.pending_resize.set(Some((width, height)));
        }
        false
    })
}

//=== Engine ==============================================================

/// Aetheric Engine runtime.
///
/// Owns the event bus, input tracker, clock, memory statistics and the
/// game. Single-threaded: platform producers talk to it only through
/// [`SignalSender`] handles from [`Engine::signal_sender`]. The signal
/// channel closes when `run()` returns, after which those handles report
/// every send as failed.
pub struct Engine<G: Game> {
    config: EngineConfig,
    game: G,

    //--- Core Systems -----------------------------------------------------
    bus: EventBus,
    input: InputTracker,
    clock: Clock,
    memory: MemoryStats,

    //--- Platform Bridge --------------------------------------------------
    pump: Option<SignalPump>,
    sender: Option<SignalSender>,

    //--- Loop Control -----------------------------------------------------
    state: Rc<LoopState>,
    identity: ObjectId,
    listeners: Vec<(EventCode, SharedListener)>,
    frame_count: u64,
    has_run: bool,
}

impl<G: Game> Engine<G> {
    //--- Creation ---------------------------------------------------------

    fn new(config: EngineConfig, game: G) -> Result<Self, EngineError> {
        info!(
            target: "engine",
            "Creating '{}' ({}x{} at {},{}, target {} FPS)",
            config.name,
            config.start_width,
            config.start_height,
            config.start_x,
            config.start_y,
            config.target_fps
        );

        let (sender, pump) = signal_channel(config.signal_capacity);
        let state = Rc::new(LoopState::new());
        let identity = ObjectId::of(&*state);

        let mut engine = Self {
            config,
            game,
            bus: EventBus::new(),
            input: InputTracker::new(),
            clock: Clock::new(),
            memory: MemoryStats::new(),
            pump: Some(pump),
            sender: Some(sender),
            state,
            identity,
            listeners: Vec::with_capacity(4),
            frame_count: 0,
            has_run: false,
        };

        engine.input.initialize();

        if !engine.bus.initialize() {
            error!(target: "engine", "Event system failed initialization, application can't continue");
            return Err(EngineError::Subsystem("event bus"));
        }

        engine.register_listeners()?;

        engine
            .memory
            .record_allocation(std::mem::size_of::<Self>() as u64, MemoryTag::Application);
        engine
            .memory
            .record_allocation(std::mem::size_of::<G>() as u64, MemoryTag::Game);

        let ctx = FrameContext {
            bus: &engine.bus,
            input: &engine.input,
            frame: 0,
        };
        if let Err(err) = engine.game.initialize(&ctx) {
            error!(target: "engine", "Game failed to initialize: {}", err);
            return Err(err);
        }

        engine
            .game
            .on_resize(engine.config.start_width, engine.config.start_height);

        info!(target: "engine", "Engine created");
        Ok(engine)
    }

    fn register_listeners(&mut self) -> Result<(), EngineError> {
        let key = key_listener();
        let registrations = [
            (EventCode::APPLICATION_QUIT, quit_listener(Rc::clone(&self.state))),
            (EventCode::KEY_PRESSED, Rc::clone(&key)),
            (EventCode::KEY_RELEASED, key),
            (EventCode::RESIZE, resize_listener(Rc::clone(&self.state))),
        ];

        for (code, callback) in registrations {
            if !self.bus.register(code, Some(self.identity), &callback) {
                return Err(EngineError::Subsystem("engine event listeners"));
            }
            self.listeners.push((code, callback));
        }
        Ok(())
    }

    //--- Accessors --------------------------------------------------------

    /// New producer handle for platform signals.
    ///
    /// Returns `None` once the engine has shut down and closed the
    /// signal channel.
    pub fn signal_sender(&self) -> Option<SignalSender> {
        self.sender.clone()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    /// Frames completed by the loop so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_suspended(&self) -> bool {
        self.state.suspended.get()
    }

    //--- Execution --------------------------------------------------------

    /// Runs the frame loop until APPLICATION_QUIT, a `Quit` signal, or a
    /// game error, then shuts the core subsystems down.
    ///
    /// # Errors
    ///
    /// Returns the game's error if `update` or `render` failed, or
    /// [`EngineError::AlreadyRun`] on a second call.
    pub fn run(&mut self) -> Result<(), EngineError> {
        if self.has_run {
            warn!(target: "engine", "run() called on an engine that already ran");
            return Err(EngineError::AlreadyRun);
        }
        self.has_run = true;

        info!(
            target: "engine",
            "Starting frame loop (target: {} FPS, frame limit: {})",
            self.config.target_fps,
            self.config.frame_limit
        );
        self.log_memory_usage();

        let result = self.frame_loop();

        self.shutdown();
        result
    }

    fn frame_loop(&mut self) -> Result<(), EngineError> {
        let target_frame_seconds = 1.0 / self.config.target_fps;

        self.clock.start();
        self.clock.update();
        let mut last_time = self.clock.elapsed();

        while self.state.running.get() {
            //--- 1. Platform signals ----------------------------------------
            let Some(pump) = self.pump.as_mut() else {
                break;
            };
            if pump.pump(&mut self.input, &self.bus) == TickControl::Exit {
                self.state.running.set(false);
            }
            if !self.state.running.get() {
                break;
            }

            if let Some((width, height)) = self.state.pending_resize.take() {
                debug!(target: "engine", "Forwarding resize {}x{}", width, height);
                self.game.on_resize(u32::from(width), u32::from(height));
            }

            if self.state.suspended.get() {
                thread::sleep(SUSPENDED_SLEEP);
                continue;
            }

            //--- 2. Game frame ----------------------------------------------
            self.clock.update();
            let current_time = self.clock.elapsed();
            let delta = current_time - last_time;

            let ctx = FrameContext {
                bus: &self.bus,
                input: &self.input,
                frame: self.frame_count,
            };

            if let Err(err) = self.game.update(&ctx, delta) {
                error!(target: "engine", "Game update failed, shutting down: {}", err);
                return Err(err);
            }
            if let Err(err) = self.game.render(&ctx, delta) {
                error!(target: "engine", "Game render failed, shutting down: {}", err);
                return Err(err);
            }

            //--- 3. Pacing --------------------------------------------------
            self.clock.update();
            let frame_elapsed = self.clock.elapsed() - current_time;
            let remaining = target_frame_seconds - frame_elapsed;
            if self.config.frame_limit && remaining > PACING_SLACK_SECONDS {
                thread::sleep(Duration::from_secs_f64(remaining - PACING_SLACK_SECONDS));
            }
            self.frame_count += 1;

            //--- 4. Input snapshot (always last) ----------------------------
            self.input.update(delta);
            last_time = current_time;
        }

        Ok(())
    }

    //--- Shutdown ---------------------------------------------------------

    fn shutdown(&mut self) {
        self.state.running.set(false);
        self.clock.stop();

        // Closing the channel wakes blocked producers and fails later sends
        self.sender = None;
        if let Some(pump) = self.pump.take() {
            let dropped = pump.pending();
            if dropped > 0 {
                debug!(target: "engine", "Discarding {} unprocessed platform signals", dropped);
            }
        }

        for (code, callback) in self.listeners.drain(..) {
            self.bus.unregister(code, Some(self.identity), &callback);
        }

        self.log_memory_usage();

        self.bus.shutdown();
        self.input.shutdown();

        info!(
            target: "engine",
            "Engine shutdown complete after {} frames ({:.2}s)",
            self.frame_count,
            self.clock.elapsed()
        );
    }

    fn log_memory_usage(&self) {
        let mut snapshot = self.memory.clone();
        snapshot.record_allocation(self.bus.allocated_bytes() as u64, MemoryTag::DynArray);
        info!(target: "memory", "{}", snapshot.usage_report());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform_bridge::PlatformSignal;
    use std::cell::RefCell;

    //--- Test Helpers -----------------------------------------------------

    /// Game that records its callbacks and optionally scripts events.
    #[derive(Default)]
    struct ScriptedGame {
        initialized: bool,
        updates: u64,
        renders: u64,
        resizes: Vec<(u32, u32)>,
        quit_after: Option<u64>,
        fail_update_at: Option<u64>,
        fire_on_first_update: Option<(EventCode, EventContext)>,
        saw_key_edge: bool,
    }

    impl Game for ScriptedGame {
        fn initialize(&mut self, ctx: &FrameContext<'_>) -> Result<(), EngineError> {
            assert!(ctx.bus.is_initialized());
            self.initialized = true;
            Ok(())
        }

        fn update(&mut self, ctx: &FrameContext<'_>, _delta_time: f64) -> Result<(), EngineError> {
            self.updates += 1;

            if ctx.input.is_key_down(Key::SPACE) && ctx.input.was_key_up(Key::SPACE) {
                self.saw_key_edge = true;
            }
            if self.fail_update_at == Some(ctx.frame) {
                return Err(EngineError::game("scripted failure"));
            }
            if ctx.frame == 0 {
                if let Some((code, context)) = self.fire_on_first_update {
                    ctx.bus.fire(code, None, context);
                }
            }
            if self.quit_after == Some(ctx.frame) {
                ctx.bus.fire(EventCode::APPLICATION_QUIT, None, EventContext::new());
            }
            Ok(())
        }

        fn render(&mut self, _ctx: &FrameContext<'_>, _delta_time: f64) -> Result<(), EngineError> {
            self.renders += 1;
            Ok(())
        }

        fn on_resize(&mut self, width: u32, height: u32) {
            self.resizes.push((width, height));
        }
    }

    struct FailingInit;

    impl Game for FailingInit {
        fn initialize(&mut self, _ctx: &FrameContext<'_>) -> Result<(), EngineError> {
            Err(EngineError::game("no assets"))
        }

        fn update(&mut self, _ctx: &FrameContext<'_>, _dt: f64) -> Result<(), EngineError> {
            Ok(())
        }

        fn render(&mut self, _ctx: &FrameContext<'_>, _dt: f64) -> Result<(), EngineError> {
            Ok(())
        }
    }

    fn quitting_after(frame: u64) -> ScriptedGame {
        ScriptedGame {
            quit_after: Some(frame),
            ..ScriptedGame::default()
        }
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.config, EngineConfig::default());
        assert_eq!(builder.config.name, "Aetheric Engine");
        assert_eq!((builder.config.start_width, builder.config.start_height), (1280, 720));
        assert_eq!(builder.config.target_fps, 60.0);
        assert!(!builder.config.frame_limit);
        assert_eq!(builder.config.signal_capacity, 128);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_name("Testbed")
            .with_start_position(10, 20)
            .with_start_size(800, 600)
            .with_target_fps(120.0)
            .with_frame_limit(true)
            .with_signal_capacity(256)
            .build(ScriptedGame::default())
            .unwrap();

        let config = engine.config();
        assert_eq!(config.name, "Testbed");
        assert_eq!((config.start_x, config.start_y), (10, 20));
        assert_eq!(config.target_fps, 120.0);
        assert!(config.frame_limit);
        assert_eq!(config.signal_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be positive")]
    fn builder_with_target_fps_panics_on_zero() {
        EngineBuilder::new().with_target_fps(0.0);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be positive")]
    fn builder_with_target_fps_panics_on_negative() {
        EngineBuilder::new().with_target_fps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be a finite value of at least")]
    fn builder_with_target_fps_panics_on_tiny_rate() {
        EngineBuilder::new().with_target_fps(1e-300);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be a finite value of at least")]
    fn builder_with_target_fps_panics_on_infinity() {
        EngineBuilder::new().with_target_fps(f64::INFINITY);
    }

    #[test]
    fn builder_accepts_minimum_target_fps() {
        let builder = EngineBuilder::new().with_target_fps(MIN_TARGET_FPS);
        assert_eq!(builder.config.target_fps, 1.0);
    }

    #[test]
    #[should_panic(expected = "Signal capacity must be positive")]
    fn builder_with_signal_capacity_panics_on_zero() {
        EngineBuilder::new().with_signal_capacity(0);
    }

    //=====================================================================
    // Creation Tests
    //=====================================================================

    #[test]
    fn build_initializes_subsystems_and_game() {
        let engine = EngineBuilder::new()
            .with_start_size(640, 480)
            .build(ScriptedGame::default())
            .unwrap();

        assert!(engine.bus().is_initialized());
        assert!(engine.input().is_initialized());
        assert!(engine.game().initialized);
        assert_eq!(engine.game().resizes, vec![(640, 480)]);

        assert_eq!(engine.bus().listener_count(EventCode::APPLICATION_QUIT), 1);
        assert_eq!(engine.bus().listener_count(EventCode::KEY_PRESSED), 1);
        assert_eq!(engine.bus().listener_count(EventCode::KEY_RELEASED), 1);
        assert_eq!(engine.bus().listener_count(EventCode::RESIZE), 1);
    }

    #[test]
    fn build_surfaces_game_initialize_error() {
        let result = EngineBuilder::new().build(FailingInit);
        assert!(matches!(result, Err(EngineError::Game(reason)) if reason == "no assets"));
    }

    //=====================================================================
    // Frame Loop Tests
    //=====================================================================

    #[test]
    fn quit_event_stops_loop_and_shuts_down() {
        let mut engine = EngineBuilder::new().build(quitting_after(2)).unwrap();

        engine.run().unwrap();

        assert_eq!(engine.game().updates, 3);
        assert_eq!(engine.game().renders, 3);
        assert_eq!(engine.frame_count(), 3);
        assert!(!engine.bus().is_initialized());
        assert!(!engine.input().is_initialized());
    }

    #[test]
    fn quit_signal_exits_before_first_frame() {
        let mut engine = EngineBuilder::new().build(ScriptedGame::default()).unwrap();
        engine.signal_sender().unwrap().send(PlatformSignal::Quit);

        engine.run().unwrap();

        assert_eq!(engine.game().updates, 0);
    }

    #[test]
    fn escape_key_requests_quit() {
        let mut engine = EngineBuilder::new().build(ScriptedGame::default()).unwrap();

        let quits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&quits);
        let observer = shared_listener(move |_: &EventBus, _: &Event| {
            *counter.borrow_mut() += 1;
            false
        });
        engine.bus().register(EventCode::APPLICATION_QUIT, None, &observer);

        engine
            .signal_sender()
            .unwrap()
            .send(PlatformSignal::Key { key: Key::ESCAPE, pressed: true });
        engine.run().unwrap();

        assert_eq!(engine.game().updates, 0);
        // The engine's quit listener handles the event first
        assert_eq!(*quits.borrow(), 0);
    }

    #[test]
    fn input_edges_are_visible_to_update() {
        let mut engine = EngineBuilder::new().build(quitting_after(1)).unwrap();
        engine
            .signal_sender()
            .unwrap()
            .send(PlatformSignal::Key { key: Key::SPACE, pressed: true });

        engine.run().unwrap();

        assert!(engine.game().saw_key_edge);
    }

    #[test]
    fn update_error_stops_loop() {
        let game = ScriptedGame {
            fail_update_at: Some(1),
            ..ScriptedGame::default()
        };
        let mut engine = EngineBuilder::new().build(game).unwrap();

        let result = engine.run();

        assert!(matches!(result, Err(EngineError::Game(_))));
        assert_eq!(engine.game().updates, 2);
        assert_eq!(engine.game().renders, 1);
        assert!(!engine.bus().is_initialized());
    }

    #[test]
    fn shutdown_closes_signal_channel() {
        let mut engine = EngineBuilder::new()
            .with_signal_capacity(4)
            .build(quitting_after(0))
            .unwrap();
        let sender = engine.signal_sender().unwrap();

        engine.run().unwrap();
        assert!(engine.signal_sender().is_none());

        // More sends than the channel holds: none may block or succeed
        let producer = thread::spawn(move || {
            (0..6)
                .map(|_| sender.send(PlatformSignal::Key { key: Key::A, pressed: true }))
                .collect::<Vec<bool>>()
        });

        assert_eq!(producer.join().unwrap(), vec![false; 6]);
    }

    #[test]
    fn blocked_producer_wakes_on_shutdown() {
        let mut engine = EngineBuilder::new()
            .with_signal_capacity(1)
            .build(ScriptedGame::default())
            .unwrap();
        let sender = engine.signal_sender().unwrap();
        assert!(sender.send(PlatformSignal::MouseMoved { x: 1, y: 1 }));

        // Channel is full; this send blocks until the engine shuts down
        let producer = thread::spawn(move || {
            let blocked = sender.send(PlatformSignal::MouseMoved { x: 2, y: 2 });
            let after = sender.send(PlatformSignal::MouseMoved { x: 3, y: 3 });
            (blocked, after)
        });

        thread::sleep(Duration::from_millis(20));
        engine.bus().fire(EventCode::APPLICATION_QUIT, None, EventContext::new());
        engine.run().unwrap();

        let (_, after) = producer.join().unwrap();
        assert!(!after);
    }

    #[test]
    fn second_run_is_rejected() {
        let mut engine = EngineBuilder::new().build(quitting_after(0)).unwrap();
        engine.run().unwrap();

        assert!(matches!(engine.run(), Err(EngineError::AlreadyRun)));
    }

    //=====================================================================
    // Resize Tests
    //=====================================================================

    #[test]
    fn resize_is_forwarded_to_game() {
        let game = ScriptedGame {
            quit_after: Some(1),
            fire_on_first_update: Some((
                EventCode::RESIZE,
                EventContext::new().with_u16(0, 800).with_u16(1, 600),
            )),
            ..ScriptedGame::default()
        };
        let mut engine = EngineBuilder::new().build(game).unwrap();

        engine.run().unwrap();

        assert_eq!(engine.game().resizes, vec![(1280, 720), (800, 600)]);
    }

    #[test]
    fn zero_size_resize_suspends_frames() {
        let game = ScriptedGame {
            fire_on_first_update: Some((EventCode::RESIZE, EventContext::new())),
            ..ScriptedGame::default()
        };
        let mut engine = EngineBuilder::new().build(game).unwrap();

        let sender = engine.signal_sender().unwrap();
        let quitter = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            sender.send(PlatformSignal::Quit);
        });

        engine.run().unwrap();
        quitter.join().unwrap();

        assert!(engine.is_suspended());
        assert_eq!(engine.game().updates, 1);
        assert_eq!(engine.game().resizes, vec![(1280, 720)]);
    }
}
