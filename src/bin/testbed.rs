//=========================================================================
// Testbed
//
// Runs the engine frame loop against a scripted platform thread.
//
// The script thread plays the role of a window event loop: it moves the
// mouse, types, scrolls, minimizes and restores the window, and finally
// presses Escape, which ends the run through APPLICATION_QUIT.
//
// Run with `RUST_LOG=debug cargo run --bin testbed` to see every event.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

//=== External Crates =====================================================

use aetheric_core::prelude::*;
use log::{debug, info};

//=== Constants ===========================================================

/// Application-defined event fired once per simulated second.
const CHECKPOINT: EventCode = EventCode::application(0);

//=== TestbedGame =========================================================

struct TestbedGame {
    elapsed: f64,
    next_checkpoint: f64,
    wheel_ticks: Rc<Cell<i32>>,
    listeners: Vec<SharedListener>,
}

impl TestbedGame {
    fn new() -> Self {
        Self {
            elapsed: 0.0,
            next_checkpoint: 1.0,
            wheel_ticks: Rc::new(Cell::new(0)),
            listeners: Vec::new(),
        }
    }
}

impl Game for TestbedGame {
    fn initialize(&mut self, ctx: &FrameContext<'_>) -> Result<(), EngineError> {
        let ticks = Rc::clone(&self.wheel_ticks);
        let wheel = shared_listener(move |_: &EventBus, event: &Event| {
            ticks.set(ticks.get() + i32::from(event.context.i8(0)));
            false
        });

        let checkpoint = shared_listener(|_: &EventBus, event: &Event| {
            info!("Checkpoint: {}s simulated", event.context.u32(0));
            true
        });

        if !ctx.bus.register(EventCode::MOUSE_WHEEL, None, &wheel)
            || !ctx.bus.register(CHECKPOINT, None, &checkpoint)
        {
            return Err(EngineError::game("testbed listeners rejected"));
        }

        self.listeners.extend([wheel, checkpoint]);
        info!("Testbed initialized");
        Ok(())
    }

    fn update(&mut self, ctx: &FrameContext<'_>, delta_time: f64) -> Result<(), EngineError> {
        self.elapsed += delta_time;

        if self.elapsed >= self.next_checkpoint {
            let context = EventContext::new().with_u32(0, self.next_checkpoint as u32);
            ctx.bus.fire(CHECKPOINT, None, context);
            self.next_checkpoint += 1.0;
        }

        if ctx.input.is_key_down(Key::A) && ctx.input.was_key_up(Key::A) {
            info!("A went down on frame {}", ctx.frame);
        }

        let (dx, dy) = ctx.input.mouse_delta();
        if dx != 0 || dy != 0 {
            debug!("Mouse moved by ({}, {})", dx, dy);
        }
        Ok(())
    }

    fn render(&mut self, _ctx: &FrameContext<'_>, _delta_time: f64) -> Result<(), EngineError> {
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        info!("Drawable area is now {}x{}", width, height);
    }
}

//=== Platform Script =====================================================

fn play_script(sender: SignalSender) {
    let step = Duration::from_millis(150);
    let script = [
        PlatformSignal::MouseMoved { x: 640, y: 360 },
        PlatformSignal::MouseMoved { x: 700, y: 340 },
        PlatformSignal::Key { key: Key::A, pressed: true },
        PlatformSignal::Key { key: Key::A, pressed: false },
        PlatformSignal::MouseButton { button: MouseButton::Left, pressed: true },
        PlatformSignal::MouseButton { button: MouseButton::Left, pressed: false },
        PlatformSignal::MouseWheel { delta: 1 },
        PlatformSignal::MouseWheel { delta: -1 },
        PlatformSignal::MouseWheel { delta: -1 },
        PlatformSignal::Resized { width: 0, height: 0 },
        PlatformSignal::Resized { width: 1600, height: 900 },
        PlatformSignal::Key { key: Key::ESCAPE, pressed: true },
    ];

    for signal in script {
        thread::sleep(step);
        if !sender.send(signal) {
            return;
        }
    }
}

//=== Entry Point =========================================================

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut engine = EngineBuilder::new()
        .with_name("Aetheric Testbed")
        .with_frame_limit(true)
        .build(TestbedGame::new())?;

    let sender = engine.signal_sender().ok_or(EngineError::AlreadyRun)?;
    let script = thread::spawn(move || play_script(sender));

    engine.run()?;

    if script.join().is_err() {
        log::error!("Platform script thread panicked");
    }

    info!("Net wheel ticks: {}", engine.game().wheel_ticks.get());
    Ok(())
}
