//=========================================================================
// Aetheric Engine Core - Library Root
//
// This crate defines the public API surface of the Aetheric Engine core.
//
// Responsibilities:
// - Expose the frame loop facade (`EngineBuilder`, `Engine`, `Game`)
// - Expose the core subsystems (event bus, input tracker, containers)
// - Decode winit window events into engine platform signals
//
// Typical usage:
// ```no_run
// use aetheric_core::prelude::*;
//
// struct MyGame;
//
// impl Game for MyGame {
//     fn update(&mut self, _ctx: &FrameContext<'_>, _dt: f64) -> Result<(), EngineError> { Ok(()) }
//     fn render(&mut self, _ctx: &FrameContext<'_>, _dt: f64) -> Result<(), EngineError> { Ok(()) }
// }
//
// fn main() -> Result<(), EngineError> {
//     EngineBuilder::new().build(MyGame)?.run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the engine subsystems (events, input, containers, ...).
// It is public so games can register listeners and query input directly.
//
// `platform` converts winit window events into `PlatformSignal`s for
// hosts that own a winit event loop.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the builder, the frame loop and the game hooks; its
// types are re-exported below.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineConfig, EngineError, FrameContext, Game};
