//! Errors that end the test run.

use sdl2::video::WindowBuildError;
use thiserror::Error;

/// Everything that can go wrong while bringing up the window and context.
///
/// All of these are terminal: the binary logs them and exits.
#[derive(Debug, Error)]
pub enum Error {
    /// SDL itself or one of its subsystems failed to initialize.
    #[error("SDL: {0}")]
    Sdl(String),
    /// A window could not be created.
    #[error("couldn't create window: {0}")]
    Window(#[from] WindowBuildError),
    /// `SDL_GL_CreateContext` failed.
    #[error("SDL_GL_CreateContext(): {0}")]
    Context(String),
    /// `SDL_GL_MakeCurrent` failed.
    #[error("SDL_GL_MakeCurrent(): {0}")]
    MakeCurrent(String),
    /// An OpenGL entry point could not be resolved.
    #[error("Couldn't load GL function {name}: {reason}")]
    MissingFunction {
        /// The GL symbol name, e.g. `glBegin`.
        name: &'static str,
        /// What the loader reported.
        reason: String,
    },
}
