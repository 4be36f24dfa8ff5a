#![deny(missing_docs)]

//! Manual OpenGL context test for the SDL2 back-end.
//!
//! Opens one or more windows through SDL2, creates a GL context with the
//! requested attributes, logs what the driver actually granted and draws a
//! colored triangle until the windows are closed.

use std::time::Duration;

use log::{info, warn};

pub use args::{Geometry, Options};
pub use controls::SwapControl;
pub use error::Error;
pub use gl_context::GlFunctions;
pub use report::{Attribute, AttributeReport, AttributeSource, DriverInfo};
pub use request::GlRequest;
pub use stats::FrameCounter;
pub use window_sdl2::TestWindowSDL2;

pub mod args;
pub mod controls;
pub mod error;
pub mod gl_context;
pub mod report;
pub mod request;
pub mod stats;
pub mod window_sdl2;

/// Event polling rate while every window is occluded.
const OCCLUDED_DELAY: Duration = Duration::from_nanos(1_000_000_000 / 15);

/// How long to wait after a frame that drew `active` windows.
///
/// Event polling drops to 15 Hz while nothing is visible.
pub fn throttle_delay(active: usize) -> Option<Duration> {
    if active == 0 { Some(OCCLUDED_DELAY) } else { None }
}

/// Runs the test until the windows are closed.
pub fn run(options: &Options) -> Result<(), Error> {
    let request = GlRequest::from(options);
    let mut window = TestWindowSDL2::new(options, &request)?;

    // The table must be loaded after the context is created.
    let gl = window.load_gl()?;

    let mut swap = SwapControl::new(options.initial_swap_interval());
    if let Err(err) = window_sdl2::set_swap_interval(swap.interval()) {
        warn!("Couldn't set swap interval {}: {}", swap.interval(), err);
    }

    window.log_display_info();
    info!("");
    DriverInfo {
        vendor: gl.string(gl::VENDOR),
        renderer: gl.string(gl::RENDERER),
        version: gl.string(gl::VERSION),
        extensions: gl.string(gl::EXTENSIONS),
    }.log();
    info!("");

    let reports = report::report_attributes(&request, &report::SdlAttributes(&window.video));
    let srgb = request.framebuffer_srgb && reports.iter().any(|report| {
        report.attribute == Attribute::FramebufferSrgbCapable && report.is_enabled()
    });
    gl.setup(srgb);

    let mut frames = FrameCounter::new(window.ticks());
    while !window.should_close() {
        frames.tick();
        window.handle_events(&mut swap);

        let update = swap.take_update();
        if let Some(interval) = update {
            info!("Swap interval to be set to {}", interval);
        }

        let active = window.render(&gl, update, options.suspend_when_occluded)?;
        if let Some(delay) = throttle_delay(active) {
            window.delay(delay);
        }
    }

    if let Some(fps) = frames.frames_per_second(window.ticks()) {
        info!("{:.2} frames per second", fps);
    }
    Ok(())
}
