//! Test windows and their shared GL context, implemented by SDL2 back-end.

// External crates.
use std::time::Duration;

use input::Key;
use log::{error, info, warn};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::sys::SDL_WindowFlags;
use sdl2::video::{GLContext, Window};
use window::WindowSettings;

// Local Crate.
use crate::args::Options;
use crate::controls::SwapControl;
use crate::error::Error;
use crate::gl_context::GlFunctions;
use crate::request::GlRequest;

/// Windows that draw through one GL context.
pub struct TestWindowSDL2 {
    /// The GL context, created on the first window and shared by all.
    /// Declared first so it is destroyed before the windows and SDL.
    pub context: GLContext,
    /// SDL window handles; `None` once a window was closed.
    pub windows: Vec<Option<Window>>,
    /// The video subsystem, needed to resolve GL functions.
    pub video: sdl2::VideoSubsystem,
    event_pump: sdl2::EventPump,
    timer: sdl2::TimerSubsystem,
    /// SDL handle, kept alive until the windows are gone.
    pub sdl: sdl2::Sdl,
    exit_on_esc: bool,
    should_close: bool,
}

impl TestWindowSDL2 {
    /// Initializes SDL, applies `request`, opens the windows and creates
    /// the context, which is left current on the first window.
    pub fn new(options: &Options, request: &GlRequest) -> Result<TestWindowSDL2, Error> {
        let sdl = sdl2::init().map_err(Error::Sdl)?;
        let video = sdl.video().map_err(Error::Sdl)?;
        request.apply(&video);

        let windows = (0..options.windows as usize)
            .map(|i| build_window(&video, &options.window_settings(i)))
            .collect::<Result<Vec<_>, _>>()?;
        let context = match windows.first() {
            Some(first) => first.gl_create_context().map_err(Error::Context)?,
            None => return Err(Error::Context("no window to create it on".to_string())),
        };
        let event_pump = sdl.event_pump().map_err(Error::Sdl)?;
        let timer = sdl.timer().map_err(Error::Sdl)?;

        Ok(TestWindowSDL2 {
            context: context,
            windows: windows.into_iter().map(Some).collect(),
            video: video,
            event_pump: event_pump,
            timer: timer,
            sdl: sdl,
            exit_on_esc: options.window_settings(0).get_exit_on_esc(),
            should_close: false,
        })
    }

    /// Loads the GL table; the context must be current.
    pub fn load_gl(&self) -> Result<GlFunctions, Error> {
        GlFunctions::load_sdl(&self.video)
    }

    /// Whether the loop should stop.
    pub fn should_close(&self) -> bool {
        self.should_close
    }

    /// Logs the display and window sizes and the swap interval.
    pub fn log_display_info(&self) {
        match self.video.current_display_mode(0).and_then(|mode| mode.format.into_masks()) {
            Ok(masks) => info!("Screen BPP    : {}", masks.bpp),
            Err(err) => warn!("Couldn't get the display mode: {}", err),
        }
        log_swap_interval();
        if let Some(window) = self.windows.iter().flatten().next() {
            let (w, h) = window.size();
            info!("Window Size   : {},{}", w, h);
            let (w, h) = window.drawable_size();
            info!("Draw Size     : {},{}", w, h);
        }
    }

    /// Drains pending events, feeding key presses to `swap`.
    pub fn handle_events(&mut self, swap: &mut SwapControl) {
        let events: Vec<Event> = self.event_pump.poll_iter().collect();
        for event in events {
            match event {
                Event::Quit { .. } => self.should_close = true,
                Event::KeyDown { keycode: Some(keycode), .. } => {
                    let key = sdl2_map_key(keycode);
                    if self.exit_on_esc && key == Key::Escape {
                        self.should_close = true;
                    } else {
                        swap.press(key);
                    }
                }
                Event::Window { window_id, win_event: WindowEvent::Close, .. } => {
                    self.close_window(window_id);
                }
                _ => {}
            }
        }
    }

    fn close_window(&mut self, id: u32) {
        if close_slot(&mut self.windows, id, |window| window.id()) {
            self.should_close = true;
        }
    }

    /// Milliseconds since SDL was initialized.
    pub fn ticks(&self) -> u32 {
        self.timer.ticks()
    }

    /// Blocks the loop for `delay`, at millisecond resolution.
    pub fn delay(&mut self, delay: Duration) {
        self.timer.delay(delay.as_millis() as u32);
    }

    /// Draws a frame in every open window.
    ///
    /// `swap_interval` is applied to each window first when given. Returns
    /// how many windows were drawn.
    pub fn render(
        &self,
        gl: &GlFunctions,
        swap_interval: Option<i32>,
        suspend_when_occluded: bool
    ) -> Result<usize, Error> {
        let mut active = 0;
        for window in self.windows.iter().flatten() {
            if suspend_when_occluded && is_occluded(window) {
                continue;
            }
            active += 1;
            window.gl_make_current(&self.context).map_err(Error::MakeCurrent)?;
            if let Some(interval) = swap_interval {
                if let Err(err) = set_swap_interval(interval) {
                    error!("Couldn't set swap interval {}: {}", interval, err);
                }
                log_swap_interval();
            }
            let (w, h) = window.drawable_size();
            gl.viewport(w, h);
            gl.render();
            window.gl_swap_window();
        }
        Ok(active)
    }
}

fn build_window(video: &sdl2::VideoSubsystem, settings: &WindowSettings) -> Result<Window, Error> {
    let size = settings.get_size();
    let mut builder = video.window(
        &settings.get_title(),
        size.width as u32,
        size.height as u32,
    );
    builder.position_centered().opengl().allow_highdpi();
    if settings.get_resizable() {
        builder.resizable();
    }
    if !settings.get_decorated() {
        builder.borderless();
    }
    if settings.get_fullscreen() {
        builder.fullscreen_desktop();
    }
    Ok(builder.build()?)
}

/// Empties the slot holding `id`. Returns true when no slot is left open.
pub fn close_slot<T, F>(slots: &mut [Option<T>], id: u32, id_of: F) -> bool
    where F: Fn(&T) -> u32
{
    for slot in slots.iter_mut() {
        if slot.as_ref().map(|item| id_of(item)) == Some(id) {
            *slot = None;
        }
    }
    slots.iter().all(|slot| slot.is_none())
}

/// Hidden and minimized windows count as occluded.
pub fn is_occluded(window: &Window) -> bool {
    let occluded = SDL_WindowFlags::SDL_WINDOW_HIDDEN as u32
        | SDL_WindowFlags::SDL_WINDOW_MINIMIZED as u32;
    window.window_flags() & occluded != 0
}

/// Sets the swap interval of the current context.
///
/// Unlike `VideoSubsystem::gl_set_swap_interval` this accepts any value and
/// leaves it to the driver to refuse.
pub fn set_swap_interval(interval: i32) -> Result<(), String> {
    if unsafe { sdl2::sys::SDL_GL_SetSwapInterval(interval) } == 0 {
        Ok(())
    } else {
        Err(sdl2::get_error())
    }
}

/// Swap interval of the current context.
pub fn swap_interval() -> i32 {
    unsafe { sdl2::sys::SDL_GL_GetSwapInterval() }
}

fn log_swap_interval() {
    info!("Swap Interval : {}", swap_interval());
}

/// Maps an SDL keycode to a piston key.
pub fn sdl2_map_key(keycode: Keycode) -> Key {
    (keycode as u32).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_swap_keys() {
        assert_eq!(sdl2_map_key(Keycode::O), Key::O);
        assert_eq!(sdl2_map_key(Keycode::P), Key::P);
        assert_eq!(sdl2_map_key(Keycode::Escape), Key::Escape);
    }

    #[test]
    fn closing_one_of_two_windows() {
        let mut slots = vec![Some(3), Some(7)];
        assert!(!close_slot(&mut slots, 7, |id| *id));
        assert_eq!(slots, vec![Some(3), None]);
    }

    #[test]
    fn closing_unknown_window() {
        let mut slots = vec![Some(3), None];
        assert!(!close_slot(&mut slots, 9, |id| *id));
        assert_eq!(slots, vec![Some(3), None]);
    }

    #[test]
    fn closing_last_window() {
        let mut slots = vec![None, Some(7)];
        assert!(close_slot(&mut slots, 7, |id| *id));
        assert_eq!(slots, vec![None, None]);
    }
}
