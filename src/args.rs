//! Command line options.

use std::str::FromStr;

use clap::Parser;
use shader_version::OpenGL;
use window::WindowSettings;

/// Window size given as `WxH`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Width in screen coordinates.
    pub width: u32,
    /// Height in screen coordinates.
    pub height: u32,
}

impl FromStr for Geometry {
    type Err = String;

    fn from_str(s: &str) -> Result<Geometry, String> {
        let (w, h) = s
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WxH, got `{}`", s))?;
        let width = w.trim().parse().map_err(|_| format!("bad width `{}`", w))?;
        let height = h.trim().parse().map_err(|_| format!("bad height `{}`", h))?;
        if width == 0 || height == 0 {
            return Err(format!("window size must be non-zero, got `{}`", s));
        }
        Ok(Geometry { width, height })
    }
}

/// Parses `M.m` into one of the versions piston knows about.
pub fn parse_opengl(s: &str) -> Result<OpenGL, String> {
    let version = match s.trim() {
        "2.0" => OpenGL::V2_0,
        "2.1" => OpenGL::V2_1,
        "3.0" => OpenGL::V3_0,
        "3.1" => OpenGL::V3_1,
        "3.2" => OpenGL::V3_2,
        "3.3" => OpenGL::V3_3,
        "4.0" => OpenGL::V4_0,
        "4.1" => OpenGL::V4_1,
        "4.2" => OpenGL::V4_2,
        "4.3" => OpenGL::V4_3,
        "4.4" => OpenGL::V4_4,
        "4.5" => OpenGL::V4_5,
        other => return Err(format!("unsupported OpenGL version `{}`", other)),
    };
    Ok(version)
}

/// Options accepted by `testgl`.
#[derive(Parser, Debug, Clone)]
#[command(name = "testgl", about = "Draws a triangle through an SDL2 OpenGL context")]
pub struct Options {
    /// Multisample count; 0 disables multisampling.
    #[arg(long, value_name = "n", default_value_t = 0)]
    pub fsaa: u8,
    /// Request an accelerated visual; negative leaves it to the driver.
    #[arg(long, value_name = "n", allow_negative_numbers = true)]
    pub accel: Option<i32>,
    /// Bits per red, green and blue channel.
    #[arg(long = "color-size", value_name = "n", default_value_t = 8)]
    pub color_size: u8,
    /// Don't draw windows that are hidden or minimized.
    #[arg(long = "suspend-when-occluded")]
    pub suspend_when_occluded: bool,
    /// Ask for an sRGB capable framebuffer.
    #[arg(long = "gl-framebuffer-srgb")]
    pub gl_framebuffer_srgb: bool,
    /// Value for the SDL_OPENGL_FORCE_SRGB_FRAMEBUFFER hint.
    #[arg(long = "hint_opengl-force-srgb-framebuffer", value_name = "hint")]
    pub force_srgb_hint: Option<String>,
    /// Number of windows sharing the context.
    #[arg(long, value_name = "n", default_value_t = 1,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub windows: u16,
    /// Window title.
    #[arg(long, default_value = "testgl")]
    pub title: String,
    /// Window size.
    #[arg(long, value_name = "WxH", default_value = "640x480")]
    pub geometry: Geometry,
    /// Desktop fullscreen.
    #[arg(long)]
    pub fullscreen: bool,
    /// Resizable windows.
    #[arg(long)]
    pub resizable: bool,
    /// Windows without decorations.
    #[arg(long)]
    pub borderless: bool,
    /// Start with a swap interval of 1.
    #[arg(long)]
    pub vsync: bool,
    /// Request a compatibility context of this version.
    #[arg(long = "gl-version", value_name = "M.m", value_parser = parse_opengl)]
    pub gl_version: Option<OpenGL>,
}

impl Options {
    /// The accelerated visual request, if one was made.
    pub fn accel(&self) -> Option<i32> {
        self.accel.filter(|&accel| accel >= 0)
    }

    /// The swap interval the loop starts with.
    pub fn initial_swap_interval(&self) -> i32 {
        if self.vsync { 1 } else { 0 }
    }

    /// Settings for the window at `index`; titles count from 1.
    pub fn window_settings(&self, index: usize) -> WindowSettings {
        let title = if self.windows > 1 {
            format!("{} {}", self.title, index + 1)
        } else {
            self.title.clone()
        };
        WindowSettings::new(title, [self.geometry.width, self.geometry.height])
            .fullscreen(self.fullscreen)
            .resizable(self.resizable)
            .decorated(!self.borderless)
            .vsync(self.vsync)
            .samples(self.fsaa)
            .srgb(self.gl_framebuffer_srgb)
            .exit_on_esc(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        Options::try_parse_from(std::iter::once("testgl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let options = parse(&[]);
        assert_eq!(options.fsaa, 0);
        assert_eq!(options.accel(), None);
        assert_eq!(options.color_size, 8);
        assert!(!options.suspend_when_occluded);
        assert!(!options.gl_framebuffer_srgb);
        assert_eq!(options.force_srgb_hint, None);
        assert_eq!(options.windows, 1);
        assert_eq!(options.geometry, Geometry { width: 640, height: 480 });
        assert_eq!(options.initial_swap_interval(), 0);
        assert!(options.gl_version.is_none());
    }

    #[test]
    fn test_flags() {
        let options = parse(&[
            "--fsaa", "4",
            "--accel", "1",
            "--color-size", "10",
            "--suspend-when-occluded",
            "--gl-framebuffer-srgb",
            "--hint_opengl-force-srgb-framebuffer", "1",
        ]);
        assert_eq!(options.fsaa, 4);
        assert_eq!(options.accel(), Some(1));
        assert_eq!(options.color_size, 10);
        assert!(options.suspend_when_occluded);
        assert!(options.gl_framebuffer_srgb);
        assert_eq!(options.force_srgb_hint.as_deref(), Some("1"));
    }

    #[test]
    fn negative_accel_is_no_request() {
        let options = parse(&["--accel", "-1"]);
        assert_eq!(options.accel(), None);
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(Options::try_parse_from(["testgl", "--fsaa"]).is_err());
        assert!(Options::try_parse_from(["testgl", "--bogus"]).is_err());
        assert!(Options::try_parse_from(["testgl", "--windows", "0"]).is_err());
    }

    #[test]
    fn geometry() {
        assert_eq!("800x600".parse::<Geometry>(), Ok(Geometry { width: 800, height: 600 }));
        assert!("800".parse::<Geometry>().is_err());
        assert!("0x600".parse::<Geometry>().is_err());
        assert!("axb".parse::<Geometry>().is_err());
    }

    #[test]
    fn gl_version() {
        let options = parse(&["--gl-version", "2.1"]);
        assert_eq!(options.gl_version, Some(OpenGL::V2_1));
        assert!(parse_opengl("9.9").is_err());
    }

    #[test]
    fn window_titles() {
        let options = parse(&["--windows", "2", "--title", "gl"]);
        assert_eq!(options.window_settings(0).get_title(), "gl 1");
        assert_eq!(options.window_settings(1).get_title(), "gl 2");

        let options = parse(&["--title", "gl", "--fsaa", "2", "--borderless"]);
        let settings = options.window_settings(0);
        assert_eq!(settings.get_title(), "gl");
        assert_eq!(settings.get_samples(), 2);
        assert!(!settings.get_decorated());
        assert!(settings.get_exit_on_esc());
    }
}
