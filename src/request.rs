//! The GL attributes asked of SDL before the window is created.

use log::{info, warn};
use sdl2::video::GLProfile;
use sdl2::VideoSubsystem;
use shader_version::OpenGL;

use crate::args::Options;

/// Name of the SDL hint that forces an sRGB framebuffer on or off.
pub const HINT_OPENGL_FORCE_SRGB_FRAMEBUFFER: &str = "SDL_OPENGL_FORCE_SRGB_FRAMEBUFFER";

/// Attributes requested for the GL context.
#[derive(Clone, Debug, PartialEq)]
pub struct GlRequest {
    /// Bits per red channel.
    pub red_size: u8,
    /// Bits per green channel.
    pub green_size: u8,
    /// Bits per blue channel.
    pub blue_size: u8,
    /// Bits per alpha channel.
    pub alpha_size: u8,
    /// Depth buffer bits.
    pub depth_size: u8,
    /// Stencil buffer bits.
    pub stencil_size: u8,
    /// `SDL_GL_CONTEXT_RELEASE_BEHAVIOR`; 0 means no flush on release.
    pub release_behavior: i32,
    /// Double buffering.
    pub double_buffer: bool,
    /// Samples per pixel when multisampling was asked for.
    pub multisample_samples: Option<u8>,
    /// Accelerated visual, when asked for.
    pub accelerated_visual: Option<i32>,
    /// sRGB capable framebuffer.
    pub framebuffer_srgb: bool,
    /// Value for `SDL_OPENGL_FORCE_SRGB_FRAMEBUFFER`.
    pub force_srgb_hint: Option<String>,
    /// Context version; requested with the compatibility profile.
    pub version: Option<OpenGL>,
}

impl<'a> From<&'a Options> for GlRequest {
    fn from(options: &'a Options) -> GlRequest {
        GlRequest {
            red_size: options.color_size,
            green_size: options.color_size,
            blue_size: options.color_size,
            alpha_size: 0,
            depth_size: 0,
            stencil_size: 0,
            release_behavior: 0,
            double_buffer: true,
            multisample_samples: if options.fsaa > 0 { Some(options.fsaa) } else { None },
            accelerated_visual: options.accel(),
            framebuffer_srgb: options.gl_framebuffer_srgb,
            force_srgb_hint: options.force_srgb_hint.clone(),
            version: options.gl_version,
        }
    }
}

impl GlRequest {
    /// Sets the hint and the GL attributes.
    ///
    /// Must run before the first window is created.
    pub fn apply(&self, video: &VideoSubsystem) {
        if let Some(ref hint) = self.force_srgb_hint {
            if !sdl2::hint::set(HINT_OPENGL_FORCE_SRGB_FRAMEBUFFER, hint) {
                warn!("Couldn't set {} to {}", HINT_OPENGL_FORCE_SRGB_FRAMEBUFFER, hint);
            }
        }

        let gl_attr = video.gl_attr();
        gl_attr.set_red_size(self.red_size);
        gl_attr.set_green_size(self.green_size);
        gl_attr.set_blue_size(self.blue_size);
        gl_attr.set_alpha_size(self.alpha_size);
        gl_attr.set_depth_size(self.depth_size);
        gl_attr.set_stencil_size(self.stencil_size);
        gl_attr.set_double_buffer(self.double_buffer);
        if let Some(samples) = self.multisample_samples {
            gl_attr.set_multisample_buffers(1);
            gl_attr.set_multisample_samples(samples);
        }
        if let Some(accel) = self.accelerated_visual {
            gl_attr.set_accelerated_visual(accel != 0);
        }
        if self.framebuffer_srgb {
            gl_attr.set_framebuffer_srgb_compatible(true);
        }
        if let Some(opengl) = self.version {
            let (major, minor) = opengl.get_major_minor();
            info!("Requesting OpenGL {}.{} compatibility context", major, minor);
            gl_attr.set_context_version(major as u8, minor as u8);
            gl_attr.set_context_profile(GLProfile::Compatibility);
        }

        let rc = unsafe {
            sdl2::sys::SDL_GL_SetAttribute(
                sdl2::sys::SDL_GLattr::SDL_GL_CONTEXT_RELEASE_BEHAVIOR,
                self.release_behavior,
            )
        };
        if rc != 0 {
            warn!("Couldn't request SDL_GL_CONTEXT_RELEASE_BEHAVIOR: {}", sdl2::get_error());
        }
    }
}
