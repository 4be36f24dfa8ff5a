//! OpenGL entry points resolved once the context is current.
//!
//! The triangle is drawn with the fixed-function pipeline, which the `gl`
//! crate's core-profile bindings don't cover, so the functions used here are
//! looked up by name into a table of their own.

use std::ffi::{c_void, CStr};
use std::mem::transmute;
use std::os::raw::c_char;

use gl::types::{GLbitfield, GLenum, GLfloat, GLint, GLsizei, GLubyte};

use crate::error::Error;

/// `GL_MODELVIEW` (compatibility profile).
pub const MODELVIEW: GLenum = 0x1700;
/// `GL_PROJECTION` (compatibility profile).
pub const PROJECTION: GLenum = 0x1701;
/// `GL_SMOOTH` (compatibility profile).
pub const SMOOTH: GLenum = 0x1D01;

const COLORS: [[GLfloat; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

const POSITIONS: [[GLfloat; 3]; 3] = [
    [0.0, 0.9, 0.0],
    [0.9, -0.9, 0.0],
    [-0.9, -0.9, 0.0],
];

macro_rules! gl_functions {
    ($($field:ident: $name:literal => fn($($arg:ty),*) $(-> $ret:ty)?;)*) => {
        /// Function pointers for every GL call the test makes.
        ///
        /// Only valid while the context they were loaded from is alive.
        pub struct GlFunctions {
            $($field: unsafe extern "system" fn($($arg),*) $(-> $ret)?,)*
        }

        impl GlFunctions {
            /// Names of the functions in the table, in load order.
            pub const NAMES: &'static [&'static str] = &[$($name),*];

            /// Resolves every function through `loader`.
            ///
            /// Fails on the first function the loader can't find.
            pub fn load<F>(mut loader: F) -> Result<GlFunctions, Error>
                where F: FnMut(&'static str) -> Result<*const c_void, String>
            {
                Ok(GlFunctions {
                    $($field: {
                        let ptr = loader($name).map_err(|reason| Error::MissingFunction {
                            name: $name,
                            reason,
                        })?;
                        if ptr.is_null() {
                            return Err(Error::MissingFunction {
                                name: $name,
                                reason: "null address".to_string(),
                            });
                        }
                        unsafe {
                            transmute::<*const c_void, unsafe extern "system" fn($($arg),*) $(-> $ret)?>(ptr)
                        }
                    },)*
                })
            }
        }
    };
}

gl_functions! {
    clear_color: "glClearColor" => fn(GLfloat, GLfloat, GLfloat, GLfloat);
    clear: "glClear" => fn(GLbitfield);
    begin: "glBegin" => fn(GLenum);
    end: "glEnd" => fn();
    color3fv: "glColor3fv" => fn(*const GLfloat);
    vertex3fv: "glVertex3fv" => fn(*const GLfloat);
    viewport: "glViewport" => fn(GLint, GLint, GLsizei, GLsizei);
    get_string: "glGetString" => fn(GLenum) -> *const GLubyte;
    matrix_mode: "glMatrixMode" => fn(GLenum);
    load_identity: "glLoadIdentity" => fn();
    enable: "glEnable" => fn(GLenum);
    depth_func: "glDepthFunc" => fn(GLenum);
    shade_model: "glShadeModel" => fn(GLenum);
}

impl GlFunctions {
    /// Loads the table from the current SDL GL context.
    pub fn load_sdl(video: &sdl2::VideoSubsystem) -> Result<GlFunctions, Error> {
        GlFunctions::load(|name| {
            let ptr = video.gl_get_proc_address(name);
            if ptr.is_null() {
                Err(sdl2::get_error())
            } else {
                Ok(ptr as *const c_void)
            }
        })
    }

    /// Reads a `glGetString` value such as `gl::VENDOR`.
    pub fn string(&self, name: GLenum) -> Option<String> {
        unsafe {
            let ptr = (self.get_string)(name);
            if ptr.is_null() {
                None
            } else {
                Some(CStr::from_ptr(ptr as *const c_char).to_string_lossy().into_owned())
            }
        }
    }

    /// Fixed-function state used for every frame.
    pub fn setup(&self, framebuffer_srgb: bool) {
        unsafe {
            (self.matrix_mode)(PROJECTION);
            (self.load_identity)();
            (self.matrix_mode)(MODELVIEW);
            (self.load_identity)();
            (self.enable)(gl::DEPTH_TEST);
            (self.depth_func)(gl::LESS);
            (self.shade_model)(SMOOTH);
            if framebuffer_srgb {
                (self.enable)(gl::FRAMEBUFFER_SRGB);
            }
        }
    }

    /// Sets the viewport to the drawable size.
    pub fn viewport(&self, width: u32, height: u32) {
        unsafe { (self.viewport)(0, 0, width as GLsizei, height as GLsizei) }
    }

    /// Clears and draws the triangle.
    pub fn render(&self) {
        unsafe {
            (self.clear_color)(0.0, 0.0, 0.0, 0.0);
            (self.clear)(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);

            (self.begin)(gl::TRIANGLES);
            for (color, position) in COLORS.iter().zip(POSITIONS.iter()) {
                (self.color3fv)(color.as_ptr());
                (self.vertex3fv)(position.as_ptr());
            }
            (self.end)();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SENTINEL: u8 = 0;

    fn sentinel() -> *const c_void {
        &SENTINEL as *const u8 as *const c_void
    }

    #[test]
    fn loads_every_function_by_name() {
        let mut requested = Vec::new();
        let result = GlFunctions::load(|name| {
            requested.push(name);
            Ok(sentinel())
        });
        assert!(result.is_ok());
        assert_eq!(requested, GlFunctions::NAMES);
        assert!(requested.contains(&"glBegin"));
        assert!(requested.contains(&"glGetString"));
    }

    #[test]
    fn missing_function_is_named() {
        let result = GlFunctions::load(|name| {
            if name == "glShadeModel" {
                Err("not found".to_string())
            } else {
                Ok(sentinel())
            }
        });
        match result {
            Err(Error::MissingFunction { name, reason }) => {
                assert_eq!(name, "glShadeModel");
                assert_eq!(reason, "not found");
            }
            _ => panic!("expected a missing function"),
        }
    }

    #[test]
    fn stops_at_first_null() {
        let mut calls = 0;
        let result = GlFunctions::load(|_| {
            calls += 1;
            Ok(std::ptr::null())
        });
        assert_eq!(calls, 1);
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "Couldn't load GL function glClearColor: null address");
    }
}
