//! Logging what was asked for next to what the driver granted.

use std::fmt;
use std::os::raw::c_int;

use log::{error, info};
use sdl2::sys::SDL_GLattr;

use crate::request::GlRequest;

/// GL attributes reported after the context is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `SDL_GL_FRAMEBUFFER_SRGB_CAPABLE`
    FramebufferSrgbCapable,
    /// `SDL_GL_RED_SIZE`
    RedSize,
    /// `SDL_GL_GREEN_SIZE`
    GreenSize,
    /// `SDL_GL_BLUE_SIZE`
    BlueSize,
    /// `SDL_GL_DEPTH_SIZE`
    DepthSize,
    /// `SDL_GL_CONTEXT_RELEASE_BEHAVIOR`
    ContextReleaseBehavior,
    /// `SDL_GL_MULTISAMPLEBUFFERS`
    MultisampleBuffers,
    /// `SDL_GL_MULTISAMPLESAMPLES`
    MultisampleSamples,
    /// `SDL_GL_ACCELERATED_VISUAL`
    AcceleratedVisual,
}

impl Attribute {
    /// The SDL name, as it appears in the log.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::FramebufferSrgbCapable => "SDL_GL_FRAMEBUFFER_SRGB_CAPABLE",
            Attribute::RedSize => "SDL_GL_RED_SIZE",
            Attribute::GreenSize => "SDL_GL_GREEN_SIZE",
            Attribute::BlueSize => "SDL_GL_BLUE_SIZE",
            Attribute::DepthSize => "SDL_GL_DEPTH_SIZE",
            Attribute::ContextReleaseBehavior => "SDL_GL_CONTEXT_RELEASE_BEHAVIOR",
            Attribute::MultisampleBuffers => "SDL_GL_MULTISAMPLEBUFFERS",
            Attribute::MultisampleSamples => "SDL_GL_MULTISAMPLESAMPLES",
            Attribute::AcceleratedVisual => "SDL_GL_ACCELERATED_VISUAL",
        }
    }

    fn to_sdl(self) -> SDL_GLattr {
        match self {
            Attribute::FramebufferSrgbCapable => SDL_GLattr::SDL_GL_FRAMEBUFFER_SRGB_CAPABLE,
            Attribute::RedSize => SDL_GLattr::SDL_GL_RED_SIZE,
            Attribute::GreenSize => SDL_GLattr::SDL_GL_GREEN_SIZE,
            Attribute::BlueSize => SDL_GLattr::SDL_GL_BLUE_SIZE,
            Attribute::DepthSize => SDL_GLattr::SDL_GL_DEPTH_SIZE,
            Attribute::ContextReleaseBehavior => SDL_GLattr::SDL_GL_CONTEXT_RELEASE_BEHAVIOR,
            Attribute::MultisampleBuffers => SDL_GLattr::SDL_GL_MULTISAMPLEBUFFERS,
            Attribute::MultisampleSamples => SDL_GLattr::SDL_GL_MULTISAMPLESAMPLES,
            Attribute::AcceleratedVisual => SDL_GLattr::SDL_GL_ACCELERATED_VISUAL,
        }
    }
}

/// Something that can tell what value an attribute ended up with.
pub trait AttributeSource {
    /// The granted value, or the error text.
    fn attribute(&self, attribute: Attribute) -> Result<i32, String>;
}

/// Reads attributes of the current context through `SDL_GL_GetAttribute`.
///
/// Holding the video subsystem keeps SDL's video side alive for the queries.
pub struct SdlAttributes<'a>(pub &'a sdl2::VideoSubsystem);

impl<'a> AttributeSource for SdlAttributes<'a> {
    fn attribute(&self, attribute: Attribute) -> Result<i32, String> {
        let mut value: c_int = 0;
        let rc = unsafe { sdl2::sys::SDL_GL_GetAttribute(attribute.to_sdl(), &mut value) };
        if rc == 0 {
            Ok(value as i32)
        } else {
            Err(sdl2::get_error())
        }
    }
}

/// One line of the attribute report.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeReport {
    /// Which attribute.
    pub attribute: Attribute,
    /// What the program asked for.
    pub requested: i32,
    /// What the driver granted.
    pub granted: Result<i32, String>,
}

impl AttributeReport {
    /// True when the attribute was read and is at least 1.
    pub fn is_enabled(&self) -> bool {
        match self.granted {
            Ok(value) => value >= 1,
            Err(_) => false,
        }
    }
}

impl fmt::Display for AttributeReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.granted {
            Ok(value) => write!(
                f, "{}: requested {}, got {}",
                self.attribute.name(), self.requested, value
            ),
            Err(ref err) => write!(f, "Failed to get {}: {}", self.attribute.name(), err),
        }
    }
}

/// The attributes worth reporting for `request`, with the requested values.
pub fn requested_attributes(request: &GlRequest) -> Vec<(Attribute, i32)> {
    let mut attributes = vec![
        (Attribute::FramebufferSrgbCapable, request.framebuffer_srgb as i32),
        (Attribute::RedSize, request.red_size as i32),
        (Attribute::GreenSize, request.green_size as i32),
        (Attribute::BlueSize, request.blue_size as i32),
        (Attribute::DepthSize, request.depth_size as i32),
        (Attribute::ContextReleaseBehavior, request.release_behavior),
    ];
    if let Some(samples) = request.multisample_samples {
        attributes.push((Attribute::MultisampleBuffers, 1));
        attributes.push((Attribute::MultisampleSamples, samples as i32));
    }
    if let Some(accel) = request.accelerated_visual {
        attributes.push((Attribute::AcceleratedVisual, accel));
    }
    attributes
}

/// Queries and logs every attribute of `request`.
pub fn report_attributes<S>(request: &GlRequest, source: &S) -> Vec<AttributeReport>
    where S: AttributeSource
{
    requested_attributes(request)
        .into_iter()
        .map(|(attribute, requested)| {
            let report = AttributeReport {
                attribute,
                requested,
                granted: source.attribute(attribute),
            };
            if report.granted.is_ok() {
                info!("{}", report);
            } else {
                error!("{}", report);
            }
            report
        })
        .collect()
}

/// Strings the driver reports about itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriverInfo {
    /// `GL_VENDOR`
    pub vendor: Option<String>,
    /// `GL_RENDERER`
    pub renderer: Option<String>,
    /// `GL_VERSION`
    pub version: Option<String>,
    /// `GL_EXTENSIONS`; absent in core profiles.
    pub extensions: Option<String>,
}

impl DriverInfo {
    /// Writes the driver strings to the log.
    pub fn log(&self) {
        fn or_null(value: &Option<String>) -> &str {
            value.as_ref().map(|s| s.as_str()).unwrap_or("(null)")
        }
        info!("Vendor        : {}", or_null(&self.vendor));
        info!("Renderer      : {}", or_null(&self.renderer));
        info!("Version       : {}", or_null(&self.version));
        info!("Extensions    : {}", or_null(&self.extensions));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct FakeAttributes(HashMap<Attribute, Result<i32, String>>);

    impl AttributeSource for FakeAttributes {
        fn attribute(&self, attribute: Attribute) -> Result<i32, String> {
            self.0.get(&attribute).cloned().unwrap_or(Ok(0))
        }
    }

    fn request() -> GlRequest {
        GlRequest {
            red_size: 8,
            green_size: 8,
            blue_size: 8,
            alpha_size: 0,
            depth_size: 0,
            stencil_size: 0,
            release_behavior: 0,
            double_buffer: true,
            multisample_samples: None,
            accelerated_visual: None,
            framebuffer_srgb: false,
            force_srgb_hint: None,
            version: None,
        }
    }

    #[test]
    fn base_attributes_in_order() {
        let names: Vec<_> = requested_attributes(&request())
            .into_iter()
            .map(|(attribute, _)| attribute)
            .collect();
        assert_eq!(names, vec![
            Attribute::FramebufferSrgbCapable,
            Attribute::RedSize,
            Attribute::GreenSize,
            Attribute::BlueSize,
            Attribute::DepthSize,
            Attribute::ContextReleaseBehavior,
        ]);
    }

    #[test]
    fn multisample_and_accel_only_when_requested() {
        let mut request = request();
        request.multisample_samples = Some(4);
        request.accelerated_visual = Some(1);
        let attributes = requested_attributes(&request);
        assert_eq!(&attributes[6..], &[
            (Attribute::MultisampleBuffers, 1),
            (Attribute::MultisampleSamples, 4),
            (Attribute::AcceleratedVisual, 1),
        ]);
    }

    #[test]
    fn requested_next_to_granted() {
        let mut granted = HashMap::new();
        granted.insert(Attribute::RedSize, Ok(5));
        granted.insert(Attribute::GreenSize, Err("no context".to_string()));
        let reports = report_attributes(&request(), &FakeAttributes(granted));

        assert_eq!(reports.len(), 6);
        assert_eq!(reports[1].to_string(), "SDL_GL_RED_SIZE: requested 8, got 5");
        assert_eq!(reports[2].to_string(), "Failed to get SDL_GL_GREEN_SIZE: no context");
        assert_eq!(reports[4].to_string(), "SDL_GL_DEPTH_SIZE: requested 0, got 0");
    }

    #[test]
    fn srgb_enabled_only_when_granted() {
        let mut request = request();
        request.framebuffer_srgb = true;

        let mut granted = HashMap::new();
        granted.insert(Attribute::FramebufferSrgbCapable, Ok(1));
        let reports = report_attributes(&request, &FakeAttributes(granted));
        assert_eq!(reports[0].requested, 1);
        assert!(reports[0].is_enabled());

        let mut granted = HashMap::new();
        granted.insert(Attribute::FramebufferSrgbCapable, Err("nope".to_string()));
        let reports = report_attributes(&request, &FakeAttributes(granted));
        assert!(!reports[0].is_enabled());
    }
}
