//! The chainable parameter store and its canonical serialization
//!
//! A [`Transformation`] is an ordered sequence of committed stages plus one
//! open working stage. Setters write into the open stage; [`chain`]
//! commits it and starts the next one. [`render`] commits the open stage a
//! final time and serializes everything: per stage, entries sort by short
//! key ascending as `key_value` tokens joined with `,`; the raw
//! transformation entry, when present, is appended last and unprefixed.
//! Stages join with `/`.
//!
//! Serialization is fail-closed: one empty key or empty value anywhere
//! (raw transformation excluded) fails the whole render, never producing a
//! partial token string.
//!
//! [`chain`]: Transformation::chain
//! [`render`]: Transformation::render
//!
//! # Example
//!
//! ```
//! use mediatx::transformation::Transformation;
//!
//! let token = Transformation::new()
//!     .width(100)
//!     .height(101)
//!     .crop("crop")
//!     .render()
//!     .unwrap();
//! assert_eq!(token, "c_crop,h_101,w_100");
//! ```

use std::collections::HashMap;

use crate::error::RenderError;
use crate::layer::{Layer, TextLayer};
use crate::variable::Variable;

/// Closed enumeration of transformation parameters and their short codes.
///
/// Codes are stable wire identifiers; never renamed once shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Width,
    Height,
    Crop,
    Background,
    Color,
    Effect,
    Angle,
    Opacity,
    Border,
    X,
    Y,
    Radius,
    Quality,
    DefaultImage,
    Gravity,
    ColorSpace,
    Prefix,
    Overlay,
    Underlay,
    FetchFormat,
    Density,
    Page,
    Delay,
    Flags,
    Dpr,
    Zoom,
    AspectRatio,
    CustomFunction,
    AudioCodec,
    AudioFrequency,
    BitRate,
    VideoSampling,
    Duration,
    StartOffset,
    EndOffset,
    VideoCodec,
    RawTransformation,
    KeyframeInterval,
    Fps,
    StreamingProfile,
    If,
}

impl Param {
    /// The short wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Param::Width => "w",
            Param::Height => "h",
            Param::Crop => "c",
            Param::Background => "b",
            Param::Color => "co",
            Param::Effect => "e",
            Param::Angle => "a",
            Param::Opacity => "o",
            Param::Border => "bo",
            Param::X => "x",
            Param::Y => "y",
            Param::Radius => "r",
            Param::Quality => "q",
            Param::DefaultImage => "d",
            Param::Gravity => "g",
            Param::ColorSpace => "cs",
            Param::Prefix => "p",
            Param::Overlay => "l",
            Param::Underlay => "u",
            Param::FetchFormat => "f",
            Param::Density => "dn",
            Param::Page => "pg",
            Param::Delay => "dl",
            Param::Flags => "fl",
            Param::Dpr => "dpr",
            Param::Zoom => "z",
            Param::AspectRatio => "ar",
            Param::CustomFunction => "fn",
            Param::AudioCodec => "ac",
            Param::AudioFrequency => "af",
            Param::BitRate => "br",
            Param::VideoSampling => "vs",
            Param::Duration => "du",
            Param::StartOffset => "so",
            Param::EndOffset => "eo",
            Param::VideoCodec => "vc",
            Param::RawTransformation => "raw_transformation",
            Param::KeyframeInterval => "ki",
            Param::Fps => "fps",
            Param::StreamingProfile => "sp",
            Param::If => "if",
        }
    }

    /// Look up a parameter by its short code or descriptive long name, as
    /// accepted in description files.
    pub fn from_name(name: &str) -> Option<Param> {
        let param = match name {
            "w" | "width" => Param::Width,
            "h" | "height" => Param::Height,
            "c" | "crop" => Param::Crop,
            "b" | "background" => Param::Background,
            "co" | "color" => Param::Color,
            "e" | "effect" => Param::Effect,
            "a" | "angle" => Param::Angle,
            "o" | "opacity" => Param::Opacity,
            "bo" | "border" => Param::Border,
            "x" => Param::X,
            "y" => Param::Y,
            "r" | "radius" => Param::Radius,
            "q" | "quality" => Param::Quality,
            "d" | "default_image" => Param::DefaultImage,
            "g" | "gravity" => Param::Gravity,
            "cs" | "color_space" => Param::ColorSpace,
            "p" | "prefix" => Param::Prefix,
            "l" | "overlay" => Param::Overlay,
            "u" | "underlay" => Param::Underlay,
            "f" | "fetch_format" => Param::FetchFormat,
            "dn" | "density" => Param::Density,
            "pg" | "page" => Param::Page,
            "dl" | "delay" => Param::Delay,
            "fl" | "flags" => Param::Flags,
            "dpr" => Param::Dpr,
            "z" | "zoom" => Param::Zoom,
            "ar" | "aspect_ratio" => Param::AspectRatio,
            "fn" | "custom_function" => Param::CustomFunction,
            "ac" | "audio_codec" => Param::AudioCodec,
            "af" | "audio_frequency" => Param::AudioFrequency,
            "br" | "bit_rate" => Param::BitRate,
            "vs" | "video_sampling" => Param::VideoSampling,
            "du" | "duration" => Param::Duration,
            "so" | "start_offset" => Param::StartOffset,
            "eo" | "end_offset" => Param::EndOffset,
            "vc" | "video_codec" => Param::VideoCodec,
            "raw_transformation" => Param::RawTransformation,
            "ki" | "keyframe_interval" => Param::KeyframeInterval,
            "fps" => Param::Fps,
            "sp" | "streaming_profile" => Param::StreamingProfile,
            "if" => Param::If,
            _ => return None,
        };
        Some(param)
    }
}

/// Ordered stages of parameters, serialized to the wire token string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transformation {
    stages: Vec<HashMap<String, String>>,
    current: HashMap<String, String>,
    deferred: Option<RenderError>,
}

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter in the open stage, overwriting any prior value.
    pub fn set(mut self, param: Param, value: impl ToString) -> Self {
        self.current.insert(param.code().to_string(), value.to_string());
        self
    }

    /// Set a parameter by raw string key (variable names like `$xpos`, or
    /// codes this crate does not enumerate).
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.current.insert(key.to_string(), value.to_string());
        self
    }

    /// Commit the open stage and start an empty one.
    pub fn chain(mut self) -> Self {
        let stage = std::mem::take(&mut self.current);
        self.stages.push(stage);
        self
    }

    pub fn width(self, value: impl ToString) -> Self {
        self.set(Param::Width, value)
    }

    pub fn height(self, value: impl ToString) -> Self {
        self.set(Param::Height, value)
    }

    pub fn crop(self, value: &str) -> Self {
        self.set(Param::Crop, value)
    }

    pub fn background(self, value: &str) -> Self {
        self.set(Param::Background, value)
    }

    pub fn color(self, value: &str) -> Self {
        self.set(Param::Color, value)
    }

    pub fn effect(self, value: &str) -> Self {
        self.set(Param::Effect, value)
    }

    pub fn angle(self, value: impl ToString) -> Self {
        self.set(Param::Angle, value)
    }

    pub fn opacity(self, value: impl ToString) -> Self {
        self.set(Param::Opacity, value)
    }

    pub fn border(self, value: &str) -> Self {
        self.set(Param::Border, value)
    }

    pub fn x(self, value: impl ToString) -> Self {
        self.set(Param::X, value)
    }

    pub fn y(self, value: impl ToString) -> Self {
        self.set(Param::Y, value)
    }

    pub fn radius(self, value: impl ToString) -> Self {
        self.set(Param::Radius, value)
    }

    pub fn quality(self, value: impl ToString) -> Self {
        self.set(Param::Quality, value)
    }

    pub fn gravity(self, value: &str) -> Self {
        self.set(Param::Gravity, value)
    }

    pub fn zoom(self, value: impl ToString) -> Self {
        self.set(Param::Zoom, value)
    }

    pub fn dpr(self, value: impl ToString) -> Self {
        self.set(Param::Dpr, value)
    }

    pub fn aspect_ratio(self, value: impl ToString) -> Self {
        self.set(Param::AspectRatio, value)
    }

    pub fn fetch_format(self, value: &str) -> Self {
        self.set(Param::FetchFormat, value)
    }

    pub fn page(self, value: impl ToString) -> Self {
        self.set(Param::Page, value)
    }

    pub fn fps(self, value: impl ToString) -> Self {
        self.set(Param::Fps, value)
    }

    pub fn duration(self, value: impl ToString) -> Self {
        self.set(Param::Duration, value)
    }

    pub fn start_offset(self, value: impl ToString) -> Self {
        self.set(Param::StartOffset, value)
    }

    pub fn end_offset(self, value: impl ToString) -> Self {
        self.set(Param::EndOffset, value)
    }

    pub fn video_codec(self, value: &str) -> Self {
        self.set(Param::VideoCodec, value)
    }

    /// Set the overlay parameter from a layer descriptor. A layer that
    /// cannot render defers its error to [`render`](Self::render).
    pub fn overlay(self, layer: &Layer) -> Self {
        self.layer_param(Param::Overlay, layer.render())
    }

    /// Set the underlay parameter from a layer descriptor.
    pub fn underlay(self, layer: &Layer) -> Self {
        self.layer_param(Param::Underlay, layer.render())
    }

    /// Set the overlay parameter from a text layer descriptor.
    pub fn text_overlay(self, layer: &TextLayer) -> Self {
        self.layer_param(Param::Overlay, layer.render())
    }

    /// Set the underlay parameter from a text layer descriptor.
    pub fn text_underlay(self, layer: &TextLayer) -> Self {
        self.layer_param(Param::Underlay, layer.render())
    }

    /// Set the overlay parameter from an already-encoded layer string.
    pub fn overlay_str(self, value: &str) -> Self {
        self.set(Param::Overlay, value)
    }

    /// Set the underlay parameter from an already-encoded layer string.
    pub fn underlay_str(self, value: &str) -> Self {
        self.set(Param::Underlay, value)
    }

    fn layer_param(mut self, param: Param, rendered: Result<String, RenderError>) -> Self {
        match rendered {
            Ok(value) => self.set(param, value),
            Err(e) => {
                if self.deferred.is_none() {
                    self.deferred = Some(e);
                }
                self
            }
        }
    }

    /// Bind a user variable in the open stage. An invalid binding is
    /// skipped silently (fail-soft, matching the binder's empty render).
    pub fn variable(mut self, variable: &Variable) -> Self {
        if let Some((name, value)) = variable.as_param_pair() {
            self.current.insert(name, value);
        }
        self
    }

    /// Bind several user variables in the open stage.
    pub fn variables(mut self, variables: &[Variable]) -> Self {
        for v in variables {
            self = self.variable(v);
        }
        self
    }

    /// Set the stage condition from a rendered predicate. A leading `if_`
    /// is stripped so the serialized token carries exactly one prefix.
    pub fn if_condition(self, predicate: &str) -> Self {
        let predicate = predicate.strip_prefix("if_").unwrap_or(predicate);
        self.set(Param::If, predicate)
    }

    /// Append a raw transformation fragment: serialized last within its
    /// stage, without a key prefix, and exempt from the empty-value check.
    pub fn raw_transformation(self, value: &str) -> Self {
        self.set(Param::RawTransformation, value)
    }

    /// Serialize every stage (the open one included, even when empty) to
    /// the wire token string.
    ///
    /// Empty stages render to nothing and are dropped from the join, so the
    /// output never contains `//` or a trailing `/`. Any entry with an
    /// empty key or empty value (raw transformation excluded) fails the
    /// whole render.
    pub fn render(&self) -> Result<String, RenderError> {
        if let Some(e) = &self.deferred {
            return Err(e.clone());
        }
        let mut parts = Vec::with_capacity(self.stages.len() + 1);
        for stage in self.stages.iter().chain(std::iter::once(&self.current)) {
            let rendered = render_stage(stage)?;
            if !rendered.is_empty() {
                parts.push(rendered);
            }
        }
        Ok(parts.join("/"))
    }
}

/// Serialize one stage: sorted `key_value` tokens joined with `,`, raw
/// transformation appended last and unprefixed.
fn render_stage(stage: &HashMap<String, String>) -> Result<String, RenderError> {
    let raw_code = Param::RawTransformation.code();
    let mut tokens: Vec<String> = Vec::with_capacity(stage.len());
    let mut entries: Vec<(&String, &String)> = stage
        .iter()
        .filter(|(key, _)| key.as_str() != raw_code)
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (key, value) in entries {
        if key.is_empty() || value.is_empty() {
            return Err(RenderError::EmptyParam { key: key.clone() });
        }
        tokens.push(format!("{}_{}", key, value));
    }

    if let Some(raw) = stage.get(raw_code) {
        if !raw.is_empty() {
            tokens.push(raw.clone());
        }
    }

    Ok(tokens.join(","))
}
