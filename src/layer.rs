//! Overlay/underlay layer descriptors
//!
//! Three layer kinds produce the colon-joined descriptor a stage's `l`/`u`
//! parameter carries:
//!
//! - [`Layer`]: references another stored asset by public id.
//! - [`TextLayer`]: renders a text caption with optional font styling.
//! - [`Layer::fetch`]: references a remote URL, base64url-encoded.
//!
//! Default components (`image` resource type, `upload` delivery type) are
//! omitted from the descriptor.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

use crate::error::RenderError;

const DEFAULT_RESOURCE_TYPE: &str = "image";
const DEFAULT_TYPE: &str = "upload";

/// Resource types whose descriptors carry content instead of a public id
/// component.
const TEXTUAL_RESOURCE_TYPES: &[&str] = &["text", "subtitles"];

/// Percent-encode a text caption for use inside an already-escaped URL
/// path.
///
/// Alphanumerics and `_ . - / :` pass through; every other byte is
/// percent-encoded. Two sequences are then double-escaped because the
/// consuming CDN decodes the path twice: `%2C` becomes `%252C` and a
/// literal `/` becomes `%252F`.
fn smart_encode(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'/' | b':' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded.replace("%2C", "%252C").replace('/', "%252F")
}

/// Escape a public id for embedding in a descriptor: path slashes become
/// colons.
fn escape_public_id(public_id: &str) -> String {
    public_id.replace('/', ":")
}

/// A base layer referencing a stored asset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layer {
    public_id: Option<String>,
    format: Option<String>,
    resource_type: Option<String>,
    delivery_type: Option<String>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A layer that pulls a remote resource: the resource type is forced to
    /// `fetch` and the URL is base64url-encoded as the public id.
    pub fn fetch(url: &str) -> Self {
        Self {
            public_id: Some(URL_SAFE.encode(url)),
            format: None,
            resource_type: Some("fetch".to_string()),
            delivery_type: None,
        }
    }

    pub fn public_id(mut self, public_id: &str) -> Self {
        self.public_id = Some(public_id.to_string());
        self
    }

    pub fn format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn resource_type(mut self, resource_type: &str) -> Self {
        self.resource_type = Some(resource_type.to_string());
        self
    }

    /// The delivery type (`upload`, `private`, `authenticated`, ...).
    pub fn delivery_type(mut self, delivery_type: &str) -> Self {
        self.delivery_type = Some(delivery_type.to_string());
        self
    }

    /// Encode to the colon-joined descriptor.
    ///
    /// Components, in order: resource type unless `image`, delivery type
    /// unless `upload`, and the escaped public id (with `.format` appended
    /// when both are set) unless the resource type is textual.
    pub fn render(&self) -> Result<String, RenderError> {
        let resource_type = self.resource_type.as_deref().unwrap_or(DEFAULT_RESOURCE_TYPE);
        if self.public_id.is_none() && resource_type != "text" {
            return Err(RenderError::MissingIdentifier);
        }

        let mut components: Vec<String> = Vec::new();
        if resource_type != DEFAULT_RESOURCE_TYPE {
            components.push(resource_type.to_string());
        }
        if let Some(delivery_type) = &self.delivery_type {
            if delivery_type != DEFAULT_TYPE {
                components.push(delivery_type.clone());
            }
        }
        if !TEXTUAL_RESOURCE_TYPES.contains(&resource_type) {
            if let Some(public_id) = &self.public_id {
                let with_format = match &self.format {
                    Some(format) => format!("{}.{}", public_id, format),
                    None => public_id.clone(),
                };
                components.push(escape_public_id(&with_format));
            }
        }
        Ok(components.join(":"))
    }
}

/// Optional font styling for a [`TextLayer`]. Any non-default setting makes
/// font family and size mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct TextStyle {
    font_weight: Option<String>,
    font_style: Option<String>,
    text_decoration: Option<String>,
    stroke: Option<String>,
    alignment: Option<String>,
    letter_spacing: Option<String>,
    line_spacing: Option<String>,
}

impl TextStyle {
    /// The optional style components, in serialization order. Settings
    /// equal to their defaults (`normal` weight/style, `none`
    /// decoration/stroke) do not count as styling.
    fn components(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(weight) = &self.font_weight {
            if weight != "normal" {
                parts.push(weight.clone());
            }
        }
        if let Some(style) = &self.font_style {
            if style != "normal" {
                parts.push(style.clone());
            }
        }
        if let Some(decoration) = &self.text_decoration {
            if decoration != "none" {
                parts.push(decoration.clone());
            }
        }
        if let Some(stroke) = &self.stroke {
            if stroke != "none" {
                parts.push(stroke.clone());
            }
        }
        if let Some(alignment) = &self.alignment {
            parts.push(alignment.clone());
        }
        if let Some(letter_spacing) = &self.letter_spacing {
            parts.push(format!("letter_spacing_{}", letter_spacing));
        }
        if let Some(line_spacing) = &self.line_spacing {
            parts.push(format!("line_spacing_{}", line_spacing));
        }
        parts
    }
}

/// A text caption layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLayer {
    text: Option<String>,
    public_id: Option<String>,
    font_family: Option<String>,
    font_size: Option<String>,
    style: TextStyle,
}

impl TextLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// A stored text asset to reference instead of (or alongside) literal
    /// text.
    pub fn public_id(mut self, public_id: &str) -> Self {
        self.public_id = Some(public_id.to_string());
        self
    }

    pub fn font_family(mut self, family: &str) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    pub fn font_size(mut self, size: impl ToString) -> Self {
        self.font_size = Some(size.to_string());
        self
    }

    pub fn font_weight(mut self, weight: &str) -> Self {
        self.style.font_weight = Some(weight.to_string());
        self
    }

    pub fn font_style(mut self, style: &str) -> Self {
        self.style.font_style = Some(style.to_string());
        self
    }

    pub fn text_decoration(mut self, decoration: &str) -> Self {
        self.style.text_decoration = Some(decoration.to_string());
        self
    }

    pub fn stroke(mut self, stroke: &str) -> Self {
        self.style.stroke = Some(stroke.to_string());
        self
    }

    pub fn alignment(mut self, alignment: &str) -> Self {
        self.style.alignment = Some(alignment.to_string());
        self
    }

    pub fn letter_spacing(mut self, spacing: impl ToString) -> Self {
        self.style.letter_spacing = Some(spacing.to_string());
        self
    }

    pub fn line_spacing(mut self, spacing: impl ToString) -> Self {
        self.style.line_spacing = Some(spacing.to_string());
        self
    }

    /// Encode to the colon-joined descriptor:
    /// `text[:style][:public_id][:encoded text]`.
    ///
    /// Fails with [`RenderError::MissingIdentifier`] when neither text nor
    /// public id is set, and with
    /// [`RenderError::IncompleteTextProperties`] when styling is present
    /// without both font family and font size.
    pub fn render(&self) -> Result<String, RenderError> {
        if self.text.is_none() && self.public_id.is_none() {
            return Err(RenderError::MissingIdentifier);
        }

        let mandatory: Vec<&String> = [&self.font_family, &self.font_size]
            .into_iter()
            .flatten()
            .collect();
        let optional = self.style.components();
        if !optional.is_empty() && mandatory.len() < 2 {
            return Err(RenderError::IncompleteTextProperties);
        }

        let mut components: Vec<String> = vec!["text".to_string()];
        if !optional.is_empty() {
            let mut style = mandatory.iter().map(|s| s.as_str().to_string()).collect::<Vec<_>>();
            style.extend(optional);
            components.push(style.join("_"));
        } else if mandatory.len() == 2 {
            // Family and size are only ever emitted together.
            components.push(
                mandatory
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join("_"),
            );
        }
        if let Some(public_id) = &self.public_id {
            components.push(escape_public_id(public_id));
        }
        if let Some(text) = &self.text {
            components.push(smart_encode(text));
        }
        Ok(components.join(":"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_layer_public_id_only() {
        let layer = Layer::new().public_id("logo");
        assert_eq!(layer.render().unwrap(), "logo");
    }

    #[test]
    fn test_base_layer_with_delivery_type() {
        let layer = Layer::new().public_id("logo").delivery_type("private");
        assert_eq!(layer.render().unwrap(), "private:logo");
    }

    #[test]
    fn test_base_layer_defaults_omitted() {
        let layer = Layer::new()
            .public_id("logo")
            .resource_type("image")
            .delivery_type("upload");
        assert_eq!(layer.render().unwrap(), "logo");
    }

    #[test]
    fn test_base_layer_video_resource_type() {
        let layer = Layer::new().public_id("intro").resource_type("video");
        assert_eq!(layer.render().unwrap(), "video:intro");
    }

    #[test]
    fn test_base_layer_format_and_slash_escaping() {
        let layer = Layer::new().public_id("folder/logo").format("png");
        assert_eq!(layer.render().unwrap(), "folder:logo.png");
    }

    #[test]
    fn test_base_layer_requires_public_id() {
        assert_eq!(
            Layer::new().render(),
            Err(RenderError::MissingIdentifier)
        );
        assert_eq!(
            Layer::new().resource_type("video").render(),
            Err(RenderError::MissingIdentifier)
        );
    }

    #[test]
    fn test_subtitles_skip_public_id_component() {
        let layer = Layer::new()
            .resource_type("subtitles")
            .public_id("sample_sub_en.srt");
        assert_eq!(layer.render().unwrap(), "subtitles");
    }

    #[test]
    fn test_fetch_layer() {
        let url = "https://res.cloudinary.com/demo/image/upload/sample";
        let layer = Layer::fetch(url);
        assert_eq!(
            layer.render().unwrap(),
            format!("fetch:{}", URL_SAFE.encode(url))
        );
    }

    #[test]
    fn test_text_layer_simple() {
        let layer = TextLayer::new()
            .text("Hello/World")
            .font_family("Arial")
            .font_size(18);
        assert_eq!(layer.render().unwrap(), "text:Arial_18:Hello%252FWorld");
    }

    #[test]
    fn test_text_layer_encodes_specials() {
        let layer = TextLayer::new()
            .text("Flowers, sale!")
            .font_family("Verdana")
            .font_size(20);
        assert_eq!(
            layer.render().unwrap(),
            "text:Verdana_20:Flowers%252C%20sale%21"
        );
    }

    #[test]
    fn test_text_layer_styling() {
        let layer = TextLayer::new()
            .text("Hi")
            .font_family("Arial")
            .font_size(12)
            .font_weight("bold")
            .letter_spacing(4);
        assert_eq!(
            layer.render().unwrap(),
            "text:Arial_12_bold_letter_spacing_4:Hi"
        );
    }

    #[test]
    fn test_text_layer_default_styling_values_ignored() {
        let layer = TextLayer::new()
            .text("Hi")
            .font_weight("normal")
            .font_style("normal")
            .text_decoration("none")
            .stroke("none");
        assert_eq!(layer.render().unwrap(), "text:Hi");
    }

    #[test]
    fn test_text_layer_styling_without_font_fails() {
        let layer = TextLayer::new().text("Hi").font_weight("bold");
        assert_eq!(
            layer.render(),
            Err(RenderError::IncompleteTextProperties)
        );
        let layer = TextLayer::new()
            .text("Hi")
            .font_family("Arial")
            .font_weight("bold");
        assert_eq!(
            layer.render(),
            Err(RenderError::IncompleteTextProperties)
        );
    }

    #[test]
    fn test_text_layer_requires_text_or_public_id() {
        assert_eq!(
            TextLayer::new().render(),
            Err(RenderError::MissingIdentifier)
        );
    }

    #[test]
    fn test_text_layer_with_public_id() {
        let layer = TextLayer::new().public_id("greetings/hello");
        assert_eq!(layer.render().unwrap(), "text:greetings:hello");
    }

    #[test]
    fn test_smart_encode_double_escapes() {
        assert_eq!(smart_encode("a,b"), "a%252Cb");
        assert_eq!(smart_encode("a/b"), "a%252Fb");
        assert_eq!(smart_encode("plain-text_1.0"), "plain-text_1.0");
    }
}
