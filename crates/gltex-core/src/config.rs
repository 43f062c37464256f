//! Texture creation options.

use tracing::warn;

use crate::context::Filter;
use crate::pixel::Rgba;

/// Environment variable selecting [`Filter`].
pub const FILTER_ENV: &str = "GLTEX_FILTER";
/// Environment variable selecting [`Padding`].
pub const PADDING_ENV: &str = "GLTEX_PADDING";

/// What to do with decoded images whose sides are not aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Enlarge the canvas to the next 32-texel boundary, content at the
    /// upper-left.
    #[default]
    Aligned,
    /// Upload images at their decoded size.
    None,
}

/// Options applied when a texture is created or loaded from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    pub filter: Filter,
    pub padding: Padding,
    /// Fill for texels added by padding.
    pub pad_color: Rgba,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            filter: Filter::Linear,
            padding: Padding::Aligned,
            pad_color: Rgba::TRANSPARENT,
        }
    }
}

impl TextureConfig {
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_pad_color(mut self, pad_color: Rgba) -> Self {
        self.pad_color = pad_color;
        self
    }

    /// Defaults overridden by `GLTEX_FILTER` and `GLTEX_PADDING`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(FILTER_ENV) {
            match value.trim().to_ascii_lowercase().as_str() {
                "linear" => config.filter = Filter::Linear,
                "nearest" => config.filter = Filter::Nearest,
                other => warn!(var = FILTER_ENV, value = other, "ignoring unknown filter"),
            }
        }

        if let Some(value) = lookup(PADDING_ENV) {
            match value.trim().to_ascii_lowercase().as_str() {
                "aligned" => config.padding = Padding::Aligned,
                "none" => config.padding = Padding::None,
                other => warn!(var = PADDING_ENV, value = other, "ignoring unknown padding"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_are_linear_and_aligned() {
        let config = TextureConfig::from_lookup(lookup(&[]));
        assert_eq!(config, TextureConfig::default());
        assert_eq!(config.filter, Filter::Linear);
        assert_eq!(config.padding, Padding::Aligned);
        assert_eq!(config.pad_color, Rgba::TRANSPARENT);
    }

    #[test]
    fn env_values_override_defaults() {
        let config =
            TextureConfig::from_lookup(lookup(&[(FILTER_ENV, "Nearest"), (PADDING_ENV, " none ")]));
        assert_eq!(config.filter, Filter::Nearest);
        assert_eq!(config.padding, Padding::None);
    }

    #[test]
    fn unknown_values_are_ignored() {
        let config = TextureConfig::from_lookup(lookup(&[(FILTER_ENV, "trilinear")]));
        assert_eq!(config.filter, Filter::Linear);
    }
}
