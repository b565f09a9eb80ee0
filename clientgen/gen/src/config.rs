//! Generation-time options.
//!
//! A run uses exactly one [`GeneratorConfig`]. Each option changes how every
//! generated function behaves on the wire, so options are never mixed inside
//! one output file.

use clap::ValueEnum;
use strum::Display;

/// Wire convention for array-valued query parameters.
///
/// Given `{tags: ["x", "y"]}`:
///
/// | format | query string |
/// |--------|--------------|
/// | `Multi` | `tags=x&tags=y` |
/// | `Csv` | `tags=x%2Cy` |
/// | `Brackets` | `tags%5B%5D=x&tags%5B%5D=y` (`tags[]=x&tags[]=y`) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum CollectionFormat {
    /// Repeat the key once per value.
    #[default]
    Multi,
    /// One key, values joined with commas.
    Csv,
    /// Repeat the key with a `[]` suffix once per value.
    Brackets,
}

/// How single-key JSON envelopes are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum EnvelopeMode {
    /// A response schema that is an object with exactly one property is
    /// unwrapped to that property; a body schema of the same shape is
    /// wrapped around the caller's value.
    #[default]
    Unwrap,
    /// Responses and bodies are passed through as declared.
    FullBody,
}

/// Options selected once per generation run.
///
/// ## Examples
///
/// ```
/// use clientgen::config::{CollectionFormat, EnvelopeMode, GeneratorConfig};
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.collection_format, CollectionFormat::Multi);
/// assert_eq!(config.envelope, EnvelopeMode::Unwrap);
///
/// let csv = GeneratorConfig::default().with_collection_format(CollectionFormat::Csv);
/// assert_eq!(csv.collection_format.to_string(), "csv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    pub collection_format: CollectionFormat,
    pub envelope: EnvelopeMode,
}

impl GeneratorConfig {
    pub fn with_collection_format(mut self, format: CollectionFormat) -> Self {
        self.collection_format = format;
        self
    }

    pub fn with_envelope(mut self, envelope: EnvelopeMode) -> Self {
        self.envelope = envelope;
        self
    }

    pub(crate) fn unwraps_envelopes(&self) -> bool {
        self.envelope == EnvelopeMode::Unwrap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_cli_values() {
        for format in CollectionFormat::value_variants() {
            let possible = format.to_possible_value().expect("visible variant");
            assert_eq!(possible.get_name(), format.to_string());
        }
        for mode in EnvelopeMode::value_variants() {
            let possible = mode.to_possible_value().expect("visible variant");
            assert_eq!(possible.get_name(), mode.to_string());
        }
    }

    #[test]
    fn builders_override_defaults() {
        let config = GeneratorConfig::default()
            .with_collection_format(CollectionFormat::Brackets)
            .with_envelope(EnvelopeMode::FullBody);
        assert_eq!(config.collection_format, CollectionFormat::Brackets);
        assert!(!config.unwraps_envelopes());
    }
}
