//! Shared configuration loader for the sheetfmt toolchain.
//!
//! `defaults/sheetfmt.default.toml` is embedded into every binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user files and single
//! key overrides on top of those defaults via [`Loader`] before deserializing into
//! [`SheetfmtConfig`].

use config::builder::DefaultState;
use bigdecimal::RoundingMode;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use sheetfmt_parser::sheetfmt::context::{DecimalNumberContext, ParserContext};
use std::path::Path;
use thiserror::Error;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/sheetfmt.default.toml");

/// Top-level configuration consumed by sheetfmt applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetfmtConfig {
    pub context: ContextConfig,
    pub output: OutputConfig,
}

/// Locale symbols and rounding, as written in the file.
///
/// Symbols are strings in TOML; the single char ones are checked when converting.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextConfig {
    pub currency_symbol: String,
    pub decimal_separator: String,
    pub group_separator: String,
    pub minus_sign: String,
    pub plus_sign: String,
    pub percentage_symbol: String,
    pub exponent_symbol: String,
    pub precision: u64,
    pub rounding: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub family: String,
    pub lowercase: bool,
}

/// A context setting that parses as TOML but makes no sense as a symbol or rounding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context.{key} must be a single character, found {value:?}")]
    NotAChar { key: &'static str, value: String },
    #[error("context.{key} cannot be empty")]
    Empty { key: &'static str },
    #[error("unknown rounding {0:?} (expected half-even, half-up, half-down, up, down, ceiling or floor)")]
    UnknownRounding(String),
}

fn single_char(key: &'static str, value: &str) -> Result<char, ContextError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ContextError::NotAChar {
            key,
            value: value.to_string(),
        }),
    }
}

fn rounding_mode(name: &str) -> Result<RoundingMode, ContextError> {
    match name {
        "half-even" => Ok(RoundingMode::HalfEven),
        "half-up" => Ok(RoundingMode::HalfUp),
        "half-down" => Ok(RoundingMode::HalfDown),
        "up" => Ok(RoundingMode::Up),
        "down" => Ok(RoundingMode::Down),
        "ceiling" => Ok(RoundingMode::Ceiling),
        "floor" => Ok(RoundingMode::Floor),
        other => Err(ContextError::UnknownRounding(other.to_string())),
    }
}

impl ContextConfig {
    pub fn to_decimal_number_context(&self) -> Result<DecimalNumberContext, ContextError> {
        if self.currency_symbol.is_empty() {
            return Err(ContextError::Empty {
                key: "currency_symbol",
            });
        }
        if self.exponent_symbol.is_empty() {
            return Err(ContextError::Empty {
                key: "exponent_symbol",
            });
        }
        Ok(DecimalNumberContext {
            currency_symbol: self.currency_symbol.clone(),
            decimal_separator: single_char("decimal_separator", &self.decimal_separator)?,
            group_separator: single_char("group_separator", &self.group_separator)?,
            minus_sign: single_char("minus_sign", &self.minus_sign)?,
            plus_sign: single_char("plus_sign", &self.plus_sign)?,
            percentage_symbol: single_char("percentage_symbol", &self.percentage_symbol)?,
            exponent_symbol: self.exponent_symbol.clone(),
            precision: self.precision,
            rounding: rounding_mode(&self.rounding)?,
        })
    }

    pub fn to_parser_context(&self) -> Result<ParserContext, ContextError> {
        self.to_decimal_number_context().map(ParserContext::new)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may not exist.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `output.format` from a CLI flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SheetfmtConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<SheetfmtConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output.format, "treeviz");
        assert_eq!(config.output.family, "expression");
        assert!(!config.output.lowercase);

        let context = config.context.to_decimal_number_context().unwrap();
        assert_eq!(context, DecimalNumberContext::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .set_override("context.precision", 3i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "json");
        assert_eq!(config.context.precision, 3);
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[context]\ndecimal_separator = \",\"\ngroup_separator = \".\"\nrounding = \"floor\""
        )
        .unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        let context = config.context.to_decimal_number_context().unwrap();
        assert_eq!(context.decimal_separator, ',');
        assert_eq!(context.group_separator, '.');
        assert_eq!(context.rounding, RoundingMode::Floor);
        assert_eq!(context.currency_symbol, "$");
    }

    #[test]
    fn rounding_reaches_parser_context() {
        let config = Loader::new()
            .set_override("context.precision", 2i64)
            .unwrap()
            .set_override("context.rounding", "up")
            .unwrap()
            .build()
            .unwrap();
        let context = config.context.to_parser_context().unwrap();
        let value: bigdecimal::BigDecimal = "1.21".parse().unwrap();
        assert_eq!(context.round(value), "1.3".parse::<bigdecimal::BigDecimal>().unwrap());
    }

    #[test]
    fn missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        assert!(Loader::new().with_file(&absent).build().is_err());
        assert!(Loader::new().with_optional_file(&absent).build().is_ok());
    }

    #[test]
    fn rejects_multi_char_separator() {
        let config = Loader::new()
            .set_override("context.decimal_separator", "..")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            config.context.to_decimal_number_context(),
            Err(ContextError::NotAChar {
                key: "decimal_separator",
                value: "..".to_string(),
            })
        );
    }

    #[test]
    fn rejects_unknown_rounding() {
        let config = Loader::new()
            .set_override("context.rounding", "sideways")
            .unwrap()
            .build()
            .unwrap();
        assert!(matches!(
            config.context.to_parser_context(),
            Err(ContextError::UnknownRounding(name)) if name == "sideways"
        ));
    }
}
