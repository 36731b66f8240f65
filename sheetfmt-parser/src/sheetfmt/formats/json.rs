//! Marshalled output: pretty JSON and YAML
//!
//! Both print the same `{type, value, text}` form that [marshall] produces and [unmarshall]
//! reads back.
//!
//! [marshall]: crate::sheetfmt::token::marshall
//! [unmarshall]: crate::sheetfmt::token::unmarshall

use super::registry::{FormatError, Formatter};
use crate::sheetfmt::token::{marshall, Token};

pub fn to_json_str(token: &Token) -> Result<String, FormatError> {
    let value = marshall(token).map_err(|e| FormatError::SerializationError(e.to_string()))?;
    serde_json::to_string_pretty(&value).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub fn to_yaml_str(token: &Token) -> Result<String, FormatError> {
    serde_yaml::to_string(token).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, token: &Token) -> Result<String, FormatError> {
        to_json_str(token)
    }

    fn description(&self) -> &str {
        "Marshalled token tree as pretty printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, token: &Token) -> Result<String, FormatError> {
        to_yaml_str(token)
    }

    fn description(&self) -> &str {
        "Marshalled token tree as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheetfmt::parsing::parse_pattern;
    use crate::sheetfmt::token::unmarshall;

    #[test]
    fn test_json_reads_back() {
        let token = parse_pattern("[BLUE]#,##0.00;[<0]\"neg\"0").unwrap();
        let output = to_json_str(&token).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(unmarshall(&value).unwrap(), token);
        assert!(output.contains("\"type\": \"expression\""));
    }

    #[test]
    fn test_yaml_shape() {
        let token = parse_pattern("yyyy").unwrap();
        let output = to_yaml_str(&token).unwrap();
        assert!(output.starts_with("type: expression\n"));
        assert!(output.contains("type: year"));
        assert!(output.contains("text: yyyy"));
    }
}
