//! Kinds formatter
//!
//! Lists every classified leaf with its kind, then the kind of the last one that counts for
//! rendering (colors and conditions excluded):
//!
//!     DAY_WITH_LEADING_ZERO    dd
//!     TEXT_LITERAL             /
//!     MONTH_WITH_LEADING_ZERO  mm
//!     last: MONTH_WITH_LEADING_ZERO

use super::registry::{FormatError, Formatter};
use crate::sheetfmt::kind::{last_kind, leaf_kinds};
use crate::sheetfmt::token::Token;

pub fn to_kinds_str(token: &Token) -> String {
    let kinds = leaf_kinds(token);
    let names: Vec<&str> = kinds.iter().map(|(_, kind)| kind.name()).collect();
    let width = names.iter().map(|name| name.len()).max().unwrap_or(0);

    let mut output = String::new();
    for ((leaf, _), name) in kinds.iter().zip(&names) {
        output.push_str(&format!("{name:<width$}  {}\n", leaf.text()));
    }
    match last_kind(token) {
        Some(kind) => output.push_str(&format!("last: {kind}\n")),
        None => output.push_str("last: none\n"),
    }
    output
}

pub struct KindsFormatter;

impl Formatter for KindsFormatter {
    fn name(&self) -> &str {
        "kinds"
    }

    fn serialize(&self, token: &Token) -> Result<String, FormatError> {
        Ok(to_kinds_str(token))
    }

    fn description(&self) -> &str {
        "Kind of every leaf, followed by the last kind"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheetfmt::parsing::parse_pattern;

    #[test]
    fn test_kinds_listing() {
        let token = parse_pattern("dd/mm").unwrap();
        assert_eq!(
            to_kinds_str(&token),
            "\
DAY_WITH_LEADING_ZERO    dd
TEXT_LITERAL             /
MONTH_WITH_LEADING_ZERO  mm
last: MONTH_WITH_LEADING_ZERO
"
        );
    }

    #[test]
    fn test_color_is_listed_but_not_last() {
        let token = parse_pattern("0[RED]").unwrap();
        let output = to_kinds_str(&token);
        assert!(output.contains("COLOR_NAME"));
        assert!(output.ends_with("last: DIGIT_ZERO\n"));
    }
}
