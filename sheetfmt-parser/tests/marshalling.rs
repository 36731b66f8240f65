//! JSON persisted form of parsed patterns

use rstest::rstest;
use serde_json::json;
use sheetfmt_parser::sheetfmt::parsing::parse_pattern;
use sheetfmt_parser::sheetfmt::token::{
    marshall, unmarshall, LeafType, ParentType, Token, TokenError,
};
use std::collections::BTreeSet;

/// Between them these patterns hold every leaf and parent type.
const EVERY_TYPE: &[&str] = &[
    "[Color 3][>=1.5]$#,##0.00%;[RED][<-1E-40](0.0E+00);[=0]\"zero\";@",
    "[<=100]dd/mm/yyyy",
    "[<>0]hh:mm:ss AM/PM",
    "yyyy-mm-dd hh:mm:ss.00",
    "[>0]# ??/??\\x*-_)",
    "General",
];

fn descendants(token: &Token) -> Vec<&Token> {
    let mut tokens = vec![token];
    for child in token.children() {
        tokens.extend(descendants(child));
    }
    tokens
}

#[test]
fn test_parsed_patterns_read_back_equal() {
    for pattern in [
        "[RED][>=1.5]$#,##0.00;[BLUE](#,##0.00);\"zero\";@",
        "[Color 3]dd/mmm/yyyy hh:mm:ss.000 AM/PM",
        "# ??/?? \\x*-_)",
        "General;;",
    ] {
        let token = parse_pattern(pattern).unwrap();
        let value = marshall(&token).unwrap();
        assert_eq!(unmarshall(&value).unwrap(), token, "{pattern}");
    }
}

#[test]
fn test_condition_shape() {
    let token = parse_pattern("[<>-2.50]0").unwrap();
    let condition = &token.children()[0].children()[0];
    assert_eq!(
        marshall(condition).unwrap(),
        json!({
            "type": "not-equals",
            "value": [
                {"type": "bracket-open-symbol", "value": "[", "text": "["},
                {"type": "not-equals-symbol", "value": "<>", "text": "<>"},
                {"type": "condition-number", "value": "-2.50", "text": "-2.50"},
                {"type": "bracket-close-symbol", "value": "]", "text": "]"},
            ],
            "text": "[<>-2.50]",
        })
    );
}

#[test]
fn test_tampered_parent_text_is_rejected() {
    let value = json!({
        "type": "color",
        "value": [
            {"type": "bracket-open-symbol", "value": "[", "text": "["},
            {"type": "color-name", "value": "RED", "text": "RED"},
            {"type": "bracket-close-symbol", "value": "]", "text": "]"},
        ],
        "text": "[BLUE]",
    });
    assert!(unmarshall(&value).is_err());
}

#[test]
fn test_parent_predicate_applies_on_read() {
    // A date without any date component
    let value = json!({
        "type": "date",
        "value": [{"type": "text-literal", "value": "/", "text": "/"}],
        "text": "/",
    });
    assert!(unmarshall(&value).is_err());

    let direct = Token::date(vec![Token::text_literal("/").unwrap()]);
    assert!(matches!(direct, Err(TokenError::MissingChild { .. })));
}

#[rstest]
#[case(EVERY_TYPE[0])]
#[case(EVERY_TYPE[1])]
#[case(EVERY_TYPE[2])]
#[case(EVERY_TYPE[3])]
#[case(EVERY_TYPE[4])]
#[case(EVERY_TYPE[5])]
fn test_every_subtree_reads_back(#[case] pattern: &str) {
    let token = parse_pattern(pattern).unwrap();
    for subtree in descendants(&token) {
        let value = marshall(subtree).unwrap();
        assert_eq!(value["type"], subtree.type_name());
        assert_eq!(
            &unmarshall(&value).unwrap(),
            subtree,
            "{} in {pattern}",
            subtree.type_name()
        );
    }
}

#[test]
fn test_round_trips_cover_every_type() {
    let parsed: Vec<Token> = EVERY_TYPE
        .iter()
        .map(|pattern| parse_pattern(pattern).unwrap())
        .collect();
    let seen: BTreeSet<&str> = parsed
        .iter()
        .flat_map(|token| descendants(token))
        .map(Token::type_name)
        .collect();

    let missing: Vec<&str> = LeafType::ALL
        .iter()
        .map(|leaf| leaf.name())
        .chain(ParentType::ALL.iter().map(|parent| parent.name()))
        .filter(|name| !seen.contains(name))
        .collect();
    assert!(missing.is_empty(), "no pattern holds {missing:?}");
}

#[test]
fn test_wide_condition_numbers_keep_their_digits() {
    let token = parse_pattern("[>123456789012345678901234567890]0;[<1E-40]0").unwrap();
    let value = marshall(&token).unwrap();
    assert_eq!(
        value["value"][0]["value"][0]["value"][2]["text"],
        "123456789012345678901234567890"
    );
    assert_eq!(unmarshall(&value).unwrap(), token);
}
