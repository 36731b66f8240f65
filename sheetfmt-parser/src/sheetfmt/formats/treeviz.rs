//! Treeviz formatter for token trees
//!
//! One line per token, so a whole pattern can be scanned at a glance. Nesting is drawn with
//! box-drawing connectors and every line reads `<icon> <type> "<text>"`, the text truncated
//! to 30 characters:
//!
//!     ⧉ expression "[RED]0;@"
//!     ├─ § number "[RED]0"
//!     │ ├─ ● color "[RED]"
//!     │ │ ├─ ◦ bracket-open-symbol "["
//!     │ │ ├─ ◦ color-name "RED"
//!     │ │ └─ ◦ bracket-close-symbol "]"
//!     │ └─ ◦ digit-zero "0"
//!     ├─ ◦ separator-symbol ";"
//!     └─ § text "@"
//!       └─ ◦ text-placeholder "@"
//!
//! Icons
//!     Expression: ⧉
//!     Sections (general, number, fraction, date, time, date-time, text): §
//!     Color: ●
//!     Conditions: ⋚
//!     Exponent: ᴱ
//!     Leaves: ◦

use super::registry::{FormatError, Formatter};
use crate::sheetfmt::token::{ParentType, Token};
use crate::sheetfmt::visitor::{Visiting, Visitor};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(token: &Token) -> &'static str {
    match token.parent_type() {
        None => "◦",
        Some(ParentType::Expression) => "⧉",
        Some(ParentType::Color) => "●",
        Some(ParentType::Exponent) => "ᴱ",
        Some(parent) if parent.is_condition() => "⋚",
        Some(parent) if parent.is_section() => "§",
        Some(_) => "◆",
    }
}

fn label(token: &Token) -> String {
    format!(
        "{} {} {:?}",
        icon(token),
        token.type_name(),
        truncate(token.text(), LABEL_WIDTH)
    )
}

/// Open parent: the prefix its children are drawn with and how many of them are left.
struct Frame {
    prefix: String,
    remaining: usize,
}

#[derive(Default)]
struct TreevizVisitor {
    output: String,
    frames: Vec<Frame>,
}

impl Visitor for TreevizVisitor {
    fn start_visit_token(&mut self, token: &Token) -> Visiting {
        let child_prefix = match self.frames.last_mut() {
            None => {
                self.output.push_str(&label(token));
                self.output.push('\n');
                String::new()
            }
            Some(frame) => {
                frame.remaining = frame.remaining.saturating_sub(1);
                let is_last = frame.remaining == 0;
                let connector = if is_last { "└─" } else { "├─" };
                self.output
                    .push_str(&format!("{}{} {}\n", frame.prefix, connector, label(token)));
                format!("{}{}", frame.prefix, if is_last { "  " } else { "│ " })
            }
        };

        if let Token::Parent(parent) = token {
            self.frames.push(Frame {
                prefix: child_prefix,
                remaining: parent.children().len(),
            });
        }
        Visiting::Continue
    }

    fn end_visit_token(&mut self, token: &Token) {
        if token.is_parent() {
            self.frames.pop();
        }
    }
}

pub fn to_treeviz_str(token: &Token) -> String {
    let mut visitor = TreevizVisitor::default();
    token.accept(&mut visitor);
    visitor.output
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, token: &Token) -> Result<String, FormatError> {
        Ok(to_treeviz_str(token))
    }

    fn description(&self) -> &str {
        "Visual tree representation with box-drawing connectors and Unicode icons"
    }
}
