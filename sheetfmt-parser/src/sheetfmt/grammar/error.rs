use thiserror::Error;

/// Errors found while reading or assembling a grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Grammar syntax error at {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Rule {rule} refers to unknown name {name}")]
    UnknownName { rule: String, name: String },

    #[error("Rule {0} is defined more than once")]
    DuplicateRule(String),

    #[error("Rule {0} has the name of a terminal")]
    ShadowedTerminal(String),

    #[error("Rule {0} refers back to itself")]
    CyclicRule(String),

    #[error("Grammar has no rule or terminal named {0}")]
    Missing(String),

    #[error("Decoration on {rule} needs rule {needs}")]
    Decoration { rule: String, needs: String },
}
