use super::token::{Comparison, Condition, Marker, Operator, Token};
use super::types::Criteria;
use crate::errors::{QueryError, Result};

/// Ordered condition and operator tokens. The device evaluates them as a postfix
/// expression, so tokens are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStack {
    tokens: Vec<Token>,
}

enum Step {
    Push,
    Apply(Operator),
    Skip,
    Opaque,
}

impl FilterStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn words(&self) -> Vec<String> {
        self.tokens.iter().map(ToString::to_string).collect()
    }

    /// One condition per name/value pair, in the criteria's order.
    pub fn push_criteria(&mut self, criteria: Criteria, marker: Marker, cmp: Comparison) {
        for (name, value) in criteria.into_pairs() {
            self.tokens.push(Token::Condition(Condition { marker, cmp, name, value }));
        }
    }

    pub fn push_operator(&mut self, op: Operator) {
        self.tokens.push(Token::Operator(op));
    }

    pub fn push_raw(&mut self, word: String) {
        self.tokens.push(Token::Raw(word));
    }

    fn step(token: &Token) -> Step {
        match token {
            Token::Condition(c) if c.marker == Marker::Query => Step::Push,
            Token::Operator(op) => Step::Apply(*op),
            Token::Raw(word) if word.starts_with("?#") => {
                Operator::from_word(word).map_or(Step::Opaque, Step::Apply)
            }
            Token::Raw(word) if word.starts_with('?') => Step::Push,
            _ => Step::Skip,
        }
    }

    /// Simulate the device's query stack and reject operators without enough operands.
    ///
    /// Values left over at the end are fine (the device ANDs them). Raw operator words
    /// other than `?#&`, `?#|` and `?#!` cannot be checked; the expression is then
    /// accepted as is.
    ///
    /// # Errors
    /// Returns `QueryError::MalformedExpression` naming the first operator that underflows.
    pub fn validate(&self) -> Result<()> {
        let mut depth = 0usize;
        for (pos, token) in self.tokens.iter().enumerate() {
            match Self::step(token) {
                Step::Push => depth += 1,
                Step::Apply(op) => {
                    let needed = op.arity();
                    if depth < needed {
                        return Err(QueryError::MalformedExpression(format!(
                            "operator {op} at position {pos} needs {needed} operand(s), found {depth}"
                        )));
                    }
                    depth -= needed - 1;
                }
                Step::Skip => {}
                Step::Opaque => return Ok(()),
            }
        }
        Ok(())
    }
}
