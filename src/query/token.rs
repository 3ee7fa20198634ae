use std::fmt;

pub(crate) const PROPLIST_PREFIX: &str = "=.proplist=";
pub(crate) const NUMBERS_PREFIX: &str = "=numbers=";

/// Whether a condition is evaluated by the device (`?name=value`) or passed as a
/// plain attribute word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Query,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    Greater,
    Less,
    /// Attribute is missing or empty.
    Absent,
}

impl Comparison {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Equal => "",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Absent => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub marker: Marker,
    pub cmp: Comparison,
    pub name: String,
    /// Empty means "no value": the word carries no `=` suffix.
    pub value: String,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.marker == Marker::Query {
            f.write_str("?")?;
        }
        write!(f, "{}{}", self.cmp.prefix(), self.name)?;
        if !self.value.is_empty() {
            write!(f, "={}", self.value)?;
        }
        Ok(())
    }
}

/// Postfix boolean operators of the device's query stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    pub fn as_word(self) -> &'static str {
        match self {
            Self::And => "?#&",
            Self::Or => "?#|",
            Self::Not => "?#!",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "?#&" => Some(Self::And),
            "?#|" => Some(Self::Or),
            "?#!" => Some(Self::Not),
            _ => None,
        }
    }

    /// Number of stack values the operator consumes; it always pushes one back.
    pub fn arity(self) -> usize {
        match self {
            Self::Not => 1,
            Self::And | Self::Or => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_word())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<path><action>`, always the first word.
    Command(String),
    /// `=.proplist=a,b`; names are already escaped.
    Proplist(Vec<String>),
    Condition(Condition),
    Operator(Operator),
    /// Caller-supplied word, sent verbatim.
    Raw(String),
    /// `=numbers=1,2` batch of item ids.
    Numbers(Vec<String>),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(cmd) => f.write_str(cmd),
            Self::Proplist(fields) => write!(f, "{PROPLIST_PREFIX}{}", fields.join(",")),
            Self::Condition(c) => fmt::Display::fmt(c, f),
            Self::Operator(op) => fmt::Display::fmt(op, f),
            Self::Raw(word) => f.write_str(word),
            Self::Numbers(ids) => write!(f, "{NUMBERS_PREFIX}{}", ids.join(",")),
        }
    }
}

/// An ordered list of tokens forming one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn words(&self) -> Vec<String> {
        self.tokens.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn into_words(self) -> Vec<String> {
        self.words()
    }
}

impl From<Sentence> for Vec<String> {
    fn from(s: Sentence) -> Self {
        s.into_words()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(token, f)?;
        }
        Ok(())
    }
}
