use super::filter::FilterStack;
use super::select::escape_fields;
use super::token::{Comparison, Marker, Operator, Sentence, Token};
use super::types::{Criteria, IntoFields, IntoParam};
use crate::config::{CaseMode, QueryConfig};
use crate::errors::Result;
use crate::types::MenuPath;
use std::sync::Arc;

/// Query chain against one menu path.
///
/// Every chaining method takes the builder by value and hands it back, so a chain
/// has exactly one owner until a terminal operation (`get`, `find`, `purge`,
/// `stream`, ...) consumes it. Clone a partially built chain to fork it.
pub struct MenuQuery<T> {
    pub(crate) transport: Arc<T>,
    path: MenuPath,
    proplist: Option<Vec<String>>,
    filters: FilterStack,
    pub(crate) config: QueryConfig,
}

impl<T> Clone for MenuQuery<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            path: self.path.clone(),
            proplist: self.proplist.clone(),
            filters: self.filters.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T> std::fmt::Debug for MenuQuery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuQuery")
            .field("path", &self.path)
            .field("proplist", &self.proplist)
            .field("filters", &self.filters)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// `"ip address"`, `"/ip/address/"` and `"ip/address"` all become `/ip/address`.
pub fn normalize_path(path: &str) -> MenuPath {
    let parts: Vec<&str> = path
        .split(|c: char| c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    format!("/{}", parts.join("/"))
}

fn normalize_action(action: &str) -> String {
    if action.is_empty() || action.starts_with('/') {
        action.to_string()
    } else {
        format!("/{action}")
    }
}

impl<T> MenuQuery<T> {
    pub fn new(transport: Arc<T>, path: &str) -> Self {
        Self::with_config(transport, path, QueryConfig::default())
    }

    pub fn with_config(transport: Arc<T>, path: &str, config: QueryConfig) -> Self {
        Self { transport, path: normalize_path(path), proplist: None, filters: FilterStack::new(), config }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn case_mode(&self) -> CaseMode {
        self.config.case_mode
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Escaped projection, `None` when every field is requested.
    pub fn projection(&self) -> Option<&[String]> {
        self.proplist.as_deref()
    }

    pub fn filters(&self) -> &FilterStack {
        &self.filters
    }

    // --- field selector ---

    /// Restrict the reply to `fields`. Replaces any earlier projection.
    #[must_use]
    pub fn select<F: IntoFields>(mut self, fields: F) -> Self {
        self.proplist = Some(escape_fields(fields.into_fields()));
        self
    }

    #[must_use]
    pub fn only<F: IntoFields>(self, fields: F) -> Self {
        self.select(fields)
    }

    #[must_use]
    pub fn proplist<F: IntoFields>(self, fields: F) -> Self {
        self.select(fields)
    }

    // --- filter stack ---

    fn push(mut self, criteria: Criteria, marker: Marker, cmp: Comparison, ops: &[Operator]) -> Self {
        self.filters.push_criteria(criteria, marker, cmp);
        for op in ops {
            self.filters.push_operator(*op);
        }
        self
    }

    /// `?name=value` conditions, one per pair. An empty value yields a bare `?name`.
    #[must_use]
    pub fn where_(self, criteria: impl Into<Criteria>) -> Self {
        self.where_marked(criteria, true)
    }

    /// Like [`where_`](Self::where_); with `question_mark == false` the words are plain
    /// attributes instead of device-side conditions.
    #[must_use]
    pub fn where_marked(self, criteria: impl Into<Criteria>, question_mark: bool) -> Self {
        let marker = if question_mark { Marker::Query } else { Marker::Plain };
        self.push(criteria.into(), marker, Comparison::Equal, &[])
    }

    #[must_use]
    pub fn query(self, criteria: impl Into<Criteria>) -> Self {
        self.where_(criteria)
    }

    #[must_use]
    pub fn filter(self, criteria: impl Into<Criteria>) -> Self {
        self.where_(criteria)
    }

    /// Append words verbatim.
    #[must_use]
    pub fn where_raw<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            self.filters.push_raw(word.into());
        }
        self
    }

    #[must_use]
    pub fn or_where(self, criteria: impl Into<Criteria>) -> Self {
        self.push(criteria.into(), Marker::Query, Comparison::Equal, &[Operator::Or])
    }

    #[must_use]
    pub fn and_where(self, criteria: impl Into<Criteria>) -> Self {
        self.push(criteria.into(), Marker::Query, Comparison::Equal, &[Operator::And])
    }

    #[must_use]
    pub fn where_not(self, criteria: impl Into<Criteria>) -> Self {
        self.push(criteria.into(), Marker::Query, Comparison::Equal, &[Operator::Not])
    }

    #[must_use]
    pub fn or_where_not(self, criteria: impl Into<Criteria>) -> Self {
        self.push(criteria.into(), Marker::Query, Comparison::Equal, &[Operator::Not, Operator::Or])
    }

    #[must_use]
    pub fn and_where_not(self, criteria: impl Into<Criteria>) -> Self {
        self.push(criteria.into(), Marker::Query, Comparison::Equal, &[Operator::Not, Operator::And])
    }

    /// `?>key=value`
    #[must_use]
    pub fn where_higher(self, key: impl Into<String>, value: impl IntoParam) -> Self {
        self.push(Criteria::single(key, value), Marker::Query, Comparison::Greater, &[])
    }

    /// `?<key=value`
    #[must_use]
    pub fn where_lower(self, key: impl Into<String>, value: impl IntoParam) -> Self {
        self.push(Criteria::single(key, value), Marker::Query, Comparison::Less, &[])
    }

    /// `?>key`: the attribute has a value.
    #[must_use]
    pub fn where_exists(self, key: impl Into<String>) -> Self {
        self.push(Criteria::key(key), Marker::Query, Comparison::Greater, &[])
    }

    #[must_use]
    pub fn where_not_empty(self, key: impl Into<String>) -> Self {
        self.where_exists(key)
    }

    /// `?-key`: the attribute is absent.
    #[must_use]
    pub fn where_empty(self, key: impl Into<String>) -> Self {
        self.push(Criteria::key(key), Marker::Query, Comparison::Absent, &[])
    }

    #[must_use]
    pub fn where_not_exists(self, key: impl Into<String>) -> Self {
        self.where_empty(key)
    }

    /// Plain option words (no `?`) with empty values, e.g. `detail`.
    #[must_use]
    pub fn options<I, S>(self, opts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let batch = Criteria::batch(opts.into_iter().map(|o| (Into::<String>::into(o), "")));
        self.where_marked(batch, false)
    }

    #[must_use]
    pub fn option(self, opt: impl Into<String>) -> Self {
        self.options([opt])
    }

    // --- assembler ---

    /// Command word, projection, then every filter token in insertion order.
    pub fn full_query(&self, action: &str) -> Sentence {
        let mut tokens = Vec::with_capacity(2 + self.filters.len());
        tokens.push(Token::Command(format!("{}{}", self.path, normalize_action(action))));
        if let Some(fields) = &self.proplist {
            tokens.push(Token::Proplist(fields.clone()));
        }
        tokens.extend(self.filters.tokens().iter().cloned());
        Sentence::new(tokens)
    }

    /// Check operator/operand balance of the filter stack.
    ///
    /// # Errors
    /// Returns `QueryError::MalformedExpression` when an operator lacks operands.
    pub fn validate(&self) -> Result<()> {
        self.filters.validate()
    }

    /// [`full_query`](Self::full_query), validated first when `strict_expressions` is set.
    pub(crate) fn assemble(&self, action: &str) -> Result<Sentence> {
        if self.config.strict_expressions {
            self.validate()?;
        }
        Ok(self.full_query(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    fn menu(path: &str) -> MenuQuery<MemoryTransport> {
        MenuQuery::new(Arc::new(MemoryTransport::new()), path)
    }

    #[test]
    fn paths_are_normalized() {
        assert_eq!(normalize_path("ip address"), "/ip/address");
        assert_eq!(normalize_path("/interface/"), "/interface");
        assert_eq!(normalize_path("/ip/firewall/filter"), "/ip/firewall/filter");
    }

    #[test]
    fn bare_chain_is_only_the_command() {
        assert_eq!(menu("/interface").full_query("/print").into_words(), vec!["/interface/print"]);
        assert_eq!(menu("/interface").full_query("").into_words(), vec!["/interface"]);
        assert_eq!(menu("/interface").full_query("listen").into_words(), vec!["/interface/listen"]);
    }

    #[test]
    fn last_select_wins() {
        let q = menu("/interface").select(["name", "mtu"]).only("id");
        assert_eq!(q.projection(), Some(&[".id".to_string()][..]));
    }

    #[test]
    fn empty_select_requests_no_fields() {
        let q = menu("/interface").select(Vec::<String>::new());
        assert_eq!(q.full_query("/print").into_words(), vec!["/interface/print", "=.proplist="]);
    }

    #[test]
    fn where_without_value_has_no_equals() {
        let q = menu("/interface").where_("running").where_(("name", "ether1"));
        assert_eq!(q.filters().words(), vec!["?running", "?name=ether1"]);
    }

    #[test]
    fn plain_marking_drops_question_mark() {
        let q = menu("/interface").where_marked(("name", "ether1"), false);
        assert_eq!(q.filters().words(), vec!["name=ether1"]);
    }

    #[test]
    fn combinators_append_operators_after_condition() {
        let q = menu("/ip/route")
            .where_(("a", "1"))
            .or_where(("b", "2"))
            .where_not(("c", "3"))
            .and_where_not(("d", "4"));
        assert_eq!(
            q.filters().words(),
            vec!["?a=1", "?b=2", "?#|", "?c=3", "?#!", "?d=4", "?#!", "?#&"]
        );
    }

    #[test]
    fn comparison_helpers() {
        let q = menu("/interface")
            .where_higher("mtu", 1500)
            .where_lower("mtu", 9000)
            .where_exists("comment")
            .where_not_empty("name")
            .where_empty("comment")
            .where_not_exists("slave");
        assert_eq!(
            q.filters().words(),
            vec!["?>mtu=1500", "?<mtu=9000", "?>comment", "?>name", "?-comment", "?-slave"]
        );
    }

    #[test]
    fn options_are_plain_words() {
        let q = menu("/interface").options(["a", "b"]).option("c");
        assert_eq!(q.filters().words(), vec!["a", "b", "c"]);
    }

    #[test]
    fn clone_forks_the_chain() {
        let base = menu("/interface").where_(("type", "ether"));
        let fork = base.clone().and_where(("running", true));
        assert_eq!(base.filters().len(), 1);
        assert_eq!(fork.filters().words(), vec!["?type=ether", "?running=yes", "?#&"]);
    }

    #[test]
    fn strict_assembly_rejects_underflow() {
        let cfg = QueryConfig { strict_expressions: true, ..QueryConfig::default() };
        let q = MenuQuery::with_config(Arc::new(MemoryTransport::new()), "/interface", cfg)
            .where_raw(["?#&"]);
        assert!(q.assemble("/print").is_err());
        let lax = menu("/interface").where_raw(["?#&"]);
        assert!(lax.assemble("/print").is_ok());
    }
}
