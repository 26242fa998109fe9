//! Query line parsing: tokenize, validate, then split into OR-separated AND-groups.
//!
//! `and` and `or` are reserved operators everywhere in a query. `or` separates
//! groups; `and` is accepted between words but means the same as plain adjacency.

use crate::error::QueryError;
use crate::tokenizer::normalize_word;
use std::fmt;

pub const AND: &str = "and";
pub const OR: &str = "or";

fn is_operator(token: &str) -> bool {
    token == AND || token == OR
}

/// A parsed query. Always holds at least one group, and every group at least one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    groups: Vec<Vec<String>>,
}

impl Query {
    pub fn parse(line: &str) -> Result<Query, QueryError> {
        let tokens = tokenize(line);
        validate(&tokens)?;
        Ok(Query { groups: group_by_or(&tokens) })
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{}", group.join(" and "))?;
        }
        Ok(())
    }
}

/// Splits on whitespace and lowercases each token.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(normalize_word).collect()
}

pub fn validate(tokens: &[String]) -> Result<(), QueryError> {
    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(QueryError::Empty),
    };
    if is_operator(first) {
        return Err(QueryError::LeadingOperator(first.clone()));
    }
    if let Some(pair) = tokens.windows(2).find(|w| is_operator(&w[0]) && is_operator(&w[1])) {
        return Err(QueryError::AdjacentOperators(pair[0].clone(), pair[1].clone()));
    }
    if is_operator(last) {
        return Err(QueryError::TrailingOperator(last.clone()));
    }
    Ok(())
}

/// Groups validated tokens. Operators are consumed as separators.
pub fn group_by_or(tokens: &[String]) -> Vec<Vec<String>> {
    tokens
        .split(|t| t == OR)
        .map(|segment| segment.iter().filter(|t| *t != AND).cloned().collect::<Vec<_>>())
        .filter(|g| !g.is_empty())
        .collect()
}
