//! Variable storage for infixcalc
//!
//! A session owns one [`Variables`] store. Entries are created or overwritten
//! by assignment (`name = value`) and never removed. Every key satisfies
//! [`is_identifier`].

use crate::lexer::{is_identifier, is_number};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("Invalid identifier")]
    InvalidIdentifier(String),
    #[error("Invalid assignment")]
    InvalidRightHandSide(String),
    #[error("Invalid assignment")]
    MultipleEquals,
    #[error("Unknown variable")]
    UnknownVariable(String),
}

/// Mapping from variable name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: HashMap<String, i64>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Bind `name` to `value`, rejecting names that are not identifiers
    pub fn set(&mut self, name: &str, value: i64) -> Result<(), AssignmentError> {
        if !is_identifier(name) {
            return Err(AssignmentError::InvalidIdentifier(name.to_string()));
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All bound names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.keys().cloned().collect();
        names.sort();
        names
    }

    /// Handle an assignment line such as `a = 3` or `b = a`.
    ///
    /// Requires exactly one `=`, an identifier on the left and either an
    /// integer literal or a bound identifier on the right. The store is only
    /// touched when everything checks out. Returns the bound name and value.
    pub fn assign(&mut self, line: &str) -> Result<(String, i64), AssignmentError> {
        let parts: Vec<&str> = line.split('=').collect();
        let [left, right] = parts.as_slice() else {
            return Err(AssignmentError::MultipleEquals);
        };
        let left = left.trim();
        let right = right.trim();

        if !is_identifier(left) {
            return Err(AssignmentError::InvalidIdentifier(left.to_string()));
        }

        let value = if is_number(right) {
            right
                .parse::<i64>()
                .map_err(|_| AssignmentError::InvalidRightHandSide(right.to_string()))?
        } else if is_identifier(right) {
            self.get(right)
                .ok_or_else(|| AssignmentError::UnknownVariable(right.to_string()))?
        } else {
            return Err(AssignmentError::InvalidRightHandSide(right.to_string()));
        };

        self.set(left, value)?;
        tracing::debug!(name = left, value, "assigned");
        Ok((left.to_string(), value))
    }
}
