// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Criteria deciding which [`Element`]s make it into a [`Feature`].
//!
//! [`Element`]: crate::Element
//! [`Feature`]: crate::Feature

use derive_more::with_trait::{Display, Error};
use gherkin::tagexpr::TagOperation;
use itertools::Itertools as _;
use regex::Regex;

/// Criterion an [`Element`] has to satisfy to be kept while parsing.
///
/// [`Element`]: crate::Element
#[derive(Clone, Debug, Display)]
pub enum Filter {
    /// Tag expression evaluated against merged [`Feature`], [`Rule`],
    /// [`Scenario`] and [`Examples`] tags.
    ///
    /// [`Examples`]: gherkin::Examples
    /// [`Feature`]: gherkin::Feature
    /// [`Rule`]: gherkin::Rule
    /// [`Scenario`]: gherkin::Scenario
    #[display("tags `{expression}`")]
    Tags {
        /// Original text of the expression.
        expression: String,

        /// Parsed expression.
        operation: TagOperation,
    },

    /// [`Regex`] an [`Element`] name should match.
    ///
    /// [`Element`]: crate::Element
    #[display("name /{}/", _0.as_str())]
    Name(Regex),

    /// Lines an [`Element`] (or one of its [`Examples`]) should start at.
    ///
    /// [`Element`]: crate::Element
    /// [`Examples`]: gherkin::Examples
    #[display("lines {}", _0.iter().join(", "))]
    Lines(Vec<usize>),
}

impl Filter {
    /// Parses a tag expression into a [`Filter::Tags`].
    ///
    /// # Errors
    ///
    /// If the `expression` is not a valid tag expression.
    pub fn tags(
        expression: impl Into<String>,
    ) -> Result<Self, InvalidTagExpression> {
        let expression = expression.into();
        match expression.parse::<TagOperation>() {
            Ok(operation) => Ok(Self::Tags {
                expression,
                operation,
            }),
            Err(e) => Err(InvalidTagExpression {
                reason: e.to_string(),
                expression,
            }),
        }
    }

    /// Creates a [`Filter::Lines`] out of the given line numbers.
    #[must_use]
    pub fn lines(lines: impl IntoIterator<Item = usize>) -> Self {
        Self::Lines(lines.into_iter().collect())
    }

    /// Checks whether the given [`Candidate`] satisfies this [`Filter`].
    #[must_use]
    pub fn matches(&self, candidate: &Candidate<'_>) -> bool {
        match self {
            Self::Tags { operation, .. } => {
                eval_tags(operation, candidate.tags.iter().map(String::as_str))
            }
            Self::Name(re) => re.is_match(candidate.name),
            Self::Lines(lines) => {
                candidate.lines.iter().any(|l| lines.contains(l))
            }
        }
    }

    /// Checks whether the given [`Candidate`] satisfies all the `filters`.
    ///
    /// Vacuously `true` for no `filters`.
    #[must_use]
    pub fn all(filters: &[Self], candidate: &Candidate<'_>) -> bool {
        filters.iter().all(|f| f.matches(candidate))
    }
}

/// Subject of a [`Filter`] check: what is known about an [`Element`] at the
/// moment it is parsed.
///
/// [`Element`]: crate::Element
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    /// Name of the [`Element`].
    ///
    /// [`Element`]: crate::Element
    pub name: &'a str,

    /// All the tags applying to the [`Element`], inherited ones included.
    ///
    /// [`Element`]: crate::Element
    pub tags: &'a [String],

    /// Lines the [`Element`] is declared at.
    ///
    /// [`Element`]: crate::Element
    pub lines: &'a [usize],
}

/// Error of parsing a tag expression.
#[derive(Clone, Debug, Display, Error)]
#[display("Invalid tag expression `{expression}`: {reason}")]
pub struct InvalidTagExpression {
    /// Rejected expression.
    #[error(not(source))]
    pub expression: String,

    /// Reason of the rejection.
    #[error(not(source))]
    pub reason: String,
}

/// Evaluates the [`TagOperation`] for the given `tags`.
///
/// The leading `@` is insignificant on both sides.
fn eval_tags<'t, I>(op: &TagOperation, tags: I) -> bool
where
    I: Iterator<Item = &'t str> + Clone,
{
    match op {
        TagOperation::And(l, r) => {
            eval_tags(l, tags.clone()) && eval_tags(r, tags)
        }
        TagOperation::Or(l, r) => {
            eval_tags(l, tags.clone()) || eval_tags(r, tags)
        }
        TagOperation::Not(t) => !eval_tags(t, tags),
        TagOperation::Tag(t) => {
            let t = t.trim_start_matches('@');
            tags.into_iter().any(|tag| tag.trim_start_matches('@') == t)
        }
    }
}
