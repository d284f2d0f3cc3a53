// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of loading and building [`Feature`]s.
//!
//! Every error here is fatal to the operation producing it: a [`Feature`]
//! failing to build is discarded as a whole rather than kept half-populated.
//!
//! [`Feature`]: crate::Feature

use std::{error::Error as StdError, io, sync::Arc};

use derive_more::with_trait::Display;
use itertools::Itertools as _;

use crate::Filter;

#[doc(inline)]
pub use crate::{
    feature::builder::ProtocolViolation, outline::UnresolvedPlaceholder,
};

/// Result of loading and building [`Feature`]s.
///
/// [`Feature`]: crate::Feature
pub type Result<T> = std::result::Result<T, Error>;

/// Error of loading or building [`Feature`]s.
///
/// [`Feature`]: crate::Feature
#[derive(Clone, Debug, Display, derive_more::Error)]
pub enum Error {
    /// No `.feature` documents were found at any of the given paths.
    #[display("No features found at [{}]", paths.iter().join(", "))]
    NotFound {
        /// Paths which were searched.
        #[error(not(source))]
        paths: Vec<String>,
    },

    /// Documents were found, but all of their content was filtered out.
    #[display(
        "None of the features at [{}] matched the filters: [{}]",
        paths.iter().join(", "),
        filters.iter().join(", ")
    )]
    NoMatch {
        /// Paths which were searched.
        #[error(not(source))]
        paths: Vec<String>,

        /// [`Filter`]s which excluded everything.
        #[error(not(source))]
        filters: Vec<Filter>,
    },

    /// Failed to read a document.
    #[display("Failed to read feature `{uri}`: {source}")]
    Read {
        /// Identifier of the unreadable document.
        uri: String,

        /// Underlying I/O error.
        source: Arc<io::Error>,
    },

    /// Failed to parse a document.
    #[display("Failed to parse feature `{uri}`: {source}")]
    Parse {
        /// Identifier of the malformed document.
        uri: String,

        /// Underlying parsing error.
        source: Arc<dyn StdError + Send + Sync>,
    },

    /// Builder callbacks were invoked out of order.
    #[display("{_0}")]
    Protocol(#[error(source)] ProtocolViolation),

    /// [`Scenario Outline`][1] step refers to an unknown column.
    ///
    /// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    #[display("{_0}")]
    Placeholder(#[error(source)] UnresolvedPlaceholder),
}

impl Error {
    /// Creates a new [`Error::Read`].
    #[must_use]
    pub fn read(uri: impl Into<String>, source: io::Error) -> Self {
        Self::Read {
            uri: uri.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new [`Error::Parse`].
    #[must_use]
    pub fn parse(
        uri: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            uri: uri.into(),
            source: Arc::new(source),
        }
    }

    /// Indicates whether nothing was found at the searched paths.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Indicates whether documents were found, but filtered out completely.
    #[must_use]
    pub const fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }
}

impl From<ProtocolViolation> for Error {
    fn from(err: ProtocolViolation) -> Self {
        Self::Protocol(err)
    }
}

impl From<UnresolvedPlaceholder> for Error {
    fn from(err: UnresolvedPlaceholder) -> Self {
        Self::Placeholder(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn not_found_names_paths() {
        let err = Error::NotFound {
            paths: vec!["a".into(), "b/c".into()],
        };

        assert!(err.is_not_found());
        assert!(!err.is_no_match());
        assert_eq!(err.to_string(), "No features found at [a, b/c]");
    }

    #[test]
    fn no_match_names_paths_and_filters() {
        let err = Error::NoMatch {
            paths: vec!["features".into()],
            filters: vec![Filter::lines([3, 7])],
        };

        assert!(err.is_no_match());
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "None of the features at [features] matched the filters: \
             [lines 3, 7]",
        );
    }

    #[test]
    fn read_keeps_source() {
        let err = Error::read(
            "missing.feature",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );

        assert_eq!(
            err.to_string(),
            "Failed to read feature `missing.feature`: gone",
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn builder_errors_are_sources() {
        let err = Error::from(UnresolvedPlaceholder {
            name: "x".into(),
            uri: "a.feature".into(),
            position: gherkin::LineCol { line: 4, col: 7 },
        });

        assert!(matches!(err, Error::Placeholder(_)));
        assert!(err.source().is_some());
    }
}
