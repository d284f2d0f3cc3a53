// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loading [`Features`] out of the documents found at the given paths.

use derive_more::{Deref, IntoIterator};

use crate::{
    parser::{Basic, Parser},
    resource::{Resource as _, ResourceLoader},
    Error, Feature, Filter, Result,
};

/// Suffix of the documents [`Feature`]s are loaded from.
pub const FEATURE_SUFFIX: &str = ".feature";

/// Loaded [`Feature`]s, ordered by their identifiers.
#[derive(Debug, Default, Deref, IntoIterator)]
#[into_iterator(owned, ref)]
pub struct Features(Vec<Feature>);

impl Features {
    /// Unwraps the loaded [`Feature`]s.
    #[must_use]
    pub fn into_inner(self) -> Vec<Feature> {
        self.0
    }
}

/// Loads [`Features`] from the `.feature` documents found at the given
/// `paths`, keeping only the [`Element`]s satisfying all the `filters`.
///
/// See [`load_with()`] for details.
///
/// # Errors
///
/// See [`load_with()`].
///
/// [`Element`]: crate::Element
pub fn load<L, P>(loader: &L, paths: P, filters: &[Filter]) -> Result<Features>
where
    L: ResourceLoader + ?Sized,
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    load_with(loader, &Basic, paths, filters)
}

/// Loads [`Features`] from the `.feature` documents found at the given
/// `paths` with the given [`Parser`], keeping only the [`Element`]s
/// satisfying all the `filters`.
///
/// With any `filters` given, the documents left without [`Element`]s are
/// dropped. The result is sorted by [`Feature::uri()`].
///
/// # Errors
///
/// - [`Error::NotFound`] if no documents were found (no `paths` included);
/// - [`Error::NoMatch`] if every found document was dropped;
/// - [`Error::Read`], [`Error::Parse`], [`Error::Protocol`] or
///   [`Error::Placeholder`] if any document fails, aborting the whole load.
///
/// [`Element`]: crate::Element
pub fn load_with<L, R, P>(
    loader: &L,
    parser: &R,
    paths: P,
    filters: &[Filter],
) -> Result<Features>
where
    L: ResourceLoader + ?Sized,
    R: Parser + ?Sized,
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    let paths = paths
        .into_iter()
        .map(|p| p.as_ref().to_owned())
        .collect::<Vec<_>>();

    let mut found = 0;
    let mut features = Vec::new();
    for path in &paths {
        for resource in loader.resources(path, FEATURE_SUFFIX) {
            found += 1;
            let uri = resource.uri();
            tracing::debug!(uri, "feature found");

            let content = resource.read().map_err(|e| Error::read(uri, e))?;
            let feature = parser.parse(uri, &content, filters)?;
            if !filters.is_empty() && feature.is_empty() {
                tracing::warn!(uri, "no scenarios matched the filters");
                continue;
            }
            features.push(feature);
        }
    }

    if found == 0 {
        return Err(Error::NotFound { paths });
    }
    if features.is_empty() {
        return Err(Error::NoMatch {
            paths,
            filters: filters.to_vec(),
        });
    }

    features.sort_by(|a, b| a.uri().cmp(b.uri()));
    tracing::info!(count = features.len(), "features loaded");
    Ok(Features(features))
}

#[cfg(test)]
mod tests {
    use crate::resource::StaticResource;

    use super::*;

    fn uris(features: &Features) -> Vec<&str> {
        features.iter().map(Feature::uri).collect()
    }

    fn resources() -> Vec<StaticResource> {
        vec![
            StaticResource::new(
                "features/b.feature",
                "Feature: B\n  @slow\n  Scenario: b\n    Given b\n",
            ),
            StaticResource::new(
                "features/a.feature",
                "Feature: A\n  Scenario: a\n    Given a\n",
            ),
        ]
    }

    #[test]
    fn sorts_by_uri() {
        let features =
            load(resources().as_slice(), ["features"], &[]).unwrap();

        assert_eq!(uris(&features), ["features/a.feature", "features/b.feature"]);
    }

    #[test]
    fn no_paths_is_not_found() {
        let err =
            load(resources().as_slice(), Vec::<String>::new(), &[]).unwrap_err();

        assert!(err.is_not_found(), "{err}");
    }

    #[test]
    fn nothing_at_paths_is_not_found() {
        let err = load(resources().as_slice(), ["missing"], &[]).unwrap_err();

        assert!(
            matches!(&err, Error::NotFound { paths } if paths == &["missing"]),
            "{err}",
        );
    }

    #[test]
    fn filtered_out_is_no_match() {
        let filters = [Filter::tags("@fast").unwrap()];

        let err =
            load(resources().as_slice(), ["features"], &filters).unwrap_err();

        assert!(err.is_no_match(), "{err}");
        assert_eq!(
            err.to_string(),
            "None of the features at [features] matched the filters: \
             [tags `@fast`]",
        );
    }

    #[test]
    fn drops_emptied_features_only_with_filters() {
        let filters = [Filter::tags("@slow").unwrap()];
        let with = load(resources().as_slice(), ["features"], &filters).unwrap();
        assert_eq!(uris(&with), ["features/b.feature"]);

        let empty = vec![StaticResource::new("e.feature", "Feature: E\n")];
        let without = load(empty.as_slice(), ["e.feature"], &[]).unwrap();
        assert_eq!(uris(&without), ["e.feature"]);
        assert!(without[0].is_empty());
    }

    #[test]
    fn parse_failure_aborts_load() {
        let mut resources = resources();
        resources.push(StaticResource::new(
            "features/c.feature",
            "Feature: C\n  Scenario Outline: o\n    Given <x>\n    \
             Examples:\n      | y |\n      | 1 |\n",
        ));

        let err = load(resources.as_slice(), ["features"], &[]).unwrap_err();

        assert!(matches!(err, Error::Placeholder(_)), "{err}");
    }
}
