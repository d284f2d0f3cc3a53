// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI (command line interface) options for loading [`Features`].
//!
//! [`Features`]: crate::Features

use regex::Regex;
use smart_default::SmartDefault;

use crate::{filter::InvalidTagExpression, Filter};

pub use clap::{Args, Parser};

/// Default path to look for `.feature` documents at.
pub const DEFAULT_PATH: &str = "tests/features";

/// CLI options deciding which [`Features`] to load and which of their
/// [`Element`]s to keep.
///
/// # Example
///
/// ```rust,no_run
/// # use cucumber_feature::{cli, load, resource::FsResourceLoader};
/// #
/// let opts = cli::Opts::parsed();
/// let features = load(&FsResourceLoader::new(), &opts.paths, &opts.filters());
/// ```
///
/// [`Element`]: crate::Element
/// [`Features`]: crate::Features
#[derive(Clone, Debug, SmartDefault, clap::Parser)]
#[command(
    name = "cucumber",
    about = "Load the features and run their scenarios."
)]
pub struct Opts {
    /// Paths to `.feature` files or directories containing them.
    #[arg(value_name = "path", default_value = DEFAULT_PATH)]
    #[default(vec![DEFAULT_PATH.to_owned()])]
    pub paths: Vec<String>,

    /// Regex to filter scenarios by their name.
    #[arg(
        id = "name",
        long = "name",
        short = 'n',
        value_name = "regex",
        visible_alias = "scenario-name"
    )]
    pub re_filter: Option<Regex>,

    /// Tag expression to filter scenarios by.
    ///
    /// Note: Tags from Feature, Rule, Scenario and Examples are merged
    /// together on filtering, so be careful about conflicting tags on
    /// different levels.
    #[arg(
        id = "tags",
        long = "tags",
        short = 't',
        value_name = "tagexpr",
        value_parser = parse_tags,
        conflicts_with = "name"
    )]
    pub tags_filter: Option<Filter>,

    /// Lines scenarios, outlines or their examples should start at.
    #[arg(id = "line", long = "line", short = 'l', value_name = "line")]
    pub lines_filter: Vec<usize>,
}

impl Opts {
    /// Shortcut for [`clap::Parser::parse()`], which doesn't require the trait
    /// being imported.
    #[must_use]
    pub fn parsed() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Collects the given filtering options into [`Filter`]s, all of which an
    /// [`Element`] has to satisfy.
    ///
    /// [`Element`]: crate::Element
    #[must_use]
    pub fn filters(&self) -> Vec<Filter> {
        self.re_filter
            .clone()
            .map(Filter::Name)
            .into_iter()
            .chain(self.tags_filter.clone())
            .chain(
                (!self.lines_filter.is_empty())
                    .then(|| Filter::lines(self.lines_filter.iter().copied())),
            )
            .collect()
    }
}

fn parse_tags(expression: &str) -> Result<Filter, InvalidTagExpression> {
    Filter::tags(expression)
}
