// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [Scenario Outline][1]s and their expansion into [`ExampleScenario`]s.
//!
//! So this one:
//! ```gherkin
//! Feature: Hungry
//!   Scenario Outline: eating <eat>
//!     Given there are <start> cucumbers
//!     When I eat <eat> cucumbers
//!     Then I should have <left> cucumbers
//!
//!     Examples:
//!       | start | eat | left |
//!       |    12 |   5 |    7 |
//!       |    20 |   4 |   16 |
//! ```
//!
//! Is run as two [`ExampleScenario`]s, `eating 5` and `eating 4`, with the
//! values of each row substituted into the step text, docstrings and tables.
//!
//! [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline

use std::{iter, sync::Arc};

use derive_more::with_trait::{Display, Error};
use lazy_regex::regex;
use linked_hash_map::LinkedHashMap;

use crate::element::{merge_tags, Background, ElementId};

/// [Scenario Outline][1] along with its [`Examples`] and the
/// [`ExampleScenario`]s materialized out of them.
///
/// [`Examples`]: gherkin::Examples
/// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
#[derive(Clone, Debug)]
pub struct ScenarioOutline {
    /// Identifier of this [`ScenarioOutline`].
    pub id: ElementId,

    /// Declaration of this [`ScenarioOutline`], without its [`Step`]s and
    /// [`Examples`].
    ///
    /// [`Examples`]: gherkin::Examples
    /// [`Step`]: gherkin::Step
    pub source: Arc<gherkin::Scenario>,

    /// [`Feature`] tags followed by the own ones.
    ///
    /// [`Feature`]: gherkin::Feature
    pub tags: Vec<String>,

    /// [`Background`] which was current when this [`ScenarioOutline`] was
    /// declared.
    pub background: Option<Arc<Background>>,

    /// [`Step`]s with placeholders intact.
    ///
    /// [`Step`]: gherkin::Step
    pub(crate) steps: Vec<Arc<gherkin::Step>>,
    examples: Vec<Arc<gherkin::Examples>>,
    units: Vec<Arc<ExampleScenario>>,
}

impl ScenarioOutline {
    /// Wraps the given declaration, inheriting `feature_tags`.
    #[must_use]
    pub fn new(
        mut source: gherkin::Scenario,
        feature_tags: &[String],
        background: Option<Arc<Background>>,
    ) -> Self {
        source.steps.clear();
        source.examples.clear();
        let tags = merge_tags(feature_tags, &source.tags);
        Self {
            id: ElementId::new(&source.name, source.position.line),
            source: Arc::new(source),
            tags,
            background,
            steps: Vec::new(),
            examples: Vec::new(),
            units: Vec::new(),
        }
    }

    /// Name of this [`ScenarioOutline`], with its placeholders intact.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.source.name
    }

    /// Declared [`Examples`], in declaration order.
    ///
    /// [`Examples`]: gherkin::Examples
    #[must_use]
    pub fn examples(&self) -> &[Arc<gherkin::Examples>] {
        &self.examples
    }

    /// [`ExampleScenario`]s of all the [`Examples`] rows: [`Examples`] in
    /// declaration order, rows in declaration order within each of them.
    ///
    /// [`Examples`]: gherkin::Examples
    #[must_use]
    pub fn run_units(&self) -> &[Arc<ExampleScenario>] {
        &self.units
    }

    /// Appends the given [`Examples`] and materializes their rows against the
    /// already declared [`Step`]s.
    ///
    /// Nothing is appended on failure.
    ///
    /// # Errors
    ///
    /// If a placeholder has no matching [`Examples`] column.
    ///
    /// [`Examples`]: gherkin::Examples
    /// [`Step`]: gherkin::Step
    pub fn add_examples(
        &mut self,
        examples: gherkin::Examples,
        uri: &str,
    ) -> Result<(), UnresolvedPlaceholder> {
        let units = self.expand(self.examples.len(), &examples, uri)?;
        self.examples.push(Arc::new(examples));
        self.units.extend(units.into_iter().map(Arc::new));
        Ok(())
    }

    /// Materializes every row of the given [`Examples`] into an
    /// [`ExampleScenario`].
    ///
    /// The first table row is the header naming the columns. [`Examples`]
    /// without a table or without data rows produce nothing.
    ///
    /// # Errors
    ///
    /// If a placeholder has no matching [`Examples`] column.
    ///
    /// [`Examples`]: gherkin::Examples
    pub fn expand(
        &self,
        index: usize,
        examples: &gherkin::Examples,
        uri: &str,
    ) -> Result<Vec<ExampleScenario>, UnresolvedPlaceholder> {
        let Some((table, (header, rows))) = examples
            .table
            .as_ref()
            .and_then(|t| t.rows.split_first().map(|split| (t, split)))
        else {
            return Ok(Vec::new());
        };
        let tags = merge_tags(&self.tags, &examples.tags);

        rows.iter()
            .enumerate()
            .map(|(n, row)| -> Result<_, UnresolvedPlaceholder> {
                let mut values = LinkedHashMap::new();
                for (column, value) in header.iter().zip(row) {
                    if !values.contains_key(column) {
                        values.insert(column.clone(), value.clone());
                    }
                }

                let mut position = table.position;
                position.line += n + 1;

                let unresolved = |name: String, position: gherkin::LineCol| {
                    UnresolvedPlaceholder {
                        name,
                        uri: uri.to_owned(),
                        position,
                    }
                };

                let name = substitute(self.name(), &values)
                    .map_err(|name| unresolved(name, position))?;
                let steps = self
                    .steps
                    .iter()
                    .map(|s| -> Result<_, UnresolvedPlaceholder> {
                        let mut step = (**s).clone();
                        for text in iter::once(&mut step.value)
                            .chain(step.docstring.iter_mut())
                            .chain(step.table.iter_mut().flat_map(|t| {
                                t.rows.iter_mut().flat_map(|r| r.iter_mut())
                            }))
                        {
                            *text = substitute(text, &values)
                                .map_err(|name| unresolved(name, s.position))?;
                        }
                        Ok(Arc::new(step))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(ExampleScenario {
                    id: ElementId::example(&self.id, index + 1, n + 2),
                    name,
                    tags: tags.clone(),
                    position,
                    background: self.background.clone(),
                    values,
                    steps,
                })
            })
            .collect()
    }
}

/// Single run of a [`ScenarioOutline`] with the values of one [`Examples`]
/// row substituted.
///
/// [`Examples`]: gherkin::Examples
#[derive(Clone, Debug)]
pub struct ExampleScenario {
    /// Identifier of this [`ExampleScenario`], sharing the name key of its
    /// [`ScenarioOutline`].
    pub id: ElementId,

    /// Name of the [`ScenarioOutline`] with the values substituted.
    pub name: String,

    /// [`ScenarioOutline`] tags followed by the [`Examples`] ones.
    ///
    /// [`Examples`]: gherkin::Examples
    pub tags: Vec<String>,

    /// Position of the row this [`ExampleScenario`] was materialized from.
    pub position: gherkin::LineCol,

    /// [`Background`] of the [`ScenarioOutline`].
    pub background: Option<Arc<Background>>,

    /// Values of the row, keyed by column names in declaration order.
    pub values: LinkedHashMap<String, String>,

    steps: Vec<Arc<gherkin::Step>>,
}

impl ExampleScenario {
    /// [`Step`]s of the [`ScenarioOutline`] with the values substituted.
    ///
    /// [`Step`]: gherkin::Step
    #[must_use]
    pub fn steps(&self) -> &[Arc<gherkin::Step>] {
        &self.steps
    }
}

/// Error of a [`ScenarioOutline`] placeholder having no [`Examples`] column
/// to take a value from.
///
/// [`Examples`]: gherkin::Examples
#[derive(Clone, Debug, Display, Error)]
#[display(
    "Failed to resolve <{name}> at {uri}:{}:{}",
    position.line,
    position.col
)]
pub struct UnresolvedPlaceholder {
    /// Name of the placeholder.
    #[error(not(source))]
    pub name: String,

    /// Identifier of the document declaring the placeholder.
    #[error(not(source))]
    pub uri: String,

    /// Position of the declaration using the placeholder.
    #[error(not(source))]
    pub position: gherkin::LineCol,
}

/// Replaces every `<name>` placeholder in the `text` with its value.
///
/// Returns the name of the first placeholder missing in `values`.
fn substitute(
    text: &str,
    values: &LinkedHashMap<String, String>,
) -> Result<String, String> {
    let mut missing = None;
    let replaced = regex!(r"<([^<>\s](?:[^<>]*[^<>\s])?)>")
        .replace_all(text, |cap: &regex::Captures<'_>| {
            let name = &cap[1];
            values.get(name).cloned().unwrap_or_else(|| {
                missing.get_or_insert_with(|| name.to_owned());
                String::new()
            })
        })
        .into_owned();

    missing.map_or(Ok(replaced), Err)
}
