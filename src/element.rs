// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building blocks of a [`Feature`]: [`Background`]s, [`Scenario`]s and
//! [`ScenarioOutline`]s.
//!
//! [`Feature`]: crate::Feature

use std::sync::Arc;

use derive_more::with_trait::Display;
use lazy_regex::regex;
use sealed::sealed;

use crate::outline::ScenarioOutline;

/// Identifier of an [`Element`] or of an [`ExampleScenario`].
///
/// Consists of `;`-separated segments, the first one being the slug of the
/// name. Segments after it only disambiguate declarations of the same name.
///
/// [`ExampleScenario`]: crate::ExampleScenario
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
pub struct ElementId(String);

impl ElementId {
    /// Separator of the [`ElementId`] segments.
    pub const SEPARATOR: char = ';';

    /// Creates an [`ElementId`] of an [`Element`] declared at the given `line`.
    #[must_use]
    pub fn new(name: &str, line: usize) -> Self {
        Self(format!("{}{}{line}", slug(name), Self::SEPARATOR))
    }

    /// Creates an [`ElementId`] of a single [`Examples`] row.
    ///
    /// [`Examples`]: gherkin::Examples
    #[must_use]
    pub fn example(outline: &Self, examples: usize, row: usize) -> Self {
        Self(format!(
            "{}{sep}{examples}{sep}{row}",
            outline.name_key(),
            sep = Self::SEPARATOR,
        ))
    }

    /// Returns the part of this [`ElementId`] identifying the name, used to
    /// detect repeated declarations.
    #[must_use]
    pub fn name_key(&self) -> &str {
        self.0
            .split_once(Self::SEPARATOR)
            .map_or(self.0.as_str(), |(key, _)| key)
    }

    /// Returns this [`ElementId`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turns a `name` into a lowercased identifier without spaces.
#[must_use]
pub fn slug(name: &str) -> String {
    regex!(r"[\s_]+").replace_all(name, "-").to_lowercase()
}

/// Something holding an ordered list of [`Step`]s.
///
/// [`Step`]: gherkin::Step
#[sealed]
pub trait StepContainer {
    /// Returns the [`Step`]s in declaration order.
    ///
    /// [`Step`]: gherkin::Step
    #[must_use]
    fn steps(&self) -> &[Arc<gherkin::Step>];

    /// Appends a [`Step`] declared after the already present ones.
    ///
    /// [`Step`]: gherkin::Step
    fn push_step(&mut self, step: gherkin::Step);
}

/// [Background] shared by the [`Element`]s declared after it.
///
/// Once attached to an [`Element`] it's frozen behind an [`Arc`].
///
/// [Background]: https://cucumber.io/docs/gherkin/reference#background
#[derive(Clone, Debug)]
pub struct Background {
    /// Declaration of this [`Background`], without its [`Step`]s.
    ///
    /// [`Step`]: gherkin::Step
    pub source: Arc<gherkin::Background>,

    steps: Vec<Arc<gherkin::Step>>,
}

impl Background {
    /// Wraps the given declaration. Its [`Step`]s are expected to be pushed
    /// afterwards, so the declared ones are dropped.
    ///
    /// [`Step`]: gherkin::Step
    #[must_use]
    pub fn new(mut source: gherkin::Background) -> Self {
        source.steps.clear();
        Self {
            source: Arc::new(source),
            steps: Vec::new(),
        }
    }
}

#[sealed]
impl StepContainer for Background {
    fn steps(&self) -> &[Arc<gherkin::Step>] {
        &self.steps
    }

    fn push_step(&mut self, step: gherkin::Step) {
        self.steps.push(Arc::new(step));
    }
}

/// Plain [Scenario].
///
/// [Scenario]: https://cucumber.io/docs/gherkin/reference#example
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Identifier of this [`Scenario`].
    pub id: ElementId,

    /// Declaration of this [`Scenario`], without its [`Step`]s.
    ///
    /// [`Step`]: gherkin::Step
    pub source: Arc<gherkin::Scenario>,

    /// [`Feature`] tags followed by the own ones.
    ///
    /// [`Feature`]: gherkin::Feature
    pub tags: Vec<String>,

    /// [`Background`] which was current when this [`Scenario`] was declared.
    pub background: Option<Arc<Background>>,

    steps: Vec<Arc<gherkin::Step>>,
}

impl Scenario {
    /// Wraps the given declaration, inheriting `feature_tags`.
    #[must_use]
    pub fn new(
        mut source: gherkin::Scenario,
        feature_tags: &[String],
        background: Option<Arc<Background>>,
    ) -> Self {
        source.steps.clear();
        let tags = merge_tags(feature_tags, &source.tags);
        Self {
            id: ElementId::new(&source.name, source.position.line),
            source: Arc::new(source),
            tags,
            background,
            steps: Vec::new(),
        }
    }

    /// Name of this [`Scenario`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.source.name
    }
}

#[sealed]
impl StepContainer for Scenario {
    fn steps(&self) -> &[Arc<gherkin::Step>] {
        &self.steps
    }

    fn push_step(&mut self, step: gherkin::Step) {
        self.steps.push(Arc::new(step));
    }
}

/// Top-level executable declaration of a [`Feature`].
///
/// [`Feature`]: crate::Feature
#[derive(Clone, Debug)]
pub enum Element {
    /// Plain [`Scenario`].
    Scenario(Scenario),

    /// [`ScenarioOutline`] with its [`Examples`].
    ///
    /// [`Examples`]: gherkin::Examples
    Outline(ScenarioOutline),
}

impl Element {
    /// Identifier of this [`Element`].
    #[must_use]
    pub const fn id(&self) -> &ElementId {
        match self {
            Self::Scenario(sc) => &sc.id,
            Self::Outline(o) => &o.id,
        }
    }

    /// Name of this [`Element`].
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scenario(sc) => sc.name(),
            Self::Outline(o) => o.name(),
        }
    }

    /// Tags of this [`Element`], inherited [`Feature`] ones included.
    ///
    /// [`Feature`]: gherkin::Feature
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Scenario(sc) => &sc.tags,
            Self::Outline(o) => &o.tags,
        }
    }

    /// [`Background`] attached to this [`Element`], if any.
    #[must_use]
    pub fn background(&self) -> Option<&Arc<Background>> {
        match self {
            Self::Scenario(sc) => sc.background.as_ref(),
            Self::Outline(o) => o.background.as_ref(),
        }
    }

    /// Returns the [`Scenario`] if this is one.
    #[must_use]
    pub const fn as_scenario(&self) -> Option<&Scenario> {
        match self {
            Self::Scenario(sc) => Some(sc),
            Self::Outline(_) => None,
        }
    }

    /// Returns the [`ScenarioOutline`] if this is one.
    #[must_use]
    pub const fn as_outline(&self) -> Option<&ScenarioOutline> {
        match self {
            Self::Outline(o) => Some(o),
            Self::Scenario(_) => None,
        }
    }
}

#[sealed]
impl StepContainer for ScenarioOutline {
    fn steps(&self) -> &[Arc<gherkin::Step>] {
        &self.steps
    }

    fn push_step(&mut self, step: gherkin::Step) {
        self.steps.push(Arc::new(step));
    }
}

#[sealed]
impl StepContainer for Element {
    fn steps(&self) -> &[Arc<gherkin::Step>] {
        match self {
            Self::Scenario(sc) => sc.steps(),
            Self::Outline(o) => o.steps(),
        }
    }

    fn push_step(&mut self, step: gherkin::Step) {
        match self {
            Self::Scenario(sc) => sc.push_step(step),
            Self::Outline(o) => o.push_step(step),
        }
    }
}

/// Concatenates `inherited` and `own` tags, skipping repeated ones.
pub(crate) fn merge_tags(inherited: &[String], own: &[String]) -> Vec<String> {
    let mut tags = inherited.to_vec();
    for t in own {
        if !tags.contains(t) {
            tags.push(t.clone());
        }
    }
    tags
}
