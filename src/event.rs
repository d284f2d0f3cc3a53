// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences while running [`Feature`]s.
//!
//! For every [`Feature`] a [`Writer`] receives, in order:
//! 1. [`Event::Uri`] and [`Event::Feature`];
//! 2. for each [`Element`], the events of its run (see below);
//! 3. [`Event::Eof`].
//!
//! A single scenario run is bracketed by [`Event::ScenarioStarted`] and
//! [`Event::ScenarioFinished`], with the [`Event::Background`] and its
//! [`Event::Step`]s going ahead of the scenario header and its own
//! [`Event::Step`]s. A [`ScenarioOutline`] announces itself and its
//! [`Examples`] first, and then runs every [`ExampleScenario`] this way.
//!
//! [`Element`]: crate::Element
//! [`Examples`]: gherkin::Examples
//! [`ExampleScenario`]: crate::ExampleScenario
//! [`Feature`]: crate::Feature
//! [`ScenarioOutline`]: crate::ScenarioOutline
//! [`Writer`]: crate::Writer

use std::sync::Arc;

use crate::{ElementId, ExampleScenario};

/// Event emitted while running [`Feature`]s.
///
/// [`Feature`]: crate::Feature
#[derive(Clone, Debug)]
pub enum Event {
    /// Identifier of the [`Feature`] starting to run.
    ///
    /// [`Feature`]: crate::Feature
    Uri(String),

    /// Header of the [`Feature`] starting to run.
    ///
    /// [`Feature`]: crate::Feature
    Feature(Arc<gherkin::Feature>),

    /// Scenario run started, before any hooks.
    ScenarioStarted(ElementId),

    /// [`Background`] about to run its [`Step`]s for the current scenario.
    ///
    /// [`Background`]: gherkin::Background
    /// [`Step`]: gherkin::Step
    Background(Arc<gherkin::Background>),

    /// Plain [`Scenario`] about to run its [`Step`]s.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    Scenario(Arc<gherkin::Scenario>),

    /// [`ScenarioOutline`] about to run its [`ExampleScenario`]s.
    ///
    /// [`ScenarioOutline`]: crate::ScenarioOutline
    ScenarioOutline(Arc<gherkin::Scenario>),

    /// [`Examples`] of the announced [`ScenarioOutline`].
    ///
    /// [`Examples`]: gherkin::Examples
    /// [`ScenarioOutline`]: crate::ScenarioOutline
    Examples(Arc<gherkin::Examples>),

    /// [`ExampleScenario`] about to run its [`Step`]s.
    ///
    /// [`Step`]: gherkin::Step
    Example(Arc<ExampleScenario>),

    /// [`Step`] about to be run.
    ///
    /// [`Step`]: gherkin::Step
    Step(Arc<gherkin::Step>),

    /// Scenario run finished, after all hooks.
    ScenarioFinished(ElementId),

    /// [`Feature`] finished running.
    ///
    /// [`Feature`]: crate::Feature
    Eof,
}

impl Event {
    /// Short name of this [`Event`] kind, handy for logging and assertions.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Uri(_) => "uri",
            Self::Feature(_) => "feature",
            Self::ScenarioStarted(_) => "scenario started",
            Self::Background(_) => "background",
            Self::Scenario(_) => "scenario",
            Self::ScenarioOutline(_) => "scenario outline",
            Self::Examples(_) => "examples",
            Self::Example(_) => "example",
            Self::Step(_) => "step",
            Self::ScenarioFinished(_) => "scenario finished",
            Self::Eof => "eof",
        }
    }
}
