// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Driving built [`Feature`]s through a [`Runtime`], reporting [`Event`]s to
//! a [`Writer`].
//!
//! Everything happens sequentially, in declaration order. The first error
//! returned by the [`Runtime`] stops the run and is returned as is.

use std::sync::Arc;

use crate::{
    element::{Background, StepContainer as _},
    Element, ElementId, Event, Feature, Features, Writer,
};

/// What a [`Runtime`] is told about the scenario being run.
#[derive(Clone, Copy, Debug)]
pub struct ScenarioContext<'a> {
    /// Identifier of the scenario or of the [`ExampleScenario`].
    ///
    /// [`ExampleScenario`]: crate::ExampleScenario
    pub id: &'a ElementId,

    /// Name of the scenario, with [`Examples`] values substituted.
    ///
    /// [`Examples`]: gherkin::Examples
    pub name: &'a str,

    /// Tags of the scenario, inherited ones included.
    pub tags: &'a [String],
}

/// Executor of [`Step`]s and scenario hooks.
///
/// Step failures meant to be reported rather than to stop the run should be
/// sent to the [`Writer`] instead of being returned.
///
/// [`Step`]: gherkin::Step
pub trait Runtime {
    /// Error stopping the run.
    type Error;

    /// Hook run before every scenario, ahead of its [`Background`].
    ///
    /// # Errors
    ///
    /// If the run should stop.
    fn before(
        &mut self,
        _: &ScenarioContext<'_>,
        _: &mut dyn Writer,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Runs a single [`Step`] of the given scenario.
    ///
    /// # Errors
    ///
    /// If the run should stop.
    ///
    /// [`Step`]: gherkin::Step
    fn step(
        &mut self,
        scenario: &ScenarioContext<'_>,
        step: &gherkin::Step,
        writer: &mut dyn Writer,
    ) -> Result<(), Self::Error>;

    /// Hook run after every scenario, once all its steps are run.
    ///
    /// # Errors
    ///
    /// If the run should stop.
    fn after(
        &mut self,
        _: &ScenarioContext<'_>,
        _: &mut dyn Writer,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<R: Runtime + ?Sized> Runtime for &mut R {
    type Error = R::Error;

    fn before(
        &mut self,
        scenario: &ScenarioContext<'_>,
        writer: &mut dyn Writer,
    ) -> Result<(), Self::Error> {
        (**self).before(scenario, writer)
    }

    fn step(
        &mut self,
        scenario: &ScenarioContext<'_>,
        step: &gherkin::Step,
        writer: &mut dyn Writer,
    ) -> Result<(), Self::Error> {
        (**self).step(scenario, step, writer)
    }

    fn after(
        &mut self,
        scenario: &ScenarioContext<'_>,
        writer: &mut dyn Writer,
    ) -> Result<(), Self::Error> {
        (**self).after(scenario, writer)
    }
}

impl Features {
    /// Runs every [`Feature`] in collection order.
    ///
    /// # Errors
    ///
    /// First error returned by the `runtime`.
    pub fn run<R: Runtime + ?Sized>(
        &self,
        writer: &mut dyn Writer,
        runtime: &mut R,
    ) -> Result<(), R::Error> {
        for feature in self.iter() {
            feature.run(writer, runtime)?;
        }
        Ok(())
    }
}

impl Feature {
    /// Runs all the [`Element`]s of this [`Feature`] in declaration order,
    /// framed by [`Event::Uri`], [`Event::Feature`] and [`Event::Eof`].
    ///
    /// # Errors
    ///
    /// First error returned by the `runtime`. No [`Event::Eof`] is emitted
    /// then.
    pub fn run<R: Runtime + ?Sized>(
        &self,
        writer: &mut dyn Writer,
        runtime: &mut R,
    ) -> Result<(), R::Error> {
        let _span = tracing::info_span!("feature", uri = %self.uri()).entered();

        writer.handle_event(Event::Uri(self.uri().to_owned()));
        writer.handle_event(Event::Feature(Arc::clone(self.header())));
        for element in self.elements() {
            element.run(writer, runtime)?;
        }
        writer.handle_event(Event::Eof);
        Ok(())
    }
}

impl Element {
    /// Runs this [`Element`].
    ///
    /// A [`Scenario`] is run once. A [`ScenarioOutline`] announces its
    /// [`Examples`] and then runs each of its [`ExampleScenario`]s the same
    /// way a [`Scenario`] is run.
    ///
    /// # Errors
    ///
    /// First error returned by the `runtime`.
    ///
    /// [`Examples`]: gherkin::Examples
    /// [`ExampleScenario`]: crate::ExampleScenario
    /// [`Scenario`]: crate::Scenario
    /// [`ScenarioOutline`]: crate::ScenarioOutline
    pub fn run<R: Runtime + ?Sized>(
        &self,
        writer: &mut dyn Writer,
        runtime: &mut R,
    ) -> Result<(), R::Error> {
        match self {
            Self::Scenario(sc) => ScenarioRun {
                context: ScenarioContext {
                    id: &sc.id,
                    name: sc.name(),
                    tags: &sc.tags,
                },
                background: sc.background.as_deref(),
                header: Event::Scenario(Arc::clone(&sc.source)),
                steps: sc.steps(),
            }
            .execute(writer, runtime),
            Self::Outline(outline) => {
                writer.handle_event(Event::ScenarioOutline(Arc::clone(
                    &outline.source,
                )));
                for examples in outline.examples() {
                    writer.handle_event(Event::Examples(Arc::clone(examples)));
                }
                for unit in outline.run_units() {
                    ScenarioRun {
                        context: ScenarioContext {
                            id: &unit.id,
                            name: &unit.name,
                            tags: &unit.tags,
                        },
                        background: unit.background.as_deref(),
                        header: Event::Example(Arc::clone(unit)),
                        steps: unit.steps(),
                    }
                    .execute(writer, runtime)?;
                }
                Ok(())
            }
        }
    }
}

/// Single pass through the scenario lifecycle.
struct ScenarioRun<'a> {
    context: ScenarioContext<'a>,
    background: Option<&'a Background>,
    header: Event,
    steps: &'a [Arc<gherkin::Step>],
}

impl ScenarioRun<'_> {
    fn execute<R: Runtime + ?Sized>(
        self,
        writer: &mut dyn Writer,
        runtime: &mut R,
    ) -> Result<(), R::Error> {
        let ctx = &self.context;
        let _span = tracing::info_span!("scenario", id = %ctx.id).entered();

        writer.handle_event(Event::ScenarioStarted(ctx.id.clone()));
        runtime.before(ctx, writer)?;
        if let Some(bg) = self.background {
            writer.handle_event(Event::Background(Arc::clone(&bg.source)));
            run_steps(ctx, bg.steps(), writer, runtime)?;
        }
        writer.handle_event(self.header);
        run_steps(ctx, self.steps, writer, runtime)?;
        runtime.after(ctx, writer)?;
        writer.handle_event(Event::ScenarioFinished(ctx.id.clone()));
        Ok(())
    }
}

/// Announces and runs the given `steps` one by one.
fn run_steps<R: Runtime + ?Sized>(
    ctx: &ScenarioContext<'_>,
    steps: &[Arc<gherkin::Step>],
    writer: &mut dyn Writer,
    runtime: &mut R,
) -> Result<(), R::Error> {
    for step in steps {
        writer.handle_event(Event::Step(Arc::clone(step)));
        tracing::trace!(step = %step.value, "running step");
        runtime.step(ctx, step, writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        test_utils::{feature, Recorder},
        writer::Discard,
    };

    use super::*;

    fn kinds(events: &[Event]) -> Vec<&'static str> {
        events.iter().map(Event::kind).collect()
    }

    #[test]
    fn frames_feature_with_uri_header_and_eof() {
        let feature = feature("Feature: Empty\n");
        let mut events = Vec::<Event>::new();

        feature.run(&mut events, &mut Recorder::default()).unwrap();

        assert_eq!(kinds(&events), ["uri", "feature", "eof"]);
        assert!(matches!(&events[0], Event::Uri(uri) if uri == "test.feature"));
        assert!(matches!(&events[1], Event::Feature(f) if f.name == "Empty"));
    }

    #[test]
    fn runs_background_ahead_of_scenario_steps() {
        let feature = feature(
            r"Feature: Lifecycle
  Background:
    Given setup
  Scenario: one
    When act
    Then check
",
        );
        let mut events = Vec::<Event>::new();
        let mut runtime = Recorder::default();

        feature.run(&mut events, &mut runtime).unwrap();

        assert_eq!(
            kinds(&events),
            [
                "uri",
                "feature",
                "scenario started",
                "background",
                "step",
                "scenario",
                "step",
                "step",
                "scenario finished",
                "eof",
            ],
        );
        assert_eq!(
            runtime.calls,
            [
                "before one",
                "step setup",
                "step act",
                "step check",
                "after one",
            ],
        );
    }

    #[test]
    fn runs_every_example_row() {
        let feature = feature(
            r"Feature: Outline
  Scenario Outline: eat <n>
    Given <n> cucumbers
    Examples:
      | n |
      | 1 |
      | 2 |
",
        );
        let mut events = Vec::<Event>::new();
        let mut runtime = Recorder::default();

        feature.run(&mut events, &mut runtime).unwrap();

        assert_eq!(
            kinds(&events),
            [
                "uri",
                "feature",
                "scenario outline",
                "examples",
                "scenario started",
                "example",
                "step",
                "scenario finished",
                "scenario started",
                "example",
                "step",
                "scenario finished",
                "eof",
            ],
        );
        assert_eq!(
            runtime.calls,
            [
                "before eat 1",
                "step 1 cucumbers",
                "after eat 1",
                "before eat 2",
                "step 2 cucumbers",
                "after eat 2",
            ],
        );
    }

    #[test]
    fn runtime_error_stops_run() {
        let feature = feature(
            r"Feature: Failing
  Scenario: one
    Given a
    When b
  Scenario: two
    Given c
",
        );
        let mut events = Vec::<Event>::new();
        let mut runtime = Recorder {
            fail_on: Some("a".into()),
            ..Recorder::default()
        };

        let err = feature.run(&mut events, &mut runtime).unwrap_err();

        assert_eq!(err, "failed: a");
        assert_eq!(runtime.calls, ["before one", "step a"]);
        assert_eq!(events.last().map(Event::kind), Some("step"));
    }

    #[test]
    fn scenario_events_carry_element_id() {
        let feature = feature(
            r"Feature: Ids
  Scenario: Some name
    Given a
",
        );
        let mut events = Vec::<Event>::new();

        feature.run(&mut events, &mut Recorder::default()).unwrap();

        let started = events
            .iter()
            .find_map(|e| match e {
                Event::ScenarioStarted(id) => Some(id.to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(started, "some-name;2");
    }

    #[test]
    fn discard_still_drives_runtime() {
        let feature = feature("Feature: f\n  Scenario: s\n    Given a\n");
        let mut runtime = Recorder::default();

        feature.run(&mut Discard, &mut runtime).unwrap();

        assert_eq!(runtime.calls, ["before s", "step a", "after s"]);
    }
}
