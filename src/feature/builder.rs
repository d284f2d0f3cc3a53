// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! State of a [`Feature`] while its declarations are being fed in.
//!
//! [`Feature`]: crate::Feature

use std::{collections::HashSet, sync::Arc};

use derive_more::with_trait::{Display, Error};

use crate::element::Background;

/// Kind of a declaration fed into a [`Feature`].
///
/// [`Feature`]: crate::Feature
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Callback {
    /// [`Feature::on_background()`].
    ///
    /// [`Feature::on_background()`]: crate::Feature::on_background
    #[display("background")]
    Background,

    /// [`Feature::on_scenario()`].
    ///
    /// [`Feature::on_scenario()`]: crate::Feature::on_scenario
    #[display("scenario")]
    Scenario,

    /// [`Feature::on_scenario_outline()`].
    ///
    /// [`Feature::on_scenario_outline()`]: crate::Feature::on_scenario_outline
    #[display("scenario outline")]
    ScenarioOutline,

    /// [`Feature::on_examples()`].
    ///
    /// [`Feature::on_examples()`]: crate::Feature::on_examples
    #[display("examples")]
    Examples,

    /// [`Feature::on_step()`].
    ///
    /// [`Feature::on_step()`]: crate::Feature::on_step
    #[display("step")]
    Step,
}

/// Position of a [`Feature`] in its declaration sequence.
///
/// [`Feature`]: crate::Feature
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum State {
    /// Nothing declared yet.
    #[default]
    #[display("before any declaration")]
    Start,

    /// [`Background`] declared last.
    #[display("inside a background")]
    InBackground,

    /// [`Scenario`] declared last.
    ///
    /// [`Scenario`]: crate::Scenario
    #[display("inside a scenario")]
    InScenario,

    /// [`ScenarioOutline`] declared last.
    ///
    /// [`ScenarioOutline`]: crate::ScenarioOutline
    #[display("inside a scenario outline with {examples} examples")]
    InOutline {
        /// Number of [`Examples`] declared for the outline so far.
        ///
        /// [`Examples`]: gherkin::Examples
        examples: usize,
    },
}

impl State {
    /// Returns the [`State`] the given [`Callback`] leads to, if it's allowed
    /// in this one.
    #[must_use]
    pub const fn next(self, callback: Callback) -> Option<Self> {
        match (self, callback) {
            (_, Callback::Background) => Some(Self::InBackground),
            (_, Callback::Scenario) => Some(Self::InScenario),
            (_, Callback::ScenarioOutline) => {
                Some(Self::InOutline { examples: 0 })
            }
            (Self::InOutline { examples }, Callback::Examples) => {
                Some(Self::InOutline {
                    examples: examples + 1,
                })
            }
            (Self::InBackground | Self::InScenario, Callback::Step)
            | (Self::InOutline { examples: 0 }, Callback::Step) => Some(self),
            _ => None,
        }
    }
}

/// Error of a declaration fed into a [`Feature`] out of order.
///
/// [`Feature`]: crate::Feature
#[derive(Clone, Debug, Display, Error)]
#[display("Unexpected {callback} declaration {state} of `{uri}`")]
pub struct ProtocolViolation {
    /// Identifier of the [`Feature`] being built.
    ///
    /// [`Feature`]: crate::Feature
    #[error(not(source))]
    pub uri: String,

    /// Rejected declaration.
    #[error(not(source))]
    pub callback: Callback,

    /// [`State`] rejecting the declaration.
    #[error(not(source))]
    pub state: State,
}

/// Explicit build state of a [`Feature`]: the declaration [`State`] along
/// with what decides which [`Background`] new [`Element`]s get.
///
/// [`Element`]: crate::Element
/// [`Feature`]: crate::Feature
#[derive(Debug, Default)]
pub(crate) struct Builder {
    /// Current declaration [`State`].
    state: State,

    /// [`Background`] still receiving its steps.
    pending: Option<Background>,

    /// [`Background`] attached to the next [`Element`], unless its name was
    /// already seen.
    ///
    /// [`Element`]: crate::Element
    current: Option<Arc<Background>>,

    /// Name keys of the [`Element`]s declared so far.
    ///
    /// [`Element`]: crate::Element
    seen_names: HashSet<String>,
}

impl Builder {
    /// Current declaration [`State`].
    pub(crate) const fn state(&self) -> State {
        self.state
    }

    /// Moves to the [`State`] the `callback` leads to.
    ///
    /// # Errors
    ///
    /// If the `callback` isn't allowed in the current [`State`].
    pub(crate) fn advance(
        &mut self,
        callback: Callback,
        uri: &str,
    ) -> Result<State, ProtocolViolation> {
        let state = self.state;
        let next = state.next(callback).ok_or_else(|| ProtocolViolation {
            uri: uri.to_owned(),
            callback,
            state,
        })?;
        self.state = next;
        Ok(next)
    }

    /// Starts a new [`Background`], replacing the current one.
    pub(crate) fn background(&mut self, background: Background) {
        self.pending = Some(background);
    }

    /// Drops both the pending and the current [`Background`].
    pub(crate) fn clear_background(&mut self) {
        self.pending = None;
        self.current = None;
    }

    /// Returns the [`Background`] still receiving its steps.
    pub(crate) fn pending_mut(&mut self) -> Option<&mut Background> {
        self.pending.as_mut()
    }

    /// Registers a new [`Element`] with the given name key and returns the
    /// [`Background`] it should get.
    ///
    /// The current [`Background`] is dropped for good once a name key
    /// repeats, so the repeating [`Element`] and the ones declared after it
    /// (until a next [`Background`]) get none.
    ///
    /// [`Element`]: crate::Element
    pub(crate) fn element(&mut self, name_key: &str) -> Option<Arc<Background>> {
        if let Some(bg) = self.pending.take() {
            self.current = Some(Arc::new(bg));
        }
        if self.seen_names.contains(name_key) {
            self.current = None;
        }
        self.seen_names.insert(name_key.to_owned());
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::parse;

    use super::*;

    fn background() -> Background {
        let feature = parse(
            "Feature: f\n\
             \n  Background:\n    Given a\n\
             \n  Scenario: s\n    Then b\n",
        );
        Background::new(feature.background.unwrap())
    }

    #[test]
    fn steps_are_rejected_before_any_container() {
        assert_eq!(State::Start.next(Callback::Step), None);
        assert_eq!(State::Start.next(Callback::Examples), None);
    }

    #[test]
    fn examples_require_outline() {
        assert_eq!(State::InScenario.next(Callback::Examples), None);
        assert_eq!(State::InBackground.next(Callback::Examples), None);
        assert_eq!(
            State::InOutline { examples: 0 }.next(Callback::Examples),
            Some(State::InOutline { examples: 1 }),
        );
        assert_eq!(
            State::InOutline { examples: 1 }.next(Callback::Examples),
            Some(State::InOutline { examples: 2 }),
        );
    }

    #[test]
    fn outline_steps_are_closed_by_examples() {
        assert_eq!(
            State::InOutline { examples: 0 }.next(Callback::Step),
            Some(State::InOutline { examples: 0 }),
        );
        assert_eq!(State::InOutline { examples: 1 }.next(Callback::Step), None);
    }

    #[test]
    fn containers_are_allowed_anywhere() {
        for state in [
            State::Start,
            State::InBackground,
            State::InScenario,
            State::InOutline { examples: 3 },
        ] {
            assert_eq!(
                state.next(Callback::Background),
                Some(State::InBackground),
            );
            assert_eq!(state.next(Callback::Scenario), Some(State::InScenario));
            assert_eq!(
                state.next(Callback::ScenarioOutline),
                Some(State::InOutline { examples: 0 }),
            );
        }
    }

    #[test]
    fn advance_reports_violation() {
        let mut builder = Builder::default();

        let err = builder.advance(Callback::Examples, "a.feature").unwrap_err();

        assert_eq!(err.state, State::Start);
        assert_eq!(err.callback, Callback::Examples);
        assert_eq!(
            err.to_string(),
            "Unexpected examples declaration before any declaration of \
             `a.feature`",
        );
        assert_eq!(builder.state(), State::Start);
    }

    #[test]
    fn repeated_name_drops_background() {
        let mut builder = Builder::default();
        builder.background(background());

        assert!(builder.element("first").is_some());
        assert!(builder.element("second").is_some());
        assert!(builder.element("first").is_none());
        assert!(builder.element("third").is_none());
    }

    #[test]
    fn new_background_is_attached_again() {
        let mut builder = Builder::default();
        assert!(builder.element("first").is_none());

        builder.background(background());
        assert!(builder.element("second").is_some());

        builder.background(background());
        assert!(builder.element("second").is_none());
    }
}
