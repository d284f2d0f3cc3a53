// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Feature`] aggregate, built out of a sequence of declarations.

pub mod builder;

use std::sync::Arc;

use crate::{
    element::{Background, Element, ElementId, Scenario, StepContainer as _},
    outline::ScenarioOutline,
    Result,
};

use self::builder::{Builder, Callback, ProtocolViolation, State};

/// Language assumed when a document doesn't declare one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Single [Feature] document along with its [`Element`]s in declaration order.
///
/// Built by feeding its declarations in the order they appear in the
/// document:
/// - [`Feature::on_background()`];
/// - [`Feature::on_scenario()`];
/// - [`Feature::on_scenario_outline()`];
/// - [`Feature::on_examples()`];
/// - [`Feature::on_step()`].
///
/// A [`Background`] is attached to every [`Element`] declared after it,
/// except that once an [`Element`] repeats the name of an already declared
/// one, the [`Background`] is dropped: neither that [`Element`] nor the
/// following ones get it until a next [`Background`] is declared.
///
/// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
#[derive(Debug)]
pub struct Feature {
    uri: String,
    header: Arc<gherkin::Feature>,
    language: String,
    elements: Vec<Element>,
    builder: Builder,
}

impl Feature {
    /// Creates an empty [`Feature`] identified by the given `uri`.
    ///
    /// Only the header of the [`gherkin::Feature`] is kept: its [`Background`],
    /// [`Scenario`]s and [`Rule`]s are expected to be fed in afterwards.
    ///
    /// [`Rule`]: gherkin::Rule
    #[must_use]
    pub fn new(uri: impl Into<String>, mut header: gherkin::Feature) -> Self {
        header.background = None;
        header.scenarios.clear();
        header.rules.clear();
        Self {
            uri: uri.into(),
            header: Arc::new(header),
            language: DEFAULT_LANGUAGE.to_owned(),
            elements: Vec::new(),
            builder: Builder::default(),
        }
    }

    /// Sets the language the keywords of this [`Feature`] are written in.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Identifier of the document this [`Feature`] comes from.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Header of this [`Feature`]: keyword, name, description and tags.
    #[must_use]
    pub const fn header(&self) -> &Arc<gherkin::Feature> {
        &self.header
    }

    /// Language the keywords of this [`Feature`] are written in.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// [`Element`]s in declaration order, which is also the execution order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Indicates whether this [`Feature`] has no [`Element`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Current declaration [`State`] of this [`Feature`].
    #[must_use]
    pub const fn state(&self) -> State {
        self.builder.state()
    }

    /// Declares a [`Background`] for the [`Element`]s following it.
    ///
    /// # Errors
    ///
    /// Never in practice, as a [`Background`] may start at any point, but
    /// still goes through the [`State`] check.
    pub fn on_background(
        &mut self,
        background: gherkin::Background,
    ) -> std::result::Result<(), ProtocolViolation> {
        self.builder.advance(Callback::Background, &self.uri)?;
        tracing::debug!(
            uri = %self.uri,
            line = background.position.line,
            "background declared",
        );
        self.builder.background(Background::new(background));
        Ok(())
    }

    /// Declares a plain [`Scenario`].
    ///
    /// # Errors
    ///
    /// Never in practice, as a [`Scenario`] may start at any point, but
    /// still goes through the [`State`] check.
    pub fn on_scenario(
        &mut self,
        scenario: gherkin::Scenario,
    ) -> std::result::Result<(), ProtocolViolation> {
        self.builder.advance(Callback::Scenario, &self.uri)?;
        let mut scenario = Scenario::new(scenario, &self.header.tags, None);
        scenario.background = self.attach(&scenario.id);
        self.elements.push(Element::Scenario(scenario));
        Ok(())
    }

    /// Declares a [`ScenarioOutline`], which becomes the target of the
    /// following [`Feature::on_examples()`].
    ///
    /// # Errors
    ///
    /// Never in practice, as a [`ScenarioOutline`] may start at any point, but
    /// still goes through the [`State`] check.
    pub fn on_scenario_outline(
        &mut self,
        outline: gherkin::Scenario,
    ) -> std::result::Result<(), ProtocolViolation> {
        self.builder.advance(Callback::ScenarioOutline, &self.uri)?;
        let mut outline =
            ScenarioOutline::new(outline, &self.header.tags, None);
        outline.background = self.attach(&outline.id);
        self.elements.push(Element::Outline(outline));
        Ok(())
    }

    /// Declares [`Examples`] of the last declared [`ScenarioOutline`],
    /// materializing their rows right away.
    ///
    /// # Errors
    ///
    /// - [`Error::Protocol`] if no [`ScenarioOutline`] is open;
    /// - [`Error::Placeholder`] if a placeholder has no matching column.
    ///
    /// [`Error::Placeholder`]: crate::Error::Placeholder
    /// [`Error::Protocol`]: crate::Error::Protocol
    /// [`Examples`]: gherkin::Examples
    pub fn on_examples(&mut self, examples: gherkin::Examples) -> Result<()> {
        let state = self.builder.state();
        let outline = match self.elements.last_mut() {
            Some(Element::Outline(o))
                if matches!(state, State::InOutline { .. }) =>
            {
                o
            }
            _ => {
                return Err(ProtocolViolation {
                    uri: self.uri.clone(),
                    callback: Callback::Examples,
                    state,
                }
                .into());
            }
        };
        tracing::debug!(
            uri = %self.uri,
            outline = %outline.id,
            line = examples.position.line,
            "examples declared",
        );
        outline.add_examples(examples, &self.uri)?;
        self.builder.advance(Callback::Examples, &self.uri)?;
        Ok(())
    }

    /// Appends a [`Step`] to the [`Background`] being declared, or to the last
    /// declared [`Element`] otherwise.
    ///
    /// # Errors
    ///
    /// If nothing is open to receive the [`Step`], or the open
    /// [`ScenarioOutline`] already has its [`Examples`] declared.
    ///
    /// [`Examples`]: gherkin::Examples
    /// [`Step`]: gherkin::Step
    pub fn on_step(
        &mut self,
        step: gherkin::Step,
    ) -> std::result::Result<(), ProtocolViolation> {
        let state = self.builder.advance(Callback::Step, &self.uri)?;
        if state == State::InBackground {
            if let Some(bg) = self.builder.pending_mut() {
                bg.push_step(step);
                return Ok(());
            }
        } else if let Some(el) = self.elements.last_mut() {
            el.push_step(step);
            return Ok(());
        }
        Err(ProtocolViolation {
            uri: self.uri.clone(),
            callback: Callback::Step,
            state,
        })
    }

    /// Drops the current [`Background`], so the [`Element`]s declared next get
    /// none until another [`Background`] is declared.
    pub(crate) fn clear_background(&mut self) {
        tracing::debug!(uri = %self.uri, "background cleared");
        self.builder.clear_background();
    }

    /// Registers a just declared [`Element`] and returns the [`Background`] it
    /// gets.
    fn attach(&mut self, id: &ElementId) -> Option<Arc<Background>> {
        let background = self.builder.element(id.name_key());
        tracing::debug!(
            uri = %self.uri,
            element = %id,
            background = background.is_some(),
            "element declared",
        );
        background
    }
}
