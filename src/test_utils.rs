// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Common test utilities shared by the unit tests of this crate.

use crate::{
    parser::{Basic, Parser as _},
    runner::{Runtime, ScenarioContext},
    Feature, Writer,
};

/// Parses the given Gherkin `src`, panicking on failure.
pub(crate) fn parse(src: &str) -> gherkin::Feature {
    gherkin::Feature::parse(src, gherkin::GherkinEnv::default())
        .unwrap_or_else(|e| panic!("failed to parse feature: {e}"))
}

/// Builds a [`Feature`] identified as `test.feature` out of the given `src`,
/// panicking on failure.
pub(crate) fn feature(src: &str) -> Feature {
    Basic
        .parse("test.feature", src, &[])
        .unwrap_or_else(|e| panic!("failed to build feature: {e}"))
}

/// [`Runtime`] recording what it was asked to do as plain strings.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    /// Recorded calls in order.
    pub(crate) calls: Vec<String>,

    /// Step text to fail on.
    pub(crate) fail_on: Option<String>,
}

impl Runtime for Recorder {
    type Error = String;

    fn before(
        &mut self,
        scenario: &ScenarioContext<'_>,
        _: &mut dyn Writer,
    ) -> Result<(), Self::Error> {
        self.calls.push(format!("before {}", scenario.name));
        Ok(())
    }

    fn step(
        &mut self,
        _: &ScenarioContext<'_>,
        step: &gherkin::Step,
        _: &mut dyn Writer,
    ) -> Result<(), Self::Error> {
        self.calls.push(format!("step {}", step.value));
        if self.fail_on.as_deref() == Some(step.value.as_str()) {
            return Err(format!("failed: {}", step.value));
        }
        Ok(())
    }

    fn after(
        &mut self,
        scenario: &ScenarioContext<'_>,
        _: &mut dyn Writer,
    ) -> Result<(), Self::Error> {
        self.calls.push(format!("after {}", scenario.name));
        Ok(())
    }
}
