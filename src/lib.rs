// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building [Cucumber] [`Feature`]s out of [Gherkin] documents and driving
//! them through a [`Runtime`].
//!
//! The [`Feature`]s are [`load`]ed from the documents a [`ResourceLoader`]
//! finds, keeping only the [`Element`]s satisfying the given [`Filter`]s.
//! While being built, a [`Feature`]:
//! - attaches the last declared [`Background`] to the [`Element`]s following
//!   it, unless an [`Element`] repeats the name of an already declared one;
//! - expands every [`ScenarioOutline`] into [`ExampleScenario`]s, one per
//!   [`Examples`] row.
//!
//! Running [`Features`] reports every step of the way to a [`Writer`] as an
//! [`Event`], while the [`Runtime`] executes the steps and hooks.
//!
//! ```rust
//! # use cucumber_feature::{
//! #     load, resource::StaticResource, Event, Runtime, ScenarioContext,
//! #     Writer,
//! # };
//! #
//! struct Print;
//!
//! impl Runtime for Print {
//!     type Error = String;
//!
//!     fn step(
//!         &mut self,
//!         _: &ScenarioContext<'_>,
//!         step: &cucumber_feature::gherkin::Step,
//!         _: &mut dyn Writer,
//!     ) -> Result<(), Self::Error> {
//!         println!("{}{}", step.keyword, step.value);
//!         Ok(())
//!     }
//! }
//!
//! let resources = [StaticResource::new(
//!     "features/eating.feature",
//!     "Feature: Eating\n  \
//!        Scenario Outline: eat <n>\n    \
//!          Given <n> cucumbers\n    \
//!          Examples:\n      \
//!            | n |\n      \
//!            | 1 |\n      \
//!            | 2 |\n",
//! )];
//! let features = load(resources.as_slice(), ["features"], &[]).unwrap();
//!
//! let mut events = Vec::<Event>::new();
//! features.run(&mut events, &mut Print).unwrap();
//! assert_eq!(events.first().map(|e| e.kind()), Some("uri"));
//! assert_eq!(events.last().map(|e| e.kind()), Some("eof"));
//! ```
//!
//! [Cucumber]: https://cucumber.io
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference
//! [`Examples`]: gherkin::Examples
//! [`ResourceLoader`]: resource::ResourceLoader

#![deny(nonstandard_style, rustdoc::all, trivial_casts, trivial_numeric_casts)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::missing_const_for_fn,
    clippy::missing_docs_in_private_items,
    clippy::pedantic,
    clippy::unwrap_used,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_import_braces
)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod cli;
pub mod element;
pub mod error;
pub mod event;
pub mod feature;
pub mod filter;
pub mod loader;
pub mod outline;
pub mod parser;
pub mod resource;
pub mod runner;
pub mod writer;

#[cfg(test)]
mod test_utils;

pub use gherkin;

#[doc(inline)]
pub use self::{
    element::{Background, Element, ElementId, Scenario, StepContainer},
    error::{Error, Result},
    event::Event,
    feature::Feature,
    filter::Filter,
    loader::{load, load_with, Features},
    outline::{ExampleScenario, ScenarioOutline},
    parser::Parser,
    runner::{Runtime, ScenarioContext},
    writer::Writer,
};
