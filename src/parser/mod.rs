// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for turning [Gherkin] documents into [`Feature`]s.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

pub mod basic;

use crate::{Feature, Filter, Result};

#[doc(inline)]
pub use self::basic::Basic;

/// Source of [`Feature`]s built out of document contents.
pub trait Parser {
    /// Parses the `content` of the document identified by the `uri` into a
    /// [`Feature`], keeping only the [`Element`]s satisfying all the
    /// `filters`.
    ///
    /// # Errors
    ///
    /// If the `content` is not a valid document, or its declarations can't
    /// be built into a [`Feature`].
    ///
    /// [`Element`]: crate::Element
    fn parse(
        &self,
        uri: &str,
        content: &str,
        filters: &[Filter],
    ) -> Result<Feature>;
}

impl<P: Parser + ?Sized> Parser for &P {
    fn parse(
        &self,
        uri: &str,
        content: &str,
        filters: &[Filter],
    ) -> Result<Feature> {
        (**self).parse(uri, content, filters)
    }
}
