// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reporting sinks for [`Event`]s.

pub mod discard;

use crate::Event;

#[doc(inline)]
pub use self::discard::Discard;

/// Sink of [`Event`]s emitted while running [`Feature`]s.
///
/// [`Event`]s arrive in the order described in the [`event`] module docs.
/// Rendering and result collection are up to the implementor.
///
/// [`event`]: crate::event
/// [`Feature`]: crate::Feature
pub trait Writer {
    /// Handles the given [`Event`].
    fn handle_event(&mut self, event: Event);
}

impl<W: Writer + ?Sized> Writer for &mut W {
    fn handle_event(&mut self, event: Event) {
        (**self).handle_event(event);
    }
}

/// Collects all the [`Event`]s in order.
impl Writer for Vec<Event> {
    fn handle_event(&mut self, event: Event) {
        self.push(event);
    }
}
