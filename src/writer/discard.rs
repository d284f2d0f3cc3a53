// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! No-op [`Writer`] implementation.

use crate::{Event, Writer};

/// [`Writer`] dropping every [`Event`].
///
/// Useful when only the side effects of a [`Runtime`] matter.
///
/// [`Runtime`]: crate::Runtime
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl Writer for Discard {
    fn handle_event(&mut self, _: Event) {
        // Intentionally no-op.
    }
}
