// Copyright 2022 Parity Technologies (UK) Ltd.
//
// Permission is hereby granted, free of charge, to any person obtaining a
// copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
// OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Optional hook for watching header construction.
//!
//! Nothing is reported unless an [`Observer`] is configured on the
//! [`HeaderBuilder`](crate::HeaderBuilder). Events never carry secret scalars or shared secrets;
//! the `beta`/`gamma` values in [`Event::LayerBuilt`] are what the corresponding relay receives.

use crate::key_shares::Degeneracy;
use std::sync::atomic::{AtomicBool, Ordering};

/// Log target used throughout the crate.
pub(crate) const LOG_TARGET: &str = "onion-header";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
	/// A key-share attempt hit a degenerate value and will be restarted from scratch.
	AttemptAborted { attempt: usize, degeneracy: Degeneracy },
	/// Key shares for every hop were derived.
	KeySharesDerived { attempts: usize, hops: usize },
	/// Filler built; `meaningful_len` bytes of it will be used.
	FillerBuilt { meaningful_len: usize },
	/// Layer for the given hop finished: `beta` as that hop will see it, and its MAC.
	LayerBuilt { hop: usize, beta: &'a [u8], gamma: &'a [u8] },
	/// Header complete.
	HeaderBuilt { hops: usize },
}

/// Receives [`Event`]s. Shared by every caller of a [`HeaderBuilder`](crate::HeaderBuilder),
/// possibly from several threads at once.
pub trait Observer: Send + Sync {
	fn observe(&self, event: &Event<'_>);
}

impl<F: Fn(&Event<'_>) + Send + Sync> Observer for F {
	fn observe(&self, event: &Event<'_>) {
		self(event)
	}
}

/// Per-call hooks threaded through the construction stages.
#[derive(Clone, Copy, Default)]
pub struct Hooks<'a> {
	pub observer: Option<&'a dyn Observer>,
	/// Checked before each key-share attempt.
	pub cancel: Option<&'a AtomicBool>,
}

impl<'a> Hooks<'a> {
	pub fn none() -> Self {
		Self::default()
	}

	pub(crate) fn emit(&self, event: Event<'_>) {
		if let Some(observer) = self.observer {
			observer.observe(&event);
		}
	}

	pub(crate) fn cancelled(&self) -> bool {
		self.cancel.map_or(false, |cancel| cancel.load(Ordering::Relaxed))
	}
}
