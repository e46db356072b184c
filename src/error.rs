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

//! Error handling

use crate::layout::LayoutError;

/// Structural problem with a caller-supplied route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRouteError {
	/// The route has no hops.
	#[error("Route is empty.")]
	Empty,
	/// The hop at this index has no identifier.
	#[error("Invalid hop at index {0}: missing identifier.")]
	MissingId(usize),
	/// The hop at this index has no public key.
	#[error("Invalid hop at index {0}: missing public key.")]
	MissingPublicKey(usize),
}

impl InvalidRouteError {
	/// Index of the offending hop, if the error concerns a single hop.
	pub fn index(&self) -> Option<usize> {
		match self {
			InvalidRouteError::Empty => None,
			InvalidRouteError::MissingId(index) | InvalidRouteError::MissingPublicKey(index) =>
				Some(*index),
		}
	}
}

/// Header construction error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// Malformed route.
	#[error("Invalid route: {0}")]
	InvalidRoute(#[from] InvalidRouteError),
	/// Parameters describe an unusable header.
	#[error("Invalid parameters: {0}.")]
	InvalidParams(&'static str),
	/// Parameters disagree with the sizes produced by the primitives.
	#[error("Parameters give {what} as {expected} bytes but the primitives produce {actual}.")]
	ParamsMismatch { what: &'static str, expected: usize, actual: usize },
	/// A primitive produced output of the wrong size while assembling a buffer.
	#[error("Buffer layout error: {0}")]
	Layout(#[from] LayoutError),
	/// Wire form of a header has the wrong size.
	#[error("Header must be {expected} bytes, got {actual}.")]
	HeaderLength { expected: usize, actual: usize },
	/// Construction was cancelled between key-share attempts.
	#[error("Header construction cancelled after {attempts} attempt(s).")]
	Cancelled { attempts: usize },
	/// Layer construction needs between 1 and `max_hops` hops, with one secret per hop.
	#[error("Cannot layer {secrets} secret(s) over {hops} hop(s) with max_hops {max_hops}.")]
	HopCount { hops: usize, secrets: usize, max_hops: usize },
	/// The filler was not generated for a route of this length.
	#[error("Filler carries {actual} meaningful bytes, expected {expected}.")]
	FillerLength { expected: usize, actual: usize },
}
