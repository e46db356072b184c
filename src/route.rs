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

//! Route types and validation.

use crate::{error::InvalidRouteError, params::Params};

/// Opaque hop identifier. Only checked for presence; never encoded into the header.
pub type HopId = Vec<u8>;

/// A validated route hop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hop<P> {
	pub id: HopId,
	/// Static public key of the relay.
	pub public_key: P,
}

impl<P> Hop<P> {
	pub fn new(id: impl Into<HopId>, public_key: P) -> Self {
		Self { id: id.into(), public_key }
	}
}

/// A route hop as supplied by the caller. Either field may be missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawHop<P> {
	pub id: Option<HopId>,
	pub public_key: Option<P>,
}

impl<P> From<Hop<P>> for RawHop<P> {
	fn from(hop: Hop<P>) -> Self {
		Self { id: Some(hop.id), public_key: Some(hop.public_key) }
	}
}

/// Truncate `route` to `params.max_hops` entries and check every remaining entry is complete.
/// Entries past `max_hops` are ignored, even if malformed.
pub fn validate_route<P: Clone>(
	params: &Params,
	route: &[RawHop<P>],
) -> Result<Vec<Hop<P>>, InvalidRouteError> {
	let route = &route[..route.len().min(params.max_hops)];
	if route.is_empty() {
		return Err(InvalidRouteError::Empty)
	}

	route
		.iter()
		.enumerate()
		.map(|(index, hop)| {
			let id = hop.id.as_ref().ok_or(InvalidRouteError::MissingId(index))?;
			let public_key =
				hop.public_key.as_ref().ok_or(InvalidRouteError::MissingPublicKey(index))?;
			Ok(Hop { id: id.clone(), public_key: public_key.clone() })
		})
		.collect()
}
