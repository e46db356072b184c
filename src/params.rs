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

//! Header size parameters.
//!
//! Every node on the network must agree on these values; they define the wire format of the
//! header, they are not a local tuning knob.

use crate::error::Error;

/// Default maximum number of hops a header can describe.
pub const DEFAULT_MAX_HOPS: usize = 3;
/// Default size in bytes of an encoded scalar.
pub const DEFAULT_SCALAR_SIZE: usize = 32;
/// Default size in bytes of an encoded (compressed) curve point.
pub const DEFAULT_POINT_SIZE: usize = 32;
/// Default size in bytes of a MAC tag.
pub const DEFAULT_MAC_SIZE: usize = 32;
/// Default size in bytes of the session identifier delivered to the destination.
pub const DEFAULT_IDENTIFIER_SIZE: usize = 16;

/// Fixed byte lengths and the maximum route length. All other sizes are derived from these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
	/// Maximum number of hops. Longer routes are truncated.
	pub max_hops: usize,
	/// Size of an encoded scalar (transaction keys).
	pub scalar_size: usize,
	/// Size of an encoded curve point (`alpha`, hop addresses, the destination).
	pub point_size: usize,
	/// Size of a MAC tag (`gamma`).
	pub mac_size: usize,
	/// Size of the session identifier.
	pub identifier_size: usize,
}

impl Default for Params {
	fn default() -> Self {
		Self {
			max_hops: DEFAULT_MAX_HOPS,
			scalar_size: DEFAULT_SCALAR_SIZE,
			point_size: DEFAULT_POINT_SIZE,
			mac_size: DEFAULT_MAC_SIZE,
			identifier_size: DEFAULT_IDENTIFIER_SIZE,
		}
	}
}

impl Params {
	/// Check the parameters describe a usable header.
	pub fn validate(&self) -> Result<(), Error> {
		if self.max_hops == 0 {
			return Err(Error::InvalidParams("max_hops must be at least 1"))
		}
		if self.scalar_size == 0 || self.point_size == 0 || self.mac_size == 0 {
			return Err(Error::InvalidParams("scalar, point and MAC sizes must be nonzero"))
		}
		if self.identifier_size == 0 {
			return Err(Error::InvalidParams("identifier_size must be nonzero"))
		}
		Ok(())
	}

	/// Size of a next-hop address. Hops are addressed by their public key.
	pub fn address_size(&self) -> usize {
		self.point_size
	}

	pub fn key_size(&self) -> usize {
		self.scalar_size
	}

	pub fn destination_size(&self) -> usize {
		self.point_size
	}

	/// Size of the segment consumed by each forwarding hop: next-hop address, next-hop MAC,
	/// successor transaction public key and combined transaction key.
	pub fn per_hop_size(&self) -> usize {
		self.address_size() + self.mac_size + self.point_size + self.key_size()
	}

	/// Size of the segment read by the final hop: destination and identifier.
	pub fn last_hop_size(&self) -> usize {
		self.destination_size() + self.identifier_size
	}

	/// Size of `beta`. Independent of the actual route length.
	pub fn beta_size(&self) -> usize {
		(self.max_hops - 1) * self.per_hop_size() + self.last_hop_size()
	}

	pub fn filler_size(&self) -> usize {
		(self.max_hops - 1) * self.per_hop_size()
	}

	/// Size of `beta` plus the one segment a relay appends while peeling. Keystream windows are
	/// positioned within this region.
	pub fn padded_size(&self) -> usize {
		self.beta_size() + self.per_hop_size()
	}

	/// Size of the wire form of a header: `alpha`, `beta`, `gamma`.
	pub fn header_size(&self) -> usize {
		self.point_size + self.beta_size() + self.mac_size
	}
}
