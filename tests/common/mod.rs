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

//! Shared test helpers: relay-side peeling and a primitive suite with injectable degeneracy.

#![allow(dead_code)]

use onion_header::{
	crypto::apply_keystream, Authenticator, Curve, Derive, Header, Hop, Keystream, Params,
	RawHop, Ristretto, Suite,
};
use rand::{CryptoRng, Rng};
use std::cell::Cell;
use zeroize::Zeroizing;

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// Static key pair of a test relay.
pub struct Relay<S: Curve> {
	pub id: Vec<u8>,
	pub secret: S::Scalar,
	pub public: S::Point,
}

pub fn gen_relays<S: Curve>(
	suite: &S,
	rng: &mut (impl Rng + CryptoRng),
	num: usize,
) -> Vec<Relay<S>> {
	(0..num)
		.map(|i| {
			let secret = loop {
				let secret = suite.random_scalar(rng);
				if suite.scalar_is_valid(&secret) {
					break secret
				}
			};
			let public = suite.mul_base(&secret);
			Relay { id: format!("relay-{i}").into_bytes(), secret, public }
		})
		.collect()
}

pub fn raw_route<S: Curve>(relays: &[Relay<S>]) -> Vec<RawHop<S::Point>> {
	relays.iter().map(|relay| Hop::new(relay.id.clone(), relay.public.clone()).into()).collect()
}

/// One layer removed from a header by a relay.
pub struct Layer<P> {
	/// Secret shared with the sender.
	pub secret: P,
	/// `beta` with one zeroed segment appended, decrypted.
	pub plain: Vec<u8>,
	/// Header to forward. Meaningless if this relay is the final hop.
	pub next: Header,
}

impl<P> Layer<P> {
	/// The segment read by a forwarding hop.
	pub fn segment<'a>(&'a self, params: &Params) -> Segment<'a> {
		let (address, rest) = self.plain.split_at(params.address_size());
		let (gamma, rest) = rest.split_at(params.mac_size);
		let (transaction_public, rest) = rest.split_at(params.point_size);
		Segment { address, gamma, transaction_public, key: &rest[..params.key_size()] }
	}

	/// Destination and identifier, as read by the final hop.
	pub fn delivery<'a>(&'a self, params: &Params) -> (&'a [u8], &'a [u8]) {
		let (destination, rest) = self.plain.split_at(params.destination_size());
		(destination, &rest[..params.identifier_size])
	}
}

pub struct Segment<'a> {
	pub address: &'a [u8],
	pub gamma: &'a [u8],
	pub transaction_public: &'a [u8],
	pub key: &'a [u8],
}

/// Relay-side dual of header construction. `None` if `alpha` does not decode or the MAC does
/// not verify.
pub fn peel<S: Suite>(
	params: &Params,
	suite: &S,
	header: &Header,
	static_secret: &S::Scalar,
) -> Option<Layer<S::Point>> {
	let alpha = suite.decode_point(header.alpha())?;
	let secret = suite.mul_point(&alpha, static_secret);
	if !suite.mac_ok(&secret, header.beta(), header.gamma()) {
		return None
	}

	let mut plain = header.beta().to_vec();
	plain.resize(params.padded_size(), 0);
	let key_iv = suite.derive_key_iv(&secret);
	apply_keystream(&mut plain, &suite.keystream(&key_iv, 0, params.padded_size()));

	let next_alpha = suite.mul_point(&alpha, &suite.blinding_factor(&alpha, &secret));
	let gamma_offset = params.address_size();
	let mut next = suite.encode_point(&next_alpha);
	next.extend_from_slice(&plain[params.per_hop_size()..]);
	next.extend_from_slice(&plain[gamma_offset..gamma_offset + params.mac_size]);
	let next = Header::from_bytes(params, &next).ok()?;

	Some(Layer { secret, plain, next })
}

/// [`Ristretto`] primitives, except that chosen calls to `point_is_valid`/`scalar_is_valid`
/// report degenerate values. Calls are numbered from 0 across the lifetime of the suite.
#[derive(Default)]
pub struct Flaky {
	pub bad_point_checks: Vec<usize>,
	pub bad_scalar_checks: Vec<usize>,
	/// Reported by `point_size` in place of the real encoded size.
	declared_point_size: Option<usize>,
	point_checks: Cell<usize>,
	scalar_checks: Cell<usize>,
}

impl Flaky {
	pub fn new(bad_point_checks: Vec<usize>, bad_scalar_checks: Vec<usize>) -> Self {
		Self { bad_point_checks, bad_scalar_checks, ..Default::default() }
	}

	/// Claim encoded points are `size` bytes, whatever `encode_point` actually returns.
	pub fn declaring_point_size(mut self, size: usize) -> Self {
		self.declared_point_size = Some(size);
		self
	}

	fn next_is_bad(counter: &Cell<usize>, bad: &[usize]) -> bool {
		let call = counter.get();
		counter.set(call + 1);
		bad.contains(&call)
	}
}

impl Curve for Flaky {
	type Scalar = <Ristretto as Curve>::Scalar;
	type Point = <Ristretto as Curve>::Point;

	fn scalar_size(&self) -> usize {
		Ristretto.scalar_size()
	}

	fn point_size(&self) -> usize {
		self.declared_point_size.unwrap_or_else(|| Ristretto.point_size())
	}

	fn random_scalar<R: Rng + CryptoRng + ?Sized>(&self, rng: &mut R) -> Self::Scalar {
		Ristretto.random_scalar(rng)
	}

	fn scalar_is_valid(&self, scalar: &Self::Scalar) -> bool {
		!Self::next_is_bad(&self.scalar_checks, &self.bad_scalar_checks) &&
			Ristretto.scalar_is_valid(scalar)
	}

	fn point_is_valid(&self, point: &Self::Point) -> bool {
		!Self::next_is_bad(&self.point_checks, &self.bad_point_checks) &&
			Ristretto.point_is_valid(point)
	}

	fn mul_base(&self, scalar: &Self::Scalar) -> Self::Point {
		Ristretto.mul_base(scalar)
	}

	fn mul_point(&self, point: &Self::Point, scalar: &Self::Scalar) -> Self::Point {
		Ristretto.mul_point(point, scalar)
	}

	fn mul_scalars(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
		Ristretto.mul_scalars(a, b)
	}

	fn add_scalars(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
		Ristretto.add_scalars(a, b)
	}

	fn encode_point(&self, point: &Self::Point) -> Vec<u8> {
		Ristretto.encode_point(point)
	}

	fn decode_point(&self, bytes: &[u8]) -> Option<Self::Point> {
		Ristretto.decode_point(bytes)
	}

	fn encode_scalar(&self, scalar: &Self::Scalar) -> Zeroizing<Vec<u8>> {
		Ristretto.encode_scalar(scalar)
	}
}

impl Authenticator for Flaky {
	fn mac_size(&self) -> usize {
		Ristretto.mac_size()
	}

	fn mac(&self, secret: &Self::Point, message: &[u8]) -> Vec<u8> {
		Ristretto.mac(secret, message)
	}
}

impl Keystream for Flaky {
	type KeyIv = <Ristretto as Keystream>::KeyIv;

	fn derive_key_iv(&self, secret: &Self::Point) -> Self::KeyIv {
		Ristretto.derive_key_iv(secret)
	}

	fn keystream(&self, key_iv: &Self::KeyIv, start: usize, end: usize) -> Zeroizing<Vec<u8>> {
		Ristretto.keystream(key_iv, start, end)
	}
}

impl Derive for Flaky {
	fn blinding_factor(&self, alpha: &Self::Point, secret: &Self::Point) -> Self::Scalar {
		Ristretto.blinding_factor(alpha, secret)
	}

	fn transaction_key(&self, secret: &Self::Point) -> Self::Scalar {
		Ristretto.transaction_key(secret)
	}
}
