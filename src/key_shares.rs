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

//! Per-hop shared secret derivation.
//!
//! A single ephemeral scalar is blinded once per hop. Hop `i` sees `alpha_i = G * acc_i` and
//! shares `secret_i = pk_i * acc_i` with the sender, where `acc_0` is the ephemeral scalar and
//! `acc_{i+1} = acc_i * blinding_factor(alpha_i, secret_i)`. Only `alpha_0` is transmitted; each
//! relay derives the next alpha itself from its blinding factor.

use crate::{
	crypto::{Curve, Derive},
	error::Error,
	observe::{Event, Hooks, LOG_TARGET},
	route::Hop,
};
use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

/// Ordered per-hop shared secrets. Wiped when dropped.
pub type SharedSecrets<P> = Zeroizing<Vec<P>>;

/// Which value turned out degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneracyKind {
	/// `alpha_i` is not a valid group element.
	Alpha,
	/// `secret_i` is not a valid group element.
	SharedSecret,
	/// The blinded accumulator is not a valid scalar.
	Accumulator,
}

/// Where a key-share attempt was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Degeneracy {
	pub hop: usize,
	pub kind: DegeneracyKind,
}

/// Ephemeral public key and per-hop secrets.
pub struct KeyShares<P: zeroize::Zeroize> {
	pub alpha: P,
	pub secrets: SharedSecrets<P>,
}

/// Outcome of a single attempt.
pub enum Attempt<P: zeroize::Zeroize> {
	Complete(KeyShares<P>),
	/// Abandoned; nothing computed during the attempt may be reused.
	Retry(Degeneracy),
}

/// Resample until the curve accepts the scalar.
pub fn gen_valid_scalar<C: Curve, R: Rng + CryptoRng + ?Sized>(
	curve: &C,
	rng: &mut R,
) -> Zeroizing<C::Scalar> {
	loop {
		let scalar = Zeroizing::new(curve.random_scalar(rng));
		if curve.scalar_is_valid(&scalar) {
			return scalar
		}
	}
}

/// Run the blinding chain once with a fresh ephemeral scalar.
pub fn attempt_key_shares<S, R>(
	suite: &S,
	rng: &mut R,
	route: &[Hop<S::Point>],
) -> Attempt<S::Point>
where
	S: Curve + Derive,
	R: Rng + CryptoRng + ?Sized,
{
	let mut acc = gen_valid_scalar(suite, rng);
	let alpha_0 = suite.mul_base(&acc);
	let mut secrets = Zeroizing::new(Vec::with_capacity(route.len()));

	for (i, hop) in route.iter().enumerate() {
		let alpha = if i == 0 { alpha_0.clone() } else { suite.mul_base(&acc) };
		let secret = Zeroizing::new(suite.mul_point(&hop.public_key, &acc));

		if !suite.point_is_valid(&alpha) {
			return Attempt::Retry(Degeneracy { hop: i, kind: DegeneracyKind::Alpha })
		}
		if !suite.point_is_valid(&secret) {
			return Attempt::Retry(Degeneracy { hop: i, kind: DegeneracyKind::SharedSecret })
		}

		let blinding = Zeroizing::new(suite.blinding_factor(&alpha, &secret));
		acc = Zeroizing::new(suite.mul_scalars(&acc, &blinding));
		if !suite.scalar_is_valid(&acc) {
			return Attempt::Retry(Degeneracy { hop: i, kind: DegeneracyKind::Accumulator })
		}

		secrets.push((*secret).clone());
	}

	Attempt::Complete(KeyShares { alpha: alpha_0, secrets })
}

/// Derive `alpha_0` and one shared secret per hop, restarting the whole chain with a fresh
/// ephemeral scalar whenever an attempt is abandoned.
pub fn gen_key_shares<S, R>(
	suite: &S,
	rng: &mut R,
	route: &[Hop<S::Point>],
	hooks: &Hooks,
) -> Result<KeyShares<S::Point>, Error>
where
	S: Curve + Derive,
	R: Rng + CryptoRng + ?Sized,
{
	let mut attempts = 0;
	loop {
		if hooks.cancelled() {
			return Err(Error::Cancelled { attempts })
		}
		attempts += 1;
		match attempt_key_shares(suite, rng, route) {
			Attempt::Complete(shares) => {
				log::trace!(
					target: LOG_TARGET,
					"Derived key shares for {} hops in {attempts} attempt(s)",
					route.len()
				);
				hooks.emit(Event::KeySharesDerived { attempts, hops: route.len() });
				return Ok(shares)
			},
			Attempt::Retry(degeneracy) => {
				log::debug!(
					target: LOG_TARGET,
					"Key-share attempt {attempts} abandoned at hop {}: degenerate {:?}",
					degeneracy.hop,
					degeneracy.kind
				);
				hooks.emit(Event::AttemptAborted { attempt: attempts, degeneracy });
			},
		}
	}
}
