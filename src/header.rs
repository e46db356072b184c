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

//! Header type and the construction pipeline.

use crate::{
	crypto::{ristretto::Ristretto, Suite},
	error::Error,
	filler::gen_filler,
	key_shares::{gen_key_shares, SharedSecrets},
	observe::{Event, Hooks, Observer, LOG_TARGET},
	params::Params,
	route::{validate_route, RawHop},
	segment::build_beta_and_gamma,
};
use curve25519_dalek::ristretto::RistrettoPoint;
use rand::{CryptoRng, Rng};
use std::{
	fmt,
	sync::{atomic::AtomicBool, Arc},
};
use zeroize::{Zeroize, Zeroizing};

/// Packet header. All three fields have a fixed size determined by [`Params`], whatever the
/// route length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
	alpha: Vec<u8>,
	beta: Vec<u8>,
	gamma: Vec<u8>,
}

impl Header {
	/// Encoded ephemeral public key seen by the first hop.
	pub fn alpha(&self) -> &[u8] {
		&self.alpha
	}

	/// Onion-encrypted routing information.
	pub fn beta(&self) -> &[u8] {
		&self.beta
	}

	/// MAC over `beta`, checked by the first hop.
	pub fn gamma(&self) -> &[u8] {
		&self.gamma
	}

	/// Wire form: `alpha`, `beta`, `gamma`, concatenated.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(self.alpha.len() + self.beta.len() + self.gamma.len());
		bytes.extend_from_slice(&self.alpha);
		bytes.extend_from_slice(&self.beta);
		bytes.extend_from_slice(&self.gamma);
		bytes
	}

	/// Parse the wire form produced by [`to_bytes`](Self::to_bytes).
	pub fn from_bytes(params: &Params, bytes: &[u8]) -> Result<Self, Error> {
		if bytes.len() != params.header_size() {
			return Err(Error::HeaderLength { expected: params.header_size(), actual: bytes.len() })
		}
		let (alpha, rest) = bytes.split_at(params.point_size);
		let (beta, gamma) = rest.split_at(params.beta_size());
		Ok(Self { alpha: alpha.to_vec(), beta: beta.to_vec(), gamma: gamma.to_vec() })
	}
}

/// Everything produced by [`HeaderBuilder::create_header`]. The caller owns all of it; the
/// secrets are wiped when dropped.
pub struct CreatedHeader<P: Zeroize> {
	pub header: Header,
	/// One shared secret per hop, in route order. These key the payment channels with each hop.
	pub secrets: SharedSecrets<P>,
	/// Session identifier delivered to the destination.
	pub identifier: Vec<u8>,
}

impl<P: Zeroize> fmt::Debug for CreatedHeader<P> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("CreatedHeader")
			.field("header", &self.header)
			.field("secrets", &format_args!("<{} redacted>", self.secrets.len()))
			.field("identifier", &self.identifier)
			.finish()
	}
}

/// Builds headers for a fixed set of parameters and primitives.
pub struct HeaderBuilder<S> {
	params: Params,
	suite: S,
	observer: Option<Box<dyn Observer + Send + Sync>>,
	cancel: Option<Arc<AtomicBool>>,
}

fn check_size(what: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
	if expected == actual {
		Ok(())
	} else {
		Err(Error::ParamsMismatch { what, expected, actual })
	}
}

impl<S: Suite> HeaderBuilder<S> {
	/// Fails if `params` are unusable or disagree with the sizes `suite` declares. What the suite
	/// actually encodes is checked again on every [`create_header`](Self::create_header).
	pub fn new(params: Params, suite: S) -> Result<Self, Error> {
		params.validate()?;
		check_size("scalar size", params.scalar_size, suite.scalar_size())?;
		check_size("point size", params.point_size, suite.point_size())?;
		check_size("MAC size", params.mac_size, suite.mac_size())?;
		Ok(Self { params, suite, observer: None, cancel: None })
	}

	/// Report construction progress to `observer`.
	pub fn with_observer(mut self, observer: impl Observer + Send + Sync + 'static) -> Self {
		self.observer = Some(Box::new(observer));
		self
	}

	/// Abandon construction with [`Error::Cancelled`] if `cancel` is set before a key-share
	/// attempt starts.
	pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
		self.cancel = Some(cancel);
		self
	}

	pub fn params(&self) -> &Params {
		&self.params
	}

	pub fn suite(&self) -> &S {
		&self.suite
	}

	/// Compare what the suite actually produces against `params`, before any buffer is built.
	fn check_output_sizes(&self, alpha: &[u8], secret: &S::Point) -> Result<(), Error> {
		check_size("encoded point size", self.params.point_size, alpha.len())?;
		let key = Zeroizing::new(self.suite.transaction_key(secret));
		let scalar = self.suite.encode_scalar(&key);
		check_size("encoded scalar size", self.params.scalar_size, scalar.len())?;
		check_size("MAC size", self.params.mac_size, self.suite.mac(secret, &[]).len())
	}

	/// Build a header for `route`, delivering the session identifier to `destination`.
	///
	/// Routes longer than `max_hops` are truncated.
	pub fn create_header<R: Rng + CryptoRng + ?Sized>(
		&self,
		rng: &mut R,
		route: &[RawHop<S::Point>],
		destination: &S::Point,
	) -> Result<CreatedHeader<S::Point>, Error> {
		let hooks = Hooks {
			observer: self.observer.as_deref().map(|observer| observer as &dyn Observer),
			cancel: self.cancel.as_deref(),
		};

		let route = validate_route(&self.params, route)?;
		let shares = gen_key_shares(&self.suite, rng, &route, &hooks)?;
		let alpha = self.suite.encode_point(&shares.alpha);
		if let Some(secret) = shares.secrets.first() {
			self.check_output_sizes(&alpha, secret)?;
		}

		let mut identifier = vec![0; self.params.identifier_size];
		rng.fill_bytes(&mut identifier);

		let filler = gen_filler(&self.params, &self.suite, &shares.secrets);
		hooks.emit(Event::FillerBuilt { meaningful_len: filler.meaningful().len() });

		let layers = build_beta_and_gamma(
			&self.params,
			&self.suite,
			&route,
			destination,
			&shares.secrets,
			&filler,
			&identifier,
			&hooks,
		)?;

		log::trace!(target: LOG_TARGET, "Created header for {} hops", route.len());
		hooks.emit(Event::HeaderBuilt { hops: route.len() });

		Ok(CreatedHeader {
			header: Header { alpha, beta: layers.beta, gamma: layers.gamma },
			secrets: shares.secrets,
			identifier,
		})
	}
}

/// Build a header with the default parameters and the [`Ristretto`] primitives.
pub fn create_header<R: Rng + CryptoRng + ?Sized>(
	rng: &mut R,
	route: &[RawHop<RistrettoPoint>],
	destination: &RistrettoPoint,
) -> Result<CreatedHeader<RistrettoPoint>, Error> {
	HeaderBuilder::new(Params::default(), Ristretto)?.create_header(rng, route, destination)
}
