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

//! Onion-encrypted routing information (`beta`) and the MAC chain (`gamma`).
//!
//! Layers are built from the destination back to the first hop; each earlier layer wraps the
//! one after it. The segment read by forwarding hop `i` contains, in order:
//!
//! - The address (encoded public key) of hop `i + 1`.
//! - `gamma_{i+1}`, the MAC hop `i + 1` checks.
//! - `G * tx_{i+1}`, the transaction public key of hop `i + 1`.
//! - `tx_{i+1} + tx_{i+2}` if hop `i + 2` exists, otherwise `tx_{i+1}`.
//!
//! where `tx_j` is the transaction key derived from hop `j`'s shared secret. The final hop reads
//! the destination public key followed by the session identifier.

use crate::{
	crypto::{apply_keystream, Suite},
	error::Error,
	filler::Filler,
	layout::Layout,
	observe::{Event, Hooks, LOG_TARGET},
	params::Params,
	route::Hop,
};
use zeroize::Zeroizing;

/// Outermost `beta` and `gamma`.
pub struct BetaAndGamma {
	pub beta: Vec<u8>,
	pub gamma: Vec<u8>,
}

/// Build `beta` and `gamma` for `route`. `secrets` must be index-aligned with `route` and
/// `filler` must have been generated from the same secrets.
///
/// Fails with [`Error::HopCount`] unless there are between 1 and `params.max_hops` hops, and with
/// [`Error::FillerLength`] if `filler` belongs to a route of another length.
#[allow(clippy::too_many_arguments)]
pub fn build_beta_and_gamma<S: Suite>(
	params: &Params,
	suite: &S,
	route: &[Hop<S::Point>],
	destination: &S::Point,
	secrets: &[S::Point],
	filler: &Filler,
	identifier: &[u8],
	hooks: &Hooks,
) -> Result<BetaAndGamma, Error> {
	let num_hops = secrets.len();
	if num_hops == 0 || num_hops > params.max_hops || route.len() != num_hops {
		return Err(Error::HopCount {
			hops: route.len(),
			secrets: num_hops,
			max_hops: params.max_hops,
		})
	}
	let last = num_hops - 1;
	let beta_size = params.beta_size();
	let per_hop_size = params.per_hop_size();
	if filler.meaningful().len() != last * per_hop_size {
		return Err(Error::FillerLength {
			expected: last * per_hop_size,
			actual: filler.meaningful().len(),
		})
	}

	let transaction_keys: Vec<_> =
		secrets.iter().map(|secret| Zeroizing::new(suite.transaction_key(secret))).collect();

	// Final hop: destination, identifier and zero padding, encrypted, then the filler in the
	// clear. Peeling the earlier layers turns the filler into exactly what the earlier relays
	// would append.
	let prefix_size = beta_size - last * per_hop_size;
	let destination = suite.encode_point(destination);
	let mut prefix = Layout::new(prefix_size).append(&destination).append(identifier).build()?;
	let key_iv = suite.derive_key_iv(&secrets[last]);
	apply_keystream(&mut prefix, &suite.keystream(&key_iv, 0, prefix_size));
	let mut beta = Layout::new(beta_size).append(&prefix).append(filler.meaningful()).build()?;
	let mut gamma = suite.mac(&secrets[last], &beta);
	hooks.emit(Event::LayerBuilt { hop: last, beta: &beta, gamma: &gamma });

	for i in (0..last).rev() {
		let address = suite.encode_point(&route[i + 1].public_key);
		let transaction_public = suite.encode_point(&suite.mul_base(&transaction_keys[i + 1]));
		let key = match transaction_keys.get(i + 2) {
			Some(after_next) =>
				Zeroizing::new(suite.add_scalars(&transaction_keys[i + 1], after_next)),
			None => transaction_keys[i + 1].clone(),
		};
		let key = suite.encode_scalar(&key);

		let mut wrapped = Layout::new(beta_size)
			.append(&address)
			.append(&gamma)
			.append(&transaction_public)
			.append(&key)
			.write(per_hop_size, &beta[..beta_size - per_hop_size])
			.build()?;
		let key_iv = suite.derive_key_iv(&secrets[i]);
		apply_keystream(&mut wrapped, &suite.keystream(&key_iv, 0, beta_size));

		beta = wrapped;
		gamma = suite.mac(&secrets[i], &beta);
		hooks.emit(Event::LayerBuilt { hop: i, beta: &beta, gamma: &gamma });
	}

	log::trace!(target: LOG_TARGET, "Built {num_hops} onion layers");
	Ok(BetaAndGamma { beta, gamma })
}
