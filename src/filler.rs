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

//! Filler generation.
//!
//! Each relay appends one zeroed segment to `beta` before decrypting it, so after peeling `k`
//! layers the tail of `beta` consists of `k` segments of pure keystream. The filler is that tail,
//! computed in advance by the sender and placed at the end of the innermost layer, so the MACs
//! of all later layers still verify and the header reveals nothing about the route length.

use crate::{
	crypto::{apply_keystream, Keystream},
	params::Params,
};
use zeroize::Zeroizing;

/// Filler buffer. Only a prefix of it is meaningful; see [`meaningful`](Self::meaningful).
/// Wiped when dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filler {
	bytes: Zeroizing<Vec<u8>>,
	meaningful_len: usize,
}

impl Filler {
	/// The whole buffer, `params.filler_size()` bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// The first `(n - 1) * per_hop_size` bytes, for a route of `n` hops. Empty for a single
	/// hop, in which case the whole buffer is zero.
	pub fn meaningful(&self) -> &[u8] {
		&self.bytes[..self.meaningful_len]
	}
}

/// Build the filler for a route whose per-hop secrets are `secrets`. The last secret is not
/// used: the final hop's layer is where the filler goes.
pub fn gen_filler<S: Keystream>(params: &Params, suite: &S, secrets: &[S::Point]) -> Filler {
	let per_hop_size = params.per_hop_size();
	let num_hops = secrets.len().min(params.max_hops);
	let end = params.last_hop_size() + params.max_hops * per_hop_size;

	let mut bytes = Zeroizing::new(vec![0; params.filler_size()]);
	for (i, secret) in secrets[..num_hops.saturating_sub(1)].iter().enumerate() {
		let key_iv = suite.derive_key_iv(secret);
		let start = params.last_hop_size() + (params.max_hops - 1 - i) * per_hop_size;
		let len = (i + 1) * per_hop_size;
		apply_keystream(&mut bytes[..len], &suite.keystream(&key_iv, start, end));
	}

	Filler { bytes, meaningful_len: num_hops.saturating_sub(1) * per_hop_size }
}
