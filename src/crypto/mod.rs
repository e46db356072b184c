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

//! Cryptographic primitives consumed by header construction.
//!
//! Header construction is generic over these traits; [`ristretto::Ristretto`] is the default
//! implementation. Alternative implementations must be deterministic: the same inputs must
//! always give the same outputs, as relays replay the derivations on their side.

pub mod ristretto;

use rand::{CryptoRng, Rng};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

/// Prime-order group operations.
pub trait Curve {
	type Scalar: Clone + Zeroize;
	type Point: Clone + Zeroize;

	/// Size in bytes of [`encode_scalar`](Self::encode_scalar) output.
	fn scalar_size(&self) -> usize;
	/// Size in bytes of [`encode_point`](Self::encode_point) output.
	fn point_size(&self) -> usize;

	/// Sample a random scalar. The result is not guaranteed to be valid; callers resample until
	/// [`scalar_is_valid`](Self::scalar_is_valid) holds.
	fn random_scalar<R: Rng + CryptoRng + ?Sized>(&self, rng: &mut R) -> Self::Scalar;
	fn scalar_is_valid(&self, scalar: &Self::Scalar) -> bool;
	fn point_is_valid(&self, point: &Self::Point) -> bool;

	/// Multiply the group basepoint by `scalar`.
	fn mul_base(&self, scalar: &Self::Scalar) -> Self::Point;
	fn mul_point(&self, point: &Self::Point, scalar: &Self::Scalar) -> Self::Point;
	fn mul_scalars(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;
	fn add_scalars(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

	fn encode_point(&self, point: &Self::Point) -> Vec<u8>;
	fn decode_point(&self, bytes: &[u8]) -> Option<Self::Point>;
	fn encode_scalar(&self, scalar: &Self::Scalar) -> Zeroizing<Vec<u8>>;
}

/// Message authentication keyed by a shared secret.
pub trait Authenticator: Curve {
	fn mac_size(&self) -> usize;
	fn mac(&self, secret: &Self::Point, message: &[u8]) -> Vec<u8>;

	/// Check `tag` in constant time.
	fn mac_ok(&self, secret: &Self::Point, message: &[u8], tag: &[u8]) -> bool {
		self.mac(secret, message).ct_eq(tag).into()
	}
}

/// Pseudorandom keystream keyed by a shared secret.
pub trait Keystream: Curve {
	/// Key and IV derived from a shared secret.
	type KeyIv: Zeroize;

	fn derive_key_iv(&self, secret: &Self::Point) -> Self::KeyIv;

	/// Bytes `start..end` of the keystream. Empty if `end <= start`. Wiped when dropped.
	fn keystream(&self, key_iv: &Self::KeyIv, start: usize, end: usize) -> Zeroizing<Vec<u8>>;
}

/// Hash-to-scalar derivations from shared secrets.
pub trait Derive: Curve {
	/// Factor by which the ephemeral key is blinded after a hop.
	fn blinding_factor(&self, alpha: &Self::Point, secret: &Self::Point) -> Self::Scalar;
	/// Payment-channel key for the hop owning `secret`.
	fn transaction_key(&self, secret: &Self::Point) -> Self::Scalar;
}

/// Everything header construction needs.
pub trait Suite: Authenticator + Keystream + Derive {}

impl<T: Authenticator + Keystream + Derive> Suite for T {}

/// XOR `keystream` into `data`. Extra keystream bytes are ignored.
pub fn apply_keystream(data: &mut [u8], keystream: &[u8]) {
	for (d, k) in data.iter_mut().zip(keystream) {
		*d ^= *k;
	}
}
