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

//! Default primitives: Ristretto255 group, BLAKE2b key derivation and MAC, ChaCha20 keystream.

use super::{Authenticator, Curve, Derive, Keystream};
use arrayref::array_refs;
use blake2::{
	digest::{
		consts::{U32, U64},
		generic_array::GenericArray,
		FixedOutput, Mac as DigestMac,
	},
	Blake2bMac,
};
use c2_chacha::{
	stream_cipher::{NewStreamCipher, SyncStreamCipher},
	ChaCha20,
};
use curve25519_dalek::{
	constants::RISTRETTO_BASEPOINT_TABLE,
	ristretto::{CompressedRistretto, RistrettoPoint},
	scalar::Scalar,
	traits::IsIdentity,
};
use rand::{CryptoRng, Rng};
use zeroize::{Zeroize, Zeroizing};

const BLINDING_FACTOR_PERSONAL: &[u8; 16] = b"onion-blind-fact";
const TRANSACTION_KEY_PERSONAL: &[u8; 16] = b"onion-tx-key-der";
const MAC_KEY_PERSONAL: &[u8; 16] = b"onion-hdr-mackey";
const KEYSTREAM_PERSONAL: &[u8; 16] = b"onion-hdr-prg-kv";

/// Size in bytes of an encoded scalar.
pub const SCALAR_SIZE: usize = 32;
/// Size in bytes of a compressed Ristretto point.
pub const POINT_SIZE: usize = 32;
/// Size in bytes of a MAC tag.
pub const MAC_SIZE: usize = 32;

const DERIVED_SIZE: usize = 64;
const MAC_KEY_SIZE: usize = 32;
const STREAM_KEY_SIZE: usize = 32;
const STREAM_IV_SIZE: usize = 8;

/// Ristretto255-based primitive suite. Stateless.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ristretto;

/// Keyed BLAKE2b over nothing: a KDF from `key`, domain-separated by `personal`.
fn derive_secret(key: &[u8], personal: &[u8; 16]) -> Zeroizing<[u8; DERIVED_SIZE]> {
	let h = Blake2bMac::<U64>::new_with_salt_and_personal(key, b"", personal)
		.expect("Key, salt, and personalisation sizes are fixed and small enough");
	let mut derived = Zeroizing::new([0; DERIVED_SIZE]);
	h.finalize_into(GenericArray::from_mut_slice(&mut derived[..]));
	derived
}

fn secret_to_scalar(key: &[u8], personal: &[u8; 16]) -> Scalar {
	Scalar::from_bytes_mod_order_wide(&derive_secret(key, personal))
}

impl Curve for Ristretto {
	type Scalar = Scalar;
	type Point = RistrettoPoint;

	fn scalar_size(&self) -> usize {
		SCALAR_SIZE
	}

	fn point_size(&self) -> usize {
		POINT_SIZE
	}

	fn random_scalar<R: Rng + CryptoRng + ?Sized>(&self, rng: &mut R) -> Scalar {
		let mut wide = Zeroizing::new([0; 64]);
		rng.fill_bytes(&mut wide[..]);
		Scalar::from_bytes_mod_order_wide(&wide)
	}

	fn scalar_is_valid(&self, scalar: &Scalar) -> bool {
		// Always reduced, so only zero is out
		*scalar != Scalar::ZERO
	}

	fn point_is_valid(&self, point: &RistrettoPoint) -> bool {
		!point.is_identity()
	}

	fn mul_base(&self, scalar: &Scalar) -> RistrettoPoint {
		RISTRETTO_BASEPOINT_TABLE * scalar
	}

	fn mul_point(&self, point: &RistrettoPoint, scalar: &Scalar) -> RistrettoPoint {
		point * scalar
	}

	fn mul_scalars(&self, a: &Scalar, b: &Scalar) -> Scalar {
		a * b
	}

	fn add_scalars(&self, a: &Scalar, b: &Scalar) -> Scalar {
		a + b
	}

	fn encode_point(&self, point: &RistrettoPoint) -> Vec<u8> {
		point.compress().to_bytes().to_vec()
	}

	fn decode_point(&self, bytes: &[u8]) -> Option<RistrettoPoint> {
		let bytes: [u8; POINT_SIZE] = bytes.try_into().ok()?;
		CompressedRistretto(bytes).decompress()
	}

	fn encode_scalar(&self, scalar: &Scalar) -> Zeroizing<Vec<u8>> {
		Zeroizing::new(scalar.to_bytes().to_vec())
	}
}

impl Authenticator for Ristretto {
	fn mac_size(&self) -> usize {
		MAC_SIZE
	}

	fn mac(&self, secret: &RistrettoPoint, message: &[u8]) -> Vec<u8> {
		let derived = derive_secret(secret.compress().as_bytes(), MAC_KEY_PERSONAL);
		let (mac_key, _) = array_refs![&*derived, MAC_KEY_SIZE, DERIVED_SIZE - MAC_KEY_SIZE];
		let mut h = Blake2bMac::<U32>::new_from_slice(mac_key)
			.expect("Key size is fixed and small enough");
		h.update(message);
		h.finalize().into_bytes().to_vec()
	}
}

/// ChaCha20 key and IV derived from a shared secret. Wiped on drop.
pub struct ChaChaKeyIv {
	key: [u8; STREAM_KEY_SIZE],
	iv: [u8; STREAM_IV_SIZE],
}

impl Zeroize for ChaChaKeyIv {
	fn zeroize(&mut self) {
		self.key.zeroize();
		self.iv.zeroize();
	}
}

impl Drop for ChaChaKeyIv {
	fn drop(&mut self) {
		self.zeroize();
	}
}

impl Keystream for Ristretto {
	type KeyIv = ChaChaKeyIv;

	fn derive_key_iv(&self, secret: &RistrettoPoint) -> ChaChaKeyIv {
		let derived = derive_secret(secret.compress().as_bytes(), KEYSTREAM_PERSONAL);
		let (key, iv, _) = array_refs![
			&*derived,
			STREAM_KEY_SIZE,
			STREAM_IV_SIZE,
			DERIVED_SIZE - STREAM_KEY_SIZE - STREAM_IV_SIZE
		];
		ChaChaKeyIv { key: *key, iv: *iv }
	}

	fn keystream(&self, key_iv: &ChaChaKeyIv, start: usize, end: usize) -> Zeroizing<Vec<u8>> {
		if end <= start {
			return Zeroizing::new(Vec::new())
		}
		// Windows are at most a few segments past the start of the stream; generating from 0
		// keeps this independent of the cipher's seek support. The skipped prefix is wiped with
		// `stream`.
		let mut stream = Zeroizing::new(vec![0; end]);
		let mut c = ChaCha20::new((&key_iv.key).into(), (&key_iv.iv).into());
		c.apply_keystream(&mut stream);
		Zeroizing::new(stream.split_off(start))
	}
}

impl Derive for Ristretto {
	fn blinding_factor(&self, alpha: &RistrettoPoint, secret: &RistrettoPoint) -> Scalar {
		let mut key = Zeroizing::new([0; 2 * POINT_SIZE]);
		key[..POINT_SIZE].copy_from_slice(alpha.compress().as_bytes());
		key[POINT_SIZE..].copy_from_slice(secret.compress().as_bytes());
		secret_to_scalar(&key[..], BLINDING_FACTOR_PERSONAL)
	}

	fn transaction_key(&self, secret: &RistrettoPoint) -> Scalar {
		secret_to_scalar(secret.compress().as_bytes(), TRANSACTION_KEY_PERSONAL)
	}
}

/// Static key pair of a relay.
pub struct KeyPair {
	/// Boxed to avoid leaving copies of the secret key around in memory if `KeyPair` is moved.
	secret: Box<Zeroizing<Scalar>>,
	public: RistrettoPoint,
}

impl KeyPair {
	pub fn gen(rng: &mut (impl Rng + CryptoRng)) -> Self {
		loop {
			let secret = Ristretto.random_scalar(rng);
			if Ristretto.scalar_is_valid(&secret) {
				return secret.into()
			}
		}
	}

	pub fn public(&self) -> &RistrettoPoint {
		&self.public
	}

	pub fn secret(&self) -> &Scalar {
		&self.secret
	}

	/// Shared secret with the holder of the ephemeral public key `alpha`.
	pub fn exchange(&self, alpha: &RistrettoPoint) -> RistrettoPoint {
		alpha * self.secret()
	}
}

impl From<Scalar> for KeyPair {
	fn from(secret: Scalar) -> Self {
		let secret = Box::new(Zeroizing::new(secret));
		let public = RISTRETTO_BASEPOINT_TABLE * &**secret;
		Self { secret, public }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

	fn rng() -> ChaChaRng {
		ChaChaRng::seed_from_u64(7)
	}

	#[test]
	fn exchange_is_symmetric() {
		let mut rng = rng();
		let ours = KeyPair::gen(&mut rng);
		let theirs = KeyPair::gen(&mut rng);
		assert_eq!(ours.exchange(theirs.public()), theirs.exchange(ours.public()));
	}

	#[test]
	fn point_encoding() {
		let pair = KeyPair::gen(&mut rng());
		let encoded = Ristretto.encode_point(pair.public());
		assert_eq!(encoded.len(), POINT_SIZE);
		assert_eq!(Ristretto.decode_point(&encoded), Some(*pair.public()));
		assert_eq!(Ristretto.decode_point(&encoded[1..]), None);
		assert_eq!(Ristretto.encode_scalar(pair.secret()).len(), SCALAR_SIZE);
	}

	#[test]
	fn identity_and_zero_are_invalid() {
		assert!(!Ristretto.point_is_valid(&RistrettoPoint::default()));
		assert!(!Ristretto.scalar_is_valid(&Scalar::ZERO));
		assert!(Ristretto.scalar_is_valid(&Scalar::ONE));
		assert!(Ristretto.point_is_valid(&Ristretto.mul_base(&Scalar::ONE)));
	}

	#[test]
	fn keystream_windows_agree() {
		let secret = *KeyPair::gen(&mut rng()).public();
		let key_iv = Ristretto.derive_key_iv(&secret);
		let full: Zeroizing<Vec<u8>> = Ristretto.keystream(&key_iv, 0, 300);
		assert_eq!(full.len(), 300);
		assert_eq!(Ristretto.keystream(&key_iv, 100, 300)[..], full[100..]);
		assert_eq!(Ristretto.keystream(&key_iv, 65, 129)[..], full[65..129]);
		assert!(Ristretto.keystream(&key_iv, 10, 10).is_empty());
	}

	#[test]
	fn mac_depends_on_secret_and_message() {
		let mut rng = rng();
		let a = *KeyPair::gen(&mut rng).public();
		let b = *KeyPair::gen(&mut rng).public();
		let tag = Ristretto.mac(&a, b"beta");
		assert_eq!(tag.len(), MAC_SIZE);
		assert!(Ristretto.mac_ok(&a, b"beta", &tag));
		assert!(!Ristretto.mac_ok(&b, b"beta", &tag));
		assert!(!Ristretto.mac_ok(&a, b"betb", &tag));
		assert!(!Ristretto.mac_ok(&a, b"beta", &tag[1..]));
	}

	#[test]
	fn derivations_are_domain_separated() {
		let mut rng = rng();
		let alpha = *KeyPair::gen(&mut rng).public();
		let secret = *KeyPair::gen(&mut rng).public();
		let blinding = Ristretto.blinding_factor(&alpha, &secret);
		assert_eq!(blinding, Ristretto.blinding_factor(&alpha, &secret));
		assert_ne!(blinding, Ristretto.blinding_factor(&secret, &alpha));
		assert_ne!(Ristretto.transaction_key(&secret), Ristretto.transaction_key(&alpha));
		assert_ne!(Ristretto.transaction_key(&secret), blinding);
	}
}
