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

//! Sender-side construction of Sphinx-style onion packet headers.
//!
//! A header consists of:
//!
//! - `alpha`: an ephemeral public key, blinded by each relay before forwarding.
//! - `beta`: onion-encrypted routing information. Each relay peels one layer, learning only the
//!   next hop, the MAC for the next hop, and the transaction key material it needs to open a
//!   payment channel with its successor.
//! - `gamma`: MAC over `beta`, checked by the relay receiving the header.
//!
//! The header has the same size whatever the number of hops. The per-hop shared secrets are
//! returned alongside the header; they are what the payment-channel layer keys its channels with.
//!
//! Peeling headers is the relays' business and is not implemented here.

pub mod crypto;
mod error;
pub mod filler;
mod header;
pub mod key_shares;
pub mod layout;
pub mod observe;
mod params;
mod route;
pub mod segment;

pub use crate::{
	crypto::{ristretto::Ristretto, Authenticator, Curve, Derive, Keystream, Suite},
	error::{Error, InvalidRouteError},
	header::{create_header, CreatedHeader, Header, HeaderBuilder},
	key_shares::SharedSecrets,
	observe::{Event, Observer},
	params::Params,
	route::{Hop, HopId, RawHop},
};
