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

//! Fixed-layout buffer assembly.
//!
//! A [`Layout`] is a declared total length plus a list of `(offset, bytes)` writes. Nothing is
//! copied until [`Layout::build`], which checks every write lies within the buffer and does not
//! overlap an earlier one. Bytes not covered by any write are zero.

/// Invalid write in a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
	/// Write extends past the end of the buffer.
	#[error("Write of {len} bytes at offset {offset} exceeds buffer of {total} bytes.")]
	OutOfBounds { offset: usize, len: usize, total: usize },
	/// Write overlaps an earlier write.
	#[error("Write of {len} bytes at offset {offset} overlaps an earlier write.")]
	Overlap { offset: usize, len: usize },
}

pub struct Layout<'a> {
	total: usize,
	writes: Vec<(usize, &'a [u8])>,
}

impl<'a> Layout<'a> {
	pub fn new(total: usize) -> Self {
		Self { total, writes: Vec::new() }
	}

	/// Place `bytes` at `offset`.
	pub fn write(mut self, offset: usize, bytes: &'a [u8]) -> Self {
		self.writes.push((offset, bytes));
		self
	}

	/// Place `bytes` directly after the previous write (or at 0 if there is none).
	pub fn append(self, bytes: &'a [u8]) -> Self {
		let offset = self.writes.last().map_or(0, |(offset, prev)| offset + prev.len());
		self.write(offset, bytes)
	}

	pub fn build(self) -> Result<Vec<u8>, LayoutError> {
		let mut spans: Vec<(usize, usize)> = Vec::with_capacity(self.writes.len());
		for &(offset, bytes) in &self.writes {
			let len = bytes.len();
			match offset.checked_add(len) {
				Some(end) if end <= self.total => (),
				_ => return Err(LayoutError::OutOfBounds { offset, len, total: self.total }),
			}
			if len != 0 &&
				spans.iter().any(|&(start, end)| offset < end && start < offset + len)
			{
				return Err(LayoutError::Overlap { offset, len })
			}
			spans.push((offset, offset + len));
		}

		let mut buf = vec![0; self.total];
		for (offset, bytes) in self.writes {
			buf[offset..offset + bytes.len()].copy_from_slice(bytes);
		}
		Ok(buf)
	}
}
