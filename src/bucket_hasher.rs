//! Deterministic hasher used to pick a bucket in `ChainedHashMap`.
//!
//! A lone integer write is passed through unchanged, so integer keys land
//! in bucket `key % N`. Byte streams and any write after the first are
//! folded in with FNV-1a. There is no per-instance seed: two maps built
//! from the same history lay their buckets out identically, which the
//! bucket-wise equality relies on.

use core::hash::{BuildHasher, Hasher};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Clone, Debug)]
pub struct BucketHasher {
    state: u64,
    written: bool,
}

impl BucketHasher {
    pub const fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
            written: false,
        }
    }

    #[inline]
    fn write_integer(&mut self, n: u64) {
        if self.written {
            self.write(&n.to_le_bytes());
        } else {
            self.state = n;
            self.written = true;
        }
    }
}

impl Default for BucketHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for BucketHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
        self.written = true;
    }

    fn write_u8(&mut self, n: u8) {
        self.write_integer(u64::from(n));
    }

    fn write_u16(&mut self, n: u16) {
        self.write_integer(u64::from(n));
    }

    fn write_u32(&mut self, n: u32) {
        self.write_integer(u64::from(n));
    }

    fn write_u64(&mut self, n: u64) {
        self.write_integer(n);
    }

    fn write_usize(&mut self, n: usize) {
        self.write_integer(n as u64);
    }

    fn finish(&self) -> u64 {
        self.state
    }
}

/// Builds fresh `BucketHasher`s; the default hashing strategy of `ChainedHashMap`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BuildBucketHasher;

impl BuildHasher for BuildBucketHasher {
    type Hasher = BucketHasher;

    fn build_hasher(&self) -> Self::Hasher {
        BucketHasher::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_pass_through() {
        let b = BuildBucketHasher;
        assert_eq!(b.hash_one(10u32), 10);
        assert_eq!(b.hash_one(50_004u64), 50_004);
        assert_eq!(b.hash_one(7usize), 7);
        assert_eq!(b.hash_one(-1i32), u64::from(u32::MAX));
    }

    #[test]
    fn strings_are_mixed_and_stable() {
        let b = BuildBucketHasher;
        let h1 = b.hash_one("alpha");
        let h2 = b.hash_one("alpha".to_string());
        let h3 = b.hash_one("alphb");
        assert_eq!(h1, h2, "String and str must hash alike for borrowed lookup");
        assert_ne!(h1, h3);
        // The terminator write after the bytes must not overwrite the state.
        assert_ne!(h1, 0xff);
    }

    #[test]
    fn compound_keys_use_every_field() {
        let b = BuildBucketHasher;
        assert_ne!(b.hash_one((1u32, 2u32)), b.hash_one((1u32, 3u32)));
        assert_ne!(b.hash_one((1u32, 2u32)), b.hash_one(1u32));
    }
}
