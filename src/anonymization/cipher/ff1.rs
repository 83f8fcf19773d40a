//! FF1 format-preserving encryption (NIST SP 800-38G)
//!
//! Operates on numeral strings: each numeral is a digit in `[0, radix)`.
//! The output has the same length and radix as the input.
//!
//! The round function is AES in CBC-MAC mode over `P || Q`, extended to `d`
//! bytes by enciphering `R xor [j]^16`, exactly as in the standard. Ten
//! Feistel rounds are used.

use crate::domain::AnonymizeError;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};
use num_bigint::BigUint;
use num_traits::One;

const ROUNDS: u8 = 10;
const BLOCK_SIZE: usize = 16;

/// Minimum domain size `radix^len` accepted for a numeral string
pub const MIN_DOMAIN_SIZE: u64 = 100;

/// Largest supported radix (numerals are stored as bytes)
pub const MAX_RADIX: u32 = 256;

enum BlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockCipher {
    fn new(key: &[u8]) -> Result<Self, AnonymizeError> {
        let invalid = |_| AnonymizeError::InvalidKey("key rejected by AES".to_string());
        match key.len() {
            16 => Aes128::new_from_slice(key).map(Self::Aes128).map_err(invalid),
            24 => Aes192::new_from_slice(key).map(Self::Aes192).map_err(invalid),
            32 => Aes256::new_from_slice(key).map(Self::Aes256).map_err(invalid),
            n => Err(AnonymizeError::InvalidKey(format!(
                "key must be 16, 24 or 32 bytes, got {n}"
            ))),
        }
    }

    fn encrypt_block(&self, bytes: &mut [u8; BLOCK_SIZE]) {
        let mut block = Block::clone_from_slice(&bytes[..]);
        match self {
            Self::Aes128(c) => c.encrypt_block(&mut block),
            Self::Aes192(c) => c.encrypt_block(&mut block),
            Self::Aes256(c) => c.encrypt_block(&mut block),
        }
        bytes.copy_from_slice(&block);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// FF1 cipher bound to a key and a radix
pub struct Ff1 {
    cipher: BlockCipher,
    radix: u32,
    min_len: usize,
}

impl Ff1 {
    /// Create a cipher for `radix` using an AES-128/192/256 key
    ///
    /// # Errors
    ///
    /// [`AnonymizeError::InvalidKey`] for key sizes other than 16, 24 or 32
    /// bytes, [`AnonymizeError::InvalidCipherInput`] for a radix outside
    /// `2..=256`.
    pub fn new(key: &[u8], radix: u32) -> Result<Self, AnonymizeError> {
        if !(2..=MAX_RADIX).contains(&radix) {
            return Err(AnonymizeError::InvalidCipherInput(format!(
                "radix must be between 2 and {MAX_RADIX}, got {radix}"
            )));
        }

        let mut min_len = 1;
        let mut domain = u64::from(radix);
        while domain < MIN_DOMAIN_SIZE {
            domain *= u64::from(radix);
            min_len += 1;
        }

        Ok(Self {
            cipher: BlockCipher::new(key)?,
            radix,
            min_len,
        })
    }

    /// Radix of the numeral strings
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Shortest numeral string accepted
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Encrypt a numeral string
    pub fn encrypt(&self, tweak: &[u8], numerals: &[u8]) -> Result<Vec<u8>, AnonymizeError> {
        self.run(tweak, numerals, Direction::Encrypt)
    }

    /// Decrypt a numeral string
    pub fn decrypt(&self, tweak: &[u8], numerals: &[u8]) -> Result<Vec<u8>, AnonymizeError> {
        self.run(tweak, numerals, Direction::Decrypt)
    }

    fn check_input(&self, tweak: &[u8], numerals: &[u8]) -> Result<(), AnonymizeError> {
        let n = numerals.len();
        if n < self.min_len {
            return Err(AnonymizeError::InvalidCipherInput(format!(
                "value of {n} characters is shorter than the minimum of {} for radix {}",
                self.min_len, self.radix
            )));
        }
        if u32::try_from(n).is_err() || u32::try_from(tweak.len()).is_err() {
            return Err(AnonymizeError::InvalidCipherInput(
                "value or tweak too long".to_string(),
            ));
        }
        if let Some(bad) = numerals.iter().find(|&&d| u32::from(d) >= self.radix) {
            return Err(AnonymizeError::InvalidCipherInput(format!(
                "numeral {bad} is not valid for radix {}",
                self.radix
            )));
        }
        Ok(())
    }

    fn run(
        &self,
        tweak: &[u8],
        numerals: &[u8],
        direction: Direction,
    ) -> Result<Vec<u8>, AnonymizeError> {
        self.check_input(tweak, numerals)?;

        let n = numerals.len();
        let u = n / 2;
        let v = n - u;

        let radix = BigUint::from(self.radix);
        let modulus_u = radix.pow(u as u32);
        let modulus_v = radix.pow(v as u32);
        let b = ((&modulus_v - BigUint::one()).bits() as usize).div_ceil(8);
        let d = 4 * b.div_ceil(4) + 4;
        let p = self.header(u, n, tweak.len());

        let mut a = numerals[..u].to_vec();
        let mut right = numerals[u..].to_vec();

        match direction {
            Direction::Encrypt => {
                for round in 0..ROUNDS {
                    let (m, modulus) = if round % 2 == 0 {
                        (u, &modulus_u)
                    } else {
                        (v, &modulus_v)
                    };
                    let y = self.round_value(&p, tweak, round, &right, b, d)?;
                    let c = (self.num(&a)? + y) % modulus;
                    let c = self.str_m(&c, m);
                    a = std::mem::replace(&mut right, c);
                }
            }
            Direction::Decrypt => {
                for round in (0..ROUNDS).rev() {
                    let (m, modulus) = if round % 2 == 0 {
                        (u, &modulus_u)
                    } else {
                        (v, &modulus_v)
                    };
                    let y = self.round_value(&p, tweak, round, &a, b, d)?;
                    let c = (self.num(&right)? + modulus - (y % modulus)) % modulus;
                    let c = self.str_m(&c, m);
                    right = std::mem::replace(&mut a, c);
                }
            }
        }

        a.extend_from_slice(&right);
        Ok(a)
    }

    /// Fixed block `P` shared by all rounds
    fn header(&self, u: usize, n: usize, t: usize) -> [u8; BLOCK_SIZE] {
        let radix = self.radix.to_be_bytes();
        let n = (n as u32).to_be_bytes();
        let t = (t as u32).to_be_bytes();
        [
            1,
            2,
            1,
            radix[1],
            radix[2],
            radix[3],
            10,
            (u % 256) as u8,
            n[0],
            n[1],
            n[2],
            n[3],
            t[0],
            t[1],
            t[2],
            t[3],
        ]
    }

    fn round_value(
        &self,
        p: &[u8; BLOCK_SIZE],
        tweak: &[u8],
        round: u8,
        half: &[u8],
        b: usize,
        d: usize,
    ) -> Result<BigUint, AnonymizeError> {
        let num = self.num(half)?.to_bytes_be();
        let pad = (BLOCK_SIZE - (tweak.len() + b + 1) % BLOCK_SIZE) % BLOCK_SIZE;

        let mut input = Vec::with_capacity(BLOCK_SIZE + tweak.len() + pad + 1 + b);
        input.extend_from_slice(p);
        input.extend_from_slice(tweak);
        input.resize(input.len() + pad, 0);
        input.push(round);
        input.resize(input.len() + b.saturating_sub(num.len()), 0);
        input.extend_from_slice(&num);

        let r = self.prf(&input);

        let blocks = d.div_ceil(BLOCK_SIZE);
        let mut s = Vec::with_capacity(blocks * BLOCK_SIZE);
        s.extend_from_slice(&r);
        for j in 1..blocks {
            let mut block = r;
            for (byte, counter) in block.iter_mut().zip((j as u128).to_be_bytes()) {
                *byte ^= counter;
            }
            self.cipher.encrypt_block(&mut block);
            s.extend_from_slice(&block);
        }
        s.truncate(d);

        Ok(BigUint::from_bytes_be(&s))
    }

    /// CBC-MAC with a zero IV; `data` is a whole number of blocks
    fn prf(&self, data: &[u8]) -> [u8; BLOCK_SIZE] {
        let mut y = [0u8; BLOCK_SIZE];
        for chunk in data.chunks(BLOCK_SIZE) {
            for (acc, byte) in y.iter_mut().zip(chunk) {
                *acc ^= byte;
            }
            self.cipher.encrypt_block(&mut y);
        }
        y
    }

    fn num(&self, numerals: &[u8]) -> Result<BigUint, AnonymizeError> {
        if numerals.is_empty() {
            return Ok(BigUint::default());
        }
        BigUint::from_radix_be(numerals, self.radix).ok_or_else(|| {
            AnonymizeError::InvalidCipherInput(format!(
                "numeral string is not valid for radix {}",
                self.radix
            ))
        })
    }

    /// Big-endian representation of `x` as exactly `m` numerals
    fn str_m(&self, x: &BigUint, m: usize) -> Vec<u8> {
        let digits = x.to_radix_be(self.radix);
        let mut out = vec![0u8; m.saturating_sub(digits.len())];
        out.extend_from_slice(&digits[digits.len().saturating_sub(m)..]);
        out
    }
}
