use crate::error::Result;
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use std::fmt;
use tracing::warn;
use zeroize::Zeroizing;

const KEY_LEN: usize = 32;
const KEYSTREAM_BLOCK: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Secure,
    Weak,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Secure => f.write_str("secure"),
            Strength::Weak => f.write_str("weak"),
        }
    }
}

pub trait RandomSource: RngCore {
    fn strength(&self) -> Strength;

    fn describe(&self) -> &'static str;
}

pub struct SecureSource {
    cipher: ChaCha20,
    buffer: Zeroizing<[u8; KEYSTREAM_BLOCK]>,
    pos: usize,
}

impl SecureSource {
    pub fn from_os() -> Result<Self> {
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        getrandom::fill(key.as_mut_slice())?;
        Ok(Self::from_key(&key))
    }

    pub fn from_key(key: &[u8; KEY_LEN]) -> Self {
        let cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        Self {
            cipher,
            buffer: Zeroizing::new([0u8; KEYSTREAM_BLOCK]),
            pos: KEYSTREAM_BLOCK,
        }
    }

    fn refill(&mut self) {
        self.buffer.fill(0);
        self.cipher.apply_keystream(self.buffer.as_mut_slice());
        self.pos = 0;
    }
}

impl RngCore for SecureSource {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst {
            if self.pos >= KEYSTREAM_BLOCK {
                self.refill();
            }
            *byte = self.buffer[self.pos];
            self.pos += 1;
        }
    }
}

impl RandomSource for SecureSource {
    fn strength(&self) -> Strength {
        Strength::Secure
    }

    fn describe(&self) -> &'static str {
        "ChaCha20 (256-bit, OS seeded)"
    }
}

pub struct FallbackSource(SmallRng);

impl FallbackSource {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_clock() -> Self {
        Self::new(clock_seed())
    }
}

impl RngCore for FallbackSource {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.0.fill_bytes(dst)
    }
}

impl RandomSource for FallbackSource {
    fn strength(&self) -> Strength {
        Strength::Weak
    }

    fn describe(&self) -> &'static str {
        "SmallRng (clock seeded, not cryptographic)"
    }
}

pub fn select_source() -> Box<dyn RandomSource> {
    choose(SecureSource::from_os())
}

fn choose(secure: Result<SecureSource>) -> Box<dyn RandomSource> {
    match secure {
        Ok(source) => Box::new(source),
        Err(err) => {
            warn!(%err, "falling back to a non-cryptographic random source");
            Box::new(FallbackSource::from_clock())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
fn clock_seed() -> u64 {
    0x5eed_c1a7_e000_0001
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn clock_seed() -> u64 {
    (js_sys::Date::now() * 1000.0) as u64 ^ (js_sys::Math::random() * u32::MAX as f64) as u64
}
