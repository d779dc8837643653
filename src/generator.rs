use crate::charset::{CharClass, Policy, UNION};
use crate::random::{RandomSource, Strength, select_source};
use rand::seq::SliceRandom;
use std::fmt;
use std::ops::Deref;
use zeroize::Zeroizing;

pub struct Password {
    value: Zeroizing<String>,
    strength: Strength,
}

impl Password {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn is_secure(&self) -> bool {
        self.strength == Strength::Secure
    }
}

impl Deref for Password {
    type Target = str;

    fn deref(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("value", &"<redacted>")
            .field("len", &self.value.len())
            .field("strength", &self.strength)
            .finish()
    }
}

pub fn generate() -> Password {
    let mut rng = select_source();
    generate_with(rng.as_mut(), &Policy::default())
}

pub fn generate_with<R: RandomSource + ?Sized>(rng: &mut R, policy: &Policy) -> Password {
    let mut bytes = Zeroizing::new(Vec::with_capacity(policy.length()));

    for class in CharClass::ALL {
        bytes.push(pick(rng, class.alphabet()));
    }
    while bytes.len() < policy.length() {
        bytes.push(pick(rng, UNION));
    }

    bytes.shuffle(rng);

    let value: String = bytes.iter().map(|b| *b as char).collect();

    Password {
        value: Zeroizing::new(value),
        strength: rng.strength(),
    }
}

fn pick<R: RandomSource + ?Sized>(rng: &mut R, alphabet: &[u8]) -> u8 {
    let alphabet_size = alphabet.len() as u64;
    let span = 1u64 << 32;
    let rejection_threshold = span - (span % alphabet_size);

    loop {
        let draw = u64::from(rng.next_u32());
        if draw < rejection_threshold {
            return alphabet[(draw % alphabet_size) as usize];
        }
    }
}
