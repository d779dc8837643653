use crate::error::{Error, Result};
use std::fmt;

pub const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
pub const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
pub const DIGITS: &[u8] = b"23456789";
pub const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{}";

pub const UNION: &[u8] =
    b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%^&*()-_=+[]{}";

pub const DEFAULT_LENGTH: usize = 16;
pub const MAX_LENGTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Upper,
    Lower,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Upper,
        CharClass::Lower,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    pub fn alphabet(self) -> &'static [u8] {
        match self {
            CharClass::Upper => UPPER,
            CharClass::Lower => LOWER,
            CharClass::Digit => DIGITS,
            CharClass::Symbol => SYMBOLS,
        }
    }

    pub fn of(ch: char) -> Option<CharClass> {
        if !ch.is_ascii() {
            return None;
        }
        let byte = ch as u8;
        Self::ALL
            .into_iter()
            .find(|class| class.alphabet().contains(&byte))
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharClass::Upper => "uppercase",
            CharClass::Lower => "lowercase",
            CharClass::Digit => "digit",
            CharClass::Symbol => "symbol",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Length { expected: usize, actual: usize },
    MissingClass(CharClass),
    ForeignChar(char),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Length { expected, actual } => {
                write!(f, "expected {} chars, found {}", expected, actual)
            }
            Violation::MissingClass(class) => write!(f, "no {} character", class),
            Violation::ForeignChar(ch) => write!(f, "character {:?} is outside the charset", ch),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    length: usize,
}

impl Policy {
    pub const MIN_LENGTH: usize = CharClass::ALL.len();

    pub fn new(length: usize) -> Result<Self> {
        if length < Self::MIN_LENGTH {
            return Err(Error::LengthTooShort {
                length,
                minimum: Self::MIN_LENGTH,
            });
        }
        if length > MAX_LENGTH {
            return Err(Error::LengthTooLong {
                length,
                maximum: MAX_LENGTH,
            });
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn entropy_bits(&self) -> f64 {
        self.length as f64 * (UNION.len() as f64).log2()
    }

    pub fn audit(&self, candidate: &str) -> Vec<Violation> {
        let mut violations = Vec::new();

        let actual = candidate.chars().count();
        if actual != self.length {
            violations.push(Violation::Length {
                expected: self.length,
                actual,
            });
        }

        let mut seen = [false; 4];
        for ch in candidate.chars() {
            match CharClass::of(ch) {
                Some(class) => seen[class as usize] = true,
                None => violations.push(Violation::ForeignChar(ch)),
            }
        }

        for class in CharClass::ALL {
            if !seen[class as usize] {
                violations.push(Violation::MissingClass(class));
            }
        }

        violations
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_class_sizes() {
        assert_eq!(UPPER.len(), 24);
        assert_eq!(LOWER.len(), 25);
        assert_eq!(DIGITS.len(), 8);
        assert_eq!(SYMBOLS.len(), 18);
        assert_eq!(UNION.len(), 75);
    }

    #[test]
    fn test_classes_are_disjoint_and_union_matches() {
        let mut all = HashSet::new();
        for class in CharClass::ALL {
            for byte in class.alphabet() {
                assert!(all.insert(*byte), "{} appears in two classes", *byte as char);
            }
        }

        let union: HashSet<_> = UNION.iter().copied().collect();
        assert_eq!(union.len(), UNION.len(), "Union contains duplicates");
        assert_eq!(union, all);
    }

    #[test]
    fn test_ambiguous_glyphs_excluded() {
        for ch in ['I', 'O', 'l', '0', '1'] {
            assert_eq!(CharClass::of(ch), None, "{} should be excluded", ch);
        }
    }

    #[test]
    fn test_class_of() {
        assert_eq!(CharClass::of('Q'), Some(CharClass::Upper));
        assert_eq!(CharClass::of('q'), Some(CharClass::Lower));
        assert_eq!(CharClass::of('7'), Some(CharClass::Digit));
        assert_eq!(CharClass::of('{'), Some(CharClass::Symbol));
        assert_eq!(CharClass::of('é'), None);
        assert_eq!(CharClass::of('~'), None);
    }

    #[test]
    fn test_policy_bounds() {
        assert!(matches!(
            Policy::new(3),
            Err(Error::LengthTooShort { length: 3, minimum: 4 })
        ));
        assert!(matches!(
            Policy::new(MAX_LENGTH + 1),
            Err(Error::LengthTooLong { .. })
        ));
        assert_eq!(Policy::new(4).unwrap().length(), 4);
        assert_eq!(Policy::new(MAX_LENGTH).unwrap().length(), MAX_LENGTH);
        assert_eq!(Policy::default().length(), 16);
    }

    #[test]
    fn test_entropy_bits() {
        let bits = Policy::default().entropy_bits();
        assert!((bits - 16.0 * 75f64.log2()).abs() < 1e-9);
        assert!(bits > 99.0 && bits < 100.0);
    }

    #[test]
    fn test_audit_accepts_valid() {
        let policy = Policy::default();
        assert!(policy.audit("Ab3!Ab3!Ab3!Ab3!").is_empty());
    }

    #[test]
    fn test_audit_reports_everything() {
        let policy = Policy::new(8).unwrap();
        let violations = policy.audit("abc0");

        assert!(violations.contains(&Violation::Length {
            expected: 8,
            actual: 4
        }));
        assert!(violations.contains(&Violation::ForeignChar('0')));
        assert!(violations.contains(&Violation::MissingClass(CharClass::Upper)));
        assert!(violations.contains(&Violation::MissingClass(CharClass::Digit)));
        assert!(violations.contains(&Violation::MissingClass(CharClass::Symbol)));
        assert!(!violations.contains(&Violation::MissingClass(CharClass::Lower)));
    }
}
