use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// An ordered, duplicate free sequence of symbols.
///
/// The symbol at position 0 is the epsilon marker. It is only meaningful
/// before epsilon elimination; every algorithm that has to visit "all
/// symbols" iterates over the real symbols at positions 1.. instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Creates an alphabet from its textual form, e.g. `"1ab"` for epsilon
    /// marker `1` and real symbols `a` and `b`.
    pub fn new(symbols: &str) -> anyhow::Result<Self> {
        Self::from_symbols(symbols.chars().collect())
    }

    pub fn from_symbols(symbols: Vec<char>) -> anyhow::Result<Self> {
        if symbols.is_empty() {
            anyhow::bail!("An alphabet needs at least the epsilon marker at position 0.");
        }

        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                anyhow::bail!("Symbol '{}' occurs more than once in the alphabet.", symbol);
            }
        }

        Ok(Alphabet { symbols })
    }

    pub fn epsilon(&self) -> char {
        self.symbols[0]
    }

    pub fn is_epsilon(&self, symbol: char) -> bool {
        self.epsilon() == symbol
    }

    /// All symbols, including the epsilon marker.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The symbols at positions 1.., i.e. everything except epsilon.
    pub fn real_symbols(&self) -> &[char] {
        &self.symbols[1..]
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn is_real(&self, symbol: char) -> bool {
        self.real_symbols().contains(&symbol)
    }

    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }

    /// Number of symbols including the epsilon marker.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false, the epsilon slot is mandatory.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Keeps the epsilon marker and the real symbols of `self` and appends
    /// the real symbols of `other` that are missing. A real symbol of `other`
    /// that equals our epsilon marker is dropped.
    pub fn union(&self, other: &Alphabet) -> Alphabet {
        let mut symbols = self.symbols.clone();

        for &symbol in other.real_symbols() {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }

        Alphabet { symbols }
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Alphabet {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Alphabet::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(value: Alphabet) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_epsilon_from_real_symbols() {
        let alphabet = Alphabet::new("1abc").unwrap();

        assert_eq!(alphabet.epsilon(), '1');
        assert_eq!(alphabet.real_symbols(), &['a', 'b', 'c']);
        assert_eq!(alphabet.len(), 4);
        assert!(alphabet.is_real('b'));
        assert!(!alphabet.is_real('1'));
        assert_eq!(alphabet.index_of('c'), Some(3));
        assert_eq!(alphabet.to_string(), "1abc");
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(Alphabet::new("1aba").is_err());
        assert!(Alphabet::new("").is_err());
    }

    #[test]
    fn union_appends_missing_real_symbols() {
        let a = Alphabet::new("1ab").unwrap();
        let b = Alphabet::new("#bcd").unwrap();

        assert_eq!(a.union(&b).to_string(), "1abcd");
        assert_eq!(b.union(&a).to_string(), "#bcda");
    }
}
