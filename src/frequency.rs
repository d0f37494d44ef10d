use tracing::debug;

use crate::ALPHABET_SIZE;
use crate::error::{HuffmanError, Result};
use crate::io::{SliceSource, SymbolSource};

/// One symbol and its rate of occurrence. Merged tree nodes carry an entry
/// with no symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolFreq {
    symbol: Option<u8>,
    probability: f64,
}

impl SymbolFreq {
    pub fn new(symbol: u8, probability: f64) -> Self {
        SymbolFreq { symbol: Some(symbol), probability }
    }

    pub(crate) fn merged(probability: f64) -> Self {
        SymbolFreq { symbol: None, probability }
    }

    pub fn symbol(&self) -> Option<u8> {
        self.symbol
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

/// Occurrence counts over the alphabet.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [usize; ALPHABET_SIZE],
    total: usize,
}

impl FrequencyTable {
    pub fn from_symbols(data: &[u8]) -> Result<Self> {
        Self::from_source(&mut SliceSource::new(data))
    }

    pub fn from_source<S: SymbolSource>(source: &mut S) -> Result<Self> {
        let mut counts = [0usize; ALPHABET_SIZE];
        let mut total = 0;
        while source.has_next() {
            let symbol = source.read_symbol()?;
            let count = counts.get_mut(symbol as usize)
                .ok_or(HuffmanError::SymbolOutOfAlphabet { symbol, position: total })?;
            *count += 1;
            total += 1;
        }
        Ok(FrequencyTable { counts, total })
    }

    pub fn count(&self, symbol: u8) -> usize {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Entries for every occurring symbol, ascending by probability with ties
    /// broken by symbol value.
    ///
    /// A single distinct symbol `s` gets a zero-probability companion
    /// `(s + 1) mod 128` so the tree always has two leaves.
    pub fn sorted_list(&self) -> Result<Vec<SymbolFreq>> {
        if self.total == 0 {
            return Err(HuffmanError::EmptyInput);
        }
        let total = self.total as f64;
        let mut list: Vec<SymbolFreq> = self.counts.iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| SymbolFreq::new(symbol as u8, count as f64 / total))
            .collect();

        if list.len() == 1 {
            let symbol = list[0].symbol.unwrap_or(0);
            let companion = ((symbol as usize + 1) % ALPHABET_SIZE) as u8;
            debug!(symbol, companion, "single distinct symbol, adding companion leaf");
            list.push(SymbolFreq::new(companion, 0.0));
        }

        list.sort_by(|a, b| {
            a.probability.total_cmp(&b.probability).then(a.symbol.cmp(&b.symbol))
        });
        debug!(total = self.total, distinct = list.len(), "frequency analysis done");
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(list: &[SymbolFreq]) -> Vec<u8> {
        list.iter().filter_map(SymbolFreq::symbol).collect()
    }

    #[test]
    fn counts_and_probabilities() {
        let table = FrequencyTable::from_symbols(b"aab").unwrap();
        assert_eq!(table.count(b'a'), 2);
        assert_eq!(table.count(b'b'), 1);
        assert_eq!(table.total(), 3);
        assert_eq!(table.distinct(), 2);

        let list = table.sorted_list().unwrap();
        assert_eq!(symbols(&list), b"ba");
        assert!((list[0].probability() - 1.0 / 3.0).abs() < 1e-12);
        assert!((list[1].probability() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let list = FrequencyTable::from_symbols(b"the quick brown fox jumps over the lazy dog")
            .unwrap()
            .sorted_list()
            .unwrap();
        let sum: f64 = list.iter().map(SymbolFreq::probability).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ties_break_by_symbol_value() {
        let list = FrequencyTable::from_symbols(b"dcbaab").unwrap().sorted_list().unwrap();
        // c and d once each, a and b twice each
        assert_eq!(symbols(&list), b"cdab");
    }

    #[test]
    fn single_symbol_gets_companion() {
        let list = FrequencyTable::from_symbols(&[b'a'; 1000]).unwrap().sorted_list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], SymbolFreq::new(b'b', 0.0));
        assert_eq!(list[1], SymbolFreq::new(b'a', 1.0));
    }

    #[test]
    fn companion_wraps_at_end_of_alphabet() {
        let list = FrequencyTable::from_symbols(&[127, 127]).unwrap().sorted_list().unwrap();
        assert_eq!(symbols(&list), vec![0, 127]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let table = FrequencyTable::from_symbols(b"").unwrap();
        assert!(matches!(table.sorted_list(), Err(HuffmanError::EmptyInput)));
    }

    /// Source that skips its own alphabet check.
    struct UncheckedSource(Vec<u8>);

    impl SymbolSource for UncheckedSource {
        fn has_next(&self) -> bool {
            !self.0.is_empty()
        }

        fn read_symbol(&mut self) -> Result<u8> {
            Ok(self.0.remove(0))
        }
    }

    #[test]
    fn unchecked_source_high_byte_is_an_error() {
        let mut source = UncheckedSource(vec![b'a', b'b', 200]);
        let err = FrequencyTable::from_source(&mut source).unwrap_err();
        assert!(matches!(err, HuffmanError::SymbolOutOfAlphabet { symbol: 200, position: 2 }));
    }

    #[test]
    fn out_of_alphabet_is_rejected() {
        let err = FrequencyTable::from_symbols(&[b'a', 200]).unwrap_err();
        assert!(matches!(err, HuffmanError::SymbolOutOfAlphabet { symbol: 200, position: 1 }));
    }
}
