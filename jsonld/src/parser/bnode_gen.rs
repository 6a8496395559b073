//! Blank node relabelling.
//!
//! Every blank node of a JSON-LD document is relabelled,
//! so that labels are only meaningful within one document.
use std::collections::HashMap;

/// Generates the blank node identifiers of one document.
#[derive(Clone, Debug, Default)]
pub struct BNodeGen {
    map: HashMap<String, String>,
    fresh: usize,
}

impl BNodeGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new blank node identifier, distinct from all the others.
    pub fn fresh(&mut self) -> String {
        let n = self.next_number();
        self.fresh += 1;
        format!("_:b{}", n)
    }

    /// The identifier associated to `key`, created on first use.
    pub fn get(&mut self, key: &str) -> String {
        if let Some(val) = self.map.get(key) {
            return val.clone();
        }
        let val = format!("_:b{}", self.next_number());
        self.map.insert(key.to_string(), val.clone());
        val
    }

    fn next_number(&self) -> usize {
        self.map.len() + self.fresh + 1
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    /// `k:x` calls `get("x")`, `f` calls `fresh()`.
    #[test_case(&["k:a", "k:b", "k:a"], &["_:b1", "_:b2", "_:b1"]; "same key same label")]
    #[test_case(&["f", "f", "f"], &["_:b1", "_:b2", "_:b3"]; "fresh labels")]
    #[test_case(&["k:a", "f", "k:a", "k:c", "f"], &["_:b1", "_:b2", "_:b1", "_:b3", "_:b4"]; "interleaved")]
    #[test_case(&["k:_:b2", "k:_:b1", "k:_:b2"], &["_:b1", "_:b2", "_:b1"]; "keys look like labels")]
    fn labels(calls: &[&str], expected: &[&str]) {
        let mut b = BNodeGen::new();
        let got: Vec<_> = calls
            .iter()
            .map(|c| match c.strip_prefix("k:") {
                Some(key) => b.get(key),
                None => b.fresh(),
            })
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn stable_over_many_keys() {
        let mut b = BNodeGen::new();
        let first: Vec<_> = (0..5_000).map(|i| b.get(&format!("_:n{i}"))).collect();
        let fresh = b.fresh();
        assert_eq!(fresh, "_:b5001");
        for (i, label) in first.iter().enumerate() {
            assert_eq!(&b.get(&format!("_:n{i}")), label);
        }
    }
}
