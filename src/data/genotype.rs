//! # Genotype Calls
//!
//! The per-sample allele call resolved by a store lookup. Only the call
//! itself is modeled; the benchmark never inspects allele semantics beyond
//! formatting.

use std::fmt;
use std::str::FromStr;

use crate::error::GtBenchError;

/// A per-sample allele call, e.g. `0/1`, `1|1` or `./.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genotype {
    /// Called allele indices, `None` where the call is missing (`.`)
    alleles: Vec<Option<u8>>,
    /// True when every separator in the call was phased (`|`)
    phased: bool,
}

impl Genotype {
    /// Create a call from allele indices
    pub fn new(alleles: Vec<Option<u8>>, phased: bool) -> Self {
        Self { alleles, phased }
    }

    /// Called allele indices in order
    pub fn alleles(&self) -> &[Option<u8>] {
        &self.alleles
    }

    /// True when the call is phased
    pub fn is_phased(&self) -> bool {
        self.phased
    }

    /// True when no allele was called
    pub fn is_missing(&self) -> bool {
        self.alleles.iter().all(Option::is_none)
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        if self.alleles.is_empty() {
            return f.write_char('.');
        }

        let sep = if self.phased { '|' } else { '/' };

        for (i, allele) in self.alleles.iter().enumerate() {
            if i > 0 {
                f.write_char(sep)?;
            }
            match allele {
                Some(index) => write!(f, "{index}")?,
                None => f.write_char('.')?,
            }
        }

        Ok(())
    }
}

impl FromStr for Genotype {
    type Err = GtBenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(GtBenchError::lookup("empty genotype call"));
        }

        let phased = s.contains('|') && !s.contains('/');
        let mut alleles = Vec::new();

        for token in s.split(['/', '|']) {
            if token == "." {
                alleles.push(None);
            } else {
                let index = token
                    .parse::<u8>()
                    .map_err(|_| GtBenchError::lookup(format!("invalid genotype call: {s:?}")))?;
                alleles.push(Some(index));
            }
        }

        Ok(Self { alleles, phased })
    }
}
