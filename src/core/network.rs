// network.rs - Fixed conditional probability tables of the inheritance network

use crate::error::{HeredityError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tolerance used when checking that a probability table sums to one
pub const TABLE_TOLERANCE: f64 = 1e-9;

/// Number of mutant gene copies a person carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    /// All gene counts in table order (0, 1, 2)
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    pub fn copies(self) -> usize {
        match self {
            GeneCount::Zero => 0,
            GeneCount::One => 1,
            GeneCount::Two => 2,
        }
    }

    pub fn from_copies(copies: usize) -> Option<Self> {
        match copies {
            0 => Some(GeneCount::Zero),
            1 => Some(GeneCount::One),
            2 => Some(GeneCount::Two),
            _ => None,
        }
    }

    /// True when at least one copy is present
    pub fn is_carrier(self) -> bool {
        self != GeneCount::Zero
    }
}

impl fmt::Display for GeneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.copies())
    }
}

impl FromStr for GeneCount {
    type Err = HeredityError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(GeneCount::from_copies)
            .ok_or_else(|| HeredityError::Input(format!("Invalid gene count: {}", s)))
    }
}

/// Conditional probability tables of the network.
///
/// Immutable once built; the evaluator borrows it for every world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Unconditional P(gene), indexed by copy count
    pub gene_prior: [f64; 3],
    /// P(trait | gene) rows indexed by copy count, each `[P(true), P(false)]`
    pub trait_given_gene: [[f64; 2]; 3],
    /// Probability that a transmitted allele flips its carrier state
    pub mutation: f64,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            gene_prior: [0.96, 0.03, 0.01],
            trait_given_gene: [[0.01, 0.99], [0.56, 0.44], [0.65, 0.35]],
            mutation: 0.01,
        }
    }
}

impl NetworkParams {
    /// Build and validate custom tables
    pub fn new(gene_prior: [f64; 3], trait_given_gene: [[f64; 2]; 3], mutation: f64) -> Result<Self> {
        let params = Self {
            gene_prior,
            trait_given_gene,
            mutation,
        };
        params.validate()?;
        Ok(params)
    }

    /// Copy of these tables with a different mutation rate
    pub fn with_mutation(&self, mutation: f64) -> Result<Self> {
        Self::new(self.gene_prior, self.trait_given_gene, mutation)
    }

    pub fn prior(&self, gene: GeneCount) -> f64 {
        self.gene_prior[gene.copies()]
    }

    pub fn trait_likelihood(&self, gene: GeneCount, has_trait: bool) -> f64 {
        let row = &self.trait_given_gene[gene.copies()];
        if has_trait {
            row[0]
        } else {
            row[1]
        }
    }

    /// Check ranges and that the prior and each likelihood row sum to one
    pub fn validate(&self) -> Result<()> {
        let in_unit = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);

        if !in_unit(self.mutation) {
            return Err(HeredityError::Config(format!(
                "mutation probability must be within [0, 1], got {}",
                self.mutation
            )));
        }

        if !self.gene_prior.iter().all(|&p| in_unit(p)) {
            return Err(HeredityError::Config(format!(
                "gene prior entries must be within [0, 1]: {:?}",
                self.gene_prior
            )));
        }
        let prior_sum: f64 = self.gene_prior.iter().sum();
        if (prior_sum - 1.0).abs() > TABLE_TOLERANCE {
            return Err(HeredityError::Config(format!(
                "gene prior must sum to 1, got {}",
                prior_sum
            )));
        }

        for (copies, row) in self.trait_given_gene.iter().enumerate() {
            if !row.iter().all(|&p| in_unit(p)) {
                return Err(HeredityError::Config(format!(
                    "trait likelihood for {} copies must be within [0, 1]: {:?}",
                    copies, row
                )));
            }
            let row_sum = row[0] + row[1];
            if (row_sum - 1.0).abs() > TABLE_TOLERANCE {
                return Err(HeredityError::Config(format!(
                    "trait likelihood for {} copies must sum to 1, got {}",
                    copies, row_sum
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_valid() {
        let params = NetworkParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.prior(GeneCount::Two), 0.01);
        assert_eq!(params.prior(GeneCount::Zero), 0.96);
        assert_eq!(params.trait_likelihood(GeneCount::One, true), 0.56);
        assert_eq!(params.trait_likelihood(GeneCount::Zero, false), 0.99);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(NetworkParams::new([0.5, 0.5, 0.5], [[0.5, 0.5]; 3], 0.01).is_err());
        assert!(NetworkParams::new([0.9, 0.05, 0.05], [[0.5, 0.6], [0.5, 0.5], [0.5, 0.5]], 0.01).is_err());
        assert!(NetworkParams::default().with_mutation(1.5).is_err());
        assert!(NetworkParams::default().with_mutation(f64::NAN).is_err());
        assert!(NetworkParams::default().with_mutation(0.0).is_ok());
    }

    #[test]
    fn test_gene_count_conversions() {
        for gene in GeneCount::ALL {
            assert_eq!(GeneCount::from_copies(gene.copies()), Some(gene));
            assert_eq!(gene.to_string().parse::<GeneCount>().unwrap(), gene);
        }
        assert!(GeneCount::from_copies(3).is_none());
        assert!(!GeneCount::Zero.is_carrier());
        assert!(GeneCount::One.is_carrier());
        assert!(GeneCount::Two.is_carrier());
    }
}
