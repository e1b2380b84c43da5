// distribution.rs - Per-person probability mass: accumulation and normalization

use crate::core::evaluator::World;
use crate::core::network::GeneCount;
use crate::data::Family;
use crate::error::{HeredityError, Result};
use serde::{Deserialize, Serialize};

/// Gene and trait distribution of one person.
///
/// Holds unnormalized mass while enumeration runs, probabilities once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Distribution {
    /// Indexed by copy count
    pub gene: [f64; 3],
    /// `[true, false]`
    pub traits: [f64; 2],
}

impl Distribution {
    pub fn gene(&self, gene: GeneCount) -> f64 {
        self.gene[gene.copies()]
    }

    pub fn trait_probability(&self, has_trait: bool) -> f64 {
        if has_trait {
            self.traits[0]
        } else {
            self.traits[1]
        }
    }

    pub fn gene_total(&self) -> f64 {
        self.gene.iter().sum()
    }

    pub fn trait_total(&self) -> f64 {
        self.traits.iter().sum()
    }

    /// Scale both distributions to sum to one, in place.
    /// Returns the name of the first field whose total is zero or not finite.
    pub fn normalize(&mut self) -> std::result::Result<(), &'static str> {
        if !scale_to_unit(&mut self.gene) {
            return Err("gene");
        }
        if !scale_to_unit(&mut self.traits) {
            return Err("trait");
        }
        Ok(())
    }

    fn add(&mut self, other: &Distribution) {
        for (a, b) in self.gene.iter_mut().zip(other.gene.iter()) {
            *a += b;
        }
        for (a, b) in self.traits.iter_mut().zip(other.traits.iter()) {
            *a += b;
        }
    }
}

fn scale_to_unit(values: &mut [f64]) -> bool {
    let total: f64 = values.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return false;
    }
    let alpha = 1.0 / total;
    for value in values.iter_mut() {
        *value *= alpha;
    }
    true
}

/// Running per-person sums of world probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    masses: Vec<Distribution>,
}

impl Accumulator {
    pub fn new(n: usize) -> Self {
        Self {
            masses: vec![Distribution::default(); n],
        }
    }

    /// Add `joint` to each person's mass at their assigned gene count and trait
    pub fn add_world(&mut self, world: &World, joint: f64) {
        for (mass, assignment) in self.masses.iter_mut().zip(world.assignments()) {
            mass.gene[assignment.gene.copies()] += joint;
            mass.traits[if assignment.has_trait { 0 } else { 1 }] += joint;
        }
    }

    /// Combine two partial accumulators (parallel reduction)
    pub fn merge(mut self, other: Accumulator) -> Accumulator {
        for (mine, theirs) in self.masses.iter_mut().zip(other.masses.iter()) {
            mine.add(theirs);
        }
        self
    }

    pub fn masses(&self) -> &[Distribution] {
        &self.masses
    }

    /// Normalize every person's mass once, consuming the accumulator.
    ///
    /// A zero total means no enumerated world was consistent with the evidence.
    pub fn finalize(mut self, family: &Family) -> Result<Posteriors> {
        for (idx, mass) in self.masses.iter_mut().enumerate() {
            mass.normalize()
                .map_err(|field| HeredityError::Normalization {
                    person: family.person(idx).name.clone(),
                    field,
                })?;
        }

        let entries = family
            .persons()
            .iter()
            .zip(self.masses)
            .map(|(person, distribution)| PersonPosterior {
                name: person.name.clone(),
                distribution,
            })
            .collect();

        Ok(Posteriors { entries })
    }
}

/// Normalized distribution of one person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonPosterior {
    pub name: String,
    pub distribution: Distribution,
}

/// Final result of inference, in family order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posteriors {
    entries: Vec<PersonPosterior>,
}

impl Posteriors {
    pub fn get(&self, name: &str) -> Option<&Distribution> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.distribution)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonPosterior> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
