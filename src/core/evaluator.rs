// evaluator.rs - Joint probability of one fully specified world

use crate::core::network::{GeneCount, NetworkParams};
use crate::core::subsets::PersonSet;
use crate::data::Family;

/// Gene count and trait assigned to one person in a world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub gene: GeneCount,
    pub has_trait: bool,
}

impl Default for Assignment {
    fn default() -> Self {
        Self {
            gene: GeneCount::Zero,
            has_trait: false,
        }
    }
}

/// A total assignment of gene count and trait to every person, indexed like the family
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    assignments: Vec<Assignment>,
}

impl World {
    pub fn new(n: usize) -> Self {
        Self {
            assignments: vec![Assignment::default(); n],
        }
    }

    /// Build from disjoint one-copy / two-copy groups (everyone else has zero copies)
    pub fn from_groups(n: usize, one_gene: PersonSet, two_gene: PersonSet, have_trait: PersonSet) -> Self {
        let mut world = Self::new(n);
        world.assign(one_gene, two_gene, have_trait);
        world
    }

    /// Overwrite every assignment in place from group membership
    pub fn assign(&mut self, one_gene: PersonSet, two_gene: PersonSet, have_trait: PersonSet) {
        for (idx, slot) in self.assignments.iter_mut().enumerate() {
            slot.gene = if two_gene.contains(idx) {
                GeneCount::Two
            } else if one_gene.contains(idx) {
                GeneCount::One
            } else {
                GeneCount::Zero
            };
            slot.has_trait = have_trait.contains(idx);
        }
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn get(&self, idx: usize) -> Assignment {
        self.assignments[idx]
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Probability that a parent with `parent` copies passes on a carrier (`transmits = true`)
/// or non-carrier allele. Two-state model: only the parent's carrier status matters.
pub fn transmission_probability(params: &NetworkParams, parent: GeneCount, transmits: bool) -> f64 {
    if parent.is_carrier() == transmits {
        1.0 - params.mutation
    } else {
        params.mutation
    }
}

/// P(child copies | mother copies, father copies): sum over father allele `i`
/// and mother allele `j` in {0, 1} with `i + j` equal to the child's count.
pub fn inheritance_probability(
    params: &NetworkParams,
    child: GeneCount,
    mother: GeneCount,
    father: GeneCount,
) -> f64 {
    let target = child.copies();
    let mut total = 0.0;
    for from_father in 0..=1usize {
        for from_mother in 0..=1usize {
            if from_father + from_mother == target {
                total += transmission_probability(params, father, from_father == 1)
                    * transmission_probability(params, mother, from_mother == 1);
            }
        }
    }
    total
}

/// Joint probability of `world`: product over persons of P(gene | parents) * P(trait | gene)
pub fn joint_probability(family: &Family, world: &World, params: &NetworkParams) -> f64 {
    let mut probability = 1.0;
    for (idx, assignment) in world.assignments().iter().enumerate() {
        let gene_factor = match family.parents_of(idx) {
            Some(parents) => inheritance_probability(
                params,
                assignment.gene,
                world.get(parents.mother).gene,
                world.get(parents.father).gene,
            ),
            None => params.prior(assignment.gene),
        };
        probability *= gene_factor * params.trait_likelihood(assignment.gene, assignment.has_trait);
    }
    probability
}
