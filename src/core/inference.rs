// inference.rs - Exact inference by enumerating every world consistent with the evidence

use crate::core::distribution::{Accumulator, Posteriors};
use crate::core::evaluator::{joint_probability, World};
use crate::core::network::NetworkParams;
use crate::core::subsets::{PersonSet, MAX_SET_SIZE};
use crate::data::Family;
use crate::error::{HeredityError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Default ceiling on family size (2^12 * 3^12 ≈ 2.2e9 worlds)
pub const DEFAULT_MAX_PERSONS: usize = 12;

/// Execution options for the inference engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Reject families larger than this before enumerating
    pub max_persons: usize,
    /// Spread the gene-group enumeration of each trait hypothesis over the rayon pool
    pub parallel: bool,
    /// Show a progress bar over trait hypotheses
    pub show_progress: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            max_persons: DEFAULT_MAX_PERSONS,
            parallel: false,
            show_progress: false,
        }
    }
}

/// Counters collected during one enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InferenceStats {
    pub trait_hypotheses: u64,
    pub admitted_hypotheses: u64,
    pub worlds_evaluated: u64,
}

/// True when `have_trait` agrees with every observed trait in the family
pub fn is_consistent(family: &Family, have_trait: PersonSet) -> bool {
    family
        .persons()
        .iter()
        .enumerate()
        .all(|(idx, person)| match person.observed_trait {
            Some(observed) => observed == have_trait.contains(idx),
            None => true,
        })
}

/// Number of worlds the engine will score: 3^n gene assignments times 2^k trait
/// assignments, k being the persons without an observed trait. `None` on overflow.
pub fn hypothesis_space_size(family: &Family) -> Option<u128> {
    let n = u32::try_from(family.len()).ok()?;
    let unobserved = u32::try_from(family.len() - family.observed_count()).ok()?;
    3u128.checked_pow(n)?.checked_mul(2u128.checked_pow(unobserved)?)
}

/// Exact enumeration engine over a fixed network
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    params: NetworkParams,
    options: InferenceOptions,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self {
            params: NetworkParams::default(),
            options: InferenceOptions::default(),
        }
    }
}

impl InferenceEngine {
    pub fn new(params: NetworkParams, options: InferenceOptions) -> Result<Self> {
        params.validate()?;
        if options.max_persons == 0 || options.max_persons > MAX_SET_SIZE {
            return Err(HeredityError::Config(format!(
                "max_persons must be between 1 and {}, got {}",
                MAX_SET_SIZE, options.max_persons
            )));
        }
        Ok(Self { params, options })
    }

    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    pub fn options(&self) -> &InferenceOptions {
        &self.options
    }

    /// Posterior gene and trait distribution of every person
    pub fn infer(&self, family: &Family) -> Result<Posteriors> {
        self.infer_with_stats(family).map(|(posteriors, _)| posteriors)
    }

    /// Reject families over the `max_persons` ceiling without enumerating anything
    pub fn check_family(&self, family: &Family) -> Result<()> {
        if family.len() > self.options.max_persons {
            return Err(HeredityError::Input(format!(
                "family has {} persons; exact enumeration is capped at {} (2^n * 3^n worlds)",
                family.len(),
                self.options.max_persons
            )));
        }
        Ok(())
    }

    pub fn infer_with_stats(&self, family: &Family) -> Result<(Posteriors, InferenceStats)> {
        self.check_family(family)?;
        let n = family.len();

        let start = Instant::now();
        let everyone = PersonSet::full(n);
        let mut accumulator = Accumulator::new(n);
        let mut world = World::new(n);
        let mut stats = InferenceStats::default();

        let progress = if self.options.show_progress {
            let pb = ProgressBar::new(1u64 << n);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}",
            ) {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        for have_trait in everyone.subsets() {
            stats.trait_hypotheses += 1;
            if let Some(pb) = &progress {
                pb.inc(1);
            }

            if !is_consistent(family, have_trait) {
                continue;
            }
            stats.admitted_hypotheses += 1;

            stats.worlds_evaluated += if self.options.parallel {
                let (partial, evaluated) = self.accumulate_parallel(family, everyone, have_trait);
                accumulator = accumulator.merge(partial);
                evaluated
            } else {
                self.accumulate_branch(family, everyone, have_trait, &mut accumulator, &mut world)
            };
        }

        if let Some(pb) = progress {
            pb.finish_with_message("✅ Enumeration completed!");
        }

        let posteriors = accumulator.finalize(family)?;

        eprintln!(
            "✅ Scored {} worlds ({} of {} trait hypotheses admitted) in {:.2}s",
            stats.worlds_evaluated,
            stats.admitted_hypotheses,
            stats.trait_hypotheses,
            start.elapsed().as_secs_f64()
        );

        Ok((posteriors, stats))
    }

    /// Score every gene partition under one admitted trait hypothesis
    fn accumulate_branch(
        &self,
        family: &Family,
        everyone: PersonSet,
        have_trait: PersonSet,
        accumulator: &mut Accumulator,
        world: &mut World,
    ) -> u64 {
        let mut evaluated = 0;
        for one_gene in everyone.subsets() {
            evaluated += self.accumulate_one_gene(family, everyone, one_gene, have_trait, accumulator, world);
        }
        evaluated
    }

    fn accumulate_one_gene(
        &self,
        family: &Family,
        everyone: PersonSet,
        one_gene: PersonSet,
        have_trait: PersonSet,
        accumulator: &mut Accumulator,
        world: &mut World,
    ) -> u64 {
        let mut evaluated = 0;
        for two_gene in everyone.difference(one_gene).subsets() {
            world.assign(one_gene, two_gene, have_trait);
            let joint = joint_probability(family, world, &self.params);
            accumulator.add_world(world, joint);
            evaluated += 1;
        }
        evaluated
    }

    /// Parallel variant: one-copy groups are split across workers, each with a
    /// private accumulator, then reduced by summation.
    fn accumulate_parallel(
        &self,
        family: &Family,
        everyone: PersonSet,
        have_trait: PersonSet,
    ) -> (Accumulator, u64) {
        let n = family.len();
        let one_gene_groups: Vec<PersonSet> = everyone.subsets().collect();

        one_gene_groups
            .into_par_iter()
            .fold(
                || (Accumulator::new(n), World::new(n), 0u64),
                |(mut partial, mut world, evaluated), one_gene| {
                    let count = self.accumulate_one_gene(
                        family,
                        everyone,
                        one_gene,
                        have_trait,
                        &mut partial,
                        &mut world,
                    );
                    (partial, world, evaluated + count)
                },
            )
            .map(|(partial, _, evaluated)| (partial, evaluated))
            .reduce(
                || (Accumulator::new(n), 0),
                |(left, a), (right, b)| (left.merge(right), a + b),
            )
    }
}
