// person.rs - Person records and validated family structure

use crate::error::{HeredityError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single family member as read from the record file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub mother: Option<String>,
    pub father: Option<String>,
    /// Observed trait: `Some(true)`, `Some(false)` or unknown
    pub observed_trait: Option<bool>,
}

impl Person {
    /// Create a founder (no parents on record)
    pub fn founder(name: &str, observed_trait: Option<bool>) -> Self {
        Self {
            name: name.to_string(),
            mother: None,
            father: None,
            observed_trait,
        }
    }

    /// Create a child of `mother` and `father`
    pub fn child(name: &str, mother: &str, father: &str, observed_trait: Option<bool>) -> Self {
        Self {
            name: name.to_string(),
            mother: Some(mother.to_string()),
            father: Some(father.to_string()),
            observed_trait,
        }
    }

    pub fn has_parents(&self) -> bool {
        self.mother.is_some() && self.father.is_some()
    }
}

/// Resolved parent indices into the family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parents {
    pub mother: usize,
    pub father: usize,
}

/// Validated family: persons sorted by name, parents resolved to indices.
///
/// Every person has zero or two parents, every referenced parent exists,
/// and parentage is acyclic.
#[derive(Debug, Clone)]
pub struct Family {
    persons: Vec<Person>,
    index: HashMap<String, usize>,
    parents: Vec<Option<Parents>>,
    generations: Vec<usize>,
}

impl Family {
    /// Validate records and build the family
    pub fn new(mut records: Vec<Person>) -> Result<Self> {
        if records.is_empty() {
            return Err(HeredityError::Input("family contains no persons".to_string()));
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));

        let mut index = HashMap::with_capacity(records.len());
        for (i, person) in records.iter().enumerate() {
            if person.name.trim().is_empty() {
                return Err(HeredityError::Input("person with empty name".to_string()));
            }
            if index.insert(person.name.clone(), i).is_some() {
                return Err(HeredityError::Input(format!(
                    "duplicate person '{}'",
                    person.name
                )));
            }
        }

        let mut parents = Vec::with_capacity(records.len());
        for person in &records {
            let resolved = match (&person.mother, &person.father) {
                (None, None) => None,
                (Some(mother), Some(father)) => {
                    let lookup = |parent: &str| {
                        if parent == person.name {
                            return Err(HeredityError::Input(format!(
                                "'{}' is listed as their own parent",
                                person.name
                            )));
                        }
                        index.get(parent).copied().ok_or_else(|| {
                            HeredityError::Input(format!(
                                "'{}' references unknown parent '{}'",
                                person.name, parent
                            ))
                        })
                    };
                    Some(Parents {
                        mother: lookup(mother)?,
                        father: lookup(father)?,
                    })
                }
                _ => {
                    return Err(HeredityError::Input(format!(
                        "'{}' has only one parent on record (both or neither required)",
                        person.name
                    )))
                }
            };
            parents.push(resolved);
        }

        let generations = compute_generations(&records, &parents)?;

        Ok(Self {
            persons: records,
            index,
            parents,
            generations,
        })
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Persons in canonical (name) order
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn person(&self, idx: usize) -> &Person {
        &self.persons[idx]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Person> {
        self.index_of(name).map(|i| &self.persons[i])
    }

    pub fn parents_of(&self, idx: usize) -> Option<Parents> {
        self.parents[idx]
    }

    /// Generation depth: founders are 0, a child is one deeper than its deepest parent
    pub fn generation(&self, idx: usize) -> usize {
        self.generations[idx]
    }

    pub fn founders(&self) -> impl Iterator<Item = &Person> {
        self.persons.iter().filter(|p| !p.has_parents())
    }

    /// Number of persons with an observed trait
    pub fn observed_count(&self) -> usize {
        self.persons
            .iter()
            .filter(|p| p.observed_trait.is_some())
            .count()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.persons.iter().map(|p| p.name.as_str())
    }
}

/// Resolve generation depth for every person, rejecting cyclic parentage
fn compute_generations(persons: &[Person], parents: &[Option<Parents>]) -> Result<Vec<usize>> {
    let mut generations: Vec<Option<usize>> = parents
        .iter()
        .map(|p| if p.is_none() { Some(0) } else { None })
        .collect();

    // Each pass resolves at least one person unless a cycle blocks progress
    for _ in 0..persons.len() {
        let mut progressed = false;
        for i in 0..persons.len() {
            if generations[i].is_some() {
                continue;
            }
            if let Some(p) = parents[i] {
                if let (Some(gm), Some(gf)) = (generations[p.mother], generations[p.father]) {
                    generations[i] = Some(gm.max(gf) + 1);
                    progressed = true;
                }
            }
        }
        if !progressed {
            break;
        }
    }

    generations
        .into_iter()
        .enumerate()
        .map(|(i, g)| {
            g.ok_or_else(|| {
                HeredityError::Input(format!(
                    "cyclic parentage involving '{}'",
                    persons[i].name
                ))
            })
        })
        .collect()
}
