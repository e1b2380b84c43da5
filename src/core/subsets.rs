// subsets.rs - Power-set enumeration over person identities
//
// Enumeration cost is 2^n per call, and the engine nests it as
// trait-subsets x one-copy-subsets x two-copy-subsets-of-remainder, i.e.
// 2^n * 3^n worlds. Families beyond the low tens of persons are out of reach.

/// Largest set the bitmask representation can hold
pub const MAX_SET_SIZE: usize = 63;

/// Set of person indices packed into a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PersonSet(u64);

impl PersonSet {
    pub const EMPTY: PersonSet = PersonSet(0);

    /// Set containing indices `0..n`
    pub fn full(n: usize) -> Self {
        assert!(n <= MAX_SET_SIZE, "person set limited to {} members", MAX_SET_SIZE);
        PersonSet((1u64 << n) - 1)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, idx: usize) -> bool {
        idx < 64 && self.0 & (1u64 << idx) != 0
    }

    pub fn insert(&mut self, idx: usize) {
        assert!(idx < MAX_SET_SIZE, "person index {} out of range", idx);
        self.0 |= 1u64 << idx;
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn difference(self, other: PersonSet) -> PersonSet {
        PersonSet(self.0 & !other.0)
    }

    pub fn is_disjoint(self, other: PersonSet) -> bool {
        self.0 & other.0 == 0
    }

    /// Member indices in ascending order
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..64).filter(move |&i| self.contains(i))
    }

    /// Every subset of this set, itself and the empty set included
    pub fn subsets(self) -> Subsets {
        Subsets {
            mask: self.0,
            next: Some(self.0),
        }
    }
}

impl FromIterator<usize> for PersonSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = PersonSet::EMPTY;
        for idx in iter {
            set.insert(idx);
        }
        set
    }
}

/// Iterator over all submasks of a mask, from the full mask down to zero
#[derive(Debug, Clone)]
pub struct Subsets {
    mask: u64,
    next: Option<u64>,
}

impl Iterator for Subsets {
    type Item = PersonSet;

    fn next(&mut self) -> Option<PersonSet> {
        let current = self.next?;
        self.next = if current == 0 {
            None
        } else {
            Some((current - 1) & self.mask)
        };
        Some(PersonSet(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(_) if self.mask.count_ones() < usize::BITS => {
                let total = 1usize << self.mask.count_ones();
                (0, Some(total))
            }
            Some(_) => (0, None),
        }
    }
}
