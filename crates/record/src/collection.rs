//! Deduplicating, insertion-ordered record container.

use crate::Listing;
use crate::record::Record;
use std::collections::{HashMap, HashSet};

/// Structural equality: every field matches. Backs [`RecordsCollection::add`],
/// [`RecordsCollection::contains`] and collection equality.
pub fn structural_eq<R: Record>(a: &R, b: &R) -> bool {
    a == b
}

/// The coarse canonical key. Backs [`RecordsCollection::difference`] only.
pub fn display_key<R: Record>(record: &R) -> String {
    record.display_key()
}

/// An ordered set of records.
///
/// No two elements are ever structurally equal; insertion order is kept.
/// Membership is a linear scan, which is fine for the tens to low hundreds of
/// listings a marketplace shows.
///
/// # Examples
///
/// ```
/// use rolba_record::{Listing, RecordsCollection};
///
/// let seen = RecordsCollection::new().with(Listing::new("LP1", 100.0, "u1"));
/// let crawled = RecordsCollection::new()
///     .with(Listing::new("LP1", 100.0, "u1"))
///     .with(Listing::new("LP2", 200.0, "u2"));
///
/// let new = crawled.difference(&seen);
/// assert_eq!(new, RecordsCollection::new().with(Listing::new("LP2", 200.0, "u2")));
/// ```
#[derive(Debug, Clone)]
pub struct RecordsCollection<R: Record = Listing> {
    records: Vec<R>,
}

impl<R: Record> RecordsCollection<R> {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Append `record` unless a structurally equal one is already present.
    pub fn add(&mut self, record: R) -> &mut Self {
        if !self.contains(&record) {
            self.records.push(record);
        }
        self
    }

    /// Consuming variant of [`add()`](Self::add) for builder-style
    /// construction.
    pub fn with(mut self, record: R) -> Self {
        self.add(record);
        self
    }

    pub fn contains(&self, record: &R) -> bool {
        self.records.iter().any(|r| structural_eq(r, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Records of `self` whose [display key](display_key) does not occur in
    /// `other`: "what is new since last time".
    ///
    /// This is *not* the structural relative complement. A record that only
    /// differs from something in `other` by a field missing from the display
    /// key (e.g. a listing's link) is not considered new. Records of `self`
    /// that share a display key collapse into one: the last one inserted,
    /// placed where the key was first seen.
    pub fn difference(&self, other: &Self) -> Self {
        let mut keyed: Vec<(String, &R)> = Vec::with_capacity(self.records.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(self.records.len());
        for record in &self.records {
            let key = display_key(record);
            match positions.get(&key) {
                Some(&index) => keyed[index].1 = record,
                None => {
                    positions.insert(key.clone(), keyed.len());
                    keyed.push((key, record));
                },
            }
        }
        let known: HashSet<String> = other.records.iter().map(display_key).collect();
        keyed
            .into_iter()
            .filter(|(key, _)| !known.contains(key))
            .map(|(_, record)| record.clone())
            .collect()
    }
}

impl<R: Record> Default for RecordsCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> PartialEq for RecordsCollection<R> {
    /// Order-independent. The length check must come first: with it, "every
    /// element of one is contained in the other" is enough because neither
    /// side holds duplicates.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.records.iter().all(|record| other.contains(record))
    }
}

impl<R: Record> FromIterator<R> for RecordsCollection<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<R: Record> Extend<R> for RecordsCollection<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}

impl<R: Record> IntoIterator for RecordsCollection<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, R: Record> IntoIterator for &'a RecordsCollection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
