//! Combinatorial author/genre predicates over the work list.
//!
//! The author predicate matches against the *resolved* creator name, so a
//! name shared by several creators matches the works of all of them, and a
//! name matching no creator yields an empty list rather than an error.
//! Matching is exact and case-sensitive on both predicates.

use std::collections::HashMap;

use crate::store::CreatorRecord;
use crate::store::WorkRecord;

pub fn filter_works(
    works: Vec<WorkRecord>,
    creators: &[CreatorRecord],
    author: Option<&str>,
    genre: Option<&str>,
) -> Vec<WorkRecord> {
    match (author, genre) {
        (None, None) => works,
        (None, Some(genre)) => works
            .into_iter()
            .filter(|work| work.genres.iter().any(|g| g == genre))
            .collect(),
        (Some(author), None) => {
            let names: HashMap<&str, &str> = creators
                .iter()
                .map(|creator| (creator.id.as_str(), creator.name.as_str()))
                .collect();
            works
                .into_iter()
                .filter(|work| {
                    names
                        .get(work.creator_id.as_str())
                        .is_some_and(|name| *name == author)
                })
                .collect()
        }
        // Author first, then genre on the result. The two stages are kept
        // separate so each predicate stays testable on its own.
        (Some(author), Some(genre)) => {
            let by_author = filter_works(works, creators, Some(author), None);
            filter_works(by_author, creators, None, Some(genre))
        }
    }
}
