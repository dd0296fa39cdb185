//! In-memory join and group-count over the creator and work collections.
//!
//! The store has no join operator, so both collections are loaded once and
//! works are indexed by creator id before counting. Counts are always
//! derived here at read time; no stored field is ever trusted for them.

use std::collections::HashMap;

use crate::graphql::Creator;
use crate::store::CreatorRecord;
use crate::store::WorkRecord;

/// One record per creator, zero-work creators included with a count of 0.
pub fn creators_with_counts(creators: Vec<CreatorRecord>, works: &[WorkRecord]) -> Vec<Creator> {
    let mut counts: HashMap<&str, i32> = HashMap::new();
    for work in works {
        *counts.entry(work.creator_id.as_str()).or_insert(0) += 1;
    }
    creators
        .into_iter()
        .map(|creator| Creator {
            book_count: counts.get(creator.id.as_str()).copied().unwrap_or(0),
            name: creator.name,
            born: creator.born,
        })
        .collect()
}

/// Same counting rule as [`creators_with_counts`], for a single creator.
pub fn work_count_for(works: &[WorkRecord], creator_id: &str) -> i32 {
    works
        .iter()
        .filter(|work| work.creator_id == creator_id)
        .count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(id: &str, name: &str, born: Option<i32>) -> CreatorRecord {
        CreatorRecord {
            id: id.into(),
            name: name.into(),
            born,
        }
    }

    fn work(title: &str, creator_id: &str) -> WorkRecord {
        WorkRecord {
            id: format!("work-{title}"),
            title: title.into(),
            published: 1990,
            genres: vec!["fantasy".into()],
            creator_id: creator_id.into(),
        }
    }

    #[test]
    fn counts_group_works_by_creator_reference() {
        let creators = vec![
            creator("c1", "Rowling", None),
            creator("c2", "Tolkien", Some(1892)),
        ];
        let works = vec![
            work("HP", "c1"),
            work("LOTR", "c2"),
            work("Silmarillion", "c2"),
        ];
        let counted = creators_with_counts(creators, &works);
        assert_eq!(
            counted,
            vec![
                Creator {
                    name: "Rowling".into(),
                    born: None,
                    book_count: 1,
                },
                Creator {
                    name: "Tolkien".into(),
                    born: Some(1892),
                    book_count: 2,
                },
            ]
        );
    }

    #[test]
    fn zero_work_creators_appear_with_count_zero() {
        let creators = vec![creator("c1", "Pratchett", None)];
        let counted = creators_with_counts(creators, &[]);
        assert_eq!(counted.len(), 1);
        assert_eq!(counted[0].book_count, 0);
    }

    #[test]
    fn single_creator_count_uses_the_same_rule() {
        let works = vec![work("HP", "c1"), work("LOTR", "c2"), work("Chamber", "c1")];
        assert_eq!(work_count_for(&works, "c1"), 2);
        assert_eq!(work_count_for(&works, "c3"), 0);
    }
}
