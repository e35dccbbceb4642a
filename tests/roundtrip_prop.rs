//! Property tests for the catalog state machine and its file format.

use std::collections::{HashMap, VecDeque};

use proptest::prelude::*;
use shelf_lib::{BorrowOutcome, Catalog, ReturnOutcome, ShelfError, Status, persist};

const KEYS: [&str; 3] = ["B1", "B2", "B3"];
const PEOPLE: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Borrow(usize, usize),
    Return(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..KEYS.len()).prop_map(Op::Add),
        (0..KEYS.len(), 0..PEOPLE.len()).prop_map(|(k, p)| Op::Borrow(k, p)),
        (0..KEYS.len()).prop_map(Op::Return),
    ]
}

/// Reference model: key -> (holder, queue).
type Model = HashMap<&'static str, (Option<&'static str>, VecDeque<&'static str>)>;

fn apply(catalog: &mut Catalog, model: &mut Model, op: &Op) {
    match *op {
        Op::Add(k) => {
            let key = KEYS[k];
            let result = catalog.add_book(key, "Author");
            if model.contains_key(key) {
                assert!(matches!(result, Err(ShelfError::DuplicateKey { .. })));
            } else {
                result.unwrap();
                model.insert(key, (None, VecDeque::new()));
            }
        }
        Op::Borrow(k, p) => {
            let (key, who) = (KEYS[k], PEOPLE[p]);
            let result = catalog.borrow(key, who);
            match model.get_mut(key) {
                None => assert!(matches!(result, Err(ShelfError::NotFound { .. }))),
                Some((holder @ None, _)) => {
                    assert!(matches!(result, Ok(BorrowOutcome::Borrowed { .. })));
                    *holder = Some(who);
                }
                Some((Some(current), _)) if *current == who => {
                    assert!(matches!(result, Err(ShelfError::AlreadyBorrowed { .. })));
                }
                Some((Some(_), queue)) if queue.contains(&who) => {
                    assert!(matches!(result, Err(ShelfError::AlreadyWaitlisted { .. })));
                }
                Some((Some(_), queue)) => {
                    queue.push_back(who);
                    assert_eq!(
                        result.unwrap(),
                        BorrowOutcome::Waitlisted {
                            key: key.to_string(),
                            requester: who.to_string(),
                            position: queue.len(),
                        }
                    );
                }
            }
        }
        Op::Return(k) => {
            let key = KEYS[k];
            let result = catalog.return_book(key);
            match model.get_mut(key) {
                None => assert!(matches!(result, Err(ShelfError::NotFound { .. }))),
                Some((None, _)) => {
                    assert!(matches!(result, Err(ShelfError::NotBorrowed { .. })));
                }
                Some((holder, queue)) => match queue.pop_front() {
                    Some(next) => {
                        match result.unwrap() {
                            ReturnOutcome::HandedOver { next: got, remaining, .. } => {
                                assert_eq!(got, next);
                                assert_eq!(remaining, queue.len());
                            }
                            other => panic!("expected hand-over, got {other:?}"),
                        }
                        *holder = Some(next);
                    }
                    None => {
                        assert!(matches!(result, Ok(ReturnOutcome::Returned { .. })));
                        *holder = None;
                    }
                },
            }
        }
    }
}

proptest! {
    #[test]
    fn catalog_matches_fifo_model(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut catalog = Catalog::new();
        let mut model = Model::new();
        for op in &ops {
            apply(&mut catalog, &mut model, op);
        }

        prop_assert_eq!(catalog.len(), model.len());
        for (key, (holder, queue)) in &model {
            let book = catalog.get_book(key).unwrap();
            prop_assert_eq!(book.borrower.as_deref(), *holder);
            prop_assert_eq!(book.status == Status::Borrowed, holder.is_some());
            let waitlist: Vec<&str> = book.waitlist.iter().map(String::as_str).collect();
            let expected: Vec<&str> = queue.iter().copied().collect();
            prop_assert_eq!(waitlist, expected);
        }
    }

    #[test]
    fn save_is_a_fixpoint(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut catalog = Catalog::new();
        let mut model = Model::new();
        for op in &ops {
            apply(&mut catalog, &mut model, op);
        }

        let saved = catalog.to_document().unwrap();
        let reloaded = Catalog::from_books(persist::from_document(&saved).unwrap()).unwrap();
        prop_assert_eq!(reloaded.to_document().unwrap(), saved);
    }
}

#[test]
fn save_load_save_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");

    let mut catalog = Catalog::new();
    catalog.add_book("B1", "Author").unwrap();
    catalog.add_book("B2", "Author").unwrap();
    catalog.borrow("B1", "Alice").unwrap();
    catalog.borrow("B1", "Bob").unwrap();
    catalog.save_to(&path).unwrap();
    let first = std::fs::read_to_string(&path).unwrap();

    Catalog::open(&path).unwrap().save().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
}
