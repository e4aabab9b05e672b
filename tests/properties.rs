use std::collections::HashMap;

use assoc_array::{AssociativeArray, KeyNotFound, DEFAULT_CAPACITY};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(u8, u16),
    Remove(u8)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Set(k, v)),
        any::<u8>().prop_map(Op::Remove)
    ]
}

fn apply(ops: &[Op]) -> (AssociativeArray<u8, u16>, HashMap<u8, u16>) {
    let mut arr = AssociativeArray::new();
    let mut model = HashMap::new();
    for op in ops {
        match *op {
            Op::Set(k, v) => assert_eq!(arr.set(k, v), model.insert(k, v)),
            Op::Remove(k) => assert_eq!(arr.remove(&k), model.remove(&k))
        }
    }
    (arr, model)
}

proptest! {
    // Any mix of sets and removes agrees with a HashMap
    #[test]
    fn matches_hash_map(ops in prop::collection::vec(op(), 0..200)) {
        let (arr, model) = apply(&ops);

        prop_assert_eq!(arr.size(), model.len());
        for k in 0..=u8::MAX {
            prop_assert_eq!(arr.has_key(&k), model.contains_key(&k));
            prop_assert_eq!(arr.get(&k).ok(), model.get(&k));
        }
        prop_assert_eq!(arr.iter().map(|(k, v)| (*k, *v)).collect::<HashMap<_, _>>(), model);
    }

    // Distinct keys past the initial capacity all survive growth
    #[test]
    fn growth_keeps_everything(n in DEFAULT_CAPACITY..200usize) {
        let mut arr = AssociativeArray::new();
        for i in 0..n {
            arr.set(i, i.to_string());
        }
        prop_assert_eq!(arr.size(), n);
        prop_assert!(arr.capacity() >= n);
        for i in 0..n {
            prop_assert_eq!(arr.get(&i), Ok(&i.to_string()));
        }
    }

    // Removing an absent key changes nothing
    #[test]
    fn remove_absent_is_noop(ops in prop::collection::vec(op(), 0..100), k in any::<u8>()) {
        let (mut arr, _) = apply(&ops);
        prop_assume!(!arr.has_key(&k));
        let before = arr.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();

        prop_assert_eq!(arr.remove(&k), None);
        prop_assert_eq!(arr.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), before);
        prop_assert_eq!(arr.get(&k), Err(KeyNotFound));
    }

    // Removing a present key drops exactly that key
    #[test]
    fn remove_present(ops in prop::collection::vec(op(), 1..100), pick in any::<prop::sample::Index>()) {
        let (mut arr, mut model) = apply(&ops);
        prop_assume!(!arr.is_empty());
        let k = *arr.keys().nth(pick.index(arr.size())).unwrap();
        let size = arr.size();

        prop_assert_eq!(arr.remove(&k), model.remove(&k));
        prop_assert_eq!(arr.size(), size - 1);
        prop_assert!(!arr.has_key(&k));
        for (k, v) in model.iter() {
            prop_assert_eq!(arr.get(k), Ok(v));
        }
    }

    // A clone has the same pairs in the same slots and mutating it leaves the source alone
    #[test]
    fn clone_is_independent(ops in prop::collection::vec(op(), 0..100), more in prop::collection::vec(op(), 1..50)) {
        let (arr, model) = apply(&ops);
        let mut cloned = arr.clone();
        prop_assert_eq!(cloned.iter().collect::<Vec<_>>(), arr.iter().collect::<Vec<_>>());

        for op in more {
            match op {
                Op::Set(k, v) => {cloned.set(k, v);},
                Op::Remove(k) => {cloned.remove(&k);}
            }
        }
        prop_assert_eq!(arr.size(), model.len());
        for (k, v) in model.iter() {
            prop_assert_eq!(arr.get(k), Ok(v));
        }
    }

    #[test]
    fn display_single_pair(k in "[a-z]{1,8}", v in any::<i64>()) {
        let mut arr = AssociativeArray::new();
        arr.set(k.clone(), v);
        prop_assert_eq!(arr.to_string(), format!("{{ {k}: {v} }}"));
    }
}
