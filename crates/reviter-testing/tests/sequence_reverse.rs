use reviter_testing::*;

#[test]
fn test_values_reverse() {
    let vec = strings(&["A", "B", "C"]);
    let iter = reviter::reverse(&sequence::values(&vec).unwrap()).unwrap();

    assert_eq!(
        steps::<String>(&iter, 5).unwrap(),
        vec![Some("C".into()), Some("B".into()), Some("A".into()), None, None]
    );
}

#[test]
fn test_entries_reverse() {
    let vec = strings(&["A", "B", "C"]);
    let iter = reviter::reverse(&sequence::entries(&vec).unwrap()).unwrap();

    assert_eq!(
        steps::<(i64, String)>(&iter, 5).unwrap(),
        vec![
            Some((2, "C".into())),
            Some((1, "B".into())),
            Some((0, "A".into())),
            None,
            None
        ]
    );
}

#[test]
fn test_keys_rev() {
    let vec = strings(&["A", "B", "C"]);
    let iter = sequence::keys_rev(&vec).unwrap();
    assert_eq!(collect::<i64>(&iter).unwrap(), vec![2, 1, 0]);
}

#[test]
fn test_collection_reverse_is_fresh() {
    let vec = strings(&["A", "B"]);

    let a = reviter::reverse(&vec).unwrap();
    let b = reviter::reverse(&vec).unwrap();

    reviter::advance(&a).unwrap();
    assert_eq!(collect::<String>(&b).unwrap(), vec!["B", "A"]);
    assert_eq!(collect::<String>(&a).unwrap(), vec!["A"]);
}

#[test]
fn test_double_reversal_round_trips() {
    let vec = strings(&["A", "B", "C"]);
    let iter = sequence::values(&vec).unwrap();

    let back = reviter::reverse(&reviter::reverse(&iter).unwrap()).unwrap();
    assert_eq!(collect::<String>(&back).unwrap(), vec!["A", "B", "C"]);

    // NB: the original iterator is untouched by reversal.
    assert_eq!(collect::<String>(&iter).unwrap(), vec!["A", "B", "C"]);
}

#[test]
fn test_triple_reversal() {
    let vec = strings(&["A", "B", "C"]);
    let mut iter = sequence::values(&vec).unwrap();

    for _ in 0..3 {
        iter = reviter::reverse(&iter).unwrap();
    }

    assert_eq!(collect::<String>(&iter).unwrap(), vec!["C", "B", "A"]);
}

#[test]
fn test_reversal_after_advance() {
    let vec = strings(&["A", "B", "C"]);

    let iter = sequence::values(&vec).unwrap();
    reviter::advance(&iter).unwrap();

    assert_vm_error!(
        reviter::reverse(&iter),
        IllegalReversal { iterator } => assert_eq!(*iterator, "SequenceIter")
    );

    let iter = sequence::values_rev(&vec).unwrap();
    reviter::advance(&iter).unwrap();

    assert_vm_error!(
        reviter::reverse(&iter),
        IllegalReversal { iterator } => assert_eq!(*iterator, "SequenceRevIter")
    );

    // NB: a failed reversal leaves the iterator usable.
    assert_eq!(collect::<String>(&iter).unwrap(), vec!["B", "A"]);
}

#[test]
fn test_reversal_after_exhaustion() {
    let vec = strings(&[]);
    let iter = sequence::values(&vec).unwrap();

    assert!(reviter::advance(&iter).unwrap().is_done());
    assert!(reviter::advance(&iter).unwrap().is_done());
    assert_vm_error!(reviter::reverse(&iter), IllegalReversal { .. } => ());
}

#[test]
fn test_empty_sequence() {
    let vec = strings(&[]);

    let iter = reviter::reverse(&sequence::values(&vec).unwrap()).unwrap();
    assert_eq!(steps::<String>(&iter, 2).unwrap(), vec![None, None]);
}

#[test]
fn test_growing_sequence() {
    let vec = strings(&["A"]);
    let iter = sequence::values(&vec).unwrap();

    assert_eq!(steps::<String>(&iter, 1).unwrap(), vec![Some("A".into())]);

    vec.clone()
        .into_vec()
        .unwrap()
        .borrow_mut()
        .unwrap()
        .push(Value::from("B"));

    assert_eq!(
        steps::<String>(&iter, 2).unwrap(),
        vec![Some("B".into()), None]
    );
}

#[test]
fn test_shrinking_sequence() {
    let vec = strings(&["A", "B", "C"]);
    let forward = sequence::values(&vec).unwrap();
    let backward = sequence::values_rev(&vec).unwrap();

    vec.clone().into_vec().unwrap().borrow_mut().unwrap().truncate(1);

    assert_eq!(
        steps::<String>(&forward, 2).unwrap(),
        vec![Some("A".into()), None]
    );

    // NB: positions past the end of the shrunk sequence read as unit.
    let out = steps::<Value>(&backward, 4).unwrap();
    assert!(matches!(out[0], Some(Value::Unit)));
    assert!(matches!(out[1], Some(Value::Unit)));
    assert!(out[3].is_none());

    let last = out.into_iter().nth(2).unwrap().unwrap();
    assert_eq!(String::from_value(last).unwrap(), "A");
}

#[test]
fn test_array_like_object() {
    let object: Value =
        serde_json::from_str(r#"{"length": 3, "0": "A", "1": "B", "2": "C"}"#).unwrap();

    let iter = reviter::reverse(&sequence::entries(&object).unwrap()).unwrap();

    assert_eq!(
        collect::<(i64, String)>(&iter).unwrap(),
        vec![(2, "C".into()), (1, "B".into()), (0, "A".into())]
    );
}

#[test]
fn test_not_a_sequence() {
    assert_vm_error!(
        sequence::values(&Value::from(1)),
        Expected { expected, .. } => assert_eq!(*expected, "sequence")
    );

    let object: Value = serde_json::from_str(r#"{"length": "three"}"#).unwrap();
    let iter = sequence::values(&object).unwrap();

    assert_vm_error!(
        reviter::advance(&iter),
        Expected { expected, .. } => assert_eq!(*expected, "integer")
    );
}
