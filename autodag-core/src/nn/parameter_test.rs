use super::*;
use std::collections::HashSet;

#[test]
fn test_identity_is_the_allocation() {
    let a = Parameter::scalar("a", 1.0);
    let a_clone = a.clone();
    let other_a = Parameter::scalar("a", 1.0);

    assert_eq!(a, a_clone);
    assert_ne!(a, other_a, "same name must not imply same parameter");

    let set: HashSet<Parameter> = [a.clone(), a_clone, other_a].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_shared_mutation_is_visible_through_clones() {
    let w = Parameter::new("w", vec![1.0, 2.0]);
    let held_by_node = w.clone();
    w.apply_delta(&[0.5, -1.0]).unwrap();
    assert_eq!(held_by_node.value(), vec![1.5, 1.0]);
}

#[test]
fn test_length_is_fixed() {
    let w = Parameter::new("w", vec![1.0, 2.0]);
    match w.set_value(vec![1.0]).unwrap_err() {
        AutodagError::ParameterShape { name, expected, actual } => {
            assert_eq!(name, "w");
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        e => panic!("Expected ParameterShape, got {:?}", e),
    }
    assert!(w.set_element(2, 0.0).is_err());
    w.set_element(1, 9.0).unwrap();
    assert_eq!(w.get(1), Some(9.0));
}

#[test]
fn test_scalar_accessors() {
    let a = Parameter::scalar("a", -0.25);
    assert!(a.is_scalar());
    assert_eq!(a.len(), 1);
    assert_eq!(a.scalar_value(), -0.25);
    assert_eq!(a.name(), "a");
}

#[test]
fn test_empty_value() {
    match Parameter::try_new("w", Vec::new()).unwrap_err() {
        AutodagError::ParameterShape { name, expected, actual } => {
            assert_eq!(name, "w");
            assert_eq!(expected, 1);
            assert_eq!(actual, 0);
        }
        e => panic!("Expected ParameterShape, got {:?}", e),
    }
    assert_eq!(Parameter::try_new("w", vec![2.0]).unwrap().value(), vec![2.0]);
    assert_eq!(Parameter::new("w", Vec::new()).value(), vec![0.0]);
}
