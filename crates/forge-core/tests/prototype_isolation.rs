use std::collections::BTreeMap;

use forge_core::{KitError, Prototype, PrototypeRegistry};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Form {
    title: String,
    fields: BTreeMap<String, Vec<String>>,
}

impl Prototype for Form {}

fn template() -> Form {
    let mut fields = BTreeMap::new();
    fields.insert("colors".to_string(), vec!["red".to_string()]);
    Form { title: "base".into(), fields }
}

#[test]
fn mutating_a_clone_does_not_leak() {
    let reg = PrototypeRegistry::new();
    reg.register("form", template()).unwrap();

    let mut first = reg.clone_of("form").unwrap();
    first.title.push_str("-changed");
    first.fields.get_mut("colors").unwrap().push("blue".into());
    first.fields.insert("extra".into(), vec![]);

    let second = reg.clone_of("form").unwrap();
    assert_eq!(second, template());
    assert_ne!(first, second);
}

#[test]
fn re_register_does_not_touch_issued_clones() {
    let reg = PrototypeRegistry::new();
    reg.register("form", template()).unwrap();
    let issued = reg.clone_of("form").unwrap();

    let mut v2 = template();
    v2.title = "v2".into();
    reg.register("form", v2.clone()).unwrap();

    assert_eq!(issued, template());
    assert_eq!(reg.clone_of("form").unwrap(), v2);
}

#[test]
fn parallel_clones_are_independent() {
    let reg = PrototypeRegistry::new();
    reg.register("form", template()).unwrap();

    let clones: Vec<Form> = (0..64).into_par_iter()
                                   .map(|i| {
                                       let mut c = reg.clone_of("form").unwrap();
                                       c.fields.get_mut("colors").unwrap().push(format!("c{i}"));
                                       c
                                   })
                                   .collect();

    assert!(clones.iter().all(|c| c.fields["colors"].len() == 2));
    assert_eq!(reg.clone_of("form").unwrap(), template());
}

#[test]
fn unknown_then_registered() {
    let reg: PrototypeRegistry<Form> = PrototypeRegistry::default();
    assert_eq!(reg.clone_of("x"), Err(KitError::NotFound("x".into())));
    reg.register("x", template()).unwrap();
    assert_eq!(reg.clone_of("x").unwrap(), template());
}
