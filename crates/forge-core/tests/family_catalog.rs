use forge_core::family::{self, FamilyCatalog, FamilyFactory};
use forge_core::{KitError, Product};

#[derive(Debug)]
struct Part {
    variant: String,
}

impl Product for Part {
    fn variant(&self) -> &str {
        &self.variant
    }
}

#[derive(Debug)]
struct Pair {
    left: Part,
    right: Part,
}

trait PairFactory: FamilyFactory<Family = Pair> {
    fn create_left(&self) -> Result<Part, KitError>;
    fn create_right(&self) -> Result<Part, KitError>;
}

struct Plain(&'static str);

impl FamilyFactory for Plain {
    type Family = Pair;
    fn variant(&self) -> &str { self.0 }
    fn members(&self) -> &'static [&'static str] { &["left", "right"] }
    fn create_family(&self) -> Result<Pair, KitError> {
        Ok(Pair { left: family::member(self.0, "left", self.create_left())?,
                  right: family::member(self.0, "right", self.create_right())? })
    }
}

impl PairFactory for Plain {
    fn create_left(&self) -> Result<Part, KitError> {
        Ok(Part { variant: self.0.to_string() })
    }
    fn create_right(&self) -> Result<Part, KitError> {
        Ok(Part { variant: self.0.to_string() })
    }
}

// Variante defectuosa: el miembro derecho sale de otra variante.
struct Leaky;

impl FamilyFactory for Leaky {
    type Family = Pair;
    fn variant(&self) -> &str { "leaky" }
    fn members(&self) -> &'static [&'static str] { &["left", "right"] }
    fn create_family(&self) -> Result<Pair, KitError> {
        Ok(Pair { left: family::member("leaky", "left", self.create_left())?,
                  right: family::member("leaky", "right", self.create_right())? })
    }
}

impl PairFactory for Leaky {
    fn create_left(&self) -> Result<Part, KitError> {
        Ok(Part { variant: "leaky".into() })
    }
    fn create_right(&self) -> Result<Part, KitError> {
        Ok(Part { variant: "other".into() })
    }
}

fn catalog() -> FamilyCatalog<dyn PairFactory> {
    let mut c: FamilyCatalog<dyn PairFactory> = FamilyCatalog::new();
    c.register("a", Box::new(Plain("a")))
     .register("b", Box::new(Plain("b")))
     .register("leaky", Box::new(Leaky));
    c
}

#[test]
fn every_member_shares_the_selected_variant() {
    let c = catalog();
    for v in ["a", "b"] {
        let pair = c.create_family(v).unwrap();
        assert_eq!(pair.left.variant(), v);
        assert_eq!(pair.right.variant(), v);
    }
}

#[test]
fn mixed_family_is_rejected_whole() {
    let err = catalog().create_family("leaky").unwrap_err();
    assert_eq!(err.failed_member(), Some("right"));
}

#[test]
fn unknown_variant_selection_fails() {
    assert_eq!(catalog().select("zzz").err(), Some(KitError::UnknownVariant("zzz".into())));
    assert_eq!(catalog().variants(), vec!["a", "b", "leaky"]);
}
