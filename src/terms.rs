use crate::membership::MembershipFunction;

/// Labelled membership functions to attach to a variable.
///
/// Labels are unique: inserting an existing label replaces its function.
/// Insertion order is kept.
#[derive(Clone, Debug)]
pub struct Terms<K>(pub(crate) Vec<(K, MembershipFunction)>);

impl<K> Default for Terms<K> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<K: PartialEq> Terms<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: MembershipFunction) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    /// Shorthand for inserting a [`MembershipFunction::Triangular`].
    pub fn trimf(&mut self, key: K, a: f64, b: f64, c: f64) {
        self.insert(key, MembershipFunction::triangular(a, b, c));
    }
}

impl<K> Terms<K> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[test]
fn test_insert_replaces() {
    let mut terms = Terms::new();

    terms.trimf("low", 0., 0., 5.);
    terms.trimf("high", 5., 10., 10.);
    terms.trimf("low", 0., 0., 4.);

    assert_eq!(terms.len(), 2);
    assert_eq!(terms.0[0], ("low", MembershipFunction::triangular(0., 0., 4.)));
    assert_eq!(terms.0[1].0, "high");
}
