use crate::dsl::Expr;
use crate::variable::VariableKey;

#[derive(Clone, Debug)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Rules(Vec::new())
    }
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Adds `premise -> consequence` at full weight.
    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) {
        self.push(Rule::new(premise).then(consequence, 1.));
    }

    pub fn push(&mut self, rule: Rule<T>) {
        self.0.push(rule);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.0.iter()
    }
}

/// An antecedent expression paired with weighted consequent terms.
///
/// A consequence is a single `Is` or an `And` of them; each term it names
/// receives the rule's firing strength scaled by the weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: Vec<(Expr<T>, f64)>,
}

impl<T> Rule<T> {
    pub fn new(premise: Expr<T>) -> Self {
        Self {
            premise,
            consequence: Vec::new(),
        }
    }

    pub fn then(mut self, consequence: Expr<T>, weight: f64) -> Self {
        self.consequence.push((consequence, weight));
        self
    }

    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    /// `(variable, term, weight)` for each consequent term, in order.
    pub fn targets(&self) -> impl Iterator<Item = (VariableKey, &T, f64)> {
        self.consequence.iter().flat_map(|(expr, weight)| {
            expr.propositions()
                .into_iter()
                .map(move |(var_key, term)| (*var_key, term, *weight))
        })
    }
}

#[test]
fn test_targets() {
    use slotmap::SlotMap;

    let mut keys = SlotMap::<VariableKey, ()>::with_key();
    let (x, z, w) = (keys.insert(()), keys.insert(()), keys.insert(()));

    let rule = Rule::new(Expr::Is(x, "low"))
        .then(Expr::Is(z, "high"), 1.)
        .then(Expr::Is(z, "mid").and(Expr::Is(w, "low")), 0.5);

    assert_eq!(
        rule.targets().collect::<Vec<_>>(),
        vec![(z, &"high", 1.), (z, &"mid", 0.5), (w, &"low", 0.5)]
    );

    let mut rules = Rules::new();
    rules.push(rule);
    rules.add(Expr::Is(x, "high"), Expr::Is(z, "low"));

    assert_eq!(rules.len(), 2);
    assert_eq!(rules.iter().nth(1).unwrap().targets().count(), 1);
}
