use std::ops::Not;

use crate::variable::{Variable, VariableKey};

/// Rule expression tree over variable terms.
///
/// `And` and `Or` are n-ary so chains like `a.and2(b, c)` stay flat.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
    Not(Box<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        Expr::Or(vec![self, rhs])
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        Expr::And(vec![self, rhs])
    }

    pub fn and2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        Expr::And(vec![self, rhs, rhs2])
    }

    pub fn all(exprs: impl IntoIterator<Item = Expr<T>>) -> Self {
        Expr::And(exprs.into_iter().collect())
    }

    pub fn any(exprs: impl IntoIterator<Item = Expr<T>>) -> Self {
        Expr::Or(exprs.into_iter().collect())
    }

    /// Every `Is` leaf, left to right.
    pub fn propositions(&self) -> Vec<(&VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(&'p VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((var_key, term)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }
}

impl<T> Not for Expr<T> {
    type Output = Expr<T>;

    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self))
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}

#[test]
fn test_propositions() {
    use slotmap::SlotMap;

    let mut keys = SlotMap::<VariableKey, ()>::with_key();
    let (x, y, z) = (keys.insert(()), keys.insert(()), keys.insert(()));

    let expr = Expr::Is(x, "low")
        .and(!Expr::Is(y, "high"))
        .or(Expr::all([Expr::Is(z, "mid")]));

    assert_eq!(expr.propositions(), vec![(&x, &"low"), (&y, &"high"), (&z, &"mid")]);
    assert!(matches!(expr, Expr::Or(ref children) if children.len() == 2));
}
