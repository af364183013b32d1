use itertools::Itertools;
use varisat::{Lit, Var};

/// At least one of `lits` is true; `A + B + C + ...`
pub(crate) fn at_least_one(lits: &[Lit]) -> Vec<Lit> {
    lits.to_vec()
}

/// No two of `lits` are true; `(!A + !B) * (!A + !C) * ...`
pub(crate) fn at_most_one_pairwise(lits: &[Lit]) -> Vec<Vec<Lit>> {
    lits.iter()
        .tuple_combinations()
        .map(|(a, b)| vec![!*a, !*b])
        .collect_vec()
}

/// No two of `lits` are true, via a sequential counter over `aux`.
///
/// `aux[i]` reads "some literal among the first `i + 1` is true"; `aux` must hold `lits.len() - 1` fresh variables.
/// This uses `3n - 4` clauses instead of the `n(n - 1) / 2` of [`at_most_one_pairwise`].
pub(crate) fn at_most_one_sequential(lits: &[Lit], aux: &[Var]) -> Vec<Vec<Lit>> {
    debug_assert_eq!(aux.len() + 1, lits.len().max(1));
    if lits.len() < 2 {
        return Vec::new();
    }

    let last = lits.len() - 1;
    let mut clauses = Vec::with_capacity(3 * lits.len());

    // x_0 => s_0
    clauses.push(vec![!lits[0], aux[0].positive()]);
    for i in 1..last {
        // x_i => s_i
        clauses.push(vec![!lits[i], aux[i].positive()]);
        // s_(i-1) => s_i
        clauses.push(vec![aux[i - 1].negative(), aux[i].positive()]);
        // s_(i-1) => !x_i
        clauses.push(vec![aux[i - 1].negative(), !lits[i]]);
    }
    // s_(n-2) => !x_(n-1)
    clauses.push(vec![aux[last - 1].negative(), !lits[last]]);

    clauses
}

/// Exactly `n` of `lits` are true.
///
/// "At least n": every choice of `len - n + 1` literals contains a true one.
/// "At most n": every choice of `n + 1` literals contains a false one.
/// If `n` exceeds the number of literals the result is the empty clause, which no assignment satisfies.
pub(crate) fn exactly(n: usize, lits: &[Lit]) -> Vec<Vec<Lit>> {
    if n > lits.len() {
        return vec![Vec::new()];
    }

    let mut clauses = Vec::new();
    if n > 0 {
        clauses.extend(lits.iter()
            .copied()
            .combinations(lits.len() - n + 1)
            .map(|selection| at_least_one(&selection)));
    }
    if n < lits.len() {
        clauses.extend(lits.iter()
            .combinations(n + 1)
            .map(|selection| selection.into_iter().map(|lit| !*lit).collect_vec()));
    }

    clauses
}
