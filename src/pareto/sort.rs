use crate::error::{Result, SelectionError};
use crate::individual::Individual;

/// Result of non-dominated sorting.
///
/// `ranks[i]` is the Pareto rank of the individual at index `i`, starting at
/// 1 for the non-dominated front. `fronts[r - 1]` lists the indices of rank
/// `r` in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fronts {
    ranks: Vec<usize>,
    fronts: Vec<Vec<usize>>,
}

impl Fronts {
    /// Pareto rank of every individual, index-aligned with the sorted input.
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn rank_of(&self, index: usize) -> usize {
        self.ranks[index]
    }

    /// Indices grouped by front, best front first.
    pub fn fronts(&self) -> &[Vec<usize>] {
        &self.fronts
    }

    /// Number of fronts.
    pub fn len(&self) -> usize {
        self.fronts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fronts.is_empty()
    }

    /// All indices ordered by ascending rank, stable within a front.
    pub fn front_order(&self) -> Vec<usize> {
        self.fronts.iter().flatten().copied().collect()
    }
}

/// Fast non-dominated sorting.
///
/// Every pair is tested once in each direction through
/// [`Individual::dominates`]. Individuals dominated by nobody form front 1;
/// removing a front decrements the domination counts of everything it
/// dominates, and the individuals reaching zero form the next front.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of individuals.
///
/// # Errors
///
/// Returns `SelectionError::Other` if the dominance relation contains a
/// cycle, in which case some individuals can never be peeled into a front.
///
/// # Example
///
/// ```
/// use paretosel::individual::Individual;
/// use paretosel::pareto::non_dominated_sort;
///
/// #[derive(Clone, Debug)]
/// struct P(Vec<f64>);
///
/// impl Individual for P {
///     fn objectives(&self) -> &[f64] {
///         &self.0
///     }
/// }
///
/// let population = vec![
///     P(vec![1.0, 5.0]),
///     P(vec![3.0, 3.0]),
///     P(vec![5.0, 1.0]),
///     P(vec![4.0, 4.0]), // dominated by (3, 3)
/// ];
///
/// let fronts = non_dominated_sort(&population).unwrap();
/// assert_eq!(fronts.ranks(), &[1, 1, 1, 2]);
/// assert_eq!(fronts.fronts()[1], vec![3]);
/// ```
pub fn non_dominated_sort<I: Individual>(individuals: &[I]) -> Result<Fronts> {
    let n = individuals.len();
    let mut domination_count = vec![0usize; n];
    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];

    for p in 0..n {
        for q in (p + 1)..n {
            if individuals[p].dominates(&individuals[q]) {
                dominated[p].push(q);
                domination_count[q] += 1;
            } else if individuals[q].dominates(&individuals[p]) {
                dominated[q].push(p);
                domination_count[p] += 1;
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&p| domination_count[p] == 0).collect();
    let mut assigned = 0;

    while !current.is_empty() {
        let rank = fronts.len() + 1;
        let mut next = Vec::new();
        for &p in &current {
            ranks[p] = rank;
            for &q in &dominated[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next.push(q);
                }
            }
        }
        next.sort_unstable();
        assigned += current.len();
        fronts.push(current);
        current = next;
    }

    if assigned != n {
        return Err(SelectionError::Other(format!(
            "Dominance relation is cyclic: {} of {} individuals could not be ranked",
            n - assigned,
            n
        )));
    }

    Ok(Fronts { ranks, fronts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::individual::testing::{points, Point};

    #[test]
    fn test_empty_input() {
        let fronts = non_dominated_sort::<Point>(&[]).unwrap();
        assert!(fronts.is_empty());
        assert!(fronts.ranks().is_empty());
    }

    #[test]
    fn test_single_individual() {
        let fronts = non_dominated_sort(&points(&[[1.0, 2.0]])).unwrap();
        assert_eq!(fronts.ranks(), &[1]);
        assert_eq!(fronts.fronts(), &[vec![0]]);
    }

    #[test]
    fn test_chain_of_dominance() {
        let pop = points(&[[3.0, 3.0], [1.0, 1.0], [2.0, 2.0]]);
        let fronts = non_dominated_sort(&pop).unwrap();
        assert_eq!(fronts.ranks(), &[3, 1, 2]);
        assert_eq!(fronts.len(), 3);
        assert_eq!(fronts.front_order(), vec![1, 2, 0]);
    }

    #[test]
    fn test_mutually_non_dominated() {
        let pop = points(&[[1.0, 4.0], [2.0, 3.0], [3.0, 2.0], [4.0, 1.0]]);
        let fronts = non_dominated_sort(&pop).unwrap();
        assert!(fronts.ranks().iter().all(|&r| r == 1));
        assert_eq!(fronts.fronts(), &[vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_mixed_fronts_keep_index_order() {
        let pop = points(&[
            [6.0, 6.0], // dominated by (4, 4)
            [1.0, 5.0],
            [4.0, 4.0], // dominated by (3, 3)
            [3.0, 3.0],
            [5.0, 1.0],
        ]);
        let fronts = non_dominated_sort(&pop).unwrap();
        assert_eq!(fronts.fronts(), &[vec![1, 3, 4], vec![2], vec![0]]);
        assert_eq!(fronts.rank_of(0), 3);
    }

    #[test]
    fn test_identical_individuals_share_front() {
        let pop = points(&[[2.0, 2.0], [2.0, 2.0], [2.0, 2.0]]);
        let fronts = non_dominated_sort(&pop).unwrap();
        assert_eq!(fronts.len(), 1);
        assert_eq!(fronts.fronts()[0].len(), 3);
    }

    #[test]
    fn test_front_one_is_zero_incoming_dominance() {
        let pop = points(&[
            [0.2, 0.9],
            [0.5, 0.5],
            [0.6, 0.6],
            [0.9, 0.1],
            [0.3, 0.95],
            [0.7, 0.2],
            [1.0, 1.0],
        ]);
        let fronts = non_dominated_sort(&pop).unwrap();

        let total: usize = fronts.fronts().iter().map(Vec::len).sum();
        assert_eq!(total, pop.len());

        for (i, p) in pop.iter().enumerate() {
            let undominated = pop.iter().all(|q| !q.dominates(p));
            assert_eq!(fronts.rank_of(i) == 1, undominated, "individual {}", i);
        }

        // Every member of front r > 1 is dominated by someone in front r - 1.
        for r in 1..fronts.len() {
            for &i in &fronts.fronts()[r] {
                assert!(fronts.fronts()[r - 1]
                    .iter()
                    .any(|&j| pop[j].dominates(&pop[i])));
            }
        }
    }

    #[derive(Clone, Debug)]
    struct Cyclic(usize);

    impl Individual for Cyclic {
        fn objectives(&self) -> &[f64] {
            &[]
        }

        fn dominates(&self, other: &Self) -> bool {
            (self.0 + 1) % 3 == other.0
        }
    }

    #[test]
    fn test_cyclic_oracle_is_reported() {
        let pop = vec![Cyclic(0), Cyclic(1), Cyclic(2)];
        assert!(matches!(
            non_dominated_sort(&pop),
            Err(SelectionError::Other(_))
        ));
    }
}
