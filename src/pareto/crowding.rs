use crate::evolution::options::CrowdingScale;
use crate::individual::Individual;

/// Crowding distance of every member of one front.
///
/// `front` holds indices into `individuals`; the returned distances are
/// aligned with `front`. For each objective the front is sorted ascending
/// (stably, carrying over the order of the previous axis), the two boundary
/// members get `f64::INFINITY` and every interior member adds the gap between
/// its two neighbours on that axis. A front of one member is all boundary.
///
/// With `CrowdingScale::Raw` gaps are summed as they are, so an objective
/// with a wider range dominates the score. `CrowdingScale::Normalized`
/// divides each gap by the axis range within the front; an axis on which the
/// whole front agrees contributes nothing.
///
/// # Example
///
/// ```
/// use paretosel::evolution::options::CrowdingScale;
/// use paretosel::individual::Individual;
/// use paretosel::pareto::crowding_distance;
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
/// let front = vec![P(vec![1.0, 5.0]), P(vec![3.0, 3.0]), P(vec![5.0, 1.0])];
/// let distances = crowding_distance(&front, &[0, 1, 2], CrowdingScale::Raw);
///
/// assert!(distances[0].is_infinite());
/// assert_eq!(distances[1], 8.0); // (5 - 1) + (5 - 1)
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance<I: Individual>(
    individuals: &[I],
    front: &[usize],
    scale: CrowdingScale,
) -> Vec<f64> {
    let size = front.len();
    if size <= 1 {
        return vec![f64::INFINITY; size];
    }

    let num_objectives = individuals[front[0]].objectives().len();
    let mut distances = vec![0.0f64; size];
    let mut order: Vec<usize> = (0..size).collect();

    for axis in 0..num_objectives {
        let value = |pos: usize| individuals[front[pos]].objectives()[axis];
        order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

        let first = order[0];
        let last = order[size - 1];
        distances[first] = f64::INFINITY;
        distances[last] = f64::INFINITY;

        let range = value(last) - value(first);
        for j in 1..(size - 1) {
            let gap = value(order[j + 1]) - value(order[j - 1]);
            distances[order[j]] += match scale {
                CrowdingScale::Raw => gap,
                CrowdingScale::Normalized if range > 0.0 => gap / range,
                CrowdingScale::Normalized => 0.0,
            };
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::individual::testing::{points, Point};

    fn all(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_empty_front() {
        let pop: Vec<Point> = Vec::new();
        assert!(crowding_distance(&pop, &[], CrowdingScale::Raw).is_empty());
    }

    #[test]
    fn test_single_member_is_infinite() {
        let pop = points(&[[1.0, 2.0]]);
        let d = crowding_distance(&pop, &[0], CrowdingScale::Raw);
        assert_eq!(d, vec![f64::INFINITY]);
    }

    #[test]
    fn test_two_members_are_boundaries() {
        let pop = points(&[[1.0, 3.0], [3.0, 1.0]]);
        let d = crowding_distance(&pop, &all(2), CrowdingScale::Raw);
        assert!(d.iter().all(|x| x.is_infinite()));
    }

    #[test]
    fn test_raw_gaps_are_not_normalized() {
        // Axis 1 spans 100 units, axis 0 spans 4.
        let pop = points(&[[0.0, 100.0], [1.0, 75.0], [2.0, 50.0], [3.0, 25.0], [4.0, 0.0]]);
        let d = crowding_distance(&pop, &all(5), CrowdingScale::Raw);
        assert!(d[0].is_infinite());
        assert!(d[4].is_infinite());
        for &interior in &d[1..4] {
            assert!((interior - 52.0).abs() < 1e-12, "got {}", interior);
        }
    }

    #[test]
    fn test_normalized_gaps() {
        let pop = points(&[[0.0, 100.0], [1.0, 75.0], [2.0, 50.0], [3.0, 25.0], [4.0, 0.0]]);
        let d = crowding_distance(&pop, &all(5), CrowdingScale::Normalized);
        for &interior in &d[1..4] {
            assert!((interior - 1.0).abs() < 1e-12, "got {}", interior);
        }
    }

    #[test]
    fn test_normalized_zero_range_axis() {
        let pop = points(&[[1.0, 5.0], [2.0, 5.0], [3.0, 5.0]]);
        let d = crowding_distance(&pop, &all(3), CrowdingScale::Normalized);
        assert!(d[0].is_infinite());
        assert!(d[2].is_infinite());
        assert_eq!(d[1], 1.0);
    }

    #[test]
    fn test_subset_of_population() {
        let pop = points(&[[9.0, 9.0], [1.0, 5.0], [8.0, 8.0], [3.0, 3.0], [5.0, 1.0]]);
        let d = crowding_distance(&pop, &[1, 3, 4], CrowdingScale::Raw);
        assert_eq!(d.len(), 3);
        assert!(d[0].is_infinite());
        assert_eq!(d[1], 8.0);
        assert!(d[2].is_infinite());
    }

    #[test]
    fn test_identical_members_get_two_boundaries() {
        let pop = vec![Point::new(&[2.0, 2.0]); 4];
        let d = crowding_distance(&pop, &all(4), CrowdingScale::Raw);
        assert_eq!(d.iter().filter(|x| x.is_infinite()).count(), 2);
        assert_eq!(d.iter().filter(|&&x| x == 0.0).count(), 2);
    }

    #[test]
    fn test_axis_order_does_not_matter() {
        let forward = points(&[[1.0, 9.0], [2.0, 7.0], [4.0, 4.0], [7.0, 2.0], [9.0, 1.0]]);
        let swapped: Vec<Point> = forward
            .iter()
            .map(|p| Point::new(&[p.objectives[1], p.objectives[0]]))
            .collect();
        let a = crowding_distance(&forward, &all(5), CrowdingScale::Raw);
        let b = crowding_distance(&swapped, &all(5), CrowdingScale::Raw);
        assert_eq!(a, b);
    }
}
