use crate::algebra::*;
use crate::solver::{Iterate, ProblemData};

/// Partition of the constraint rows into lower-active, upper-active
/// and free sets.
///
/// Active rows are numbered consecutively in row order, lower- and
/// upper-active rows sharing one counter, to give their row index
/// within the reduced constraint matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    /// rows at their lower bound, in increasing order
    pub ind_lower: Vec<usize>,
    /// rows at their upper bound, in increasing order
    pub ind_upper: Vec<usize>,
    /// inactive rows, in increasing order
    pub ind_free: Vec<usize>,
    /// reduced row index of each constraint row, `None` if free
    pub row_to_reduced: Vec<Option<usize>>,
}

impl ActiveSet {
    /// An empty partition with storage for `m` rows
    pub fn new(m: usize) -> Self {
        Self {
            ind_lower: Vec::with_capacity(m),
            ind_upper: Vec::with_capacity(m),
            ind_free: Vec::with_capacity(m),
            row_to_reduced: vec![None; m],
        }
    }

    /// Classifies every row of `data` at the point `iterate`.
    pub fn classify<T: FloatT>(data: &ProblemData<T>, iterate: &Iterate<T>, rho: T) -> Self {
        let mut set = Self::new(data.m);
        set.reclassify(data, iterate, rho);
        set
    }

    /// As [`classify`](ActiveSet::classify), reusing existing storage.
    ///
    /// Row `j` with slack `s = z[n+j]` is lower-active if
    /// `s - l[j] < -rho*u[j]`, otherwise upper-active if
    /// `u[j] - s < rho*u[j]`, otherwise free.  Here `u` in the
    /// tolerance is the iterate's scaling vector.
    pub fn reclassify<T: FloatT>(&mut self, data: &ProblemData<T>, iterate: &Iterate<T>, rho: T) {
        self.ind_lower.clear();
        self.ind_upper.clear();
        self.ind_free.clear();
        self.row_to_reduced.resize(data.m, None);

        let slack = iterate.slack(data.n);
        let mut mred = 0;

        for j in 0..data.m {
            let s = slack[j];
            let tol = rho * iterate.u[j];

            self.row_to_reduced[j] = if s - data.l[j] < -tol {
                self.ind_lower.push(j);
                Some(mred)
            } else if data.u[j] - s < tol {
                self.ind_upper.push(j);
                Some(mred)
            } else {
                self.ind_free.push(j);
                None
            };

            if self.row_to_reduced[j].is_some() {
                mred += 1;
            }
        }
    }

    /// number of active rows
    pub fn mred(&self) -> usize {
        self.ind_lower.len() + self.ind_upper.len()
    }

    /// number of classified rows
    pub fn m(&self) -> usize {
        self.row_to_reduced.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_data(l: &[f64], u: &[f64]) -> ProblemData<f64> {
        let m = l.len();
        let P = CscMatrix::<f64>::identity(1);
        let A = CscMatrix::<f64>::spalloc((m, 1), 0);
        ProblemData::new(P.view(), &[0.], A.view(), l, u).unwrap()
    }

    #[test]
    fn test_classify_rows() {
        let l = [0., 0., 0., -1., 1.];
        let u = [1., 1., 1., 1., 1.];
        let data = test_data(&l, &u);

        let mut it = Iterate::new(1, 5);
        // slacks: below l, above u, interior, interior, at l == u
        it.z.copy_from_slice(&[9., -0.5, 1.5, 0.5, 0., 1.]);
        it.u.copy_from_slice(&[1., 1., 1., 1., -2.]);

        let set = ActiveSet::classify(&data, &it, 0.1);

        assert_eq!(set.ind_lower, vec![0, 4]);
        assert_eq!(set.ind_upper, vec![1]);
        assert_eq!(set.ind_free, vec![2, 3]);
        assert_eq!(set.row_to_reduced, vec![Some(0), Some(1), None, None, Some(2)]);
        assert_eq!(set.mred(), 3);
    }

    #[test]
    fn test_classify_tie_prefers_lower() {
        // both bounds equal and the slack between them within tolerance
        let data = test_data(&[1.], &[1.]);
        let mut it = Iterate::new(1, 1);
        it.z[1] = 0.8;
        it.u[0] = 1.0;

        let set = ActiveSet::classify(&data, &it, 0.1);
        assert_eq!(set.ind_lower, vec![0]);
        assert!(set.ind_upper.is_empty());
        assert_eq!(set.row_to_reduced, vec![Some(0)]);
    }

    #[test]
    fn test_partition_and_mapping() {
        let m = 40;
        let l: Vec<f64> = (0..m).map(|j| -((j % 3) as f64)).collect();
        let u: Vec<f64> = (0..m).map(|j| (j % 5) as f64).collect();
        let data = test_data(&l, &u);

        let mut it = Iterate::new(1, m);
        for j in 0..m {
            it.z[1 + j] = ((j * 7) % 11) as f64 - 5.;
            it.u[j] = ((j % 4) as f64 - 1.5) * 3.;
        }

        let set = ActiveSet::classify(&data, &it, 0.1);

        // disjoint sets covering every row exactly once
        let mut all: Vec<usize> = set
            .ind_lower
            .iter()
            .chain(&set.ind_upper)
            .chain(&set.ind_free)
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..m).collect::<Vec<_>>());

        // active rows map onto 0..mred in row order
        let mapped: Vec<usize> = set.row_to_reduced.iter().flatten().copied().collect();
        assert_eq!(mapped, (0..set.mred()).collect::<Vec<_>>());
        for &j in &set.ind_free {
            assert_eq!(set.row_to_reduced[j], None);
        }
    }

    #[test]
    fn test_reclassify_reuses_storage() {
        let data = test_data(&[0., 0.], &[1., 1.]);
        let mut it = Iterate::new(1, 2);
        it.z.copy_from_slice(&[0., -1., 0.5]);
        it.u.copy_from_slice(&[1., 1.]);

        let mut set = ActiveSet::classify(&data, &it, 0.1);
        assert_eq!(set.row_to_reduced, vec![Some(0), None]);

        it.z.copy_from_slice(&[0., 0.5, 2.]);
        set.reclassify(&data, &it, 0.1);
        assert_eq!(set.ind_lower, Vec::<usize>::new());
        assert_eq!(set.ind_upper, vec![1]);
        assert_eq!(set.ind_free, vec![0]);
        assert_eq!(set.row_to_reduced, vec![None, Some(0)]);
        assert_eq!(set.m(), 2);
    }
}
