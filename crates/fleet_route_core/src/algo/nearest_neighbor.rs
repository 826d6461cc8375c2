//! Greedy nearest-neighbor ordering.
//!
//! Starting from the anchor, the builder repeatedly travels to the closest
//! unvisited stop. Each step scans every unvisited stop, so a full build costs
//! `n * (n - 1) / 2` distance evaluations. Fleet stop lists are tens of stops;
//! for larger inputs set an evaluation budget, after which the remaining stops
//! keep their input order and the tour is reported as incomplete.

use crate::Stop;

#[derive(Clone, Copy, Debug, Default)]
pub struct NearestNeighbor {
    evaluation_budget: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NearestNeighborTour {
    pub order: Vec<Stop>,
    /// Stops placed by the greedy pass, anchor included.
    pub placed: usize,
    pub evaluations: usize,
    /// False when the budget ran out and the tail was appended unsorted.
    pub complete: bool,
}

impl NearestNeighbor {
    pub fn new() -> Self {
        Self::default()
    }

    /// `0` means unlimited.
    pub fn with_evaluation_budget(mut self, budget: usize) -> Self {
        self.evaluation_budget = (budget > 0).then_some(budget);
        self
    }

    pub fn evaluation_budget(&self) -> Option<usize> {
        self.evaluation_budget
    }

    /// Orders `stops` starting at `stops[anchor]`.
    ///
    /// Ties are broken by input order. An out-of-range `anchor` falls back to 0.
    pub fn build(&self, stops: &[Stop], anchor: usize) -> NearestNeighborTour {
        let n = stops.len();
        if n == 0 {
            return NearestNeighborTour {
                order: Vec::new(),
                placed: 0,
                evaluations: 0,
                complete: true,
            };
        }
        let anchor = if anchor < n { anchor } else { 0 };

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut evaluations = 0;
        let mut complete = true;

        visited[anchor] = true;
        order.push(anchor);
        let mut current = anchor;

        while order.len() < n {
            let remaining = n - order.len();
            if let Some(budget) = self.evaluation_budget
                && evaluations + remaining > budget
            {
                complete = false;
                break;
            }

            let mut best: Option<(usize, f64)> = None;
            for (idx, candidate) in stops.iter().enumerate() {
                if visited[idx] {
                    continue;
                }
                let d = stops[current].dist(candidate);
                evaluations += 1;
                if best.is_none_or(|(_, best_d)| d < best_d) {
                    best = Some((idx, d));
                }
            }

            let Some((next, _)) = best else {
                break;
            };
            visited[next] = true;
            order.push(next);
            current = next;
        }

        let placed = order.len();
        if !complete {
            log::warn!(
                "nearest-neighbor: evaluation budget exhausted n={n} placed={placed} evaluations={evaluations}"
            );
            order.extend((0..n).filter(|idx| !visited[*idx]));
        }

        NearestNeighborTour {
            order: order.into_iter().map(|idx| stops[idx].clone()).collect(),
            placed,
            evaluations,
            complete,
        }
    }
}
