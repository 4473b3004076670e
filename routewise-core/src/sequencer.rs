//! Greedy nearest-neighbour visiting order with fixed endpoints.
//!
//! Node `0` is always the start and node `n - 1` always the end. The
//! waypoints in between are visited by repeatedly moving to the closest
//! unvisited waypoint, ties going to the lowest index. The heuristic never
//! backtracks, so the result can be noticeably worse than optimal on
//! adversarial matrices; callers depend on that exact output, so it must not
//! be replaced with an improving solver.

use log::debug;
use thiserror::Error;

use crate::DistanceMatrix;

/// Visiting order as indices into the coordinate sequence.
///
/// Always a permutation of `0..n` that starts at `0` and ends at `n - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Route(Vec<usize>);

impl Route {
    /// Borrow the visiting order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of stops on the route.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the route has no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Route> for Vec<usize> {
    fn from(route: Route) -> Self {
        route.0
    }
}

/// Output of [`nearest_neighbour`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    /// Chosen visiting order.
    pub route: Route,
    /// Sum of the matrix entries along `route`, in kilometres.
    pub total_distance_km: f64,
}

/// Programming-invariant violations detected by [`nearest_neighbour`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A route needs at least a start and an end.
    #[error("at least two nodes are required, got {count}")]
    TooFewNodes {
        /// Number of nodes requested.
        count: usize,
    },
    /// The matrix size disagrees with the node count.
    #[error("distance matrix is {actual}x{actual}, expected {expected}x{expected}")]
    DimensionMismatch {
        /// Node count requested.
        expected: usize,
        /// Matrix dimension supplied.
        actual: usize,
    },
}

/// Order `nodes` stops with the greedy nearest-neighbour heuristic.
///
/// With two nodes the route is `[0, 1]` and the total is `matrix[0][1]`.
/// Otherwise, starting from node `0`, each step moves to the unvisited
/// waypoint (`1..n-1`) with the smallest distance from the current node,
/// preferring the lowest index on ties; the end node is appended last.
///
/// # Errors
///
/// Returns [`SequenceError::TooFewNodes`] for fewer than two nodes and
/// [`SequenceError::DimensionMismatch`] when `matrix` is not `nodes × nodes`.
///
/// # Examples
/// ```
/// use routewise_core::{DistanceMatrix, nearest_neighbour};
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 9.0],
///     vec![5.0, 0.0, 3.0],
///     vec![9.0, 3.0, 0.0],
/// ])?;
/// let sequence = nearest_neighbour(&matrix, 3)?;
/// assert_eq!(sequence.route.indices(), &[0, 1, 2]);
/// assert_eq!(sequence.total_distance_km, 8.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "route length is the sum of floating-point leg distances"
)]
pub fn nearest_neighbour(matrix: &DistanceMatrix, nodes: usize) -> Result<Sequence, SequenceError> {
    if nodes < 2 {
        return Err(SequenceError::TooFewNodes { count: nodes });
    }
    let mismatch = SequenceError::DimensionMismatch {
        expected: nodes,
        actual: matrix.len(),
    };
    if matrix.len() != nodes {
        return Err(mismatch);
    }

    let end = nodes - 1;
    let mut unvisited: Vec<usize> = (1..end).collect();
    let mut order = Vec::with_capacity(nodes);
    order.push(0);
    let mut current = 0;
    let mut total = 0.0;

    while let Some(step) = nearest(matrix, current, &unvisited) {
        total += step.distance;
        order.push(step.node);
        unvisited.remove(step.position);
        current = step.node;
    }

    total += matrix.get(current, end).ok_or(mismatch)?;
    order.push(end);

    debug!("sequenced {nodes} stops as {order:?} ({total:.2} km)");
    Ok(Sequence {
        route: Route(order),
        total_distance_km: total,
    })
}

struct Step {
    position: usize,
    node: usize,
    distance: f64,
}

/// Closest candidate to `from`; earlier candidates win ties.
fn nearest(matrix: &DistanceMatrix, from: usize, candidates: &[usize]) -> Option<Step> {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(position, &node)| {
            matrix.get(from, node).map(|distance| Step {
                position,
                node,
                distance,
            })
        })
        .fold(None, |closest, candidate| match closest {
            Some(step) if step.distance <= candidate.distance => Some(step),
            _ => Some(candidate),
        })
}
