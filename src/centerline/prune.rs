//! **Branch pruning of a raw skeleton**
//!
//! The raw voronoi skeleton has a short spur towards nearly every boundary vertex.
//! Pruning repeatedly classifies the short lines of the network and drops the
//! dangling ones until nothing changes anymore:
//!
//! ```text
//!   start adjacent | end adjacent | kind        | action
//!   ---------------+--------------+-------------+--------
//!   no             | no           | standalone  | keep
//!   yes            | yes          | bridge      | keep
//!   yes            | no           | dangling    | remove
//!   no             | yes          | dangling    | remove
//! ```
//!
//! Every pass rebuilds an [`EdgeIndex`] over the current lines, visits the lines
//! shortest first and line-merges the survivors. The network shrinks monotonically,
//! so the loop ends after at most as many passes as there are lines.
//!
//! Removing all dangling lines of a pass at once can remove everything, e.g. for a
//! star of equally short arms. [`prune`] therefore tries the strategies of
//! [`PruneStrategy::ESCALATION`] in order and falls back to the unpruned input.

use super::normalize::normalize_parts;
use crate::float_types::Real;
use crate::kernel::{EdgeIndex, GeometryKernel};
use geo::{Coord, Euclidean, Intersects, Length, LineString, MultiLineString, Point};
use log::debug;

/// How the dangling lines found in one pass are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneStrategy {
    /// Remove every dangling line of the pass at once.
    Bulk,
    /// Remove only the shortest dangling line, then look again.
    Conservative,
}

impl PruneStrategy {
    pub const ESCALATION: [PruneStrategy; 2] = [PruneStrategy::Bulk, PruneStrategy::Conservative];
}

/// Position of a line within the network, from the adjacency of its two ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Standalone,
    Bridge,
    Dangling,
}

impl BranchKind {
    pub const fn from_adjacency(start_adjacent: bool, end_adjacent: bool) -> Self {
        match (start_adjacent, end_adjacent) {
            (false, false) => BranchKind::Standalone,
            (true, true) => BranchKind::Bridge,
            _ => BranchKind::Dangling,
        }
    }
}

/// Whether any line other than `lines[own]` touches `point`.
fn is_adjacent(lines: &[LineString<Real>], index: &EdgeIndex, own: usize, point: Coord<Real>) -> bool {
    let probe = Point::from(point);
    index
        .query(point)
        .any(|candidate| candidate != own && lines[candidate].intersects(&probe))
}

/// Classifies `lines[idx]` within the network indexed by `index`.
pub fn classify(lines: &[LineString<Real>], index: &EdgeIndex, idx: usize) -> BranchKind {
    let line = &lines[idx];
    match (line.0.first(), line.0.last()) {
        (Some(&start), Some(&end)) => BranchKind::from_adjacency(
            is_adjacent(lines, index, idx, start),
            is_adjacent(lines, index, idx, end),
        ),
        _ => BranchKind::Standalone,
    }
}

/// One pass: the ids of the lines to remove, shortest first.
fn dangling_lines(lines: &[LineString<Real>], min_branch_length: Real, strategy: PruneStrategy) -> Vec<usize> {
    let index = EdgeIndex::build(lines);
    let lengths: Vec<Real> = lines.iter().map(|line| line.length::<Euclidean>()).collect();
    let mut order: Vec<usize> = (0..lines.len()).collect();
    order.sort_by(|&a, &b| lengths[a].total_cmp(&lengths[b]));

    let mut dangling = Vec::new();
    for idx in order {
        if lengths[idx] >= min_branch_length {
            break;
        }
        if classify(lines, &index, idx) == BranchKind::Dangling {
            dangling.push(idx);
            if strategy == PruneStrategy::Conservative {
                break;
            }
        }
    }
    dangling
}

/// Prunes with a single strategy. Returns `None` when nothing would be left.
pub fn prune_with<K: GeometryKernel>(
    kernel: &K,
    skeleton: &MultiLineString<Real>,
    min_branch_length: Real,
    strategy: PruneStrategy,
) -> Option<MultiLineString<Real>> {
    let mut lines = normalize_parts(skeleton.0.clone());
    let mut passes = 0usize;

    // A single line has no branches left to judge.
    while lines.len() > 1 {
        passes += 1;
        let dangling = dangling_lines(&lines, min_branch_length, strategy);
        if dangling.is_empty() {
            break;
        }

        let mut remove = vec![false; lines.len()];
        for idx in &dangling {
            remove[*idx] = true;
        }
        let kept: Vec<LineString<Real>> = lines
            .into_iter()
            .zip(remove)
            .filter_map(|(line, remove)| (!remove).then_some(line))
            .collect();
        lines = kernel.line_merge(&MultiLineString::new(kept)).0;
        debug!(
            "prune[{strategy:?}] pass {passes}: removed {} lines, {} left",
            dangling.len(),
            lines.len()
        );
    }

    (!lines.is_empty()).then(|| MultiLineString::new(lines))
}

/// Removes dangling branches shorter than `min_branch_length`, never returning an empty result.
///
/// The strategies of [`PruneStrategy::ESCALATION`] are tried in order, the first non-empty
/// result wins. When all of them prune everything away, `skeleton` is returned unchanged.
pub fn prune<K: GeometryKernel>(
    kernel: &K,
    skeleton: &MultiLineString<Real>,
    min_branch_length: Real,
) -> MultiLineString<Real> {
    if skeleton.0.len() <= 1 || min_branch_length <= 0.0 {
        return skeleton.clone();
    }

    for strategy in PruneStrategy::ESCALATION {
        match prune_with(kernel, skeleton, min_branch_length, strategy) {
            Some(pruned) => return pruned,
            None => debug!("prune[{strategy:?}] left nothing, escalating"),
        }
    }

    debug!("prune: every strategy left nothing, keeping the unpruned skeleton");
    skeleton.clone()
}
