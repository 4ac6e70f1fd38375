//! Sews line strings that meet end to end into maximal runs.

use crate::float_types::{PI, Real};
use geo::{Coord, LineString, MultiLineString};
use hashbrown::HashMap;

type NodeKey = (u64, u64);

#[inline]
fn node_key(coord: Coord<Real>) -> NodeKey {
    ((coord.x + 0.0).to_bits() as u64, (coord.y + 0.0).to_bits() as u64)
}

/// One end of an input line attached to a node.
#[derive(Clone, Copy)]
struct Incidence {
    line: usize,
    at_start: bool,
}

struct Node {
    coord: Coord<Real>,
    incidences: Vec<Incidence>,
}

struct MergeGraph<'a> {
    lines: Vec<&'a LineString<Real>>,
    nodes: HashMap<NodeKey, Node>,
    used: Vec<bool>,
}

impl<'a> MergeGraph<'a> {
    fn new(input: &'a MultiLineString<Real>) -> Self {
        let lines: Vec<_> = input.iter().filter(|line| line.0.len() >= 2).collect();
        let mut nodes: HashMap<NodeKey, Node> = HashMap::new();
        for (idx, line) in lines.iter().enumerate() {
            let (first, last) = (line.0[0], line.0[line.0.len() - 1]);
            for (coord, at_start) in [(first, true), (last, false)] {
                nodes
                    .entry(node_key(coord))
                    .or_insert_with(|| Node {
                        coord,
                        incidences: Vec::new(),
                    })
                    .incidences
                    .push(Incidence { line: idx, at_start });
            }
        }
        let used = vec![false; lines.len()];
        Self { lines, nodes, used }
    }

    /// Walks from `start`, leaving through the given end of a line, and keeps going while
    /// the node reached joins exactly two line ends.
    fn walk(&mut self, start: Incidence) -> LineString<Real> {
        let mut coords: Vec<Coord<Real>> = Vec::new();
        let mut current = start;
        loop {
            self.used[current.line] = true;
            let line = self.lines[current.line];
            let forward: Vec<Coord<Real>> = if current.at_start {
                line.0.clone()
            } else {
                line.0.iter().rev().copied().collect()
            };
            let skip = usize::from(!coords.is_empty());
            coords.extend(forward.into_iter().skip(skip));

            let Some(&end) = coords.last() else { break };
            let Some(node) = self.nodes.get(&node_key(end)) else { break };
            if node.incidences.len() != 2 {
                break;
            }
            let next = node
                .incidences
                .iter()
                .find(|inc| !self.used[inc.line])
                .copied();
            match next {
                Some(inc) => current = inc,
                None => break,
            }
        }
        LineString::new(coords)
    }

    /// Angle of the first segment leaving the node through `incidence`, in `[0, 2π)`.
    fn outgoing_angle(&self, incidence: &Incidence) -> Real {
        let coords = &self.lines[incidence.line].0;
        let (from, to) = if incidence.at_start {
            (coords[0], coords[1])
        } else {
            (coords[coords.len() - 1], coords[coords.len() - 2])
        };
        let angle = (to.y - from.y).atan2(to.x - from.x);
        if angle < 0.0 { angle + 2.0 * PI } else { angle }
    }

    fn merge(mut self) -> MultiLineString<Real> {
        let mut merged = Vec::new();

        // Open runs start at nodes that are not simple pass-throughs, visited in
        // ascending (x, y) order and counter-clockwise around each node.
        let mut starts: Vec<(Coord<Real>, Vec<Incidence>)> = self
            .nodes
            .values()
            .filter(|node| node.incidences.len() != 2)
            .map(|node| (node.coord, node.incidences.clone()))
            .collect();
        starts.sort_by(|(a, _), (b, _)| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));
        for (_, mut incidences) in starts {
            incidences.sort_by(|a, b| self.outgoing_angle(a).total_cmp(&self.outgoing_angle(b)));
            for incidence in incidences {
                if !self.used[incidence.line] {
                    merged.push(self.walk(incidence));
                }
            }
        }

        // Whatever is left forms closed loops through degree two nodes only.
        for idx in 0..self.lines.len() {
            if !self.used[idx] {
                merged.push(self.walk(Incidence {
                    line: idx,
                    at_start: true,
                }));
            }
        }

        MultiLineString::new(merged)
    }
}

/// Merges lines that share an endpoint where exactly two line ends meet.
///
/// Lines meeting at nodes where three or more ends meet, or at dead ends, are left
/// as separate parts. Lines with less than two coordinates are dropped.
pub fn line_merge(lines: &MultiLineString<Real>) -> MultiLineString<Real> {
    MergeGraph::new(lines).merge()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;

    #[test]
    fn joins_a_chain() {
        let lines = MultiLineString::new(vec![
            line_string![(x: 2.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 2.0, y: 0.0), (x: 3.0, y: 1.0)],
        ]);
        let merged = line_merge(&lines);
        assert_eq!(merged.0.len(), 1);
        assert_eq!(merged.0[0].0.len(), 4);
        let ends = [merged.0[0].0[0], merged.0[0].0[3]];
        assert!(ends.contains(&Coord { x: 0.0, y: 0.0 }));
        assert!(ends.contains(&Coord { x: 3.0, y: 1.0 }));
    }

    #[test]
    fn keeps_junctions_apart() {
        let lines = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 0.0, y: 0.0), (x: -1.0, y: 0.0)],
            line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0)],
        ]);
        assert_eq!(line_merge(&lines).0.len(), 3);
    }

    #[test]
    fn runs_start_at_the_lowest_node() {
        // three arms around (5, 5); the run from (0, 5) comes first, then (5, 0), then the
        // arm that only touches the junction
        let lines = MultiLineString::new(vec![
            line_string![(x: 5.0, y: 5.0), (x: 5.0, y: 10.0)],
            line_string![(x: 5.0, y: 0.0), (x: 5.0, y: 5.0)],
            line_string![(x: 0.0, y: 5.0), (x: 5.0, y: 5.0)],
        ]);
        let merged = line_merge(&lines);
        assert_eq!(merged.0[0], line_string![(x: 0.0, y: 5.0), (x: 5.0, y: 5.0)]);
        assert_eq!(merged.0[1], line_string![(x: 5.0, y: 0.0), (x: 5.0, y: 5.0)]);
        assert_eq!(merged.0[2], line_string![(x: 5.0, y: 5.0), (x: 5.0, y: 10.0)]);
    }

    #[test]
    fn junction_arms_in_counter_clockwise_order() {
        let lines = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0)],
            line_string![(x: 0.0, y: 0.0), (x: 0.0, y: -1.0)],
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: -1.0, y: 0.0), (x: 0.0, y: 0.0)],
        ]);
        let merged = line_merge(&lines);
        // the dead ends (-1, 0) and (0, -1) sort before the junction, which then
        // hands out its remaining arms east before north
        assert_eq!(merged.0[0].0[0], Coord { x: -1.0, y: 0.0 });
        assert_eq!(merged.0[1].0[0], Coord { x: 0.0, y: -1.0 });
        assert_eq!(merged.0[2].0[1], Coord { x: 1.0, y: 0.0 });
        assert_eq!(merged.0[3].0[1], Coord { x: 0.0, y: 1.0 });
    }

    #[test]
    fn closes_a_loop() {
        let lines = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 1.0, y: 1.0), (x: 0.0, y: 0.0)],
        ]);
        let merged = line_merge(&lines);
        assert_eq!(merged.0.len(), 1);
        assert!(merged.0[0].is_closed());
        assert_eq!(merged.0[0].0.len(), 4);
    }
}
