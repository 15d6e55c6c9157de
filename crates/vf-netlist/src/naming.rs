//! Ground selection, node labels and component counters.

use std::collections::HashMap;

use vf_graph::{ComponentKind, CoordKey, Node, Point};

/// Label given to the ground node.
pub const GROUND_LABEL: &str = "0";

/// Pick the ground node: greatest `y`, ties broken by smallest `x`.
///
/// This is a running pairwise reduction in input order rather than a sort,
/// so exact float ties always resolve to the earliest qualifying node.
pub fn select_ground(nodes: &[Node]) -> Option<Point> {
    let (first, rest) = nodes.split_first()?;
    let mut lowest = *first;
    for n in rest {
        if n.y > lowest.y || (n.y == lowest.y && n.x < lowest.x) {
            lowest = *n;
        }
    }
    Some(lowest)
}

/// Coordinate -> netlist node label mapping.
///
/// The ground coordinate is `"0"`; every other distinct coordinate is
/// `n1, n2, ...` in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLabels {
    by_key: HashMap<CoordKey, usize>,
    /// (point, label) in assignment order.
    entries: Vec<(Point, String)>,
}

impl NodeLabels {
    pub fn assign(nodes: &[Node], ground: Point) -> Self {
        let ground_key = ground.key();
        let mut by_key = HashMap::new();
        let mut entries = Vec::new();
        let mut counter = 0usize;

        for node in nodes {
            let key = node.key();
            if by_key.contains_key(&key) {
                continue;
            }
            let label = if key == ground_key {
                GROUND_LABEL.to_string()
            } else {
                counter += 1;
                format!("n{}", counter)
            };
            by_key.insert(key, entries.len());
            entries.push((*node, label));
        }

        Self { by_key, entries }
    }

    /// Label for a point, `None` if it is not a declared node.
    pub fn get(&self, p: Point) -> Option<&str> {
        self.by_key
            .get(&p.key())
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(point, label)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &str)> {
        self.entries.iter().map(|(p, l)| (*p, l.as_str()))
    }
}

const KIND_COUNT: usize = 6;

/// Independent per-kind counters used for component names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentCounters {
    counts: [u32; KIND_COUNT],
}

impl ComponentCounters {
    /// Advance the counter for `kind` and return the new value (1-based).
    pub fn next(&mut self, kind: ComponentKind) -> u32 {
        let slot = &mut self.counts[Self::slot(kind)];
        *slot += 1;
        *slot
    }

    /// Current value of the counter for `kind`.
    pub fn count(&self, kind: ComponentKind) -> u32 {
        self.counts[Self::slot(kind)]
    }

    fn slot(kind: ComponentKind) -> usize {
        match kind {
            ComponentKind::Resistor => 0,
            ComponentKind::Capacitor => 1,
            ComponentKind::Inductor => 2,
            ComponentKind::VoltageSource => 3,
            ComponentKind::CurrentSource => 4,
            ComponentKind::Wire => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn ground_is_bottom_then_left() {
        let nodes = [p(5.0, 0.0), p(3.0, 10.0), p(1.0, 10.0), p(0.0, 2.0)];
        assert_eq!(select_ground(&nodes), Some(p(1.0, 10.0)));
        assert_eq!(select_ground(&[]), None);
    }

    #[test]
    fn labels_follow_first_seen_order() {
        let nodes = [p(0.0, 0.0), p(0.0, 10.0), p(5.0, 0.0), p(0.0, 0.0)];
        let labels = NodeLabels::assign(&nodes, p(0.0, 10.0));
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(p(0.0, 0.0)), Some("n1"));
        assert_eq!(labels.get(p(0.0, 10.0)), Some("0"));
        assert_eq!(labels.get(p(5.0, 0.0)), Some("n2"));
        assert_eq!(labels.get(p(9.0, 9.0)), None);

        let order: Vec<&str> = labels.iter().map(|(_, l)| l).collect();
        assert_eq!(order, vec!["n1", "0", "n2"]);
    }

    #[test]
    fn counters_are_independent_and_one_based() {
        let mut c = ComponentCounters::default();
        assert_eq!(c.next(ComponentKind::Resistor), 1);
        assert_eq!(c.next(ComponentKind::Wire), 1);
        assert_eq!(c.next(ComponentKind::Resistor), 2);
        assert_eq!(c.count(ComponentKind::Capacitor), 0);
        assert_eq!(c.count(ComponentKind::Resistor), 2);
    }
}
