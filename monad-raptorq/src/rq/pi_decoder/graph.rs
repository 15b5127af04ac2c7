// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

// Connected components of the graph used to break ties between rows of weight two in
// the first phase of decoding.  Nodes are columns of V and every row with exactly two
// ones in V is an edge between its two columns.

pub struct ConnectedComponents {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl ConnectedComponents {
    pub fn new(num_nodes: usize) -> ConnectedComponents {
        ConnectedComponents {
            parent: (0..num_nodes).collect(),
            size: vec![1; num_nodes],
        }
    }

    pub fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }

        node
    }

    pub fn union(&mut self, a: usize, b: usize) {
        let mut a = self.find(a);
        let mut b = self.find(b);

        if a == b {
            return;
        }

        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }

        self.parent[b] = a;
        self.size[a] += self.size[b];
    }

    pub fn component_size(&mut self, node: usize) -> usize {
        let root = self.find(node);

        self.size[root]
    }
}

// Return the index of the first edge that lies in a connected component of maximum
// size (in nodes), or None if there are no edges.
pub fn first_edge_in_largest_component(
    num_nodes: usize,
    edges: &[(usize, usize)],
) -> Option<usize> {
    let mut components = ConnectedComponents::new(num_nodes);

    for (a, b) in edges {
        components.union(*a, *b);
    }

    let largest = edges
        .iter()
        .map(|(a, _)| components.component_size(*a))
        .max()?;

    edges
        .iter()
        .position(|(a, _)| components.component_size(*a) == largest)
}

#[cfg(test)]
mod test {
    use super::{first_edge_in_largest_component, ConnectedComponents};

    #[test]
    fn test_union_find() {
        let mut c = ConnectedComponents::new(6);

        c.union(0, 1);
        c.union(2, 3);
        c.union(1, 3);

        assert_eq!(c.find(0), c.find(2));
        assert_ne!(c.find(0), c.find(4));
        assert_eq!(c.component_size(3), 4);
        assert_eq!(c.component_size(5), 1);

        // Redundant edges don't change anything.
        c.union(0, 2);
        assert_eq!(c.component_size(0), 4);
    }

    #[test]
    fn test_first_edge_in_largest_component() {
        // Component {0, 1} from edge 0, component {2, 3, 4} from edges 1 and 2.
        let edges = [(0, 1), (2, 3), (3, 4)];

        assert_eq!(first_edge_in_largest_component(5, &edges), Some(1));
    }

    #[test]
    fn test_ties_go_to_first_edge() {
        let edges = [(4, 5), (0, 1)];

        assert_eq!(first_edge_in_largest_component(6, &edges), Some(0));
    }

    #[test]
    fn test_no_edges() {
        assert_eq!(first_edge_in_largest_component(3, &[]), None);
    }
}
