use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;

// Breadth-first link ids from `root`
// every parent link is visited before its children
pub(super) fn bfs(graph: &DiGraphMap<usize, ()>, root: usize) -> Vec<usize> {
    let mut search = Bfs::new(graph, root);
    std::iter::from_fn(|| search.next(graph)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_before_children() {
        let graph = DiGraphMap::<usize, ()>::from_edges([(0, 2), (2, 1), (0, 3), (3, 4)]);
        let order = bfs(&graph, 0);
        assert_eq!(order.len(), 5);
        let position = |id| order.iter().position(|v| *v == id).unwrap();
        for (parent, child, _) in graph.all_edges() {
            assert!(position(parent) < position(child));
        }
    }
}
