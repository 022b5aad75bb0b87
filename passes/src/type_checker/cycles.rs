use indexmap::IndexMap;

#[derive(Copy, Clone, Eq, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Depth-first coloring walk over a named dependency graph, used
/// to reject record type definitions that contain themselves (directly or
/// transitively) without indirection. Returns the cycle's member names in
/// visitation order if one exists.
pub fn detect_cycle(graph: &IndexMap<String, Vec<String>>) -> Option<Vec<String>> {
    let mut colors: IndexMap<&str, Color> = graph.keys().map(|k| (k.as_str(), Color::White)).collect();
    let mut stack = Vec::new();

    for start in graph.keys() {
        if colors.get(start.as_str()) == Some(&Color::White) {
            if let Some(cycle) = visit(start, graph, &mut colors, &mut stack) {
                return Some(cycle);
            }
        }
    }
    None
}

fn visit<'a>(
    node: &'a str,
    graph: &'a IndexMap<String, Vec<String>>,
    colors: &mut IndexMap<&'a str, Color>,
    stack: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    colors.insert(node, Color::Gray);
    stack.push(node);

    if let Some(edges) = graph.get(node) {
        for next in edges {
            match colors.get(next.as_str()).copied() {
                Some(Color::Gray) => {
                    let start = stack.iter().position(|n| *n == next.as_str()).unwrap_or(0);
                    let mut cycle: Vec<String> = stack[start..].iter().map(|s| s.to_string()).collect();
                    cycle.push(next.clone());
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = visit(next, graph, colors, stack) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }
    }

    stack.pop();
    colors.insert(node, Color::Black);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(pairs: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect())).collect()
    }

    #[test]
    fn acyclic_graph_reports_none() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        assert!(detect_cycle(&g).is_none());
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let g = graph(&[("A", &["A"])]);
        assert!(detect_cycle(&g).is_some());
    }

    #[test]
    fn transitive_cycle_is_detected() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
        assert!(detect_cycle(&g).is_some());
    }
}
