//! Dependency cycle membership.
//!
//! Both passes walk the graph with explicit stacks and only follow edges into
//! steps that exist in the chain.

use std::collections::HashSet;

use reasonflow_core::ReasoningChain;

/// Positions-based view of a chain's known dependency edges.
struct Adjacency<'a> {
    ids: Vec<&'a str>,
    edges: Vec<Vec<usize>>,
}

impl<'a> Adjacency<'a> {
    fn of(chain: &'a ReasoningChain) -> Self {
        let ids = chain.ids().collect();
        let edges = chain
            .steps()
            .map(|step| {
                step.depends_on()
                    .iter()
                    .filter_map(|dep| chain.position(dep))
                    .collect()
            })
            .collect();
        Self { ids, edges }
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// IDs of every step that lies on a dependency cycle.
///
/// Members found by the three-color walk come first, in the order the walk
/// discovered them. Members the walk cannot see (a cycle entered only through
/// a step that is already finished) follow in insertion order.
pub fn cycle_members(chain: &ReasoningChain) -> Vec<&str> {
    let graph = Adjacency::of(chain);

    let mut members = back_edge_members(&graph);
    let mut seen: HashSet<usize> = members.iter().copied().collect();
    let in_component = component_members(&graph);
    for node in (0..graph.len()).filter(|&n| in_component[n]) {
        if seen.insert(node) {
            members.push(node);
        }
    }

    members.into_iter().map(|n| graph.ids[n]).collect()
}

/// Three-color depth-first walk. On a back-edge to a gray step, every step on
/// the current path from that step to the tail is a member.
fn back_edge_members(graph: &Adjacency<'_>) -> Vec<usize> {
    let n = graph.len();
    let mut color = vec![Color::White; n];
    let mut recorded = vec![false; n];
    let mut found = Vec::new();
    let mut path: Vec<(usize, usize)> = Vec::new();

    for start in 0..n {
        if color[start] != Color::White {
            continue;
        }
        color[start] = Color::Gray;
        path.push((start, 0));

        while let Some(frame) = path.last_mut() {
            let (node, next) = *frame;
            frame.1 += 1;

            let Some(&dep) = graph.edges[node].get(next) else {
                path.pop();
                color[node] = Color::Black;
                continue;
            };
            match color[dep] {
                Color::White => {
                    color[dep] = Color::Gray;
                    path.push((dep, 0));
                }
                Color::Gray => {
                    let Some(from) = path.iter().position(|&(n, _)| n == dep) else {
                        continue;
                    };
                    for &(member, _) in &path[from..] {
                        if !recorded[member] {
                            recorded[member] = true;
                            found.push(member);
                        }
                    }
                }
                Color::Black => {}
            }
        }
    }

    found
}

/// Tarjan's strongly connected components, iteratively. A step is marked when
/// its component has more than one step or it depends on itself.
fn component_members(graph: &Adjacency<'_>) -> Vec<bool> {
    let n = graph.len();
    let mut index: Vec<Option<usize>> = vec![None; n];
    let mut lowlink = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack = Vec::new();
    let mut counter = 0;
    let mut cyclic = vec![false; n];

    for root in 0..n {
        if index[root].is_some() {
            continue;
        }
        index[root] = Some(counter);
        lowlink[root] = counter;
        counter += 1;
        stack.push(root);
        on_stack[root] = true;
        let mut calls: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = calls.last_mut() {
            let (v, next) = *frame;
            frame.1 += 1;

            if let Some(&w) = graph.edges[v].get(next) {
                match index[w] {
                    None => {
                        index[w] = Some(counter);
                        lowlink[w] = counter;
                        counter += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        calls.push((w, 0));
                    }
                    Some(wi) if on_stack[w] => lowlink[v] = lowlink[v].min(wi),
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            if let Some(&(parent, _)) = calls.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }
            if index[v] == Some(lowlink[v]) {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                if component.len() > 1 || graph.edges[v].contains(&v) {
                    for w in component {
                        cyclic[w] = true;
                    }
                }
            }
        }
    }

    cyclic
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasonflow_core::ChainBuilder;

    fn chain(steps: &[(&str, &[&str])]) -> ReasoningChain {
        let mut b = ChainBuilder::new("c", "T").unwrap();
        for (id, deps) in steps {
            b.inference(id, "x", deps.iter().copied()).unwrap();
        }
        b.build()
    }

    #[test]
    fn acyclic_has_no_members() {
        let c = chain(&[("a", &[]), ("b", &["a"]), ("c", &["a", "b"])]);
        assert!(cycle_members(&c).is_empty());
    }

    #[test]
    fn two_cycle() {
        let c = chain(&[("a", &["b"]), ("b", &["a"])]);
        assert_eq!(cycle_members(&c), ["a", "b"]);
    }

    #[test]
    fn three_cycle_in_discovery_order() {
        let c = chain(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        assert_eq!(cycle_members(&c), ["a", "b", "c"]);
    }

    #[test]
    fn self_loop() {
        let c = chain(&[("a", &["a"]), ("b", &["a"])]);
        assert_eq!(cycle_members(&c), ["a"]);
    }

    #[test]
    fn tail_into_cycle_is_not_a_member() {
        let c = chain(&[("c1", &["i1"]), ("i1", &["i2"]), ("i2", &["i1"])]);
        assert_eq!(cycle_members(&c), ["i1", "i2"]);
    }

    #[test]
    fn unknown_dependencies_are_not_followed() {
        let c = chain(&[("a", &["ghost"]), ("b", &["a", "phantom"])]);
        assert!(cycle_members(&c).is_empty());
    }

    #[test]
    fn member_behind_finished_step_is_completed() {
        // x -> y -> w -> x closes first; z -> w is only seen once w is black,
        // yet x -> z -> w -> x is a cycle too.
        let c = chain(&[("x", &["y", "z"]), ("y", &["w"]), ("w", &["x"]), ("z", &["w"])]);
        assert_eq!(cycle_members(&c), ["x", "y", "w", "z"]);
    }

    #[test]
    fn disjoint_cycles() {
        let c = chain(&[("a", &["b"]), ("b", &["a"]), ("p", &[]), ("c", &["d"]), ("d", &["c"])]);
        assert_eq!(cycle_members(&c), ["a", "b", "c", "d"]);
    }

    #[test]
    fn long_cycle_does_not_overflow() {
        let mut b = ChainBuilder::new("c", "T").unwrap();
        let n = 20_000;
        for i in 0..n {
            let dep = format!("s{}", (i + 1) % n);
            b.inference(&format!("s{i}"), "x", [dep]).unwrap();
        }
        let c = b.build();
        assert_eq!(cycle_members(&c).len(), n);
    }
}
