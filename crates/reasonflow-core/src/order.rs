//! Dependency ordering and depth for possibly-cyclic chains.
//!
//! Both walks are iterative with an explicit stack, so they neither recurse
//! nor loop forever on cyclic input. Chains handed to this module have not
//! necessarily been validated.

use std::collections::{HashMap, HashSet};

use crate::chain::ReasoningChain;
use crate::step::ReasoningStep;

/// Steps in dependency-first order.
///
/// Roots (steps with no dependencies) come first, in insertion order. The
/// remaining steps follow a post-order walk started from each step in
/// insertion order, so every dependency precedes its dependents wherever the
/// graph is acyclic. Unknown dependency IDs are ignored.
///
/// A cycle has no topological order. When the walk meets a step that is
/// already on the current path it skips that edge, so the relative order of
/// cycle members depends on where the walk entered the cycle. Every step still
/// appears exactly once.
pub fn topological_order(chain: &ReasoningChain) -> Vec<&ReasoningStep> {
    let mut order = Vec::with_capacity(chain.len());
    let mut emitted: HashSet<&str> = HashSet::with_capacity(chain.len());

    for step in chain.steps().filter(|s| s.is_root()) {
        emitted.insert(step.id());
        order.push(step);
    }

    let mut on_path: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&ReasoningStep, usize)> = Vec::new();

    for start in chain.steps() {
        if emitted.contains(start.id()) {
            continue;
        }
        on_path.insert(start.id());
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let (step, next) = *frame;
            frame.1 += 1;

            match step.depends_on().get(next) {
                Some(dep_id) => {
                    let Some(dep) = chain.get(dep_id) else {
                        continue;
                    };
                    if emitted.contains(dep.id()) || on_path.contains(dep.id()) {
                        continue;
                    }
                    on_path.insert(dep.id());
                    stack.push((dep, 0));
                }
                None => {
                    stack.pop();
                    on_path.remove(step.id());
                    emitted.insert(step.id());
                    order.push(step);
                }
            }
        }
    }

    order
}

/// Dependency depth of one step.
///
/// Depth is 0 for a step with no dependencies and otherwise one more than the
/// deepest dependency. Unknown dependencies, and dependencies already on the
/// current path (a cycle), count as depth 0. Unknown `id` yields 0.
pub fn depth_of(chain: &ReasoningChain, id: &str) -> usize {
    match chain.get(id) {
        Some(step) => DepthWalker::new(chain).depth(step),
        None => 0,
    }
}

/// Depth of every step, keyed by step ID.
///
/// One walk is shared across all steps, so each step is finished exactly once.
/// On cyclic input the value of a cycle member depends on where the walk
/// entered its cycle, which is the first member in insertion order.
pub fn depths(chain: &ReasoningChain) -> HashMap<&str, usize> {
    let mut walker = DepthWalker::new(chain);
    chain
        .steps()
        .map(|step| (step.id(), walker.depth(step)))
        .collect()
}

struct DepthFrame<'a> {
    step: &'a ReasoningStep,
    next: usize,
    deepest: usize,
}

impl<'a> DepthFrame<'a> {
    fn new(step: &'a ReasoningStep) -> Self {
        Self {
            step,
            next: 0,
            deepest: 0,
        }
    }
}

/// Iterative depth computation.
///
/// Steps on the current path are gray and contribute 0. A finished step is
/// cached and never walked again, so a walker does O(V + E) work in total.
struct DepthWalker<'a> {
    chain: &'a ReasoningChain,
    done: HashMap<&'a str, usize>,
}

impl<'a> DepthWalker<'a> {
    fn new(chain: &'a ReasoningChain) -> Self {
        Self {
            chain,
            done: HashMap::new(),
        }
    }

    fn depth(&mut self, start: &'a ReasoningStep) -> usize {
        if start.is_root() {
            return 0;
        }
        if let Some(&d) = self.done.get(start.id()) {
            return d;
        }

        let mut on_path: HashSet<&'a str> = HashSet::new();
        let mut stack = vec![DepthFrame::new(start)];
        on_path.insert(start.id());
        let mut result = 0;

        while let Some(frame) = stack.last_mut() {
            let step = frame.step;
            let next = frame.next;
            frame.next += 1;

            if let Some(dep_id) = step.depends_on().get(next) {
                if on_path.contains(dep_id.as_str()) {
                    continue;
                }
                let Some(dep) = self.chain.get(dep_id) else {
                    continue;
                };
                if dep.is_root() {
                    continue;
                }
                if let Some(&d) = self.done.get(dep.id()) {
                    frame.deepest = frame.deepest.max(d);
                    continue;
                }
                on_path.insert(dep.id());
                stack.push(DepthFrame::new(dep));
                continue;
            }

            let Some(finished) = stack.pop() else { break };
            let depth = finished.deepest + 1;
            on_path.remove(finished.step.id());
            self.done.insert(finished.step.id(), depth);
            match stack.last_mut() {
                Some(parent) => parent.deepest = parent.deepest.max(depth),
                None => result = depth,
            }
        }

        result
    }
}

/// A chain's steps in topological order, paired with their depths.
///
/// This is the shape both renderers consume.
#[derive(Debug)]
pub struct ChainLayout<'a> {
    order: Vec<&'a ReasoningStep>,
    depths: HashMap<&'a str, usize>,
}

impl<'a> ChainLayout<'a> {
    pub fn compute(chain: &'a ReasoningChain) -> Self {
        Self {
            order: topological_order(chain),
            depths: depths(chain),
        }
    }

    /// Steps with their depth, in topological order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a ReasoningStep, usize)> + '_ {
        self.order
            .iter()
            .map(|step| (*step, self.depths.get(step.id()).copied().unwrap_or(0)))
    }

    pub fn order(&self) -> &[&'a ReasoningStep] {
        &self.order
    }

    pub fn depth(&self, id: &str) -> usize {
        self.depths.get(id).copied().unwrap_or(0)
    }

    /// Largest depth in the chain, 0 when empty.
    pub fn max_depth(&self) -> usize {
        self.depths.values().copied().max().unwrap_or(0)
    }
}
