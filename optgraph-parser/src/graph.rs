//! The requirement and incompatibility relations between the options of a parser.

use crate::error::ConfigError;
use crate::option::{OptionId, OptionSpec};

/// Adjacency lists indexed by option, in the order relations were added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintGraph {
    requires: Vec<Vec<OptionId>>,
    incompatible: Vec<Vec<OptionId>>,
}

impl ConstraintGraph {
    /// Number of options in the graph.
    pub fn len(&self) -> usize {
        self.requires.len()
    }

    /// Whether the graph has no option.
    pub fn is_empty(&self) -> bool {
        self.requires.is_empty()
    }

    /// The options that must be given together with `id`.
    pub fn requires(&self, id: OptionId) -> &[OptionId] {
        self.requires.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The options that cannot be given together with `id`.
    pub fn incompatible(&self, id: OptionId) -> &[OptionId] {
        self.incompatible.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn add_node(&mut self) -> OptionId {
        self.requires.push(Vec::new());
        self.incompatible.push(Vec::new());
        OptionId(self.requires.len() - 1)
    }

    pub(crate) fn contains(&self, id: OptionId) -> bool {
        id.0 < self.len()
    }

    pub(crate) fn add_requirement(&mut self, from: OptionId, to: OptionId) {
        push_unique(&mut self.requires[from.0], to);
    }

    /// Both sides of the pair are linked.
    pub(crate) fn add_incompatibility(&mut self, a: OptionId, b: OptionId) {
        push_unique(&mut self.incompatible[a.0], b);
        push_unique(&mut self.incompatible[b.0], a);
    }

    /// Reject relations that no command line can satisfy, or that cannot terminate.
    pub(crate) fn check(&self, options: &[OptionSpec]) -> Result<(), ConfigError> {
        let name = |id: OptionId| options[id.0].long().to_string();

        for index in 0..self.len() {
            let id = OptionId(index);

            if self.requires(id).contains(&id) {
                return Err(ConfigError::SelfRequirement(name(id)));
            }

            if self.incompatible(id).contains(&id) {
                return Err(ConfigError::SelfIncompatibility(name(id)));
            }

            // Incompatibilities are symmetric, so checking the requirements of every option
            // covers both directions.
            if let Some(&other) = self
                .requires(id)
                .iter()
                .find(|other| self.incompatible(id).contains(*other))
            {
                return Err(ConfigError::ContradictoryConstraint(name(id), name(other)));
            }
        }

        if let Some(cycle) = self.find_cycle() {
            return Err(ConfigError::RequirementCycle(
                cycle.into_iter().map(name).collect(),
            ));
        }

        Ok(())
    }

    /// Depth first search over the requirements, returning the first cycle found.
    fn find_cycle(&self) -> Option<Vec<OptionId>> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        let mut marks = vec![Mark::New; self.len()];

        for start in 0..self.len() {
            if marks[start] != Mark::New {
                continue;
            }

            // Each frame is a node and the index of its next requirement to visit.
            let mut stack = vec![(OptionId(start), 0)];
            marks[start] = Mark::Active;

            while let Some(top) = stack.len().checked_sub(1) {
                let (node, next) = stack[top];
                let Some(&child) = self.requires(node).get(next) else {
                    marks[node.0] = Mark::Done;
                    stack.pop();
                    continue;
                };
                stack[top].1 += 1;

                match marks[child.0] {
                    Mark::New => {
                        marks[child.0] = Mark::Active;
                        stack.push((child, 0));
                    }
                    Mark::Active => {
                        let from = stack.iter().position(|(n, _)| *n == child).unwrap_or(0);
                        let mut cycle: Vec<_> = stack[from..].iter().map(|(n, _)| *n).collect();
                        cycle.push(child);
                        return Some(cycle);
                    }
                    Mark::Done => {}
                }
            }
        }

        None
    }
}

fn push_unique(list: &mut Vec<OptionId>, id: OptionId) {
    if !list.contains(&id) {
        list.push(id);
    }
}
