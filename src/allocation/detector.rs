use std::fmt::Display;

use super::store::ResourceGraph;

#[derive(Clone,Debug,PartialEq,Eq)]
pub enum DeadlockReport {
    NoCycle,
    // node names, first name repeated at the end
    Deadlocked(Vec<String>)
}

impl DeadlockReport {
    pub fn is_deadlocked(&self) -> bool {
        matches!(self,DeadlockReport::Deadlocked(_))
    }
    pub fn cycle(&self) -> Option<&[String]> {
        match self {
            DeadlockReport::Deadlocked(cycle) => Some(cycle),
            DeadlockReport::NoCycle => None
        }
    }
}

impl Display for DeadlockReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeadlockReport::NoCycle => write!(f,"No cycles detected."),
            DeadlockReport::Deadlocked(cycle) => write!(f,"Cycle: {}",cycle.join(" → ")),
        }
    }
}

// Instance counts are ignored: with single-instance semantics any cycle of
// requests and assignments is a deadlock.
pub fn find_cycle(graph:&ResourceGraph) -> DeadlockReport {
    let Some(cycle) = graph.graph().find_cycle()
        else {return DeadlockReport::NoCycle};
    let names = cycle.iter()
        .filter_map(|id| graph.node_by_id(*id))
        .map(|n| n.name().to_owned())
        .collect();
    DeadlockReport::Deadlocked(names)
}
