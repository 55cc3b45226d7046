use std::collections::HashMap;

use crate::dsa::graph::DirectedGraph;

use super::node::{Edge, EdgeKind, Node, NodeData, NodeId, NodeKind};
use super::validation::{self, NamingRules, Result, ValidationError};

// Owns every process, resource and edge of one simulation.
// node ids are indices into `nodes` and double as DirectedGraph ids,
// so ascending id order is creation order
#[derive(Clone,Debug,Default)]
pub struct ResourceGraph {
    rules:NamingRules,
    nodes:Vec<Node>,
    names:HashMap<String,NodeId>,
    edges:Vec<Edge>,
    graph:DirectedGraph,
    process_count:usize,
    resource_count:usize
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_rules(rules:NamingRules) -> Self {
        Self {rules,..Self::default()}
    }
    pub fn rules(&self) -> &NamingRules {
        &self.rules
    }

    pub fn add_process(&mut self,name:&str,arrival:u64,burst:u64) -> Result<NodeId> {
        let name = self.fresh_name(name, NodeKind::Process)?;
        let ordinal = self.process_count;
        self.process_count += 1;
        Ok(self.insert_node(name, ordinal, NodeData::Process { arrival, burst }))
    }

    pub fn add_resource(&mut self,name:&str,instances:u64) -> Result<NodeId> {
        let name = self.fresh_name(name, NodeKind::Resource)?;
        let instances = validation::check_count("instances", instances)?;
        let ordinal = self.resource_count;
        self.resource_count += 1;
        Ok(self.insert_node(name, ordinal, NodeData::Resource { instances }))
    }

    // returns the previous count
    pub fn set_resource_instances(&mut self,name:&str,instances:u64) -> Result<u64> {
        let name = name.trim();
        let unknown = || ValidationError::UnknownResource { name: name.to_owned() };
        let id = *self.names.get(name).ok_or_else(unknown)?;
        let instances = validation::check_count("instances", instances)?;
        match &mut self.nodes[id].data {
            NodeData::Resource { instances:current } => {
                Ok(std::mem::replace(current, instances))
            }
            NodeData::Process{..} => Err(unknown())
        }
    }

    // returns false if the edge was already present
    pub fn add_edge(&mut self,from:&str,to:&str,kind:EdgeKind) -> Result<bool> {
        let from = self.lookup(from)?;
        let to = self.lookup(to)?;
        validation::check_direction(kind, (from.name.as_str(),from.kind()), (to.name.as_str(),to.kind()))?;
        let (from,to) = (from.id,to.id);

        if !self.graph.push_pair(from, to) {
            // direction is fixed by node kinds, so an existing pair already has this kind
            debug_assert!(self.edges.contains(&Edge { from, to, kind }));
            return Ok(false)
        }
        self.edges.push(Edge { from, to, kind });
        Ok(true)
    }

    pub fn reset(&mut self) {
        self.nodes.clear();
        self.names.clear();
        self.edges.clear();
        self.graph.clear();
        self.process_count = 0;
        self.resource_count = 0;
    }

    // creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    // creation order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    pub fn node(&self,name:&str) -> Option<&Node> {
        self.names.get(name.trim()).map(|id| &self.nodes[*id])
    }
    pub fn node_by_id(&self,id:NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    // sorted by name
    pub fn processes(&self) -> Vec<&Node> {
        self.sorted_of_kind(NodeKind::Process)
    }
    // sorted by name
    pub fn resources(&self) -> Vec<&Node> {
        self.sorted_of_kind(NodeKind::Resource)
    }
    pub(crate) fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    fn sorted_of_kind(&self,kind:NodeKind) -> Vec<&Node> {
        let mut of_kind:Vec<&Node> = self.nodes.iter().filter(|n| n.kind() == kind).collect();
        of_kind.sort_by(|a,b| a.name.cmp(&b.name));
        of_kind
    }

    fn lookup(&self,name:&str) -> Result<&Node> {
        self.node(name).ok_or_else(|| ValidationError::UnknownNode { name: name.trim().to_owned() })
    }

    fn fresh_name(&self,raw:&str,kind:NodeKind) -> Result<String> {
        let name = validation::validate_name(raw, kind, &self.rules)?;
        if self.names.contains_key(&name) {
            return Err(ValidationError::DuplicateName { name })
        }
        Ok(name)
    }

    fn insert_node(&mut self,name:String,ordinal:usize,data:NodeData) -> NodeId {
        let id = self.nodes.len();
        self.graph.push_node(id);
        self.names.insert(name.clone(), id);
        self.nodes.push(Node { id, name, ordinal, data });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_node_graph() -> ResourceGraph {
        let mut graph = ResourceGraph::new();
        graph.add_process("P1", 0, 5).unwrap();
        graph.add_process("P2", 1, 3).unwrap();
        graph.add_resource("R1", 1).unwrap();
        graph.add_resource("R2", 1).unwrap();
        graph
    }

    #[test]
    fn test_add_nodes() {
        let graph = four_node_graph();
        assert_eq!(graph.nodes().len(),4);
        let p2 = graph.node("P2").unwrap();
        assert_eq!(p2.kind(),NodeKind::Process);
        assert_eq!(p2.ordinal(),1);
        assert_eq!(p2.data(),NodeData::Process { arrival: 1, burst: 3 });
        let r1 = graph.node(" R1").unwrap();
        assert_eq!(r1.ordinal(),0);
        assert_eq!(r1.instances(),Some(1));
    }

    #[test]
    fn test_names_unique_across_kinds() {
        let rules = NamingRules {process_prefix:"X".into(),resource_prefix:"X".into()};
        let mut graph = ResourceGraph::with_rules(rules);
        graph.add_process("X1", 0, 0).unwrap();
        assert_eq!(graph.add_resource("X1", 1),Err(ValidationError::DuplicateName { name: "X1".into() }));
        assert_eq!(graph.add_process("X1", 0, 0),Err(ValidationError::DuplicateName { name: "X1".into() }));
        assert_eq!(graph.nodes().len(),1);
    }

    #[test]
    fn test_prefix_required() {
        let mut graph = ResourceGraph::new();
        assert!(matches!(graph.add_process("R1", 0, 0),Err(ValidationError::InvalidName{..})));
        assert!(matches!(graph.add_resource("P1", 0),Err(ValidationError::InvalidName{..})));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_edge_direction() {
        let mut graph = four_node_graph();
        assert_eq!(graph.add_edge("P1", "R1", EdgeKind::Request),Ok(true));
        assert!(matches!(graph.add_edge("R1", "P1", EdgeKind::Request),Err(ValidationError::WrongDirection{..})));
        assert_eq!(graph.add_edge("R1", "P2", EdgeKind::Assignment),Ok(true));
        assert!(matches!(graph.add_edge("P2", "R1", EdgeKind::Assignment),Err(ValidationError::WrongDirection{..})));
        assert!(graph.add_edge("P1", "P2", EdgeKind::Request).is_err());
        assert_eq!(graph.edges().len(),2);
    }

    #[test]
    fn test_edge_unknown_endpoint() {
        let mut graph = four_node_graph();
        assert_eq!(graph.add_edge("P1", "R9", EdgeKind::Request),Err(ValidationError::UnknownNode { name: "R9".into() }));
        assert_eq!(graph.add_edge("P9", "R1", EdgeKind::Request),Err(ValidationError::UnknownNode { name: "P9".into() }));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_edge_readd_is_idempotent() {
        let mut graph = four_node_graph();
        assert_eq!(graph.add_edge("P1", "R1", EdgeKind::Request),Ok(true));
        assert_eq!(graph.add_edge("P1", "R1", EdgeKind::Request),Ok(false));
        assert_eq!(graph.edges().len(),1);
        assert_eq!(graph.graph().edges_len(),1);
    }

    #[test]
    fn test_set_instances() {
        let mut graph = four_node_graph();
        assert_eq!(graph.set_resource_instances("R2", 4),Ok(1));
        assert_eq!(graph.node("R2").unwrap().instances(),Some(4));
        assert_eq!(graph.set_resource_instances("P1", 4),Err(ValidationError::UnknownResource { name: "P1".into() }));
        assert_eq!(graph.set_resource_instances("R7", 4),Err(ValidationError::UnknownResource { name: "R7".into() }));
    }

    #[test]
    fn test_instances_above_i64_rejected() {
        let mut graph = four_node_graph();
        let too_many = i64::MAX as u64 + 1;
        assert!(matches!(graph.add_resource("R3", too_many),Err(ValidationError::InvalidNumber{..})));
        assert!(graph.node("R3").is_none());
        assert!(matches!(graph.set_resource_instances("R1", u64::MAX),Err(ValidationError::InvalidNumber{..})));
        assert_eq!(graph.node("R1").unwrap().instances(),Some(1));
    }

    #[test]
    fn test_sorted_views() {
        let mut graph = ResourceGraph::new();
        for name in ["P2","P10","P1"] {graph.add_process(name, 0, 0).unwrap();}
        graph.add_resource("Rb", 1).unwrap();
        graph.add_resource("Ra", 1).unwrap();
        let processes:Vec<&str> = graph.processes().iter().map(|n| n.name()).collect();
        assert_eq!(processes,vec!["P1","P10","P2"]);
        let resources:Vec<&str> = graph.resources().iter().map(|n| n.name()).collect();
        assert_eq!(resources,vec!["Ra","Rb"]);
    }

    #[test]
    fn test_reset() {
        let mut graph = four_node_graph();
        graph.add_edge("P1", "R1", EdgeKind::Request).unwrap();
        graph.reset();
        assert!(graph.is_empty());
        assert!(graph.edges().is_empty());
        assert!(graph.graph().is_empty());
        let id = graph.add_process("P1", 0, 0).unwrap();
        assert_eq!(id,0);
        assert_eq!(graph.node("P1").unwrap().ordinal(),0);
    }
}
