use std::fmt::Display;

// index into the store's node list, also the id used in the underlying DirectedGraph
pub type NodeId = usize;

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum NodeKind {
    Process,
    Resource
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Process => write!(f,"process"),
            NodeKind::Resource => write!(f,"resource"),
        }
    }
}

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum NodeData {
    // arrival and burst are recorded only, no algorithm reads them
    Process{arrival:u64,burst:u64},
    Resource{instances:u64}
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Node {
    pub(crate) id:NodeId,
    pub(crate) name:String,
    // position among nodes of the same kind, in creation order
    pub(crate) ordinal:usize,
    pub(crate) data:NodeData
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
    pub fn data(&self) -> NodeData {
        self.data
    }
    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Process{..} => NodeKind::Process,
            NodeData::Resource{..} => NodeKind::Resource,
        }
    }
    pub fn instances(&self) -> Option<u64> {
        match self.data {
            NodeData::Resource{instances} => Some(instances),
            NodeData::Process{..} => None
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.data {
            NodeData::Process{arrival,burst} => write!(f,"{} (process, arrival {arrival}, burst {burst})",self.name),
            NodeData::Resource{instances} => write!(f,"{} (resource, instances {instances})",self.name),
        }
    }
}

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum EdgeKind {
    // process waits for a unit of a resource
    Request,
    // resource unit held by a process
    Assignment
}

impl EdgeKind {
    // (from,to) kinds an edge of this kind must connect
    pub fn direction(&self) -> (NodeKind,NodeKind) {
        match self {
            EdgeKind::Request => (NodeKind::Process,NodeKind::Resource),
            EdgeKind::Assignment => (NodeKind::Resource,NodeKind::Process),
        }
    }
}

impl Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeKind::Request => write!(f,"request"),
            EdgeKind::Assignment => write!(f,"assignment"),
        }
    }
}

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub struct Edge {
    pub from:NodeId,
    pub to:NodeId,
    pub kind:EdgeKind
}
