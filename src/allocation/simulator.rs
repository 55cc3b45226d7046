use log::{debug, info, warn};
use thiserror::Error;

use crate::linear_algebra::matrix::MatrixError;

use super::banker::SafetyReport;
use super::detector::{self, DeadlockReport};
use super::matrices::MatrixSet;
use super::node::{EdgeKind, NodeId, NodeKind};
use super::store::ResourceGraph;
use super::validation::{self, NamingRules, ValidationError};

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum SimulatorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl SimulatorError {
    pub fn is_validation(&self) -> bool {
        matches!(self,SimulatorError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T,SimulatorError>;

/// Entry point for a presentation layer.
///
/// Every input arrives as the raw text a user typed. Text is validated first and
/// the graph is only touched once every field passed, so a rejected call leaves
/// the state exactly as it was.
#[derive(Clone,Debug,Default)]
pub struct Simulator {
    graph:ResourceGraph
}

impl Simulator {
    pub fn new(rules:NamingRules) -> Self {
        Self {graph:ResourceGraph::with_rules(rules)}
    }

    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    pub fn add_process(&mut self,name:&str,arrival:&str,burst:&str) -> Result<NodeId> {
        // the name is judged before the numbers
        let added = validation::validate_name(name, NodeKind::Process, self.graph.rules())
            .and_then(|_| validation::parse_count("arrival time", arrival))
            .and_then(|arrival| Ok((arrival,validation::parse_count("burst time", burst)?)))
            .and_then(|(arrival,burst)| self.graph.add_process(name, arrival, burst));
        Ok(logged("add process", name, added)?)
    }

    pub fn add_resource(&mut self,name:&str,instances:&str) -> Result<NodeId> {
        let added = validation::validate_name(name, NodeKind::Resource, self.graph.rules())
            .and_then(|_| validation::parse_count("instance count", instances))
            .and_then(|instances| self.graph.add_resource(name, instances));
        Ok(logged("add resource", name, added)?)
    }

    // does not re-run detection, callers decide whether to
    pub fn set_resource_instances(&mut self,name:&str,instances:&str) -> Result<u64> {
        let previous = validation::parse_count("instance count", instances)
            .and_then(|instances| self.graph.set_resource_instances(name, instances));
        let previous = logged("set instances", name, previous)?;
        debug!("{} instances {previous} -> {}",name.trim(),instances.trim());
        Ok(previous)
    }

    pub fn add_edge(&mut self,from:&str,to:&str,kind:EdgeKind) -> Result<bool> {
        let label = format!("{} -> {}",from.trim(),to.trim());
        let is_new = logged(&format!("add {kind} edge"), &label, self.graph.add_edge(from, to, kind))?;
        if !is_new {
            debug!("edge {label} already present");
        }
        Ok(is_new)
    }

    pub fn add_request_edge(&mut self,process:&str,resource:&str) -> Result<bool> {
        self.add_edge(process, resource, EdgeKind::Request)
    }

    pub fn add_assignment_edge(&mut self,resource:&str,process:&str) -> Result<bool> {
        self.add_edge(resource, process, EdgeKind::Assignment)
    }

    pub fn reset(&mut self) {
        info!("reset, dropping {} nodes and {} edges",self.graph.nodes().len(),self.graph.edges().len());
        self.graph.reset();
    }

    pub fn check_deadlock(&self) -> DeadlockReport {
        let report = detector::find_cycle(&self.graph);
        match &report {
            DeadlockReport::Deadlocked(_) => warn!("deadlock detected: {report}"),
            DeadlockReport::NoCycle => info!("no deadlock"),
        }
        report
    }

    pub fn matrices(&self) -> Result<MatrixSet> {
        let set = MatrixSet::build(&self.graph)?;
        debug!("built {}x{} matrices",set.processes.len(),set.resources.len());
        Ok(set)
    }

    pub fn bankers(&self) -> Result<SafetyReport> {
        let report = self.matrices()?.safety()?;
        match &report {
            SafetyReport::Safe(sequence) => info!("safe state, sequence {}",sequence.join(" → ")),
            SafetyReport::Unsafe{finished} => warn!("unsafe state, only {:?} can finish",finished),
        }
        Ok(report)
    }
}

fn logged<T>(action:&str,subject:&str,result:validation::Result<T>) -> validation::Result<T> {
    match &result {
        Ok(_) => info!("{action} {}",subject.trim()),
        Err(err) => warn!("{action} {} rejected: {err}",subject.trim()),
    }
    result
}
