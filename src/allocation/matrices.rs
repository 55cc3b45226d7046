use std::collections::HashMap;
use std::fmt::Display;

use crate::linear_algebra::matrix::{Matrix, Result};

use super::banker::{self, Safety, SafetyReport};
use super::node::{EdgeKind, NodeId};
use super::store::ResourceGraph;

/// Allocation state derived from a [`ResourceGraph`].
///
/// Rows are processes and columns are resources, both sorted by name. Nothing
/// here is stored back into the graph; build a fresh set after every mutation.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct MatrixSet {
    pub processes:Vec<String>,
    pub resources:Vec<String>,
    pub allocation:Matrix,
    // 1 where a request edge exists, 0 elsewhere
    pub request:Matrix,
    // every process claims every resource unless told otherwise,
    // request edges then set their cell to 1 again
    pub max:Matrix,
    // max - allocation, negative cells are kept
    pub need:Matrix,
    // instances minus allocated units, may go negative
    pub available:Vec<i64>
}

impl MatrixSet {
    pub fn build(graph:&ResourceGraph) -> Result<Self> {
        let processes = graph.processes();
        let resources = graph.resources();
        let (p_len,r_len) = (processes.len(),resources.len());

        let row_of:HashMap<NodeId,usize> = processes.iter().enumerate().map(|(i,n)| (n.id(),i)).collect();
        let col_of:HashMap<NodeId,usize> = resources.iter().enumerate().map(|(j,n)| (n.id(),j)).collect();

        let mut allocation = Matrix::zeros(p_len, r_len);
        let mut request = Matrix::zeros(p_len, r_len);
        let mut max = Matrix::filled(p_len, r_len, 1);
        let mut available:Vec<i64> = resources.iter()
            // the store caps counts at i64::MAX
            .map(|r| r.instances().map_or(0, |n| i64::try_from(n).unwrap_or(i64::MAX)))
            .collect();

        for edge in graph.edges() {
            match edge.kind {
                EdgeKind::Request => {
                    let (i,j) = (row_of[&edge.from],col_of[&edge.to]);
                    request.set(i, j, 1)?;
                    max.set(i, j, 1)?;
                }
                EdgeKind::Assignment => {
                    let (i,j) = (row_of[&edge.to],col_of[&edge.from]);
                    allocation.set(i, j, 1)?;
                    available[j] -= 1;
                }
            }
        }
        let need = max.try_sub(&allocation)?;

        Ok(Self {
            processes:processes.iter().map(|n| n.name().to_owned()).collect(),
            resources:resources.iter().map(|n| n.name().to_owned()).collect(),
            allocation,
            request,
            max,
            need,
            available
        })
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty() && self.resources.is_empty()
    }

    // Banker's safety check over this state, indices mapped back to process names
    pub fn safety(&self) -> Result<SafetyReport> {
        let report = match banker::find_safe_sequence(&self.allocation, &self.need, &self.available)? {
            Safety::Safe(sequence) => SafetyReport::Safe(self.names_of(&sequence)),
            Safety::Unsafe{finished} => SafetyReport::Unsafe{finished:self.names_of(&finished)}
        };
        Ok(report)
    }

    fn names_of(&self,rows:&[usize]) -> Vec<String> {
        rows.iter().map(|i| self.processes[*i].clone()).collect()
    }

    fn write_table(&self,f:&mut std::fmt::Formatter<'_>,title:&str,matrix:&Matrix) -> std::fmt::Result {
        writeln!(f,"{title}")?;
        let width = self.column_width();
        write!(f,"{:width$}","")?;
        for r in &self.resources {
            write!(f," {r:>width$}")?;
        }
        writeln!(f)?;
        for (p,row) in self.processes.iter().zip(matrix.rows()) {
            write!(f,"{p:width$}")?;
            for n in row {
                write!(f," {n:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn column_width(&self) -> usize {
        self.processes.iter().chain(self.resources.iter())
            .map(|s| s.chars().count())
            .chain(self.available.iter().map(|n| n.to_string().len()))
            .max()
            .unwrap_or(1)
            .max(2)
    }
}

impl Display for MatrixSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_table(f, "Allocation Matrix", &self.allocation)?;
        self.write_table(f, "Request Matrix", &self.request)?;
        self.write_table(f, "Max Matrix", &self.max)?;
        self.write_table(f, "Need Matrix", &self.need)?;
        writeln!(f,"Available Vector")?;
        let width = self.column_width();
        let header:Vec<String> = self.resources.iter().map(|r| format!("{r:>width$}")).collect();
        writeln!(f,"{}",header.join(" "))?;
        let values:Vec<String> = self.available.iter().map(|n| format!("{n:>width$}")).collect();
        write!(f,"{}",values.join(" "))
    }
}
