use serde::Deserialize;
use thiserror::Error;

use super::node::{EdgeKind, NodeKind};

// every variant is raised before the store is touched
#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ValidationError {
    #[error("Invalid {kind} name {name:?}: must start with {prefix:?}")]
    InvalidName{name:String,kind:NodeKind,prefix:String},
    #[error("Duplicate node name {name:?}")]
    DuplicateName{name:String},
    #[error("{field} must be a non-negative integer, got {value:?}")]
    InvalidNumber{field:&'static str,value:String},
    #[error("Unknown node {name:?}")]
    UnknownNode{name:String},
    #[error("Unknown resource {name:?}")]
    UnknownResource{name:String},
    #[error("{kind} edges must go from {} to {}, got {from:?} -> {to:?}", .kind.direction().0, .kind.direction().1)]
    WrongDirection{kind:EdgeKind,from:String,to:String},
}

pub type Result<T> = std::result::Result<T,ValidationError>;

/// Name prefixes a node must carry at creation.
///
/// The prefix is only checked when a node is added; afterwards the node's kind
/// tag is authoritative.
#[derive(Clone,Debug,PartialEq,Eq,Deserialize)]
#[serde(default)]
pub struct NamingRules {
    pub process_prefix:String,
    pub resource_prefix:String
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {process_prefix:"P".into(),resource_prefix:"R".into()}
    }
}

impl NamingRules {
    pub fn prefix(&self,kind:NodeKind) -> &str {
        match kind {
            NodeKind::Process => &self.process_prefix,
            NodeKind::Resource => &self.resource_prefix,
        }
    }
}

// trims surrounding whitespace, returns the name to store
pub fn validate_name(raw:&str,kind:NodeKind,rules:&NamingRules) -> Result<String> {
    let name = raw.trim();
    let prefix = rules.prefix(kind);
    if name.is_empty() || !name.starts_with(prefix) {
        return Err(ValidationError::InvalidName { name: name.to_owned(), kind, prefix: prefix.to_owned() })
    }
    Ok(name.to_owned())
}

// largest count a node may carry, matrices hold counts as i64
pub const MAX_COUNT:u64 = i64::MAX as u64;

// integers from 0 to MAX_COUNT are accepted, "+3" and "-0" included
pub fn parse_count(field:&'static str,raw:&str) -> Result<u64> {
    let invalid = || ValidationError::InvalidNumber { field, value: raw.to_owned() };
    let trimmed = raw.trim();
    let n = match trimmed.parse::<u64>() {
        Ok(n) => n,
        Err(_) if trimmed.parse::<i128>() == Ok(0) => 0,
        Err(_) => return Err(invalid())
    };
    check_count(field, n).map_err(|_| invalid())
}

pub fn check_count(field:&'static str,n:u64) -> Result<u64> {
    if n > MAX_COUNT {
        return Err(ValidationError::InvalidNumber { field, value: n.to_string() })
    }
    Ok(n)
}

pub fn check_direction(kind:EdgeKind,from:(&str,NodeKind),to:(&str,NodeKind)) -> Result<()> {
    if (from.1,to.1) != kind.direction() {
        return Err(ValidationError::WrongDirection { kind, from: from.0.to_owned(), to: to.0.to_owned() })
    }
    Ok(())
}
