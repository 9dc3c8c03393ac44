//! Team member type definitions

use prikazy_types::IntAdr;
use serde::{Deserialize, Serialize};

/// Member of the team assigned to a work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(rename = "INT_ADR")]
    pub int_adr: IntAdr,
    pub name: String,
    #[serde(rename = "isLeader", default)]
    pub is_leader: bool,
}
