use crate::err::{ConfError, RecogError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which vertex of the graph's iteration order seeds the first sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartPolicy {
    #[default]
    First,
    Last,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecogConf {
    pub start: StartPolicy,
    /// rebuild the intersection graph of a found model and compare it with the input
    pub verify_model: bool,
    pub max_vertices: Option<usize>,
    pub max_edges: Option<usize>,
}

impl FromStr for RecogConf {
    type Err = ConfError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl RecogConf {
    pub fn to_toml(&self) -> std::result::Result<String, ConfError> {
        Ok(toml::to_string(self)?)
    }

    pub(crate) fn check_limits(&self, vertices: usize, edges: usize) -> Result<()> {
        let checks = [("vertices", vertices, self.max_vertices), ("edges", edges, self.max_edges)];
        for (what, found, limit) in checks {
            if let Some(limit) = limit.filter(|&limit| found > limit) {
                log::warn!("rejecting a graph with {} {} (limit {})", found, what, limit);
                return Err(RecogError::TooLarge { what, found, limit });
            }
        }
        Ok(())
    }
}
