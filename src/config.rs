//! Serde-backed descriptions of models, loadable from JSON.

use crate::common::defs::*;
use crate::common::geometry::Cell;
use crate::errors::*;
use crate::mdps::grid::Grid;
use crate::mdps::table::TableMdp;
use crate::mdps::terminal::TerminalAwareMdp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

fn default_gamma() -> f64 {
    DEFAULT_GAMMA
}

/// A grid world: reward rows top first (`null` is a wall), terminal cells as `[x, y]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub grid: Grid,

    #[serde(default)]
    pub terminals: Vec<Cell>,

    #[serde(default)]
    pub init: Cell,

    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

impl GridConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&read(path.as_ref())?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionsConfig {
    Shared(Vec<String>),
    PerState(HashMap<String, Vec<String>>),
}

impl From<ActionsConfig> for Actions<String, String> {
    fn from(value: ActionsConfig) -> Self {
        match value {
            ActionsConfig::Shared(actions) => Actions::Shared(actions),
            ActionsConfig::PerState(actions) => Actions::PerState(actions),
        }
    }
}

/// A table MDP with string states and actions.
///
/// `transitions` is kept as raw JSON of the shape
/// `{"state": {"action": [[p, "next"], ...]}}` and parsed on build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub init: String,

    pub actions: ActionsConfig,

    #[serde(default)]
    pub terminals: Vec<String>,

    #[serde(default)]
    pub transitions: Option<Value>,

    #[serde(default)]
    pub reward: Option<HashMap<String, f64>>,

    #[serde(default)]
    pub states: Option<Vec<String>>,

    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

impl TableConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&read(path.as_ref())?)
    }

    pub fn build(self) -> Result<TableMdp<String, String>> {
        let transitions = self
            .transitions
            .as_ref()
            .map(parse_transitions)
            .transpose()?;

        TableMdp::new(
            self.init,
            self.actions.into(),
            self.terminals.into_iter().collect(),
            transitions,
            self.reward,
            self.states.map(|s| s.into_iter().collect::<HashSet<_>>()),
            Some(self.gamma),
        )
    }

    pub fn build_terminal_aware(self) -> Result<TerminalAwareMdp<String, String>> {
        self.build().map(TerminalAwareMdp::new)
    }
}

/// Parse `{"state": {"action": [[p, "next"], ...]}}`.
pub fn parse_transitions(value: &Value) -> Result<Transitions<String, String>> {
    if !value.is_object() {
        return Err(MdpError::InvalidConfiguration(format!(
            "Transitions must be a mapping of state to action to outcomes, got {value}."
        )));
    }

    let raw = serde_json::from_value::<HashMap<String, HashMap<String, Vec<(f64, String)>>>>(
        value.clone(),
    )?;

    Ok(raw
        .into_iter()
        .map(|(s, by_action)| {
            let by_action = by_action
                .into_iter()
                .map(|(a, ts)| (a, ts.into_iter().map(Transition::from).collect::<Vec<_>>()))
                .collect::<HashMap<_, _>>();
            (s, by_action)
        })
        .collect())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| MdpError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdps::grid::GridMdp;
    use crate::mdps::Mdp;
    use float_eq::*;
    use serde_json::json;

    #[test]
    fn grid_config_fills_defaults() {
        let config = GridConfig::from_json(r#"{"grid": [[-0.04, null], [-0.04, 1.0]]}"#).unwrap();

        assert_eq!(config.init, (0, 0));
        assert!(config.terminals.is_empty());
        assert_float_eq!(config.gamma, 0.9, abs <= 0.);
        assert_eq!(config.grid[0], vec![Some(-0.04), None]);
    }

    #[test]
    fn grid_config_builds_grid_mdp() {
        let config = GridConfig::from_json(
            r#"{"grid": [[-0.04, 1.0], [-0.04, -0.04]], "terminals": [[1, 1]], "gamma": 1.0}"#,
        )
        .unwrap();

        let mdp = GridMdp::from_config(&config).unwrap();

        assert_eq!(mdp.terminals(), &HashSet::from([(1, 1)]));
        assert_float_eq!(mdp.reward(&(1, 1)).unwrap(), 1., abs <= 0.);
        mdp.check_consistency().unwrap();
    }

    #[test]
    fn table_config_builds_both_table_variants() {
        let json = json!({
            "init": "a",
            "actions": {"a": ["go"]},
            "terminals": ["b"],
            "transitions": {"a": {"go": [[0.5, "b"], [0.5, "a"]]}},
            "reward": {"a": 0.0, "b": 1.0},
        })
        .to_string();

        let table = TableConfig::from_json(&json).unwrap().build().unwrap();
        let aware = TableConfig::from_json(&json)
            .unwrap()
            .build_terminal_aware()
            .unwrap();

        table.check_consistency().unwrap();
        assert_eq!(table.actions(&"a".to_string()), vec![Some("go".to_string())]);
        assert_eq!(
            table.transition(&"a".to_string(), Some(&"go".to_string())).unwrap().len(),
            2
        );
        assert_eq!(
            aware.transition(&"b".to_string(), None).unwrap().as_ref(),
            &[Transition::new(0., "b".to_string())]
        );
    }

    #[test]
    fn non_mapping_transitions_are_invalid() {
        let err = parse_transitions(&json!([[1.0, "a"]])).unwrap_err();

        assert!(matches!(err, MdpError::InvalidConfiguration(_)));
    }

    #[test]
    fn malformed_outcomes_are_json_errors() {
        let err = parse_transitions(&json!({"a": {"go": [["x", "a"]]}})).unwrap_err();

        assert!(matches!(err, MdpError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GridConfig::from_path("/definitely/not/here.json").unwrap_err();

        assert!(matches!(err, MdpError::Io { .. }));
    }
}
