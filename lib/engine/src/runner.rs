//! The run loop: entry resolution, traversal, step budget, trace assembly.

use crate::context::{Collaborators, EngineSettings, RunContext};
use crate::executors;
use crate::graph::FlowGraph;
use crate::node::NodeId;
use crate::parse::parse_graph;
use crate::policy::BranchPolicy;
use crate::report::RunReport;
use chrono::Utc;
use skein_core::RunId;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// The workflow execution engine.
///
/// One engine serves any number of runs; each [`Engine::execute`] call is
/// independent. Only two conditions fail a run: input that does not parse,
/// and a graph where every node has an incoming edge. Everything else
/// degrades to logged passthroughs inside the executors.
pub struct Engine {
    collaborators: Collaborators,
    settings: EngineSettings,
}

impl Engine {
    /// Creates an engine with default settings.
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            settings: EngineSettings::default(),
        }
    }

    /// Replaces the engine settings.
    #[must_use]
    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Parses a serialized `{nodes, edges}` graph and executes it.
    ///
    /// Malformed input fails fast; no partial execution is attempted.
    pub async fn execute_serialized(&self, input: &str, context: &RunContext) -> RunReport {
        let started_at = Utc::now();
        match parse_graph(input) {
            Ok(graph) => self.execute(&graph, context).await,
            Err(error) => {
                warn!(%error, "graph failed to parse");
                RunReport::failed(
                    format!("parse error: {error}"),
                    vec![format!("parse error: {error}")],
                    started_at,
                )
            }
        }
    }

    /// Executes a parsed graph.
    ///
    /// Traversal starts at the first in-degree-zero node in node-list
    /// order and follows one outgoing edge per step until a terminal node,
    /// a revisit, or the step ceiling. Revisits and the ceiling stop the
    /// run but do not fail it; the partial trace is still a success.
    pub async fn execute(&self, graph: &FlowGraph, context: &RunContext) -> RunReport {
        let run_id = RunId::new();
        let started_at = Utc::now();
        let mut logs = Vec::new();

        if graph.node_count() == 0 {
            logs.push("graph has no nodes; nothing to execute".to_string());
            return RunReport {
                run_id,
                success: true,
                message: "empty workflow".to_string(),
                logs,
                steps: 0,
                started_at,
                finished_at: Utc::now(),
            };
        }

        let entries = graph.entry_nodes();
        let Some(entry) = entries.first() else {
            logs.push("no entry node: every node has an incoming edge".to_string());
            return RunReport {
                run_id,
                success: false,
                message: "circular dependency detected".to_string(),
                logs,
                steps: 0,
                started_at,
                finished_at: Utc::now(),
            };
        };
        if entries.len() > 1 {
            logs.push(format!(
                "{} entry nodes found; starting at {} (first by node order)",
                entries.len(),
                entry.id
            ));
        }

        let mut carried = context.input.clone().unwrap_or_default();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut current = entry.id.clone();
        let mut steps = 0usize;

        loop {
            if steps >= self.settings.max_steps {
                logs.push(format!(
                    "step ceiling of {} reached; stopping",
                    self.settings.max_steps
                ));
                break;
            }
            if !visited.insert(current.clone()) {
                logs.push(format!("cycle detected at node {current}; stopping"));
                break;
            }
            let Some(node) = graph.get_node(&current) else {
                // Unreachable: `current` always comes from the graph itself.
                break;
            };

            logs.push(format!(
                "step {}: node {} ({})",
                steps + 1,
                node.id,
                node.config.kind_label()
            ));
            debug!(node = %node.id, kind = node.config.kind_label(), "executing node");

            let outcome =
                executors::dispatch(node, steps, &carried, context, &self.collaborators).await;
            carried = outcome.value;
            logs.extend(outcome.lines);
            steps += 1;

            let successors = graph.successors(&current);
            let Some((next, _)) = successors.first() else {
                break;
            };
            if successors.len() > 1 {
                match self.settings.branch_policy {
                    BranchPolicy::LinearOnly => logs.push(format!(
                        "node {current} has {} outgoing edges; following the first by edge order",
                        successors.len()
                    )),
                    policy => logs.push(format!(
                        "branch policy {policy} is not yet supported; following the first edge"
                    )),
                }
            }
            current = next.id.clone();
        }

        logs.push(format!("final value: {carried}"));
        info!(%run_id, steps, "run completed");

        RunReport {
            run_id,
            success: true,
            message: format!("workflow completed in {steps} steps"),
            logs,
            steps,
            started_at,
            finished_at: Utc::now(),
        }
    }
}
