//! Workflow execution engine.
//!
//! Takes a serialized node/edge graph plus optional run input, determines
//! execution order, dispatches each node to its executor, and produces an
//! ordered trace with a terminal success/failure result.
//!
//! The engine is deliberately forgiving: the only run-aborting failures are
//! malformed graph input and a graph with no entry node. Everything a node
//! executor can get wrong (missing keys, provider errors, incomplete
//! configuration) degrades to a logged passthrough so the rest of the run
//! still happens.
//!
//! Execution is single-threaded and strictly sequential; one node completes
//! before the next begins. Each [`Engine::execute`] call is independent and
//! shares no state with concurrent runs.

pub mod context;
pub mod edge;
pub mod error;
pub mod executors;
pub mod graph;
pub mod node;
pub mod parse;
pub mod policy;
pub mod report;
pub mod runner;
pub mod workflow;

pub use context::{Collaborators, EngineSettings, RunContext};
pub use edge::Edge;
pub use error::{GraphError, ParseError};
pub use graph::FlowGraph;
pub use node::{AiAgentConfig, MessagingConfig, Node, NodeConfig, NodeId, NotesConfig};
pub use parse::parse_graph;
pub use policy::BranchPolicy;
pub use report::RunReport;
pub use runner::Engine;
pub use workflow::Workflow;
