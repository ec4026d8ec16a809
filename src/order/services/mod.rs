//! Application services for order workflow orchestration.

mod workflow;

pub use workflow::{
    ImportDocument, ImportTaskItem, NewOrderRequest, OrderWorkflowService, StageColumn,
    WorkflowError, WorkflowResult,
};
