/// Goal commands: add, complete, reopen, delete, list

use serde::{Deserialize, Serialize};

use crate::commands::{parse_id, StatusResponse};
use crate::domain::{Goal, GoalId};
use crate::storage::JournalStorage;
use crate::JournalError;

/// Parameters for adding a goal
#[derive(Debug, Deserialize)]
pub struct AddGoalParams {
    pub text: String,
}

/// Response from adding a goal
#[derive(Debug, Serialize)]
pub struct AddGoalResponse {
    pub success: bool,
    pub goal_id: String,
    pub message: String,
}

pub fn add_goal<S: JournalStorage>(
    storage: &S,
    params: AddGoalParams,
) -> Result<AddGoalResponse, JournalError> {
    let goal = Goal::new(params.text)?;
    storage.insert_goal(&goal)?;

    Ok(AddGoalResponse {
        success: true,
        goal_id: goal.id.to_string(),
        message: format!("Meta agregada: {}", goal.text),
    })
}

/// Parameters for changing a goal's state
#[derive(Debug, Deserialize)]
pub struct SetGoalParams {
    pub goal_id: String,
    pub completed: bool,
}

/// Mark a goal as achieved or pending again
pub fn set_goal_completed<S: JournalStorage>(
    storage: &S,
    params: SetGoalParams,
) -> Result<StatusResponse, JournalError> {
    let goal_id = parse_id(&params.goal_id, "meta", GoalId::from_string)?;
    storage.update_goal_completion(&goal_id, params.completed)?;

    let state = if params.completed { "lograda" } else { "pendiente" };
    Ok(StatusResponse {
        success: true,
        message: format!("Meta {} marcada como {}", goal_id, state),
    })
}

/// Parameters for deleting a goal
#[derive(Debug, Deserialize)]
pub struct DeleteGoalParams {
    pub goal_id: String,
}

pub fn delete_goal<S: JournalStorage>(
    storage: &S,
    params: DeleteGoalParams,
) -> Result<StatusResponse, JournalError> {
    let goal_id = parse_id(&params.goal_id, "meta", GoalId::from_string)?;
    storage.delete_goal(&goal_id)?;

    Ok(StatusResponse {
        success: true,
        message: format!("Meta {} borrada", goal_id),
    })
}

#[derive(Debug, Serialize)]
pub struct GoalSummary {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub status: &'static str,
}

/// Response from listing goals
#[derive(Debug, Serialize)]
pub struct ListGoalsResponse {
    pub goals: Vec<GoalSummary>,
    pub completed_count: usize,
    pub total_count: usize,
}

pub fn list_goals<S: JournalStorage>(storage: &S) -> Result<ListGoalsResponse, JournalError> {
    let goals: Vec<GoalSummary> = storage
        .list_goals()?
        .into_iter()
        .map(|g| GoalSummary {
            id: g.id.to_string(),
            status: g.status_label(),
            text: g.text,
            completed: g.completed,
        })
        .collect();

    Ok(ListGoalsResponse {
        completed_count: goals.iter().filter(|g| g.completed).count(),
        total_count: goals.len(),
        goals,
    })
}
