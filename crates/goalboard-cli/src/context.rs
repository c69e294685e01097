use goalboard_domain::{BoardContext, BoardController, OwnerId, RollbackPolicy};
use goalboard_persistence::JsonFileStore;
use std::path::Path;

pub type GoalBoard = BoardController<JsonFileStore>;

pub fn open_board(file: &Path, owner_id: OwnerId, policy: RollbackPolicy) -> GoalBoard {
    BoardController::new(JsonFileStore::new(file), BoardContext::new(owner_id)).with_policy(policy)
}

/// Board loaded for a single scripted command.
pub struct CliContext {
    pub board: GoalBoard,
}

impl CliContext {
    pub async fn load(file: &Path, owner_id: OwnerId, policy: RollbackPolicy) -> Self {
        let mut board = open_board(file, owner_id, policy);
        let count = board.load().await;
        tracing::debug!("Loaded {} goals from {}", count, file.display());
        Self { board }
    }
}
