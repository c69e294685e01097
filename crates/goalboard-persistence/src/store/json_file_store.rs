use crate::metadata::{PersistenceMetadata, FORMAT_VERSION};
use crate::store::atomic_writer::AtomicWriter;
use async_trait::async_trait;
use goalboard_core::{GoalsError, GoalsResult};
use goalboard_domain::goal::sort_for_board;
use goalboard_domain::{
    goal_not_found, Goal, GoalId, GoalPatch, GoalStore, GoalTemplate, NewGoal, OwnerId,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Everything the board keeps on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalData {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub templates: Vec<GoalTemplate>,
}

/// On-disk file layout
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: GoalData,
}

/// `GoalStore` backed by a single JSON file.
///
/// Every call reads the file; mutations rewrite it atomically while holding
/// an async lock, so concurrent calls from one process never interleave.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    write_lock: Mutex<()>,
}

fn serialization_error(e: serde_json::Error) -> GoalsError {
    GoalsError::Serialization(e.to_string())
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_instance_id(path, Uuid::new_v4())
    }

    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
            write_lock: Mutex::new(()),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Current file contents. A missing file is an empty store.
    pub async fn load(&self) -> GoalsResult<GoalData> {
        let Some(bytes) = AtomicWriter::read_optional(&self.path).await? else {
            tracing::debug!("No data file at {}, starting empty", self.path.display());
            return Ok(GoalData::default());
        };

        let envelope: JsonEnvelope = serde_json::from_slice(&bytes).map_err(serialization_error)?;
        if envelope.version != FORMAT_VERSION {
            return Err(GoalsError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }
        Ok(envelope.data)
    }

    pub async fn save(&self, data: GoalData) -> GoalsResult<PersistenceMetadata> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(self.instance_id),
            data,
        };
        let json_bytes = serde_json::to_vec_pretty(&envelope).map_err(serialization_error)?;
        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!(
            "Saved {} goals to {}",
            envelope.data.goals.len(),
            self.path.display()
        );
        Ok(envelope.metadata)
    }

    /// Read-modify-write under the lock. Nothing is written when `change` fails.
    async fn mutate<T, F>(&self, change: F) -> GoalsResult<T>
    where
        F: FnOnce(&mut GoalData) -> GoalsResult<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut data = self.load().await?;
        let value = change(&mut data)?;
        self.save(data).await?;
        Ok(value)
    }

    pub async fn add_template(&self, template: GoalTemplate) -> GoalsResult<()> {
        self.mutate(|data| {
            data.templates.push(template);
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl GoalStore for JsonFileStore {
    async fn list(&self, owner_id: OwnerId) -> GoalsResult<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .load()
            .await?
            .goals
            .into_iter()
            .filter(|g| g.owner_id == owner_id)
            .collect();
        sort_for_board(&mut goals);
        Ok(goals)
    }

    async fn create(&self, goal: NewGoal) -> GoalsResult<Goal> {
        let goal = goal.into_goal();
        let created = goal.clone();
        self.mutate(move |data| {
            data.goals.push(goal);
            Ok(())
        })
        .await?;
        tracing::info!("Created goal {}", created.id);
        Ok(created)
    }

    async fn update(&self, owner_id: OwnerId, id: GoalId, patch: GoalPatch) -> GoalsResult<()> {
        self.mutate(move |data| {
            let goal = data
                .goals
                .iter_mut()
                .find(|g| g.id == id && g.owner_id == owner_id)
                .ok_or_else(|| goal_not_found(id))?;
            goal.apply_patch(patch);
            Ok(())
        })
        .await
    }

    async fn delete(&self, owner_id: OwnerId, id: GoalId) -> GoalsResult<()> {
        self.mutate(move |data| {
            let index = data
                .goals
                .iter()
                .position(|g| g.id == id && g.owner_id == owner_id)
                .ok_or_else(|| goal_not_found(id))?;
            data.goals.remove(index);
            Ok(())
        })
        .await
    }

    async fn templates(&self) -> GoalsResult<Vec<GoalTemplate>> {
        Ok(self.load().await?.templates)
    }
}
