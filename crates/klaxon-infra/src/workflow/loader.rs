//! Workflow definition loader.
//!
//! Reads every `.yaml`/`.yml` file in a directory into [`Workflow`]
//! definitions, sorted by file name for a stable registration order.
//! A missing directory yields an empty set; an unparsable file is an error
//! (a silently dropped workflow would never fire).

use std::path::Path;

use klaxon_types::error::WorkflowLoadError;
use klaxon_types::workflow::Workflow;

/// Load all workflow definitions from `dir`.
pub async fn load_workflow_dir(dir: &Path) -> Result<Vec<Workflow>, WorkflowLoadError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no workflow directory at {}, starting empty", dir.display());
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(WorkflowLoadError::Io {
                path: dir.display().to_string(),
                source: err,
            });
        }
    };

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|err| WorkflowLoadError::Io {
        path: dir.display().to_string(),
        source: err,
    })? {
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if is_yaml {
            paths.push(path);
        }
    }
    paths.sort();

    let mut workflows: Vec<Workflow> = Vec::with_capacity(paths.len());
    for path in paths {
        let content =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| WorkflowLoadError::Io {
                    path: path.display().to_string(),
                    source: err,
                })?;

        let workflow: Workflow =
            serde_yaml_ng::from_str(&content).map_err(|err| WorkflowLoadError::Invalid {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;

        if workflows.iter().any(|wf| wf.id == workflow.id) {
            return Err(WorkflowLoadError::DuplicateId(workflow.id));
        }

        tracing::info!(workflow_id = %workflow.id, path = %path.display(), "loaded workflow definition");
        workflows.push(workflow);
    }

    Ok(workflows)
}
