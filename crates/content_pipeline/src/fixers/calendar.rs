//! Calendar status sync against the editorial content plan.

use crate::runtime::error::{PipelineError, PipelineResult};
use chrono::{SecondsFormat, Utc};
use content_contract::{PlanStatus, PlanTopic};
use std::fs;
use std::path::Path;

/// Outcome of one status sync for one slug.
#[derive(Clone, Debug)]
pub struct SyncOutcome {
    /// Whether the plan file was rewritten.
    pub updated: bool,
    /// Status the topic holds after the sync, if the topic exists.
    pub status: Option<PlanStatus>,
}

/// Align the plan topic for `slug` with a validation outcome.
///
/// Passing documents move to `ready`, failing ones to `review`. A topic that
/// is already `published` is never touched regardless of the outcome, so
/// shipped content cannot be silently marked for rework. Reports
/// `updated: false` when the target status already matches or the topic is
/// absent.
pub fn sync_calendar_status(
    plan_path: &Path,
    slug: &str,
    passed: bool,
) -> PipelineResult<SyncOutcome> {
    let body = fs::read_to_string(plan_path).map_err(|err| {
        PipelineError::environment(format!("failed to read {}: {err}", plan_path.display()))
            .with_hint("create the content plan before syncing statuses")
    })?;
    let mut topics: Vec<PlanTopic> = serde_json::from_str(&body).map_err(|err| {
        PipelineError::config(format!("failed to parse {}: {err}", plan_path.display()))
    })?;

    let Some(topic) = topics.iter_mut().find(|topic| topic.slug == slug) else {
        return Ok(SyncOutcome {
            updated: false,
            status: None,
        });
    };

    if topic.status == PlanStatus::Published {
        return Ok(SyncOutcome {
            updated: false,
            status: Some(PlanStatus::Published),
        });
    }

    let target = if passed {
        PlanStatus::Ready
    } else {
        PlanStatus::Review
    };
    if topic.status == target {
        return Ok(SyncOutcome {
            updated: false,
            status: Some(target),
        });
    }

    topic.status = target;
    topic.updated_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

    let rendered = serde_json::to_string_pretty(&topics).map_err(|err| {
        PipelineError::io(format!("failed to serialize {}: {err}", plan_path.display()))
    })?;
    fs::write(plan_path, format!("{rendered}\n")).map_err(|err| {
        PipelineError::io(format!("failed to write {}: {err}", plan_path.display()))
    })?;

    Ok(SyncOutcome {
        updated: true,
        status: Some(target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_plan_file(topics: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "content-calendar-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ));
        fs::create_dir_all(&root).expect("create test root");
        let path = root.join("content-plan.json");
        fs::write(&path, topics).expect("write plan");
        path
    }

    fn read_topics(path: &Path) -> Vec<PlanTopic> {
        serde_json::from_str(&fs::read_to_string(path).expect("read plan")).expect("parse plan")
    }

    const PLAN: &str = r#"[
  { "slug": "a", "status": "drafting", "owner": "jr" },
  { "slug": "b", "status": "published" },
  { "slug": "c", "status": "ready" }
]"#;

    #[test]
    fn passing_document_moves_to_ready() {
        let path = unique_plan_file(PLAN);
        let outcome = sync_calendar_status(&path, "a", true).expect("sync");
        assert!(outcome.updated);
        assert_eq!(outcome.status, Some(PlanStatus::Ready));

        let topics = read_topics(&path);
        assert_eq!(topics[0].status, PlanStatus::Ready);
        assert!(topics[0].updated_at.is_some());
        // Unknown keys on the topic survive the rewrite.
        assert_eq!(topics[0].extra.get("owner"), Some(&serde_json::json!("jr")));

        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn failing_document_moves_to_review() {
        let path = unique_plan_file(PLAN);
        let outcome = sync_calendar_status(&path, "a", false).expect("sync");
        assert!(outcome.updated);
        assert_eq!(outcome.status, Some(PlanStatus::Review));
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn published_topics_are_never_downgraded() {
        let path = unique_plan_file(PLAN);
        for passed in [true, false] {
            let outcome = sync_calendar_status(&path, "b", passed).expect("sync");
            assert!(!outcome.updated);
            assert_eq!(outcome.status, Some(PlanStatus::Published));
        }
        assert_eq!(read_topics(&path)[1].status, PlanStatus::Published);
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn matching_status_is_a_no_op() {
        let path = unique_plan_file(PLAN);
        let before = fs::read_to_string(&path).expect("read");
        let outcome = sync_calendar_status(&path, "c", true).expect("sync");
        assert!(!outcome.updated);
        assert_eq!(fs::read_to_string(&path).expect("read"), before);
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn unknown_slug_reports_not_updated() {
        let path = unique_plan_file(PLAN);
        let outcome = sync_calendar_status(&path, "ghost", true).expect("sync");
        assert!(!outcome.updated);
        assert_eq!(outcome.status, None);
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }
}
