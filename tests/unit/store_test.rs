//! Tests for the journal store backend

use std::fs;
use std::path::PathBuf;

use agent_dispatch::core::{
    AgentRecord, AgentRepository, ContactRecord, CsvUpload, DashboardError, DistributedList,
    PasswordHash, UploadRepository, UploadStatus,
};
use agent_dispatch::infra::JournalStore;
use agent_dispatch::util::{AdminId, AgentId, ListId, UploadId};

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("agent-dispatch-store-{}", uuid::Uuid::new_v4()))
}

fn agent(name: &str) -> AgentRecord {
    AgentRecord {
        id: AgentId::new(),
        name: name.into(),
        email: format!("{name}@example.com"),
        mobile_number: "5550100".into(),
        country_code: "+1".into(),
        password: PasswordHash::create("secret", 1).unwrap(),
        created_by: AdminId::new(),
        created_at_ms: 1,
    }
}

fn upload(total: usize) -> CsvUpload {
    CsvUpload {
        id: UploadId::new(),
        file_name: "leads.csv".into(),
        uploaded_by: AdminId::new(),
        total_records: total,
        status: UploadStatus::Completed,
        created_at_ms: 1,
    }
}

fn list(upload_id: UploadId, agent_id: AgentId, n: usize) -> DistributedList {
    let records: Vec<ContactRecord> = (0..n)
        .map(|i| ContactRecord::new(format!("r{i}"), format!("{i}"), ""))
        .collect();
    DistributedList {
        id: ListId::new(),
        upload_id,
        agent_id,
        assigned_count: records.len(),
        records,
    }
}

#[test]
fn test_replay_restores_roster_order() {
    let dir = temp_dir();
    let (a, b, c) = (agent("ana"), agent("ben"), agent("cal"));
    {
        let mut store = JournalStore::open(&dir, "test").unwrap();
        store.insert_agent(a.clone()).unwrap();
        store.insert_agent(b.clone()).unwrap();
        store.insert_agent(c.clone()).unwrap();
        let mut renamed = b.clone();
        renamed.name = "benjamin".into();
        store.replace_agent(renamed).unwrap();
        assert!(store.delete_agent(&a.id).unwrap());
    }

    let store = JournalStore::open(&dir, "test").unwrap();
    let names: Vec<String> = store
        .list_agents()
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["benjamin", "cal"]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_upload_is_one_journal_line() {
    let dir = temp_dir();
    let mut store = JournalStore::open(&dir, "test").unwrap();
    let (a, b) = (agent("ana"), agent("ben"));
    store.insert_agent(a.clone()).unwrap();
    store.insert_agent(b.clone()).unwrap();

    let up = upload(3);
    let lists = vec![list(up.id, a.id, 2), list(up.id, b.id, 1)];
    store.commit_upload(up.clone(), lists).unwrap();

    let text = fs::read_to_string(store.file_path()).unwrap();
    assert_eq!(text.lines().count(), 3);

    let reopened = JournalStore::open(&dir, "test").unwrap();
    let lists = reopened.lists_for_upload(&up.id).unwrap();
    let counts: Vec<usize> = lists.iter().map(|l| l.assigned_count).collect();
    assert_eq!(counts, vec![2, 1]);
    assert_eq!(reopened.lists_for_agent(&b.id).unwrap().len(), 1);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_rejected_writes_leave_journal_untouched() {
    let dir = temp_dir();
    let mut store = JournalStore::open(&dir, "test").unwrap();
    let a = agent("ana");
    store.insert_agent(a.clone()).unwrap();

    assert!(matches!(
        store.insert_agent(a.clone()),
        Err(DashboardError::DuplicateAgent(_))
    ));
    assert!(!store.delete_agent(&AgentId::new()).unwrap());

    let up = upload(1);
    let foreign = list(UploadId::new(), a.id, 1);
    assert!(store.commit_upload(up.clone(), vec![foreign]).is_err());
    assert!(store.get_upload(&up.id).unwrap().is_none());

    let text = fs::read_to_string(store.file_path()).unwrap();
    assert_eq!(text.lines().count(), 1);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_journal_fails_to_open() {
    let dir = temp_dir();
    {
        let mut store = JournalStore::open(&dir, "test").unwrap();
        store.insert_agent(agent("ana")).unwrap();
    }
    let path = dir.join("test_journal.jsonl");
    let mut text = fs::read_to_string(&path).unwrap();
    text.push_str("{not json}\n");
    fs::write(&path, text).unwrap();

    assert!(matches!(
        JournalStore::open(&dir, "test"),
        Err(DashboardError::Backend(_))
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_streams_are_separate_files() {
    let dir = temp_dir();
    let mut first = JournalStore::open(&dir, "one").unwrap();
    first.insert_agent(agent("ana")).unwrap();
    let second = JournalStore::open(&dir, "two").unwrap();
    assert!(second.list_agents().unwrap().is_empty());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_torn_tail_is_dropped_on_open() {
    let dir = temp_dir();
    let (a, b) = (agent("ana"), agent("ben"));
    {
        let mut store = JournalStore::open(&dir, "test").unwrap();
        store.insert_agent(a.clone()).unwrap();
    }
    let path = dir.join("test_journal.jsonl");
    let intact = fs::read_to_string(&path).unwrap();
    let mut torn = intact.clone();
    torn.push_str(r#"{"agent_deleted":{"id":""#);
    fs::write(&path, torn).unwrap();

    {
        let mut store = JournalStore::open(&dir, "test").unwrap();
        assert_eq!(store.list_agents().unwrap().len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), intact);
        store.insert_agent(b.clone()).unwrap();
    }

    let store = JournalStore::open(&dir, "test").unwrap();
    let ids: Vec<AgentId> = store.list_agents().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_complete_tail_without_newline_is_kept() {
    let dir = temp_dir();
    {
        let mut store = JournalStore::open(&dir, "test").unwrap();
        store.insert_agent(agent("ana")).unwrap();
    }
    let path = dir.join("test_journal.jsonl");
    let text = fs::read_to_string(&path).unwrap();
    fs::write(&path, text.trim_end_matches('\n')).unwrap();

    {
        let mut store = JournalStore::open(&dir, "test").unwrap();
        assert_eq!(store.list_agents().unwrap().len(), 1);
        store.insert_agent(agent("ben")).unwrap();
    }

    let store = JournalStore::open(&dir, "test").unwrap();
    assert_eq!(store.list_agents().unwrap().len(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_middle_line_still_fails() {
    let dir = temp_dir();
    {
        let mut store = JournalStore::open(&dir, "test").unwrap();
        store.insert_agent(agent("ana")).unwrap();
    }
    let path = dir.join("test_journal.jsonl");
    let good = fs::read_to_string(&path).unwrap();
    fs::write(&path, format!("{{\"agent_deleted\":{{\"id\":\"\n{good}")).unwrap();

    assert!(matches!(
        JournalStore::open(&dir, "test"),
        Err(DashboardError::Backend(_))
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_replays_uploads_in_any_status() {
    let dir = temp_dir();
    let mut processing = upload(0);
    processing.status = UploadStatus::Processing;
    let mut failed = upload(0);
    failed.status = UploadStatus::Failed;
    {
        let mut store = JournalStore::open(&dir, "test").unwrap();
        store.commit_upload(processing.clone(), Vec::new()).unwrap();
        store.commit_upload(failed.clone(), Vec::new()).unwrap();
    }

    let store = JournalStore::open(&dir, "test").unwrap();
    let statuses: Vec<UploadStatus> = store
        .list_uploads()
        .unwrap()
        .into_iter()
        .map(|u| u.status)
        .collect();
    assert_eq!(statuses, vec![UploadStatus::Processing, UploadStatus::Failed]);
    let _ = fs::remove_dir_all(&dir);
}
