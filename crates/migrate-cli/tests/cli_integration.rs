use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn board_migrate(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("board-migrate").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("BOARD_MIGRATE_CONFIG")
        .env_remove("BOARD_MIGRATE_DEBUG_LOG")
        .env_remove("TRELLO_API_KEY")
        .env_remove("TRELLO_API_TOKEN")
        .env_remove("VIKUNJA_API_KEY")
        .env_remove("VIKUNJA_INSTANCE");
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}

fn card(id: &str, name: &str, list: &str) -> Value {
    json!({ "id": id, "name": name, "desc": "", "idList": list })
}

/// Writes a snapshot with boards Roadmap (3 cards), Ops (1 card) and
/// Orphan (no project), plus the matching project list.
fn write_inputs(dir: &TempDir, roadmap_cards: Vec<Value>) -> (String, String) {
    let boards = json!([
        {
            "id": "b1",
            "name": "Roadmap",
            "lists": [{ "id": "l1", "name": "Todo", "closed": false }],
            "cards": roadmap_cards
        },
        {
            "id": "b2",
            "name": "Ops",
            "lists": [{ "id": "l2", "name": "Doing", "closed": false }],
            "cards": [card("o1", "Rotate keys", "l2")]
        },
        { "id": "b3", "name": "Orphan", "lists": [] }
    ]);
    let projects = json!([
        {
            "id": 7,
            "title": "Roadmap",
            "views": [{ "id": 3, "title": "Kanban", "project_id": 7, "view_kind": "kanban" }]
        },
        {
            "id": 9,
            "title": "Ops",
            "views": [{ "id": 5, "title": "Kanban", "project_id": 9, "view_kind": "kanban" }]
        }
    ]);

    let source = dir.path().join("trello.json");
    let data = dir.path().join("data.json");
    fs::write(&source, boards.to_string()).unwrap();
    fs::write(&data, projects.to_string()).unwrap();
    (
        source.to_str().unwrap().to_string(),
        data.to_str().unwrap().to_string(),
    )
}

fn three_cards() -> Vec<Value> {
    vec![
        card("c1", "One", "l1"),
        card("c2", "Two", "l1"),
        card("c3", "Three", "l1"),
    ]
}

mod boards_tests {
    use super::*;

    #[test]
    fn test_lists_matched_boards_numbered() {
        let dir = tempdir().unwrap();
        let (source, data) = write_inputs(&dir, three_cards());

        let output = board_migrate(dir.path())
            .args(["boards", "--source", &source, "--projects", &data])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["count"], 2);
        let items = json["data"]["items"].as_array().unwrap();
        assert_eq!(items[0]["number"], 1);
        assert_eq!(items[0]["title"], "Ops");
        assert_eq!(items[0]["project_id"], 9);
        assert_eq!(items[1]["title"], "Roadmap");
        assert_eq!(items[1]["cards"], 3);
    }

    #[test]
    fn test_missing_snapshot_reports_json_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.json");

        board_migrate(dir.path())
            .args(["boards", "--source", missing.to_str().unwrap()])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("\"success\":false"));
    }
}

mod migrate_tests {
    use super::*;

    #[test]
    fn test_dry_run_writes_audit() {
        let dir = tempdir().unwrap();
        let (source, data) = write_inputs(&dir, three_cards());
        let audit = dir.path().join("out").join("audit.json");

        let output = board_migrate(dir.path())
            .args([
                "migrate",
                "--source",
                &source,
                "--projects",
                &data,
                "--board",
                "Roadmap",
                "--dry-run",
                "--output",
                audit.to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["dry_run"], true);
        assert_eq!(json["data"]["projects"][0]["title"], "Roadmap");
        assert_eq!(json["data"]["projects"][0]["buckets"], 1);
        assert_eq!(json["data"]["projects"][0]["tasks"], 3);

        let written: Value = serde_json::from_str(&fs::read_to_string(&audit).unwrap()).unwrap();
        let bucket = &written["projects"][0]["buckets"][0];
        assert_eq!(bucket["title"], "Archived Tasks 1");
        assert_eq!(bucket["project_view_id"], 3);
        assert_eq!(bucket["tasks"].as_array().unwrap().len(), 3);
        assert_eq!(bucket["tasks"][0]["description"], "");
    }

    #[test]
    fn test_select_out_of_range_is_validation_error() {
        let dir = tempdir().unwrap();
        let (source, data) = write_inputs(&dir, three_cards());

        board_migrate(dir.path())
            .args([
                "migrate", "--source", &source, "--projects", &data, "--select", "5", "--dry-run",
            ])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("out of range"));
    }

    #[test]
    fn test_upload_requires_destination() {
        let dir = tempdir().unwrap();
        let (source, data) = write_inputs(&dir, three_cards());

        board_migrate(dir.path())
            .args(["migrate", "--source", &source, "--projects", &data, "--all"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("VIKUNJA_INSTANCE"));
    }

    #[test]
    fn test_selection_flag_is_required() {
        let dir = tempdir().unwrap();
        let (source, data) = write_inputs(&dir, three_cards());

        board_migrate(dir.path())
            .args(["migrate", "--source", &source, "--projects", &data, "--dry-run"])
            .assert()
            .failure()
            .code(2);
    }
}

mod upload_tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_migrate_uploads_with_cover_and_comment() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/files/diagram.png"))
            .and(header(
                "Authorization",
                "OAuth oauth_consumer_key=\"key\", oauth_token=\"token\"",
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(b"png-bytes".to_vec()),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/projects/7/views/3/buckets"))
            .and(header("Authorization", "Bearer vikunja-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 11 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/projects/7/tasks"))
            .and(body_partial_json(json!({
                "title": "Design",
                "bucket_id": 11,
                "labels": [{ "title": "Urgent", "hex_color": "f87168" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 21 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/tasks/21/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 41 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/tasks/21/attachments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": null,
                "success": [{ "id": 31 }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks/21"))
            .and(body_partial_json(json!({ "cover_image_attachment_id": 31 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 21 })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let design = json!({
            "id": "c1",
            "name": "Design",
            "desc": "Sketch the **flow**",
            "idList": "l1",
            "idAttachmentCover": "a1",
            "labels": [{ "id": "lb1", "name": "Urgent", "color": "red" }],
            "attachments": [{
                "id": "a1",
                "name": "diagram.png",
                "url": format!("{}/files/diagram.png", server.uri()),
                "mimeType": "image/png",
                "isUpload": true
            }],
            "actions": [{
                "id": "x1",
                "type": "commentCard",
                "date": "2023-04-01T09:30:00Z",
                "data": { "text": "Looks good" },
                "memberCreator": { "id": "m1", "fullName": "Ada Lovelace", "username": "ada" }
            }]
        });
        let (source, data) = write_inputs(&dir, vec![design]);
        let audit = dir.path().join("audit.json");
        let base_url = format!("{}/api/v1", server.uri());
        let home = dir.path().to_path_buf();
        let audit_arg = audit.to_str().unwrap().to_string();

        let output = tokio::task::spawn_blocking(move || {
            board_migrate(&home)
                .env("TRELLO_API_KEY", "key")
                .env("TRELLO_API_TOKEN", "token")
                .env("VIKUNJA_INSTANCE", base_url)
                .args([
                    "migrate",
                    "--source",
                    &source,
                    "--projects",
                    &data,
                    "--select",
                    "2",
                    "--vikunja-token",
                    "vikunja-token",
                    "--output",
                    &audit_arg,
                ])
                .assert()
                .success()
                .get_output()
                .stdout
                .clone()
        })
        .await
        .unwrap();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["dry_run"], false);
        assert_eq!(json["data"]["uploaded"]["tasks"], 1);
        assert_eq!(json["data"]["uploaded"]["comments"], 1);
        assert_eq!(json["data"]["uploaded"]["attachments"], 1);

        let written: Value = serde_json::from_str(&fs::read_to_string(&audit).unwrap()).unwrap();
        let task = &written["projects"][0]["buckets"][0]["tasks"][0];
        assert_eq!(task["id"], 21);
        assert_eq!(task["cover_image_attachment_id"], 31);
        assert_eq!(task["comments"][0]["id"], 41);
        assert!(task["description"]
            .as_str()
            .unwrap()
            .contains("<strong>flow</strong>"));
        assert!(task["comments"][0]["comment"]
            .as_str()
            .unwrap()
            .contains("<em>Ada Lovelace</em>"));
    }
}
