//! Team endpoint integration tests
//!
//! Tests the team endpoints:
//! - POST /teams - Create team
//! - GET /teams?page=&size= - List teams
//! - GET /teams/{id} - Get team

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use roster_common::{PageRequest, Repository};
use serde_json::{json, Value};

use crate::common::snippets::{document, field, parameter, FieldDescriptor, Snippets};
use crate::common::{assertions, TestApp};

fn team_fields(prefix: &str) -> Vec<FieldDescriptor> {
    let path = |name: &str| format!("{}{}", prefix, name);
    vec![
        field(&path("id"), "Identifier assigned on creation"),
        field(&path("name"), "Team name"),
        field(&path("maker"), "Brand the team plays for"),
        field(&path("year"), "Founding year"),
        field(&path("state"), "Lifecycle state: ACTIVE, INACTIVE or DELETED"),
        field(&path("createdAt"), "Creation timestamp (RFC 3339)"),
        field(&path("updatedAt"), "Last modification timestamp (RFC 3339)"),
        field(&path("_links.self.href"), "Canonical link to this team"),
        field(&path("_links.list.href"), "Link to the team collection"),
    ]
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
        .unwrap_or_else(|| panic!("not an RFC 3339 timestamp: {}", value))
}

fn embedded_teams(body: &Value) -> Vec<Value> {
    body["_embedded"]["teamList"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

mod test_create_team {
    use super::*;

    #[tokio::test]
    async fn test_create_team_returns_created_representation() {
        let app = TestApp::new();

        let exchange = app
            .post_json(
                "/teams",
                json!({ "name": "Gradle", "maker": "Nike", "year": 2000 }),
            )
            .await;

        assert_eq!(exchange.status, StatusCode::CREATED);
        assertions::assert_hal(&exchange);
        assert_eq!(exchange.body["name"], "Gradle");
        assert_eq!(exchange.body["maker"], "Nike");
        assert_eq!(exchange.body["year"], 2000);
        assert_eq!(exchange.body["state"], "ACTIVE");

        let id = exchange.body["id"].as_i64().unwrap();
        let self_href = format!("http://localhost:8080/teams/{}", id);
        assert_eq!(exchange.body["_links"]["self"]["href"], self_href.as_str());
        assert_eq!(
            exchange.body["_links"]["list"]["href"],
            "http://localhost:8080/teams"
        );
        assert_eq!(exchange.header("location"), Some(self_href.as_str()));

        document(
            "create-team",
            &exchange,
            &Snippets::response(team_fields("")).request_fields(vec![
                field("name", "Team name, at most 255 characters"),
                field("maker", "Brand the team plays for, at most 255 characters"),
                field("year", "Founding year"),
            ]),
        );
    }

    #[tokio::test]
    async fn test_create_team_stamps_are_ordered() {
        let app = TestApp::new();
        let team = app.create_team("Gradle", "Nike", 2000).await;

        assert!(timestamp(&team["updatedAt"]) >= timestamp(&team["createdAt"]));
    }

    #[tokio::test]
    async fn test_create_team_assigns_unique_ids() {
        let app = TestApp::new();

        let mut ids = Vec::new();
        for year in 2000..2010 {
            let team = app.create_team("Gradle", "Nike", year).await;
            ids.push(team["id"].as_i64().unwrap());
        }

        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[tokio::test]
    async fn test_create_team_missing_name_persists_nothing() {
        let app = TestApp::new();

        let exchange = app
            .post_json("/teams", json!({ "maker": "Nike", "year": 2000 }))
            .await;

        assertions::assert_error(&exchange, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
        let stored = app.repos.teams.find_all(PageRequest::default()).await.unwrap();
        assert_eq!(stored.total_elements(), 0);
    }

    #[tokio::test]
    async fn test_create_team_wrong_year_type() {
        let app = TestApp::new();

        let exchange = app
            .post_json(
                "/teams",
                json!({ "name": "Gradle", "maker": "Nike", "year": "two thousand" }),
            )
            .await;

        assertions::assert_error(&exchange, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_team_name_too_long() {
        let app = TestApp::new();

        let exchange = app
            .post_json(
                "/teams",
                json!({ "name": "a".repeat(256), "maker": "Nike", "year": 2000 }),
            )
            .await;

        assertions::assert_error(&exchange, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
        let stored = app.repos.teams.find_all(PageRequest::default()).await.unwrap();
        assert_eq!(stored.total_elements(), 0);
    }

    #[tokio::test]
    async fn test_error_response_is_documented() {
        let app = TestApp::new();

        let exchange = app.post_json("/teams", json!({ "maker": "Nike" })).await;

        assert_eq!(exchange.status, StatusCode::BAD_REQUEST);
        document(
            "create-team-invalid",
            &exchange,
            &Snippets::response(vec![
                field("error.code", "Machine readable error code"),
                field("error.message", "Human readable description"),
            ]),
        );
    }
}

mod test_get_team {
    use super::*;

    #[tokio::test]
    async fn test_get_team_by_id() {
        let app = TestApp::new();
        let created = app.create_team("Gradle", "Nike", 2000).await;
        let id = created["id"].as_i64().unwrap();

        let exchange = app.get(&format!("/teams/{}", id)).await;

        assert_eq!(exchange.status, StatusCode::OK);
        assertions::assert_hal(&exchange);
        assert_eq!(exchange.body, created);

        document("get-team", &exchange, &Snippets::response(team_fields("")));
    }

    #[tokio::test]
    async fn test_get_team_self_link_resolves() {
        let app = TestApp::new();
        let created = app.create_team("Gradle", "Nike", 2000).await;

        let href = created["_links"]["self"]["href"].as_str().unwrap();
        let path = href.strip_prefix("http://localhost:8080").unwrap();

        let exchange = app.get(path).await;
        assert_eq!(exchange.status, StatusCode::OK);
        assert_eq!(exchange.body["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_get_team_not_found() {
        let app = TestApp::new();

        let exchange = app.get("/teams/42").await;

        assertions::assert_error(&exchange, StatusCode::NOT_FOUND, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_team_id_never_changes() {
        let app = TestApp::new();
        let created = app.create_team("Gradle", "Nike", 2000).await;
        let id = created["id"].as_i64().unwrap();

        for _ in 0..3 {
            let exchange = app.get(&format!("/teams/{}", id)).await;
            assert_eq!(exchange.body["id"].as_i64(), Some(id));
        }
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let app = TestApp::new();
        let created = app.create_team("Gradle", "Nike", 2000).await;
        let id = created["id"].as_i64().unwrap();

        let exchange = app
            .request(Method::DELETE, &format!("/teams/{}", id), None)
            .await;

        assert_eq!(exchange.status, StatusCode::METHOD_NOT_ALLOWED);
    }
}

mod test_list_teams {
    use super::*;

    fn page_fields() -> Vec<FieldDescriptor> {
        let mut fields = vec![
            field("_embedded.teamList", "Teams on this page"),
            field("_links.first.href", "First page").optional(),
            field("_links.prev.href", "Previous page").optional(),
            field("_links.self.href", "This page"),
            field("_links.next.href", "Next page").optional(),
            field("_links.last.href", "Last page").optional(),
            field("page.size", "Requested page size"),
            field("page.totalElements", "Number of teams across all pages"),
            field("page.totalPages", "Number of pages"),
            field("page.number", "Zero-based number of this page"),
        ];
        fields.extend(team_fields("_embedded.teamList[]."));
        fields
    }

    #[tokio::test]
    async fn test_list_middle_page() {
        let app = TestApp::new();
        app.seed_teams(10).await;

        let exchange = app.get("/teams?page=2&size=2").await;

        assert_eq!(exchange.status, StatusCode::OK);
        assertions::assert_hal(&exchange);

        let teams = embedded_teams(&exchange.body);
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0]["year"], 2004);
        assert_eq!(teams[1]["year"], 2005);

        let page = &exchange.body["page"];
        assert_eq!(page["size"], 2);
        assert_eq!(page["totalElements"], 10);
        assert_eq!(page["totalPages"], 5);
        assert_eq!(page["number"], 2);

        let links = &exchange.body["_links"];
        assert_eq!(links["first"]["href"], "http://localhost:8080/teams?page=0&size=2");
        assert_eq!(links["prev"]["href"], "http://localhost:8080/teams?page=1&size=2");
        assert_eq!(links["self"]["href"], "http://localhost:8080/teams?page=2&size=2");
        assert_eq!(links["next"]["href"], "http://localhost:8080/teams?page=3&size=2");
        assert_eq!(links["last"]["href"], "http://localhost:8080/teams?page=4&size=2");

        document(
            "list-teams",
            &exchange,
            &Snippets::response(page_fields()).request_parameters(vec![
                parameter("page", "Zero-based page number, 0 when omitted or malformed"),
                parameter("size", "Page size, 20 when omitted or malformed, at most 2000"),
            ]),
        );
    }

    #[tokio::test]
    async fn test_list_first_page_has_no_prev() {
        let app = TestApp::new();
        app.seed_teams(5).await;

        let exchange = app.get("/teams?page=0&size=2").await;

        let links = &exchange.body["_links"];
        assert!(links.get("prev").is_none());
        assert!(links.get("next").is_some());
        assert!(links.get("first").is_some());
        assert_eq!(embedded_teams(&exchange.body).len(), 2);
    }

    #[tokio::test]
    async fn test_list_last_page_has_no_next() {
        let app = TestApp::new();
        app.seed_teams(5).await;

        let exchange = app.get("/teams?page=2&size=2").await;

        let links = &exchange.body["_links"];
        assert!(links.get("next").is_none());
        assert!(links.get("prev").is_some());
        assert!(links.get("last").is_some());
        assert_eq!(embedded_teams(&exchange.body).len(), 1);
    }

    #[tokio::test]
    async fn test_list_element_counts() {
        let app = TestApp::new();
        app.seed_teams(7).await;

        for (page, size) in [(0u64, 3u64), (1, 3), (2, 3), (3, 3), (0, 7), (0, 10), (1, 7)] {
            let exchange = app
                .get(&format!("/teams?page={}&size={}", page, size))
                .await;
            let expected = if page * size < 7 {
                size.min(7 - page * size)
            } else {
                0
            };
            assert_eq!(
                embedded_teams(&exchange.body).len() as u64,
                expected,
                "page={} size={}",
                page,
                size
            );
        }
    }

    #[tokio::test]
    async fn test_list_round_trip() {
        let app = TestApp::new();
        app.create_team("A", "B", 2000).await;

        let exchange = app.get("/teams").await;

        let teams = embedded_teams(&exchange.body);
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0]["name"], "A");
        assert_eq!(teams[0]["maker"], "B");
        assert_eq!(teams[0]["year"], 2000);
        assert_eq!(teams[0]["state"], "ACTIVE");
        assert!(teams[0]["_links"]["self"]["href"].is_string());
    }

    #[tokio::test]
    async fn test_list_single_page_has_only_self() {
        let app = TestApp::new();
        app.seed_teams(3).await;

        let exchange = app.get("/teams").await;

        let links = exchange.body["_links"].as_object().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(
            links["self"]["href"],
            "http://localhost:8080/teams?page=0&size=20"
        );
        assert_eq!(exchange.body["page"]["size"], 20);
    }

    #[tokio::test]
    async fn test_list_malformed_paging_falls_back_to_defaults() {
        let app = TestApp::new();
        app.seed_teams(3).await;

        let exchange = app.get("/teams?page=abc&size=-5").await;

        assert_eq!(exchange.status, StatusCode::OK);
        assert_eq!(exchange.body["page"]["number"], 0);
        assert_eq!(exchange.body["page"]["size"], 20);
        assert_eq!(embedded_teams(&exchange.body).len(), 3);
    }

    #[tokio::test]
    async fn test_list_oversized_page_is_capped() {
        let app = TestApp::new();
        app.seed_teams(1).await;

        let exchange = app.get("/teams?size=5000").await;

        assert_eq!(exchange.status, StatusCode::OK);
        assert_eq!(exchange.body["page"]["size"], 2000);
    }

    #[tokio::test]
    async fn test_list_out_of_range_page_is_empty() {
        let app = TestApp::new();
        app.seed_teams(3).await;

        let exchange = app.get("/teams?page=9&size=2").await;

        assert_eq!(exchange.status, StatusCode::OK);
        assert!(exchange.body.get("_embedded").is_none());
        assert_eq!(exchange.body["page"]["totalElements"], 3);
        assert_eq!(exchange.body["page"]["totalPages"], 2);
        assert_eq!(exchange.body["page"]["number"], 9);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let app = TestApp::new();

        let exchange = app.get("/teams").await;

        assert_eq!(exchange.status, StatusCode::OK);
        assert!(exchange.body.get("_embedded").is_none());
        assert_eq!(exchange.body["page"]["totalElements"], 0);
        assert_eq!(exchange.body["page"]["totalPages"], 0);

        document(
            "list-teams-empty",
            &exchange,
            &Snippets::response(vec![
                field("_links.self.href", "This page"),
                field("page", "Page metadata"),
            ])
            .request_parameters(vec![
                parameter("page", "Zero-based page number").optional(),
                parameter("size", "Page size").optional(),
            ]),
        );
    }
}
