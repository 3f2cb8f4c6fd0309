//! Member reference integration tests
//!
//! Members have no endpoints of their own. These tests go through the
//! repositories the running application uses, so teams created over HTTP
//! are the ones members reference.

use roster_common::{Entity, Error, PageRequest, Repository, RepositoryError};
use roster_teams::{Member, Team};

use crate::common::TestApp;

async fn team_via_api(app: &TestApp) -> Team {
    let created = app.create_team("Gradle", "Nike", 2000).await;
    let id = created["id"].as_i64().unwrap();
    app.repos.teams.find_by_id(id).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_member_of_team_created_over_http() {
    let app = TestApp::new();
    let team = team_via_api(&app).await;

    let member = app
        .repos
        .members
        .save(Member::new(&team, "Kim").unwrap())
        .await
        .unwrap();

    assert!(member.id().is_some());
    assert!(member.belongs_to(&team));
    assert!(member.base().updated_at() >= member.base().created_at());

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["teamId"], team.id().unwrap());
    assert_eq!(json["name"], "Kim");
    assert_eq!(json["state"], "ACTIVE");
}

#[tokio::test]
async fn test_member_of_missing_team_persists_nothing() {
    let app = TestApp::new();
    let other = TestApp::new();
    let foreign = team_via_api(&other).await;
    let foreign_id = foreign.id().unwrap();

    // Same id as the foreign team, but never stored here
    assert!(!app.repos.teams.exists_by_id(foreign_id).await.unwrap());

    let result = app
        .repos
        .members
        .save(Member::new(&foreign, "Kim").unwrap())
        .await;

    assert!(matches!(result, Err(RepositoryError::Referential(_))));
    let stored = app.repos.members.find_all(PageRequest::default()).await.unwrap();
    assert_eq!(stored.total_elements(), 0);

    let error: Error = result.unwrap_err().into();
    assert!(matches!(error, Error::NotFound(_)));
}

#[test]
fn test_member_requires_saved_team() {
    let unsaved = Team::new("Gradle", "Nike", 2000);

    let result = Member::new(&unsaved, "Kim");

    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_member_update_keeps_identity() {
    let app = TestApp::new();
    let team = team_via_api(&app).await;

    let mut member = app
        .repos
        .members
        .save(Member::new(&team, "Kim").unwrap())
        .await
        .unwrap();
    let id = member.id();
    let created_at = member.base().created_at();

    member.name = "Lee".to_string();
    let updated = app.repos.members.save(member).await.unwrap();

    assert_eq!(updated.id(), id);
    assert_eq!(updated.name, "Lee");
    assert_eq!(updated.base().created_at(), created_at);
    assert!(updated.base().updated_at() >= created_at);
    assert_eq!(
        app.repos
            .members
            .find_all(PageRequest::default())
            .await
            .unwrap()
            .total_elements(),
        1
    );
}
