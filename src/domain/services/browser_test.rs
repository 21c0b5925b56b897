use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use test_utils::project_rows_fixture;

use super::featured_highlights;
use super::matches_query;
use super::BrowseTab;
use super::LoadState;
use super::ProjectBrowser;
use crate::domain::models::LocalizedContent;
use crate::domain::models::Project;
use crate::domain::models::ProjectRow;
use crate::domain::services::fakes::MemoryStore;
use crate::domain::services::ProjectQuery;
use crate::domain::services::ProjectRepository;

fn project(id: &str, title: &str, technologies: &[&str], featured: bool) -> Project {
    let now = Utc::now();
    return Project {
        id: id.to_string(),
        title: LocalizedContent::new(title, title, title),
        description: LocalizedContent::new("Сайт", "Website", "Sayt"),
        technologies: technologies.iter().map(|e| return e.to_string()).collect(),
        image_url: "/placeholder.svg".to_string(),
        website_url: format!("https://{id}.example.com"),
        github_url: None,
        featured,
        created_at: now,
        updated_at: now,
    };
}

fn sample() -> Vec<Project> {
    return vec![
        project("shop", "Shop", &["React", "Node.js"], true),
        project("blog", "Blog", &["Astro"], false),
        project("docs", "Docs", &["Vue"], true),
        project("crm", "CRM", &["Angular"], true),
        project("wiki", "Wiki", &["Svelte"], true),
    ];
}

#[test]
fn it_matches_technologies_case_insensitively() {
    let mut browser = ProjectBrowser::default();
    browser.set_projects(vec![
        project("shop", "Shop", &["React"], true),
        project("blog", "Blog", &["Astro"], false),
    ]);

    browser.set_query("react");
    let ids = |b: &ProjectBrowser| {
        return b
            .filtered()
            .iter()
            .map(|e| return e.id.to_string())
            .collect::<Vec<String>>();
    };
    assert_eq!(ids(&browser), vec!["shop"]);

    browser.set_tab(BrowseTab::Featured);
    assert_eq!(ids(&browser), vec!["shop"]);
}

#[test]
fn it_matches_every_language() {
    let mut item = project("shop", "Shop", &[], false);
    item.title = LocalizedContent::new("Магазин", "Shop", "Do'kon");
    item.description = LocalizedContent::new("", "", "Onlayn savdo");

    assert!(matches_query(&item, "МАГАЗ"));
    assert!(matches_query(&item, "do'kon"));
    assert!(matches_query(&item, "savdo"));
    assert!(!matches_query(&item, "blog"));
}

#[test]
fn it_treats_blank_query_as_everything() {
    let item = project("shop", "Shop", &[], false);
    assert!(matches_query(&item, ""));
    assert!(matches_query(&item, "   "));
}

#[test]
fn it_combines_tab_and_search() {
    let mut browser = ProjectBrowser::default();
    browser.set_projects(sample());

    browser.set_query("website");
    assert_eq!(browser.filtered().len(), 5);

    browser.set_tab(BrowseTab::Featured);
    assert_eq!(browser.filtered().len(), 4);

    browser.set_query("blog");
    assert!(browser.filtered().is_empty());

    browser.set_tab(BrowseTab::All);
    assert_eq!(browser.filtered().len(), 1);
}

#[test]
fn it_caps_highlights_in_store_order() {
    let highlights = featured_highlights(&sample());
    let ids = highlights
        .iter()
        .map(|e| return e.id.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(ids, vec!["shop", "docs", "crm"]);
}

#[tokio::test]
async fn it_loads_through_the_query() -> Result<()> {
    let rows: Vec<ProjectRow> = serde_json::from_str(project_rows_fixture())?;
    let store = MemoryStore::with_rows(rows);
    let query = ProjectQuery::new(Arc::new(ProjectRepository::new(Box::new(store))));

    let mut browser = ProjectBrowser::default();
    assert_eq!(browser.load_state(), LoadState::Loading);

    browser.load(&query).await;
    assert_eq!(browser.load_state(), LoadState::Loaded);
    assert_eq!(browser.filtered().len(), 2);
    assert_eq!(browser.highlights().len(), 1);

    return Ok(());
}

#[tokio::test]
async fn it_distinguishes_failed_loads() {
    let store = MemoryStore::default();
    store.set_fail(true);
    let query = ProjectQuery::new(Arc::new(ProjectRepository::new(Box::new(store))));

    let mut browser = ProjectBrowser::default();
    browser.load(&query).await;

    assert_eq!(browser.load_state(), LoadState::Failed);
    assert!(browser.filtered().is_empty());
}
