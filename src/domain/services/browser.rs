#[cfg(test)]
#[path = "browser_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;

use super::ProjectQuery;
use crate::domain::models::Project;

pub const HIGHLIGHT_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BrowseTab {
    #[default]
    All,
    Featured,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed,
}

/// Case-insensitive match over every title, every description and every
/// technology. A blank query matches everything.
pub fn matches_query(project: &Project, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    return project
        .title
        .values()
        .into_iter()
        .chain(project.description.values())
        .chain(project.technologies.iter().map(|e| return e.as_str()))
        .any(|e| return e.to_lowercase().contains(&needle));
}

pub fn matches_tab(project: &Project, tab: BrowseTab) -> bool {
    match tab {
        BrowseTab::All => return true,
        BrowseTab::Featured => return project.featured,
    }
}

/// Featured projects in store order, at most `HIGHLIGHT_LIMIT` of them.
pub fn featured_highlights(projects: &[Project]) -> Vec<Project> {
    return projects
        .iter()
        .filter(|e| return e.featured)
        .take(HIGHLIGHT_LIMIT)
        .cloned()
        .collect();
}

/// Read-only view over the project list with a tab and a search filter that
/// always combine. The visible list is recomputed on every change.
pub struct ProjectBrowser {
    projects: Vec<Project>,
    visible: Vec<Project>,
    query: String,
    tab: BrowseTab,
    load_state: LoadState,
}

impl Default for ProjectBrowser {
    fn default() -> ProjectBrowser {
        return ProjectBrowser {
            projects: vec![],
            visible: vec![],
            query: "".to_string(),
            tab: BrowseTab::All,
            load_state: LoadState::Loading,
        };
    }
}

impl ProjectBrowser {
    pub async fn load(&mut self, query: &ProjectQuery) {
        self.load_state = LoadState::Loading;
        match query.try_projects().await {
            Ok(projects) => {
                self.load_state = LoadState::Loaded;
                self.set_projects(projects);
            }
            Err(err) => {
                tracing::error!(error = ?err, "failed to load projects");
                self.load_state = LoadState::Failed;
                self.set_projects(vec![]);
            }
        }
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.recompute();
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.recompute();
    }

    pub fn set_tab(&mut self, tab: BrowseTab) {
        self.tab = tab;
        self.recompute();
    }

    pub fn query(&self) -> &str {
        return &self.query;
    }

    pub fn tab(&self) -> BrowseTab {
        return self.tab;
    }

    pub fn load_state(&self) -> LoadState {
        return self.load_state;
    }

    pub fn projects(&self) -> &[Project] {
        return &self.projects;
    }

    pub fn filtered(&self) -> &[Project] {
        return &self.visible;
    }

    pub fn highlights(&self) -> Vec<Project> {
        return featured_highlights(&self.projects);
    }

    fn recompute(&mut self) {
        self.visible = self
            .projects
            .iter()
            .filter(|e| return matches_tab(e, self.tab) && matches_query(e, &self.query))
            .cloned()
            .collect();
    }
}
