//! The console's pages, one per entity.
//!
//! Each page fans out one list request per collection it needs, builds a
//! lookup map per reference collection, and renders denormalized rows.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::client::ApiClient;
use crate::derived::{duration_days, estimated_cost};
use crate::format::{enum_label, format_date, format_datetime, format_money, format_money_str};
use crate::grid::Grid;
use crate::lookup::LookupMap;
use crate::page::{collect_failures, fetch_or_empty, FetchFailure, Loaded, Page, PageController};
use crate::resource::ResourceKind;
use crate::types::*;

fn id_cell(id: Id) -> String {
    id.to_string()
}

fn created_cell(created_at: chrono::DateTime<chrono::Utc>) -> String {
    format_datetime(Some(created_at))
}

// ---------------------------------------------------------------------------
// Single-collection pages
// ---------------------------------------------------------------------------

pub struct FieldsPage;

#[async_trait]
impl Page for FieldsPage {
    type Data = Vec<Field>;

    fn title(&self) -> &'static str {
        "Fields"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let mut fields = fetch_or_empty::<Field>(client).await;
        let failures = collect_failures([fields.failure.take()]);
        (fields.page.results, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(self.title(), &["Name", "Created", "ID"]);
        for f in data {
            grid.push_row(vec![f.name.clone(), created_cell(f.created_at), id_cell(f.id)]);
        }
        grid
    }
}

pub struct RigsPage;

#[async_trait]
impl Page for RigsPage {
    type Data = Vec<Rig>;

    fn title(&self) -> &'static str {
        "Rigs"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let mut rigs = fetch_or_empty::<Rig>(client).await;
        let failures = collect_failures([rigs.failure.take()]);
        (rigs.page.results, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(
            self.title(),
            &["Rig", "Kind", "Day Rate", "Status", "Created", "ID"],
        );
        for r in data {
            grid.push_row(vec![
                r.name.clone(),
                enum_label(r.rig_kind.as_str()),
                format_money_str(Some(&r.day_rate)),
                enum_label(r.status.as_str()),
                created_cell(r.created_at),
                id_cell(r.id),
            ]);
        }
        grid
    }
}

pub struct ScenariosPage;

#[async_trait]
impl Page for ScenariosPage {
    type Data = Vec<Scenario>;

    fn title(&self) -> &'static str {
        "Scenarios"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let mut scenarios = fetch_or_empty::<Scenario>(client).await;
        let failures = collect_failures([scenarios.failure.take()]);
        (scenarios.page.results, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(
            self.title(),
            &["Scenario", "Status", "Created By (User ID)", "Created", "ID"],
        );
        for s in data {
            grid.push_row(vec![
                s.name.clone(),
                enum_label(s.status.as_str()),
                id_cell(s.created_by),
                created_cell(s.created_at),
                id_cell(s.id),
            ]);
        }
        grid
    }
}

// ---------------------------------------------------------------------------
// Pages with reference collections
// ---------------------------------------------------------------------------

pub struct PlatformsPage;

#[derive(Debug, Default)]
pub struct PlatformsData {
    pub platforms: Vec<Platform>,
    pub fields: LookupMap<Field>,
}

#[async_trait]
impl Page for PlatformsPage {
    type Data = PlatformsData;

    fn title(&self) -> &'static str {
        "Platforms"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let (mut platforms, mut fields) =
            tokio::join!(fetch_or_empty::<Platform>(client), fetch_or_empty::<Field>(client));
        let failures = collect_failures([platforms.failure.take(), fields.failure.take()]);
        let data = PlatformsData {
            platforms: platforms.page.results,
            fields: LookupMap::from_records(fields.page.results),
        };
        (data, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(self.title(), &["Platform", "Field", "Status", "Created", "ID"]);
        for p in &data.platforms {
            grid.push_row(vec![
                p.name.clone(),
                data.fields.display(Some(p.field)),
                enum_label(p.status.as_str()),
                created_cell(p.created_at),
                id_cell(p.id),
            ]);
        }
        grid
    }
}

pub struct WellsPage;

#[derive(Debug, Default)]
pub struct WellsData {
    pub wells: Vec<Well>,
    pub fields: LookupMap<Field>,
    pub platforms: LookupMap<Platform>,
}

#[async_trait]
impl Page for WellsPage {
    type Data = WellsData;

    fn title(&self) -> &'static str {
        "Wells"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let (mut wells, mut fields, mut platforms) = tokio::join!(
            fetch_or_empty::<Well>(client),
            fetch_or_empty::<Field>(client),
            fetch_or_empty::<Platform>(client),
        );
        let failures = collect_failures([
            wells.failure.take(),
            fields.failure.take(),
            platforms.failure.take(),
        ]);
        let data = WellsData {
            wells: wells.page.results,
            fields: LookupMap::from_records(fields.page.results),
            platforms: LookupMap::from_records(platforms.page.results),
        };
        (data, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(
            self.title(),
            &["Well", "Field", "Platform", "Kind", "Type", "Lat", "Lon", "Created", "ID"],
        );
        for w in &data.wells {
            grid.push_row(vec![
                w.name.clone(),
                data.fields.display(Some(w.field)),
                data.platforms.display(w.platform),
                enum_label(w.well_kind.as_str()),
                enum_label(w.well_type.as_str()),
                w.lat.clone().unwrap_or_default(),
                w.lon.clone().unwrap_or_default(),
                created_cell(w.created_at),
                id_cell(w.id),
            ]);
        }
        grid
    }
}

pub struct MaintenanceWindowsPage;

#[derive(Debug, Default)]
pub struct MaintenanceWindowsData {
    pub windows: Vec<MaintenanceWindow>,
    pub platforms: LookupMap<Platform>,
}

#[async_trait]
impl Page for MaintenanceWindowsPage {
    type Data = MaintenanceWindowsData;

    fn title(&self) -> &'static str {
        "Maintenance Windows"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let (mut windows, mut platforms) = tokio::join!(
            fetch_or_empty::<MaintenanceWindow>(client),
            fetch_or_empty::<Platform>(client),
        );
        let failures = collect_failures([windows.failure.take(), platforms.failure.take()]);
        let data = MaintenanceWindowsData {
            windows: windows.page.results,
            platforms: LookupMap::from_records(platforms.page.results),
        };
        (data, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(
            self.title(),
            &["Platform", "Start", "End", "Days", "Reason", "Created", "ID"],
        );
        for m in &data.windows {
            let days = duration_days(Some(m.start_date), Some(m.end_date));
            grid.push_row(vec![
                data.platforms.display(Some(m.platform)),
                format_date(Some(m.start_date)),
                format_date(Some(m.end_date)),
                days.map(|d| d.to_string()).unwrap_or_default(),
                m.reason.clone(),
                created_cell(m.created_at),
                id_cell(m.id),
            ]);
        }
        grid
    }
}

/// The projects sheet: every project with its references resolved and its
/// duration and cost estimated.
pub struct ProjectsPage;

#[derive(Debug, Default)]
pub struct ProjectsData {
    pub projects: Vec<Project>,
    pub rigs: LookupMap<Rig>,
    pub fields: LookupMap<Field>,
    pub platforms: LookupMap<Platform>,
    pub wells: LookupMap<Well>,
}

/// One denormalized sheet row. Derived values are `None` when an input is
/// missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRow {
    pub id: Id,
    pub name: String,
    pub project_type: ProjectType,
    pub field: String,
    pub platform: String,
    pub well: String,
    pub rig: String,
    pub status: ProjectStatus,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
    pub duration_days: Option<i64>,
    pub rig_day_rate: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
}

impl ProjectsData {
    pub fn rows(&self) -> Vec<ProjectRow> {
        self.projects.iter().map(|p| self.row(p)).collect()
    }

    fn row(&self, p: &Project) -> ProjectRow {
        let duration = duration_days(p.planned_start, p.planned_end);
        let day_rate = p
            .rig
            .and_then(|id| self.rigs.get(id))
            .map(|rig| rig.day_rate.clone());
        ProjectRow {
            id: p.id,
            name: p.name.clone(),
            project_type: p.project_type,
            field: self.fields.display(p.field),
            platform: self.platforms.display(p.platform),
            well: self.wells.display(p.well),
            rig: self.rigs.display(p.rig),
            status: p.status,
            planned_start: p.planned_start,
            planned_end: p.planned_end,
            duration_days: duration,
            estimated_cost: estimated_cost(duration, day_rate.as_deref()),
            rig_day_rate: day_rate,
            actual_start: p.actual_start,
            actual_end: p.actual_end,
        }
    }
}

#[async_trait]
impl Page for ProjectsPage {
    type Data = ProjectsData;

    fn title(&self) -> &'static str {
        "Projects"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let (mut projects, mut rigs, mut fields, mut platforms, mut wells) = tokio::join!(
            fetch_or_empty::<Project>(client),
            fetch_or_empty::<Rig>(client),
            fetch_or_empty::<Field>(client),
            fetch_or_empty::<Platform>(client),
            fetch_or_empty::<Well>(client),
        );
        let failures = collect_failures([
            projects.failure.take(),
            rigs.failure.take(),
            fields.failure.take(),
            platforms.failure.take(),
            wells.failure.take(),
        ]);
        let data = ProjectsData {
            projects: projects.page.results,
            rigs: LookupMap::from_records(rigs.page.results),
            fields: LookupMap::from_records(fields.page.results),
            platforms: LookupMap::from_records(platforms.page.results),
            wells: LookupMap::from_records(wells.page.results),
        };
        (data, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(
            self.title(),
            &[
                "Project",
                "Type",
                "Field",
                "Platform",
                "Well",
                "Rig",
                "Status",
                "Planned Start",
                "Planned End",
                "Duration (days)",
                "Rig Day Rate",
                "Est. Cost",
                "Actual Start",
                "Actual End",
                "ID",
            ],
        );
        for row in data.rows() {
            grid.push_row(vec![
                row.name,
                enum_label(row.project_type.as_str()),
                row.field,
                row.platform,
                row.well,
                row.rig,
                enum_label(row.status.as_str()),
                format_date(row.planned_start),
                format_date(row.planned_end),
                row.duration_days.map(|d| d.to_string()).unwrap_or_default(),
                format_money_str(row.rig_day_rate.as_deref()),
                row.estimated_cost
                    .filter(|cost| *cost != 0.0)
                    .map(format_money)
                    .unwrap_or_default(),
                format_date(row.actual_start),
                format_date(row.actual_end),
                id_cell(row.id),
            ]);
        }
        grid
    }
}

pub struct CampaignsPage;

#[derive(Debug, Default)]
pub struct CampaignsData {
    pub campaigns: Vec<Campaign>,
    pub scenarios: LookupMap<Scenario>,
    pub rigs: LookupMap<Rig>,
    pub fields: LookupMap<Field>,
}

#[async_trait]
impl Page for CampaignsPage {
    type Data = CampaignsData;

    fn title(&self) -> &'static str {
        "Campaigns"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let (mut campaigns, mut scenarios, mut rigs, mut fields) = tokio::join!(
            fetch_or_empty::<Campaign>(client),
            fetch_or_empty::<Scenario>(client),
            fetch_or_empty::<Rig>(client),
            fetch_or_empty::<Field>(client),
        );
        let failures = collect_failures([
            campaigns.failure.take(),
            scenarios.failure.take(),
            rigs.failure.take(),
            fields.failure.take(),
        ]);
        let data = CampaignsData {
            campaigns: campaigns.page.results,
            scenarios: LookupMap::from_records(scenarios.page.results),
            rigs: LookupMap::from_records(rigs.page.results),
            fields: LookupMap::from_records(fields.page.results),
        };
        (data, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(
            self.title(),
            &["Campaign", "Type", "Scenario", "Rig", "Field", "Created", "ID"],
        );
        for c in &data.campaigns {
            grid.push_row(vec![
                c.name.clone(),
                enum_label(c.campaign_type.as_str()),
                data.scenarios.display(Some(c.scenario)),
                data.rigs.display(c.rig),
                data.fields.display(c.field),
                created_cell(c.created_at),
                id_cell(c.id),
            ]);
        }
        grid
    }
}

pub struct CampaignProjectsPage;

#[derive(Debug, Default)]
pub struct CampaignProjectsData {
    pub links: Vec<CampaignProject>,
    pub campaigns: LookupMap<Campaign>,
    pub projects: LookupMap<Project>,
}

#[async_trait]
impl Page for CampaignProjectsPage {
    type Data = CampaignProjectsData;

    fn title(&self) -> &'static str {
        "Campaign Projects"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let (mut links, mut campaigns, mut projects) = tokio::join!(
            fetch_or_empty::<CampaignProject>(client),
            fetch_or_empty::<Campaign>(client),
            fetch_or_empty::<Project>(client),
        );
        let failures = collect_failures([
            links.failure.take(),
            campaigns.failure.take(),
            projects.failure.take(),
        ]);
        let data = CampaignProjectsData {
            links: links.page.results,
            campaigns: LookupMap::from_records(campaigns.page.results),
            projects: LookupMap::from_records(projects.page.results),
        };
        (data, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(self.title(), &["Campaign", "Project", "Created", "ID"]);
        for link in &data.links {
            grid.push_row(vec![
                data.campaigns.display(Some(link.campaign)),
                data.projects.display(Some(link.project)),
                created_cell(link.created_at),
                id_cell(link.id),
            ]);
        }
        grid
    }
}

pub struct CalcRunsPage;

#[derive(Debug, Default)]
pub struct CalcRunsData {
    pub runs: Vec<CalcRun>,
    pub scenarios: LookupMap<Scenario>,
}

#[async_trait]
impl Page for CalcRunsPage {
    type Data = CalcRunsData;

    fn title(&self) -> &'static str {
        "Calculation Runs"
    }

    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>) {
        let (mut runs, mut scenarios) =
            tokio::join!(fetch_or_empty::<CalcRun>(client), fetch_or_empty::<Scenario>(client));
        let failures = collect_failures([runs.failure.take(), scenarios.failure.take()]);
        let data = CalcRunsData {
            runs: runs.page.results,
            scenarios: LookupMap::from_records(scenarios.page.results),
        };
        (data, failures)
    }

    fn grid(&self, data: &Self::Data) -> Grid {
        let mut grid = Grid::new(
            self.title(),
            &["Scenario", "Status", "Created By (User ID)", "Created", "Completed", "ID"],
        );
        for run in &data.runs {
            grid.push_row(vec![
                data.scenarios.display(Some(run.scenario)),
                enum_label(run.status.as_str()),
                run.created_by.map(id_cell).unwrap_or_default(),
                created_cell(run.created_at),
                format_datetime(run.completed_at),
                id_cell(run.id),
            ]);
        }
        grid
    }
}

// ---------------------------------------------------------------------------
// Run-time dispatch
// ---------------------------------------------------------------------------

async fn load<P: Page>(page: P, client: &ApiClient) -> Loaded<Grid> {
    let mut controller = PageController::new(page, client.clone());
    controller.activate().await;
    controller.into_grid()
}

/// Load the page for `kind` and return its grid.
pub async fn load_grid(kind: ResourceKind, client: &ApiClient) -> Loaded<Grid> {
    match kind {
        ResourceKind::Fields => load(FieldsPage, client).await,
        ResourceKind::Platforms => load(PlatformsPage, client).await,
        ResourceKind::Rigs => load(RigsPage, client).await,
        ResourceKind::Wells => load(WellsPage, client).await,
        ResourceKind::MaintenanceWindows => load(MaintenanceWindowsPage, client).await,
        ResourceKind::Scenarios => load(ScenariosPage, client).await,
        ResourceKind::Projects => load(ProjectsPage, client).await,
        ResourceKind::Campaigns => load(CampaignsPage, client).await,
        ResourceKind::CampaignProjects => load(CampaignProjectsPage, client).await,
        ResourceKind::CalcRuns => load(CalcRunsPage, client).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageState;
    use crate::testing::*;
    use serde_json::json;

    const RIG: &str = "11111111-1111-4111-8111-111111111111";
    const PROJECT: &str = "22222222-2222-4222-8222-222222222222";
    const FIELD: &str = "33333333-3333-4333-8333-333333333333";
    const SCENARIO: &str = "44444444-4444-4444-8444-444444444444";
    const CAMPAIGN: &str = "55555555-5555-4555-8555-555555555555";

    fn campaign_json() -> serde_json::Value {
        json!({
            "id": CAMPAIGN, "scenario": SCENARIO, "name": "North Sea 2024",
            "campaign_type": "rig_campaign", "rig": RIG, "field": FIELD,
            "created_at": CREATED
        })
    }

    #[tokio::test]
    async fn failing_reference_collection_shows_raw_foreign_key() {
        let transport = StaticTransport::new()
            .list("/campaigns/", vec![campaign_json()])
            .list(
                "/scenarios/",
                vec![json!({"id": SCENARIO, "name": "Base case", "status": "draft",
                            "created_by": SCENARIO, "created_at": CREATED})],
            )
            .failing("/rigs/", 500)
            .list("/fields/", vec![field_json(FIELD, "Alpha")]);
        let mut controller = PageController::new(CampaignsPage, client(transport));
        assert!(controller.is_loading());

        let loaded = controller.activate().await;
        assert!(loaded.is_partial());
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].resource, ResourceKind::Rigs);
        assert_eq!(loaded.failures[0].error.status(), Some(500));

        let grid = controller.grid().unwrap();
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.cell(0, "Campaign"), Some("North Sea 2024"));
        assert_eq!(grid.cell(0, "Scenario"), Some("Base case"));
        assert_eq!(grid.cell(0, "Rig"), Some(RIG));
        assert_eq!(grid.cell(0, "Field"), Some("Alpha"));
        assert_eq!(grid.cell(0, "Type"), Some("Rig Campaign"));
    }

    #[tokio::test]
    async fn failing_primary_collection_renders_empty_grid() {
        let transport = StaticTransport::new()
            .failing("/calc-runs/", 503)
            .list("/scenarios/", vec![]);
        let mut controller = PageController::new(CalcRunsPage, client(transport));
        let loaded = controller.activate().await;
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].resource, ResourceKind::CalcRuns);
        assert!(controller.grid().unwrap().rows.is_empty());
    }

    #[tokio::test]
    async fn projects_sheet_derives_duration_and_cost() {
        let no_rig = "66666666-6666-4666-8666-666666666666";
        let transport = StaticTransport::new()
            .list(
                "/projects/",
                vec![
                    project_json(PROJECT, "Alpha-7 drill", Some(RIG), "2024-01-15", "2024-02-15"),
                    project_json(no_rig, "Beta workover", None, "2024-03-01", "2024-03-11"),
                ],
            )
            .list("/rigs/", vec![rig_json(RIG, "Borr Gerd", "50000")])
            .list("/fields/", vec![])
            .list("/platforms/", vec![])
            .list("/wells/", vec![]);
        let mut controller = PageController::new(ProjectsPage, client(transport));
        let loaded = controller.activate().await;
        assert!(!loaded.is_partial());

        let rows = loaded.data.rows();
        assert_eq!(rows[0].duration_days, Some(31));
        assert_eq!(rows[0].rig, "Borr Gerd");
        assert_eq!(rows[0].rig_day_rate.as_deref(), Some("50000"));
        assert_eq!(rows[0].estimated_cost, Some(1_550_000.0));
        assert_eq!(rows[1].duration_days, Some(10));
        assert_eq!(rows[1].rig, "");
        assert_eq!(rows[1].estimated_cost, None);

        let grid = controller.grid().unwrap();
        assert_eq!(grid.cell(0, "Est. Cost"), Some("$1,550,000"));
        assert_eq!(grid.cell(0, "Rig Day Rate"), Some("$50,000"));
        assert_eq!(grid.cell(1, "Est. Cost"), Some(""));
    }

    #[tokio::test]
    async fn same_day_project_shows_blank_cost() {
        let transport = StaticTransport::new()
            .list(
                "/projects/",
                vec![project_json(PROJECT, "Rig move", Some(RIG), "2024-04-02", "2024-04-02")],
            )
            .list("/rigs/", vec![rig_json(RIG, "Borr Gerd", "50000")])
            .list("/fields/", vec![])
            .list("/platforms/", vec![])
            .list("/wells/", vec![]);
        let mut controller = PageController::new(ProjectsPage, client(transport));
        let loaded = controller.activate().await;
        assert_eq!(loaded.data.rows()[0].estimated_cost, Some(0.0));

        let grid = controller.grid().unwrap();
        assert_eq!(grid.cell(0, "Duration (days)"), Some("0"));
        assert_eq!(grid.cell(0, "Est. Cost"), Some(""));
    }

    #[tokio::test]
    async fn calc_runs_without_author_still_load() {
        let run = json!({
            "id": PROJECT, "scenario": SCENARIO, "status": "success",
            "params": {}, "results": {"total": 3}, "created_at": CREATED,
            "completed_at": "2024-01-01T00:05:00Z"
        });
        let transport = StaticTransport::new()
            .list("/calc-runs/", vec![run])
            .list(
                "/scenarios/",
                vec![json!({"id": SCENARIO, "name": "Base case", "status": "draft",
                            "created_by": SCENARIO, "created_at": CREATED})],
            );
        let mut controller = PageController::new(CalcRunsPage, client(transport));
        let loaded = controller.activate().await;
        assert!(!loaded.is_partial(), "{:?}", loaded.failures);
        assert_eq!(loaded.data.runs[0].created_by, None);

        let grid = controller.grid().unwrap();
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.cell(0, "Scenario"), Some("Base case"));
        assert_eq!(grid.cell(0, "Created By (User ID)"), Some(""));
        assert_eq!(grid.cell(0, "Completed"), Some("2024-01-01 00:05"));
    }

    #[tokio::test]
    async fn dangling_rig_reference_has_no_cost() {
        let transport = StaticTransport::new()
            .list(
                "/projects/",
                vec![project_json(PROJECT, "Orphan", Some(RIG), "2024-01-15", "2024-02-15")],
            )
            .list("/rigs/", vec![])
            .list("/fields/", vec![])
            .list("/platforms/", vec![])
            .list("/wells/", vec![]);
        let mut controller = PageController::new(ProjectsPage, client(transport));
        let rows = controller.activate().await.data.rows();
        assert_eq!(rows[0].rig, RIG);
        assert_eq!(rows[0].rig_day_rate, None);
        assert_eq!(rows[0].estimated_cost, None);
    }

    #[tokio::test]
    async fn activation_fans_out_one_request_per_collection() {
        let transport = std::sync::Arc::new(
            StaticTransport::new()
                .list("/wells/", vec![])
                .list("/fields/", vec![])
                .list("/platforms/", vec![]),
        );
        let api = ApiClient::new(crate::config::ClientConfig::new("/api"), transport.clone());
        let mut controller = PageController::new(WellsPage, api);
        controller.activate().await;
        controller.refresh().await;

        let mut urls: Vec<String> = transport.seen.lock().unwrap().iter().map(|r| r.url.clone()).collect();
        urls.sort();
        assert_eq!(
            urls,
            vec![
                "/api/fields/", "/api/fields/",
                "/api/platforms/", "/api/platforms/",
                "/api/wells/", "/api/wells/",
            ]
        );
        assert!(matches!(controller.state(), PageState::Loaded(_)));
    }

    #[tokio::test]
    async fn load_grid_dispatches_by_kind() {
        let transport = StaticTransport::new().list("/fields/", vec![field_json(FIELD, "Alpha")]);
        let loaded = load_grid(ResourceKind::Fields, &client(transport)).await;
        assert_eq!(loaded.data.title, "Fields");
        assert_eq!(loaded.data.cell(0, "Name"), Some("Alpha"));
        assert_eq!(loaded.data.cell(0, "Created"), Some("2024-01-01 00:00"));
    }
}
