//! Domain DTOs for the drilling-campaign API.
//!
//! # Design
//! These mirror the backend serializers field for field. Decimal columns
//! (`day_rate`, `lat`, `lon`) stay strings exactly as the backend sends them.
//! Every enum has an `Unknown` catch-all so a newer backend adding a value
//! does not make whole collections undecodable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub type Id = Uuid;
pub type JsonObject = Map<String, Value>;

macro_rules! wire_names {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Unknown => "unknown",
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Core assets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub id: Id,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlatformStatus {
    Operating,
    Maintenance,
    Shutdown,
    #[serde(other)]
    Unknown,
}

wire_names!(PlatformStatus {
    Operating => "operating",
    Maintenance => "maintenance",
    Shutdown => "shutdown",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Platform {
    pub id: Id,
    pub field: Id,
    pub name: String,
    pub status: PlatformStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RigKind {
    Jackup,
    Mmwu,
    Hwu,
    Other,
    #[serde(other)]
    Unknown,
}

wire_names!(RigKind {
    Jackup => "jackup",
    Mmwu => "mmwu",
    Hwu => "hwu",
    Other => "other",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RigStatus {
    Active,
    Standby,
    Maintenance,
    #[serde(other)]
    Unknown,
}

wire_names!(RigStatus {
    Active => "active",
    Standby => "standby",
    Maintenance => "maintenance",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rig {
    pub id: Id,
    pub name: String,
    pub rig_kind: RigKind,
    pub day_rate: String,
    pub status: RigStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WellKind {
    PlatformWell,
    ExplorationOpenLocation,
    #[serde(other)]
    Unknown,
}

wire_names!(WellKind {
    PlatformWell => "platform_well",
    ExplorationOpenLocation => "exploration_open_location",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WellType {
    Exploration,
    Development,
    #[serde(other)]
    Unknown,
}

wire_names!(WellType {
    Exploration => "exploration",
    Development => "development",
});

/// A well. `platform` is absent for exploration open locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Well {
    pub id: Id,
    pub name: String,
    pub field: Id,
    pub platform: Option<Id>,
    pub well_kind: WellKind,
    #[serde(rename = "type")]
    pub well_type: WellType,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceWindow {
    pub id: Id,
    pub platform: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Draft,
    Approved,
    Archived,
    #[serde(other)]
    Unknown,
}

wire_names!(ScenarioStatus {
    Draft => "draft",
    Approved => "approved",
    Archived => "archived",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub id: Id,
    pub name: String,
    pub status: ScenarioStatus,
    pub created_by: Id,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Drilling,
    Workover,
    PlugAndAbandon,
    Fracturing,
    PlatformService,
    Uwild,
    RigOverhaul,
    Other,
    #[serde(other)]
    Unknown,
}

wire_names!(ProjectType {
    Drilling => "drilling",
    Workover => "workover",
    PlugAndAbandon => "plug_and_abandon",
    Fracturing => "fracturing",
    PlatformService => "platform_service",
    Uwild => "uwild",
    RigOverhaul => "rig_overhaul",
    Other => "other",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    InProgress,
    Complete,
    OnHold,
    Canceled,
    #[serde(other)]
    Unknown,
}

wire_names!(ProjectStatus {
    Planned => "planned",
    InProgress => "in_progress",
    Complete => "complete",
    OnHold => "on_hold",
    Canceled => "canceled",
});

/// A scheduled unit of work. The planned dates are optional on the client so
/// that a partially filled record still renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Id,
    pub name: String,
    pub project_type: ProjectType,
    pub field: Option<Id>,
    pub platform: Option<Id>,
    pub well: Option<Id>,
    pub rig: Option<Id>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub planned_start: Option<NaiveDate>,
    #[serde(default)]
    pub planned_end: Option<NaiveDate>,
    #[serde(default)]
    pub actual_start: Option<NaiveDate>,
    #[serde(default)]
    pub actual_end: Option<NaiveDate>,
    #[serde(default)]
    pub dependencies: JsonObject,
    #[serde(default)]
    pub extras: JsonObject,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    RigCampaign,
    FieldOperations,
    #[serde(other)]
    Unknown,
}

wire_names!(CampaignType {
    RigCampaign => "rig_campaign",
    FieldOperations => "field_operations",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: Id,
    pub scenario: Id,
    pub name: String,
    pub campaign_type: CampaignType,
    pub rig: Option<Id>,
    pub field: Option<Id>,
    pub created_at: DateTime<Utc>,
}

/// Link between a campaign and one of its projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignProject {
    pub id: Id,
    pub campaign: Id,
    pub project: Id,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CalcRunStatus {
    Pending,
    Running,
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

wire_names!(CalcRunStatus {
    Pending => "pending",
    Running => "running",
    Success => "success",
    Failed => "failed",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalcRun {
    pub id: Id,
    pub scenario: Id,
    pub status: CalcRunStatus,
    #[serde(default)]
    pub params: JsonObject,
    #[serde(default)]
    pub results: JsonObject,
    /// Write-only on the backend; absent from most responses.
    #[serde(default)]
    pub created_by: Option<Id>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Write payloads (POST / PUT bodies)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDraft {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformDraft {
    pub field: Id,
    pub name: String,
    pub status: PlatformStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RigDraft {
    pub name: String,
    pub rig_kind: RigKind,
    pub day_rate: String,
    pub status: RigStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellDraft {
    pub name: String,
    pub field: Id,
    pub platform: Option<Id>,
    pub well_kind: WellKind,
    #[serde(rename = "type")]
    pub well_type: WellType,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceWindowDraft {
    pub platform: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDraft {
    pub name: String,
    pub status: ScenarioStatus,
    pub created_by: Id,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub project_type: ProjectType,
    pub field: Option<Id>,
    pub platform: Option<Id>,
    pub well: Option<Id>,
    pub rig: Option<Id>,
    pub status: ProjectStatus,
    pub planned_start: NaiveDate,
    pub planned_end: NaiveDate,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    #[serde(default)]
    pub dependencies: JsonObject,
    #[serde(default)]
    pub extras: JsonObject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignDraft {
    pub scenario: Id,
    pub name: String,
    pub campaign_type: CampaignType,
    pub rig: Option<Id>,
    pub field: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignProjectDraft {
    pub campaign: Id,
    pub project: Id,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalcRunDraft {
    pub scenario: Id,
    pub status: CalcRunStatus,
    #[serde(default)]
    pub params: JsonObject,
    #[serde(default)]
    pub results: JsonObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Envelopes and operational endpoints
// ---------------------------------------------------------------------------

/// One page of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// The substitute used when a list request fails.
    pub fn empty() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Health {
    pub ok: bool,
    #[serde(default)]
    pub service: String,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaEndpoint {
    pub name: Option<String>,
    pub pattern: String,
    #[serde(default)]
    pub lookup: Option<String>,
}

/// `GET /schema-lite`: the routes the backend exposes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaLite {
    #[serde(default)]
    pub service: String,
    pub count: usize,
    pub endpoints: Vec<SchemaEndpoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_decodes_type_and_null_platform() {
        let well: Well = serde_json::from_str(
            r#"{"id":"6f1c1b52-3f43-4d8e-9a53-0c3a5a0d2b11","name":"EXP-1",
                "field":"0e5f6a39-3f3c-4fb1-9d0a-0f1f2f3f4f5f","platform":null,
                "well_kind":"exploration_open_location","type":"exploration",
                "lat":"57.100000","lon":"2.300000","created_at":"2024-03-01T08:00:00Z"}"#,
        )
        .unwrap();
        assert!(well.platform.is_none());
        assert_eq!(well.well_type, WellType::Exploration);
        assert_eq!(well.lat.as_deref(), Some("57.100000"));
    }

    #[test]
    fn unknown_enum_value_does_not_fail_decode() {
        let status: RigStatus = serde_json::from_str(r#""decommissioned""#).unwrap();
        assert_eq!(status, RigStatus::Unknown);
        let kind: RigKind = serde_json::from_str(r#""other""#).unwrap();
        assert_eq!(kind, RigKind::Other);
    }

    #[test]
    fn wire_names_match_serde() {
        let encoded = serde_json::to_value(ProjectType::PlugAndAbandon).unwrap();
        assert_eq!(encoded, ProjectType::PlugAndAbandon.as_str());
        assert_eq!(ProjectStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn project_tolerates_missing_dates() {
        let project: Project = serde_json::from_str(
            r#"{"id":"6f1c1b52-3f43-4d8e-9a53-0c3a5a0d2b11","name":"P1","project_type":"drilling",
                "field":null,"platform":null,"well":null,"rig":null,"status":"planned",
                "created_at":"2024-03-01T08:00:00+00:00"}"#,
        )
        .unwrap();
        assert!(project.planned_start.is_none());
        assert!(project.dependencies.is_empty());
    }

    #[test]
    fn paginated_decodes_envelope() {
        let page: Paginated<Field> = serde_json::from_str(
            r#"{"count":1,"next":null,"previous":null,"results":[
                {"id":"6f1c1b52-3f43-4d8e-9a53-0c3a5a0d2b11","name":"Alpha","created_at":"2024-01-01T00:00:00Z"}]}"#,
        )
        .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].name, "Alpha");
        assert_eq!(Paginated::<Field>::default(), Paginated::empty());
    }
}
