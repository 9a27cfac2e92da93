//! REST resources: where each entity lives and how it is written.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::*;

/// An entity exposed under its own collection path.
pub trait Resource: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Collection path, pluralized and slash-trailing.
    const PATH: &'static str;
    const KIND: ResourceKind;

    /// Body accepted by create and full update.
    type Draft: Serialize + Send + Sync;

    fn id(&self) -> Id;

    fn item_path(id: Id) -> String {
        format!("{}{id}/", Self::PATH)
    }
}

/// Resources that can be referred to by a human-readable name.
pub trait Named: Resource {
    fn name(&self) -> &str;
}

macro_rules! resource {
    ($ty:ty, $draft:ty, $kind:ident) => {
        impl Resource for $ty {
            const PATH: &'static str = ResourceKind::$kind.path();
            const KIND: ResourceKind = ResourceKind::$kind;
            type Draft = $draft;

            fn id(&self) -> Id {
                self.id
            }
        }
    };
    ($ty:ty, $draft:ty, $kind:ident, named) => {
        resource!($ty, $draft, $kind);

        impl Named for $ty {
            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

resource!(Field, FieldDraft, Fields, named);
resource!(Platform, PlatformDraft, Platforms, named);
resource!(Rig, RigDraft, Rigs, named);
resource!(Well, WellDraft, Wells, named);
resource!(MaintenanceWindow, MaintenanceWindowDraft, MaintenanceWindows);
resource!(Scenario, ScenarioDraft, Scenarios, named);
resource!(Project, ProjectDraft, Projects, named);
resource!(Campaign, CampaignDraft, Campaigns, named);
resource!(CampaignProject, CampaignProjectDraft, CampaignProjects);
resource!(CalcRun, CalcRunDraft, CalcRuns);

/// Every collection the backend exposes, for callers that pick one at run
/// time (the console, the mock backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Fields,
    Platforms,
    Rigs,
    Wells,
    MaintenanceWindows,
    Scenarios,
    Projects,
    Campaigns,
    CampaignProjects,
    CalcRuns,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::Fields,
        ResourceKind::Platforms,
        ResourceKind::Rigs,
        ResourceKind::Wells,
        ResourceKind::MaintenanceWindows,
        ResourceKind::Scenarios,
        ResourceKind::Projects,
        ResourceKind::Campaigns,
        ResourceKind::CampaignProjects,
        ResourceKind::CalcRuns,
    ];

    /// URL segment, e.g. `maintenance-windows`.
    pub const fn slug(self) -> &'static str {
        match self {
            ResourceKind::Fields => "fields",
            ResourceKind::Platforms => "platforms",
            ResourceKind::Rigs => "rigs",
            ResourceKind::Wells => "wells",
            ResourceKind::MaintenanceWindows => "maintenance-windows",
            ResourceKind::Scenarios => "scenarios",
            ResourceKind::Projects => "projects",
            ResourceKind::Campaigns => "campaigns",
            ResourceKind::CampaignProjects => "campaign-projects",
            ResourceKind::CalcRuns => "calc-runs",
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            ResourceKind::Fields => "/fields/",
            ResourceKind::Platforms => "/platforms/",
            ResourceKind::Rigs => "/rigs/",
            ResourceKind::Wells => "/wells/",
            ResourceKind::MaintenanceWindows => "/maintenance-windows/",
            ResourceKind::Scenarios => "/scenarios/",
            ResourceKind::Projects => "/projects/",
            ResourceKind::Campaigns => "/campaigns/",
            ResourceKind::CampaignProjects => "/campaign-projects/",
            ResourceKind::CalcRuns => "/calc-runs/",
        }
    }

    /// Route name in the backend's schema listing.
    pub const fn basename(self) -> &'static str {
        match self {
            ResourceKind::Fields => "field",
            ResourceKind::Platforms => "platform",
            ResourceKind::Rigs => "rig",
            ResourceKind::Wells => "well",
            ResourceKind::MaintenanceWindows => "maintenancewindow",
            ResourceKind::Scenarios => "scenario",
            ResourceKind::Projects => "project",
            ResourceKind::Campaigns => "campaign",
            ResourceKind::CampaignProjects => "campaignproject",
            ResourceKind::CalcRuns => "calcrun",
        }
    }

    pub fn item_path(self, id: Id) -> String {
        format!("{}{id}/", self.path())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    /// Accepts the URL slug, with underscores allowed in place of dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_matches('/').replace('_', "-").to_ascii_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| format!("unknown resource: {s}"))
    }
}
