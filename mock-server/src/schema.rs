//! Static description of every collection the backend serves: which fields a
//! record carries, which are required, and how each one is validated.

/// How a writable field is checked and normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Fixed-point number stored as a string with this many decimals.
    Decimal(usize),
    Date,
    DateTime,
    Object,
    Uuid,
    /// Id of a record in the collection with this slug.
    Reference(&'static str),
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: false,
    }
}

#[derive(Debug)]
pub struct ResourceSpec {
    pub slug: &'static str,
    pub basename: &'static str,
    pub fields: &'static [FieldSpec],
    /// Fields matched by the `search` query parameter.
    pub search: &'static [&'static str],
    /// Default ordering, `-` prefixed for descending.
    pub ordering: &'static str,
}

impl ResourceSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

use FieldKind::*;

const PLATFORM_STATUS: &[&str] = &["operating", "maintenance", "shutdown"];
const RIG_KIND: &[&str] = &["jackup", "mmwu", "hwu", "other"];
const RIG_STATUS: &[&str] = &["active", "standby", "maintenance"];
const WELL_KIND: &[&str] = &["platform_well", "exploration_open_location"];
const WELL_TYPE: &[&str] = &["exploration", "development"];
const SCENARIO_STATUS: &[&str] = &["draft", "approved", "archived"];
const PROJECT_TYPE: &[&str] = &[
    "drilling",
    "workover",
    "plug_and_abandon",
    "fracturing",
    "platform_service",
    "uwild",
    "rig_overhaul",
    "other",
];
const PROJECT_STATUS: &[&str] = &["planned", "in_progress", "complete", "on_hold", "canceled"];
const CAMPAIGN_TYPE: &[&str] = &["rig_campaign", "field_operations"];
const CALC_RUN_STATUS: &[&str] = &["pending", "running", "success", "failed"];

pub static RESOURCES: &[ResourceSpec] = &[
    ResourceSpec {
        slug: "fields",
        basename: "field",
        fields: &[required("name", Text)],
        search: &["name"],
        ordering: "name",
    },
    ResourceSpec {
        slug: "platforms",
        basename: "platform",
        fields: &[
            required("field", Reference("fields")),
            required("name", Text),
            required("status", Choice(PLATFORM_STATUS)),
        ],
        search: &["name", "status"],
        ordering: "name",
    },
    ResourceSpec {
        slug: "rigs",
        basename: "rig",
        fields: &[
            required("name", Text),
            required("rig_kind", Choice(RIG_KIND)),
            required("day_rate", Decimal(2)),
            required("status", Choice(RIG_STATUS)),
        ],
        search: &["name", "rig_kind", "status"],
        ordering: "name",
    },
    ResourceSpec {
        slug: "wells",
        basename: "well",
        fields: &[
            required("name", Text),
            required("field", Reference("fields")),
            optional("platform", Reference("platforms")),
            required("well_kind", Choice(WELL_KIND)),
            required("type", Choice(WELL_TYPE)),
            optional("lat", Decimal(6)),
            optional("lon", Decimal(6)),
        ],
        search: &["name", "well_kind", "type"],
        ordering: "name",
    },
    ResourceSpec {
        slug: "maintenance-windows",
        basename: "maintenancewindow",
        fields: &[
            required("platform", Reference("platforms")),
            required("start_date", Date),
            required("end_date", Date),
            optional("reason", Text),
        ],
        search: &["reason"],
        ordering: "start_date",
    },
    ResourceSpec {
        slug: "scenarios",
        basename: "scenario",
        fields: &[
            required("name", Text),
            required("status", Choice(SCENARIO_STATUS)),
            required("created_by", Uuid),
        ],
        search: &["name", "status"],
        ordering: "created_at",
    },
    ResourceSpec {
        slug: "projects",
        basename: "project",
        fields: &[
            required("name", Text),
            required("project_type", Choice(PROJECT_TYPE)),
            optional("field", Reference("fields")),
            optional("platform", Reference("platforms")),
            optional("well", Reference("wells")),
            optional("rig", Reference("rigs")),
            required("status", Choice(PROJECT_STATUS)),
            required("planned_start", Date),
            required("planned_end", Date),
            optional("actual_start", Date),
            optional("actual_end", Date),
            optional("dependencies", Object),
            optional("extras", Object),
        ],
        search: &["name", "project_type", "status"],
        ordering: "planned_start",
    },
    ResourceSpec {
        slug: "campaigns",
        basename: "campaign",
        fields: &[
            required("scenario", Reference("scenarios")),
            required("name", Text),
            required("campaign_type", Choice(CAMPAIGN_TYPE)),
            optional("rig", Reference("rigs")),
            optional("field", Reference("fields")),
        ],
        search: &["name", "campaign_type"],
        ordering: "name",
    },
    ResourceSpec {
        slug: "campaign-projects",
        basename: "campaignproject",
        fields: &[
            required("campaign", Reference("campaigns")),
            required("project", Reference("projects")),
        ],
        search: &[],
        ordering: "created_at",
    },
    ResourceSpec {
        slug: "calc-runs",
        basename: "calcrun",
        fields: &[
            required("scenario", Reference("scenarios")),
            required("status", Choice(CALC_RUN_STATUS)),
            optional("params", Object),
            optional("results", Object),
            optional("created_by", Uuid),
            optional("completed_at", DateTime),
        ],
        search: &["status"],
        ordering: "-created_at",
    },
];

pub fn lookup(slug: &str) -> Option<&'static ResourceSpec> {
    RESOURCES.iter().find(|r| r.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_reference_points_at_a_known_collection() {
        for resource in RESOURCES {
            for field in resource.fields {
                if let Reference(target) = field.kind {
                    assert!(lookup(target).is_some(), "{}.{}", resource.slug, field.name);
                }
            }
        }
    }

    #[test]
    fn lookup_by_slug() {
        assert_eq!(lookup("maintenance-windows").map(|r| r.basename), Some("maintenancewindow"));
        assert!(lookup("users").is_none());
    }

    #[test]
    fn wells_keep_the_wire_name_of_type() {
        let wells = lookup("wells").unwrap();
        assert_eq!(wells.field("type").map(|f| f.kind), Some(Choice(WELL_TYPE)));
    }
}
