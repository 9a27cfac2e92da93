//! Demo data for running the console against a populated backend.

use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::schema::lookup;
use crate::store::Store;

fn create(store: &mut Store, slug: &str, body: Value) -> Result<Value, AppError> {
    let spec = lookup(slug).ok_or(AppError::NotFound)?;
    store.create(spec, body)
}

/// Fill `store` with a small but fully linked campaign plan.
pub fn seed(store: &mut Store) -> Result<(), AppError> {
    let brage = create(store, "fields", json!({"name": "Brage"}))?;
    let gina = create(store, "fields", json!({"name": "Gina Krog"}))?;

    let brage_a = create(
        store,
        "platforms",
        json!({"field": brage["id"], "name": "Brage A", "status": "operating"}),
    )?;
    let gina_p = create(
        store,
        "platforms",
        json!({"field": gina["id"], "name": "Gina Krog P1", "status": "maintenance"}),
    )?;

    let endurance = create(
        store,
        "rigs",
        json!({"name": "Endurance", "rig_kind": "jackup", "day_rate": "50000", "status": "active"}),
    )?;
    let atlas = create(
        store,
        "rigs",
        json!({"name": "Atlas", "rig_kind": "mmwu", "day_rate": "120000.50", "status": "standby"}),
    )?;
    create(
        store,
        "rigs",
        json!({"name": "Hercules", "rig_kind": "hwu", "day_rate": "38000", "status": "maintenance"}),
    )?;

    let b12 = create(
        store,
        "wells",
        json!({
            "name": "B-12", "field": brage["id"], "platform": brage_a["id"],
            "well_kind": "platform_well", "type": "development"
        }),
    )?;
    let g7 = create(
        store,
        "wells",
        json!({
            "name": "G-7", "field": gina["id"], "platform": gina_p["id"],
            "well_kind": "platform_well", "type": "development"
        }),
    )?;
    create(
        store,
        "wells",
        json!({
            "name": "Wildcat North", "field": gina["id"],
            "well_kind": "exploration_open_location", "type": "exploration",
            "lat": "58.601200", "lon": "1.742300"
        }),
    )?;

    create(
        store,
        "maintenance-windows",
        json!({
            "platform": gina_p["id"], "start_date": "2024-04-01",
            "end_date": "2024-04-14", "reason": "Turnaround"
        }),
    )?;

    let base = create(
        store,
        "scenarios",
        json!({"name": "Base plan 2024", "status": "approved", "created_by": Uuid::nil()}),
    )?;

    let drill_b12 = create(
        store,
        "projects",
        json!({
            "name": "Drill B-12", "project_type": "drilling", "status": "complete",
            "field": brage["id"], "platform": brage_a["id"], "well": b12["id"], "rig": endurance["id"],
            "planned_start": "2024-01-01", "planned_end": "2024-02-01",
            "actual_start": "2024-01-03", "actual_end": "2024-02-04"
        }),
    )?;
    let workover = create(
        store,
        "projects",
        json!({
            "name": "Workover G-7", "project_type": "workover", "status": "in_progress",
            "field": gina["id"], "platform": gina_p["id"], "well": g7["id"], "rig": atlas["id"],
            "planned_start": "2024-02-10", "planned_end": "2024-03-15",
            "dependencies": {"depends_on": [drill_b12["id"]]}
        }),
    )?;
    create(
        store,
        "projects",
        json!({
            "name": "Brage A service", "project_type": "platform_service", "status": "planned",
            "field": brage["id"], "platform": brage_a["id"],
            "planned_start": "2024-05-01", "planned_end": "2024-05-10"
        }),
    )?;

    let rig_campaign = create(
        store,
        "campaigns",
        json!({
            "scenario": base["id"], "name": "Endurance 2024",
            "campaign_type": "rig_campaign", "rig": endurance["id"]
        }),
    )?;
    create(
        store,
        "campaigns",
        json!({
            "scenario": base["id"], "name": "Gina Krog field ops",
            "campaign_type": "field_operations", "field": gina["id"]
        }),
    )?;
    for project in [&drill_b12, &workover] {
        create(
            store,
            "campaign-projects",
            json!({"campaign": rig_campaign["id"], "project": project["id"]}),
        )?;
    }

    create(
        store,
        "calc-runs",
        json!({
            "scenario": base["id"], "status": "success",
            "params": {"horizon_days": 365}, "results": {"total_cost": 3_850_000},
            "completed_at": "2024-01-02T08:30:00Z"
        }),
    )?;
    Ok(())
}
