//! In-memory record store with the backend's write validation.
//!
//! Records are kept as JSON objects keyed by id, one map per collection.
//! Every write goes through [`Store::write`]: field-level checks driven by
//! the [`schema`](crate::schema) table, then the cross-field rules of the
//! collection.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{AppError, FieldErrors};
use crate::schema::{FieldKind, FieldSpec, ResourceSpec};

pub type Record = Map<String, Value>;

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 500;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub count: usize,
    pub page: usize,
    pub page_size: usize,
    pub results: Vec<Value>,
}

impl ListPage {
    pub fn has_next(&self) -> bool {
        self.page * self.page_size < self.count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[derive(Debug, Default)]
pub struct Store {
    collections: HashMap<&'static str, BTreeMap<Uuid, Record>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, slug: &str) -> usize {
        self.collections.get(slug).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, slug: &str, id: Uuid) -> bool {
        self.collections
            .get(slug)
            .is_some_and(|records| records.contains_key(&id))
    }

    pub fn get(&self, spec: &ResourceSpec, id: Uuid) -> Result<Value, AppError> {
        self.collections
            .get(spec.slug)
            .and_then(|records| records.get(&id))
            .cloned()
            .map(Value::Object)
            .ok_or(AppError::NotFound)
    }

    pub fn list(&self, spec: &ResourceSpec, params: &ListParams) -> Result<ListPage, AppError> {
        let needle = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let mut matched: Vec<&Record> = self
            .collections
            .get(spec.slug)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter(|record| match &needle {
                Some(needle) => spec.search.iter().any(|name| {
                    record
                        .get(*name)
                        .and_then(Value::as_str)
                        .is_some_and(|v| v.to_lowercase().contains(needle))
                }),
                None => true,
            })
            .collect();

        let ordering = params.ordering.as_deref().unwrap_or(spec.ordering);
        let (key, descending) = match ordering.strip_prefix('-') {
            Some(key) => (key, true),
            None => (ordering, false),
        };
        matched.sort_by(|a, b| {
            let ord = compare(a.get(key), b.get(key)).then_with(|| compare(a.get("id"), b.get("id")));
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });

        let page_size = params
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = params.page.unwrap_or(1);
        let count = matched.len();
        let last_page = count.div_ceil(page_size).max(1);
        if page == 0 || page > last_page {
            return Err(AppError::NotFound);
        }
        let results = matched
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .map(|record| Value::Object(record.clone()))
            .collect();
        Ok(ListPage {
            count,
            page,
            page_size,
            results,
        })
    }

    pub fn create(&mut self, spec: &ResourceSpec, input: Value) -> Result<Value, AppError> {
        let record = self.write(spec, defaults(spec), input, false)?;
        Ok(self.insert(spec, Uuid::new_v4(), Utc::now(), record))
    }

    /// Full replacement: every required field must be present in `input`.
    pub fn replace(&mut self, spec: &ResourceSpec, id: Uuid, input: Value) -> Result<Value, AppError> {
        let existing = self.existing(spec, id)?;
        let record = self.write(spec, existing, input, false)?;
        self.commit(spec, id, record)
    }

    pub fn update(&mut self, spec: &ResourceSpec, id: Uuid, input: Value) -> Result<Value, AppError> {
        let existing = self.existing(spec, id)?;
        let record = self.write(spec, existing, input, true)?;
        self.commit(spec, id, record)
    }

    pub fn delete(&mut self, spec: &ResourceSpec, id: Uuid) -> Result<(), AppError> {
        self.collections
            .get_mut(spec.slug)
            .and_then(|records| records.remove(&id))
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }

    /// Store an already-valid record under a fixed id. Used for seeding.
    pub fn insert(
        &mut self,
        spec: &ResourceSpec,
        id: Uuid,
        created_at: DateTime<Utc>,
        mut record: Record,
    ) -> Value {
        record.insert("id".into(), Value::String(id.to_string()));
        record.insert(
            "created_at".into(),
            Value::String(created_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        self.collections
            .entry(spec.slug)
            .or_default()
            .insert(id, record.clone());
        Value::Object(record)
    }

    fn existing(&self, spec: &ResourceSpec, id: Uuid) -> Result<Record, AppError> {
        self.collections
            .get(spec.slug)
            .and_then(|records| records.get(&id))
            .cloned()
            .ok_or(AppError::NotFound)
    }

    fn commit(&mut self, spec: &ResourceSpec, id: Uuid, record: Record) -> Result<Value, AppError> {
        let slot = self
            .collections
            .get_mut(spec.slug)
            .and_then(|records| records.get_mut(&id))
            .ok_or(AppError::NotFound)?;
        *slot = record;
        Ok(Value::Object(slot.clone()))
    }

    /// Validate `input` against `spec` and apply it on top of `base`.
    pub fn write(
        &self,
        spec: &ResourceSpec,
        mut base: Record,
        input: Value,
        partial: bool,
    ) -> Result<Record, AppError> {
        let Value::Object(input) = input else {
            return Err(AppError::field(
                "non_field_errors",
                format!("Invalid data. Expected a dictionary, but got {}.", type_name(&input)),
            ));
        };

        let mut errors = FieldErrors::new();
        for field in spec.fields {
            match input.get(field.name) {
                Some(value) => match self.clean(field, value) {
                    Ok(clean) => {
                        base.insert(field.name.to_string(), clean);
                    }
                    Err(message) => {
                        errors.insert(field.name.to_string(), vec![message]);
                    }
                },
                None if field.required && !partial => {
                    errors.insert(field.name.to_string(), vec!["This field is required.".into()]);
                }
                None => {}
            }
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let id = base.get("id").and_then(Value::as_str).and_then(|s| s.parse().ok());
        let errors = self.cross_check(spec.slug, &base, id);
        if errors.is_empty() {
            Ok(base)
        } else {
            Err(AppError::Validation(errors))
        }
    }

    fn clean(&self, field: &FieldSpec, value: &Value) -> Result<Value, String> {
        if value.is_null() {
            return match field.kind {
                _ if field.required => Err("This field may not be null.".into()),
                FieldKind::Text | FieldKind::Object => Err("This field may not be null.".into()),
                _ => Ok(Value::Null),
            };
        }
        match field.kind {
            FieldKind::Text => match value.as_str() {
                Some(s) if field.required && s.trim().is_empty() => {
                    Err("This field may not be blank.".into())
                }
                Some(s) => Ok(Value::String(s.to_string())),
                None => Err("Not a valid string.".into()),
            },
            FieldKind::Decimal(places) => {
                let parsed = match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                parsed
                    .filter(|n| n.is_finite())
                    .map(|n| Value::String(format!("{n:.places$}")))
                    .ok_or_else(|| "A valid number is required.".into())
            }
            FieldKind::Date => value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
                .ok_or_else(|| {
                    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.".into()
                }),
            FieldKind::DateTime => value
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| {
                    Value::String(
                        dt.with_timezone(&Utc)
                            .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                    )
                })
                .ok_or_else(|| {
                    "Datetime has wrong format. Use one of these formats instead: \
                     YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z]."
                        .into()
                }),
            FieldKind::Object => match value {
                Value::Object(_) => Ok(value.clone()),
                _ => Err("Value must be a JSON object.".into()),
            },
            FieldKind::Uuid => value
                .as_str()
                .and_then(|s| s.parse::<Uuid>().ok())
                .map(|id| Value::String(id.to_string()))
                .ok_or_else(|| "Must be a valid UUID.".into()),
            FieldKind::Reference(target) => {
                let Some(raw) = value.as_str() else {
                    return Err(format!(
                        "Incorrect type. Expected pk value, received {}.",
                        type_name(value)
                    ));
                };
                match raw.parse::<Uuid>() {
                    Ok(id) if self.contains(target, id) => Ok(Value::String(id.to_string())),
                    _ => Err(format!("Invalid pk \"{raw}\" - object does not exist.")),
                }
            }
            FieldKind::Choice(choices) => match value.as_str() {
                Some(s) if choices.contains(&s) => Ok(Value::String(s.to_string())),
                _ => Err(format!("\"{}\" is not a valid choice.", display_raw(value))),
            },
        }
    }

    fn cross_check(&self, slug: &str, record: &Record, id: Option<Uuid>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mut fail = |name: &str, message: &str| {
            errors.insert(name.to_string(), vec![message.to_string()]);
        };
        let text = |name: &str| record.get(name).and_then(Value::as_str);
        let date = |name: &str| text(name).and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        let set = |name: &str| record.get(name).is_some_and(|v| !v.is_null());

        match slug {
            "wells" => match text("well_kind") {
                Some("platform_well") if !set("platform") => {
                    fail("platform", "Platform well must reference a platform.");
                }
                Some("exploration_open_location") if set("platform") => {
                    fail("platform", "Exploration open location must not reference a platform.");
                }
                Some("exploration_open_location") if !set("lat") || !set("lon") => {
                    fail("lat", "Exploration well requires lat/lon.");
                    fail("lon", "Exploration well requires lat/lon.");
                }
                _ => {}
            },
            "maintenance-windows" => {
                if let (Some(start), Some(end)) = (date("start_date"), date("end_date")) {
                    if end < start {
                        fail("end_date", "end_date must be on or after start_date.");
                    } else if self.overlaps_window(text("platform"), start, end, id) {
                        fail("start_date", "Overlaps another maintenance window for this platform.");
                    }
                }
            }
            "projects" => {
                if let (Some(start), Some(end)) = (date("planned_start"), date("planned_end")) {
                    if end < start {
                        fail("planned_end", "planned_end must be on or after planned_start.");
                    }
                }
            }
            "campaigns" => match text("campaign_type") {
                Some("rig_campaign") => {
                    if !set("rig") {
                        fail("rig", "Rig campaign requires a rig.");
                    }
                    if set("field") {
                        fail("field", "Rig campaign must not set a field.");
                    }
                }
                Some("field_operations") => {
                    if !set("field") {
                        fail("field", "Field operations require a field.");
                    }
                    if set("rig") {
                        fail("rig", "Field operations must not set a rig.");
                    }
                }
                _ => {}
            },
            _ => {}
        }
        errors
    }

    fn overlaps_window(
        &self,
        platform: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> bool {
        let Some(platform) = platform else {
            return false;
        };
        let Some(windows) = self.collections.get("maintenance-windows") else {
            return false;
        };
        windows
            .iter()
            .filter(|(id, _)| Some(**id) != exclude)
            .filter(|(_, w)| w.get("platform").and_then(Value::as_str) == Some(platform))
            .any(|(_, w)| {
                let bound = |name: &str| {
                    w.get(name)
                        .and_then(Value::as_str)
                        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                };
                matches!((bound("start_date"), bound("end_date")), (Some(s), Some(e)) if s <= end && e >= start)
            })
    }
}

/// Initial values for the fields a create request may omit.
fn defaults(spec: &ResourceSpec) -> Record {
    spec.fields
        .iter()
        .filter(|f| !f.required)
        .map(|f| {
            let value = match f.kind {
                FieldKind::Text => Value::String(String::new()),
                FieldKind::Object => Value::Object(Map::new()),
                FieldKind::Uuid => Value::String(Uuid::nil().to_string()),
                _ => Value::Null,
            };
            (f.name.to_string(), value)
        })
        .collect()
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Null) | None, Some(Value::Null) | None) => Ordering::Equal,
        (Some(Value::Null) | None, _) => Ordering::Greater,
        (_, Some(Value::Null) | None) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn display_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
