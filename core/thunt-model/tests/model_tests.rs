use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use thunt_model::{Entity, EntityDescriptor, Hunt, Mission};
use thunt_types::{EntityKey, NumericId, RandomId};

// ── Descriptor ────────────────────────────────────────────────────

#[test]
fn descriptor_reports_kind_and_route() {
    let missions = EntityDescriptor::<Mission>::new();
    assert_eq!(missions.kind_name(), "Mission");
    assert_eq!(missions.route_segment(), "mission");

    let hunts = EntityDescriptor::<Hunt>::new();
    assert_eq!(hunts.kind_name(), "Hunt");
    assert_eq!(hunts.route_segment(), "hunt");
}

#[test]
fn descriptor_make_blank_has_no_id() {
    let blank = EntityDescriptor::<Mission>::new().make_blank();
    assert_eq!(blank, Mission::default());
    assert!(blank.id.is_none());
}

#[test]
fn descriptor_element_at_mutations_reach_the_list() {
    let descriptor = EntityDescriptor::<Mission>::new();
    let mut list = descriptor.make_list();
    list.push(Mission {
        name: "first".into(),
        ..Mission::default()
    });
    list.push(Mission {
        name: "second".into(),
        ..Mission::default()
    });

    for (index, raw) in [10, 20].into_iter().enumerate() {
        let entity = descriptor.element_at(&mut list, index).unwrap();
        entity.set_id(NumericId::new(raw).into());
    }

    assert_eq!(list[0].id, Some(EntityKey::Numeric(NumericId::new(10))));
    assert_eq!(list[1].id, Some(EntityKey::Numeric(NumericId::new(20))));
}

#[test]
fn descriptor_element_at_out_of_range() {
    let descriptor = EntityDescriptor::<Hunt>::new();
    let mut list = descriptor.make_list();
    assert!(descriptor.element_at(&mut list, 0).is_none());
}

// ── Strict decode ─────────────────────────────────────────────────

#[test]
fn mission_decodes_known_fields() {
    let mission: Mission =
        serde_json::from_value(json!({"name": "Treasure Map", "description": "desc"})).unwrap();
    assert_eq!(mission.name, "Treasure Map");
    assert_eq!(mission.description, "desc");
    assert!(mission.id.is_none());
}

#[test]
fn mission_missing_fields_default() {
    let mission: Mission = serde_json::from_value(json!({"name": "only"})).unwrap();
    assert_eq!(mission.description, "");
}

#[test]
fn mission_rejects_unknown_field() {
    let result: Result<Mission, _> =
        serde_json::from_value(json!({"name": "x", "colour": "red"}));
    assert!(result.is_err());
}

#[test]
fn mission_rejects_client_supplied_id() {
    let result: Result<Mission, _> = serde_json::from_value(json!({"id": 5, "name": "x"}));
    assert!(result.is_err());
}

#[test]
fn hunt_uses_wire_field_names() {
    let hunt: Hunt = serde_json::from_value(json!({
        "missionID": 7,
        "timestamp": "2024-03-01T12:00:00Z"
    }))
    .unwrap();
    assert_eq!(hunt.mission_id, 7);
    assert_eq!(hunt.timestamp, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());

    let rejected: Result<Hunt, _> = serde_json::from_value(json!({"mission_id": 7}));
    assert!(rejected.is_err());
}

// ── Identifier injection ──────────────────────────────────────────

#[test]
fn unset_id_is_not_serialized() {
    let mission = Mission {
        id: None,
        name: "n".into(),
        description: "d".into(),
    };
    let value = serde_json::to_value(&mission).unwrap();
    assert_eq!(value, json!({"name": "n", "description": "d"}));
}

#[test]
fn numeric_id_is_injected_first() {
    let mut mission = Mission {
        id: None,
        name: "Treasure Map".into(),
        description: "desc".into(),
    };
    mission.set_id(NumericId::new(7).into());
    assert_eq!(
        serde_json::to_string(&mission).unwrap(),
        r#"{"id":7,"name":"Treasure Map","description":"desc"}"#
    );
}

#[test]
fn random_id_is_injected_as_string() {
    let id = RandomId::new();
    let mut hunt = Hunt {
        mission_id: 3,
        ..Hunt::default()
    };
    hunt.set_id(id.into());
    let value = serde_json::to_value(&hunt).unwrap();
    assert_eq!(value["id"], json!(id.to_string()));
    assert_eq!(value["missionID"], json!(3));
}

#[test]
fn clear_id_removes_identifier() {
    let mut mission = Mission::default();
    mission.set_id(NumericId::new(1).into());
    mission.clear_id();
    assert!(mission.id.is_none());
}
