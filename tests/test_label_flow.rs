//! End-to-end label lifecycle through the store's save pipeline.

use cablelabels::config::Config;
use cablelabels::model::{Cable, Device, Termination};
use cablelabels::render::LabelRenderer;
use cablelabels::storage::CableStore;

fn test_store() -> (tempfile::TempDir, CableStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = CableStore::open(&dir.path().join("cables.sqlite")).unwrap();
    (dir, store)
}

fn cable() -> Cable {
    Cable {
        a_terminations: vec![Termination {
            name: "eth0".to_string(),
            device: Device {
                name: "Device A".to_string(),
                ..Default::default()
            },
        }],
        b_terminations: vec![Termination {
            name: "eth0".to_string(),
            device: Device {
                name: "Device B".to_string(),
                ..Default::default()
            },
        }],
        ..Default::default()
    }
}

#[test]
fn label_auto_generated_on_create() {
    let (_dir, store) = test_store();
    let renderer = LabelRenderer::fixed("#{{cable.pk}}");

    let mut cable = cable();
    store.save(&mut cable, &renderer).unwrap();

    let id = cable.pk.expect("id assigned on insert");
    let fetched = store.get(id).unwrap();
    assert_eq!(fetched.label, format!("#{}", id));
}

#[test]
fn existing_label_not_overwritten() {
    let (_dir, store) = test_store();
    let renderer = LabelRenderer::fixed("#{{cable.pk}}");

    let mut cable = cable();
    cable.label = "Custom Label".to_string();
    store.save(&mut cable, &renderer).unwrap();

    let fetched = store.get(cable.pk.unwrap()).unwrap();
    assert_eq!(fetched.label, "Custom Label");
}

#[test]
fn label_regenerated_when_cleared() {
    let (_dir, store) = test_store();
    let renderer = LabelRenderer::fixed("#{{cable.pk}}");

    let mut cable = cable();
    cable.label = "temporary".to_string();
    store.save(&mut cable, &renderer).unwrap();
    let id = cable.pk.unwrap();

    // Clear the label and save again: the pre-write path re-derives it
    cable.label = String::new();
    store.save(&mut cable, &renderer).unwrap();

    let fetched = store.get(id).unwrap();
    assert_eq!(fetched.label, format!("#{}", id));
}

#[test]
fn save_is_idempotent_for_labeled_cables() {
    let (_dir, store) = test_store();
    let renderer = LabelRenderer::fixed("#{{cable.pk}}");

    let mut cable = cable();
    store.save(&mut cable, &renderer).unwrap();
    let first = store.get(cable.pk.unwrap()).unwrap().label;

    store.save(&mut cable, &renderer).unwrap();
    let second = store.get(cable.pk.unwrap()).unwrap().label;

    assert_eq!(first, second);
}

#[test]
fn render_failure_aborts_the_save() {
    let (_dir, store) = test_store();
    // References an attribute no cable in this test has
    let renderer = LabelRenderer::fixed("{{cable.a_terminations.first().device.rack.name}}");

    let mut unsaved = cable();
    assert!(store.save(&mut unsaved, &renderer).is_err());
}

#[test]
fn template_changes_apply_on_the_next_save() {
    let (dir, store) = test_store();
    let config_path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.labels.template = "A-{{cable.pk}}".to_string();
    config.save(&config_path).unwrap();

    let renderer = LabelRenderer::from_config_path(Some(config_path.clone()));

    let mut first = cable();
    store.save(&mut first, &renderer).unwrap();
    assert_eq!(first.label, format!("A-{}", first.pk.unwrap()));

    // The renderer re-reads the config file on every render
    config.labels.template = "B-{{cable.pk}}".to_string();
    config.save(&config_path).unwrap();

    let mut second = cable();
    store.save(&mut second, &renderer).unwrap();
    assert_eq!(second.label, format!("B-{}", second.pk.unwrap()));
}

#[test]
fn device_name_template_through_the_pipeline() {
    let (_dir, store) = test_store();
    let renderer = LabelRenderer::fixed(
        "{{cable.a_terminations.first().device.name}}/{{cable.b_terminations.first().device.name}}",
    );

    let mut cable = cable();
    store.save(&mut cable, &renderer).unwrap();

    let fetched = store.get(cable.pk.unwrap()).unwrap();
    assert_eq!(fetched.label, "Device A/Device B");
}
