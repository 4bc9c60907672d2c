//! Template rendering against a fully populated cable graph, including the
//! TIA-606-style labeling schemes the tool is typically configured with.

use cablelabels::model::{Cable, Device, DeviceType, Location, Manufacturer, Rack, Site, Termination};
use cablelabels::render::render_label;
use cablelabels::LabelError;

fn device(
    name: &str,
    site: &str,
    location: Option<&str>,
    rack: &str,
    position: i64,
    face: &str,
    manufacturer: &str,
) -> Device {
    Device {
        name: name.to_string(),
        site: Some(Site {
            name: site.to_string(),
        }),
        location: location.map(|name| Location {
            name: name.to_string(),
        }),
        rack: Some(Rack {
            name: rack.to_string(),
        }),
        position: Some(position),
        face: Some(face.to_string()),
        device_type: Some(DeviceType {
            model: None,
            manufacturer: Some(Manufacturer {
                name: manufacturer.to_string(),
            }),
        }),
    }
}

/// Cable 123 between SW01 (NYC/Floor2/R1A u42 front, Cisco) and
/// SW02 (NYC/Floor1/R2B u10 rear, HPE).
fn tia_cable() -> Cable {
    Cable {
        pk: Some(123),
        cable_type: Some("CAT6A".to_string()),
        status: Some("connected".to_string()),
        color: Some("blue".to_string()),
        length: Some(10),
        length_unit: Some("m".to_string()),
        a_terminations: vec![Termination {
            name: "gi1/0/1".to_string(),
            device: device("SW01", "NYC", Some("Floor2"), "R1A", 42, "front", "Cisco"),
        }],
        b_terminations: vec![Termination {
            name: "eth1/1".to_string(),
            device: device("SW02", "NYC", Some("Floor1"), "R2B", 10, "rear", "HPE"),
        }],
        ..Default::default()
    }
}

#[test]
fn default_template() {
    let label = render_label(&tia_cable(), "#{{cable.pk}}").unwrap();
    assert_eq!(label, "#123");
}

#[test]
fn custom_template_with_status() {
    let label = render_label(&tia_cable(), "Cable-{{cable.pk}}-{{cable.status}}").unwrap();
    assert_eq!(label, "Cable-123-connected");
}

#[test]
fn device_name_template() {
    let label = render_label(
        &tia_cable(),
        "{{cable.a_terminations.first().device.name}}/{{cable.b_terminations.first().device.name}}",
    )
    .unwrap();
    assert_eq!(label, "SW01/SW02");
}

#[test]
fn conditional_length_template() {
    let template = "{% if cable.length %}{{cable.length}}m{% else %}N/A{% endif %}";

    let label = render_label(&tia_cable(), template).unwrap();
    assert_eq!(label, "10m");

    let mut no_length = tia_cable();
    no_length.length = None;
    let label = render_label(&no_length, template).unwrap();
    assert_eq!(label, "N/A");
}

#[test]
fn basic_tia_606c_template() {
    let template = "{{cable.a_terminations.first().device.rack.name}}-\
                    {{cable.a_terminations.first().device.position}}\
                    {{cable.a_terminations.first().device.face|first|upper}}/\
                    {{cable.b_terminations.first().device.rack.name}}-\
                    {{cable.b_terminations.first().device.position}}\
                    {{cable.b_terminations.first().device.face|first|upper}}/\
                    {{cable.type|default('UTP')}}/C{{'{:05d}'.format(cable.pk)}}";
    let label = render_label(&tia_cable(), template).unwrap();
    assert_eq!(label, "R1A-42F/R2B-10R/CAT6A/C00123");
}

#[test]
fn site_based_template() {
    let template = "{{cable.a_terminations.first().device.site.name}}-\
                    {{cable.a_terminations.first().device.name}}/\
                    {{cable.b_terminations.first().device.site.name}}-\
                    {{cable.b_terminations.first().device.name}}/\
                    {{cable.type|default('CAT6')}}/{{cable.pk}}";
    let label = render_label(&tia_cable(), template).unwrap();
    assert_eq!(label, "NYC-SW01/NYC-SW02/CAT6A/123");
}

#[test]
fn set_statement_with_manufacturer_slice() {
    let template = "{% set a = cable.a_terminations.first() %}\
                    {% set b = cable.b_terminations.first() %}\
                    {{a.device.device_type.manufacturer.name[:3]|upper}}{{a.device.name}}-{{a.name}}/\
                    {{b.device.device_type.manufacturer.name[:3]|upper}}{{b.device.name}}-{{b.name}}/\
                    {{cable.type|default('CAT6')}}/\
                    {{cable.color[:3]|upper if cable.color else 'BLU'}}";
    let label = render_label(&tia_cable(), template).unwrap();
    assert_eq!(label, "CISSW01-gi1/0/1/HPESW02-eth1/1/CAT6A/BLU");
}

#[test]
fn string_concatenation() {
    let template = "{% set a = cable.a_terminations.first() %}\
                    {{a.device.rack.name ~ ':' ~ a.device.name}}";
    let label = render_label(&tia_cable(), template).unwrap();
    assert_eq!(label, "R1A:SW01");
}

#[test]
fn inline_if_over_nullable_type() {
    let template = "{{cable.type if cable.type else 'UNK'}}";

    let label = render_label(&tia_cable(), template).unwrap();
    assert_eq!(label, "CAT6A");

    let mut untyped = tia_cable();
    untyped.cable_type = None;
    let label = render_label(&untyped, template).unwrap();
    assert_eq!(label, "UNK");
}

#[test]
fn location_falls_back_to_site_with_default_guard() {
    let template = "{{cable.a_terminations.first().device.location.name\
                    |default(cable.a_terminations.first().device.site.name)}}\
                    .{{cable.a_terminations.first().device.name}}";

    let mut cable = tia_cable();
    cable.a_terminations[0].device.location = None;

    let label = render_label(&cable, template).unwrap();
    assert_eq!(label, "NYC.SW01");
}

#[test]
fn unguarded_null_relationship_raises() {
    let template = "{{cable.a_terminations.first().device.location.name}}";

    let mut cable = tia_cable();
    cable.a_terminations[0].device.location = None;

    let err = render_label(&cable, template).unwrap_err();
    assert!(matches!(err, LabelError::TemplateRender { .. }), "{err:?}");
}

#[test]
fn formatting_null_position_raises() {
    let template = "{{'{:02d}'.format(cable.a_terminations.first().device.position)}}";

    let mut cable = tia_cable();
    cable.a_terminations[0].device.position = None;

    let err = render_label(&cable, template).unwrap_err();
    assert!(matches!(err, LabelError::TemplateRender { .. }), "{err:?}");
}

#[test]
fn first_on_empty_relationship_yields_none() {
    let mut cable = tia_cable();
    cable.a_terminations.clear();

    // Guarded access recovers through default(...)
    let label = render_label(
        &cable,
        "{{cable.a_terminations.first().name|default('unterminated')}}",
    )
    .unwrap();
    assert_eq!(label, "unterminated");

    // exists() reports the empty relationship
    let label = render_label(
        &cable,
        "{% if cable.a_terminations.exists() %}A{% else %}none{% endif %}",
    )
    .unwrap();
    assert_eq!(label, "none");
}

#[test]
fn zero_padded_identifier() {
    let label = render_label(&tia_cable(), "ID{{'{:06d}'.format(cable.pk)}}").unwrap();
    assert_eq!(label, "ID000123");
}
