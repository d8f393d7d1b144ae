// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Export/import round-trip over generated mappings.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
use flowmap_codec::{content_digest, export_json, import_json};
use flowmap_graph::{
    ElementKind, ElementMetadataPatch, ElementPatch, FlowPatch, FlowType, Mapping,
    MappingMetadata, Position, SecurityLevel,
};
use proptest::prelude::*;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
struct ElementSeed {
    kind: usize,
    name: String,
    level: usize,
    x: f64,
    y: f64,
    owner: String,
    controls: Vec<String>,
}

#[derive(Debug, Clone)]
struct FlowSeed {
    source: usize,
    target: usize,
    flow_type: usize,
    cui: bool,
    protections: Vec<String>,
    description: String,
}

/// Any finite `f64`, weighted toward canvas-sized values.
fn coordinate() -> impl Strategy<Value = f64> {
    use prop::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    prop_oneof![
        3 => -5000.0..5000.0f64,
        1 => POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO,
    ]
}

fn element_seed() -> impl Strategy<Value = ElementSeed> {
    (
        0..ElementKind::ALL.len(),
        "\\PC{0,20}",
        0..SecurityLevel::ALL.len(),
        coordinate(),
        coordinate(),
        "[a-zA-Z .]{0,12}",
        prop::collection::vec("[A-Za-z ]{1,16}", 0..4),
    )
        .prop_map(|(kind, name, level, x, y, owner, controls)| ElementSeed {
            kind,
            name,
            level,
            x,
            y,
            owner,
            controls,
        })
}

fn flow_seed() -> impl Strategy<Value = FlowSeed> {
    (
        any::<usize>(),
        any::<usize>(),
        0..FlowType::ALL.len(),
        any::<bool>(),
        prop::collection::vec("[A-Za-z ]{1,16}", 0..3),
        "\\PC{0,30}",
    )
        .prop_map(
            |(source, target, flow_type, cui, protections, description)| FlowSeed {
                source,
                target,
                flow_type,
                cui,
                protections,
                description,
            },
        )
}

fn build(
    system_name: &str,
    stamp_nanos: i64,
    elements: &[ElementSeed],
    flows: &[FlowSeed],
) -> Mapping {
    let mut m = Mapping::new();
    for seed in elements {
        let id = m
            .add_element_at(
                ElementKind::ALL[seed.kind],
                Position::new(seed.x, seed.y),
            )
            .id
            .clone();
        m.update_element(
            &id,
            ElementPatch {
                name: Some(seed.name.clone()),
                security_level: Some(SecurityLevel::ALL[seed.level]),
                metadata: Some(ElementMetadataPatch {
                    owner: Some(seed.owner.clone()),
                    access_controls: Some(seed.controls.clone()),
                    ..ElementMetadataPatch::default()
                }),
                ..ElementPatch::default()
            },
        );
    }
    let ids: Vec<_> = m.elements().iter().map(|e| e.id.clone()).collect();
    if !ids.is_empty() {
        for seed in flows {
            let src = &ids[seed.source % ids.len()];
            let dst = &ids[seed.target % ids.len()];
            let Ok(flow) = m.add_flow(src, dst) else {
                continue;
            };
            let fid = flow.id.clone();
            m.update_flow(
                &fid,
                FlowPatch {
                    flow_type: Some(FlowType::ALL[seed.flow_type]),
                    cui_involved: Some(seed.cui),
                    protections: Some(seed.protections.clone()),
                    description: Some(seed.description.clone()),
                },
            );
        }
    }
    let meta: &mut MappingMetadata = m.metadata_mut();
    meta.system_name = system_name.to_owned();
    meta.last_updated = OffsetDateTime::from_unix_timestamp_nanos(i128::from(stamp_nanos))
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);
    m
}

proptest! {
    #[test]
    fn parse_of_serialize_is_identity(
        system_name in "\\PC{0,24}",
        stamp in 0..4_000_000_000_000_000_000i64,
        elements in prop::collection::vec(element_seed(), 0..12),
        flows in prop::collection::vec(flow_seed(), 0..24),
    ) {
        let m = build(&system_name, stamp, &elements, &flows);
        let text = export_json(&m, OffsetDateTime::now_utc()).unwrap();
        let back = import_json(&text).unwrap();
        prop_assert_eq!(&back, &m);
        prop_assert_eq!(content_digest(&back).unwrap(), content_digest(&m).unwrap());
    }
}

#[test]
fn imported_mapping_keeps_allocating_fresh_ids() {
    let mut m = Mapping::new();
    let a = m.add_element(ElementKind::System).id.clone();
    let b = m.add_element(ElementKind::Process).id.clone();
    let f = m.add_flow(&a, &b).expect("connect").id.clone();

    let mut back = import_json(&export_json(&m, OffsetDateTime::now_utc()).expect("export"))
        .expect("import");
    let c = back.add_element(ElementKind::User).id.clone();
    let g = back.add_flow(&c, &a).expect("connect").id.clone();
    assert!(c != a && c != b);
    assert_ne!(g, f);
}
