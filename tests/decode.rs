mod common;

use common::{frame_data_shorts, full_atlas_shape, header, sprite_prelude, Writer};

use anemone::resources::{Action, Payload};
use anemone::{Animation, AnimationRenderer, Error};

#[test]
fn minimal_animation() {
    let mut w = Writer::new();
    header(&mut w, 0, 24);
    w.u16(0); // texture count
    w.u16(0); // shapes
    w.u16(0); // sprites
    w.u16(0); // imports

    let animation = Animation::decode(&w.bytes()).unwrap();
    assert_eq!(animation.frame_rate, 24);
    assert!(animation.index.is_none());
    assert!(animation.texture.is_none());
    assert!(animation.transform.is_none());
    assert!(animation.shapes.is_empty());
    assert!(animation.sprites.is_empty());
    assert!(animation.imports.is_empty());

    let renderer = AnimationRenderer::new(animation);
    assert!(!renderer.has_texture());
    assert!(matches!(
        renderer.find_static_sprite(),
        Err(Error::NoStaticSprite)
    ));
}

#[test]
fn residual_bytes_are_tolerated() {
    let mut w = Writer::new();
    header(&mut w, 0, 24);
    w.u16(0).u16(0).u16(0).u16(0);
    w.u8(0xaa).u8(0xbb); // trailing garbage

    assert!(Animation::decode(&w.bytes()).is_ok());
}

#[test]
fn truncated_input_is_fatal() {
    let mut w = Writer::new();
    header(&mut w, 0, 24);
    w.u8(1); // half of the texture count

    match Animation::decode(&w.bytes()) {
        Err(Error::TruncatedInput { .. }) => {}
        other => panic!("expected truncation, got {:?}", other),
    }
}

#[test]
fn texture_descriptor() {
    let mut w = Writer::new();
    header(&mut w, 0, 24);
    w.u16(1);
    w.c_str("atlas_1234").i32(-77);
    w.u16(0).u16(0).u16(0);

    let animation = Animation::decode(&w.bytes()).unwrap();
    let texture = animation.texture.as_ref().unwrap();
    assert_eq!(texture.name, "atlas_1234");
    assert_eq!(texture.crc, -77);
}

#[test]
fn heights_are_raised_by_one() {
    let mut w = Writer::new();
    header(&mut w, 0x02, 30);
    // Local index: extension only.
    w.u8(0x20);
    w.i32(1); // extension flags: heights present
    w.u16(2);
    w.i32(7).i8(41);
    w.i32(9).i8(-3);
    w.u16(0); // animation files
    w.u16(0).u16(0).u16(0).u16(0);

    let animation = Animation::decode(&w.bytes()).unwrap();
    let index = animation.index.as_ref().unwrap();
    let heights = index
        .extension
        .as_ref()
        .unwrap()
        .heights
        .as_ref()
        .unwrap();
    assert_eq!(heights[&7], 42);
    assert_eq!(heights[&9], -2);
}

#[test]
fn local_index_scale_and_files() {
    let mut w = Writer::new();
    header(&mut w, 0x02, 30);
    // scale + file names
    w.u8(0x01 | 0x04);
    w.f32(1.5);
    w.u16(2);
    w.c_str("1090");
    w.c_str("1091");
    w.u16(1); // animation files
    w.c_str("1090").i32(123).i16(4);
    w.u16(0).u16(0).u16(0).u16(0);

    let animation = Animation::decode(&w.bytes()).unwrap();
    let index = animation.index.as_ref().unwrap();
    assert_eq!(index.scale, Some(1.5));
    assert_eq!(index.file_names, vec!["1090", "1091"]);
    assert_eq!(index.animation_files.len(), 1);
    assert_eq!(index.animation_files[0].file_index, 4);
}

#[test]
fn shape_extents_are_normalised() {
    let mut w = Writer::new();
    header(&mut w, 0, 24);
    w.u16(0);
    w.u16(1);
    w.i16(3)
        .i16(0)
        .u16(0) // top
        .u16(13107) // left
        .u16(65535) // bottom
        .u16(52428) // right
        .u16(12)
        .u16(34)
        .f32(-1.5)
        .f32(2.5);
    w.u16(0).u16(0);

    let animation = Animation::decode(&w.bytes()).unwrap();
    let shape = animation.shape(3).unwrap();
    for extent in [shape.top, shape.left, shape.bottom, shape.right].iter() {
        assert!((0.0..=1.0).contains(extent));
    }
    assert!(shape.left <= shape.right);
    assert!(shape.top <= shape.bottom);
    assert_eq!(shape.width, 12);
    assert_eq!(shape.height, 34);
}

#[test]
fn sprite_with_name_and_payload() {
    let mut w = Writer::new();
    header(&mut w, 0, 24);
    w.u16(0); // textures
    w.u16(1);
    full_atlas_shape(&mut w, 99, 8);
    w.u16(1); // sprites
    sprite_prelude(&mut w, 1, 5, Some("Hero_1_AnimStatique"));
    w.i16(99); // payload: single
    w.u16(0); // action info
    frame_data_shorts(&mut w, &[0]);
    w.u16(0); // imports

    let animation = Animation::decode(&w.bytes()).unwrap();
    let sprite = animation.sprite(5).unwrap();
    assert_eq!(sprite.name.as_deref(), Some("Hero_1_AnimStatique"));
    assert!(matches!(
        sprite.payload,
        Payload::Single { sprite_id: 99, .. }
    ));
    assert_eq!(sprite.frame_count(), 1);
}

#[test]
fn transform_table_with_actions() {
    let mut w = Writer::new();
    header(&mut w, 0x10, 24);
    w.u16(0); // textures
    w.u16(0); // shapes
    // Transform table.
    w.u32(4).f32(1.0).f32(1.0).f32(1.0).f32(0.5); // colors
    w.u32(0); // rotations
    w.u32(2).f32(5.0).f32(-3.0); // translations
    w.u32(2); // actions
    w.u8(4).u8(5); // GoToRandom, optimized
    w.c_str("#optimized").c_str("Idle").c_str("Walk").u8(75).u8(25);
    w.u8(9).u8(2); // AddParticle with one offset
    w.i32(42).i16(5);
    w.u16(0).u16(0);

    let animation = Animation::decode(&w.bytes()).unwrap();
    let table = animation.transform.as_ref().unwrap();
    assert_eq!(table.translations, vec![5.0, -3.0]);
    assert_eq!(
        table.actions[0],
        Action::GoToRandom {
            names: vec!["Idle".to_string(), "Walk".to_string()],
            percents: Some(vec![75, 25]),
        }
    );
    assert_eq!(
        table.actions[1],
        Action::AddParticle {
            particle_id: 42,
            offset_x: Some(5),
            offset_y: None,
            offset_z: None,
        }
    );
}

#[test]
fn static_sprite_prefers_statique_over_marche() {
    let mut w = Writer::new();
    header(&mut w, 0, 24);
    w.u16(0);
    w.u16(1);
    full_atlas_shape(&mut w, 99, 8);
    w.u16(2);
    // File order puts the walk sprite first; the pattern order must
    // still pick the static one.
    sprite_prelude(&mut w, 2, 1, Some("X_1_AnimMarche"));
    w.i16(99);
    frame_data_shorts(&mut w, &[0]);
    sprite_prelude(&mut w, 2, 2, Some("X_1_AnimStatique"));
    w.i16(99);
    frame_data_shorts(&mut w, &[0]);
    w.u16(0);

    let animation = Animation::decode(&w.bytes()).unwrap();
    let renderer = AnimationRenderer::new(animation);
    let handle = renderer.find_static_sprite().unwrap();
    assert_eq!(handle.id, 2);
    assert_eq!(handle.reference, None);
}
