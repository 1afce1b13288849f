use bevy::prelude::*;

use crate::config::CounterConfig;
use crate::counter::CounterState;
use crate::visual::{
    controls::{BUTTON_SIZE, ControlLayout, CounterAction, CounterButton},
    emitters::{GlyphTextures, TemplateLibrary},
    labels::CounterLabel,
    physics::VortexField,
    scene::CounterScene,
};

/// Labels sit above particles, buttons above both
const LABEL_Z: f32 = 10.0;
const BUTTON_Z: f32 = 20.0;

/// Button fill: black at 30% opacity
const BUTTON_FILL: Color = Color::srgba(0.0, 0.0, 0.0, 0.3);

/// System: build the counter state, emitter arena and control layout
pub fn setup_counter(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<CounterConfig>,
) {
    let library = TemplateLibrary::load().unwrap_or_else(|err| {
        warn!("Failed to parse emitter templates: {}", err);
        TemplateLibrary::default()
    });
    let template = library.get(&config.template);
    if template.is_none() {
        warn!("Emitter template '{}' not found, particles disabled", config.template);
    }

    let glyphs = GlyphTextures::load(&asset_server);
    let state = CounterState::new(config.initial_value);
    let scene = CounterScene::new(&config, template, state.previous(), |digit| glyphs.has(digit));

    if scene.pool.is_empty() {
        warn!("No emitters built, bursts will only animate labels");
    }
    info!(
        "Counter scene ready: variant={:?}, {} emitters, reset policy {:?}",
        scene.variant,
        scene.pool.len(),
        scene.resets.policy()
    );

    commands.insert_resource(ControlLayout::for_variant(config.variant));
    commands.insert_resource(glyphs);
    commands.insert_resource(library);
    commands.insert_resource(state);
    commands.insert_resource(scene);
}

/// System: spawn label, button and field entities for the built scene
pub fn spawn_counter_entities(
    mut commands: Commands,
    config: Res<CounterConfig>,
    scene: Res<CounterScene>,
    layout: Res<ControlLayout>,
) {
    for (which, node) in scene.labels.entries() {
        commands.spawn((
            Text2d::new(node.text.clone()),
            TextFont {
                font_size: config.layout.label_font_size,
                ..default()
            },
            TextColor(Color::WHITE),
            Transform::from_xyz(node.x, node.y, LABEL_Z),
            which,
            Name::new(format!("{:?} label", which)),
        ));
    }

    for (action, glyph) in [(CounterAction::Increment, "+"), (CounterAction::Decrement, "-")] {
        let region = layout.region(action);
        commands.spawn((
            Sprite::from_color(BUTTON_FILL, Vec2::splat(BUTTON_SIZE)),
            Transform::from_translation(region.center.extend(BUTTON_Z)),
            CounterButton::new(action),
            Name::new(format!("{:?} button", action)),
            children![(
                Text2d::new(glyph),
                TextFont {
                    font_size: config.layout.label_font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, 0.0, 0.1),
            )],
        ));
    }

    commands.spawn((
        VortexField {
            position: Vec2::ZERO,
            strength: config.field.strength,
            category: config.field.category,
        },
        Transform::default(),
        Name::new("Vortex field"),
    ));

    info!("Counter entities spawned");
}
