use aeon_core::{ElementId, Shape, TEXT_HEIGHT_PER_POINT};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use crate::playback::ScenePlayback;
use crate::strokes::palette_color;

/// Ratio between a star's inner and outer vertices
const STAR_INNER_RATIO: f32 = 0.382;
/// Text is laid out at its point size and scaled down into scene units
const TEXT_SCALE: f32 = TEXT_HEIGHT_PER_POINT as f32;
/// Depth step between consecutive elements so later ones draw on top
const LAYER_STEP: f32 = 0.001;

/// Entity standing for a filled shape or a text of the scene
#[derive(Component)]
pub struct SceneElement {
    pub id: ElementId,
    /// Full text content, revealed progressively while written
    pub text: Option<String>,
}

/// Spawn an entity for every filled or text element of the scene
pub fn spawn_elements(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    playback: Res<ScenePlayback>,
) {
    let script = playback.player.script();
    let mut spawned = 0;
    for element in &script.elements {
        let transform = Transform::from_xyz(
            element.position[0] as f32,
            element.position[1] as f32,
            element.id.0 as f32 * LAYER_STEP,
        );
        let fill = palette_color(element.style.color, element.style.fill_opacity);
        let mesh = match &element.shape {
            Shape::Dot { radius } => Some(meshes.add(Circle::new(*radius as f32))),
            Shape::Star { outer_radius } => Some(meshes.add(star_mesh(*outer_radius as f32))),
            Shape::Circle { radius } if element.style.fill_opacity > 0.0 => {
                Some(meshes.add(Circle::new(*radius as f32)))
            }
            Shape::Text { content, font_size } => {
                commands.spawn((
                    Text2d::new(""),
                    TextFont {
                        font_size: *font_size as f32,
                        ..default()
                    },
                    TextColor(fill),
                    transform.with_scale(Vec3::splat(TEXT_SCALE)),
                    Visibility::Hidden,
                    SceneElement {
                        id: element.id,
                        text: Some(content.clone()),
                    },
                ));
                spawned += 1;
                None
            }
            _ => None,
        };
        if let Some(mesh) = mesh {
            commands.spawn((
                Mesh2d(mesh),
                MeshMaterial2d(materials.add(ColorMaterial::from(fill))),
                transform,
                Visibility::Hidden,
                SceneElement {
                    id: element.id,
                    text: None,
                },
            ));
            spawned += 1;
        }
    }
    info!(
        "Spawned {} entities for {} scene elements of '{}'",
        spawned,
        script.elements.len(),
        script.name
    );
}

/// Copy the player state onto the spawned entities
#[allow(clippy::type_complexity)]
pub fn sync_elements(
    playback: Res<ScenePlayback>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(
        &SceneElement,
        &mut Transform,
        &mut Visibility,
        Option<&MeshMaterial2d<ColorMaterial>>,
        Option<&mut Text2d>,
        Option<&mut TextColor>,
    )>,
) {
    let player = &playback.player;
    for (element, mut transform, mut visibility, material, text, text_color) in query.iter_mut() {
        let (Some(spec), Some(visual)) = (player.script().element(element.id), player.visual(element.id))
        else {
            continue;
        };

        let shown = visual.shown && visual.opacity > 0.0;
        let wanted = if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
        if !shown {
            continue;
        }

        let mut scale = (visual.scale * visual.grow) as f32;
        if element.text.is_some() {
            scale *= TEXT_SCALE;
        }
        transform.translation.x = visual.position[0] as f32;
        transform.translation.y = visual.position[1] as f32;
        transform.scale = Vec3::splat(scale);

        let color = palette_color(spec.style.color, spec.style.fill_opacity * visual.opacity);
        if let Some(material) = material {
            if let Some(m) = materials.get(&material.0) {
                if m.color != color {
                    if let Some(m) = materials.get_mut(&material.0) {
                        m.color = color;
                    }
                }
            }
        }
        if let Some(mut text_color) = text_color {
            if text_color.0 != color {
                text_color.0 = color;
            }
        }
        if let (Some(content), Some(mut text)) = (&element.text, text) {
            let written = written_prefix(content, visual.reveal);
            if text.0 != written {
                text.0 = written.to_string();
            }
        }
    }
}

/// Characters of `content` already written at `reveal`
pub fn written_prefix(content: &str, reveal: f64) -> &str {
    let count = content.chars().count();
    let shown = (reveal.clamp(0.0, 1.0) * count as f64).ceil() as usize;
    match content.char_indices().nth(shown) {
        Some((end, _)) => &content[..end],
        None => content,
    }
}

/// Five-pointed filled star centred on the origin, pointing up
fn star_mesh(outer: f32) -> Mesh {
    let inner = outer * STAR_INNER_RATIO;
    let mut positions = vec![[0.0, 0.0, 0.0]];
    for i in 0..10 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = std::f32::consts::FRAC_PI_2 + std::f32::consts::PI * i as f32 / 5.0;
        positions.push([radius * angle.cos(), radius * angle.sin(), 0.0]);
    }
    let indices: Vec<u32> = (1..=10u32)
        .flat_map(|i| [0, i, if i == 10 { 1 } else { i + 1 }])
        .collect();
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs = vec![[0.5, 0.5]; positions.len()];
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_prefix_counts_characters() {
        assert_eq!(written_prefix("Réionisation", 0.0), "");
        assert_eq!(written_prefix("Réionisation", 1.0), "Réionisation");
        assert_eq!(written_prefix("Réionisation", 0.1), "Ré");
        assert_eq!(written_prefix("z=4", 0.5), "z=");
    }

    #[test]
    fn test_star_mesh_has_ten_triangles() {
        let mesh = star_mesh(0.2);
        assert_eq!(mesh.count_vertices(), 11);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(30));
    }
}
