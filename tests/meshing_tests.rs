use voxel_terrain::engine_state::rendering::{meshing::build_chunk_geometry, HeadlessScene, RenderSide};
use voxel_terrain::engine_state::voxels::{
    block::BlockType,
    chunk::Chunk,
    coords::ChunkPosition,
    world::{World, WorldConfig},
};

#[test]
fn terrain_meshes_have_consistent_buffers() {
    let mut world = World::new(WorldConfig::default(), HeadlessScene::new());
    let chunk = world.generate_chunk(0, 0);
    let chunk = chunk.get();
    let mesh = chunk.mesh().expect("generated chunks carry a mesh");
    let geometry = &mesh.geometry;

    assert!(!geometry.is_empty());
    assert_eq!(geometry.positions.len(), geometry.normals.len());
    assert_eq!(geometry.positions.len(), geometry.colors.len());
    assert_eq!(geometry.positions.len(), geometry.vertex_count() * 3);
    assert_eq!(geometry.vertex_count(), geometry.quad_count() * 4);
    assert_eq!(geometry.indices.len(), geometry.quad_count() * 6);
    assert!(geometry.indices.iter().all(|i| (*i as usize) < geometry.vertex_count()));

    for channel in &geometry.colors {
        assert!((0.0..=1.0).contains(channel));
    }
    for normal in geometry.normals.chunks(3) {
        let length: f32 = normal.iter().map(|c| c.abs()).sum();
        assert_eq!(length, 1.0);
    }

    assert_eq!(mesh.material.side, RenderSide::Front);
    assert!(mesh.material.vertex_colors);
    assert!(mesh.material.cast_shadow);
    assert!(mesh.material.receive_shadow);
}

#[test]
fn byte_views_cover_every_buffer() {
    let mut world = World::new(WorldConfig::default(), HeadlessScene::new());
    let chunk = world.generate_chunk(-1, 2);
    let chunk = chunk.get();
    let geometry = &chunk.mesh().expect("generated chunks carry a mesh").geometry;

    assert_eq!(geometry.position_bytes().len(), geometry.positions.len() * 4);
    assert_eq!(geometry.normal_bytes().len(), geometry.normals.len() * 4);
    assert_eq!(geometry.color_bytes().len(), geometry.colors.len() * 4);
    assert_eq!(geometry.index_bytes().len(), geometry.indices.len() * 4);

    assert_eq!(geometry.normal_bytes()[..4], geometry.normals[0].to_ne_bytes());
    assert_eq!(geometry.color_bytes()[..4], geometry.colors[0].to_ne_bytes());
}

#[test]
fn world_scene_holds_one_mesh_per_chunk() {
    let mut world = World::new(WorldConfig::default(), HeadlessScene::new());
    world.generate_initial_chunks(2);

    assert_eq!(world.chunk_count(), 25);
    assert_eq!(world.scene().attached_count(), 25);
    assert_eq!(world.scene().double_registrations(), 0);
}

#[test]
fn edits_change_the_face_count() {
    let mut chunk = Chunk::new(ChunkPosition::new(0, 0));
    chunk.set_block(5, 5, 5, BlockType::Stone);
    assert_eq!(build_chunk_geometry(&chunk).quad_count(), 6);

    chunk.set_block(5, 6, 5, BlockType::Dirt);
    assert_eq!(build_chunk_geometry(&chunk).quad_count(), 10);

    chunk.set_block(5, 6, 5, BlockType::Air);
    assert_eq!(build_chunk_geometry(&chunk).quad_count(), 6);
}

#[test]
fn boundary_faces_are_emitted_even_against_a_solid_neighbour() {
    let mut world = World::new(WorldConfig::default(), HeadlessScene::new());
    world.generate_chunk(0, 0);
    world.generate_chunk(1, 0);

    // Every solid cell on the x = 15 wall of chunk (0, 0) still gets a +X face.
    let chunk = world.get_chunk(0, 0).expect("chunk (0, 0) is loaded");
    let chunk = chunk.get();
    let geometry = build_chunk_geometry(&chunk);
    let wall_cells = (0..32)
        .flat_map(|y| (0..16).map(move |z| (y, z)))
        .filter(|(y, z)| chunk.get_block(15, *y, *z).is_solid())
        .count();
    let east_faces = geometry
        .normals
        .chunks(12)
        .zip(geometry.positions.chunks(12))
        .filter(|(normals, positions)| normals[0] == 1.0 && positions[0] == 16.0)
        .count();
    assert_eq!(east_faces, wall_cells);
}
