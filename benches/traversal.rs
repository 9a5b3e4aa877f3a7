use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glam::{IVec3, Vec3};

use voxvis::vis::{
    create_distance_pointcloud_from_tsdf_layer, create_occupancy_blocks_from_tsdf_layer,
    create_surface_pointcloud_from_tsdf_layer, ColorPointCloud, IntensityPointCloud, MarkerArray,
};
use voxvis::voxel::{Color, Layer, TsdfVoxel};

/// TSDF of a sphere centred in a cube of `blocks_per_side³` blocks
fn create_test_sphere(blocks_per_side: i32, voxels_per_side: usize, voxel_size: f32) -> Layer<TsdfVoxel> {
    let mut layer = Layer::new(voxel_size, voxels_per_side).unwrap();
    let extent = blocks_per_side as f32 * layer.block_size();
    let centre = Vec3::splat(extent * 0.5);
    let radius = extent * 0.35;

    for z in 0..blocks_per_side {
        for y in 0..blocks_per_side {
            for x in 0..blocks_per_side {
                let block = layer.allocate_block(IVec3::new(x, y, z));
                for i in 0..block.num_voxels() {
                    let p = block.coordinates_from_linear_index(i);
                    let distance = p.distance(centre) - radius;
                    *block.voxel_by_linear_index_mut(i) = TsdfVoxel::new(distance, 1.0, Color::WHITE);
                }
            }
        }
    }
    layer
}

fn bench_surface_pointcloud(c: &mut Criterion) {
    let layer = create_test_sphere(8, 16, 0.05);
    let mut cloud = ColorPointCloud::new();

    c.bench_function("surface_pointcloud_8x8x8_blocks", |b| {
        b.iter(|| {
            create_surface_pointcloud_from_tsdf_layer(black_box(&layer), 0.0375, &mut cloud);
        });
    });
}

fn bench_distance_pointcloud(c: &mut Criterion) {
    let layer = create_test_sphere(8, 16, 0.05);
    let mut cloud = IntensityPointCloud::new();

    c.bench_function("distance_pointcloud_8x8x8_blocks", |b| {
        b.iter(|| {
            create_distance_pointcloud_from_tsdf_layer(black_box(&layer), &mut cloud);
        });
    });
}

fn bench_occupancy_blocks(c: &mut Criterion) {
    let layer = create_test_sphere(8, 16, 0.05);

    c.bench_function("occupancy_blocks_8x8x8_blocks", |b| {
        b.iter(|| {
            let mut markers = MarkerArray::new();
            create_occupancy_blocks_from_tsdf_layer(black_box(&layer), "world", &mut markers);
            markers
        });
    });
}

criterion_group!(
    benches,
    bench_surface_pointcloud,
    bench_distance_pointcloud,
    bench_occupancy_blocks,
);
criterion_main!(benches);
