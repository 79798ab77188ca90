use voxel_mosaic::{
    build::{BuildContext, BuildSettings, ImageRequest, RecordingActuator, VoxelOp},
    core::PointN,
    image::open,
    palette::{ColorMetric, PaletteRegistry},
};

use std::collections::BTreeMap;

fn main() {
    let args: Vec<_> = std::env::args().collect();
    let image_path = &args[1];
    let palette = args.get(2).map(String::as_str).unwrap_or("concrete+wool");

    println!("Loading {}", image_path);

    let image = open(image_path).unwrap();
    let request = ImageRequest {
        width: image.width(),
        height: image.height(),
        base: PointN([0, 0, 0]),
        palette: palette.to_owned(),
        label: image_path.clone(),
    };

    println!("Matching with RGB: \n");
    measure_palette_coverage(ColorMetric::Rgb, &image, &request);

    println!("Matching with LAB: \n");
    measure_palette_coverage(ColorMetric::Lab, &image, &request);
}

fn measure_palette_coverage(
    metric: ColorMetric,
    image: &voxel_mosaic::image::SourceImage,
    request: &ImageRequest,
) {
    let settings = BuildSettings {
        metric,
        ..Default::default()
    };
    let mut context = BuildContext::new(PaletteRegistry::builtin(), settings);
    let mut actuator = RecordingActuator::new();
    let report = context.build_image(image, request, &mut actuator).unwrap();

    let mut histogram = BTreeMap::new();
    for op in actuator.voxel_ops() {
        let material = match op {
            VoxelOp::Place(_, material) => material.as_str(),
            _ => "(transparent)",
        };
        *histogram.entry(material).or_insert(0usize) += 1;
    }

    let mut by_count: Vec<_> = histogram.into_iter().collect();
    by_count.sort_by(|a, b| b.1.cmp(&a.1));
    for (material, count) in by_count.iter() {
        println!(
            "{:>40} {:>8} ({:.1}%)",
            material,
            count,
            100.0 * (*count as f32 / report.total as f32)
        );
    }
    println!(
        "\n{} distinct materials over {} voxels\n",
        by_count.len(),
        report.total
    );
}
