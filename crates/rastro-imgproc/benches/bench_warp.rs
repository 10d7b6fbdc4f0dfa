use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use rastro_image::Image;
use rastro_imgproc::{
    interpolation::InterpolationMode,
    resize::resize_native,
    warp::{get_rotation_matrix2d, warp_affine, warp_quad},
};

fn bench_warp_affine(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpAffine");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();
        let m = get_rotation_matrix2d((*width as f32 / 2.0, *height as f32 / 2.0), 45.0, 1.0);

        group.bench_with_input(
            BenchmarkId::new("rotate_bilinear", &parameter_string),
            &(&image, m),
            |b, i| {
                let (src, m) = (i.0, i.1);
                b.iter(|| {
                    warp_affine(
                        black_box(src),
                        black_box(&m),
                        src.size(),
                        black_box(InterpolationMode::Bilinear),
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_warp_quad(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpQuad");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();

        let (w, h) = (*width as i32, *height as i32);
        let quad = [[w / 8, 0], [w - w / 8, h / 10], [w, h], [0, h - h / 10]];

        group.bench_with_input(
            BenchmarkId::new("quad_bilinear", &parameter_string),
            &(&image, quad),
            |b, i| {
                let (src, quad) = (i.0, i.1);
                b.iter(|| {
                    warp_quad(
                        black_box(src),
                        black_box(&quad),
                        src.size(),
                        InterpolationMode::Bilinear,
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resize");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();
        let new_size = [*width / 2, *height / 2].into();

        for mode in [InterpolationMode::Bilinear, InterpolationMode::Nearest] {
            group.bench_with_input(
                BenchmarkId::new(format!("resize_half_{mode:?}"), &parameter_string),
                &image,
                |b, src| b.iter(|| resize_native(black_box(src), new_size, mode)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_warp_affine, bench_warp_quad, bench_resize);
criterion_main!(benches);
