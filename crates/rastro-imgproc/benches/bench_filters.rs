use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rastro_image::Image;
use rastro_imgproc::{
    filter::{filter2d, median_blur, Kernel},
    pipeline::cartoon,
    threshold::adaptive_threshold_mean,
};

fn random_image<const C: usize>(rng: &mut StdRng, width: usize, height: usize) -> Image<u8, C> {
    let data: Vec<u8> = (0..(width * height * C)).map(|_| rng.random()).collect();
    Image::new([width, height].into(), data).unwrap()
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filters");

    let mut rng = StdRng::seed_from_u64(7);

    for (width, height) in [(256, 224), (512, 448)].iter() {
        let image = random_image::<3>(&mut rng, *width, *height);
        let gray = random_image::<1>(&mut rng, *width, *height);

        for kernel_size in [3, 5, 9].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);
            let kernel = Kernel::box_filter(*kernel_size).unwrap();

            group.bench_with_input(
                BenchmarkId::new("filter2d_box_u8", &parameter_string),
                &(&image, &kernel),
                |b, i| b.iter(|| filter2d(black_box(i.0), black_box(i.1))),
            );

            group.bench_with_input(
                BenchmarkId::new("median_blur_u8", &parameter_string),
                &image,
                |b, src| b.iter(|| median_blur(black_box(src), *kernel_size)),
            );

            group.bench_with_input(
                BenchmarkId::new("adaptive_threshold_mean", &parameter_string),
                &gray,
                |b, src| b.iter(|| adaptive_threshold_mean(black_box(src), *kernel_size, 5.0)),
            );
        }

        group.bench_with_input(
            BenchmarkId::new("cartoon", format!("{}x{}", width, height)),
            &image,
            |b, src| b.iter(|| cartoon(black_box(src), 5.0)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
