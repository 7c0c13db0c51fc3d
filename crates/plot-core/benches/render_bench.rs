use plot_core::{Axis, Chart, RenderError, RenderOptions, Series};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn build_chart_xy(n: usize) -> Chart {
    let mut ch = Chart::new();
    let mut data = Vec::with_capacity(n);
    for i in 0..n {
        let x = i as f64 / (n - 1) as f64 * 20.0 - 10.0;
        // log of a sine: gaps wherever sin(x) <= 0
        data.push((x, x.sin().ln()));
    }
    ch.x_axis = Axis::new("x", -10.0, 10.0);
    ch.add_series(Series::with_data(data));
    ch.autoscale_y(0.05);
    ch
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &n in &[500usize, 10_000usize] {
        group.bench_function(format!("gappy_{n}"), |b| {
            let ch = build_chart_xy(n);
            let mut opts = RenderOptions::default();
            opts.draw_labels = false;
            b.iter(|| -> Result<(), RenderError> {
                let bytes = ch.render_to_png_bytes(&opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
