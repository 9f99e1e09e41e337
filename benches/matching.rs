use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use treemerge::RuleSet;

const RULES: &str = r#"
# Build output
target/
/dist/
*.o
*.log
!important.log
**/node_modules/
docs/**/*.tmp
cache-[0-9][0-9]/
.env*
"#;

fn compile_benchmark(c: &mut Criterion) {
    c.bench_function("compile_rules", |b| {
        b.iter(|| RuleSet::compile(black_box(RULES)))
    });
}

fn matching_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    let rules = RuleSet::compile(RULES);

    // Path depth drives the number of ancestor evaluations
    for depth in [1usize, 4, 16] {
        let mut path = vec!["src"; depth - 1].join("/");
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str("important.log");

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("file", depth), &path, |b, path| {
            b.iter(|| rules.matched(black_box(path.as_str()), false))
        });
    }

    group.finish();
}

criterion_group!(benches, compile_benchmark, matching_benchmark);
criterion_main!(benches);
