//! Benchmarks for module documentation building.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use docmod_site::{
    FsSource, ModuleBuilder, ModuleOptions, RawFunc, RawMethod, RawModule, RawPackage, RawSource,
    RawType, RawValue,
};

/// Create a module with `breadth` packages per directory, `depth` levels deep.
fn create_module(depth: usize, breadth: usize) -> RawModule {
    fn create_level(prefix: &str, depth: usize, breadth: usize, packages: &mut Vec<RawPackage>) {
        if depth == 0 {
            return;
        }
        for i in 0..breadth {
            let rel_path = if prefix.is_empty() {
                format!("pkg{i}")
            } else {
                format!("{prefix}/pkg{i}")
            };
            packages.push(create_package(&format!("pkg{i}"), &rel_path));
            create_level(&rel_path, depth - 1, breadth, packages);
        }
    }

    let mut packages = vec![create_package("mod", "")];
    create_level("", depth, breadth, &mut packages);

    RawModule {
        import_path: "example.com/mod".to_owned(),
        dir_name: None,
        packages,
    }
}

fn create_package(name: &str, rel_path: &str) -> RawPackage {
    let code = RawSource::Code;

    RawPackage {
        name: name.to_owned(),
        import_path: None,
        rel_path: rel_path.to_owned(),
        doc: format!(
            "Package {name} provides benchmark data.\n\nIt links to [Client] and [io.Reader].\n"
        ),
        consts: (0..10)
            .map(|i| RawValue {
                names: vec![format!("Const{i}")],
                doc: if i % 2 == 0 {
                    "doc: type=Client\n".to_owned()
                } else {
                    format!("Const{i} is a constant.\n")
                },
                source: code(format!("const Const{i} = {i}")),
            })
            .collect(),
        vars: Vec::new(),
        funcs: (0..10)
            .map(|i| RawFunc {
                name: format!("Func{i}"),
                doc: format!("Func{i} does work with [Client.Do].\n"),
                source: code(format!("func Func{i}()")),
            })
            .collect(),
        types: vec![RawType {
            name: "Client".to_owned(),
            doc: "Client is a benchmark type.\n".to_owned(),
            source: code("type Client struct{}".to_owned()),
            consts: Vec::new(),
            vars: Vec::new(),
            funcs: Vec::new(),
            methods: vec![RawMethod {
                name: "Do".to_owned(),
                doc: "Do sends a request.\n".to_owned(),
                source: code("func (c *Client) Do()".to_owned()),
                recv: "*Client".to_owned(),
                embedded: None,
                level: 0,
            }],
        }],
    }
}

fn bench_module_build(c: &mut Criterion) {
    // Every declaration carries inline code, so nothing is read from disk.
    let source = FsSource::new(".");
    let mut group = c.benchmark_group("module_build");

    for (depth, breadth) in [(1, 10), (3, 5)] {
        let raw = create_module(depth, breadth);
        let builder = ModuleBuilder::new(&source, ModuleOptions::default());

        group.bench_with_input(
            BenchmarkId::new("packages", raw.packages.len()),
            &raw,
            |b, raw| b.iter(|| builder.build(raw).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_module_build);
criterion_main!(benches);
