use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sparql_templates::rdf::vocab::{self, qt, rdf};
use sparql_templates::sparql::{QueryParser, TupleQuery};
use sparql_templates::{
    DescriptionGraph, GeneratorBuilder, InMemoryCatalog, Literal, NamedNode, QueryForm,
    QueryTemplate,
};
use std::hint::black_box;
use std::sync::Arc;

const QUERIES: &[(&str, &str)] = &[
    ("plain", "SELECT ?s ?o WHERE { ?s ?p ?o }"),
    ("ordered", "SELECT DISTINCT ?s WHERE { ?s ?p ?o } ORDER BY DESC(?s) LIMIT 10 OFFSET 5"),
    (
        "grouped",
        "SELECT ?s (COUNT(?o) AS ?n) WHERE { ?s ?p ?o FILTER(?o != ?s) } GROUP BY ?s HAVING (COUNT(?o) > 1) ORDER BY ?n",
    ),
];

/// Benchmark decomposition of already parsed SELECT queries
fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    let parser = QueryParser::default();

    for (name, text) in QUERIES {
        let query = parser.parse_as::<TupleQuery>(text).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, query| {
            b.iter(|| black_box(query.decompose().unwrap()));
        });
    }
    group.finish();
}

/// Benchmark generator construction with template resolution
fn bench_build_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_all");

    let template = QueryTemplate::new(
        NamedNode::new("http://example.org/templates/all").unwrap(),
        QueryForm::Select,
        "SELECT * WHERE { ?s ?p ?o }",
    );
    let mut catalog = InMemoryCatalog::new();
    catalog.insert_template(&template);
    let builder = GeneratorBuilder::new(Arc::new(catalog));

    for size in [10, 100, 1000].iter() {
        let mut graph = DescriptionGraph::new();
        for i in 0..*size {
            let id = NamedNode::new(&format!("http://example.org/gen/{}", i)).unwrap();
            graph.add(id.clone(), vocab::term(rdf::TYPE), vocab::term(qt::TEST_GENERATOR));
            if i % 2 == 0 {
                graph.add(id, vocab::term(qt::QUERY_TEMPLATE), template.id().clone());
            } else {
                graph.add(id, vocab::term(qt::GENERATOR_QUERY), Literal::new_simple_literal("ASK {}"));
            }
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| black_box(builder.build_all(graph).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decompose, bench_build_all);
criterion_main!(benches);
