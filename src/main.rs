use anyhow::{Context, Result};
use sparql_templates::rdf::{RdfFormat, RdfParser};
use sparql_templates::{
    ClauseKind, GeneratorBuilder, InMemoryCatalog, NamedNode, QueryForm, QueryTemplate,
    SparqlEngine, TemplateConfig, TestGenerator,
};
use std::sync::Arc;

const GENERATORS_TTL: &str = r#"
@prefix qt: <http://w3id.org/sparql-templates/vocab#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.org/> .

ex:labelsPerType a qt:TestGenerator ;
    qt:queryTemplate ex:labelsPerTypeTemplate ;
    qt:basedOnPattern ex:labelCountPattern ;
    rdfs:comment "Types with more than one labelled instance" .

ex:untypedResources a qt:TestGenerator ;
    qt:generatorQuery "SELECT DISTINCT ?s WHERE { ?s ?p ?o FILTER NOT EXISTS { ?s a ?t } } ORDER BY ?s LIMIT 100" ;
    qt:basedOnPattern ex:untypedPattern, ex:coveragePattern .
"#;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("SPARQL Templates v{}", sparql_templates::version());
    println!("==========================================");
    println!();

    let config = TemplateConfig::default();
    let engine = SparqlEngine::from_config(&config);

    let mut catalog = InMemoryCatalog::new();
    catalog.insert_template(
        &QueryTemplate::new(
            NamedNode::new("http://example.org/labelsPerTypeTemplate")?,
            QueryForm::Select,
            "SELECT ?type (COUNT(?label) AS ?labels) WHERE { ?s a ?type ; rdfs:label ?label } \
             GROUP BY ?type HAVING (COUNT(?label) > 1) ORDER BY DESC(?labels)",
        )
        .with_label("Labels per type"),
    );

    let graph = RdfParser::parse(GENERATORS_TTL, RdfFormat::Turtle).context("parsing generator descriptions")?;
    let builder = GeneratorBuilder::new(Arc::new(catalog));
    let generators = builder.build_all(&graph).context("building generators")?;

    println!("=== Generators ===");
    println!("{}", serde_json::to_string_pretty(&generators)?);

    println!("\n=== Decomposed queries ===");
    for generator in &generators {
        describe(generator, &engine)?;
    }

    Ok(())
}

fn describe(generator: &TestGenerator, engine: &SparqlEngine) -> Result<()> {
    let select = generator
        .decompose(engine)
        .with_context(|| format!("decomposing {}", generator.id()))?;

    println!("{}", generator.id());
    println!("  columns: {:?}", select.projection_result_vars());
    for clause in select.clauses() {
        match clause {
            ClauseKind::Projection => {}
            ClauseKind::Modifier => println!("  modifier: {:?}", select.modifier()),
            ClauseKind::GroupBy => {
                let keys = select.group_by().map(|g| g.variables.len()).unwrap_or(0);
                println!("  group by: {} key(s)", keys);
            }
            ClauseKind::Having => println!("  having: {:?}", select.having()),
            ClauseKind::OrderBy => {
                println!("  order by: {} term(s)", select.order_by().map_or(0, |o| o.len()));
            }
            ClauseKind::Limit => println!("  limit: {:?}", select.limit()),
            ClauseKind::Offset => println!("  offset: {:?}", select.offset()),
            ClauseKind::Values => {
                if let Some(values) = select.values() {
                    println!("  values: {} rows over {:?}", values.bindings.len(), values.variables);
                }
            }
        }
    }
    println!("  where: {}", select.pattern());
    Ok(())
}
