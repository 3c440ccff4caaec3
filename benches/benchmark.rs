// Engine benchmarks over randomly generated food tables
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dishwise_core::{
    get_filters, recommend, CategoryKey, ClassifierRegistry, DecisionTree, Ensemble,
    FeatureTable, FoodAttributes, FoodRow, ForestModel, LogisticModel, ProbabilityModel, Profile,
    RecommendRequest, ScoringMatrix, SuggestionContext, TreeNode,
};
use rand::prelude::*;
use std::sync::Arc;

const DIM: usize = 32;
const LABELS: [&str; 3] = ["heartKidneySafe", "metabolicHealth", "childFamilySafe"];

fn random_weights(rng: &mut impl Rng) -> Vec<f64> {
    (0..DIM).map(|_| rng.random_range(-1.0..1.0)).collect()
}

fn random_tree(rng: &mut impl Rng) -> DecisionTree {
    DecisionTree::new(vec![
        TreeNode::Split { feature: rng.random_range(0..DIM), threshold: 0.0, left: 1, right: 2 },
        TreeNode::Leaf { probability: rng.random_range(0.0..0.5) },
        TreeNode::Split { feature: rng.random_range(0..DIM), threshold: 0.5, left: 3, right: 4 },
        TreeNode::Leaf { probability: rng.random_range(0.3..0.8) },
        TreeNode::Leaf { probability: rng.random_range(0.5..1.0) },
    ])
    .unwrap()
}

fn generate_context(n_foods: usize) -> SuggestionContext {
    let mut rng = rand::rng();

    let rows = (0..n_foods)
        .map(|i| {
            let sugar = rng.random_range(0.0..25.0);
            let attributes = FoodAttributes {
                sugar,
                fiber_to_sugar: rng.random_range(0.0..3.0),
                protein_density: rng.random_range(0.0..0.3),
                ..FoodAttributes::default()
            };
            FoodRow::new(format!("Food {}", i), LABELS[i % LABELS.len()], attributes)
        })
        .collect();
    let matrix = ScoringMatrix::from_rows(
        (0..n_foods)
            .map(|_| (0..DIM).map(|_| rng.random_range(-1.0f32..1.0f32)).collect())
            .collect(),
    )
    .unwrap();

    let registry: ClassifierRegistry = LABELS
        .iter()
        .map(|label| {
            let forest = ForestModel::new((0..10).map(|_| random_tree(&mut rng)).collect()).unwrap();
            let members: Vec<Box<dyn ProbabilityModel>> = vec![
                Box::new(LogisticModel::new(random_weights(&mut rng), 0.0)),
                Box::new(LogisticModel::new(random_weights(&mut rng), 0.1)),
                Box::new(forest),
            ];
            Ensemble::new(CategoryKey::from(*label), 0.6, members).unwrap()
        })
        .collect();

    SuggestionContext::new(FeatureTable::new(rows), matrix, registry).unwrap()
}

fn benchmark_suggestions(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_suggestions");
    let categories: Vec<CategoryKey> = LABELS.iter().map(|l| CategoryKey::from(*l)).collect();

    for size in [100, 1000, 10000].iter() {
        let context = generate_context(*size);
        group.bench_with_input(BenchmarkId::new("initial", size), size, |b, _| {
            b.iter(|| context.get_suggestions(black_box(&categories), 10, None).unwrap());
        });

        let directives = get_filters(&Profile::from_value(serde_json::json!({
            "activity": "high",
            "macro": "low_sugar",
            "spicy": "hot"
        })));
        group.bench_with_input(BenchmarkId::new("refined", size), size, |b, _| {
            b.iter(|| {
                context
                    .get_suggestions(black_box(&categories), 10, Some(&directives))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_concurrent_requests(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_requests");
    let context = Arc::new(generate_context(5000));
    let request: RecommendRequest = serde_json::from_value(serde_json::json!({
        "basic_profile": {"high_bp": true, "weight_loss": true},
        "extra_profile": {"budget": true},
        "top_n": 5
    }))
    .unwrap();

    for threads in [1, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::new("threads", threads), threads, |b, &threads| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let context = context.clone();
                        let request = request.clone();
                        std::thread::spawn(move || recommend(&context, &request).unwrap())
                    })
                    .collect();
                for handle in handles {
                    black_box(handle.join().unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_suggestions, benchmark_concurrent_requests);
criterion_main!(benches);
