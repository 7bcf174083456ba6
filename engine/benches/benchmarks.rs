//! Performance benchmarks for shape-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use shape_engine::{
    apply_sort, translate_order_by, Collection, ListPlan, PropertyMapping,
    PropertyMappingRegistry, RecordSource, ResourceParameters, Shape, Shaped, SortKey,
};
use std::sync::OnceLock;

#[derive(Debug, Clone)]
struct User {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    age: u32,
}

#[derive(Debug, Clone)]
struct UserView {
    id: i64,
    name: String,
    email: String,
    age: u32,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: format!("{} {}", u.first_name, u.last_name),
            email: u.email.clone(),
            age: u.age,
        }
    }
}

impl Shaped for User {
    fn shape() -> &'static Shape<Self> {
        static SHAPE: OnceLock<Shape<User>> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::<User>::new("User")
                .field("Id", |u| json!(u.id))
                .field("FirstName", |u| json!(u.first_name))
                .field("LastName", |u| json!(u.last_name))
                .field("Email", |u| json!(u.email))
                .field("Age", |u| json!(u.age))
        })
    }
}

impl Shaped for UserView {
    fn shape() -> &'static Shape<Self> {
        static SHAPE: OnceLock<Shape<UserView>> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::<UserView>::new("UserView")
                .field("Id", |u| json!(u.id))
                .field("Name", |u| json!(u.name))
                .field("Email", |u| json!(u.email))
                .field("Age", |u| json!(u.age))
        })
    }
}

fn create_test_registry() -> PropertyMappingRegistry {
    let mut registry = PropertyMappingRegistry::new();
    registry
        .register_for::<UserView, User>([
            PropertyMapping::identity("Id"),
            PropertyMapping::new("Name", ["FirstName", "LastName"]),
            PropertyMapping::identity("Email"),
            PropertyMapping::identity("Age"),
        ])
        .unwrap();
    registry
}

fn create_users(count: usize) -> Vec<User> {
    (0..count)
        .map(|i| User {
            id: i as i64,
            first_name: format!("First{}", i % 37),
            last_name: format!("Last{}", i % 101),
            email: format!("user{}@example.com", i),
            age: (i % 80) as u32,
        })
        .collect()
}

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");
    let registry = create_test_registry();
    let mappings = registry.mappings::<UserView, User>().unwrap();

    group.bench_function("order_by_three_clauses", |b| {
        b.iter(|| translate_order_by(black_box(Some("name desc, age, id")), mappings))
    });

    group.bench_function("validate_fields", |b| {
        b.iter(|| UserView::shape().check_fields(black_box(Some("id, name, email"))))
    });

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let keys = vec![
        SortKey::descending("FirstName"),
        SortKey::descending("LastName"),
        SortKey::ascending("Id"),
    ];

    for size in [100, 1000, 10_000].iter() {
        let users = create_users(*size);
        group.bench_with_input(BenchmarkId::new("apply_sort", size), &users, |b, users| {
            b.iter(|| {
                let mut users = users.clone();
                apply_sort(black_box(&mut users), &keys, User::shape())
            })
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let registry = create_test_registry();

    for size in [100, 1000, 10_000].iter() {
        let collection: Collection<User> = create_users(*size).into_iter().collect();
        let params = ResourceParameters::new()
            .with_order_by("name desc,id")
            .with_fields("id,name")
            .with_page_size(50)
            .with_page_number(3)
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("list_page", size),
            &collection,
            |b, collection| {
                b.iter(|| {
                    let plan = ListPlan::<UserView, User>::new(
                        &registry,
                        black_box(&params),
                        &[SortKey::ascending("Id")],
                    )
                    .unwrap();
                    plan.execute(collection.query(), |u| u.age > 20, UserView::from)
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("page_only", size),
            &collection,
            |b, collection| b.iter(|| collection.query().page(black_box(3), black_box(50))),
        );
    }

    group.finish();
}

fn bench_shaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("shaping");
    let views: Vec<UserView> = create_users(1000).iter().map(UserView::from).collect();

    group.bench_function("shape_all_fields", |b| {
        b.iter(|| {
            UserView::shape()
                .shape_collection(black_box(&views), None)
                .map(|records| records.count())
        })
    });

    group.bench_function("shape_two_fields", |b| {
        b.iter(|| {
            UserView::shape()
                .shape_collection(black_box(&views), Some("name,id"))
                .map(|records| records.count())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_translate,
    bench_sort,
    bench_pipeline,
    bench_shaping,
);
criterion_main!(benches);
