/*!
 * Authorization Benchmark
 * Decision-path throughput: role defaults, explicit grants, and denials
 */

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tablegate::{
    AccessChecker, AccessRequest, Action, AdminFacade, AuthzEngine, Effect, Role, StateHandle,
};

fn setup(users: usize, resources: usize) -> (AuthzEngine, Vec<String>, Vec<String>) {
    let state = StateHandle::new();
    let admin = AdminFacade::new(state.clone());
    let engine = AuthzEngine::new(state);

    let mut user_ids = Vec::with_capacity(users);
    for i in 0..users {
        let user = admin
            .create_user(format!("user_{i}"), None, Role::DataViewer)
            .unwrap();
        user_ids.push(user.id);
    }
    let mut names = Vec::with_capacity(resources);
    for i in 0..resources {
        let name = format!("table_{i}");
        admin.register_resource(&name, "").unwrap();
        names.push(name);
    }
    // Half the users carry an explicit grant on every table
    for (i, user_id) in user_ids.iter().enumerate() {
        if i % 2 == 0 {
            for name in &names {
                admin
                    .set_grant(user_id, name, Action::Select, Effect::Allow)
                    .unwrap();
            }
        }
    }
    (engine, user_ids, names)
}

fn bench_authorize(c: &mut Criterion) {
    let (engine, users, resources) = setup(100, 20);

    c.bench_function("authorize_role_default", |b| {
        let request = AccessRequest::select(users[1].clone(), resources[0].clone());
        b.iter(|| black_box(engine.authorize(black_box(&request)).unwrap()))
    });

    c.bench_function("authorize_explicit_grant", |b| {
        let request = AccessRequest::select(users[0].clone(), resources[0].clone());
        b.iter(|| black_box(engine.authorize(black_box(&request)).unwrap()))
    });

    c.bench_function("authorize_unknown_user", |b| {
        let request = AccessRequest::select("ghost", resources[0].clone());
        b.iter(|| black_box(engine.authorize(black_box(&request)).unwrap()))
    });
}

fn bench_grant_write(c: &mut Criterion) {
    let state = StateHandle::new();
    let admin = AdminFacade::new(state);
    let user = admin.create_user("bench", None, Role::DataViewer).unwrap();
    admin.register_resource("orders", "").unwrap();

    c.bench_function("set_grant_upsert", |b| {
        b.iter(|| {
            admin
                .set_grant(&user.id, "orders", Action::Select, black_box(Effect::Allow))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_authorize, bench_grant_write);
criterion_main!(benches);
