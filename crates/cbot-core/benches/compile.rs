//! This bench compiles and renders the report for a fully loaded submission:
//! every module and service, both environments, and LDAP enabled.

#![allow(missing_docs)]

use std::hint::black_box;

use cbot_core::{
    compile,
    domain::{AuxiliaryService, CoreModule, Database, Environment, EnvironmentType, FormSelections},
    render::{render, Format},
    LdapDetails,
};
use criterion::{criterion_group, criterion_main, Criterion};

fn full_selections() -> FormSelections {
    let ldap = LdapDetails::new(
        "ldaps://directory.example.com:636",
        "cn=svc-cbot,ou=services,dc=example,dc=com",
        "ou=people,dc=example,dc=com",
        "(&(objectClass=person)(memberOf=cn=cbot,ou=groups,dc=example,dc=com))",
    )
    .unwrap();

    let mut selections =
        FormSelections::new(Environment::Both, EnvironmentType::OnPrem, Database::Postgresql)
            .with_ldap(ldap);
    for module in CoreModule::ALL {
        selections = selections.with_module(module);
    }
    for service in AuxiliaryService::ALL {
        selections = selections.with_service(service);
    }
    selections
}

fn compile_report(c: &mut Criterion) {
    let selections = full_selections();
    c.bench_function("compile", |b| b.iter(|| compile(black_box(&selections))));
}

fn render_report(c: &mut Criterion) {
    let report = compile(&full_selections());
    for format in Format::ALL {
        c.bench_function(&format!("render {format}"), |b| {
            b.iter(|| render(black_box(&report), format));
        });
    }
}

criterion_group!(benches, compile_report, render_report);
criterion_main!(benches);
