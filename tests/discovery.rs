// tests/discovery.rs

//! Package discovery: catalog shape, ordering, filtering and failure handling.

mod common;

use common::{project, single_package_service, FakeService};
use obs_mirror::{CallbackProgress, Error, ProgressEvent, ProjectClient, SilentProgress};
use std::cell::RefCell;

#[test]
fn test_single_package_catalog() {
    let service = single_package_service();
    let client = ProjectClient::new(project(), &service);

    let catalog = client.find_all_packages(&SilentProgress::new()).unwrap();

    assert_eq!(catalog.len(), 1);
    let pkg = &catalog[0];
    assert_eq!(pkg.name, "foo");
    assert_eq!(pkg.repo, "15.3");
    assert_eq!(pkg.arch, "x86_64");
    assert_eq!(pkg.path, "15.3/x86_64/foo");
    assert_eq!(pkg.files.len(), 1);
    assert_eq!(pkg.files[0].filename, "foo-1.0-1.x86_64.rpm");
    assert_eq!(pkg.files[0].size, 100);
    assert_eq!(pkg.files[0].mtime, "1633046400");
}

#[test]
fn test_requests_follow_hierarchy() {
    let service = single_package_service();
    let client = ProjectClient::new(project(), &service);
    client.find_all_packages(&SilentProgress::new()).unwrap();

    assert_eq!(
        service.requests(),
        vec!["", "15.3", "15.3/x86_64", "15.3/x86_64/foo"]
    );
}

#[test]
fn test_catalog_order_is_repo_arch_package() {
    let service = FakeService::new()
        .directory("", &["Debian_11", "openSUSE_Tumbleweed"])
        .directory("Debian_11", &["x86_64", "aarch64"])
        .directory("Debian_11/x86_64", &["zeta", "alpha"])
        .directory("Debian_11/aarch64", &["zeta"])
        .directory("openSUSE_Tumbleweed", &["x86_64"])
        .directory("openSUSE_Tumbleweed/x86_64", &["beta", "alpha"])
        .binaries("Debian_11/x86_64/zeta", &[("zeta_1.0_amd64.deb", 1)])
        .binaries("Debian_11/x86_64/alpha", &[])
        .binaries("Debian_11/aarch64/zeta", &[])
        .binaries("openSUSE_Tumbleweed/x86_64/beta", &[])
        .binaries("openSUSE_Tumbleweed/x86_64/alpha", &[]);
    let client = ProjectClient::new(project(), &service);

    let catalog = client.find_all_packages(&SilentProgress::new()).unwrap();
    let paths: Vec<_> = catalog.iter().map(|p| p.path.as_str()).collect();

    // server order at every level, no sorting
    assert_eq!(
        paths,
        vec![
            "Debian_11/x86_64/zeta",
            "Debian_11/x86_64/alpha",
            "Debian_11/aarch64/zeta",
            "openSUSE_Tumbleweed/x86_64/beta",
            "openSUSE_Tumbleweed/x86_64/alpha",
        ]
    );
}

#[test]
fn test_mixed_formats_are_filtered_per_arch() {
    let service = FakeService::new()
        .directory("", &["Debian_11"])
        .directory("Debian_11", &["aarch64"])
        .directory("Debian_11/aarch64", &["tool"])
        .binaries(
            "Debian_11/aarch64/tool",
            &[
                ("tool_2.1-1_aarch64.deb", 10),
                ("tool_2.1-1_x86_64.deb", 11),
                ("tool-data_2.1-1_all.deb", 12),
                ("tool_2.1-1.dsc", 13),
                ("tool-2.1-1.noarch.rpm", 14),
                ("tool-2.1-1.aarch64.rpm", 15),
                ("tool-2.1-1.x86_64.rpm", 16),
                ("_buildenv", 17),
            ],
        );
    let client = ProjectClient::new(project(), &service);

    let catalog = client.find_all_packages(&SilentProgress::new()).unwrap();
    let names: Vec<_> = catalog[0].files.iter().map(|f| f.filename.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "tool_2.1-1_aarch64.deb",
            "tool-data_2.1-1_all.deb",
            "tool-2.1-1.noarch.rpm",
            "tool-2.1-1.aarch64.rpm",
        ]
    );
    assert!(catalog.iter().all(|pkg| pkg
        .files
        .iter()
        .all(|f| !f.filename.contains("x86_64"))));
}

#[test]
fn test_empty_levels_are_not_errors() {
    let service = FakeService::new()
        .directory("", &["r1", "r2"])
        .directory("r1", &[])
        .directory("r2", &["a"])
        .directory("r2/a", &[]);
    let client = ProjectClient::new(project(), &service);

    assert!(client.find_all_packages(&SilentProgress::new()).unwrap().is_empty());
}

#[test]
fn test_arch_listing_failure_aborts() {
    let service = FakeService::new().directory("", &["r1"]);
    let client = ProjectClient::new(project(), &service);

    let err = client.find_all_packages(&SilentProgress::new()).unwrap_err();
    assert!(matches!(err, Error::TransportError(_)));
    let message = err.to_string();
    assert!(message.contains("failed to list archs of r1"), "{message}");
    assert!(message.contains("home:alice"), "{message}");
}

#[test]
fn test_malformed_binary_listing_aborts() {
    let service = FakeService::new()
        .directory("", &["r"])
        .directory("r", &["a"])
        .directory("r/a", &["good", "bad", "never"])
        .binaries("r/a/good", &[("good.noarch.rpm", 1)])
        .raw("r/a/bad", "<binarylist><binary filename=\"x.a.rpm\" size=\"ten\"/></binarylist>");
    let client = ProjectClient::new(project(), &service);

    let err = client.find_all_packages(&SilentProgress::new()).unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
    assert!(!service.requests().contains(&"r/a/never".to_string()));
}

#[test]
fn test_traversing_filename_aborts_discovery() {
    let service = FakeService::new()
        .directory("", &["r"])
        .directory("r", &["a"])
        .directory("r/a", &["p"])
        .binaries("r/a/p", &[("../../../../../evil.noarch.rpm", 1)]);
    let client = ProjectClient::new(project(), &service);

    let err = client.find_all_packages(&SilentProgress::new()).unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
}

#[test]
fn test_traversing_package_name_aborts_discovery() {
    let service = FakeService::new()
        .directory("", &["r"])
        .directory("r", &["a"])
        .directory("r/a", &[".."]);
    let client = ProjectClient::new(project(), &service);

    let err = client.find_all_packages(&SilentProgress::new()).unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
    assert_eq!(service.requests(), vec!["", "r", "r/a"]);
}

#[test]
fn test_progress_counts_packages() {
    let service = FakeService::new()
        .directory("", &["r"])
        .directory("r", &["a"])
        .directory("r/a", &["p1", "p2"])
        .binaries("r/a/p1", &[])
        .binaries("r/a/p2", &[]);
    let client = ProjectClient::new(project(), &service);

    let events = RefCell::new(Vec::new());
    let progress = CallbackProgress::new(|event| events.borrow_mut().push(event));
    client.find_all_packages(&progress).unwrap();
    drop(progress);

    let events = events.into_inner();
    assert_eq!(events[0], ProgressEvent::Length(2));
    assert!(events.contains(&ProgressEvent::Started("r/a/p1".to_string())));
    assert!(events.contains(&ProgressEvent::Position { current: 2, total: 2 }));
    assert!(matches!(events.last(), Some(ProgressEvent::Finished(_))));
}

#[test]
fn test_progress_reports_error() {
    let service = FakeService::new();
    let client = ProjectClient::new(project(), &service);

    let events = RefCell::new(Vec::new());
    let progress = CallbackProgress::new(|event| events.borrow_mut().push(event));
    assert!(client.find_all_packages(&progress).is_err());
    drop(progress);

    assert!(matches!(
        events.into_inner().last(),
        Some(ProgressEvent::Error(_))
    ));
}

#[test]
fn test_package_binaries_appends_matches() {
    let service = single_package_service();
    let client = ProjectClient::new(project(), &service);

    let mut pkg = obs_mirror::PackageInfo::new("15.3", "x86_64", "foo");
    client.package_binaries(&mut pkg).unwrap();
    assert_eq!(pkg.files.len(), 1);
    assert_eq!(pkg.path, "15.3/x86_64/foo");
}
