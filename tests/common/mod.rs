// tests/common/mod.rs

//! Shared test utilities: an in-memory build service.

#![allow(dead_code)]

use obs_mirror::{Error, Project, Result, Transport};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read};

/// Serves canned bodies by resource path and records every request.
/// Unknown paths answer like a 404.
#[derive(Default)]
pub struct FakeService {
    responses: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, path: &str, names: &[&str]) -> Self {
        let entries: String = names
            .iter()
            .map(|n| format!("  <entry name=\"{n}\"/>\n"))
            .collect();
        self.responses.insert(
            path.to_string(),
            format!("<directory>\n{entries}</directory>\n").into_bytes(),
        );
        self
    }

    pub fn binaries(mut self, path: &str, binaries: &[(&str, u64)]) -> Self {
        let entries: String = binaries
            .iter()
            .map(|(name, size)| {
                format!("  <binary filename=\"{name}\" size=\"{size}\" mtime=\"1633046400\"/>\n")
            })
            .collect();
        self.responses.insert(
            path.to_string(),
            format!("<binarylist>\n{entries}</binarylist>\n").into_bytes(),
        );
        self
    }

    pub fn file(mut self, path: &str, content: Vec<u8>) -> Self {
        self.responses.insert(path.to_string(), content);
        self
    }

    pub fn raw(mut self, path: &str, body: &str) -> Self {
        self.responses.insert(path.to_string(), body.as_bytes().to_vec());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Transport for FakeService {
    fn get(&self, _project: &Project, resource: &str) -> Result<Box<dyn Read>> {
        self.requests.borrow_mut().push(resource.to_string());
        match self.responses.get(resource) {
            Some(body) => Ok(Box::new(Cursor::new(body.clone()))),
            None => Err(Error::TransportError(format!("HTTP 404 Not Found for {resource}"))),
        }
    }
}

pub fn project() -> Project {
    Project::new("home:alice", "alice", "secret")
}

/// The one-repo, one-arch, one-package service used by several tests
pub fn single_package_service() -> FakeService {
    FakeService::new()
        .directory("", &["15.3"])
        .directory("15.3", &["x86_64"])
        .directory("15.3/x86_64", &["foo"])
        .binaries(
            "15.3/x86_64/foo",
            &[("foo-1.0-1.x86_64.rpm", 100), ("foo-1.0-1.src.rpm", 50)],
        )
        .file("15.3/x86_64/foo/foo-1.0-1.x86_64.rpm", vec![0x42; 100])
        .file("15.3/x86_64/foo/foo-1.0-1.src.rpm", vec![0x24; 50])
}
